use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use conversor::cli::convert::ConvertArgs;
use conversor::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for conversor::AppCommand {
    fn from(cmd: Commands) -> conversor::AppCommand {
        match cmd {
            Commands::Rates => conversor::AppCommand::Rates,
            Commands::Convert { from, to, amount } => {
                conversor::AppCommand::Convert(ConvertArgs { from, to, amount })
            }
            Commands::Interactive => conversor::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the exchange rate list
    Rates,
    /// Convert an amount between two currencies
    Convert {
        /// Source currency code
        #[arg(short, long)]
        from: Option<String>,
        /// Destination currency code
        #[arg(short, long)]
        to: Option<String>,
        /// Amount to convert
        #[arg(short, long, allow_negative_numbers = true, value_parser = parse_amount_arg)]
        amount: Option<f64>,
    },
    /// Start an interactive conversion session
    Interactive,
}

fn parse_amount_arg(input: &str) -> Result<f64, String> {
    conversor::core::convert::parse_amount(input).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => conversor::cli::setup::setup(),
        Some(cmd) => conversor::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        // Returning the error prints it; keep the log entry for verbose runs
        tracing::debug!(error = %e, "Application failed");
    }
    result
}
