pub mod cli;
pub mod core;
pub mod providers;
pub mod view;

use crate::cli::convert::ConvertArgs;
use crate::core::config::AppConfig;
use crate::providers::exchangerate_api::ExchangeRateApiProvider;
use crate::view::ConverterView;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Rates,
    Convert(ConvertArgs),
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = %config.provider.base_url,
        base_currency = %config.base_currency,
        defaults = ?config.defaults,
        "Loaded config"
    );

    let provider =
        ExchangeRateApiProvider::new(&config.provider.base_url, &config.provider.api_key);
    let mut view = ConverterView::new(&config.defaults);

    let pb = cli::ui::new_spinner("Fetching exchange rates...");
    let loaded = view.mount(&provider, &config.base_currency).await;
    pb.finish_and_clear();
    debug!(loaded, "View mounted");

    match command {
        AppCommand::Rates => cli::rates::run(&view),
        AppCommand::Convert(args) => cli::convert::run(&mut view, &args),
        AppCommand::Interactive => {
            let stdin = std::io::stdin();
            cli::interactive::run(&mut view, stdin.lock(), std::io::stdout())
        }
    }
}
