//! Line-oriented converter session.
//!
//! Each input line is one user action against the [`ConverterView`]: pick the
//! source or destination currency, type an amount, press convert.

use super::{rates, ui};
use crate::view::ConverterView;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Commands:
  rates            show the exchange rate list
  currencies       list selectable currency codes
  from <CODE>      set the source currency
  to <CODE>        set the destination currency
  amount <N>       set the amount to convert
  convert          convert with the current selection
  show             show the current selection and last result
  help             show this help
  quit             leave the session";

#[derive(Debug, PartialEq)]
enum Action<'a> {
    Rates,
    Currencies,
    From(&'a str),
    To(&'a str),
    Amount(&'a str),
    Convert,
    Show,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse_action(line: &str) -> Action<'_> {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    match (verb.to_lowercase().as_str(), arg) {
        ("", _) => Action::Empty,
        ("rates", _) => Action::Rates,
        ("currencies", _) => Action::Currencies,
        ("from", code) if !code.is_empty() => Action::From(code),
        ("to", code) if !code.is_empty() => Action::To(code),
        ("amount", value) if !value.is_empty() => Action::Amount(value),
        ("convert", _) => Action::Convert,
        ("show", _) => Action::Show,
        ("help" | "?", _) => Action::Help,
        ("quit" | "exit", _) => Action::Quit,
        _ => Action::Unknown(line),
    }
}

fn warn_unknown_code<W: Write>(view: &ConverterView, code: &str, output: &mut W) -> Result<()> {
    if view.rates().is_some_and(|t| !t.contains(code)) {
        writeln!(
            output,
            "{}",
            ui::style_text(
                &format!("{code} is not in the rate table"),
                ui::StyleType::Error
            )
        )?;
    }
    Ok(())
}

fn write_selection<W: Write>(view: &ConverterView, output: &mut W) -> Result<()> {
    let form = view.form();
    writeln!(
        output,
        "From: {}  To: {}  Amount: {}",
        form.from, form.to, form.amount
    )?;
    if let Some(line) = view.result_line() {
        writeln!(output, "{}", ui::style_text(&line, ui::StyleType::Result))?;
    }
    Ok(())
}

/// Runs the session until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    view: &mut ConverterView,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(
        output,
        "{}",
        ui::style_text("Currency Converter", ui::StyleType::Title)
    )?;
    writeln!(output, "Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let action = parse_action(&line);
        debug!(?action, "Session input");

        match action {
            Action::Empty => {}
            Action::Rates => writeln!(output, "{}", rates::render(view, ui::terminal_width()))?,
            Action::Currencies => {
                let options = view.currency_options();
                if options.is_empty() {
                    writeln!(
                        output,
                        "{}",
                        ui::style_text("No currencies available.", ui::StyleType::Subtle)
                    )?;
                } else {
                    writeln!(output, "{}", options.join(" "))?;
                }
            }
            Action::From(code) => {
                view.set_source(code);
                let selected = view.form().from.clone();
                warn_unknown_code(view, &selected, &mut output)?;
            }
            Action::To(code) => {
                view.set_destination(code);
                let selected = view.form().to.clone();
                warn_unknown_code(view, &selected, &mut output)?;
            }
            Action::Amount(text) => {
                if let Err(e) = view.set_amount_text(text) {
                    let message = ui::style_text(&e.to_string(), ui::StyleType::Error);
                    writeln!(output, "{message}")?;
                }
            }
            Action::Convert => match view.convert() {
                Ok(Some(_)) => {
                    if let Some(line) = view.result_line() {
                        writeln!(output, "{}", ui::style_text(&line, ui::StyleType::Result))?;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    let message = ui::style_text(&e.to_string(), ui::StyleType::Error);
                    writeln!(output, "{message}")?;
                }
            },
            Action::Show => write_selection(view, &mut output)?,
            Action::Help => writeln!(output, "{HELP}")?,
            Action::Quit => break,
            Action::Unknown(text) => {
                writeln!(
                    output,
                    "{}",
                    ui::style_text(
                        &format!("Unknown command: {text}. Type 'help' for commands."),
                        ui::StyleType::Error
                    )
                )?;
            }
        }
        output.flush()?;
    }

    Ok(())
}
