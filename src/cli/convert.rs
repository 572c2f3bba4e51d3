use super::ui;
use crate::view::ConverterView;
use anyhow::Result;

/// Overrides applied to the form before a one-shot conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<f64>,
}

pub fn run(view: &mut ConverterView, args: &ConvertArgs) -> Result<()> {
    if let Some(from) = &args.from {
        view.set_source(from);
    }
    if let Some(to) = &args.to {
        view.set_destination(to);
    }
    if let Some(amount) = args.amount {
        view.set_amount(amount);
    }

    if view.convert()?.is_none() {
        println!(
            "{}",
            ui::style_text("No exchange rates loaded.", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    if let Some(line) = view.result_line() {
        println!("{}", ui::style_text(&line, ui::StyleType::Result));
    }
    Ok(())
}
