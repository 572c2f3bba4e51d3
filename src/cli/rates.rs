use super::ui;
use crate::core::rates::{MAX_LISTED_RATES, RateEntry};
use crate::view::ConverterView;
use anyhow::Result;

const CELL_WIDTH: usize = 12;

/// Number of rate cells that fit side by side in `width` columns.
pub fn columns_for_width(width: usize) -> usize {
    (width.saturating_sub(1) / CELL_WIDTH).clamp(1, 12)
}

/// Lays the entries out left to right, wrapping into rows of `columns` cells.
pub fn render_rate_grid(entries: &[RateEntry], columns: usize) -> String {
    let mut table = ui::new_styled_table();
    for row in entries.chunks(columns.max(1)) {
        table.add_row(
            row.iter()
                .map(|e| ui::rate_cell(&e.code, &e.display_rate()))
                .collect::<Vec<_>>(),
        );
    }
    table.to_string()
}

/// Rate list section of the view, with its title.
pub fn render(view: &ConverterView, width: usize) -> String {
    let Some(table) = view.rates() else {
        return ui::style_text("No exchange rates loaded.", ui::StyleType::Subtle);
    };

    let mut output = format!(
        "{} {}\n",
        ui::style_text("Exchange Rates", ui::StyleType::Title),
        ui::style_text(&format!("(base {})", table.base()), ui::StyleType::Subtle)
    );
    if let Some(updated) = table.last_updated() {
        output.push_str(&ui::style_text(
            &format!("Last updated {}", updated.format("%Y-%m-%d %H:%M UTC")),
            ui::StyleType::Subtle,
        ));
        output.push('\n');
    }

    let entries = view.rate_list();
    output.push_str(&render_rate_grid(&entries, columns_for_width(width)));
    if table.len() > MAX_LISTED_RATES {
        output.push('\n');
        output.push_str(&ui::style_text(
            &format!("Showing {} of {} currencies", entries.len(), table.len()),
            ui::StyleType::Subtle,
        ));
    }
    output
}

pub fn run(view: &ConverterView) -> Result<()> {
    println!("{}", render(view, ui::terminal_width()));
    Ok(())
}
