use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use std::time::Duration;

use crate::core::Quote;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn price_cell(price: Decimal) -> Cell {
    Cell::new(format!("{:.2}", price)).set_alignment(CellAlignment::Right)
}

/// Creates a cell for a fractional change shown as a percentage, colored by sign.
pub fn change_cell(change: Decimal) -> Cell {
    let text = format!("{:.2}%", change * Decimal::ONE_HUNDRED);
    let color = if change >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(text)
        .fg(color)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// One-row table summarizing a quote and its change.
pub fn quote_table(quote: &Quote, change: Decimal) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Symbol"),
        header_cell("Previous close"),
        header_cell("Price"),
        header_cell("Change"),
    ]);
    table.add_row(vec![
        Cell::new(&quote.symbol),
        price_cell(quote.previous_close),
        price_cell(quote.current_price),
        change_cell(change),
    ]);
    table
}

/// Creates a spinner shown on stderr while a network call is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_table_contents() {
        let quote = Quote {
            symbol: "TSLA".to_string(),
            current_price: dec!(110),
            previous_close: dec!(100),
        };
        let rendered = quote_table(&quote, dec!(0.10)).to_string();
        assert!(rendered.contains("TSLA"));
        assert!(rendered.contains("100.00"));
        assert!(rendered.contains("110.00"));
        assert!(rendered.contains("10.00%"));
    }

    #[test]
    fn test_change_cell_negative() {
        let cell = change_cell(dec!(-0.0325));
        assert_eq!(cell.content(), "-3.25%");
    }
}
