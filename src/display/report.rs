//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the period report and overview.

use rust_decimal::Decimal;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::reports::Comparison;

/// Format a comparison as arrow, absolute delta and percent change
pub fn format_comparison(comparison: &Comparison, symbol: &str) -> String {
    let delta = comparison.delta.abs().format_with_symbol(symbol);
    if comparison.has_baseline {
        format!(
            "{} {} ({})",
            comparison.direction.arrow(),
            delta,
            format_signed_percentage(comparison.delta_percent)
        )
    } else {
        format!(
            "{} {} ({}, no baseline)",
            comparison.direction.arrow(),
            delta,
            format_percentage(comparison.delta_percent)
        )
    }
}

/// Format a percentage already rounded to one fraction digit
pub fn format_percentage(pct: Decimal) -> String {
    format!("{}%", pct)
}

fn format_signed_percentage(pct: Decimal) -> String {
    if pct.is_sign_positive() && !pct.is_zero() {
        format!("+{}%", pct)
    } else {
        format_percentage(pct)
    }
}

/// Render rows as a table; every column after the first is right-aligned
pub fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table
        .with(Style::sharp())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::reports::compare;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Decimal::new(500, 1)), "50.0%");
        assert_eq!(format_percentage(Decimal::new(-333, 1)), "-33.3%");
    }

    #[test]
    fn test_format_comparison() {
        let up = compare(Money::from_units(150), Money::from_units(100));
        assert_eq!(format_comparison(&up, "$"), "↑ $50.00 (+50.0%)");

        let down = compare(Money::from_units(80), Money::from_units(120));
        assert_eq!(format_comparison(&down, "$"), "↓ $40.00 (-33.3%)");

        let fresh = compare(Money::from_units(80), Money::zero());
        assert_eq!(format_comparison(&fresh, "৳"), "↑ ৳80.00 (0.0%, no baseline)");
    }

    #[test]
    fn test_render_table() {
        let table = render_table(
            &["Category", "Amount"],
            vec![vec!["Food".into(), "80.00".into()], vec!["Rent".into(), "500.00".into()]],
        );
        assert!(table.contains("Category"));
        assert!(table.contains("Food"));
        assert!(table.contains("500.00"));
        assert_eq!(table.lines().count(), 6);
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(3), "───");
    }
}
