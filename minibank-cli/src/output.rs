//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Format a success message
pub fn success(msg: &str) -> String {
    format!("=== {} ===", msg).green().to_string()
}

/// Format a failure message
pub fn failure(msg: &str) -> String {
    format!("@@@ {} @@@", msg).red().to_string()
}

/// Format a warning message
pub fn warning(msg: &str) -> String {
    msg.yellow().to_string()
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a monetary amount with two decimals
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{} {:.2}", symbol, amount.round_dp(2))
}
