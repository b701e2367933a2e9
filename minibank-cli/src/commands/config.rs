//! Config command - show the effective bank settings

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use minibank_core::config::{Config, SETTINGS_FILE};

use crate::output::{create_table, format_money};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the settings new accounts will use
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the path of the settings file
    Path,
}

pub fn run(data_dir: &Path, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(data_dir)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }

            println!("{}", "Bank Settings".bold());
            let mut table = create_table();
            table.add_row(vec!["Branch", config.branch_code.as_str()]);
            table.add_row(vec![
                "Per-withdrawal limit".to_string(),
                format_money(&config.currency_symbol, config.per_withdrawal_limit),
            ]);
            table.add_row(vec![
                "Withdrawals allowed".to_string(),
                config.daily_withdrawal_limit.to_string(),
            ]);
            println!("{}", table);
        }
        ConfigCommands::Path => {
            println!("{}", data_dir.join(SETTINGS_FILE).display());
        }
    }
    Ok(())
}
