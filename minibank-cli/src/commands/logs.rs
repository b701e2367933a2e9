//! Logs command - view and manage the event log

use std::path::Path;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;

use minibank_core::services::logging::now_ms;
use minibank_core::{EntryPoint, LoggingService};

use crate::output::create_table;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show log statistics and file path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn format_timestamp(timestamp_ms: i64) -> String {
    use chrono::{TimeZone, Utc};
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Timestamp `days` days before `now_ms`; rejects spans that overflow
fn cutoff_before(now_ms: i64, days: u64) -> Result<i64> {
    i64::try_from(days)
        .ok()
        .and_then(|d| d.checked_mul(DAY_MS))
        .and_then(|span| now_ms.checked_sub(span))
        .ok_or_else(|| anyhow!("--older-than-days {} is out of range", days))
}

pub fn run(data_dir: &Path, command: LogsCommands) -> Result<()> {
    let service = LoggingService::new(data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))?;

    match command {
        LogsCommands::List { limit, errors, json } => {
            let entries = if errors {
                service.get_errors(limit)?
            } else {
                service.get_recent(limit)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            if entries.is_empty() {
                println!("No log entries found.");
                return Ok(());
            }

            let mut table = create_table();
            table.set_header(vec!["Time", "Entry", "Event", "Context", "Error"]);

            for entry in entries {
                let account = entry.event.account_number.map(|n| format!("account {}", n));
                let context = [entry.event.command.clone(), account]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(", ");

                let error = entry
                    .event
                    .error_code
                    .clone()
                    .or_else(|| entry.event.error_message.clone())
                    .map(|e| e.red().to_string())
                    .unwrap_or_default();

                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.entry_point,
                    entry.event.event,
                    context,
                    error,
                ]);
            }

            println!("{}", table);
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            let cutoff_ms = cutoff_before(now_ms(), older_than_days)?;

            if !force && !json {
                use dialoguer::Confirm;
                if !Confirm::new()
                    .with_prompt(format!("Delete logs older than {} days?", older_than_days))
                    .default(false)
                    .interact()?
                {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let deleted = service.delete_before(cutoff_ms)?;

            if json {
                println!("{}", serde_json::json!({ "deleted": deleted }));
            } else {
                println!("Deleted {} log entries", deleted);
            }
        }
        LogsCommands::Stats { json } => {
            let total = service.count()?;
            let errors = service.get_errors(usize::MAX)?.len();
            let path = service.path().to_path_buf();
            let size_bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "total_entries": total,
                        "error_count": errors,
                        "log_path": path.to_string_lossy(),
                        "log_size_bytes": size_bytes
                    })
                );
            } else {
                println!("{}", "Log Statistics".bold());
                println!("  Total entries: {}", total);
                println!("  Errors: {}", errors);
                println!("  File: {}", path.display());
                println!("  Size: {} bytes", size_bytes);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_before() {
        assert_eq!(cutoff_before(10 * DAY_MS, 3).unwrap(), 7 * DAY_MS);
        assert_eq!(cutoff_before(DAY_MS, 0).unwrap(), DAY_MS);
    }

    #[test]
    fn test_cutoff_rejects_out_of_range_days() {
        assert!(cutoff_before(now_ms(), u64::MAX).is_err());
        assert!(cutoff_before(now_ms(), i64::MAX as u64).is_err());
        assert!(cutoff_before(now_ms(), 200_000_000_000).is_err());
    }
}
