//! Minibank CLI - a tiny personal bank in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;
mod prompt;

use commands::{config, logs, shell};

/// Minibank - a tiny personal bank in your terminal
#[derive(Parser)]
#[command(name = "mb", version, about, long_about = None)]
struct Cli {
    /// Data directory (defaults to $MINIBANK_DIR or ~/.minibank)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive banking menu (default)
    Shell {
        /// Start with a demo client and account
        #[arg(long)]
        demo: bool,
        /// Print operation results as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// Show bank settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = commands::get_data_dir(cli.data_dir)?;

    match cli.command.unwrap_or(Commands::Shell { demo: false, json: false }) {
        Commands::Shell { demo, json } => shell::run(&data_dir, demo, json),
        Commands::Logs { command } => logs::run(&data_dir, command),
        Commands::Config { command } => config::run(&data_dir, command),
    }
}
