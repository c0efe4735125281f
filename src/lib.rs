pub mod app;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod export;
pub mod journal;
pub mod models;
pub mod stats;

pub use app::AppState;
pub use error::{JournalError, Result};
pub use journal::{Journal, SymbolAdded};

use clap::Parser;
use env_logger::Env;

/// Entry point for the `trade-journal` binary
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = cli::Cli::parse();
    cli::execute(cli)
}
