//! testgate library root.
//! Exposes the CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing::error;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Invite { .. } => cli::commands::invite::handle(&cli.command, cfg),
        Commands::Lookup { .. } => cli::commands::lookup::handle(&cli.command, cfg),
        Commands::Start { .. } => cli::commands::start::handle(&cli.command, cfg),
        Commands::Submit { .. } => cli::commands::submit::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    logging::init();

    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    // Command-line overrides for the store locations
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(custom_blobs) = &cli.blobs {
        cfg.blob_dir = custom_blobs.clone();
    }

    // Infrastructure detail stays in the internal log; callers get the
    // generic message from main.
    dispatch(&cli, &cfg).inspect_err(|e| {
        if e.is_internal() {
            error!("{e}");
        }
    })
}
