//! rworklog library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Init) => cli::commands::init::handle(cli),
        Some(cmd @ Commands::Run { .. }) => cli::commands::run::handle(cmd, cfg),
        Some(cmd @ Commands::Project { .. }) => cli::commands::project::handle(cmd, cfg),
        Some(cmd @ Commands::List { .. }) => cli::commands::list::handle(cmd, cfg),
        Some(cmd @ Commands::Export { .. }) => cli::commands::export::handle(cmd, cfg),
        Some(cmd @ Commands::Config { .. }) => cli::commands::config::handle(cmd, cfg),
        Some(cmd @ Commands::Db { .. }) => cli::commands::db::handle(cmd, cfg),
        Some(cmd @ Commands::Log { .. }) => cli::commands::log::handle(cmd, cfg),
        None => cli::commands::run::handle(&Commands::Run { project: None }, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // the data directory also holds the checkpoint file, even with --db
    Config::ensure_data_dir()?;

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
