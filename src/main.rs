mod args;
mod ballots;
mod commands;
mod config;
mod db;
mod error;
mod export;
mod models;
mod selection;
mod store;
mod tasks;
mod voting;

use clap::Parser;
use commands::Services;
use config::ConfigRepository;
use ballots::BallotLog;
use db::Database;
use log::error;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let args = args::Args::parse();

    // Initialize logging
    dotenvy::dotenv().ok();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    // Initialize database
    let database = match Database::new().await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let services = Services {
        config: ConfigRepository::new(database.clone()),
        ballots: BallotLog::new(database),
    };

    let mut stdout = std::io::stdout();
    if let Err(e) = commands::handle_command(&services, args.command, &mut stdout).await {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
