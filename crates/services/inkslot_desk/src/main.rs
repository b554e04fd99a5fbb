// --- File: crates/services/inkslot_desk/src/main.rs ---
mod commands;
mod error;

use commands::{Command, USAGE};
use inkslot_common::init_from_config;
use inkslot_config::load_config;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {}", err);
            return ExitCode::FAILURE;
        }
    };
    // Keeps the file writer flushing until exit.
    let _log_guard = init_from_config(&config.logging);

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{}\n\n{}", err, USAGE);
            return ExitCode::from(2);
        }
    };

    match commands::run(command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("command failed: {}", err);
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
