use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};

mod api;
mod cli;
mod codec;
mod core;
mod generators;
mod logging;
mod models;
mod tools;
mod utils;
mod validators;

use crate::cli::handlers::{self, Output};
use crate::cli::Args;
use crate::core::config::{parse_level, Config};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let output = Output::from_flag(args.json);

    let (mut config, mut warnings) = Config::load();
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &args.log_level {
        match parse_level(level) {
            Some(filter) => config.log_level = filter,
            None => warnings.push(format!("Unknown log level '{}', keeping {}", level, config.log_level)),
        }
    }
    warnings.extend(config.ensure_directories_exist());

    match logging::init(&config) {
        Ok(()) => {
            for warning in &warnings {
                log::warn!("{}", warning);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialise logging: {}", e);
            for warning in &warnings {
                eprintln!("{}", warning);
            }
        }
    }
    log::debug!("Loaded config: {:?}", config);

    let should_exit = Arc::new(AtomicBool::new(false));
    {
        let should_exit = Arc::clone(&should_exit);
        if let Err(e) = ctrlc::set_handler(move || {
            log::info!("🔴 Ctrl+C received. Shutting down...");
            should_exit.store(true, Ordering::SeqCst);
            println!("\n👋 Goodbye!");
            std::process::exit(0);
        }) {
            log::warn!("Failed to set Ctrl+C handler: {}", e);
        }
    }

    let result = match args.command {
        Some(command) => handlers::run_command(command, &config, output).await,
        None => {
            log::info!("🧰 Launching interactive menu");
            cli::menu::run_cli_menu(config, should_exit).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            handlers::report_error(&e, output);
            ExitCode::FAILURE
        }
    }
}
