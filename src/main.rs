//! VPN Latency Ranker - Main CLI Application

use clap::Parser;
use std::process;
use vpn_latency_ranker::{
    app::App,
    cli::Cli,
    config::{load_config, EnvManager},
    error::{AppError, Result},
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if cli.env_help {
        print!("{}", EnvManager::display_env_help());
        return;
    }

    let use_color = !cli.no_color;

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

async fn run_application(cli: Cli) -> Result<()> {
    let save_mode = cli.save_mode();
    let loaded = load_config(cli)?;
    App::new(loaded, save_mode).run().await
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - The listing URL must start with http:// or https://");
            eprintln!("  - Counts, jobs and max age must be positive integers");
        }
        AppError::Network(_) | AppError::HttpRequest(_) | AppError::Timeout(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - The provider page may be temporarily unavailable");
            eprintln!("  - An existing cache file is only refreshed when stale; a fresh one avoids the fetch");
        }
        AppError::Probe(_) => {
            eprintln!();
            eprintln!("Probe troubleshooting:");
            eprintln!("  - Make sure `ping` is installed and on PATH");
            eprintln!("  - Use --ping-command to point at another compatible utility");
        }
        _ => {
            eprintln!();
            eprintln!("{}", error.user_friendly_message());
        }
    }
}
