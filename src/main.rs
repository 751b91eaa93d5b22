mod adapters;
mod cli;
mod config;
mod core;

use std::path::Path;

use clap::Parser;

use cli::{Cli, Commands};
use config::app_config::AppConfig;

fn main() {
    let args = Cli::parse();

    if let Err(e) = run(&args) {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Resolve configuration and dispatch; every failure comes back as a
/// typed error and only this boundary decides to terminate.
fn run(args: &Cli) -> core::errors::Result<()> {
    let config = AppConfig::load(
        args.config.as_deref().map(Path::new),
        args.trust_dir.as_deref().map(Path::new),
        args.server.as_deref(),
    )?;

    match &args.command {
        Commands::Delegation { action } => cli::commands::delegation::execute(action, &config),
    }
}
