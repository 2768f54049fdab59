//! mwapi - CLI tool for signed MediaWiki API requests.
//!
//! This is a thin wrapper over the `mwapi` library. It builds exactly one
//! [`mwapi::ApiClient`] per process and hands it to the selected command.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::Context;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Config(cmd) => commands::config::run(cmd, &cli.global),
        command => {
            let file = config::load_for(&cli.global)?;
            let settings = config::Settings::resolve(&cli.global, file)?;
            let ctx = Context::new(settings)?;
            commands::handle(command, &ctx).await
        }
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
