mod cli;
mod commands;
mod retry;
mod shutdown;

use anyhow::Result;
use bmsledger_core::Config;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("bmsledger={}", level).parse()?)
                .add_directive(format!("bmsledger_core={}", level).parse()?),
        )
        .init();

    let config = match Config::load(&args.config) {
        Ok(c) => {
            info!("Loaded config from {:?}", args.config);
            c
        }
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    };

    match args.command.unwrap_or(Command::Track { resume: false }) {
        Command::Track { resume } => commands::track::run(&config, resume),
        Command::Report { hours } => commands::report::run(&config, hours),
        Command::Lookup { hash } => commands::lookup::run(&config, &hash),
        Command::Tables => commands::tables::run(&config),
        Command::Export { format, output } => {
            commands::export::run(&config, format, output.as_deref())
        }
    }
}
