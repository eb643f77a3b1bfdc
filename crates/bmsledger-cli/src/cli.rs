//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bmsledger")]
#[command(about = "beatoraja session tracker", version)]
pub struct Args {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = "config.toml", env = "BMSLEDGER_CONFIG")]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Watch the score databases and track plays (default)
    Track {
        /// Continue the session saved in the history file
        #[arg(long)]
        resume: bool,
    },
    /// Load recent plays once and write the overlay report
    Report {
        /// Hours of plays to include (defaults to autoload_offset)
        #[arg(long)]
        hours: Option<u32>,
    },
    /// Show the difficulty folders of a chart hash
    Lookup {
        /// sha256 or md5 of the chart
        hash: String,
    },
    /// List the difficulty tables found in the install
    Tables,
    /// Export the saved session history
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Tsv)]
        format: ExportFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Tsv,
    Json,
}
