//! CLI command definitions for the `voxkit` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Build, export, and serve voice skill artifacts.
#[derive(Parser)]
#[command(name = "voxkit", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP endpoint answering skill requests.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000", env = "VOXKIT_PORT")]
        port: u16,

        /// Host/IP to bind to.
        #[arg(long, default_value = "127.0.0.1", env = "VOXKIT_HOST")]
        host: String,
    },

    /// Write the deployment artifacts: skill manifest and per-locale
    /// interaction models.
    Export {
        /// Directory for skill.json and models/; prints to stdout if omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON artifacts.
        #[arg(long)]
        pretty: bool,
    },
}
