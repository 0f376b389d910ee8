//! CLI argument definitions using clap
//!
//! Commands:
//! - rollbook serve [--config <path>] [--host <h>] [--port <p>] [--store <addr>]
//! - rollbook list [--config <path>] [--store <addr>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rollbook - student registration service
#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to the record store and serve the student API
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides config and environment)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Record store address (overrides config and STORE_URI)
        #[arg(long)]
        store: Option<String>,
    },

    /// Print every stored student as JSON, newest first
    List {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Record store address (overrides config and STORE_URI)
        #[arg(long)]
        store: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
