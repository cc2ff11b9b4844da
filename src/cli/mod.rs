//! CLI module - Command-line interface for placefinder

mod commands;

use clap::{Parser, Subcommand};

/// placefinder - find places similar to the ones you already know
#[derive(Parser)]
#[command(name = "placefinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the search API server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Resolve a single query and print the results as JSON
    #[command(alias = "s")]
    Search {
        /// Free-text query, e.g. "cafes like Cafe de Flore"
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
