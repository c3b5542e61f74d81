//! Command-line interface for the dealership backend.

mod commands;

use clap::{Parser, Subcommand};

/// Dealership backend
/// Car catalog, dealer directory and sentiment-tagged reviews
#[derive(Parser)]
#[command(name = "dealership")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web API server
    #[command(alias = "daemon", alias = "-d")]
    Serve,

    /// List dealers from the dealer cloud function
    #[command(alias = "ls")]
    Dealers {
        /// Only show dealers in this state
        #[arg(long)]
        state: Option<String>,
    },

    /// Show a single dealer
    Dealer {
        /// Dealer ID
        id: i64,
    },

    /// Show reviews for a dealer with their sentiment
    #[command(alias = "r")]
    Reviews {
        /// Dealer ID
        dealer_id: i64,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
