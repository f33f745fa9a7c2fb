use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "discsort")]
#[command(about = "Sort a Discogs collection into price-bracket folders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sort the collection into price-bracket folders
    Sort {
        /// Marketplace currency code (EUR, USD, GBP, ...)
        #[arg(short, long, default_value = "USD")]
        currency: String,

        /// Comma-separated bracket boundaries, ascending
        #[arg(short, long, default_value = "10,25,50,100,250")]
        brackets: String,

        /// Discogs username (falls back to DISCOGS_USERNAME)
        #[arg(short, long)]
        username: Option<String>,

        /// Discogs personal access token (falls back to DISCOGS_TOKEN)
        #[arg(short, long)]
        token: Option<String>,

        /// What to do when a price lookup fails at the transport level
        #[arg(long, default_value = "abort", value_name = "abort|skip")]
        on_price_error: String,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the estimated value of the collection
    Value {
        /// Discogs username (falls back to DISCOGS_USERNAME)
        #[arg(short, long)]
        username: Option<String>,

        /// Discogs personal access token (falls back to DISCOGS_TOKEN)
        #[arg(short, long)]
        token: Option<String>,
    },
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sort {
            currency,
            brackets,
            username,
            token,
            on_price_error,
            dry_run,
        } => {
            commands::sort::run(currency, brackets, username, token, on_price_error, dry_run);
        }
        Commands::Value { username, token } => {
            commands::value::run(username, token);
        }
    }
}
