//! Tradewind CLI - Seller data inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Summarize the reference data a seller's edit form would see
//! tw-cli refs
//!
//! # Load a product through the full edit-session flow and dump its form
//! tw-cli product show --id 12
//! ```
//!
//! # Commands
//!
//! - `refs` - Fetch every reference list and report per-list counts
//! - `product show` - Run the reference gate + product load and print the
//!   resulting form model as JSON
//!
//! # Environment Variables
//!
//! - `TRADEWIND_API_URL` - Base URL of the platform API
//! - `TRADEWIND_SELLER_ID` - Seller account id
//! - `TRADEWIND_SELLER_TOKEN` - Seller access token

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tw-cli")]
#[command(author, version, about = "Tradewind CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the reference data behind the edit form
    Refs,
    /// Inspect products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Load a product through the edit session and dump its form model
    Show {
        /// Product id
        #[arg(short, long)]
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Refs => commands::refs::summarize().await?,
        Commands::Product { action } => match action {
            ProductAction::Show { id } => commands::product::show(&id).await?,
        },
    }
    Ok(())
}
