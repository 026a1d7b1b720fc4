//! Shopfront CLI - Stock API inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Print the projected stock listing
//! shopfront stock list --api-url http://localhost:8080
//!
//! # Run the availability check for one product
//! STOCK_API_URL=http://localhost:8080 shopfront stock check 42
//! ```
//!
//! # Commands
//!
//! - `stock list` - Fetch `/api/getAllStock` and print `{name, quantity}` pairs
//! - `stock check` - Fetch `/api/getStock` and print the availability verdict

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use url::Url;

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the remote stock API
    Stock {
        /// Base URL of the stock API
        #[arg(long, env = "STOCK_API_URL", global = true)]
        api_url: Option<Url>,

        #[command(subcommand)]
        action: StockAction,
    },
}

#[derive(Subcommand)]
enum StockAction {
    /// Print the full stock listing as the storefront mirrors it
    List,
    /// Check whether a product can be added to a cart
    Check {
        /// Product ID
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Stock { api_url, action } => {
            let api_url = api_url.ok_or(commands::stock::StockCommandError::MissingApiUrl)?;
            match action {
                StockAction::List => commands::stock::list(&api_url).await?,
                StockAction::Check { id } => commands::stock::check(&api_url, id).await?,
            }
        }
    }
    Ok(())
}
