pub mod api_client;
mod commands;
pub mod error;
mod utils;

#[cfg(test)]
mod error_test;

use clap::{Parser, Subcommand};

use crate::cli::commands::item::CreateItemRequest;
use crate::cli::error::CliResult;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Inventory tracker CLI", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: STOCKROOM_API_URL env or http://localhost:3737)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List items, optionally filtered by name
    List {
        /// Case-insensitive name substring
        #[arg(short, long)]
        search: Option<String>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Add an item
    Add {
        name: String,
        #[arg(short, long)]
        quantity: i64,
        #[arg(short, long)]
        price: f64,
        /// Expiry date (YYYY-MM-DD)
        #[arg(short, long)]
        expiry: Option<String>,
        /// Unit of measure, e.g. kg or pcs
        #[arg(short, long)]
        unit: Option<String>,
    },
    /// Sell one unit of an item
    Sell { id: i64 },
    /// Delete an item
    Delete { id: i64 },
    /// Show low stock and expired items
    Report {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let api_client = api_client::ApiClient::new(cli.api_url);

    let output = match cli.command {
        Commands::List { search, format } => {
            commands::item::list_items(&api_client, search.as_deref(), &format).await?
        }
        Commands::Add {
            name,
            quantity,
            price,
            expiry,
            unit,
        } => {
            let request = CreateItemRequest {
                name,
                quantity,
                price,
                expiry_date: expiry,
                unit,
            };
            commands::item::add_item(&api_client, request).await?
        }
        Commands::Sell { id } => commands::item::sell_item(&api_client, id).await?,
        Commands::Delete { id } => commands::item::delete_item(&api_client, id).await?,
        Commands::Report { format } => {
            commands::report::show_report(&api_client, &format).await?
        }
    };

    println!("{}", output);
    Ok(())
}
