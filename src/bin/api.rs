//! Stockroom API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use stockroom::api::{self, ApiError, Config, DEFAULT_PORT};
use stockroom::db::{Database, DbError, SqliteDatabase};
use stockroom::paths::get_db_path;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(stockroom::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(stockroom::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(stockroom::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "stockroom-api")]
#[command(author, version, about = "Stockroom inventory server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Database file path (defaults to XDG data directory: ~/.local/share/stockroom/inventory.db)
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    serve(Cli::parse()).await?;
    Ok(())
}

async fn serve(cli: Cli) -> Result<(), BinaryError> {
    let db_path = cli.db.unwrap_or_else(get_db_path);

    println!("Opening database at {:?}", db_path);

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&db_path).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    println!("Database migrations complete");

    println!();
    println!("Stockroom server starting...");
    println!("   Web UI: http://{}:{}/", cli.host, cli.port);
    println!("   API:    http://{}:{}/api/v1", cli.host, cli.port);
    println!("   Docs:   http://{}:{}/docs", cli.host, cli.port);
    println!();

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        db,
    )
    .await?;

    Ok(())
}
