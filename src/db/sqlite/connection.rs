//! SQLite connection pool and schema management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::{debug, info};

use super::item::SqliteItemRepository;
use crate::db::{Database, DbError, DbResult};

const CREATE_ITEMS_TABLE: &str = "CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    price REAL NOT NULL,
    expiry_date TEXT,
    unit TEXT
)";

/// Columns added after the first schema, with their definitions.
const ADDITIVE_COLUMNS: &[(&str, &str)] = &[("unit", "TEXT")];

/// SQLite database implementation.
///
/// Every repository call acquires a connection from the pool for the
/// duration of one statement.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if missing) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// every SQLite in-memory connection is its own database.
    pub async fn in_memory() -> DbResult<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Direct access to the pool for tests and ad-hoc queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn existing_columns(&self) -> DbResult<Vec<String>> {
        sqlx::query_scalar("SELECT name FROM pragma_table_info('items')")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }
}

impl Database for SqliteDatabase {
    type Items<'a> = SqliteItemRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::query(CREATE_ITEMS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;

        let columns = self.existing_columns().await?;
        for &(column, definition) in ADDITIVE_COLUMNS {
            if columns.iter().any(|c| c == column) {
                debug!(column, "items column already present");
                continue;
            }

            sqlx::query(&format!(
                "ALTER TABLE items ADD COLUMN {} {}",
                column, definition
            ))
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;
            info!(column, "Added missing column to items table");
        }

        Ok(())
    }

    fn items(&self) -> Self::Items<'_> {
        SqliteItemRepository { pool: &self.pool }
    }
}
