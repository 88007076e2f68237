//! SQLite ItemRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, instrument};

use super::helpers::{contains_pattern, database_error};
use crate::db::{DbResult, Item, ItemDraft, ItemId, ItemRepository, SaleOutcome};

const SELECT_ITEMS: &str = "SELECT id, name, quantity, price, expiry_date, unit FROM items";

/// SQLx-backed item repository.
pub struct SqliteItemRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

/// Legacy rows may hold `''` where newer writes store NULL.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn item_from_row(row: &SqliteRow) -> Item {
    Item {
        id: row.get("id"),
        name: row.get("name"),
        quantity: row.get("quantity"),
        price: row.get("price"),
        expiry_date: present(row.get("expiry_date")),
        unit: present(row.get("unit")),
    }
}

impl<'a> ItemRepository for SqliteItemRepository<'a> {
    #[instrument(skip(self))]
    async fn list(&self, filter: Option<&str>) -> DbResult<Vec<Item>> {
        let rows = match filter.and_then(contains_pattern) {
            Some(pattern) => {
                sqlx::query(&format!(
                    "{} WHERE name LIKE ? ESCAPE '\\' ORDER BY id",
                    SELECT_ITEMS
                ))
                .bind(pattern)
                .fetch_all(self.pool)
                .await
            }
            None => {
                sqlx::query(&format!("{} ORDER BY id", SELECT_ITEMS))
                    .fetch_all(self.pool)
                    .await
            }
        }
        .map_err(database_error)?;

        debug!(count = rows.len(), "Listed items");
        Ok(rows.iter().map(item_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: ItemId) -> DbResult<Option<Item>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_ITEMS))
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.as_ref().map(item_from_row))
    }

    #[instrument(skip(self))]
    async fn create(&self, draft: &ItemDraft) -> DbResult<ItemId> {
        let result = sqlx::query(
            "INSERT INTO items (name, quantity, price, expiry_date, unit) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(draft.quantity)
        .bind(draft.price)
        .bind(&draft.expiry_date)
        .bind(&draft.unit)
        .execute(self.pool)
        .await
        .map_err(database_error)?;

        let id = result.last_insert_rowid();
        debug!(id, "Created item");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: ItemId, draft: &ItemDraft) -> DbResult<bool> {
        let result = sqlx::query(
            "UPDATE items SET name = ?, quantity = ?, price = ?, expiry_date = ?, unit = ? WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(draft.quantity)
        .bind(draft.price)
        .bind(&draft.expiry_date)
        .bind(&draft.unit)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ItemId) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn sell(&self, id: ItemId) -> DbResult<SaleOutcome> {
        // Check and decrement in one statement so concurrent sales cannot
        // both observe the last unit.
        let remaining: Option<i64> = sqlx::query_scalar(
            "UPDATE items SET quantity = quantity - 1 WHERE id = ? AND quantity > 0 RETURNING quantity",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(database_error)?;

        if let Some(remaining) = remaining {
            debug!(id, remaining, "Sold one unit");
            return Ok(SaleOutcome::Sold { remaining });
        }

        let exists: bool = sqlx::query_scalar("SELECT COUNT(*) > 0 FROM items WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await
            .map_err(database_error)?;

        Ok(if exists {
            SaleOutcome::OutOfStock
        } else {
            SaleOutcome::NotFound
        })
    }
}
