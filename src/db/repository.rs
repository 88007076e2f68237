//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing the storage
//! backend to be swapped without changing the HTTP layer.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Item, ItemDraft, ItemId, SaleOutcome},
};

/// Repository for Item operations.
pub trait ItemRepository {
    /// List items, optionally restricted to names containing `filter`.
    ///
    /// A filter that is empty after trimming lists everything.
    fn list(&self, filter: Option<&str>) -> impl Future<Output = DbResult<Vec<Item>>> + Send;

    /// Get an item by ID.
    fn get(&self, id: ItemId) -> impl Future<Output = DbResult<Option<Item>>> + Send;

    /// Insert a new item and return its storage-assigned ID.
    fn create(&self, draft: &ItemDraft) -> impl Future<Output = DbResult<ItemId>> + Send;

    /// Overwrite every mutable field of an item.
    ///
    /// Returns `false` when no item has that ID.
    fn update(&self, id: ItemId, draft: &ItemDraft)
    -> impl Future<Output = DbResult<bool>> + Send;

    /// Delete an item by ID. Returns `false` when nothing was deleted.
    fn delete(&self, id: ItemId) -> impl Future<Output = DbResult<bool>> + Send;

    /// Sell one unit, never taking the quantity below zero.
    fn sell(&self, id: ItemId) -> impl Future<Output = DbResult<SaleOutcome>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Items<'a>: ItemRepository + Send + Sync
    where
        Self: 'a;

    /// Ensure the schema exists and is current.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the item repository.
    fn items(&self) -> Self::Items<'_>;
}
