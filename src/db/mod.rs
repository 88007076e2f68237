//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access so the
//! HTTP layer never talks to SQLite directly.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Item, ItemDraft, SaleOutcome)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation and schema initialisation

mod error;
mod models;
mod repository;
pub mod sqlite;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
