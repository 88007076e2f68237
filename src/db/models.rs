//! Domain models for the inventory database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DbError, DbResult};

/// Storage and wire format for expiry dates.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage-assigned row identifier.
pub type ItemId = i64;

/// A single inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    /// ISO `YYYY-MM-DD`, kept as stored so analytics can reject malformed rows.
    pub expiry_date: Option<String>,
    pub unit: Option<String>,
}

/// The mutable fields of an item, validated and ready to be written.
///
/// Both insert and full-overwrite update go through this type, so a row
/// written by the application always has a non-empty name, a non-negative
/// quantity, a finite non-negative price and a parseable expiry date.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub expiry_date: Option<String>,
    pub unit: Option<String>,
}

impl ItemDraft {
    /// Validate already-typed fields.
    ///
    /// Blank `expiry_date` and `unit` values are normalised to `None`.
    pub fn new(
        name: &str,
        quantity: i64,
        price: f64,
        expiry_date: Option<&str>,
        unit: Option<&str>,
    ) -> DbResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::validation("name cannot be empty"));
        }
        if quantity < 0 {
            return Err(DbError::validation(format!(
                "quantity cannot be negative (got {})",
                quantity
            )));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(DbError::validation(format!(
                "price must be a non-negative number (got {})",
                price
            )));
        }

        let expiry_date = non_blank(expiry_date);
        if let Some(date) = &expiry_date {
            NaiveDate::parse_from_str(date, EXPIRY_DATE_FORMAT).map_err(|_| {
                DbError::validation(format!("expiry date '{}' is not a YYYY-MM-DD date", date))
            })?;
        }

        Ok(Self {
            name: name.to_string(),
            quantity,
            price,
            expiry_date,
            unit: non_blank(unit),
        })
    }

    /// Parse caller-supplied form text.
    ///
    /// `quantity` must be a whole number and `price` a decimal number;
    /// anything else is a validation error.
    pub fn parse(
        name: &str,
        quantity: &str,
        price: &str,
        expiry_date: &str,
        unit: &str,
    ) -> DbResult<Self> {
        let quantity = quantity.trim().parse::<i64>().map_err(|_| {
            DbError::validation(format!("quantity '{}' is not a whole number", quantity))
        })?;
        let price = price
            .trim()
            .parse::<f64>()
            .map_err(|_| DbError::validation(format!("price '{}' is not a number", price)))?;

        Self::new(name, quantity, price, Some(expiry_date), Some(unit))
    }

    /// Attach a storage-assigned identifier.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            quantity: self.quantity,
            price: self.price,
            expiry_date: self.expiry_date,
            unit: self.unit,
        }
    }
}

/// Result of selling a single unit of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaleOutcome {
    /// One unit was removed; `remaining` is the quantity after the sale.
    Sold { remaining: i64 },
    /// The item exists but has nothing left to sell.
    OutOfStock,
    /// No item with that identifier.
    NotFound,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
