//! Stock valuation, low-stock and expiry computations.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::{AnalyticsError, AnalyticsResult};
use crate::db::{EXPIRY_DATE_FORMAT, Item};

/// Items with fewer units than this are low on stock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Horizon for the "expiring soon" list on the index view.
pub const EXPIRING_SOON_DAYS: u32 = 7;

/// Horizon for the report view: already expired or expiring today.
pub const EXPIRED_HORIZON_DAYS: u32 = 0;

/// Sum of quantity × price, accumulated in input order.
pub fn total_value(items: &[Item]) -> f64 {
    items
        .iter()
        .fold(0.0, |acc, item| acc + item.quantity as f64 * item.price)
}

/// Items with `quantity < threshold`, in input order.
pub fn low_stock(items: &[Item], threshold: i64) -> Vec<&Item> {
    items.iter().filter(|item| item.quantity < threshold).collect()
}

/// Parse an item's expiry date.
///
/// Absent and blank values are `None`; anything else must be `YYYY-MM-DD`.
pub fn expiry_of(item: &Item) -> AnalyticsResult<Option<NaiveDate>> {
    let Some(raw) = item.expiry_date.as_deref().map(str::trim) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(raw, EXPIRY_DATE_FORMAT)
        .map(Some)
        .map_err(|_| AnalyticsError::DateFormat {
            item_id: item.id,
            value: raw.to_string(),
        })
}

/// Items whose expiry date is on or before `reference + horizon_days`.
///
/// Items without an expiry date are never included. A malformed date
/// fails the whole computation.
pub fn expiring_within(
    items: &[Item],
    reference: NaiveDate,
    horizon_days: u32,
) -> AnalyticsResult<Vec<&Item>> {
    let cutoff = reference
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut expiring = Vec::new();
    for item in items {
        if let Some(expiry) = expiry_of(item)?
            && expiry <= cutoff
        {
            expiring.push(item);
        }
    }
    Ok(expiring)
}

/// Aggregates shown alongside the item list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub total_value: f64,
    pub low_stock: Vec<Item>,
    pub expiring_soon: Vec<Item>,
}

/// Build the index-view aggregates for `items` as of `today`.
pub fn summarize(items: &[Item], today: NaiveDate) -> AnalyticsResult<InventorySummary> {
    Ok(InventorySummary {
        total_value: total_value(items),
        low_stock: low_stock(items, LOW_STOCK_THRESHOLD)
            .into_iter()
            .cloned()
            .collect(),
        expiring_soon: expiring_within(items, today, EXPIRING_SOON_DAYS)?
            .into_iter()
            .cloned()
            .collect(),
    })
}

/// Stock report: what needs reordering and what is past its date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryReport {
    pub low_stock: Vec<Item>,
    pub expired: Vec<Item>,
}

/// Build the report for `items` as of `today`.
pub fn report(items: &[Item], today: NaiveDate) -> AnalyticsResult<InventoryReport> {
    Ok(InventoryReport {
        low_stock: low_stock(items, LOW_STOCK_THRESHOLD)
            .into_iter()
            .cloned()
            .collect(),
        expired: expiring_within(items, today, EXPIRED_HORIZON_DAYS)?
            .into_iter()
            .cloned()
            .collect(),
    })
}
