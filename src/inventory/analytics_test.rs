//! Tests for inventory analytics.

use chrono::NaiveDate;

use super::*;
use crate::db::Item;

fn item(id: i64, name: &str, quantity: i64, price: f64, expiry: Option<&str>) -> Item {
    Item {
        id,
        name: name.to_string(),
        quantity,
        price,
        expiry_date: expiry.map(str::to_string),
        unit: None,
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn ids(items: &[&Item]) -> Vec<i64> {
    items.iter().map(|i| i.id).collect()
}

// =============================================================================
// total_value
// =============================================================================

#[test]
fn total_value_of_empty_is_zero() {
    assert_eq!(total_value(&[]), 0.0);
}

#[test]
fn total_value_sums_quantity_times_price() {
    let items = vec![
        item(1, "Milk", 3, 2.5, None),
        item(2, "Flour", 10, 1.25, None),
        item(3, "Salt", 0, 9.0, None),
    ];
    assert_eq!(total_value(&items), 3.0 * 2.5 + 10.0 * 1.25);
}

#[test]
fn total_value_accumulates_in_input_order() {
    let items = vec![
        item(1, "A", 1, 0.1, None),
        item(2, "B", 1, 0.2, None),
        item(3, "C", 1, 0.3, None),
    ];
    let expected = ((0.0 + 0.1) + 0.2) + 0.3;
    assert_eq!(total_value(&items), expected);
}

// =============================================================================
// low_stock
// =============================================================================

#[test]
fn low_stock_is_strictly_below_threshold() {
    let items = vec![
        item(1, "Four", 4, 1.0, None),
        item(2, "Five", 5, 1.0, None),
        item(3, "Zero", 0, 1.0, None),
        item(4, "Six", 6, 1.0, None),
    ];
    assert_eq!(ids(&low_stock(&items, LOW_STOCK_THRESHOLD)), vec![1, 3]);
}

#[test]
fn low_stock_respects_any_threshold_and_keeps_order() {
    let items = vec![
        item(1, "A", 9, 1.0, None),
        item(2, "B", 1, 1.0, None),
        item(3, "C", 7, 1.0, None),
        item(4, "D", 2, 1.0, None),
    ];
    for threshold in [-1, 0, 1, 2, 3, 8, 10] {
        let expected: Vec<i64> = items
            .iter()
            .filter(|i| i.quantity < threshold)
            .map(|i| i.id)
            .collect();
        assert_eq!(ids(&low_stock(&items, threshold)), expected);
    }
}

#[test]
fn low_stock_threshold_is_five() {
    assert_eq!(LOW_STOCK_THRESHOLD, 5);
}

// =============================================================================
// expiring_within
// =============================================================================

#[test]
fn expiring_within_includes_dates_up_to_horizon() {
    let today = date("2026-10-16");
    let items = vec![
        item(1, "Yesterday", 1, 1.0, Some("2026-10-15")),
        item(2, "Today", 1, 1.0, Some("2026-10-16")),
        item(3, "Week", 1, 1.0, Some("2026-10-23")),
        item(4, "Eight days", 1, 1.0, Some("2026-10-24")),
        item(5, "None", 1, 1.0, None),
    ];

    let soon = expiring_within(&items, today, EXPIRING_SOON_DAYS).unwrap();
    assert_eq!(ids(&soon), vec![1, 2, 3]);

    let expired = expiring_within(&items, today, EXPIRED_HORIZON_DAYS).unwrap();
    assert_eq!(ids(&expired), vec![1, 2]);
}

#[test]
fn expiring_within_excludes_absent_and_blank_dates() {
    let items = vec![
        item(1, "Absent", 1, 1.0, None),
        item(2, "Blank", 1, 1.0, Some("")),
        item(3, "Spaces", 1, 1.0, Some("  ")),
    ];
    let found = expiring_within(&items, date("2030-01-01"), 365).unwrap();
    assert!(found.is_empty());
}

#[test]
fn expiring_within_fails_on_malformed_date() {
    let items = vec![
        item(1, "Fine", 1, 1.0, Some("2026-10-15")),
        item(2, "Broken", 1, 1.0, Some("15/10/2026")),
    ];
    let err = expiring_within(&items, date("2026-10-16"), 7).unwrap_err();
    assert_eq!(
        err,
        AnalyticsError::DateFormat {
            item_id: 2,
            value: "15/10/2026".to_string(),
        }
    );
}

#[test]
fn expiring_within_saturates_huge_horizons() {
    let items = vec![item(1, "Far", 1, 1.0, Some("9999-12-31"))];
    let found = expiring_within(&items, date("2026-10-16"), u32::MAX).unwrap();
    assert_eq!(ids(&found), vec![1]);
}

#[test]
fn expiry_of_parses_valid_dates() {
    let milk = item(1, "Milk", 1, 1.0, Some("2026-10-17"));
    assert_eq!(expiry_of(&milk).unwrap(), Some(date("2026-10-17")));
}

// =============================================================================
// Scenario: Milk
// =============================================================================

#[test]
fn milk_expiring_tomorrow_is_low_stock_and_expiring_soon() {
    let today = date("2026-10-16");
    let items = vec![
        Item {
            id: 1,
            name: "Milk".to_string(),
            quantity: 3,
            price: 2.5,
            expiry_date: Some("2026-10-17".to_string()),
            unit: Some("L".to_string()),
        },
        item(2, "Flour", 10, 1.0, None),
    ];

    let summary = summarize(&items, today).unwrap();
    assert_eq!(summary.total_value, 3.0 * 2.5 + 10.0);
    assert_eq!(summary.low_stock.len(), 1);
    assert_eq!(summary.low_stock[0].name, "Milk");
    assert_eq!(summary.expiring_soon.len(), 1);
    assert_eq!(summary.expiring_soon[0].name, "Milk");

    let report = report(&items, today).unwrap();
    assert_eq!(report.low_stock.len(), 1);
    assert!(report.expired.is_empty(), "tomorrow is not expired yet");
}

#[test]
fn summarize_propagates_date_errors() {
    let items = vec![item(9, "Bad", 1, 1.0, Some("soon"))];
    assert!(matches!(
        summarize(&items, date("2026-10-16")),
        Err(AnalyticsError::DateFormat { item_id: 9, .. })
    ));
    assert!(report(&items, date("2026-10-16")).is_err());
}
