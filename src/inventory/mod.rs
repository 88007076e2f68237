//! Inventory analytics.
//!
//! Pure functions over an in-memory slice of items: no I/O, no state.

mod analytics;
mod error;

#[cfg(test)]
mod analytics_test;

pub use analytics::*;
pub use error::{AnalyticsError, AnalyticsResult};
