//! Analytics error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::ItemId;

#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum AnalyticsError {
    #[error("Item {item_id} has malformed expiry date '{value}'")]
    #[diagnostic(
        code(stockroom::inventory::date_format),
        help("expiry dates must be stored as YYYY-MM-DD")
    )]
    DateFormat { item_id: ItemId, value: String },
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
