//! HTML page handlers.
//!
//! Mutations answer with `303 See Other` back to the index so a browser
//! refresh never resubmits a form.

use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use crate::api::AppState;
use crate::api::views;
use crate::db::{Database, DbError, DbResult, ItemDraft, ItemId, ItemRepository, SaleOutcome};
use crate::inventory::{self, AnalyticsError};

type PageResult<T> = Result<T, (StatusCode, Html<String>)>;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Fields posted by the add and edit forms.
#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub name: String,
    pub quantity: String,
    pub price: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub unit: String,
}

impl ItemForm {
    fn to_draft(&self) -> DbResult<ItemDraft> {
        ItemDraft::parse(
            &self.name,
            &self.quantity,
            &self.price,
            &self.expiry_date,
            &self.unit,
        )
    }
}

/// Local calendar date used as the reference for expiry checks.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn db_failure(e: DbError) -> (StatusCode, Html<String>) {
    let status = match e {
        DbError::Validation { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(error = %e, "Storage failure");
    } else {
        warn!(error = %e, "Rejected request");
    }
    (status, Html(views::error_page(status, &e.to_string())))
}

fn analytics_failure(e: AnalyticsError) -> (StatusCode, Html<String>) {
    error!(error = %e, "Inventory analytics failed");
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (status, Html(views::error_page(status, &e.to_string())))
}

/// Item list with search, total value, low stock and expiring-soon panels.
#[instrument(skip(state))]
pub async fn index<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<SearchQuery>,
) -> PageResult<Html<String>> {
    let search = query.search.unwrap_or_default();
    let items = state
        .db()
        .items()
        .list(Some(search.as_str()))
        .await
        .map_err(db_failure)?;

    let summary = inventory::summarize(&items, today()).map_err(analytics_failure)?;

    Ok(Html(views::index_page(&items, &summary, search.trim())))
}

#[instrument(skip(state))]
pub async fn add_item<D: Database>(
    State(state): State<AppState<D>>,
    Form(form): Form<ItemForm>,
) -> PageResult<Redirect> {
    let draft = form.to_draft().map_err(db_failure)?;
    state.db().items().create(&draft).await.map_err(db_failure)?;
    Ok(Redirect::to("/"))
}

/// Deleting an unknown item is a no-op.
#[instrument(skip(state))]
pub async fn delete_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<ItemId>,
) -> PageResult<Redirect> {
    let deleted = state.db().items().delete(id).await.map_err(db_failure)?;
    if !deleted {
        debug!(id, "Delete of unknown item ignored");
    }
    Ok(Redirect::to("/"))
}

/// Edit form, pre-filled when the item exists and empty otherwise.
#[instrument(skip(state))]
pub async fn edit_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<ItemId>,
) -> PageResult<Html<String>> {
    let item = state.db().items().get(id).await.map_err(db_failure)?;
    Ok(Html(views::edit_page(id, item.as_ref())))
}

/// Updating an unknown item is a no-op.
#[instrument(skip(state))]
pub async fn update_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<ItemId>,
    Form(form): Form<ItemForm>,
) -> PageResult<Redirect> {
    let draft = form.to_draft().map_err(db_failure)?;
    let updated = state
        .db()
        .items()
        .update(id, &draft)
        .await
        .map_err(db_failure)?;
    if !updated {
        debug!(id, "Update of unknown item ignored");
    }
    Ok(Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn sell_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<ItemId>,
) -> PageResult<Redirect> {
    match state.db().items().sell(id).await.map_err(db_failure)? {
        SaleOutcome::Sold { remaining } => debug!(id, remaining, "Sold one unit"),
        SaleOutcome::OutOfStock => debug!(id, "Sale ignored, out of stock"),
        SaleOutcome::NotFound => debug!(id, "Sale of unknown item ignored"),
    }
    Ok(Redirect::to("/"))
}

/// Low stock and expired/expiring-today report.
#[instrument(skip(state))]
pub async fn report<D: Database>(State(state): State<AppState<D>>) -> PageResult<Html<String>> {
    let items = state.db().items().list(None).await.map_err(db_failure)?;
    let report = inventory::report(&items, today()).map_err(analytics_failure)?;
    Ok(Html(views::report_page(&report)))
}
