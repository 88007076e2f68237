//! Item management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use super::{ApiResult, ErrorResponse, analytics_error, db_error, error_response};
use crate::api::AppState;
use crate::api::handlers::today;
use crate::db::{Database, DbResult, Item, ItemDraft, ItemId, ItemRepository, SaleOutcome};
use crate::inventory;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    #[schema(example = 1)]
    pub id: ItemId,
    #[schema(example = "Milk")]
    pub name: String,
    #[schema(example = 3)]
    pub quantity: i64,
    #[schema(example = 2.5)]
    pub price: f64,
    /// ISO date (YYYY-MM-DD)
    #[schema(example = "2026-10-17")]
    pub expiry_date: Option<String>,
    #[schema(example = "L")]
    pub unit: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            name: i.name,
            quantity: i.quantity,
            price: i.price,
            expiry_date: i.expiry_date,
            unit: i.unit,
        }
    }
}

fn responses(items: Vec<Item>) -> Vec<ItemResponse> {
    items.into_iter().map(ItemResponse::from).collect()
}

/// Body for create and full update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemRequest {
    #[schema(example = "Milk")]
    pub name: String,
    #[schema(example = 3)]
    pub quantity: i64,
    #[schema(example = 2.5)]
    pub price: f64,
    /// ISO date (YYYY-MM-DD); omit for items that do not expire
    #[schema(example = "2026-10-17")]
    pub expiry_date: Option<String>,
    #[schema(example = "L")]
    pub unit: Option<String>,
}

impl ItemRequest {
    fn to_draft(&self) -> DbResult<ItemDraft> {
        ItemDraft::new(
            &self.name,
            self.quantity,
            self.price,
            self.expiry_date.as_deref(),
            self.unit.as_deref(),
        )
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListItemsQuery {
    /// Case-insensitive substring of the item name
    #[param(example = "mil")]
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
    /// Sum of quantity × price over the listed items
    #[schema(example = 7.5)]
    pub total_value: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    /// Value of the whole inventory
    pub total_value: f64,
    /// Items with quantity below 5
    pub low_stock: Vec<ItemResponse>,
    /// Items expired or expiring today
    pub expired: Vec<ItemResponse>,
    /// Items expiring within 7 days
    pub expiring_soon: Vec<ItemResponse>,
}

fn item_not_found(id: ItemId) -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::NOT_FOUND, format!("Item '{}' not found", id))
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "items",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Matching items", body = ItemListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_items<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListItemsQuery>,
) -> ApiResult<Json<ItemListResponse>> {
    let items = state
        .db()
        .items()
        .list(query.search.as_deref())
        .await
        .map_err(db_error)?;

    Ok(Json(ItemListResponse {
        total_value: inventory::total_value(&items),
        items: responses(items),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<ItemId>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state
        .db()
        .items()
        .get(id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| item_not_found(id))?;

    Ok(Json(ItemResponse::from(item)))
}

#[utoipa::path(
    post,
    path = "/api/v1/items",
    tag = "items",
    request_body = ItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid item", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_item<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<ItemRequest>,
) -> ApiResult<(StatusCode, Json<ItemResponse>)> {
    let draft = req.to_draft().map_err(db_error)?;
    let id = state.db().items().create(&draft).await.map_err(db_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse::from(draft.into_item(id))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item ID")),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Invalid item", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<ItemId>,
    Json(req): Json<ItemRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let draft = req.to_draft().map_err(db_error)?;
    let updated = state
        .db()
        .items()
        .update(id, &draft)
        .await
        .map_err(db_error)?;
    if !updated {
        return Err(item_not_found(id));
    }

    Ok(Json(ItemResponse::from(draft.into_item(id))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/items/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<ItemId>,
) -> ApiResult<StatusCode> {
    let deleted = state.db().items().delete(id).await.map_err(db_error)?;
    if !deleted {
        return Err(item_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/items/{id}/sell",
    tag = "items",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "One unit sold; the item after the sale", body = ItemResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 409, description = "Item is out of stock", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn sell_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<ItemId>,
) -> ApiResult<Json<ItemResponse>> {
    let items = state.db().items();
    match items.sell(id).await.map_err(db_error)? {
        SaleOutcome::Sold { .. } => {}
        SaleOutcome::OutOfStock => {
            return Err(error_response(
                StatusCode::CONFLICT,
                format!("Item '{}' is out of stock", id),
            ));
        }
        SaleOutcome::NotFound => return Err(item_not_found(id)),
    }

    let item = items
        .get(id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| item_not_found(id))?;
    Ok(Json(ItemResponse::from(item)))
}

#[utoipa::path(
    get,
    path = "/api/v1/report",
    tag = "reports",
    responses(
        (status = 200, description = "Stock report", body = ReportResponse),
        (status = 500, description = "Internal server error or malformed stored date", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_report<D: Database>(
    State(state): State<AppState<D>>,
) -> ApiResult<Json<ReportResponse>> {
    let items = state.db().items().list(None).await.map_err(db_error)?;

    let today = today();
    let summary = inventory::summarize(&items, today).map_err(analytics_error)?;
    let report = inventory::report(&items, today).map_err(analytics_error)?;

    Ok(Json(ReportResponse {
        total_value: summary.total_value,
        low_stock: responses(report.low_stock),
        expired: responses(report.expired),
        expiring_soon: responses(summary.expiring_soon),
    }))
}
