//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HealthResponse};
use super::state::AppState;
use super::v1::{
    self, ErrorResponse, ItemListResponse, ItemRequest, ItemResponse, ReportResponse,
};
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = "Inventory tracking API",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        v1::list_items,
        v1::get_item,
        v1::create_item,
        v1::update_item,
        v1::delete_item,
        v1::sell_item,
        v1::get_report,
    ),
    components(
        schemas(
            HealthResponse,
            ItemResponse,
            ItemRequest,
            ItemListResponse,
            ReportResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "items", description = "Inventory item endpoints"),
        (name = "reports", description = "Stock report endpoints")
    )
)]
pub struct ApiDoc;

/// Create the router: HTML pages, JSON API and OpenAPI documentation.
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new().route("/health", get(handlers::health));

    // Server-rendered pages; state changes are POST-only
    let page_routes = routes!(D => {
        get "/" => handlers::index,
        post "/add" => handlers::add_item,
        post "/delete/{id}" => handlers::delete_item,
        get "/edit/{id}" => handlers::edit_item,
        post "/update/{id}" => handlers::update_item,
        post "/sell/{id}" => handlers::sell_item,
        get "/report" => handlers::report,
    });

    let item_routes = routes!(D => {
        get "/api/v1/items" => v1::list_items,
        post "/api/v1/items" => v1::create_item,
        get "/api/v1/items/{id}" => v1::get_item,
        put "/api/v1/items/{id}" => v1::update_item,
        delete "/api/v1/items/{id}" => v1::delete_item,
        post "/api/v1/items/{id}/sell" => v1::sell_item,
        get "/api/v1/report" => v1::get_report,
    });

    system_routes
        .merge(page_routes)
        .merge(item_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
