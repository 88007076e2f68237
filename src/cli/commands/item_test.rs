use crate::api::{AppState, routes};
use crate::cli::api_client::ApiClient;
use crate::cli::commands::item::*;
use crate::cli::error::CliError;
use crate::db::{Database, SqliteDatabase};
use tokio::net::TcpListener;

// =============================================================================
// Integration Tests - Test CLI commands against real HTTP server
// =============================================================================

/// Spawn a test HTTP server with in-memory database
async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");

    let app = routes::create_router(AppState::new(db));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    (url, handle)
}

fn milk(quantity: i64) -> CreateItemRequest {
    CreateItemRequest {
        name: "Milk".to_string(),
        quantity,
        price: 2.5,
        expiry_date: None,
        unit: Some("L".to_string()),
    }
}

/// Extract the ID from "✓ Added item: Name (id)"
fn added_id(output: &str) -> i64 {
    output
        .rsplit('(')
        .next()
        .and_then(|s| s.strip_suffix(')'))
        .and_then(|s| s.parse().ok())
        .expect("Failed to extract item ID")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_and_list_items_integration() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = add_item(&api_client, milk(3)).await.unwrap();
    assert!(output.starts_with("✓ Added item: Milk ("));

    let json = list_items(&api_client, None, "json").await.unwrap();
    let items: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(items[0]["name"], "Milk");
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["unit"], "L");

    let table = list_items(&api_client, None, "table").await.unwrap();
    assert!(table.contains("Milk"));
    assert!(table.contains("Total value: 7.50"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_items_search_integration() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    add_item(&api_client, milk(3)).await.unwrap();
    add_item(
        &api_client,
        CreateItemRequest {
            name: "Flour".to_string(),
            quantity: 10,
            price: 1.0,
            expiry_date: None,
            unit: None,
        },
    )
    .await
    .unwrap();

    let table = list_items(&api_client, Some("flo"), "table").await.unwrap();
    assert!(table.contains("Flour"));
    assert!(!table.contains("Milk"));

    let none = list_items(&api_client, Some("zzz"), "table").await.unwrap();
    assert_eq!(none, "No items found.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_invalid_item_is_rejected() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let mut request = milk(3);
    request.expiry_date = Some("31/12/2026".to_string());

    match add_item(&api_client, request).await {
        Err(CliError::ItemRejected { reason }) => {
            assert_eq!(reason, "expiry date '31/12/2026' is not a YYYY-MM-DD date");
        }
        other => panic!("expected ItemRejected, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sell_item_integration() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let id = added_id(&add_item(&api_client, milk(1)).await.unwrap());

    let output = sell_item(&api_client, id).await.unwrap();
    assert_eq!(output, "✓ Sold one Milk: 0 left");

    match sell_item(&api_client, id).await {
        Err(CliError::OutOfStock { id: rejected }) => assert_eq!(rejected, id),
        other => panic!("expected OutOfStock, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sell_unknown_item_integration() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    match sell_item(&api_client, 404).await {
        Err(CliError::ItemNotFound { id }) => assert_eq!(id, 404),
        other => panic!("expected ItemNotFound, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_item_integration() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let id = added_id(&add_item(&api_client, milk(3)).await.unwrap());

    let output = delete_item(&api_client, id).await.unwrap();
    assert_eq!(output, format!("✓ Deleted item: {}", id));

    match delete_item(&api_client, id).await {
        Err(CliError::ItemNotFound { id: missing }) => assert_eq!(missing, id),
        other => panic!("expected ItemNotFound, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_server_is_connection_failure() {
    // Nothing listens on the discard port
    let api_client = ApiClient::new(Some("http://127.0.0.1:9".to_string()));

    let result = list_items(&api_client, None, "table").await;
    match result {
        Err(CliError::Unreachable { url, .. }) => assert!(url.starts_with("http://127.0.0.1:9/")),
        other => panic!("expected Unreachable, got {:?}", other),
    }
}

// =============================================================================
// Unit Tests - formatting
// =============================================================================

#[test]
fn test_format_table_empty() {
    assert_eq!(format_table(&[]), "No items found.");
}

#[test]
fn test_format_table_shows_placeholders() {
    let items = vec![Item {
        id: 7,
        name: "Salt".to_string(),
        quantity: 2,
        price: 0.75,
        expiry_date: None,
        unit: None,
    }];
    let table = format_table(&items);
    assert!(table.contains("Salt"));
    assert!(table.contains("0.75"));
    assert!(table.contains(" - "));
}
