//! Tests for SQLite database connection and schema initialisation.

use crate::db::{Database, ItemDraft, ItemRepository, SqliteDatabase};

async fn columns(db: &SqliteDatabase) -> Vec<String> {
    sqlx::query_scalar("SELECT name FROM pragma_table_info('items') ORDER BY cid")
        .fetch_all(db.pool())
        .await
        .expect("Query should succeed")
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_items_table() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("Migration should succeed");

    assert_eq!(
        columns(&db).await,
        vec!["id", "name", "quantity", "price", "expiry_date", "unit"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("First migration should succeed");
    db.items()
        .create(&ItemDraft::new("Milk", 3, 2.5, None, Some("L")).unwrap())
        .await
        .expect("Create should succeed");
    db.migrate().await.expect("Second migration should succeed");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
        .fetch_one(db.pool())
        .await
        .expect("Query should succeed");
    assert_eq!(count, 1, "Existing rows must survive a second migration");
    assert_eq!(columns(&db).await.len(), 6);
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_adds_unit_column_to_legacy_table() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    sqlx::query(
        "CREATE TABLE items (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            price REAL NOT NULL,
            expiry_date TEXT
        )",
    )
    .execute(db.pool())
    .await
    .expect("Legacy table should be created");
    sqlx::query("INSERT INTO items (name, quantity, price, expiry_date) VALUES ('Flour', 12, 1.2, NULL)")
        .execute(db.pool())
        .await
        .expect("Legacy insert should succeed");

    db.migrate().await.expect("Migration should succeed");

    assert!(columns(&db).await.iter().any(|c| c == "unit"));

    let items = db.items().list(None).await.expect("List should succeed");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Flour");
    assert_eq!(items[0].unit, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn open_creates_database_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("inventory.db");

    let db = SqliteDatabase::open(&path)
        .await
        .expect("Open should succeed");
    db.migrate().await.expect("Migration should succeed");

    assert!(path.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn data_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("inventory.db");

    let id = {
        let db = SqliteDatabase::open(&path).await.unwrap();
        db.migrate().await.unwrap();
        let id = db
            .items()
            .create(&ItemDraft::new("Rice", 4, 3.0, Some("2027-01-01"), Some("kg")).unwrap())
            .await
            .unwrap();
        db.pool().close().await;
        id
    };

    let db = SqliteDatabase::open(&path).await.unwrap();
    db.migrate().await.unwrap();
    let item = db.items().get(id).await.unwrap().expect("Item should exist");
    assert_eq!(item.name, "Rice");
    assert_eq!(item.unit.as_deref(), Some("kg"));
}
