//! End-to-end tests against a real PostgreSQL database
//!
//! Configure with APP_DB_USERNAME / APP_DB_PASSWORD / APP_DB_NAME (a `.env`
//! file in the crate directory works) and run:
//!
//!     cargo test -p products-server -- --ignored

use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use products_server::db::{create_pool, ensure_schema, reset_table, PgProductStore};
use products_server::http::{build_router, ServerConfig};
use products_server::models::{Page, ProductInput};
use products_server::{AppState, DbConfig, ProductStore, StoreError};

/// Tests share one table, so they run one at a time.
fn db_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

struct TestDb {
    pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

async fn setup() -> TestDb {
    let guard = db_lock().lock().await;
    let _ = dotenvy::dotenv();

    let config = DbConfig::from_env().expect("APP_DB_* must be set");
    let pool = create_pool(&config).await.expect("pool creation failed");
    ensure_schema(&pool).await.expect("schema bootstrap failed");
    reset_table(&pool).await.expect("table reset failed");

    TestDb {
        pool,
        _guard: guard,
    }
}

fn app(pool: &PgPool) -> Router {
    let state = AppState::new(Arc::new(PgProductStore::new(pool.clone())));
    build_router(state, &ServerConfig::default())
}

async fn add_products(pool: &PgPool, count: usize) {
    for i in 0..count.max(1) {
        sqlx::query("INSERT INTO products (name, price) VALUES ($1, $2)")
            .bind(format!("Product {}", i))
            .bind(Decimal::from((i as i64 + 1) * 10))
            .execute(pool)
            .await
            .expect("insert failed");
    }
}

async fn execute(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_table() {
    let db = setup().await;
    let app = app(&db.pool);

    let (status, body) = execute(&app, get("/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_non_existent_product() {
    let db = setup().await;
    let app = app(&db.pool);

    let (status, body) = execute(&app, get("/product/11")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_product() {
    let db = setup().await;
    let app = app(&db.pool);

    let (status, body) = execute(
        &app,
        with_json("POST", "/product", r#"{"name":"test product", "price": 11.22}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"id": 1, "name": "test product", "price": 11.22}));
}

#[tokio::test]
#[ignore = "requires database"]
async fn get_product() {
    let db = setup().await;
    add_products(&db.pool, 1).await;
    let app = app(&db.pool);

    let (status, _) = execute(&app, get("/product/1")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_product() {
    let db = setup().await;
    add_products(&db.pool, 1).await;
    let app = app(&db.pool);

    let (_, original) = execute(&app, get("/product/1")).await;
    let original: Value = serde_json::from_str(&original).unwrap();

    let (status, body) = execute(
        &app,
        with_json(
            "PUT",
            "/product/1",
            r#"{"name":"test product - updated name", "price": 11.22}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(updated["id"], original["id"]);
    assert_ne!(updated["name"], original["name"]);
    assert_ne!(updated["price"], original["price"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_product() {
    let db = setup().await;
    add_products(&db.pool, 1).await;
    let app = app(&db.pool);

    let (status, _) = execute(&app, get("/product/1")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = execute(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/product/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({"result": "success"})
    );

    let (status, _) = execute(&app, get("/product/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn store_list_returns_inserted_rows_in_id_order() {
    let db = setup().await;
    add_products(&db.pool, 5).await;
    let store = PgProductStore::new(db.pool.clone());

    let items = store.list(Page::new(0, 5)).await.unwrap();
    let ids: Vec<i32> = items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let window = store.list(Page::new(3, 10)).await.unwrap();
    assert_eq!(window.len(), 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn store_round_trips_decimal_price() {
    let db = setup().await;
    let store = PgProductStore::new(db.pool.clone());

    let draft = ProductInput {
        name: "widget".into(),
        price: Decimal::from_str("19.99").unwrap(),
    }
    .validate()
    .unwrap();

    let created = store.create(draft).await.unwrap();
    let fetched = store.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.price, Decimal::from_str("19.99").unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn store_update_and_delete_missing_rows() {
    let db = setup().await;
    let store = PgProductStore::new(db.pool.clone());

    let draft = ProductInput {
        name: "ghost".into(),
        price: Decimal::ONE,
    }
    .validate()
    .unwrap();

    assert!(matches!(
        store.update(42, draft).await.unwrap_err(),
        StoreError::NotFound { id: 42 }
    ));
    assert!(matches!(
        store.delete(42).await.unwrap_err(),
        StoreError::NotFound { id: 42 }
    ));
}
