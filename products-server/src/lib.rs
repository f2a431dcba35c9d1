//! products-server: HTTP CRUD over a single `products` table
//!
//! Layers, leaves first:
//! - `models`: the product record, request input, list window
//! - `store`: the `ProductStore` seam and its in-memory implementation
//! - `db`: PostgreSQL pool, schema bootstrap, and the `PgProductStore`
//! - `http`: axum router, extractors, JSON error mapping, server lifecycle

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod state;
pub mod store;

pub use config::{ConfigError, DbConfig};
pub use state::AppState;
pub use store::{MemoryProductStore, ProductStore, StoreError};
