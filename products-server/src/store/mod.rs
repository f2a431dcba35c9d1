//! Product store trait - the five data-access operations
//!
//! One implementation per backend:
//! - `PgProductStore` (in `db`) issues one SQL statement per operation
//! - `MemoryProductStore` keeps rows in-process for tests

pub mod memory;

use async_trait::async_trait;

use crate::models::{Page, Product, ProductDraft};

pub use memory::MemoryProductStore;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("product {id} not found")]
    NotFound { id: i32 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Data access for the `products` table (testable)
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch one product. `NotFound` when no row has `id`.
    async fn get(&self, id: i32) -> Result<Product, StoreError>;

    /// List products in ascending id order. An empty result is not an error.
    async fn list(&self, page: Page) -> Result<Vec<Product>, StoreError>;

    /// Insert a product; the store assigns the id.
    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError>;

    /// Replace name and price of an existing product. `NotFound` when no row
    /// was affected.
    async fn update(&self, id: i32, draft: ProductDraft) -> Result<Product, StoreError>;

    /// Delete a product. `NotFound` when no row was affected.
    async fn delete(&self, id: i32) -> Result<(), StoreError>;

    /// Cheap round trip to confirm the store answers.
    async fn ping(&self) -> Result<(), StoreError>;
}
