//! Product repository
//!
//! One statement per operation:
//! - get/update/delete: NotFound when no row matched or was affected
//! - list: ORDER BY id with LIMIT/OFFSET
//! - create: INSERT ... RETURNING for the assigned id

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Page, Product, ProductDraft};
use crate::store::{ProductStore, StoreError};

/// Product repository over a PostgreSQL pool
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn get(&self, id: i32) -> Result<Product, StoreError> {
        tracing::debug!(id, "fetching product");

        sqlx::query_as::<_, Product>("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    async fn list(&self, page: Page) -> Result<Vec<Product>, StoreError> {
        tracing::debug!(start = page.start, count = page.count, "listing products");

        let items = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price
            FROM products
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        tracing::debug!(name = draft.name.as_str(), "creating product");

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2)
            RETURNING id, name, price
            "#,
        )
        .bind(draft.name.as_str())
        .bind(draft.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update(&self, id: i32, draft: ProductDraft) -> Result<Product, StoreError> {
        tracing::debug!(id, name = draft.name.as_str(), "updating product");

        // RETURNING yields no row when nothing was affected.
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1, price = $2
            WHERE id = $3
            RETURNING id, name, price
            "#,
        )
        .bind(draft.name.as_str())
        .bind(draft.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!(id, "deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
