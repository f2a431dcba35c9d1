//! In-process product store
//!
//! Mirrors the PostgreSQL semantics that callers can observe: ids come from
//! a sequence starting at 1 and are never reused, lists are ordered by id.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ProductStore, StoreError};
use crate::models::{Page, Product, ProductDraft};

#[derive(Debug)]
struct Inner {
    rows: BTreeMap<i32, Product>,
    next_id: i32,
}

/// Product store backed by an ordered map
#[derive(Debug)]
pub struct MemoryProductStore {
    inner: Mutex<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored products
    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn get(&self, id: i32) -> Result<Product, StoreError> {
        self.inner
            .lock()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn list(&self, page: Page) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.lock().await;
        let items = inner
            .rows
            .values()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(0))
            .cloned()
            .collect();
        Ok(items)
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let product = draft.into_product(id);
        inner.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut inner = self.inner.lock().await;
        let row = inner
            .rows
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;

        *row = draft.into_product(id);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.inner
            .lock()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
