//! Product endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ProductId};
use crate::models::{Page, PageParams, Product, ProductInput};
use crate::state::AppState;

/// Delete confirmation body
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub result: &'static str,
}

/// GET /products - list products by ascending id
///
/// Query pairs are taken raw so repeated or malformed keys never reject.
async fn list_products(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let page = Page::from(PageParams::from_pairs(pairs));
    let products = state.store().list(page).await?;
    Ok(Json(products))
}

/// POST /product - create a product
async fn create_product(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let draft = input.validate()?;
    let product = state.store().create(draft).await?;

    tracing::info!(id = product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /product/{id} - get a single product
async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, ApiError> {
    let product = state.store().get(id).await?;
    Ok(Json(product))
}

/// PUT /product/{id} - replace name and price
async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    let draft = input.validate()?;
    let product = state.store().update(id, draft).await?;
    Ok(Json(product))
}

/// DELETE /product/{id} - delete a product
async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.store().delete(id).await?;

    tracing::info!(id, "product deleted");
    Ok(Json(DeleteResponse { result: "success" }))
}

/// Product routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/product", post(create_product))
        .route(
            "/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
