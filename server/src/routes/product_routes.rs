//! Product Routes
//!
//! `/products`: CRUD returning each product with its category and tags.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::{internal, rejected, IdPath, JsonBody, Message};
use crate::domain::{ProductDetail, ProductPayload};
use crate::error::ApiError;
use crate::repository::Repository;
use crate::AppState;

/// List all products with category and tags
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductDetail>>, ApiError> {
    let products = state
        .products
        .list_detailed()
        .await
        .map_err(internal("Failed to fetch products"))?;

    Ok(Json(products))
}

/// Get one product with category and tags
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<ProductDetail>, ApiError> {
    find_detail(&state, id, "Failed to fetch product").await.map(Json)
}

/// Create a product, attaching `tag_ids` when given
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> Result<(StatusCode, Json<ProductDetail>), ApiError> {
    let product = state
        .products
        .create(&payload)
        .await
        .map_err(rejected("Failed to create product"))?;

    let detail = find_detail(&state, product.id, "Failed to create product").await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Patch a product; a present `tag_ids` replaces its tag set
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> Result<Json<ProductDetail>, ApiError> {
    let affected = state
        .products
        .update(id, &payload)
        .await
        .map_err(rejected("Failed to update product"))?;

    if affected == 0 {
        return Err(ApiError::NotFound("Product not found"));
    }
    find_detail(&state, id, "Failed to update product").await.map(Json)
}

/// Delete a product by ID
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<Message>, ApiError> {
    let affected = state
        .products
        .delete(id)
        .await
        .map_err(internal("Failed to delete product"))?;

    if affected == 0 {
        return Err(ApiError::NotFound("Product not found"));
    }
    Ok(Json(Message::new("Product deleted successfully")))
}

async fn find_detail(
    state: &AppState,
    id: i64,
    failure: &'static str,
) -> Result<ProductDetail, ApiError> {
    state
        .products
        .find_detail(id)
        .await
        .map_err(internal(failure))?
        .ok_or(ApiError::NotFound("Product not found"))
}
