//! Category Routes
//!
//! `/categories`: CRUD with each category's products eager-loaded.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::{internal, IdPath, JsonBody, Message};
use crate::domain::{Category, CategoryPayload, Product, ProductSummary, WithProducts};
use crate::error::ApiError;
use crate::repository::{EagerLoadProducts, Repository};
use crate::AppState;

/// List all categories with their products
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WithProducts<Category, ProductSummary>>>, ApiError> {
    let categories = state
        .categories
        .list_with_products()
        .await
        .map_err(internal("Failed to fetch categories"))?;

    Ok(Json(categories))
}

/// Get one category with its full products
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<WithProducts<Category, Product>>, ApiError> {
    state
        .categories
        .find_with_products(id)
        .await
        .map_err(internal("Server error"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Category not found"))
}

/// Create a category
///
/// There is no validation layer here: whatever the store rejects is a 500.
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state
        .categories
        .create(&payload)
        .await
        .map_err(internal("Server error"))?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Patch a category by ID
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<CategoryPayload>,
) -> Result<Json<Message>, ApiError> {
    let affected = state
        .categories
        .update(id, &payload)
        .await
        .map_err(internal("Server error"))?;

    if affected == 0 {
        return Err(ApiError::NotFound("Category not found"));
    }
    Ok(Json(Message::new("Category updated successfully")))
}

/// Delete a category by ID
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<Message>, ApiError> {
    let affected = state
        .categories
        .delete(id)
        .await
        .map_err(internal("Server error"))?;

    if affected == 0 {
        return Err(ApiError::NotFound("Category not found"));
    }
    Ok(Json(Message::new("Category deleted successfully")))
}
