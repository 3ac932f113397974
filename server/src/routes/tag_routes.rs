//! Tag Routes
//!
//! `/tags`: CRUD with products loaded through the product_tag join.
//! Update and delete look the tag up first and answer 404 when it is missing.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::{internal, rejected, IdPath, JsonBody, Message};
use crate::domain::{ProductSummary, Tag, TagPayload, WithProducts};
use crate::error::ApiError;
use crate::repository::{EagerLoadProducts, Repository};
use crate::AppState;

/// List all tags with their products
pub async fn list_tags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WithProducts<Tag, ProductSummary>>>, ApiError> {
    let tags = state
        .tags
        .list_with_products()
        .await
        .map_err(internal("Failed to fetch tags"))?;

    Ok(Json(tags))
}

/// Get one tag with its products
pub async fn get_tag(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<WithProducts<Tag, ProductSummary>>, ApiError> {
    state
        .tags
        .find_with_products(id)
        .await
        .map_err(internal("Failed to fetch tag"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Tag not found"))
}

/// Create a tag
pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<TagPayload>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    let tag = state
        .tags
        .create(&payload)
        .await
        .map_err(rejected("Failed to create tag"))?;

    Ok((StatusCode::CREATED, Json(tag)))
}

/// Rename a tag; its product associations are not touched
pub async fn update_tag(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<TagPayload>,
) -> Result<Json<Tag>, ApiError> {
    find_tag(&state, id, "Failed to update tag").await?;

    state
        .tags
        .update(id, &payload)
        .await
        .map_err(rejected("Failed to update tag"))?;

    // Re-read so the response is what the store holds
    find_tag(&state, id, "Failed to update tag").await.map(Json)
}

/// Delete a tag and its product associations
pub async fn delete_tag(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<Message>, ApiError> {
    find_tag(&state, id, "Failed to delete tag").await?;

    state
        .tags
        .delete(id)
        .await
        .map_err(internal("Failed to delete tag"))?;

    Ok(Json(Message::new("Tag deleted successfully")))
}

async fn find_tag(state: &AppState, id: i64, failure: &'static str) -> Result<Tag, ApiError> {
    state
        .tags
        .find_by_id(id)
        .await
        .map_err(internal(failure))?
        .ok_or(ApiError::NotFound("Tag not found"))
}
