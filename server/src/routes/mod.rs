//! Routes Layer
//!
//! axum handlers that bridge HTTP requests to the repositories.
//! Each handler maps store failures to an `ApiError` at its own boundary.

mod category_routes;
mod product_routes;
mod tag_routes;

use std::sync::Arc;

use std::num::IntErrorKind;

use axum::{
    extract::{FromRequest, FromRequestParts, Path},
    http::request::Parts,
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::domain::DomainError;
use crate::error::ApiError;
use crate::AppState;

pub use category_routes::*;
pub use product_routes::*;
pub use tag_routes::*;

/// JSON request body whose rejection is rendered as an `ApiError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Stands in for integer ids outside the i64 range; no row ever has it
const UNASSIGNED_ID: i64 = i64::MIN;

/// Record id taken from the `{id}` path segment
///
/// Any integer is accepted: ids that match no row fall through to the
/// handler's 404. Only a segment that is not an integer is a 400.
pub struct IdPath(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for IdPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_id(&raw)
            .map(IdPath)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid id: {}", raw)))
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(id) => Some(id),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Some(UNASSIGNED_ID),
            _ => None,
        },
    }
}

/// Confirmation body for writes that return no record
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Log a store failure and answer with a fixed 500 message
fn internal(message: &'static str) -> impl FnOnce(DomainError) -> ApiError {
    move |e| {
        error!(error = %e, "{}", message);
        ApiError::Internal(message)
    }
}

/// Like `internal`, but rejected input becomes a 400 naming the problem
fn rejected(message: &'static str) -> impl FnOnce(DomainError) -> ApiError {
    move |e| {
        let api_error = rejection_for(message, &e);
        match api_error {
            ApiError::BadRequest(_) => warn!(error = %e, "{}", message),
            _ => error!(error = %e, "{}", message),
        }
        api_error
    }
}

fn rejection_for(message: &'static str, e: &DomainError) -> ApiError {
    if e.is_invalid_input() {
        ApiError::BadRequest(format!("{} ({})", message, e))
    } else {
        ApiError::Internal(message)
    }
}

/// All catalog routes, bound to their state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Categories
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        // Tags, joined to products through product_tag
        .route("/tags", get(list_tags).post(create_tag))
        .route(
            "/tags/{id}",
            get(get_tag).put(update_tag).delete(delete_tag),
        )
        // Products
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}
