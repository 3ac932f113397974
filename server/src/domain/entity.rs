//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all catalog entities.
//! All entities have a unique ID and a request payload used to create or patch them.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Fields accepted on create and on partial update
    type Payload: Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// A missing record is not an error here: lookups return `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    /// Input rejected by validation or by a store constraint
    InvalidInput(String),
    Internal(String),
}

impl DomainError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DomainError::InvalidInput(_))
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// A record serialized together with its related products
///
/// The record's own fields are flattened, so a category renders as
/// `{"id": 1, "category_name": "Shirts", "products": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithProducts<T, P> {
    #[serde(flatten)]
    pub record: T,
    pub products: Vec<P>,
}

impl<T, P> WithProducts<T, P> {
    pub fn new(record: T) -> Self {
        Self {
            record,
            products: Vec::new(),
        }
    }
}
