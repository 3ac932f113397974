//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Handlers only see these contracts; the SQLite implementations live next door.

use async_trait::async_trait;
use crate::domain::{DomainResult, Entity, ProductSummary, WithProducts};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity from its payload
    async fn create(&self, payload: &T::Payload) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Apply the fields present in `payload`, returning the number of affected rows
    async fn update(&self, id: T::Id, payload: &T::Payload) -> DomainResult<usize>;

    /// Delete entity by ID, returning the number of affected rows
    async fn delete(&self, id: T::Id) -> DomainResult<usize>;
}

/// Extension for repositories whose records own or reference products
///
/// Both reads load the related products in the same query as the record.
#[async_trait]
pub trait EagerLoadProducts<T: Entity>: Repository<T> {
    /// Product shape embedded by `find_with_products`
    type Detail: Send;

    /// All records, each with its products projected to a summary
    async fn list_with_products(&self) -> DomainResult<Vec<WithProducts<T, ProductSummary>>>;

    /// One record with its products, or None if the ID is unknown
    async fn find_with_products(
        &self,
        id: T::Id,
    ) -> DomainResult<Option<WithProducts<T, Self::Detail>>>;
}
