//! Domain Layer
//!
//! Contains all catalog entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod category;
mod entity;
mod product;
mod tag;

pub use category::{Category, CategoryPayload};
pub use entity::{DomainError, DomainResult, Entity, WithProducts};
pub use product::{Product, ProductDetail, ProductPayload, ProductSummary, DEFAULT_STOCK};
pub use tag::{ProductTag, Tag, TagPayload};
