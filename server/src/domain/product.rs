//! Product Entity
//!
//! A product belongs to one category and carries any number of tags.

use serde::{Deserialize, Serialize};
use super::category::Category;
use super::entity::{DomainError, DomainResult, Entity};
use super::tag::Tag;

/// Stock assigned when a new product does not name one
pub const DEFAULT_STOCK: i64 = 10;

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub stock: i64,
    /// Owning category (None once the category has been deleted)
    pub category_id: Option<i64>,
}

impl Entity for Product {
    type Id = i64;
    type Payload = ProductPayload;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Product projection embedded in category and tag listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub stock: i64,
}

impl From<Product> for ProductSummary {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            product_name: product.product_name,
            price: product.price,
            stock: product.stock,
        }
    }
}

/// A product together with its category and tags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

/// Product fields accepted on create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPayload {
    pub product_name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category_id: Option<i64>,
    /// When present on update, replaces the product's whole tag set
    #[serde(alias = "tagIds")]
    pub tag_ids: Option<Vec<i64>>,
}

impl ProductPayload {
    /// Check a payload for a new product: name and price are required
    pub fn validate_new(&self) -> DomainResult<()> {
        if self.product_name.is_none() {
            return Err(invalid("product_name is required"));
        }
        if self.price.is_none() {
            return Err(invalid("price is required"));
        }
        self.validate_changes()
    }

    /// Check the fields that are present
    pub fn validate_changes(&self) -> DomainResult<()> {
        if let Some(name) = &self.product_name {
            if name.trim().is_empty() {
                return Err(invalid("product_name must not be blank"));
            }
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(invalid("price must be a non-negative number"));
            }
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(invalid("stock must be a non-negative integer"));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> DomainError {
    DomainError::InvalidInput(msg.to_string())
}
