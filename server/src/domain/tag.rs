//! Tag Entity
//!
//! Tags are attached to products through the `product_tag` join table.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};

/// A tag for labelling products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: i64,
    /// Tag name
    pub tag_name: String,
}

impl Tag {
    pub fn new(id: i64, tag_name: String) -> Self {
        Self { id, tag_name }
    }
}

impl Entity for Tag {
    type Id = i64;
    type Payload = TagPayload;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Tag fields accepted on create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagPayload {
    pub tag_name: Option<String>,
}

impl TagPayload {
    /// The trimmed tag name, rejecting a missing or blank one
    pub fn tag_name(&self) -> DomainResult<&str> {
        match self.tag_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(DomainError::InvalidInput("tag_name is required".to_string())),
        }
    }
}

/// Join table entry for the product-tag relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTag {
    pub id: i64,
    pub product_id: i64,
    pub tag_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_creation() {
        let tag = Tag::new(1, "rock music".to_string());
        assert_eq!(tag.id(), 1);
        assert_eq!(tag.tag_name, "rock music");
    }

    #[test]
    fn test_payload_trims_name() {
        let payload = TagPayload {
            tag_name: Some("  blue ".to_string()),
        };
        assert_eq!(payload.tag_name().unwrap(), "blue");
    }

    #[test]
    fn test_payload_rejects_blank_name() {
        let blank = TagPayload {
            tag_name: Some("   ".to_string()),
        };
        assert!(blank.tag_name().unwrap_err().is_invalid_input());
        assert!(TagPayload::default().tag_name().is_err());
    }
}
