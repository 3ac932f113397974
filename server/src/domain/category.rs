//! Category Entity
//!
//! A category owns zero or more products (one-to-many).

use serde::{Deserialize, Deserializer, Serialize};
use super::entity::Entity;

/// A product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub category_name: String,
}

impl Category {
    pub fn new(id: i64, category_name: String) -> Self {
        Self { id, category_name }
    }
}

impl Entity for Category {
    type Id = i64;
    type Payload = CategoryPayload;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Category fields accepted on create and update
///
/// Nothing is validated here: a missing name is left for the store's
/// NOT NULL constraint to reject. Scalar names (`42`, `true`) are stored
/// as their text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPayload {
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub category_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(flag) => flag.to_string(),
    }))
}
