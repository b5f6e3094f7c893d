//! Item types and the document shape stored in MongoDB.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Item fields supplied by clients on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemInput {
    /// Display name.
    #[schema(example = "pen")]
    pub name: String,
    /// Free-form description.
    #[schema(example = "blue pen")]
    pub description: String,
    /// Unit price.
    #[schema(example = 1.5)]
    pub price: f64,
}

/// An item as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Server-generated identifier, immutable once assigned.
    #[schema(example = "0b6f3c1e-8d0b-4c43-9d6a-3f2a3e7f4b11")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price.
    pub price: f64,
}

impl Item {
    /// Build an item from an id and client-supplied fields.
    pub fn from_input(id: impl Into<String>, input: ItemInput) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            description: input.description,
            price: input.price,
        }
    }
}

/// Persisted document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    /// Primary key.
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl ItemDocument {
    /// Build a new document with a freshly generated id.
    pub fn new(input: ItemInput) -> Self {
        Self {
            id: generate_id(),
            name: input.name,
            description: input.description,
            price: input.price,
        }
    }
}

impl From<ItemDocument> for Item {
    fn from(doc: ItemDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            description: doc.description,
            price: doc.price,
        }
    }
}

/// Generate a new unique item id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pen() -> ItemInput {
        ItemInput {
            name: "pen".to_string(),
            description: "blue pen".to_string(),
            price: 1.5,
        }
    }

    #[test]
    fn document_serializes_id_as_underscore_id() {
        let doc = ItemDocument::new(pen());
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["_id"], serde_json::Value::String(doc.id.clone()));
        assert!(json.get("id").is_none());
        assert_eq!(json["price"], 1.5);
    }

    #[test]
    fn new_documents_get_distinct_ids() {
        let a = ItemDocument::new(pen());
        let b = ItemDocument::new(pen());

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn item_keeps_document_fields() {
        let doc = ItemDocument::new(pen());
        let id = doc.id.clone();
        let item = Item::from(doc);

        assert_eq!(item, Item::from_input(id, pen()));
    }

    #[test]
    fn input_rejects_missing_fields() {
        let result: Result<ItemInput, _> =
            serde_json::from_str(r#"{"name":"pen","description":"blue pen"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn input_rejects_wrong_price_type() {
        let result: Result<ItemInput, _> =
            serde_json::from_str(r#"{"name":"pen","description":"blue pen","price":"cheap"}"#);
        assert!(result.is_err());
    }
}
