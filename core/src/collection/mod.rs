#![deny(missing_docs)]

//! # Collection Input Model
//!
//! Deserialization layer for the hierarchical API-collection document.
//!
//! - **models**: Group / Item / Request shapes.
//!
//! Nodes are classified on their raw JSON value so that a single malformed
//! entry never fails the whole document.

pub mod models;

pub use models::{
    Auth, Body, Collection, CollectionInfo, CollectionNode, Description, Event, Group, Item,
    KeyValue, Request, RequestObject, SampleResponse, Script, ScriptSource, UrlObject, UrlSpec,
};

use crate::error::AppResult;

/// Decodes a collection document from JSON text.
///
/// Only the document root has to be well-formed. Nested nodes that are neither
/// a group nor an item decode to [`CollectionNode::Malformed`].
pub fn parse_collection(json: &str) -> AppResult<Collection> {
    let collection: Collection = serde_json::from_str(json)?;
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_parse_minimal_collection() {
        let json = r#"{
            "info": { "name": "Pets" },
            "item": [
                { "name": "List pets", "request": "https://api.example.com/pets" }
            ]
        }"#;
        let collection = parse_collection(json).unwrap();
        assert_eq!(collection.info.name.as_deref(), Some("Pets"));
        assert_eq!(collection.item.len(), 1);
        assert!(matches!(collection.item[0], CollectionNode::Item(_)));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_collection("not json").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn test_parse_keeps_malformed_children() {
        let json = r#"{ "item": [ 42, { "name": "orphan" }, { "item": [] } ] }"#;
        let collection = parse_collection(json).unwrap();
        assert!(matches!(collection.item[0], CollectionNode::Malformed));
        assert!(matches!(collection.item[1], CollectionNode::Malformed));
        assert!(matches!(collection.item[2], CollectionNode::Group(_)));
    }
}
