#![deny(missing_docs)]

//! # OpenAPI Document
//!
//! Top-level document produced by a conversion run.

use crate::oas::models::{PathTable, SchemeRegistry};
use serde::Serialize;

/// The OpenAPI version emitted unless overridden.
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.3";

/// Root OpenAPI object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApiDocument {
    /// OpenAPI version string.
    pub openapi: String,
    /// Document metadata.
    pub info: Info,
    /// Server list; omitted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Path table.
    pub paths: PathTable,
    /// Shared components; omitted when no scheme was registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

/// Info object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// API version.
    pub version: String,
}

/// Server object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    /// Base URL.
    pub url: String,
}

/// Components object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Components {
    /// Security schemes keyed by name.
    #[serde(rename = "securitySchemes")]
    pub security_schemes: SchemeRegistry,
}

impl Components {
    /// Wraps a registry, returning `None` for an empty one.
    pub fn from_registry(security_schemes: SchemeRegistry) -> Option<Self> {
        if security_schemes.is_empty() {
            None
        } else {
            Some(Self { security_schemes })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_shape() {
        let doc = OpenApiDocument {
            openapi: DEFAULT_OPENAPI_VERSION.to_string(),
            info: Info {
                title: "API".into(),
                description: None,
                version: "1.0.0".into(),
            },
            servers: Vec::new(),
            paths: PathTable::new(),
            components: Components::from_registry(SchemeRegistry::new()),
        };
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "openapi": "3.0.3",
                "info": { "title": "API", "version": "1.0.0" },
                "paths": {}
            })
        );
    }
}
