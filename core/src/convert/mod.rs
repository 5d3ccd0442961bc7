#![deny(missing_docs)]

//! # Collection Conversion
//!
//! - **walker**: Recursive tree walk and bottom-up merge.
//! - **operation**: One item -> one operation.
//! - **params**: Structured vs. description-table parameter reconciliation.
//! - **responses**: Response map synthesis.
//! - **security**: Auth declaration -> security scheme + requirement.
//!
//! The whole pipeline is a pure function of the collection: no I/O, no shared
//! state, same input -> same output.

pub mod operation;
pub mod params;
pub mod responses;
pub mod security;
pub mod walker;

pub use operation::{build_operation, split_operation_id};
pub use params::{reconcile_parameters, split_description, DescriptionParts, Reconciled};
pub use responses::synthesize_responses;
pub use security::{transcode_auth, AuthMechanism, SecurityGrant};
pub use walker::{walk, walk_children, Contribution, PathCollision, WalkContext};

use crate::collection::{parse_collection, Collection};
use crate::error::AppResult;
use crate::oas::document::{Components, Info, OpenApiDocument, Server, DEFAULT_OPENAPI_VERSION};

/// Collection variables consulted for the server URL, in order.
const BASE_URL_VARIABLES: [&str; 2] = ["baseUrl", "base_url"];

/// Options for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Record and log (path, method) overwrites.
    pub strict: bool,
    /// Server URL; overrides any `baseUrl` collection variable.
    pub server_url: Option<String>,
    /// Emitted `openapi` version.
    pub openapi_version: String,
    /// Title override; defaults to the collection name.
    pub title: Option<String>,
    /// Version override; defaults to the collection version.
    pub version: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            strict: false,
            server_url: None,
            openapi_version: DEFAULT_OPENAPI_VERSION.to_string(),
            title: None,
            version: None,
        }
    }
}

/// Result of a conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The generated document.
    pub document: OpenApiDocument,
    /// Overwritten operations; always empty unless `strict` is set.
    pub collisions: Vec<PathCollision>,
}

/// Converts a decoded collection.
///
/// Top-level nodes are walked with an empty context, so the collection name
/// never becomes a tag.
pub fn convert(collection: &Collection, options: &ConvertOptions) -> Conversion {
    let ctx = WalkContext::new(options.strict);
    let merged = walk_children(&collection.item, &ctx);

    let document = OpenApiDocument {
        openapi: options.openapi_version.clone(),
        info: build_info(collection, options),
        servers: resolve_servers(collection, options),
        paths: merged.paths,
        components: Components::from_registry(merged.security_schemes),
    };

    Conversion {
        document,
        collisions: merged.collisions,
    }
}

/// Decodes collection JSON and converts it.
pub fn convert_str(json: &str, options: &ConvertOptions) -> AppResult<Conversion> {
    let collection = parse_collection(json)?;
    Ok(convert(&collection, options))
}

fn build_info(collection: &Collection, options: &ConvertOptions) -> Info {
    let info = &collection.info;
    Info {
        title: options
            .title
            .clone()
            .or_else(|| info.name.clone().filter(|n| !n.is_empty()))
            .unwrap_or_else(|| "API".to_string()),
        description: info
            .description
            .as_ref()
            .map(|d| d.text().trim().to_string())
            .filter(|d| !d.is_empty()),
        version: options
            .version
            .clone()
            .or_else(|| info.version_text())
            .unwrap_or_else(|| "1.0.0".to_string()),
    }
}

fn resolve_servers(collection: &Collection, options: &ConvertOptions) -> Vec<Server> {
    options
        .server_url
        .clone()
        .or_else(|| {
            BASE_URL_VARIABLES
                .iter()
                .find_map(|key| collection.variable(key))
        })
        .map(|url| vec![Server { url }])
        .unwrap_or_default()
}
