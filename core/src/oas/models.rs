#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Serializable OpenAPI 3.0 structures produced by the converter.
//!
//! All maps are insertion-ordered so that converting the same collection twice
//! yields byte-identical output.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Path template -> method map.
pub type PathTable = IndexMap<String, PathEntry>;

/// Lower-case HTTP method -> operation.
pub type PathEntry = IndexMap<String, Operation>;

/// Scheme name -> scheme definition, shared across one conversion run.
pub type SchemeRegistry = IndexMap<String, SecurityScheme>;

/// Scheme name -> required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Status code -> response.
pub type Responses = IndexMap<String, Response>;

/// Media type -> media type object.
pub type Content = IndexMap<String, MediaType>;

/// Description used for every synthesized response that has no better label.
pub const DEFAULT_RESPONSE_DESCRIPTION: &str = "Successful response";

/// Tag used when an operation has no enclosing group.
pub const DEFAULT_TAG: &str = "default";

/// One (path, method) operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Exactly one tag: the joined group context or [`DEFAULT_TAG`].
    pub tags: Vec<String>,
    /// Item name without its `[operationId]` suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description with any parameter table removed.
    pub description: String,
    /// Explicit operation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Parameters, unique by name.
    pub parameters: Vec<Parameter>,
    /// Request body for `post`/`put`/`patch`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Security requirements; `Some(vec![])` when auth was declared but yielded no scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Responses keyed by status code.
    pub responses: Responses,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path template placeholder.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
}

impl ParameterLocation {
    /// Parses a location name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            _ => None,
        }
    }
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Name, unique within one operation.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter must be sent.
    pub required: bool,
    /// Primitive schema.
    pub schema: Schema,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// Minimal JSON schema subset used for parameters and bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    /// `string`, `integer`, `number`, `boolean`, `object` or `array`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format hint, e.g. `binary`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Object members.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Array element schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl Schema {
    /// A schema with only `type` set.
    pub fn of_type(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    /// Body per media type.
    pub content: Content,
}

/// Media type object; serializes to `{}` when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaType {
    /// Body schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Example payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// Response object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Response description.
    pub description: String,
    /// Body per media type.
    pub content: Content,
}

impl Response {
    /// A response with one empty `application/json` entry.
    pub fn json(description: impl Into<String>) -> Self {
        let mut content = Content::new();
        content.insert("application/json".to_string(), MediaType::default());
        Self {
            description: description.into(),
            content,
        }
    }
}

/// Security scheme definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecurityScheme {
    /// HTTP authentication (`basic`, `bearer`, `digest`).
    Http {
        /// Scheme name as registered with IANA.
        scheme: String,
    },
    /// API key sent in a header, query string or cookie.
    ApiKey {
        /// Header, query or cookie name.
        name: String,
        /// Where the key is sent.
        #[serde(rename = "in")]
        location: ApiKeyLocation,
    },
    /// OAuth 2.0 with one or more flows.
    #[serde(rename = "oauth2")]
    OAuth2 {
        /// Flows keyed by OpenAPI flow name.
        flows: IndexMap<String, OAuthFlow>,
    },
}

/// API-key location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    /// Request header.
    Header,
    /// Query string.
    Query,
    /// Cookie.
    Cookie,
}

/// One OAuth 2.0 flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    /// Authorization endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    /// Token endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// Scope name -> description.
    pub scopes: IndexMap<String, String>,
}
