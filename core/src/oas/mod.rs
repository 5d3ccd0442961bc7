#![deny(missing_docs)]

//! # OpenAPI Output Module
//!
//! - **models**: Operation, parameter, schema and security structures.
//! - **document**: The root document wrapping the path table and components.

pub mod document;
pub mod models;

pub use document::{Components, Info, OpenApiDocument, Server, DEFAULT_OPENAPI_VERSION};
pub use models::{
    ApiKeyLocation, Content, MediaType, OAuthFlow, Operation, Parameter, ParameterLocation,
    PathEntry, PathTable, RequestBody, Response, Responses, Schema, SchemeRegistry,
    SecurityRequirement, SecurityScheme, DEFAULT_RESPONSE_DESCRIPTION, DEFAULT_TAG,
};
