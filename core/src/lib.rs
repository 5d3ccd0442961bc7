#![deny(missing_docs)]

//! # P2O Core
//!
//! Core library for converting API collections (folders of saved requests)
//! into OpenAPI 3.0 documents.

/// Shared error types.
pub mod error;

/// Collection document input model.
pub mod collection;

/// OpenAPI output model.
pub mod oas;

/// Per-field extraction helpers (URLs, parameters, bodies, test scripts, tables).
pub mod resolver;

/// The tree walk and per-item conversion.
pub mod convert;

pub use collection::{parse_collection, Collection, CollectionNode};
pub use convert::{convert, convert_str, Conversion, ConvertOptions, PathCollision};
pub use error::{AppError, AppResult};
pub use oas::{OpenApiDocument, Operation, Parameter, ParameterLocation, PathTable};
