#![deny(missing_docs)]

//! # Resolver Module
//!
//! Pure helpers that read one part of a collection item and return a fragment
//! of the OpenAPI output. None of them fail: malformed input degrades to an
//! empty result.
//!
//! Handles:
//! - URL splitting and placeholder normalization.
//! - Structured parameter extraction (query, path variables, headers).
//! - Request body mapping per body mode.
//! - Status-code scanning of test scripts.
//! - Markdown pipe-table tokenizing.

pub mod body;
pub mod markdown;
pub mod params;
pub mod status_codes;
pub mod types;
pub mod urls;

pub use body::extract_request_body;
pub use markdown::{parse_md_table, TableRow};
pub use params::extract_parameters;
pub use status_codes::extract_status_codes_from_tests;
pub use types::{infer_parameter_schema, infer_primitive_type, infer_schema_from_example};
pub use urls::{extract_path_from_url, extract_path_parameter_names, normalize_path};
