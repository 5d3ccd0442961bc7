#![deny(missing_docs)]

//! # Parameter Extraction
//!
//! Collects the parameters declared directly on a request object: URL query
//! entries, URL path variables and request headers.

use crate::collection::{KeyValue, Request};
use crate::oas::models::{Parameter, ParameterLocation};
use crate::resolver::types::infer_parameter_schema;
use serde_json::Value;

/// Extracts query, path and header parameters from a request.
///
/// Bare-URL requests declare nothing. Disabled entries and entries without a
/// key are skipped. Path variables are always required.
pub fn extract_parameters(request: &Request) -> Vec<Parameter> {
    let Some(obj) = request.as_object() else {
        return Vec::new();
    };

    let mut params = Vec::new();
    if let Some(url) = obj.url.as_ref().and_then(|u| u.as_object()) {
        params.extend(
            url.query
                .iter()
                .filter_map(|q| to_parameter(q, ParameterLocation::Query)),
        );
        params.extend(
            url.variable
                .iter()
                .filter_map(|v| to_parameter(v, ParameterLocation::Path)),
        );
    }
    params.extend(
        obj.header
            .iter()
            .filter_map(|h| to_parameter(h, ParameterLocation::Header)),
    );
    params
}

fn to_parameter(entry: &KeyValue, location: ParameterLocation) -> Option<Parameter> {
    if entry.disabled {
        return None;
    }
    let name = entry.name()?;
    Some(Parameter {
        name: name.to_string(),
        location,
        description: entry.description_text(),
        required: location == ParameterLocation::Path,
        schema: infer_parameter_schema(entry.value.as_ref()),
        example: entry.value_text().map(Value::String),
    })
}
