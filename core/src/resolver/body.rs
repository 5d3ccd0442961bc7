#![deny(missing_docs)]

//! # Body Extraction
//!
//! Maps a collection request body onto an OpenAPI request body.
//!
//! - `raw`: JSON (parsed, schema inferred) or plain text.
//! - `urlencoded` / `formdata`: object schema with one property per enabled field.
//! - `file`: binary stream.
//! - `graphql`: JSON object with `query` and `variables`.

use crate::collection::{Body, KeyValue};
use crate::oas::models::{Content, MediaType, RequestBody, Schema};
use crate::resolver::types::infer_schema_from_example;
use serde_json::{json, Value};
use tracing::debug;

/// Extracts a request body descriptor; `None` for empty or unknown modes.
pub fn extract_request_body(body: &Body) -> Option<RequestBody> {
    let (media_type, media) = match body.mode.as_deref()? {
        "raw" => raw_body(body)?,
        "urlencoded" => (
            "application/x-www-form-urlencoded",
            form_body(&body.urlencoded, false)?,
        ),
        "formdata" => ("multipart/form-data", form_body(&body.formdata, true)?),
        "file" => (
            "application/octet-stream",
            MediaType {
                schema: Some(binary_schema()),
                example: None,
            },
        ),
        "graphql" => ("application/json", graphql_body(body.graphql.as_ref())),
        other => {
            debug!(mode = other, "unsupported body mode");
            return None;
        }
    };

    let mut content = Content::new();
    content.insert(media_type.to_string(), media);
    Some(RequestBody { content })
}

fn raw_body(body: &Body) -> Option<(&'static str, MediaType)> {
    let raw = body.raw.as_deref().filter(|r| !r.trim().is_empty())?;
    let declared_json = body
        .raw_language()
        .is_some_and(|lang| lang.eq_ignore_ascii_case("json"));

    match serde_json::from_str::<Value>(raw) {
        Ok(parsed) => Some((
            "application/json",
            MediaType {
                schema: Some(infer_schema_from_example(&parsed)),
                example: Some(parsed),
            },
        )),
        // Collections often embed `{{vars}}` that break strict JSON parsing.
        Err(_) if declared_json => Some((
            "application/json",
            MediaType {
                schema: Some(Schema::of_type("object")),
                example: Some(Value::String(raw.to_string())),
            },
        )),
        Err(_) => Some((
            "text/plain",
            MediaType {
                schema: Some(Schema::of_type("string")),
                example: Some(Value::String(raw.to_string())),
            },
        )),
    }
}

fn form_body(fields: &[KeyValue], allow_files: bool) -> Option<MediaType> {
    let mut schema = Schema::of_type("object");
    for field in fields.iter().filter(|f| !f.disabled) {
        let Some(name) = field.name() else {
            continue;
        };
        let property = if allow_files && field.kind.as_deref() == Some("file") {
            binary_schema()
        } else {
            Schema {
                example: field.value_text().map(Value::String),
                ..Schema::of_type("string")
            }
        };
        schema.properties.insert(name.to_string(), property);
    }
    if schema.properties.is_empty() {
        return None;
    }
    Some(MediaType {
        schema: Some(schema),
        example: None,
    })
}

fn graphql_body(graphql: Option<&Value>) -> MediaType {
    let mut schema = Schema::of_type("object");
    schema
        .properties
        .insert("query".to_string(), Schema::of_type("string"));
    schema
        .properties
        .insert("variables".to_string(), Schema::of_type("object"));

    let example = graphql.map(|g| {
        let variables = match g.get("variables") {
            Some(Value::String(s)) => serde_json::from_str(s).unwrap_or(Value::Null),
            Some(other) => other.clone(),
            None => Value::Null,
        };
        json!({
            "query": g.get("query").cloned().unwrap_or(Value::Null),
            "variables": variables,
        })
    });

    MediaType {
        schema: Some(schema),
        example,
    }
}

fn binary_schema() -> Schema {
    Schema {
        format: Some("binary".into()),
        ..Schema::of_type("string")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(raw: Value) -> Body {
        serde_json::from_value(raw).unwrap()
    }

    fn as_json(b: Option<RequestBody>) -> Value {
        serde_json::to_value(b.expect("body expected")).unwrap()
    }

    #[test]
    fn test_raw_json_body() {
        let b = body(json!({ "mode": "raw", "raw": "{\"name\":\"Rex\"}" }));
        assert_eq!(
            as_json(extract_request_body(&b)),
            json!({
                "content": {
                    "application/json": {
                        "schema": { "type": "object", "properties": { "name": { "type": "string" } } },
                        "example": { "name": "Rex" }
                    }
                }
            })
        );
    }

    #[test]
    fn test_raw_json_with_template_variables() {
        let b = body(json!({
            "mode": "raw",
            "raw": "{\"id\": {{id}}}",
            "options": { "raw": { "language": "json" } }
        }));
        let out = as_json(extract_request_body(&b));
        assert_eq!(out["content"]["application/json"]["schema"]["type"], "object");
        assert_eq!(out["content"]["application/json"]["example"], "{\"id\": {{id}}}");
    }

    #[test]
    fn test_raw_text_body() {
        let b = body(json!({ "mode": "raw", "raw": "hello" }));
        let out = as_json(extract_request_body(&b));
        assert_eq!(out["content"]["text/plain"]["schema"]["type"], "string");
    }

    #[test]
    fn test_empty_raw_body_is_none() {
        assert!(extract_request_body(&body(json!({ "mode": "raw", "raw": "  " }))).is_none());
        assert!(extract_request_body(&body(json!({}))).is_none());
        assert!(extract_request_body(&body(json!({ "mode": "mystery" }))).is_none());
    }

    #[test]
    fn test_urlencoded_body() {
        let b = body(json!({
            "mode": "urlencoded",
            "urlencoded": [
                { "key": "user", "value": "bob" },
                { "key": "skip", "value": "x", "disabled": true }
            ]
        }));
        assert_eq!(
            as_json(extract_request_body(&b)),
            json!({
                "content": {
                    "application/x-www-form-urlencoded": {
                        "schema": {
                            "type": "object",
                            "properties": { "user": { "type": "string", "example": "bob" } }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_formdata_file_field() {
        let b = body(json!({
            "mode": "formdata",
            "formdata": [ { "key": "avatar", "type": "file", "src": "/tmp/a.png" } ]
        }));
        let out = as_json(extract_request_body(&b));
        assert_eq!(
            out["content"]["multipart/form-data"]["schema"]["properties"]["avatar"],
            json!({ "type": "string", "format": "binary" })
        );
    }

    #[test]
    fn test_graphql_body() {
        let b = body(json!({
            "mode": "graphql",
            "graphql": { "query": "{ me { id } }", "variables": "{\"a\":1}" }
        }));
        let out = as_json(extract_request_body(&b));
        assert_eq!(
            out["content"]["application/json"]["example"],
            json!({ "query": "{ me { id } }", "variables": { "a": 1 } })
        );
    }
}
