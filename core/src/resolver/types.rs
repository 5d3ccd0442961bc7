#![deny(missing_docs)]

//! # Schema Inference
//!
//! Derives minimal schemas from example values found in the collection.

use crate::oas::models::Schema;
use serde_json::Value;

/// Infers the primitive type name of a textual example.
///
/// `"42"` -> `integer`, `"4.2"` -> `number`, `"true"` -> `boolean`, anything
/// else -> `string`.
pub fn infer_primitive_type(text: &str) -> &'static str {
    let t = text.trim();
    if t.is_empty() {
        "string"
    } else if t.parse::<i64>().is_ok() {
        "integer"
    } else if t.parse::<f64>().is_ok() && t.chars().any(|c| c.is_ascii_digit()) {
        "number"
    } else if t == "true" || t == "false" {
        "boolean"
    } else {
        "string"
    }
}

/// Infers the primitive schema of a parameter value.
///
/// JSON numbers and booleans keep their type; strings go through
/// [`infer_primitive_type`].
pub fn infer_parameter_schema(value: Option<&Value>) -> Schema {
    let ty = match value {
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => "integer",
        Some(Value::Number(_)) => "number",
        Some(Value::String(s)) => infer_primitive_type(s),
        _ => "string",
    };
    Schema::of_type(ty)
}

/// Infers a structural schema from a JSON example.
pub fn infer_schema_from_example(value: &Value) -> Schema {
    match value {
        Value::Object(map) => Schema {
            schema_type: Some("object".into()),
            properties: map
                .iter()
                .map(|(k, v)| (k.clone(), infer_schema_from_example(v)))
                .collect(),
            ..Schema::default()
        },
        Value::Array(items) => Schema {
            schema_type: Some("array".into()),
            items: Some(Box::new(
                items
                    .first()
                    .map(infer_schema_from_example)
                    .unwrap_or_default(),
            )),
            ..Schema::default()
        },
        Value::String(_) => Schema::of_type("string"),
        Value::Number(n) if n.is_i64() || n.is_u64() => Schema::of_type("integer"),
        Value::Number(_) => Schema::of_type("number"),
        Value::Bool(_) => Schema::of_type("boolean"),
        Value::Null => Schema::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_primitive_type() {
        assert_eq!(infer_primitive_type("42"), "integer");
        assert_eq!(infer_primitive_type("-4.5"), "number");
        assert_eq!(infer_primitive_type("true"), "boolean");
        assert_eq!(infer_primitive_type("abc"), "string");
        assert_eq!(infer_primitive_type(""), "string");
        assert_eq!(infer_primitive_type("NaN"), "string");
    }

    #[test]
    fn test_infer_parameter_schema() {
        assert_eq!(
            infer_parameter_schema(Some(&json!(3))),
            Schema::of_type("integer")
        );
        assert_eq!(
            infer_parameter_schema(Some(&json!("{{token}}"))),
            Schema::of_type("string")
        );
        assert_eq!(infer_parameter_schema(None), Schema::of_type("string"));
    }

    #[test]
    fn test_infer_schema_from_example() {
        let schema = infer_schema_from_example(&json!({
            "name": "Rex",
            "age": 3,
            "weight": 4.5,
            "tags": ["a"]
        }));
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "age": { "type": "integer" },
                    "weight": { "type": "number" },
                    "tags": { "type": "array", "items": { "type": "string" } }
                }
            })
        );
    }
}
