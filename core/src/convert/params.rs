#![deny(missing_docs)]

//! # Parameter Reconciliation
//!
//! Merges the parameters declared on the request with those documented in a
//! markdown table inside the description. Table rows win on name collisions,
//! and `path` parameters survive only if the path template has a matching
//! placeholder.

use crate::oas::models::{Parameter, ParameterLocation, Schema};
use crate::resolver::markdown::{is_alignment_row, parse_md_table, TableRow};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// A description split into prose and table blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptionParts {
    /// Prose lines, in order, with table blocks and their lead-in removed.
    pub text: String,
    /// Raw text of each table block.
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    InDescription,
    InTable,
}

/// Separates table blocks from the surrounding prose.
///
/// A table starts at a line beginning with `|` and continues while lines begin
/// with `|` or are dash alignment rows. Blank and heading lines directly before
/// a table are dropped with it.
pub fn split_description(description: &str) -> DescriptionParts {
    let mut kept: Vec<&str> = Vec::new();
    let mut tables: Vec<Vec<&str>> = Vec::new();
    let mut state = LineState::InDescription;

    for line in description.lines() {
        let t = line.trim();
        state = match state {
            LineState::InDescription if t.starts_with('|') => {
                while kept
                    .last()
                    .is_some_and(|prev| prev.trim().is_empty() || prev.trim().starts_with('#'))
                {
                    kept.pop();
                }
                tables.push(vec![line]);
                LineState::InTable
            }
            LineState::InDescription => {
                kept.push(line);
                LineState::InDescription
            }
            LineState::InTable if t.starts_with('|') || is_alignment_row(t) => {
                if let Some(block) = tables.last_mut() {
                    block.push(line);
                }
                LineState::InTable
            }
            LineState::InTable => {
                kept.push(line);
                LineState::InDescription
            }
        };
    }

    DescriptionParts {
        text: kept.join("\n"),
        tables: tables.into_iter().map(|block| block.join("\n")).collect(),
    }
}

/// Converts a table block into parameters.
///
/// Rows need a `name` and a recognized location in the `object` (or
/// `location` / `in`) column. `required` is true only for the exact text
/// `true`; an empty `type` falls back to `string`.
pub fn parameters_from_table(table: &str) -> Vec<Parameter> {
    parse_md_table(table)
        .iter()
        .filter_map(parameter_from_row)
        .collect()
}

fn parameter_from_row(row: &TableRow) -> Option<Parameter> {
    let cell = |key: &str| row.get(key).map(String::as_str).filter(|v| !v.is_empty());

    let name = cell("name")?;
    let location_cell = cell("object").or_else(|| cell("location")).or_else(|| cell("in"));
    let Some(location) = location_cell.and_then(ParameterLocation::parse) else {
        debug!(name, location = ?location_cell, "skipping table row without a parameter location");
        return None;
    };

    Some(Parameter {
        name: name.to_string(),
        location,
        description: cell("description").map(str::to_string),
        required: cell("required") == Some("true"),
        schema: Schema::of_type(cell("type").unwrap_or("string")),
        example: cell("example").map(|e| Value::String(e.to_string())),
    })
}

/// Result of [`reconcile_parameters`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    /// Description with tables removed, trimmed.
    pub description: String,
    /// Merged parameters, unique by name.
    pub parameters: Vec<Parameter>,
}

/// Merges structured and table-derived parameters.
///
/// Both sources pass the same path filter. Later entries replace earlier ones
/// with the same name, so table rows override structured parameters.
pub fn reconcile_parameters(
    description: &str,
    structured: Vec<Parameter>,
    path_params: &[String],
) -> Reconciled {
    let parts = split_description(description);
    let from_tables = parts
        .tables
        .iter()
        .flat_map(|table| parameters_from_table(table));

    let mut merged: IndexMap<String, Parameter> = IndexMap::new();
    for param in structured.into_iter().chain(from_tables) {
        if param.name.is_empty() {
            continue;
        }
        if param.location == ParameterLocation::Path && !path_params.contains(&param.name) {
            debug!(name = %param.name, "dropping path parameter absent from template");
            continue;
        }
        merged.insert(param.name.clone(), param);
    }

    Reconciled {
        description: parts.text.trim().to_string(),
        parameters: merged.into_values().collect(),
    }
}
