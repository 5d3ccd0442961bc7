#![deny(missing_docs)]

//! # Operation Builder
//!
//! Turns one collection item into one (path, method) operation.

use crate::collection::Item;
use crate::convert::params::reconcile_parameters;
use crate::convert::responses::synthesize_responses;
use crate::convert::security::transcode_auth;
use crate::convert::walker::{Contribution, WalkContext};
use crate::oas::models::{Operation, PathEntry, Responses};
use crate::resolver::{
    extract_parameters, extract_path_from_url, extract_path_parameter_names,
    extract_request_body, normalize_path,
};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Methods whose body is converted into a request body.
const BODY_METHODS: [&str; 3] = ["post", "put", "patch"];

/// Builds the single-operation contribution of an item.
pub fn build_operation(item: &Item, ctx: &WalkContext) -> Contribution {
    let request = &item.request;
    let method = request.method();
    let path = normalize_path(&extract_path_from_url(request.raw_url()));
    let path_params = extract_path_parameter_names(&path);
    let (summary, operation_id) = split_operation_id(item.name.as_deref());

    let mut operation = Operation {
        tags: ctx.tags(),
        summary,
        description: request.description().to_string(),
        operation_id,
        parameters: Vec::new(),
        request_body: None,
        security: None,
        responses: Responses::new(),
    };

    if !operation.description.is_empty() {
        let reconciled = reconcile_parameters(
            &operation.description,
            extract_parameters(request),
            &path_params,
        );
        operation.description = reconciled.description;
        operation.parameters = reconciled.parameters;
    }

    let mut contribution = Contribution::default();

    if let Some(auth) = request.auth() {
        let security = operation.security.get_or_insert_with(Vec::new);
        if let Some(grant) = transcode_auth(auth) {
            contribution.security_schemes.extend(grant.schemes);
            security.push(grant.requirement);
        }
    }

    if BODY_METHODS.contains(&method.as_str()) {
        operation.request_body = request.body().and_then(extract_request_body);
    }

    operation.responses = synthesize_responses(item);

    debug!(
        method = %method,
        path = %path,
        group = %ctx.prefix(),
        "converted item"
    );

    let mut entry = PathEntry::new();
    entry.insert(method, operation);
    contribution.paths.insert(path, entry);
    contribution
}

/// Splits a trailing `[operationId]` off an item name.
///
/// Returns `(summary, operation_id)`. Without a bracketed suffix the summary is
/// the full name and no identifier is set.
pub fn split_operation_id(name: Option<&str>) -> (Option<String>, Option<String>) {
    static SUFFIX_RE: OnceLock<Regex> = OnceLock::new();
    let re = SUFFIX_RE.get_or_init(|| Regex::new(r"\s*\[([^\]]+)\]$").expect("Invalid regex"));

    let Some(name) = name else {
        return (None, None);
    };
    match re.captures(name) {
        Some(cap) => {
            let whole = cap.get(0).map_or(name.len(), |m| m.start());
            (Some(name[..whole].to_string()), Some(cap[1].to_string()))
        }
        None => (Some(name.to_string()), None),
    }
}
