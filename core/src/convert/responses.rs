#![deny(missing_docs)]

//! # Response Synthesis
//!
//! Builds an operation's response map. First match wins:
//! 1. status codes asserted by test scripts,
//! 2. the first saved sample response,
//! 3. a single default `200`.

use crate::collection::Item;
use crate::oas::models::{Response, Responses, DEFAULT_RESPONSE_DESCRIPTION};
use crate::resolver::extract_status_codes_from_tests;

/// Synthesizes the response map for an item.
pub fn synthesize_responses(item: &Item) -> Responses {
    let asserted = extract_status_codes_from_tests(item);
    if !asserted.is_empty() {
        return asserted
            .into_iter()
            .map(|code| (code.to_string(), Response::json(DEFAULT_RESPONSE_DESCRIPTION)))
            .collect();
    }

    if let Some(sample) = item.response.first() {
        let code = sample.code.filter(|c| *c != 0).unwrap_or(200);
        let label = sample
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_RESPONSE_DESCRIPTION);
        return single(code, label);
    }

    single(200, DEFAULT_RESPONSE_DESCRIPTION)
}

fn single(code: u16, description: &str) -> Responses {
    let mut responses = Responses::new();
    responses.insert(code.to_string(), Response::json(description));
    responses
}
