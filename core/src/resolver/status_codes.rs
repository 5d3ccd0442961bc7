#![deny(missing_docs)]

//! # Test Script Scanning
//!
//! Finds the status codes an item's test scripts assert on.

use crate::collection::Item;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

/// Codes outside this range are not HTTP status codes and are ignored.
const STATUS_RANGE: RangeInclusive<u16> = 100..=599;

/// Returns asserted status codes in first-seen order, without duplicates.
///
/// Recognized forms:
/// - `pm.response.to.have.status(201)`
/// - `pm.expect(pm.response.code).to.eql(201)` (also `equal`)
/// - `pm.expect(pm.response.code).to.be.oneOf([200, 201])`
pub fn extract_status_codes_from_tests(item: &Item) -> Vec<u16> {
    static ASSERT_RE: OnceLock<Regex> = OnceLock::new();
    let re = ASSERT_RE.get_or_init(|| {
        Regex::new(
            r"pm\.response\.to\.have\.status\(\s*(\d{3})\s*\)|pm\.expect\(\s*pm\.response\.code\s*\)\.to\.(?:be\.)?(?:eql|equal)\(\s*(\d{3})\s*\)|pm\.expect\(\s*pm\.response\.code\s*\)\.to\.be\.oneOf\(\s*\[([^\]]*)\]\s*\)",
        )
        .expect("Invalid regex")
    });

    let mut codes: Vec<u16> = Vec::new();
    let mut push = |code: u16| {
        if STATUS_RANGE.contains(&code) && !codes.contains(&code) {
            codes.push(code);
        }
    };

    for event in item
        .event
        .iter()
        .filter(|e| e.listen.as_deref() == Some("test"))
    {
        let Some(source) = event.script.as_ref().and_then(|s| s.exec.as_ref()) else {
            continue;
        };
        let script = source.joined();
        for cap in re.captures_iter(&script) {
            if let Some(single) = cap.get(1).or_else(|| cap.get(2)) {
                if let Ok(code) = single.as_str().parse() {
                    push(code);
                }
            } else if let Some(list) = cap.get(3) {
                list.as_str()
                    .split(',')
                    .filter_map(|c| c.trim().parse::<u16>().ok())
                    .for_each(&mut push);
            }
        }
    }

    codes
}
