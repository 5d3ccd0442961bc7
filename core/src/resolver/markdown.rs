#![deny(missing_docs)]

//! # Markdown Table Tokenizer
//!
//! Splits a pipe table into rows keyed by (lower-cased) header cell.

use indexmap::IndexMap;

/// One table row: header cell -> value.
pub type TableRow = IndexMap<String, String>;

/// Tokenizes a markdown table.
///
/// The first non-blank line is the header and the second must be an alignment
/// row (`|---|:---:|`). Every later line becomes a row; missing cells map to an
/// empty string. Anything that is not a table yields no rows.
pub fn parse_md_table(markdown: &str) -> Vec<TableRow> {
    let lines: Vec<&str> = markdown
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 2 || !is_alignment_row(lines[1]) {
        return Vec::new();
    }

    let header: Vec<String> = split_cells(lines[0])
        .into_iter()
        .map(|cell| cell.to_lowercase())
        .collect();

    lines[2..]
        .iter()
        .filter(|line| !is_alignment_row(line))
        .map(|line| {
            let cells = split_cells(line);
            header
                .iter()
                .enumerate()
                .map(|(i, key)| (key.clone(), cells.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// True for a separator row made of dashes, colons, pipes and spaces.
pub fn is_alignment_row(line: &str) -> bool {
    let t = line.trim();
    t.contains('-') && t.chars().all(|c| matches!(c, '-' | ':' | '|' | ' ' | '\t'))
}

fn split_cells(line: &str) -> Vec<String> {
    let t = line.trim();
    let t = t.strip_prefix('|').unwrap_or(t);
    let t = t.strip_suffix('|').unwrap_or(t);
    t.split('|').map(|cell| cell.trim().to_string()).collect()
}
