//! Input entries
//!
//! Each non-blank line of the input file is one entry: a profile address,
//! optionally followed by a delimiter and a known graduation date.

mod entry;

pub use entry::{is_address_valid, normalize_address, parse_entry, Entry, EntryParseError};

use std::path::Path;

/// Reads entries from a file, one per line
///
/// Lines are trimmed and blank lines are skipped. Order is preserved.
pub fn read_entries(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(split_entries(&content))
}

/// Splits raw input text into trimmed, non-blank entries
pub fn split_entries(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
