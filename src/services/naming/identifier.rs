//! Identifier extraction from exported path component stems.
//!
//! The exporter appends `" " + 32 lowercase hex chars` to every page name.

use regex::Regex;
use std::sync::LazyLock;

/// Length of the hex identifier the exporter appends.
pub const IDENTIFIER_LEN: usize = 32;

static RE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(.+?) ([0-9a-f]{{{IDENTIFIER_LEN}}})$")).expect("Invalid regex")
});

/// A stem split into its human-readable part and the trailing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedName<'a> {
    /// Text before the identifier, exactly as exported (may be truncated).
    pub human_name: &'a str,
    /// The 32-character hex identifier.
    pub identifier: &'a str,
}

/// Split `stem` into (human name, identifier).
///
/// Returns `None` when the stem carries no identifier; such components are
/// passed through unchanged.
pub fn extract_identifier(stem: &str) -> Option<ExtractedName<'_>> {
    let captures = RE_IDENTIFIER.captures(stem)?;
    Some(ExtractedName {
        human_name: captures.get(1)?.as_str(),
        identifier: captures.get(2)?.as_str(),
    })
}
