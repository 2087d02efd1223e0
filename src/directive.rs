//! Directives embedded in annotated test files.
//!
//! A directive is any line containing a marker token followed by a colon, e.g.
//!
//! ```text
//! // CONFIG: widening: 3
//! ```
//!
//! The text before the marker (here, a comment opener) is ignored by the scanner, so the same
//! channel works for any host syntax. The text after the colon, trimmed, is the payload.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Default marker token.
pub const DEFAULT_MARKER: &str = "CONFIG";

/// The token that flags a directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    token: String,
    needle: String,
}

/// A line recognized as a directive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DirectiveMatch<'a> {
    /// Everything up to and including `<token>:`.
    pub prefix: &'a str,
    /// Trimmed text following the marker. May be empty.
    pub payload: &'a str,
}

impl Marker {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let needle = format!("{}:", token);
        Self { token, needle }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Matches `line` against the marker.
    pub fn find<'a>(&self, line: &'a str) -> Option<DirectiveMatch<'a>> {
        let pos = line.find(&self.needle)?;
        let end = pos + self.needle.len();
        Some(DirectiveMatch {
            prefix: &line[..end],
            payload: line[end..].trim(),
        })
    }

    pub fn is_directive(&self, line: &str) -> bool {
        line.contains(&self.needle)
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

/// Splits `text` into lines, keeping each line's terminator.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}

/// Collects directive payloads from `lines` in input order.
///
/// Every line must still carry its `\n` terminator. A line without one means the input was
/// truncated, and the whole extraction fails.
pub fn extract<'a>(lines: impl IntoIterator<Item = &'a str>, marker: &Marker) -> Result<Vec<String>> {
    let mut payloads = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        if !line.ends_with('\n') {
            return Err(Error::MissingTerminator { line: i + 1 });
        }
        if let Some(m) = marker.find(line) {
            debug!("line {}: directive {:?}", i + 1, m.payload);
            payloads.push(m.payload.to_string());
        }
    }
    Ok(payloads)
}

/// Reads `path` and extracts its directive payloads.
pub fn extract_file(path: impl AsRef<Path>, marker: &Marker) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    extract(split_lines(&text), marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_extract_single() {
        let lines = ["a\n", "// CONFIG: x=1\n", "b\n"];
        let res = extract(lines, &Marker::default()).unwrap();
        assert_eq!(res, vec!["x=1"]);
    }

    #[test]
    fn test_extract_preserves_order() {
        let text = "; CONFIG: second\nint x;\n# CONFIG:first  \r\n";
        let res = extract(split_lines(text), &Marker::default()).unwrap();
        assert_eq!(res, vec!["second", "first"]);
    }

    #[test]
    fn test_extract_missing_terminator() {
        let lines = ["a\n", "// CONFIG: x=1\n", "// CONFIG: y=2"];
        let err = extract(lines, &Marker::default()).unwrap_err();
        assert!(matches!(err, Error::MissingTerminator { line: 3 }));

        // Non-directive content does not matter either.
        let err = extract(["plain"], &Marker::default()).unwrap_err();
        assert!(matches!(err, Error::MissingTerminator { line: 1 }));
    }

    #[test]
    fn test_extract_empty() {
        let res = extract(split_lines(""), &Marker::default()).unwrap();
        assert!(res.is_empty());
    }

    #[test]
    fn test_marker_needs_colon() {
        let marker = Marker::default();
        assert!(marker.find("// CONFIG x=1\n").is_none());
        assert!(!marker.is_directive("// CONFIG x=1\n"));

        let m = marker.find("// CONFIG:\n").unwrap();
        assert_eq!(m.payload, "");
    }

    #[test]
    fn test_custom_marker() {
        let marker = Marker::new("VERIFY");
        let m = marker.find("; VERIFY: %a -> top\n").unwrap();
        assert_eq!(m.prefix, "; VERIFY:");
        assert_eq!(m.payload, "%a -> top");
        assert!(marker.find("// CONFIG: a\n").is_none());
    }
}
