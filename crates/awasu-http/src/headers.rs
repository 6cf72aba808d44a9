//! HTTP response header envelope
//!
//! Headers are kept as an ordered collection of lines. Regular headers map
//! `name -> Some(value)`; the initial status line is stored as
//! `"HTTP/1.x <code> <reason>" -> None`, the `None` acting as the marker
//! that status-line detection scans for.

/// Ordered collection of response header lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    lines: Vec<(String, Option<String>)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the status line (stored with a `None` value as the marker).
    pub fn push_status_line(&mut self, line: impl Into<String>) {
        self.lines.push((line.into(), None));
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.lines.push((name.into(), Some(value.into())));
    }

    /// First value for a header name, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.lines.iter().find_map(|(n, v)| {
            if n.eq_ignore_ascii_case(name) {
                v.as_deref()
            } else {
                None
            }
        })
    }

    /// The first status-line marker, if any. Only one is expected.
    pub fn status_line(&self) -> Option<&str> {
        self.lines
            .iter()
            .find(|(_, v)| v.is_none())
            .map(|(line, _)| line.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.lines.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
