//! API argument maps
//!
//! Awasu API arguments travel as attributes of an `<apiArgs>` element in the
//! POST body. Argument values come from a small closed set of kinds, and each
//! kind has an explicit wire-string rendering; there is no implicit
//! stringification. Absent values are never transmitted.

use crate::xml::{bool_string, escape_xml};

/// A single argument value.
///
/// Booleans render as `true`/`false` on the wire; integers use their decimal
/// representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl ArgValue {
    /// Render the value as it is transmitted to the server.
    pub fn to_wire_string(&self) -> String {
        match self {
            ArgValue::Str(s) => s.clone(),
            ArgValue::Int(n) => n.to_string(),
            ArgValue::Bool(b) => bool_string(*b).to_string(),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::Int(i64::from(value))
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

/// Ordered map of API argument name to value.
///
/// Keys are case-sensitive and unique; setting an existing key replaces its
/// value in place. Insertion order is preserved so serialized requests are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiArgs {
    entries: Vec<(String, ArgValue)>,
}

impl ApiArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Set an argument, replacing any existing value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Set an argument only when a value is present.
    ///
    /// `None` leaves the map unchanged; absent arguments are omitted from the
    /// request entirely rather than being sent as `"null"` or empty.
    pub fn set_opt<V: Into<ArgValue>>(&mut self, name: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Add entity identifiers as the `id` argument.
    ///
    /// A collection is joined with commas; the joined (or single) value is
    /// XML-escaped. `None` leaves the map unchanged. This lets every
    /// multi-entity operation accept either one identifier or a collection
    /// uniformly.
    pub fn add_ids(&mut self, ids: Option<&Ids>) {
        if let Some(ids) = ids {
            self.set("id", escape_xml(&ids.joined()));
        }
    }

    /// Determine the response format the server will use for these arguments.
    ///
    /// `format` takes precedence over its short form `f`; the default is XML.
    /// The transport's parse dispatch and the error-scan in validation both
    /// derive the format through this method, so the two always agree.
    pub fn response_format(&self) -> ResponseFormat {
        let tag = self
            .get("format")
            .or_else(|| self.get("f"))
            .map(ArgValue::to_wire_string);
        match tag.as_deref() {
            None | Some("xml") => ResponseFormat::Xml,
            Some("json") => ResponseFormat::Json,
            Some("html") => ResponseFormat::Html,
            Some(other) => ResponseFormat::Other(other.to_string()),
        }
    }
}

/// One entity identifier, or a collection of them.
///
/// Operations that act on a single entity reject `Many` before any network
/// activity; batch operations join `Many` with commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ids {
    One(String),
    Many(Vec<String>),
}

impl Ids {
    /// The comma-joined wire form of the identifiers.
    pub fn joined(&self) -> String {
        match self {
            Ids::One(id) => id.clone(),
            Ids::Many(ids) => ids.join(","),
        }
    }
}

impl From<&str> for Ids {
    fn from(value: &str) -> Self {
        Ids::One(value.to_string())
    }
}

impl From<String> for Ids {
    fn from(value: String) -> Self {
        Ids::One(value)
    }
}

impl From<Vec<String>> for Ids {
    fn from(value: Vec<String>) -> Self {
        Ids::Many(value)
    }
}

impl From<Vec<&str>> for Ids {
    fn from(value: Vec<&str>) -> Self {
        Ids::Many(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Ids {
    fn from(value: &[&str]) -> Self {
        Ids::Many(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Declared format of a response body.
///
/// Anything other than the three recognized tags means "return the raw text
/// unparsed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseFormat {
    Xml,
    Json,
    Html,
    Other(String),
}
