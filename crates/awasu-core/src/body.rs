//! Parsed response bodies
//!
//! A response body is one of three things depending on the declared response
//! format and the raw-mode flag: unparsed text, an XML tree, or a decoded
//! JSON value. Callers pattern-match instead of probing at runtime.

use serde_json::Value;
use xmltree::Element;

/// Tagged union over the possible parsed forms of a response body.
///
/// Whitespace-only bodies stay [`ResponseBody::Raw`] regardless of the
/// declared format (some operations legitimately return nothing).
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Raw(String),
    Xml(Element),
    Json(Value),
}

impl ResponseBody {
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ResponseBody::Raw(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_xml(&self) -> Option<&Element> {
        match self {
            ResponseBody::Xml(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_raw(self) -> Option<String> {
        match self {
            ResponseBody::Raw(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_xml(self) -> Option<Element> {
        match self {
            ResponseBody::Xml(element) => Some(element),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }
}
