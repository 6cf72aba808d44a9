//! XML formatting helpers
//!
//! Leaf utilities shared by request construction and response validation:
//! entity escaping, boolean rendering, descendant search, serialization, and
//! a diagnostic tree dumper.

use std::fmt::Write as _;

use xmltree::{Element, XMLNode};

use crate::error::DocumentError;

/// Escape a string for safe embedding in XML text or attribute values.
///
/// Replaces `& < > "` with their entities. Escaping an already-escaped
/// string double-escapes it; this is deliberate and mirrors the server's
/// expectations, so callers must escape exactly once.
pub fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Reverse [`escape_xml`].
pub fn unescape_xml(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}

/// Render a boolean the way the Awasu API expects it.
pub fn bool_string(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Build an element holding a single text node.
///
/// The emitter escapes the text on serialization, so request bodies built
/// from these never concatenate unescaped caller input.
pub fn text_element(name: &str, text: &str) -> Element {
    let mut element = Element::new(name);
    if !text.is_empty() {
        element.children.push(XMLNode::Text(text.to_string()));
    }
    element
}

/// Serialize an XML element (and its subtree) to a document string.
pub fn document_to_string(element: &Element) -> Result<String, DocumentError> {
    let mut out = Vec::new();
    element.write(&mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Find the first element named `name` anywhere under `root`, depth-first.
///
/// The root element itself is not considered a match.
pub fn find_descendant<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    for node in &root.children {
        if let Some(child) = node.as_element() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = find_descendant(child, name) {
                return Some(found);
            }
        }
    }
    None
}

/// Pretty-print a parsed XML tree for diagnostics.
///
/// Each element becomes a `name:` line followed by its trimmed text, then
/// `@attr = value` lines, then children indented by four spaces with their
/// tag names padded to the widest sibling tag.
pub fn dump_tree(root: &Element) -> String {
    let mut out = String::new();
    dump_node(&mut out, root, "", 0);
    out
}

fn dump_node(out: &mut String, node: &Element, prefix: &str, tag_field_width: usize) {
    let text = node
        .get_text()
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{}{:<width$} {}",
        prefix,
        format!("{}:", node.name),
        text,
        width = tag_field_width + 1
    );
    for (name, value) in &node.attributes {
        let _ = writeln!(out, "{prefix}  @{name} = {value}");
    }
    let children: Vec<&Element> = node
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .collect();
    if !children.is_empty() {
        let max_tag_len = children.iter().map(|c| c.name.len()).max().unwrap_or(0);
        let child_prefix = format!("{prefix}    ");
        for child in children {
            dump_node(out, child, &child_prefix, max_tag_len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_round_trip() {
        let original = r#"a & b < c > d "e""#;
        assert_eq!(unescape_xml(&escape_xml(original)), original);
    }

    #[test]
    fn test_escape_replaces_all_specials() {
        assert_eq!(escape_xml(r#"&<>""#), "&amp;&lt;&gt;&quot;");
    }

    #[test]
    fn test_escaping_twice_double_escapes() {
        // Not idempotent: callers must escape exactly once.
        assert_eq!(escape_xml(&escape_xml("&")), "&amp;amp;");
    }

    #[test]
    fn test_bool_string() {
        assert_eq!(bool_string(true), "true");
        assert_eq!(bool_string(false), "false");
    }

    #[test]
    fn test_find_descendant_direct_child() {
        let root = Element::parse(
            "<response><errorMsg>nope</errorMsg></response>".as_bytes(),
        )
        .unwrap();
        let found = find_descendant(&root, "errorMsg").unwrap();
        assert_eq!(found.get_text().unwrap(), "nope");
    }

    #[test]
    fn test_find_descendant_nested() {
        let root = Element::parse(
            "<response><inner><errorMsg>deep</errorMsg></inner></response>".as_bytes(),
        )
        .unwrap();
        let found = find_descendant(&root, "errorMsg").unwrap();
        assert_eq!(found.get_text().unwrap(), "deep");
    }

    #[test]
    fn test_find_descendant_missing() {
        let root = Element::parse("<response><ok/></response>".as_bytes()).unwrap();
        assert!(find_descendant(&root, "errorMsg").is_none());
    }

    #[test]
    fn test_find_descendant_ignores_root_name() {
        let root = Element::parse("<errorMsg><ok/></errorMsg>".as_bytes()).unwrap();
        assert!(find_descendant(&root, "errorMsg").is_none());
    }

    #[test]
    fn test_dump_tree_shape() {
        let root = Element::parse(
            r#"<channel id="42"><name>News</name><url>http://x</url></channel>"#.as_bytes(),
        )
        .unwrap();
        let dump = dump_tree(&root);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0].trim_end(), "channel:");
        assert_eq!(lines[1], "  @id = 42");
        // Child tags padded to the widest sibling ("name" and "url" both
        // padded to 4 + 1 columns).
        assert_eq!(lines[2], "    name: News");
        assert_eq!(lines[3], "    url:  http://x");
    }

    #[test]
    fn test_document_to_string_round_trips() {
        let root = Element::parse("<a><b>text</b></a>".as_bytes()).unwrap();
        let text = document_to_string(&root).unwrap();
        let reparsed = Element::parse(text.as_bytes()).unwrap();
        assert_eq!(reparsed.name, "a");
        assert_eq!(reparsed.get_child("b").unwrap().get_text().unwrap(), "text");
    }
}
