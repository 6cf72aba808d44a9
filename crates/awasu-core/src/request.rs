//! POST body construction
//!
//! Arguments travel to the server as attributes of an `<apiArgs>` element.
//! When the caller supplies its own XML body the element is injected as the
//! FIRST child of the document root: the server stops parsing once it has
//! consumed `<apiArgs>`, so putting it first spares it the rest of the tree.

use xmltree::{Element, XMLNode};

use crate::args::ApiArgs;
use crate::error::DocumentError;
use crate::xml::document_to_string;

/// Build the POST payload for a request.
///
/// With no arguments the supplied body (or nothing) is sent verbatim.
/// Otherwise the arguments become attributes of an `<apiArgs>` element that
/// either stands alone as the document root or is injected as the first
/// child of the supplied body's root.
///
/// # Errors
///
/// Returns `DocumentError` when the supplied body is not well-formed XML or
/// the merged document cannot be serialized.
pub fn build_post_body(
    args: &ApiArgs,
    body: Option<&str>,
) -> Result<Option<String>, DocumentError> {
    if args.is_empty() {
        return Ok(body.map(str::to_string));
    }

    let mut api_args = Element::new("apiArgs");
    for (name, value) in args.iter() {
        api_args
            .attributes
            .insert(name.to_string(), value.to_wire_string());
    }

    let document = match body {
        None => api_args,
        Some(text) => {
            let mut root = Element::parse(text.as_bytes())?;
            root.children.insert(0, XMLNode::Element(api_args));
            root
        }
    };

    document_to_string(&document).map(Some)
}
