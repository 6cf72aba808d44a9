//! # Awasu Core
//!
//! Protocol primitives for the Awasu HTTP API.
//!
//! This crate provides:
//! - Typed argument maps and the response-format tag
//! - Request-body construction (the `apiArgs` element)
//! - XML helpers: escaping, boolean rendering, tree dumping
//! - The tagged union of parsed response bodies
//!
//! Nothing in this crate touches the network; the `awasu-http` crate builds
//! the actual transport on top of these types.
//!
//! ## Example
//!
//! ```rust
//! use awasu_core::{ApiArgs, ResponseFormat, build_post_body};
//!
//! let mut args = ApiArgs::new();
//! args.set("format", "json");
//! args.set("verbose", true);
//! assert_eq!(args.response_format(), ResponseFormat::Json);
//!
//! let body = build_post_body(&args, None).unwrap();
//! assert!(body.unwrap().contains("apiArgs"));
//! ```

pub mod args;
pub mod body;
pub mod error;
pub mod request;
pub mod xml;

// Re-exports for convenience
pub use args::{ApiArgs, ArgValue, Ids, ResponseFormat};
pub use body::ResponseBody;
pub use error::DocumentError;
pub use request::build_post_body;
pub use xml::{
    bool_string, document_to_string, dump_tree, escape_xml, find_descendant, text_element,
    unescape_xml,
};
