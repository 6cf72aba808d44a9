//! Error types for Awasu Core

use thiserror::Error;

/// Errors that can occur while building or serializing XML documents
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed XML document: {0}")]
    Parse(#[from] xmltree::ParseError),

    #[error("Can't serialize XML document: {0}")]
    Emit(#[from] xmltree::Error),
}
