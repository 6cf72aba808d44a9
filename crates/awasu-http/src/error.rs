//! Error types for the Awasu HTTP client

use awasu_core::DocumentError;
use thiserror::Error;

/// Errors surfaced by [`AwasuClient`](crate::AwasuClient) operations.
///
/// Nothing here is retried; every failure goes straight to the caller.
#[derive(Debug, Error)]
pub enum AwasuError {
    /// The transport could not complete (connection refused, unreachable
    /// host, malformed URL).
    #[error("Can't connect to Awasu: {0}")]
    Connection(#[source] reqwest::Error),

    /// The server responded but signaled failure, via the HTTP status line,
    /// an embedded error field, or a per-entity batch status. The message is
    /// the server-provided text where available.
    #[error("{0}")]
    Api(String),

    /// The caller supplied invalid input; raised before any network
    /// activity.
    #[error("{0}")]
    InvalidInput(String),

    /// The request body could not be built or serialized.
    #[error("Request body error: {0}")]
    Document(#[from] DocumentError),

    /// The response declared the XML format but its body did not parse.
    #[error("Malformed XML response: {0}")]
    XmlDecode(#[source] xmltree::ParseError),

    /// The response declared the JSON format but its body did not decode.
    #[error("Malformed JSON response: {0}")]
    JsonDecode(#[source] serde_json::Error),

    /// The response claimed `Content-Encoding: deflate` but could not be
    /// inflated.
    #[error("Can't inflate response body: {0}")]
    Inflate(#[source] std::io::Error),

    /// A well-formed success response was missing an expected field.
    #[error("Unexpected response: missing {0}")]
    UnexpectedResponse(&'static str),
}
