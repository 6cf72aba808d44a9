//! # Awasu HTTP
//!
//! Blocking HTTP client for the Awasu desktop API.
//!
//! This crate provides:
//! - [`AwasuClient`]: the protocol adapter — URL resolution, argument
//!   marshalling into the POST body, deflate decompression, format dispatch,
//!   and error detection across XML/JSON/HTML responses
//! - Convenience methods for every resource (channels, reports, workpads,
//!   search, logs)
//! - The [`AwasuError`] taxonomy: transport failures, server-signaled
//!   failures, caller-input errors
//!
//! ## Example
//!
//! ```rust,ignore
//! use awasu_http::AwasuClient;
//!
//! let client = AwasuClient::default().with_token("secret");
//!
//! // Print the name of every channel.
//! for channel in client.channels(None, false)?.as_array().unwrap() {
//!     println!("{}", channel["name"]);
//! }
//!
//! // Dump the contents of the default workpad.
//! if let Some(workpad) = client.default_workpad()? {
//!     for item in workpad["workpadItems"].as_array().unwrap() {
//!         println!("{} => {}", item["title"], item["url"]);
//!     }
//! }
//! ```

mod client;
mod error;
mod headers;
mod resources;

pub use client::{ApiRequest, AwasuClient, DEFAULT_API_URL};
pub use error::AwasuError;
pub use headers::ResponseHeaders;
pub use resources::SearchOptions;

// The core types callers need to drive the client.
pub use awasu_core::{ApiArgs, ArgValue, Ids, ResponseBody, ResponseFormat};
