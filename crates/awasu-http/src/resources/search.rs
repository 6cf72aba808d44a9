//! Search queries.

use awasu_core::ApiArgs;
use serde_json::Value;

use super::take_field;
use crate::client::{ApiRequest, AwasuClient};
use crate::error::AwasuError;

/// Options for a search query. The defaults match the server's.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Where to search (joined with commas on the wire); `None` uses the
    /// server's defaults.
    pub locations: Option<Vec<String>>,
    /// How matches are rendered in the results (`fidf` argument).
    pub results_format: String,
    /// Enable the advanced query syntax.
    pub advanced_syntax: bool,
    pub page: u32,
    pub page_size: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            locations: None,
            results_format: "excerpt".to_string(),
            advanced_syntax: false,
            page: 1,
            page_size: 10,
        }
    }
}

impl AwasuClient {
    /// Run a search query and return the results.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Value, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("query", query);
        args.set("fidf", options.results_format.as_str());
        args.set("advsyn", options.advanced_syntax);
        args.set("page", options.page);
        args.set("pageSize", options.page_size);
        args.set("format", "json");
        if let Some(locations) = &options.locations {
            args.set("locations", locations.join(","));
        }
        let body = self.call_and_check(ApiRequest::new("search/query").args(args))?;
        take_field(body, "searchResults")
    }
}
