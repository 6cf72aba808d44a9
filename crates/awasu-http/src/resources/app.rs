//! Application-level operations: build info, user info, stats, logs.

use awasu_core::ApiArgs;
use serde_json::Value;

use super::take_field;
use crate::client::{ApiRequest, AwasuClient};
use crate::error::AwasuError;

impl AwasuClient {
    /// Get the Awasu build info.
    pub fn build_info(&self) -> Result<Value, AwasuError> {
        self.json_field("buildInfo", "buildInfo")
    }

    /// Get the Awasu user info.
    pub fn user_info(&self) -> Result<Value, AwasuError> {
        self.json_field("userInfo", "userInfo")
    }

    /// Get the Awasu stats.
    pub fn stats(&self) -> Result<Value, AwasuError> {
        self.json_field("stats", "stats")
    }

    /// Get the Activity log, optionally limited to the last `lines` lines.
    pub fn activity_log(&self, lines: Option<u32>) -> Result<String, AwasuError> {
        self.log("logs/activity", lines)
    }

    /// Get the Error log, optionally limited to the last `lines` lines.
    pub fn error_log(&self, lines: Option<u32>) -> Result<String, AwasuError> {
        self.log("logs/error", lines)
    }

    fn json_field(&self, endpoint: &str, field: &'static str) -> Result<Value, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        let body = self.call_and_check(ApiRequest::new(endpoint).args(args))?;
        take_field(body, field)
    }

    fn log(&self, endpoint: &str, lines: Option<u32>) -> Result<String, AwasuError> {
        let mut args = ApiArgs::new();
        args.set_opt("lines", lines);
        let body = self.call_and_check(ApiRequest::new(endpoint).args(args).raw())?;
        body.into_raw()
            .ok_or(AwasuError::UnexpectedResponse("raw log text"))
    }
}
