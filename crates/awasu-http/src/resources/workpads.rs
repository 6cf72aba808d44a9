//! Workpad and feed-item operations.

use awasu_core::{document_to_string, text_element, ApiArgs, Ids};
use serde_json::Value;
use xmltree::{Element, XMLNode};

use super::{check_batch, created_id, take_field};
use crate::client::{ApiRequest, AwasuClient};
use crate::error::AwasuError;

/// The server resolves this id to whichever workpad is currently selected.
const DEFAULT_WORKPAD_ID: &str = "@";

/// Reported by the server when no workpad is currently selected.
const NO_WORKPADS_SELECTED: &str = "No workpads were selected.";

impl AwasuClient {
    /// Get the configuration details for the specified workpads (all of
    /// them when `ids` is `None`).
    pub fn workpads(&self, ids: Option<Ids>) -> Result<Value, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.add_ids(ids.as_ref());
        let body = self.call_and_check(ApiRequest::new("workpads/list").args(args))?;
        take_field(body, "workpads")
    }

    /// Get the contents of a single workpad.
    pub fn workpad(&self, id: impl Into<Ids>) -> Result<Value, AwasuError> {
        let id = match id.into() {
            Ids::One(id) => id,
            Ids::Many(_) => {
                return Err(AwasuError::InvalidInput(
                    "Can't get multiple workpads.".to_string(),
                ))
            }
        };
        let mut args = ApiArgs::new();
        args.set("id", id);
        args.set("format", "json");
        let body = self.call_and_check(ApiRequest::new("workpads/get").args(args))?;
        take_field(body, "workpad")
    }

    /// Get the default workpad, or `None` when no workpad is selected.
    ///
    /// "No workpad selected" is an ordinary outcome, not a failure, so it
    /// surfaces as an explicit variant rather than an error the caller has
    /// to inspect.
    pub fn default_workpad(&self) -> Result<Option<Value>, AwasuError> {
        match self.workpad(DEFAULT_WORKPAD_ID) {
            Ok(workpad) => Ok(Some(workpad)),
            Err(AwasuError::Api(msg)) if msg == NO_WORKPADS_SELECTED => Ok(None),
            Err(other) => Err(other),
        }
    }

    /// Get the feed XML for a workpad.
    ///
    /// An `errorMsg` element anywhere in the response raises through the
    /// embedded-error scan in `call_and_check`.
    pub fn workpad_feed(&self, id: &str) -> Result<String, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("id", id);
        let body = self.call_and_check(ApiRequest::new("workpads/feed").args(args))?;
        let xml = body
            .into_xml()
            .ok_or(AwasuError::UnexpectedResponse("feed XML"))?;
        document_to_string(&xml).map_err(AwasuError::from)
    }

    /// Add a new item to the specified workpads.
    ///
    /// Fails on the first workpad the server could not add the item to.
    pub fn add_workpad_item(
        &self,
        ids: impl Into<Ids>,
        url: &str,
        title: Option<&str>,
        custom_fields: &[(&str, &str)],
    ) -> Result<(), AwasuError> {
        let mut args = ApiArgs::new();
        args.set("url", url);
        args.set_opt("title", title);
        args.set("format", "json");
        for (name, value) in custom_fields {
            args.set(*name, *value);
        }
        args.add_ids(Some(&ids.into()));
        let body = self.call_and_check(ApiRequest::new("workpads/addItem").args(args))?;
        let json = body
            .into_json()
            .ok_or(AwasuError::UnexpectedResponse("workpads"))?;
        check_batch(&json, "workpads", "add item to", "workpad")
    }

    /// Create a new workpad and return its id.
    pub fn create_workpad(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<String, AwasuError> {
        let mut workpad = Element::new("workpad");
        workpad
            .children
            .push(XMLNode::Element(text_element("name", name)));
        workpad.children.push(XMLNode::Element(text_element(
            "description",
            description.unwrap_or(""),
        )));
        let post_data = document_to_string(&workpad)?;

        let mut args = ApiArgs::new();
        args.set("format", "json");
        let body =
            self.call_and_check(ApiRequest::new("workpads/create").args(args).body(&post_data))?;
        created_id(body)
    }

    /// Delete the specified workpads.
    ///
    /// Fails on the first workpad the server could not delete.
    pub fn delete_workpads(&self, ids: impl Into<Ids>) -> Result<(), AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.add_ids(Some(&ids.into()));
        let body = self.call_and_check(ApiRequest::new("workpads/delete").args(args))?;
        let json = body
            .into_json()
            .ok_or(AwasuError::UnexpectedResponse("workpads"))?;
        check_batch(&json, "workpads", "delete", "workpad")
    }

    /// Get the specified feed items.
    pub fn feed_items(&self, ids: Option<Ids>) -> Result<Value, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.add_ids(ids.as_ref());
        let body = self.call_and_check(ApiRequest::new("feedItems/get").args(args))?;
        take_field(body, "feedItems")
    }
}
