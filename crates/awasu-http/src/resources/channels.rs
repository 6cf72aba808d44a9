//! Channel, channel-folder and channel-filter operations.

use awasu_core::{bool_string, document_to_string, text_element, ApiArgs, Ids};
use serde_json::Value;
use xmltree::{Element, XMLNode};

use super::{check_batch, created_id, take_field};
use crate::client::{ApiRequest, AwasuClient};
use crate::error::AwasuError;

impl AwasuClient {
    /// Get the channel folders, as a tree or as a flat list.
    pub fn channel_folders(&self, as_tree: bool) -> Result<Value, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        let (endpoint, field) = if as_tree {
            ("channels/folders/tree", "channelFolder")
        } else {
            ("channels/folders/list", "channelFolders")
        };
        let body = self.call_and_check(ApiRequest::new(endpoint).args(args))?;
        take_field(body, field)
    }

    /// Create a new channel folder and return its id.
    pub fn create_channel_folder(
        &self,
        name: &str,
        parent_folder: Option<&str>,
        insert_after: Option<&str>,
    ) -> Result<String, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("name", name);
        args.set("format", "json");
        args.set_opt("parent", parent_folder);
        args.set_opt("after", insert_after);
        let body = self.call_and_check(ApiRequest::new("channels/folders/create").args(args))?;
        created_id(body)
    }

    /// Delete a channel folder.
    pub fn delete_channel_folder(&self, folder_id: &str) -> Result<(), AwasuError> {
        let mut args = ApiArgs::new();
        args.set("id", folder_id);
        args.set("format", "json");
        self.call_and_check(ApiRequest::new("channels/folders/delete").args(args))?;
        Ok(())
    }

    /// Get the channel filters.
    pub fn channel_filters(&self) -> Result<Value, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        let body = self.call_and_check(ApiRequest::new("channels/filters/list").args(args))?;
        take_field(body, "channelFilters")
    }

    /// Get the configuration details for the specified channels (all of
    /// them when `ids` is `None`).
    pub fn channels(&self, ids: Option<Ids>, verbose: bool) -> Result<Value, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.set("verbose", verbose);
        args.add_ids(ids.as_ref());
        let body = self.call_and_check(ApiRequest::new("channels/list").args(args))?;
        take_field(body, "channels")
    }

    /// Get the statistics for the specified channels.
    pub fn channel_stats(&self, ids: Option<Ids>) -> Result<Value, AwasuError> {
        self.channels_field("channels/stats", ids)
    }

    /// Get the error log for the specified channels.
    pub fn channel_errors(&self, ids: Option<Ids>) -> Result<Value, AwasuError> {
        self.channels_field("channels/errors", ids)
    }

    /// Get the HTML summary for a single channel.
    pub fn channel_summary(&self, id: impl Into<Ids>) -> Result<String, AwasuError> {
        let id = match id.into() {
            Ids::One(id) => id,
            Ids::Many(_) => {
                return Err(AwasuError::InvalidInput(
                    "Can't get multiple channels.".to_string(),
                ))
            }
        };
        let mut args = ApiArgs::new();
        args.set("id", id);
        args.set("format", "html");
        let body = self.call_and_check(ApiRequest::new("channels/get").args(args))?;
        body.into_raw()
            .ok_or(AwasuError::UnexpectedResponse("html summary"))
    }

    /// Create a new channel from a pre-built `<channel>` definition and
    /// return its id.
    pub fn create_channel(&self, post_data: &str) -> Result<String, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        let body =
            self.call_and_check(ApiRequest::new("channels/create").args(args).body(post_data))?;
        created_id(body)
    }

    /// Create a new standard channel, downloaded from the specified URL.
    pub fn create_channel_by_url(&self, url: &str) -> Result<String, AwasuError> {
        let mut channel = Element::new("channel");
        channel
            .attributes
            .insert("type".to_string(), "standard".to_string());
        channel
            .children
            .push(XMLNode::Element(text_element("feedUrl", url)));
        self.create_channel(&document_to_string(&channel)?)
    }

    /// Create a new plugin channel.
    pub fn create_plugin_channel(
        &self,
        plugin_path: &str,
        plugin_params: &[(&str, &str)],
    ) -> Result<String, AwasuError> {
        let mut plugin = Element::new("pluginChannel");
        plugin
            .attributes
            .insert("path".to_string(), plugin_path.to_string());
        for (key, value) in plugin_params {
            let mut param = text_element("param", value);
            param.attributes.insert("name".to_string(), key.to_string());
            plugin.children.push(XMLNode::Element(param));
        }

        let mut channel = Element::new("channel");
        channel
            .attributes
            .insert("type".to_string(), "plugin".to_string());
        channel.children.push(XMLNode::Element(plugin));
        self.create_channel(&document_to_string(&channel)?)
    }

    /// Create a new search channel.
    ///
    /// `search_locations` recognizes `title`/`titles` and
    /// `description`/`descriptions`; when omitted the server's defaults
    /// apply.
    pub fn create_search_channel(
        &self,
        query_string: &str,
        search_locations: Option<&[&str]>,
        advanced_syntax: bool,
    ) -> Result<String, AwasuError> {
        let mut query = text_element("searchQuery", query_string);
        query.attributes.insert(
            "advancedSyntax".to_string(),
            bool_string(advanced_syntax).to_string(),
        );
        if let Some(locations) = search_locations {
            let has = |names: [&str; 2]| locations.iter().any(|loc| names.contains(loc));
            query.attributes.insert(
                "searchInTitles".to_string(),
                bool_string(has(["title", "titles"])).to_string(),
            );
            query.attributes.insert(
                "searchInDescriptions".to_string(),
                bool_string(has(["description", "descriptions"])).to_string(),
            );
        }

        let mut channel = Element::new("channel");
        channel
            .attributes
            .insert("type".to_string(), "search".to_string());
        channel.children.push(XMLNode::Element(query));
        self.create_channel(&document_to_string(&channel)?)
    }

    /// Delete the specified channels.
    ///
    /// Fails on the first channel the server could not delete.
    pub fn delete_channels(&self, ids: impl Into<Ids>) -> Result<(), AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.add_ids(Some(&ids.into()));
        let body = self.call_and_check(ApiRequest::new("channels/delete").args(args))?;
        let json = body
            .into_json()
            .ok_or(AwasuError::UnexpectedResponse("channels"))?;
        check_batch(&json, "channels", "delete", "channel")
    }

    fn channels_field(&self, endpoint: &str, ids: Option<Ids>) -> Result<Value, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.add_ids(ids.as_ref());
        let body = self.call_and_check(ApiRequest::new(endpoint).args(args))?;
        take_field(body, "channels")
    }
}
