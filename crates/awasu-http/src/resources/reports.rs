//! Channel report operations.

use awasu_core::{bool_string, document_to_string, text_element, ApiArgs, Ids};
use serde_json::Value;
use xmltree::{Element, XMLNode};

use super::{check_batch, created_id, take_field};
use crate::client::{ApiRequest, AwasuClient};
use crate::error::AwasuError;

impl AwasuClient {
    /// Get the configuration details for the specified reports (all of them
    /// when `ids` is `None`).
    pub fn reports(&self, ids: Option<Ids>, verbose: bool) -> Result<Value, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.set("verbose", verbose);
        args.add_ids(ids.as_ref());
        let body = self.call_and_check(ApiRequest::new("reports/list").args(args))?;
        take_field(body, "channelReports")
    }

    /// Run the specified reports.
    ///
    /// Fails on the first report the server could not run.
    pub fn run_reports(&self, ids: impl Into<Ids>) -> Result<(), AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.add_ids(Some(&ids.into()));
        let body = self.call_and_check(ApiRequest::new("reports/run").args(args))?;
        let json = body
            .into_json()
            .ok_or(AwasuError::UnexpectedResponse("channelReports"))?;
        check_batch(&json, "channelReports", "run", "report")
    }

    /// Run a single report and return the generated HTML.
    pub fn report(&self, id: impl Into<Ids>) -> Result<String, AwasuError> {
        let id = match id.into() {
            Ids::One(id) => id,
            Ids::Many(_) => {
                return Err(AwasuError::InvalidInput(
                    "Can't get multiple reports.".to_string(),
                ))
            }
        };
        let mut args = ApiArgs::new();
        args.set("id", id);
        args.set("format", "html");
        let body = self.call_and_check(ApiRequest::new("reports/get").args(args))?;
        body.into_raw()
            .ok_or(AwasuError::UnexpectedResponse("html report"))
    }

    /// Create a new report from a pre-built `<channelReport>` definition and
    /// return its id.
    pub fn create_report(&self, post_data: &str) -> Result<String, AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        let body =
            self.call_and_check(ApiRequest::new("reports/create").args(args).body(post_data))?;
        created_id(body)
    }

    /// Create a new report based on a channel filter.
    pub fn create_channel_filter_report(
        &self,
        report_name: &str,
        channel_filter_name: &str,
        description: Option<&str>,
    ) -> Result<String, AwasuError> {
        let mut data_source = Element::new("dataSource");
        data_source
            .attributes
            .insert("type".to_string(), "channelFilter".to_string());
        data_source.children.push(XMLNode::Element(text_element(
            "channelFilterName",
            channel_filter_name,
        )));
        let report = report_element(report_name, description, data_source);
        self.create_report(&document_to_string(&report)?)
    }

    /// Create a new report based on the specified channel folders.
    pub fn create_channel_folders_report(
        &self,
        report_name: &str,
        channel_folder_ids: &[&str],
        include_subfolders: bool,
        description: Option<&str>,
    ) -> Result<String, AwasuError> {
        let mut data_source = Element::new("dataSource");
        data_source
            .attributes
            .insert("type".to_string(), "channelFolders".to_string());
        data_source.attributes.insert(
            "includeSubFolders".to_string(),
            bool_string(include_subfolders).to_string(),
        );
        for folder_id in channel_folder_ids {
            let mut folder = Element::new("channelFolder");
            folder
                .attributes
                .insert("id".to_string(), folder_id.to_string());
            data_source.children.push(XMLNode::Element(folder));
        }
        let report = report_element(report_name, description, data_source);
        self.create_report(&document_to_string(&report)?)
    }

    /// Create a new report based on a workpad.
    pub fn create_workpad_report(
        &self,
        report_name: &str,
        workpad_id: &str,
        description: Option<&str>,
    ) -> Result<String, AwasuError> {
        let mut data_source = Element::new("dataSource");
        data_source
            .attributes
            .insert("type".to_string(), "workpad".to_string());
        let mut workpad = Element::new("workpad");
        workpad
            .attributes
            .insert("id".to_string(), workpad_id.to_string());
        data_source.children.push(XMLNode::Element(workpad));
        let report = report_element(report_name, description, data_source);
        self.create_report(&document_to_string(&report)?)
    }

    /// Delete the specified reports.
    ///
    /// Fails on the first report the server could not delete.
    pub fn delete_reports(&self, ids: impl Into<Ids>) -> Result<(), AwasuError> {
        let mut args = ApiArgs::new();
        args.set("format", "json");
        args.add_ids(Some(&ids.into()));
        let body = self.call_and_check(ApiRequest::new("reports/delete").args(args))?;
        let json = body
            .into_json()
            .ok_or(AwasuError::UnexpectedResponse("channelReports"))?;
        check_batch(&json, "channelReports", "delete", "report")
    }
}

/// Assemble a `<channelReport>` definition around a data source.
fn report_element(name: &str, description: Option<&str>, data_source: Element) -> Element {
    let mut report = Element::new("channelReport");
    report
        .children
        .push(XMLNode::Element(text_element("name", name)));
    report.children.push(XMLNode::Element(text_element(
        "description",
        description.unwrap_or(""),
    )));
    report.children.push(XMLNode::Element(data_source));
    report
}
