//! Per-resource convenience methods
//!
//! Each method maps a friendly signature onto one `call_and_check`
//! invocation: a fixed endpoint name, an argument map, sometimes a generated
//! XML body, and a small post-processing step (unwrap a named field, or walk
//! a batch status array).

use awasu_core::ResponseBody;
use serde_json::Value;

use crate::error::AwasuError;

mod app;
mod channels;
mod reports;
mod search;
mod workpads;

pub use search::SearchOptions;

/// Unwrap a named field from a JSON response body.
pub(crate) fn take_field(body: ResponseBody, field: &'static str) -> Result<Value, AwasuError> {
    body.into_json()
        .and_then(|mut value| value.get_mut(field).map(Value::take))
        .ok_or(AwasuError::UnexpectedResponse(field))
}

/// Extract the id of a newly created entity from its `status` record.
pub(crate) fn created_id(body: ResponseBody) -> Result<String, AwasuError> {
    let status = take_field(body, "status")?;
    match status.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(AwasuError::UnexpectedResponse("status.id")),
    }
}

/// Check the per-entity status records of a batch operation.
///
/// Fails on the FIRST entry whose status is not the literal `"OK"`, naming
/// the entity and quoting the server's status text; later entries are left
/// unexamined.
pub(crate) fn check_batch(
    body: &Value,
    list_key: &'static str,
    action: &str,
    noun: &str,
) -> Result<(), AwasuError> {
    let entries = body
        .get(list_key)
        .and_then(Value::as_array)
        .ok_or(AwasuError::UnexpectedResponse(list_key))?;
    for entry in entries {
        let status = entry.get("status").and_then(Value::as_str).unwrap_or("");
        if status != "OK" {
            return Err(AwasuError::Api(format!(
                "Can't {action} {noun} \"{name}\" ({id}): {status}",
                name = text_field(entry, "name"),
                id = text_field(entry, "id"),
            )));
        }
    }
    Ok(())
}

/// A field rendered as text whether the server sent a string or a number.
fn text_field(value: &Value, field: &str) -> String {
    match value.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
