//! Request and response bodies of the `/api` endpoints.

use crate::error::ServiceError;
use checktable_model::Row;
use serde::Serialize;
use serde_json::Value;

/// Error body for every failed API request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of a successful `PATCH /api/rows/{row_id}/columns/{column_key}`.
#[derive(Debug, Serialize)]
pub struct UpdateCellResponse {
    pub success: bool,
    pub row: Row,
}

/// Extracts `value` from an update request body.
///
/// An empty body, a body that is not a JSON object, a missing `value` and a
/// `null` value all mean the empty string. Invalid JSON and a `value` of any
/// other non-string type are rejected.
pub fn parse_update_value(body: &[u8]) -> Result<String, ServiceError> {
    if body.is_empty() {
        return Ok(String::new());
    }

    let payload: Value = serde_json::from_slice(body)
        .map_err(|_| ServiceError::MalformedRequest("Invalid JSON in request body".to_owned()))?;

    match payload.get("value") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ServiceError::MalformedRequest(
            "Field `value` must be a string".to_owned(),
        )),
    }
}
