//! Table service API client helpers.
//!
//! These functions perform the network IO of the client. They take the API
//! prefix (see [`crate::ClientConfig::api_url`]) and return typed results;
//! callers map them into session state.

use crate::http::{Client, HttpError, Response};
use checktable_model::{Row, Table};
use serde::{Deserialize, Serialize};

pub const LOAD_FAILED: &str = "Failed to load data";
pub const SAVE_FAILED: &str = "Failed to save changes";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx response whose body could not be understood.
    #[error("{0}")]
    Decode(String),
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        ApiError::Transport(error.message)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct UpdateCellRequest<'a> {
    value: &'a str,
}

/// Body of a successful cell update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateCellResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub row: Option<Row>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
}

/// Builds the error for a failed response, preferring the service's own message.
fn status_error(response: &Response, fallback: &str) -> ApiError {
    let message = response
        .json::<ErrorPayload>()
        .ok()
        .and_then(|payload| payload.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_owned());

    ApiError::Status {
        status: response.status,
        message,
    }
}

/// False when the response declares a media type other than JSON, e.g. an
/// HTML page served by something in front of the API.
fn declares_json(response: &Response) -> bool {
    response.header("content-type").is_none_or(|content_type| {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        essence.eq_ignore_ascii_case("application/json")
            || essence.to_ascii_lowercase().ends_with("+json")
    })
}

/// GET `/api/data`
pub async fn fetch_table(api_url: &str) -> ApiResult<Table> {
    let url = format!("{api_url}/data");

    let response = Client::get(&url)
        .header("cache-control", "no-store")
        .send()
        .await?;

    if !response.is_success() {
        log::warn!("Loading table failed with status {}", response.status);
        return Err(status_error(&response, LOAD_FAILED));
    }

    if !declares_json(&response) {
        let content_type = response.header("content-type").unwrap_or_default();
        log::warn!("Table data came back as {content_type}");
        return Err(ApiError::Decode(format!(
            "Failed to parse table: unexpected content type {content_type}"
        )));
    }

    response
        .json()
        .map_err(|e| ApiError::Decode(format!("Failed to parse table: {e}")))
}

/// PATCH `/api/rows/{row_id}/columns/{column_key}`
/// Body: `{ "value": "..." }`
///
/// A success response with an empty or unreadable body still counts as saved;
/// the returned `row` is then `None`.
pub async fn update_cell(
    api_url: &str,
    row_id: &str,
    column_key: &str,
    value: &str,
) -> ApiResult<UpdateCellResponse> {
    let url = format!(
        "{api_url}/rows/{}/columns/{}",
        urlencoding::encode(row_id),
        urlencoding::encode(column_key)
    );

    let response = Client::patch(&url)
        .json(&UpdateCellRequest { value })
        .map_err(|e| ApiError::Transport(format!("Failed to serialize request: {e}")))?
        .send()
        .await?;

    if !response.is_success() {
        log::warn!(
            "Saving {row_id}/{column_key} failed with status {}",
            response.status
        );
        return Err(status_error(&response, SAVE_FAILED));
    }

    Ok(response.json().unwrap_or_default())
}
