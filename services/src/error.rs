//! Errors surfaced by the `/api` endpoints.
//!
//! Every failure is converted to a status code plus `{ "error": "<message>" }`
//! at the handler boundary; nothing here panics or aborts the process.

use crate::storage::StoreError;
use crate::types::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use checktable_model::TableError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Unknown row or column.
    #[error("{0}")]
    NotFound(String),

    /// Attempt to mutate a column that is not a checkbox.
    #[error("{0}")]
    InvalidOperation(String),

    /// The request body could not be understood.
    #[error("{0}")]
    MalformedRequest(String),

    /// The backing store is missing, unreadable or corrupt.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidOperation(_) | ServiceError::MalformedRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Storage details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ServiceError::Storage(_) => "Failed to access table data".to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<TableError> for ServiceError {
    fn from(error: TableError) -> Self {
        match error {
            TableError::ColumnNotFound(_) | TableError::RowNotFound(_) => {
                ServiceError::NotFound(error.to_string())
            }
            TableError::NotCheckbox(_)
            | TableError::DuplicateColumnKey(_)
            | TableError::DuplicateRowId(_) => ServiceError::InvalidOperation(error.to_string()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let ServiceError::Storage(e) = &self {
            tracing::error!(error = %e, "Table storage failure");
        }
        (self.status(), Json(ErrorResponse::new(self.public_message()))).into_response()
    }
}
