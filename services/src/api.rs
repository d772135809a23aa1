//! Handlers for `/api/*` endpoints.

use crate::AppState;
use crate::error::ServiceError;
use crate::storage::TableStore;
use crate::types::{UpdateCellResponse, parse_update_value};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Request, State},
    http::{Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use checktable_model::Table;

/// Return the whole table.
///
/// GET /api/data
pub async fn get_table<S>(State(state): State<AppState<S>>) -> Result<Json<Table>, ServiceError>
where
    S: TableStore,
{
    let table = state.store.load().await?;
    if let Err(e) = table.validate() {
        tracing::warn!(error = %e, "Table document violates its invariants");
    }
    Ok(Json(table))
}

/// Set one checkbox cell and persist the table.
///
/// PATCH /api/rows/{row_id}/columns/{column_key}
/// Body: `{ "value": "<string>" }`
pub async fn update_cell<S>(
    State(state): State<AppState<S>>,
    Path((row_id, column_key)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<UpdateCellResponse>, ServiceError>
where
    S: TableStore,
{
    let value = parse_update_value(&body).inspect_err(|e| {
        tracing::warn!(%row_id, %column_key, error = %e, "Rejected cell update body");
    })?;

    let _writer = state.lock_writes().await;

    let mut table = state.store.load().await?;
    let row = table
        .set_checkbox_cell(&row_id, &column_key, value)
        .inspect_err(|e| tracing::warn!(%row_id, %column_key, error = %e, "Rejected cell update"))?
        .clone();
    state.store.save(&table).await?;

    tracing::info!(%row_id, %column_key, value = %row.cell(&column_key), "Cell updated");

    Ok(Json(UpdateCellResponse { success: true, row }))
}

/// Answer CORS preflight requests for `/api/*` before routing.
pub async fn cors_preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS && request.uri().path().starts_with("/api/") {
        return (
            StatusCode::NO_CONTENT,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, PATCH, OPTIONS"),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            ],
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routes;
    use crate::storage::MockTableStore;
    use axum::body::Body;
    use checktable_model::{Column, Row};
    use tower::ServiceExt;

    fn sample_table() -> Table {
        Table::new(
            vec![Column::text("name", "Name"), Column::checkbox("done", "Done")],
            vec![Row::new("1").with_cell("name", "Alpha").with_cell("done", "")],
        )
    }

    fn patch(uri: &str, body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("PATCH")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_update_cell_persists_row() {
        let store = MockTableStore::with_table(sample_table());
        let app = routes(store.clone(), Config::new_for_test());

        let response = app
            .oneshot(patch("/api/rows/1/columns/done", r#"{"value":"05.05.25"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["row"], serde_json::json!({"id":"1","name":"Alpha","done":"05.05.25"}));

        assert_eq!(store.saves(), 1);
        let saved = store.snapshot().unwrap();
        assert_eq!(saved.row("1").unwrap().cell("done"), "05.05.25");
    }

    #[tokio::test]
    async fn test_rejected_update_does_not_save() {
        let store = MockTableStore::with_table(sample_table());
        let app = routes(store.clone(), Config::new_for_test());

        for (uri, body, status) in [
            ("/api/rows/9/columns/done", r#"{"value":"x"}"#, StatusCode::NOT_FOUND),
            ("/api/rows/1/columns/nope", r#"{"value":"x"}"#, StatusCode::NOT_FOUND),
            ("/api/rows/1/columns/name", r#"{"value":"x"}"#, StatusCode::BAD_REQUEST),
            ("/api/rows/1/columns/done", r#"{"value":"#, StatusCode::BAD_REQUEST),
        ] {
            let response = app.clone().oneshot(patch(uri, body)).await.unwrap();
            assert_eq!(response.status(), status, "{uri} {body}");
            assert!(json_body(response).await["error"].is_string());
        }

        assert_eq!(store.saves(), 0);
        assert_eq!(store.snapshot(), Some(sample_table()));
    }

    #[tokio::test]
    async fn test_failed_save_is_server_error() {
        let store = MockTableStore::with_table(sample_table()).failing_saves();
        let app = routes(store.clone(), Config::new_for_test());

        let response = app
            .oneshot(patch("/api/rows/1/columns/done", r#"{"value":"05.05.25"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"],
            "Failed to access table data"
        );
        assert_eq!(store.snapshot(), Some(sample_table()));
    }
}
