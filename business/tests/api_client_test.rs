//! Mock server tests for the table API client.

#![cfg(not(target_arch = "wasm32"))]

use checktable_business::{
    ApiError, ClientConfig, Settlement, Status, TableSession, fetch_table, today, update_cell,
};
use checktable_model::{Column, Row, Table};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

fn sample_table() -> Table {
    Table::new(
        vec![Column::text("name", "Name"), Column::checkbox("done", "Done")],
        vec![
            Row::new("1").with_cell("name", "Alpha").with_cell("done", ""),
            Row::new("row 2").with_cell("name", "Beta").with_cell("done", "01.01.25"),
        ],
    )
}

fn api_url(server: &MockServer) -> String {
    ClientConfig::new(server.uri()).api_url()
}

#[tokio::test]
async fn test_fetch_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_table()))
        .expect(1)
        .mount(&server)
        .await;

    let table = fetch_table(&api_url(&server)).await.unwrap();
    assert_eq!(table, sample_table());
}

#[tokio::test]
async fn test_fetch_table_error_uses_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Failed to access table data" })),
        )
        .mount(&server)
        .await;

    let err = fetch_table(&api_url(&server)).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: "Failed to access table data".to_owned()
        }
    );
}

#[tokio::test]
async fn test_fetch_table_error_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetch_table(&api_url(&server)).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to load data");
}

#[tokio::test]
async fn test_fetch_table_rejects_html_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<!doctype html><title>Tasks</title>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let err = fetch_table(&api_url(&server)).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
    assert!(err.to_string().contains("text/html"), "{err}");
}

#[tokio::test]
async fn test_update_cell_sends_value_and_encodes_path() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/rows/row%202/columns/done"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "value": "02.02.25" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "row": { "id": "row 2", "name": "Beta", "done": "02.02.25" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = update_cell(&api_url(&server), "row 2", "done", "02.02.25")
        .await
        .unwrap();
    assert!(response.success);
    assert_eq!(response.row.unwrap().cell("done"), "02.02.25");
}

#[tokio::test]
async fn test_update_cell_error_messages() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/rows/1/columns/name"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Column name cannot be updated through this endpoint"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/rows/1/columns/done"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let url = api_url(&server);
    let err = update_cell(&url, "1", "name", "x").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Column name cannot be updated through this endpoint"
    );

    let err = update_cell(&url, "1", "done", "x").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to save changes");
}

#[tokio::test]
async fn test_transport_failure() {
    // nothing listens on port 1
    let url = ClientConfig::new("http://127.0.0.1:1").api_url();

    let err = fetch_table(&url).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_session_round_trip_against_mock_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_table()))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/rows/1/columns/done"))
        .respond_with(move |request: &wiremock::Request| {
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "row": { "id": "1", "name": "Alpha", "done": body["value"] }
            }))
        })
        .mount(&server)
        .await;

    let mut session = TableSession::new(ClientConfig::new(server.uri()));
    let api = session.config().api_url();

    session.begin_load();
    let loaded = fetch_table(&api).await;
    assert!(session.finish_load(loaded, false));

    let pending = session.begin_toggle("1", "done", true, today()).unwrap();
    let result = update_cell(&api, &pending.row_id, &pending.column_key, &pending.desired_value).await;
    assert_eq!(session.finish_toggle(&pending, result), Settlement::Reconciled);

    let cell = session.cell("1", "done").unwrap();
    assert!(cell.checked);
    assert!(!cell.disabled);
    assert_eq!(cell.label, pending.desired_value);
    assert_eq!(session.status(), &Status::success("Changes saved"));
    assert_eq!(
        session.table().unwrap().row("1").unwrap().cell("done"),
        pending.desired_value
    );
}
