use crate::config::Config;
use crate::storage::TableStore;
use axum::{
    Extension, Router,
    extract::{DefaultBodyLimit, Request},
    middleware,
    routing::{get, patch},
};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod assets;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;
pub mod types;

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 1_000_000;

/// Shared state of the table service.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    write_lock: Arc<Mutex<()>>,
}

impl<S> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Serializes load-modify-save cycles within this process.
    ///
    /// Reads do not take the lock. Writers from other processes are not
    /// covered, so on a shared file the last write still wins.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

/// Creates the router: the JSON API under `/api` and static assets for every other path.
///
/// A request to an API path with a method it does not accept is handled like
/// any unknown path.
pub fn routes<S>(store: S, config: Config) -> Router
where
    S: TableStore,
{
    let state = AppState::new(store);

    Router::new()
        .route("/api/data", get(api::get_table::<S>))
        .route(
            "/api/rows/{row_id}/columns/{column_key}",
            patch(api::update_cell::<S>),
        )
        .fallback(assets::serve_asset)
        .method_not_allowed_fallback(assets::serve_asset)
        .layer(middleware::from_fn(api::cors_preflight))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    http_request.method = ?request.method(),
                    http_request.uri = ?request.uri(),
                    http_request.version = ?request.version(),
                    http_request.user_agent = ?request.headers().get(axum::http::header::USER_AGENT),
                )
            }),
        )
        .layer(Extension(config))
        .with_state(state)
}
