//! Mock JSON API for integration tests
//!
//! Serves a fixed set of endpoints covering every response shape the
//! decoder distinguishes

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Mock API server bound to a random local port
pub struct MockApi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockApiState>,
}

struct MockApiState {
    request_count: AtomicU32,
    slow_started: AtomicU32,
    slow_finished: AtomicU32,
}

impl MockApi {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockApiState {
            request_count: AtomicU32::new(0),
            slow_started: AtomicU32::new(0),
            slow_finished: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/users", routing::post(handle_create_user))
            .route("/users/{id}", routing::get(handle_get_user).delete(handle_delete_user))
            .route("/created", routing::get(handle_created).post(handle_created_empty))
            .route("/reset", routing::get(handle_reset))
            .route("/profile", routing::get(handle_profile))
            .route("/broken", routing::get(handle_broken))
            .route("/malformed", routing::get(handle_malformed))
            .route("/gateway", routing::get(handle_gateway))
            .route("/slow", routing::get(handle_slow))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Absolute URL for a path on the mock
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Total requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// Requests to `/slow` that have started
    pub fn slow_started(&self) -> u32 {
        self.state.slow_started.load(Ordering::SeqCst)
    }

    /// Requests to `/slow` that ran to completion
    pub fn slow_finished(&self) -> u32 {
        self.state.slow_finished.load(Ordering::SeqCst)
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl MockApiState {
    fn record(&self) {
        self.request_count.fetch_add(1, Ordering::SeqCst);
    }
}

async fn handle_get_user(State(state): State<Arc<MockApiState>>, Path(id): Path<u64>) -> Response {
    state.record();

    if id == 7 {
        Json(json!({ "id": 7, "name": "x" })).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "statusCode": 404, "message": "user not found", "error": "not_found" })),
        )
            .into_response()
    }
}

async fn handle_create_user(State(state): State<Arc<MockApiState>>) -> Response {
    state.record();

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "statusCode": 422, "message": "invalid", "error": "bad_input" })),
    )
        .into_response()
}

async fn handle_delete_user(State(state): State<Arc<MockApiState>>) -> StatusCode {
    state.record();
    StatusCode::NO_CONTENT
}

async fn handle_created(State(state): State<Arc<MockApiState>>) -> Response {
    state.record();
    (StatusCode::CREATED, Json(json!({ "id": 8, "name": "y" }))).into_response()
}

async fn handle_created_empty(State(state): State<Arc<MockApiState>>) -> StatusCode {
    state.record();
    StatusCode::CREATED
}

async fn handle_reset(State(state): State<Arc<MockApiState>>) -> StatusCode {
    state.record();
    StatusCode::RESET_CONTENT
}

async fn handle_profile(State(state): State<Arc<MockApiState>>) -> Response {
    state.record();

    Json(json!({
        "displayName": "ada",
        "linkedAccounts": [{ "accountId": 1 }, { "accountId": 2 }],
    }))
    .into_response()
}

async fn handle_broken(State(state): State<Arc<MockApiState>>) -> Response {
    state.record();
    (StatusCode::INTERNAL_SERVER_ERROR, "not json").into_response()
}

async fn handle_malformed(State(state): State<Arc<MockApiState>>) -> Response {
    state.record();
    Json(json!({ "unexpected": true })).into_response()
}

async fn handle_gateway(State(state): State<Arc<MockApiState>>) -> Response {
    state.record();
    (StatusCode::BAD_GATEWAY, "<html><body>bad gateway</body></html>").into_response()
}

async fn handle_slow(State(state): State<Arc<MockApiState>>) -> Response {
    state.record();
    state.slow_started.fetch_add(1, Ordering::SeqCst);

    tokio::time::sleep(Duration::from_secs(5)).await;

    state.slow_finished.fetch_add(1, Ordering::SeqCst);
    Json(json!({})).into_response()
}
