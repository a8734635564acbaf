//! Shared test fixture: an in-process stub of the Adreel backend.
//!
//! The stub serves the real wire contract (envelope, endpoint paths)
//! with scripted status sequences and per-endpoint call counters, so
//! integration tests can assert exactly how many requests the job
//! client issued and when it stopped issuing them.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use adreel_client::api::BackendApi;
use adreel_client::config::{ClientConfig, PollConfig};
use adreel_client::job::JobClient;
use adreel_client::token::TokenStore;

/// Scripted backend state shared between handlers and the test body.
pub struct StubState {
    /// Status strings returned by successive status polls; the last
    /// entry repeats once the script runs out.
    status_script: Vec<&'static str>,
    status_cursor: AtomicUsize,
    /// When set, `POST /videos/generate` answers 500 with a rejection
    /// envelope.
    reject_generate: bool,
    /// When set, `GET /videos/{id}/status` answers 500 with a plain
    /// body (no envelope).
    break_status: bool,

    pub generate_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub result_calls: AtomicUsize,
    /// Last `Authorization` header seen on any request.
    pub last_authorization: Mutex<Option<String>>,
}

impl StubState {
    /// Backend that reports the given status sequence.
    pub fn scripted(script: &[&'static str]) -> Arc<Self> {
        Arc::new(Self::unwrapped(script))
    }

    /// Backend that rejects every submission.
    pub fn rejecting_generate() -> Arc<Self> {
        let mut state = Self::unwrapped(&["processing"]);
        state.reject_generate = true;
        Arc::new(state)
    }

    /// Backend whose status endpoint is broken (500, no envelope).
    pub fn broken_status() -> Arc<Self> {
        let mut state = Self::unwrapped(&["processing"]);
        state.break_status = true;
        Arc::new(state)
    }

    fn unwrapped(script: &[&'static str]) -> Self {
        Self {
            status_script: script.to_vec(),
            status_cursor: AtomicUsize::new(0),
            reject_generate: false,
            break_status: false,
            generate_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            result_calls: AtomicUsize::new(0),
            last_authorization: Mutex::new(None),
        }
    }

    fn next_status(&self) -> &'static str {
        let cursor = self.status_cursor.fetch_add(1, Ordering::SeqCst);
        self.status_script[cursor.min(self.status_script.len() - 1)]
    }

    fn record_authorization(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        *self.last_authorization.lock().unwrap() = value;
    }
}

/// Spawn the stub on an ephemeral port and return its base URL.
pub async fn spawn_stub(state: Arc<StubState>) -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/users/credits", get(credits))
        .route("/videos/models", get(models))
        .route("/actors", get(actors))
        .route("/voices", get(voices))
        .route("/videos/generate", post(generate))
        .route("/videos/{id}/status", get(status))
        .route("/videos/{id}", get(result))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub listener");
    let addr = listener.local_addr().expect("stub has no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server died");
    });

    format!("http://{addr}")
}

/// Build a [`BackendApi`] against the stub with the given token store.
pub fn stub_api(base_url: &str, tokens: TokenStore) -> Arc<BackendApi> {
    let config = ClientConfig {
        base_url: base_url.to_string(),
        request_timeout: Duration::from_secs(2),
        poll: PollConfig::default(),
    };
    Arc::new(BackendApi::new(&config, tokens))
}

/// Build a [`JobClient`] against the stub with test-speed timers.
pub fn stub_job_client(base_url: &str, poll: PollConfig) -> JobClient {
    JobClient::with_poll_config(stub_api(base_url, TokenStore::new()), poll)
}

/// Fast poll timing for tests: 25 ms interval, 2 s watchdog.
pub fn fast_poll() -> PollConfig {
    PollConfig {
        poll_interval: Duration::from_millis(25),
        timeout: Duration::from_secs(2),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn login(Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": {
            "token": "test-token",
            "user": {
                "id": "user-1",
                "email": body["email"],
                "name": "Test User",
                "credits": 100
            }
        }
    }))
}

async fn logout() -> Json<serde_json::Value> {
    Json(json!({ "success": true }))
}

async fn credits(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    state.record_authorization(&headers);
    Json(json!({ "success": true, "data": { "credits": 42 } }))
}

async fn models() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": {
            "models": [{
                "id": "kling-1.6",
                "name": "Kling AI 1.6",
                "provider": "Kling",
                "quality_rating": 4.8,
                "credits_per_second": 1.2,
                "estimated_time": "2-3 minutes",
                "max_duration": 10,
                "resolution": ["720p", "1080p"],
                "features": ["text-to-video"],
                "description": "Latest Kling model"
            }]
        }
    }))
}

async fn actors() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": {
            "actors": [{
                "id": "actor-1",
                "name": "Maya",
                "description": "Warm and energetic",
                "gender": "female",
                "age_range": "25-34",
                "style": "casual",
                "thumbnail_url": "https://cdn.test/maya.jpg",
                "preview_video_url": null,
                "quality_rating": 4.7,
                "usage_count": 1200
            }]
        }
    }))
}

async fn voices() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "data": {
            "voices": [{
                "id": "voice-1",
                "name": "Aria",
                "description": "Clear narration voice",
                "language": "en",
                "gender": "female",
                "preview_audio_url": null,
                "quality_score": 4.5,
                "usage_count": 900
            }]
        }
    }))
}

async fn generate(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(_body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.record_authorization(&headers);
    state.generate_calls.fetch_add(1, Ordering::SeqCst);

    if state.reject_generate {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "Insufficient credits" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "video_id": uuid::Uuid::new_v4().to_string(),
                "status": "processing",
                "message": "Video generation started successfully"
            }
        })),
    )
}

async fn status(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    state.status_calls.fetch_add(1, Ordering::SeqCst);

    if state.break_status {
        return (StatusCode::INTERNAL_SERVER_ERROR, "status backend down").into_response();
    }

    let status = state.next_status();
    Json(json!({
        "success": true,
        "data": {
            "video_id": id,
            "status": status,
            "progress": 50,
            "message": format!("Status: {status}")
        }
    }))
    .into_response()
}

async fn result(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    state.result_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "success": true,
        "data": {
            "video_id": id,
            "status": "completed",
            "video_url": format!("https://cdn.test/{id}.mp4"),
            "thumbnail_url": format!("https://cdn.test/{id}.jpg"),
            "duration": 5,
            "resolution": "1080p",
            "file_size": "15.2 MB",
            "created_at": "2025-07-01T12:00:00Z",
            "metadata": { "model_used": "kling-1.6" }
        }
    }))
}
