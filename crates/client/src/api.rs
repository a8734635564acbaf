//! REST API client for the Adreel backend endpoints.
//!
//! Wraps the backend HTTP API (authentication, catalog browsing, job
//! creation, status polling, result retrieval) using [`reqwest`]. Every
//! response uses the backend's `{ success, data, message }` envelope;
//! a `success: false` body is surfaced as [`ApiError::Rejected`] with
//! the remote message.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use adreel_core::catalog::{Actor, VideoModel, VideoResult, Voice};
use adreel_core::request::GenerationRequest;
use adreel_core::status::RemoteStatus;
use adreel_core::types::JobId;

use crate::config::ClientConfig;
use crate::token::TokenStore;

/// HTTP client for one backend deployment.
///
/// Cheap to share behind an `Arc`; the underlying [`reqwest::Client`]
/// pools connections across all calls.
pub struct BackendApi {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

/// Errors from the backend API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered but the body was not the expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend reported a failure through the response envelope.
    #[error("{message}")]
    Rejected { message: String },

    /// Non-2xx response without a parseable envelope.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ApiError {
    /// The remote-supplied message when there is one, otherwise a
    /// generic description of the transport failure.
    pub fn remote_message(&self) -> String {
        match self {
            Self::Rejected { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// The backend's uniform response wrapper.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default = "Option::default")]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

/// Structured error object some endpoints return instead of `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    #[allow(dead_code)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl<T> Envelope<T> {
    fn failure_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.as_ref().and_then(|e| e.message.clone()))
            .unwrap_or_else(|| "Request rejected by the backend".to_string())
    }

    fn into_data(self) -> Result<T, ApiError> {
        if self.success {
            match self.data {
                Some(data) => Ok(data),
                None => Err(ApiError::Rejected {
                    message: "Response envelope is missing its data field".to_string(),
                }),
            }
        } else {
            Err(ApiError::Rejected {
                message: self.failure_message(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint payloads
// ---------------------------------------------------------------------------

/// `data` payload of `GET /videos/models`.
#[derive(Debug, Deserialize)]
struct ModelsData {
    models: Vec<VideoModel>,
}

/// `data` payload of `GET /actors`.
#[derive(Debug, Deserialize)]
struct ActorsData {
    actors: Vec<Actor>,
}

/// `data` payload of `GET /voices`.
#[derive(Debug, Deserialize)]
struct VoicesData {
    voices: Vec<Voice>,
}

/// `data` payload of `GET /users/credits`.
#[derive(Debug, Deserialize)]
struct CreditsData {
    credits: i64,
}

/// Response to `POST /videos/generate`: the job was accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedJob {
    /// Server-assigned identifier for the new job.
    pub video_id: JobId,
    /// Initial remote status, when reported.
    #[serde(default)]
    pub status: Option<RemoteStatus>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One `GET /videos/{id}/status` observation.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatus {
    pub status: RemoteStatus,
    /// Completion percentage (0-100), when reported.
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Authenticated user profile returned by the auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Remaining credit balance, when the endpoint includes it.
    #[serde(default)]
    pub credits: Option<i64>,
}

/// `data` payload of the login/register endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, serde::Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Fields for `POST /auth/register`.
#[derive(Debug, serde::Serialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl BackendApi {
    /// Create an API client for the configured backend, attaching the
    /// given token store to every request.
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Token store shared with this client.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    // ---- auth ----

    /// Log in and persist the issued bearer token in the store.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(&LoginBody { email, password })
            .send()
            .await?;

        let session: AuthSession = Self::parse_response(response).await?;
        self.tokens.set(session.token.clone());
        tracing::info!(user = %session.user.email, "Logged in");
        Ok(session)
    }

    /// Register a new account and persist its bearer token.
    pub async fn register(&self, account: &NewAccount) -> Result<AuthSession, ApiError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/register")
            .json(account)
            .send()
            .await?;

        let session: AuthSession = Self::parse_response(response).await?;
        self.tokens.set(session.token.clone());
        Ok(session)
    }

    /// End the session. The token is cleared once the backend accepts
    /// the logout.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/logout")
            .send()
            .await?;

        Self::check_status(response).await?;
        self.tokens.clear();
        Ok(())
    }

    // ---- catalog ----

    /// Fetch the video-generation model catalog.
    pub async fn models(&self) -> Result<Vec<VideoModel>, ApiError> {
        let response = self
            .request(reqwest::Method::GET, "/videos/models")
            .send()
            .await?;
        let data: ModelsData = Self::parse_response(response).await?;
        Ok(data.models)
    }

    /// Fetch the AI actor library.
    pub async fn actors(&self) -> Result<Vec<Actor>, ApiError> {
        let response = self.request(reqwest::Method::GET, "/actors").send().await?;
        let data: ActorsData = Self::parse_response(response).await?;
        Ok(data.actors)
    }

    /// Fetch the voice library.
    pub async fn voices(&self) -> Result<Vec<Voice>, ApiError> {
        let response = self.request(reqwest::Method::GET, "/voices").send().await?;
        let data: VoicesData = Self::parse_response(response).await?;
        Ok(data.voices)
    }

    /// Fetch the caller's remaining credit balance.
    pub async fn credits(&self) -> Result<i64, ApiError> {
        let response = self
            .request(reqwest::Method::GET, "/users/credits")
            .send()
            .await?;
        let data: CreditsData = Self::parse_response(response).await?;
        Ok(data.credits)
    }

    // ---- generation ----

    /// Submit a generation request. One outbound call, no retry.
    pub async fn generate_video(
        &self,
        request: &GenerationRequest,
    ) -> Result<CreatedJob, ApiError> {
        let response = self
            .request(reqwest::Method::POST, "/videos/generate")
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Poll the status of a job.
    pub async fn video_status(&self, job_id: &str) -> Result<JobStatus, ApiError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/videos/{job_id}/status"),
            )
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the terminal payload of a completed job.
    pub async fn video_result(&self, job_id: &str) -> Result<VideoResult, ApiError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/videos/{job_id}"))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Start a request builder for `path`, attaching the bearer token
    /// when a session is active.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.tokens.get() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Read the body and decode the response envelope. Non-2xx
    /// responses still carry an envelope on this backend, so the remote
    /// message is preserved when present.
    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(&body) {
                if !envelope.success {
                    return Err(ApiError::Rejected {
                        message: envelope.failure_message(),
                    });
                }
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Unwrap the envelope and extract its `data` payload.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        Self::read_envelope(response).await?.into_data()
    }

    /// Unwrap an envelope that carries no interesting `data` payload
    /// (e.g. logout).
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        let envelope: Envelope<serde_json::Value> = Self::read_envelope(response).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                message: envelope.failure_message(),
            })
        }
    }
}
