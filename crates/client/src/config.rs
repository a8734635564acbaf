//! Client configuration loaded from environment variables.

use std::time::Duration;

/// Default status-poll spacing (3 seconds, the dashboard's cadence).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3_000;
/// Default watchdog deadline for a whole generation (10 minutes).
pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 600_000;

/// Tunable timing for the generation poll loop.
///
/// The poll interval spaces status requests; the timeout is a wall-clock
/// deadline measured from submission that forcibly terminates the job in
/// the timed-out state regardless of poll outcomes.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Delay between consecutive status polls.
    pub poll_interval: Duration,
    /// Watchdog deadline from submission.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            timeout: Duration::from_millis(DEFAULT_GENERATION_TIMEOUT_MS),
        }
    }
}

/// Connection settings for the backend API.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL including the `/api` prefix.
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Poll loop timing.
    pub poll: PollConfig,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `API_BASE_URL`          | `http://localhost:5000/api` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                        |
    /// | `POLL_INTERVAL_MS`      | `3000`                      |
    /// | `GENERATION_TIMEOUT_MS` | `600000`                    |
    pub fn from_env() -> Self {
        let base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let poll_interval_ms: u64 = std::env::var("POLL_INTERVAL_MS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_MS.to_string())
            .parse()
            .expect("POLL_INTERVAL_MS must be a valid u64");

        let generation_timeout_ms: u64 = std::env::var("GENERATION_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_GENERATION_TIMEOUT_MS.to_string())
            .parse()
            .expect("GENERATION_TIMEOUT_MS must be a valid u64");

        Self {
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            poll: PollConfig {
                poll_interval: Duration::from_millis(poll_interval_ms),
                timeout: Duration::from_millis(generation_timeout_ms),
            },
        }
    }
}
