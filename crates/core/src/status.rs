//! Job status types: the remote wire enum and the local presentation
//! state machine.
//!
//! Per job the local lifecycle is
//! `Queued -> Processing -> {Completed | Failed | TimedOut | Cancelled}`
//! (submission itself is the in-flight `submit` call; a failed submission
//! never produces a job). All four right-hand states are absorbing: once a
//! job is terminal no further transitions occur and no further network
//! calls are made for it.

use serde::{Deserialize, Serialize};

use crate::catalog::VideoResult;

// ---------------------------------------------------------------------------
// Remote status
// ---------------------------------------------------------------------------

/// Status strings reported by the backend's status endpoint.
///
/// Anything outside these four is a contract violation and is treated
/// as a failed status check by the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl RemoteStatus {
    /// Whether the remote service considers the job finished.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

// ---------------------------------------------------------------------------
// Failure reasons
// ---------------------------------------------------------------------------

/// Why a job ended in [`JobState::Failed`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FailureReason {
    /// The backend reported the generation itself failed.
    Remote { message: String },
    /// A status or result request could not be completed or decoded.
    /// The job may still be running remotely, but the workflow stops;
    /// a retry is a fresh submission.
    StatusCheck { message: String },
}

impl FailureReason {
    /// Human-readable description for display.
    pub fn message(&self) -> &str {
        match self {
            Self::Remote { message } | Self::StatusCheck { message } => message,
        }
    }
}

// ---------------------------------------------------------------------------
// Local job state
// ---------------------------------------------------------------------------

/// Presentation state of one generation job, as observed by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JobState {
    /// Submission accepted, no status observed yet.
    Queued,
    /// The backend is generating; `message` is its progress text, if any.
    Processing { message: Option<String> },
    /// Terminal: generation finished and the result payload was fetched.
    Completed(VideoResult),
    /// Terminal: the generation or a status check failed.
    Failed { reason: FailureReason },
    /// Terminal: no terminal status arrived within the watchdog deadline.
    TimedOut,
    /// Terminal: the caller cancelled the job.
    Cancelled,
}

impl JobState {
    /// Whether this state is absorbing (no further transitions or
    /// network activity for the job).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed(_) | Self::Failed { .. } | Self::TimedOut | Self::Cancelled
        )
    }

    /// Short lowercase label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing { .. } => "processing",
            Self::Completed(_) => "completed",
            Self::Failed { .. } => "failed",
            Self::TimedOut => "timed-out",
            Self::Cancelled => "cancelled",
        }
    }
}
