//! The generation job client: submit a request, then drive the job to a
//! terminal state without blocking the caller.
//!
//! [`JobClient::submit`] validates the request, issues one job-creation
//! call, and spawns a poll task that owns the job's state from then on.
//! The task polls the status endpoint on a fixed interval, racing two
//! independent terminators: a wall-clock watchdog deadline fixed at
//! submission, and a cooperative cancellation token held by the
//! [`JobHandle`]. Whichever produces a terminal state first wins; the
//! task commits exactly one terminal state and exits, so no late timer
//! or stale response can overwrite it.
//!
//! Nothing here retries. A submission failure, a failed status check,
//! or a timeout all end the job; retrying means calling
//! [`JobClient::submit`] again for a fresh job with its own state.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use adreel_core::error::CoreError;
use adreel_core::request::{self, GenerationRequest};
use adreel_core::status::{FailureReason, JobState, RemoteStatus};
use adreel_core::types::JobId;

use crate::api::BackendApi;
use crate::config::PollConfig;

/// Errors that prevent a job from being created at all.
///
/// Terminal outcomes of a *running* job (failed, timed-out, cancelled)
/// are [`JobState`]s, not errors -- they are observed through the
/// [`JobHandle`].
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// The request failed client-side validation. No network call was
    /// made; fix the request and submit again.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The backend rejected the submission or was unreachable. The
    /// message is the remote one when present.
    #[error("Failed to start video generation: {message}")]
    Submission { message: String },
}

/// Submits generation requests and spawns one poll task per job.
pub struct JobClient {
    api: Arc<BackendApi>,
    poll: PollConfig,
}

/// Caller-side handle to one running generation job.
///
/// Dropping the handle detaches from the job without cancelling it; the
/// poll task still terminates on its own at the watchdog deadline at the
/// latest. Call [`cancel`](Self::cancel) to stop the job early.
#[derive(Debug)]
pub struct JobHandle {
    job_id: JobId,
    state: watch::Receiver<JobState>,
    cancel: CancellationToken,
}

impl JobClient {
    /// Create a client with the default poll timing (3 s interval,
    /// 10 min watchdog).
    pub fn new(api: Arc<BackendApi>) -> Self {
        Self::with_poll_config(api, PollConfig::default())
    }

    /// Create a client with explicit poll timing.
    pub fn with_poll_config(api: Arc<BackendApi>, poll: PollConfig) -> Self {
        Self { api, poll }
    }

    /// Submit a generation request and start driving the new job.
    ///
    /// Validates client-side first -- an invalid request fails with
    /// [`JobError::Validation`] and performs no network call. On
    /// success, the returned handle already tracks a live job; the
    /// first status poll fires one poll interval after submission.
    pub async fn submit(&self, request: GenerationRequest) -> Result<JobHandle, JobError> {
        request::validate(&request)?;

        // Client-side reference for correlating logs across submissions.
        let reference = uuid::Uuid::new_v4();

        let created = self
            .api
            .generate_video(&request)
            .await
            .map_err(|e| JobError::Submission {
                message: e.remote_message(),
            })?;

        let job_id = created.video_id;
        // The watchdog measures from submission, not from the first poll.
        let deadline = Instant::now() + self.poll.timeout;

        tracing::info!(
            %reference,
            job_id = %job_id,
            model_id = %request.model_id,
            duration_secs = request.duration_secs,
            "Generation job submitted",
        );

        let initial = match created.status {
            Some(RemoteStatus::Processing) => JobState::Processing {
                message: created.message,
            },
            _ => JobState::Queued,
        };

        let (state_tx, state_rx) = watch::channel(initial);
        let cancel = CancellationToken::new();

        tokio::spawn(run_poll_loop(
            Arc::clone(&self.api),
            job_id.clone(),
            self.poll,
            deadline,
            state_tx,
            cancel.clone(),
        ));

        Ok(JobHandle {
            job_id,
            state: state_rx,
            cancel,
        })
    }
}

impl JobHandle {
    /// Server-assigned job identifier.
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Snapshot of the job's current state.
    pub fn state(&self) -> JobState {
        self.state.borrow().clone()
    }

    /// Watch receiver delivering state updates in arrival order.
    pub fn subscribe(&self) -> watch::Receiver<JobState> {
        self.state.clone()
    }

    /// Signal cancellation. Cooperative and idempotent: the poll task
    /// stops issuing requests once it observes the flag, and an
    /// in-flight response is discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait until the job reaches a terminal state and return it.
    pub async fn wait(mut self) -> JobState {
        loop {
            let current = self.state.borrow_and_update().clone();
            if current.is_terminal() {
                return current;
            }
            if self.state.changed().await.is_err() {
                // Poll task gone; the last value it sent is final.
                return self.state.borrow().clone();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Poll task
// ---------------------------------------------------------------------------

/// Drive one job to a terminal state, then publish it and exit.
///
/// Sole owner of the job's lifecycle after submission: every terminal
/// transition funnels through the single `return` of
/// [`poll_until_terminal`], which is what makes the watchdog/poll race
/// safe without any shared terminal flag.
async fn run_poll_loop(
    api: Arc<BackendApi>,
    job_id: JobId,
    poll: PollConfig,
    deadline: Instant,
    state_tx: watch::Sender<JobState>,
    cancel: CancellationToken,
) {
    let terminal = poll_until_terminal(&api, &job_id, &poll, deadline, &state_tx, &cancel).await;

    tracing::info!(
        job_id = %job_id,
        outcome = terminal.label(),
        "Generation job reached terminal state",
    );

    // Receivers may already be gone; the job is over either way.
    let _ = state_tx.send(terminal);
}

async fn poll_until_terminal(
    api: &BackendApi,
    job_id: &str,
    poll: &PollConfig,
    deadline: Instant,
    state_tx: &watch::Sender<JobState>,
    cancel: &CancellationToken,
) -> JobState {
    // First tick one full interval after submission; Delay keeps polls
    // from bunching up when a round-trip overruns the interval.
    let mut ticker =
        tokio::time::interval_at(Instant::now() + poll.poll_interval, poll.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // Wait out the interval, unless the watchdog or the caller ends
        // the job first.
        tokio::select! {
            _ = cancel.cancelled() => return JobState::Cancelled,
            _ = tokio::time::sleep_until(deadline) => return JobState::TimedOut,
            _ = ticker.tick() => {}
        }

        // One status round-trip, still racing both terminators: a poll
        // in flight when the deadline passes loses to the watchdog.
        let observed = tokio::select! {
            _ = cancel.cancelled() => return JobState::Cancelled,
            _ = tokio::time::sleep_until(deadline) => return JobState::TimedOut,
            result = api.video_status(job_id) => result,
        };

        let status = match observed {
            Ok(status) => status,
            Err(e) => {
                // A failed status check is terminal; the next attempt
                // would belong to a fresh submission.
                return JobState::Failed {
                    reason: FailureReason::StatusCheck {
                        message: e.remote_message(),
                    },
                };
            }
        };

        tracing::debug!(
            job_id = %job_id,
            status = ?status.status,
            progress = status.progress,
            "Poll observed status",
        );

        match status.status {
            RemoteStatus::Queued => {
                let _ = state_tx.send(JobState::Queued);
            }
            RemoteStatus::Processing => {
                let _ = state_tx.send(JobState::Processing {
                    message: status.message,
                });
            }
            RemoteStatus::Failed => {
                return JobState::Failed {
                    reason: FailureReason::Remote {
                        message: status
                            .message
                            .unwrap_or_else(|| "Video generation failed".to_string()),
                    },
                };
            }
            RemoteStatus::Completed => {
                // The job is already terminal remotely, so the result
                // fetch is allowed to finish even past the deadline;
                // only cancellation can still discard the payload.
                let result = api.video_result(job_id).await;
                if cancel.is_cancelled() {
                    return JobState::Cancelled;
                }
                return match result {
                    Ok(payload) => JobState::Completed(payload),
                    Err(e) => JobState::Failed {
                        reason: FailureReason::StatusCheck {
                            message: e.remote_message(),
                        },
                    },
                };
            }
        }
    }
}
