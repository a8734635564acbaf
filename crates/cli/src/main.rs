//! One-shot generation runner.
//!
//! Reads the request from `ADREEL_*` environment variables (a `.env`
//! file works), prices it against the live model catalog, submits it,
//! and streams job state changes to the log until the job is terminal.
//! Exits 0 only when the video completed.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adreel_client::api::BackendApi;
use adreel_client::config::ClientConfig;
use adreel_client::job::JobClient;
use adreel_client::token::TokenStore;
use adreel_core::status::JobState;
use adreel_core::{catalog, credits, request};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adreel=info,adreel_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(JobState::Completed(result)) => {
            tracing::info!(video_url = %result.video_url, "Video ready");
            ExitCode::SUCCESS
        }
        Ok(other) => {
            tracing::error!(outcome = other.label(), "Generation did not complete");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = format!("{e:#}"), "Run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<JobState> {
    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Loaded client configuration");

    let tokens = TokenStore::new();
    let api = Arc::new(BackendApi::new(&config, tokens.clone()));

    // Log in when credentials are configured; anonymous runs are fine
    // against development backends.
    if let (Ok(email), Ok(password)) = (
        std::env::var("ADREEL_EMAIL"),
        std::env::var("ADREEL_PASSWORD"),
    ) {
        api.login(&email, &password).await?;
    }

    let generation_request = request_from_env()?;

    let models = api.models().await?;
    let model = catalog::find_model(&models, &generation_request.model_id)
        .with_context(|| format!("unknown model '{}'", generation_request.model_id))?;
    request::validate_for_model(&generation_request, model)?;

    let estimate = credits::estimate_for_model(&generation_request, model);
    tracing::info!(
        model = %model.name,
        duration_secs = generation_request.duration_secs,
        credits = estimate,
        "Estimated cost",
    );

    if tokens.get().is_some() {
        match api.credits().await {
            Ok(balance) => tracing::info!(balance, "Credit balance"),
            Err(e) => tracing::warn!(error = %e, "Could not fetch credit balance"),
        }
    }

    let client = JobClient::with_poll_config(Arc::clone(&api), config.poll);
    let handle = client.submit(generation_request).await?;
    tracing::info!(job_id = handle.job_id(), "Job submitted, watching progress");

    let mut updates = handle.subscribe();
    loop {
        let current = updates.borrow_and_update().clone();
        match &current {
            JobState::Queued => tracing::info!("Queued"),
            JobState::Processing { message } => {
                tracing::info!(detail = message.as_deref().unwrap_or("generating"), "Processing")
            }
            JobState::Failed { reason } => {
                tracing::error!(reason = reason.message(), "Generation failed")
            }
            JobState::TimedOut => tracing::error!("Generation timed out"),
            JobState::Cancelled => tracing::warn!("Generation cancelled"),
            JobState::Completed(_) => {}
        }
        if current.is_terminal() {
            return Ok(current);
        }
        if updates.changed().await.is_err() {
            return Ok(updates.borrow().clone());
        }
    }
}

/// Assemble the generation request from `ADREEL_*` environment variables.
fn request_from_env() -> anyhow::Result<request::GenerationRequest> {
    let script = required_env("ADREEL_SCRIPT")?;
    let model_id = required_env("ADREEL_MODEL")?;
    let actor_id = required_env("ADREEL_ACTOR")?;
    let voice_id = required_env("ADREEL_VOICE")?;
    let duration_secs = std::env::var("ADREEL_DURATION")
        .unwrap_or_else(|_| "8".into())
        .parse()
        .context("ADREEL_DURATION must be a whole number of seconds")?;

    Ok(request::GenerationRequest::new(
        script,
        model_id,
        actor_id,
        voice_id,
        duration_secs,
    ))
}

fn required_env(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("{key} must be set"))
}
