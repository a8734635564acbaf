//! The generation request and its precondition checks.
//!
//! Validation runs entirely client-side, before any network call is
//! made: a request that fails here was never submitted.

use serde::Serialize;

use crate::catalog::VideoModel;
use crate::error::CoreError;
use crate::types::{ActorId, ModelId, VoiceId};

// ---------------------------------------------------------------------------
// Duration bounds
// ---------------------------------------------------------------------------

/// Shortest clip the platform will generate, in seconds.
pub const MIN_DURATION_SECS: u32 = 3;
/// Longest clip the platform will generate, in seconds.
pub const MAX_DURATION_SECS: u32 = 10;

// ---------------------------------------------------------------------------
// Render settings
// ---------------------------------------------------------------------------

/// Rendering options forwarded verbatim to the generation provider.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSettings {
    pub quality: String,
    pub aspect_ratio: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            quality: "high".to_string(),
            aspect_ratio: "16:9".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Generation request
// ---------------------------------------------------------------------------

/// Immutable description of one video-generation job.
///
/// Serializes to the `POST /videos/generate` body. All four identifier
/// fields and the script must be non-empty and the duration within
/// [`MIN_DURATION_SECS`]..=[`MAX_DURATION_SECS`] before submission is
/// attempted -- see [`validate`].
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub script: String,
    pub model_id: ModelId,
    pub actor_id: ActorId,
    pub voice_id: VoiceId,
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    pub settings: RenderSettings,
}

impl GenerationRequest {
    /// Build a request with default render settings.
    pub fn new(
        script: impl Into<String>,
        model_id: impl Into<ModelId>,
        actor_id: impl Into<ActorId>,
        voice_id: impl Into<VoiceId>,
        duration_secs: u32,
    ) -> Self {
        Self {
            script: script.into(),
            model_id: model_id.into(),
            actor_id: actor_id.into(),
            voice_id: voice_id.into(),
            duration_secs,
            settings: RenderSettings::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check that every required field is present and the duration is within
/// the platform bounds.
pub fn validate(request: &GenerationRequest) -> Result<(), CoreError> {
    require_non_empty(&request.script, "script")?;
    require_non_empty(&request.model_id, "model_id")?;
    require_non_empty(&request.actor_id, "actor_id")?;
    require_non_empty(&request.voice_id, "voice_id")?;

    if request.duration_secs < MIN_DURATION_SECS || request.duration_secs > MAX_DURATION_SECS {
        return Err(CoreError::DurationOutOfRange {
            actual: request.duration_secs,
            min: MIN_DURATION_SECS,
            max: MAX_DURATION_SECS,
        });
    }

    Ok(())
}

/// [`validate`], plus the per-model duration ceiling from the catalog.
pub fn validate_for_model(
    request: &GenerationRequest,
    model: &VideoModel,
) -> Result<(), CoreError> {
    validate(request)?;

    if request.duration_secs > model.max_duration {
        return Err(CoreError::DurationUnsupportedByModel {
            model_id: model.id.clone(),
            actual: request.duration_secs,
            max: model.max_duration,
        });
    }

    Ok(())
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::MissingField { field })
    } else {
        Ok(())
    }
}
