//! Catalog entry types served by the backend: video-generation models,
//! AI actors, and voices, plus the terminal result payload of a
//! finished generation job.
//!
//! These are wire types -- the backend owns the contract; fields the
//! dashboard does not consume are left out and ignored on decode.

use serde::{Deserialize, Serialize};

use crate::types::{ActorId, ModelId, Timestamp, VoiceId};

/// A video-generation model offered by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoModel {
    pub id: ModelId,
    pub name: String,
    pub provider: String,
    /// Editorial quality score on a 0-5 scale.
    pub quality_rating: f64,
    /// Billing rate. Multiplied by the requested duration to price a job.
    pub credits_per_second: f64,
    /// Human-readable turnaround estimate (e.g. `2-3 minutes`).
    pub estimated_time: String,
    /// Longest clip this model can produce, in seconds.
    pub max_duration: u32,
    #[serde(default)]
    pub resolution: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// An AI actor available for casting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub description: Option<String>,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    pub style: Option<String>,
    pub thumbnail_url: Option<String>,
    pub preview_video_url: Option<String>,
    pub quality_rating: Option<f64>,
    #[serde(default)]
    pub usage_count: u64,
}

/// A voice available for narration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    pub id: VoiceId,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub gender: Option<String>,
    pub preview_audio_url: Option<String>,
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub usage_count: u64,
}

/// Terminal payload of a completed generation job.
///
/// `video_url` is the only field the workflow strictly depends on; the
/// rest is display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    /// Actual clip length in seconds.
    pub duration: Option<u32>,
    pub resolution: Option<String>,
    pub file_size: Option<String>,
    pub created_at: Option<Timestamp>,
    /// Free-form generation metadata echoed back by the backend.
    pub metadata: Option<serde_json::Value>,
}

/// Look up a model by id in a fetched catalog slice.
pub fn find_model<'a>(models: &'a [VideoModel], model_id: &str) -> Option<&'a VideoModel> {
    models.iter().find(|m| m.id == model_id)
}
