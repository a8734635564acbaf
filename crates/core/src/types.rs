//! Shared identifier and timestamp aliases.

/// Remote job identifier. Opaque, assigned by the backend at submission.
pub type JobId = String;

/// Video-generation model identifier (e.g. `kling-1.6`).
pub type ModelId = String;

/// AI actor identifier.
pub type ActorId = String;

/// Voice identifier.
pub type VoiceId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
