//! Core error type shared by request validation and catalog lookups.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required request field is empty or absent.
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// Requested duration falls outside the globally allowed range.
    #[error("Duration must be between {min} and {max} seconds, got {actual}")]
    DurationOutOfRange { actual: u32, min: u32, max: u32 },

    /// Requested duration exceeds what the selected model supports.
    #[error("Model '{model_id}' supports at most {max} seconds, got {actual}")]
    DurationUnsupportedByModel {
        model_id: String,
        actual: u32,
        max: u32,
    },

    /// The referenced model id is not present in the fetched catalog.
    #[error("Unknown model: {0}")]
    UnknownModel(String),
}
