//! Error types for the forge_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for forge_core operations
///
/// Input-validation variants are raised before any arithmetic runs, so a
/// caller never receives NaN or infinity in place of an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Intensity outside the range a formula accepts
    #[error("Invalid intensity: {0}% (must be below 100% of 1RM)")]
    InvalidIntensity(f64),

    /// Negative or otherwise unusable rep/set counts
    #[error("Invalid reps/sets: {0}")]
    InvalidReps(String),

    /// RPE that cannot be clamped (NaN or infinite)
    #[error("Invalid RPE: {0}")]
    InvalidRpe(f64),

    /// Negative or non-finite fatigue score
    #[error("Invalid fatigue score: {0}")]
    InvalidScore(f64),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
