//! Error handling for the COC verification engine
//!
//! Two tiers, matching how the engine is meant to be called:
//!
//! - [`InputIssue`] - data-quality problems in present input. These never
//!   propagate; the engine turns each one into a check so the verdict
//!   explains itself.
//! - [`VerificationError`] / [`ConfigError`] - caller bugs and bad
//!   configuration, returned as hard errors.

use thiserror::Error;

/// Main error type for verification runs
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Verification request has no requirements list (an empty list is allowed, a missing one is not)")]
    MissingRequirements,

    #[error("Invalid verification policy: {0}")]
    Config(#[from] ConfigError),
}

/// Policy and template configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Threshold '{name}' = {value} is out of range: {reason}")]
    ThresholdOutOfRange {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Threshold '{lower}' must not exceed '{upper}'")]
    ThresholdOrder {
        lower: &'static str,
        upper: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Data-quality problems found while evaluating present input.
///
/// Each variant maps onto a warning- or fail-level check rather than an
/// aborted run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputIssue {
    #[error("Requirement #{position} is malformed: {reason}")]
    MalformedRequirement { position: usize, reason: String },

    #[error("Extracted coverage #{position} is malformed: {reason}")]
    MalformedCoverage { position: usize, reason: String },

    #[error("No extracted data supplied; extraction step failed upstream")]
    ExtractionAbsent,

    #[error("Value '{raw}' for {field} is not a number")]
    InvalidNumericComparison { field: String, raw: String },
}

/// Result type aliases for convenience
pub type VerificationResult<T> = Result<T, VerificationError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
