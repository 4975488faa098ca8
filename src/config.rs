//! Verification policy: the thresholds every decision in the engine reads.
//!
//! Loaded once by the caller (defaults, environment, or a YAML file) and
//! passed into the [`Verifier`](crate::verification::Verifier). Nothing else
//! in the crate carries a threshold literal.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ConfigResult};

/// Field confidence (0-100) below which a passing check is downgraded to a warning
pub const LOW_FIELD_CONFIDENCE: f64 = 60.0;

/// Overall extraction confidence (0-1) below which the gate forces review
pub const MIN_EXTRACTION_CONFIDENCE: f64 = 0.6;

/// Fraud risk score treated as high risk when the extractor reports no level
pub const FRAUD_HIGH_RISK_SCORE: f64 = 70.0;

/// Fraud risk score treated as medium risk when the extractor reports no level
pub const FRAUD_MEDIUM_RISK_SCORE: f64 = 40.0;

/// Jaro-Winkler similarity at which a differing insured name counts as a variation
pub const NAME_SIMILARITY: f64 = 0.92;

/// Confidence percentage shown as "high" in the UI
pub const HIGH_CONFIDENCE_BAND: f64 = 80.0;

/// Confidence percentage shown as "medium" in the UI
pub const MEDIUM_CONFIDENCE_BAND: f64 = 60.0;

/// Decision thresholds for a verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationPolicy {
    pub low_field_confidence: f64,
    pub min_extraction_confidence: f64,
    pub fraud_high_risk_score: f64,
    pub fraud_medium_risk_score: f64,
    pub name_similarity: f64,
    pub high_confidence_band: f64,
    pub medium_confidence_band: f64,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            low_field_confidence: LOW_FIELD_CONFIDENCE,
            min_extraction_confidence: MIN_EXTRACTION_CONFIDENCE,
            fraud_high_risk_score: FRAUD_HIGH_RISK_SCORE,
            fraud_medium_risk_score: FRAUD_MEDIUM_RISK_SCORE,
            name_similarity: NAME_SIMILARITY,
            high_confidence_band: HIGH_CONFIDENCE_BAND,
            medium_confidence_band: MEDIUM_CONFIDENCE_BAND,
        }
    }
}

impl VerificationPolicy {
    /// Defaults overridden by `COC_*` environment variables.
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            low_field_confidence: env_f64("COC_LOW_FIELD_CONFIDENCE", defaults.low_field_confidence),
            min_extraction_confidence: env_f64(
                "COC_MIN_EXTRACTION_CONFIDENCE",
                defaults.min_extraction_confidence,
            ),
            fraud_high_risk_score: env_f64(
                "COC_FRAUD_HIGH_RISK_SCORE",
                defaults.fraud_high_risk_score,
            ),
            fraud_medium_risk_score: env_f64(
                "COC_FRAUD_MEDIUM_RISK_SCORE",
                defaults.fraud_medium_risk_score,
            ),
            name_similarity: env_f64("COC_NAME_SIMILARITY", defaults.name_similarity),
            high_confidence_band: env_f64("COC_HIGH_CONFIDENCE_BAND", defaults.high_confidence_band),
            medium_confidence_band: env_f64(
                "COC_MEDIUM_CONFIDENCE_BAND",
                defaults.medium_confidence_band,
            ),
        }
    }

    /// Parse a policy from YAML; omitted keys keep their defaults
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let policy: Self = serde_yaml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Reject thresholds outside their scales
    pub fn validate(&self) -> ConfigResult<()> {
        percent("low_field_confidence", self.low_field_confidence)?;
        percent("fraud_high_risk_score", self.fraud_high_risk_score)?;
        percent("fraud_medium_risk_score", self.fraud_medium_risk_score)?;
        percent("high_confidence_band", self.high_confidence_band)?;
        percent("medium_confidence_band", self.medium_confidence_band)?;
        unit("min_extraction_confidence", self.min_extraction_confidence)?;
        unit("name_similarity", self.name_similarity)?;

        if self.fraud_medium_risk_score > self.fraud_high_risk_score {
            return Err(ConfigError::ThresholdOrder {
                lower: "fraud_medium_risk_score",
                upper: "fraud_high_risk_score",
            });
        }
        if self.medium_confidence_band > self.high_confidence_band {
            return Err(ConfigError::ThresholdOrder {
                lower: "medium_confidence_band",
                upper: "high_confidence_band",
            });
        }
        Ok(())
    }
}

fn percent(name: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange {
            name,
            value,
            reason: "expected 0-100",
        })
    }
}

fn unit(name: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange {
            name,
            value,
            reason: "expected 0.0-1.0",
        })
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}: not a number, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
