//! Presentation helpers
//!
//! Maps engine enums to display labels and tones for UIs and reports.
//! No rendering here: callers pick colours from the [`Tone`].

use coc_types::{CheckStatus, ComplianceStatus, Severity, VerificationStatus};
use serde::Serialize;

use crate::config::VerificationPolicy;

/// Visual weight of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Caution,
    Negative,
    Neutral,
}

/// Display label plus tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub label: &'static str,
    pub tone: Tone,
}

impl Presentation {
    const fn new(label: &'static str, tone: Tone) -> Self {
        Self { label, tone }
    }
}

/// Overall extraction confidence bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::Low => "low",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::High => "high",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ConfidenceBand::Low => Tone::Negative,
            ConfidenceBand::Medium => Tone::Caution,
            ConfidenceBand::High => Tone::Positive,
        }
    }
}

pub fn severity_presentation(severity: Severity) -> Presentation {
    match severity {
        Severity::Critical => Presentation::new("Critical", Tone::Negative),
        Severity::Major => Presentation::new("Major", Tone::Caution),
        Severity::Minor => Presentation::new("Minor", Tone::Neutral),
    }
}

pub fn status_presentation(status: VerificationStatus) -> Presentation {
    match status {
        VerificationStatus::Pass => Presentation::new("Compliant", Tone::Positive),
        VerificationStatus::Fail => Presentation::new("Non-compliant", Tone::Negative),
        VerificationStatus::Review => Presentation::new("Needs review", Tone::Caution),
    }
}

pub fn check_presentation(status: CheckStatus) -> Presentation {
    match status {
        CheckStatus::Pass => Presentation::new("Pass", Tone::Positive),
        CheckStatus::Warning => Presentation::new("Warning", Tone::Caution),
        CheckStatus::Fail => Presentation::new("Fail", Tone::Negative),
    }
}

pub fn compliance_presentation(status: ComplianceStatus) -> Presentation {
    match status {
        ComplianceStatus::Compliant => Presentation::new("Compliant", Tone::Positive),
        ComplianceStatus::NonCompliant => Presentation::new("Non-compliant", Tone::Negative),
        ComplianceStatus::Pending => Presentation::new("Pending", Tone::Neutral),
        ComplianceStatus::Exception => Presentation::new("Exception", Tone::Caution),
    }
}

/// Bucket a confidence score (0-100) using the default bands
pub fn confidence_band(score: u8) -> ConfidenceBand {
    confidence_band_with(score, &VerificationPolicy::default())
}

/// Bucket a confidence score (0-100) using the policy's bands
pub fn confidence_band_with(score: u8, policy: &VerificationPolicy) -> ConfidenceBand {
    let score = f64::from(score);
    if score >= policy.high_confidence_band {
        ConfidenceBand::High
    } else if score >= policy.medium_confidence_band {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::Low
    }
}
