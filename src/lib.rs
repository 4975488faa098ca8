//! COC Verify - Certificate of Currency verification engine
//!
//! Decides whether a subcontractor's uploaded Certificate of Currency
//! satisfies a project's insurance requirements, and says exactly why not.
//!
//! ## Flow
//! Requirements + extracted certificate data -> itemized checks ->
//! deficiencies -> confidence/fraud gate -> verdict (pass / fail / review)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use coc_verify::{Coverage, ExtractedData, InsuranceRequirement, Verifier};
//!
//! let requirements = vec![
//!     InsuranceRequirement::new("public_liability").with_minimum_limit(10_000_000u64),
//! ];
//! let extracted = ExtractedData {
//!     coverages: vec![Coverage::new("public_liability", 20_000_000u64)],
//!     extraction_confidence: Some(0.95),
//!     ..Default::default()
//! };
//!
//! let verification = Verifier::default().verify(&requirements, Some(&extracted), Utc::now());
//! println!("{}", verification.summary());
//! ```

// Core error handling
pub mod error;

// Decision thresholds
pub mod config;

// Matching, checks, deficiencies, gate and verdict
pub mod verification;

// YAML requirement templates with inheritance
pub mod requirements;

// Subcontractor-on-project status rollup
pub mod compliance;

// Labels and tones for UIs
pub mod presentation;

// Re-export the shared vocabulary so callers need one dependency
pub use coc_types::{
    parse_policy_date, Amount, Check, CheckStatus, CheckType, ComplianceException,
    ComplianceStatus, Coverage, Deficiency, ExceptionStatus, ExtractedData, FraudAnalysis,
    GateDecision, GateOutcome, InsuranceRequirement, LimitType, RiskLevel, Severity,
    SubcontractorIdentity, Verification, VerificationRequest, VerificationStatus,
};

pub use compliance::ComplianceRollup;
pub use config::VerificationPolicy;
pub use error::{ConfigError, ConfigResult, InputIssue, VerificationError, VerificationResult};
pub use presentation::{
    confidence_band, confidence_band_with, severity_presentation, status_presentation,
    ConfidenceBand, Presentation, Tone,
};
pub use requirements::{RequirementTemplateDef, RequirementTemplateRegistry, ResolvedRequirement};
pub use verification::{verify, Verifier};
