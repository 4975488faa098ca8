//! Certificate Verification Module
//!
//! Decides whether an uploaded Certificate of Currency satisfies a project's
//! insurance requirements. Every claim on the certificate is checked against
//! the requirement snapshot, and weak trust signals escalate to a human.
//!
//! ## Pipeline
//!
//! ```text
//! requirements + extracted data
//!     -> RequirementMatcher   (pair requirements with coverages)
//!     -> CheckEvaluator       (itemized pass / warning / fail checks)
//!     -> DeficiencyAggregator (one deficiency per non-pass check)
//!     -> ConfidenceGate       (fraud veto, confidence escalation)
//!     -> VerdictResolver      (pass / fail / review)
//! ```
//!
//! ## Severity
//!
//! | Severity | Raised by | Effect on verdict |
//! |----------|-----------|-------------------|
//! | CRITICAL | missing coverage, insufficient limit, expired policy | fail |
//! | MAJOR | excess, indemnity and cross-liability gaps, unreadable numbers | review |
//! | MINOR | low-confidence fields, small name variations | none (flagged) |

pub mod checks;
pub mod deficiency;
pub mod gate;
pub mod matcher;
pub mod names;
pub mod verdict;

// Re-exports for convenience
pub use checks::{CheckEvaluator, EvaluatedCheck};
pub use deficiency::{severity_for, DeficiencyAggregator};
pub use gate::ConfidenceGate;
pub use matcher::{normalize_coverage_type, MatchOutcome, RequirementMatch, RequirementMatcher};
pub use names::{normalize_abn, normalize_entity_name, InsuredNameMatcher, NameMatch};
pub use verdict::{verify, VerdictResolver, Verifier};
