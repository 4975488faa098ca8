//! Deficiency Aggregator
//!
//! Every non-pass check becomes exactly one deficiency. There is no
//! deduplication: two requirements failing on the same coverage type yield
//! two deficiencies.

use coc_types::{CheckType, Deficiency, Severity};

use super::checks::EvaluatedCheck;

/// Severity of the deficiency raised by a check of this type.
///
/// Passing kinds (`coverage_compliant`, `policy_current`, `insured_name_match`)
/// never produce deficiencies and rank lowest.
pub fn severity_for(check_type: CheckType) -> Severity {
    match check_type {
        CheckType::CoverageMissing | CheckType::LimitInsufficient | CheckType::PolicyExpired => {
            Severity::Critical
        }

        CheckType::ExcessExceeded
        | CheckType::PrincipalIndemnityMissing
        | CheckType::CrossLiabilityMissing
        | CheckType::DataUnparseable
        | CheckType::PolicyNotStarted
        | CheckType::PolicyPeriodUnknown
        | CheckType::InsuredNameMismatch
        | CheckType::MalformedRequirement
        | CheckType::ExtractionFailed => Severity::Major,

        CheckType::LowConfidenceField
        | CheckType::InsuredNameVariation
        | CheckType::MalformedCoverage
        | CheckType::CoverageCompliant
        | CheckType::PolicyCurrent
        | CheckType::InsuredNameMatch => Severity::Minor,
    }
}

/// Converts evaluated checks into deficiencies
#[derive(Debug, Clone, Copy, Default)]
pub struct DeficiencyAggregator;

impl DeficiencyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// One deficiency per failing or warning check, in check order
    pub fn aggregate(&self, checks: &[EvaluatedCheck]) -> Vec<Deficiency> {
        checks
            .iter()
            .filter(|evaluated| !evaluated.check.is_pass())
            .map(|evaluated| Deficiency {
                deficiency_type: evaluated.check.check_type,
                severity: severity_for(evaluated.check.check_type),
                description: evaluated.check.description.clone(),
                required_value: evaluated.required_value.clone(),
                actual_value: evaluated.actual_value.clone(),
                coverage_type: evaluated.check.coverage_type.clone(),
            })
            .collect()
    }
}
