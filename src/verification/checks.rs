//! Check Evaluator
//!
//! Turns matched requirements plus the certificate's structural fields into
//! itemized [`Check`]s. Evaluation order is fixed so identical input always
//! yields an identical check list:
//!
//! 1. one check per requirement, in requirement order
//! 2. one notice per extracted coverage that could not be read
//! 3. policy currency (always exactly one)
//! 4. insured-party match (only when the expected subcontractor is known)
//!
//! A requirement can violate several conditions at once. The most severe
//! violation becomes the check type; the rest are listed in the details.

use chrono::NaiveDate;
use coc_types::{
    Amount, Check, CheckStatus, CheckType, Coverage, ExtractedData, InsuranceRequirement,
    SubcontractorIdentity,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::deficiency::severity_for;
use super::matcher::{MatchOutcome, RequirementMatch};
use super::names::{InsuredNameMatcher, NameMatch};
use crate::config::VerificationPolicy;
use crate::error::InputIssue;

/// A check plus the evidence the deficiency aggregator needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedCheck {
    pub check: Check,
    pub required_value: Option<String>,
    pub actual_value: Option<String>,
    /// Fields used by this check whose extraction confidence was below threshold
    pub low_confidence_fields: Vec<String>,
}

impl EvaluatedCheck {
    fn new(check: Check) -> Self {
        Self {
            check,
            required_value: None,
            actual_value: None,
            low_confidence_fields: Vec::new(),
        }
    }

    fn with_values(mut self, required: Option<String>, actual: Option<String>) -> Self {
        self.required_value = required;
        self.actual_value = actual;
        self
    }
}

/// One failed condition within a requirement
struct Violation {
    check_type: CheckType,
    detail: String,
    required: Option<String>,
    actual: Option<String>,
}

/// Evaluates requirements and structural checks against extracted data
#[derive(Debug, Clone, Copy)]
pub struct CheckEvaluator {
    low_field_confidence: f64,
    names: InsuredNameMatcher,
}

impl CheckEvaluator {
    pub fn new(policy: &VerificationPolicy) -> Self {
        Self {
            low_field_confidence: policy.low_field_confidence,
            names: InsuredNameMatcher::new(policy.name_similarity),
        }
    }

    /// Run every check for one certificate, in the fixed order
    pub fn evaluate_all(
        &self,
        outcome: &MatchOutcome<'_>,
        data: &ExtractedData,
        subcontractor: Option<&SubcontractorIdentity>,
        as_of: NaiveDate,
    ) -> Vec<EvaluatedCheck> {
        let mut checks: Vec<EvaluatedCheck> = outcome
            .matches
            .iter()
            .map(|m| self.evaluate_requirement(m, data))
            .collect();

        checks.extend(outcome.issues.iter().map(malformed_coverage_check));
        checks.push(self.evaluate_policy_period(data, as_of));

        if let Some(expected) = subcontractor {
            checks.extend(self.evaluate_insured_party(expected, data));
        }

        for evaluated in &checks {
            debug!(
                check_type = %evaluated.check.check_type,
                status = %evaluated.check.status,
                "Evaluated check"
            );
        }

        checks
    }

    /// Evaluate a single requirement against its matched coverage
    pub fn evaluate_requirement(
        &self,
        matched: &RequirementMatch<'_>,
        data: &ExtractedData,
    ) -> EvaluatedCheck {
        let requirement = matched.requirement;

        let Some(coverage_type) = matched.coverage_type.as_deref() else {
            let issue = InputIssue::MalformedRequirement {
                position: matched.position,
                reason: "coverage type is missing".to_string(),
            };
            warn!("{}", issue);
            return EvaluatedCheck::new(Check::new(
                CheckType::MalformedRequirement,
                CheckStatus::Warning,
                format!("Requirement #{} could not be evaluated", matched.position + 1),
                issue.to_string(),
            ));
        };

        let label = coverage_label(coverage_type);

        let Some(coverage) = matched.coverage else {
            let required = requirement
                .minimum_limit
                .as_ref()
                .map(Amount::to_string)
                .or_else(|| Some("present".to_string()));
            return EvaluatedCheck::new(
                Check::new(
                    CheckType::CoverageMissing,
                    CheckStatus::Fail,
                    format!("{} coverage not found on certificate", capitalize(&label)),
                    describe_requirement(coverage_type, requirement),
                )
                .for_coverage(coverage_type),
            )
            .with_values(required, None);
        };

        let violations = self.violations(coverage_type, requirement, coverage);
        let used_fields = used_fields(coverage_type, requirement);
        let low_confidence_fields = self.low_confidence(data, &used_fields);

        let mut evaluated = match pick_primary(violations) {
            Some((primary, others)) => {
                let mut details = primary.detail;
                if !others.is_empty() {
                    let also: Vec<String> = others.into_iter().map(|v| v.detail).collect();
                    details = format!("{}; also: {}", details, also.join("; "));
                }
                EvaluatedCheck::new(
                    Check::new(
                        primary.check_type,
                        CheckStatus::Fail,
                        format!("{} does not meet requirements", capitalize(&label)),
                        details,
                    )
                    .for_coverage(coverage_type),
                )
                .with_values(primary.required, primary.actual)
            }
            None if !low_confidence_fields.is_empty() => EvaluatedCheck::new(
                Check::new(
                    CheckType::LowConfidenceField,
                    CheckStatus::Warning,
                    format!(
                        "{} meets requirements but was read with low confidence",
                        capitalize(&label)
                    ),
                    format!(
                        "Confirm against the certificate: {}",
                        low_confidence_fields.join(", ")
                    ),
                )
                .for_coverage(coverage_type),
            )
            .with_values(
                requirement.minimum_limit.as_ref().map(Amount::to_string),
                coverage.limit.as_ref().map(Amount::to_string),
            ),
            None => EvaluatedCheck::new(
                Check::new(
                    CheckType::CoverageCompliant,
                    CheckStatus::Pass,
                    format!("{} meets requirements", capitalize(&label)),
                    describe_coverage(coverage),
                )
                .for_coverage(coverage_type),
            ),
        };

        evaluated.low_confidence_fields = low_confidence_fields;
        evaluated
    }

    fn violations(
        &self,
        coverage_type: &str,
        requirement: &InsuranceRequirement,
        coverage: &Coverage,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        match requirement.minimum_limit.as_ref() {
            Some(Amount::Unparseable(raw)) => {
                violations.push(unparseable(
                    format!("{} minimum_limit requirement", coverage_type),
                    raw,
                ));
            }
            Some(Amount::Value(minimum)) => {
                let minimum = *minimum;
                match &coverage.limit {
                    Some(Amount::Unparseable(raw)) => {
                        violations.push(unparseable(format!("{}_limit", coverage_type), raw));
                    }
                    Some(Amount::Value(limit)) if *limit < minimum => violations.push(Violation {
                        check_type: CheckType::LimitInsufficient,
                        detail: format!(
                            "limit {} is below the required {} {}",
                            format_decimal(*limit),
                            format_decimal(minimum),
                            requirement.limit_type.as_str()
                        ),
                        required: Some(format_decimal(minimum)),
                        actual: Some(format_decimal(*limit)),
                    }),
                    Some(Amount::Value(_)) => {}
                    None => violations.push(Violation {
                        check_type: CheckType::LimitInsufficient,
                        detail: format!(
                            "no limit stated, {} {} required",
                            format_decimal(minimum),
                            requirement.limit_type.as_str()
                        ),
                        required: Some(format_decimal(minimum)),
                        actual: None,
                    }),
                }
            }
            None => {}
        }

        match requirement.maximum_excess.as_ref() {
            Some(Amount::Unparseable(raw)) => {
                violations.push(unparseable(
                    format!("{} maximum_excess requirement", coverage_type),
                    raw,
                ));
            }
            Some(Amount::Value(maximum)) => match &coverage.excess {
                Some(Amount::Unparseable(raw)) => {
                    violations.push(unparseable(format!("{}_excess", coverage_type), raw));
                }
                Some(Amount::Value(excess)) if excess > maximum => violations.push(Violation {
                    check_type: CheckType::ExcessExceeded,
                    detail: format!(
                        "excess {} exceeds the maximum {}",
                        format_decimal(*excess),
                        format_decimal(*maximum)
                    ),
                    required: Some(format_decimal(*maximum)),
                    actual: Some(format_decimal(*excess)),
                }),
                _ => {}
            },
            None => {}
        }

        if requirement.principal_indemnity_required && coverage.principal_indemnity != Some(true) {
            violations.push(Violation {
                check_type: CheckType::PrincipalIndemnityMissing,
                detail: "principal indemnity extension required but not shown".to_string(),
                required: Some("yes".to_string()),
                actual: Some(yes_no(coverage.principal_indemnity)),
            });
        }

        if requirement.cross_liability_required && coverage.cross_liability != Some(true) {
            violations.push(Violation {
                check_type: CheckType::CrossLiabilityMissing,
                detail: "cross liability clause required but not shown".to_string(),
                required: Some("yes".to_string()),
                actual: Some(yes_no(coverage.cross_liability)),
            });
        }

        violations
    }

    /// Policy currency check, always present exactly once per certificate
    pub fn evaluate_policy_period(&self, data: &ExtractedData, as_of: NaiveDate) -> EvaluatedCheck {
        let as_of_label = format_date(as_of);

        let Some(period_end) = data.period_end else {
            return EvaluatedCheck::new(Check::new(
                CheckType::PolicyPeriodUnknown,
                CheckStatus::Warning,
                "Policy expiry date could not be read",
                "No readable period end on the certificate; currency cannot be confirmed",
            ))
            .with_values(Some(as_of_label), None);
        };

        if period_end < as_of {
            return EvaluatedCheck::new(Check::new(
                CheckType::PolicyExpired,
                CheckStatus::Fail,
                "Policy has expired",
                format!("Policy ended {}, verification date {}", format_date(period_end), as_of_label),
            ))
            .with_values(Some(as_of_label), Some(format_date(period_end)));
        }

        if let Some(period_start) = data.period_start.filter(|start| *start > as_of) {
            return EvaluatedCheck::new(Check::new(
                CheckType::PolicyNotStarted,
                CheckStatus::Fail,
                "Policy period has not started",
                format!(
                    "Policy starts {}, verification date {}",
                    format_date(period_start),
                    as_of_label
                ),
            ))
            .with_values(Some(as_of_label), Some(format_date(period_start)));
        }

        let mut used = vec!["period_end".to_string()];
        if data.period_start.is_some() {
            used.push("period_start".to_string());
        }
        let low_confidence_fields = self.low_confidence(data, &used);
        let details = format!("Policy current until {}", format_date(period_end));

        let mut evaluated = if low_confidence_fields.is_empty() {
            EvaluatedCheck::new(Check::new(
                CheckType::PolicyCurrent,
                CheckStatus::Pass,
                "Policy is current",
                details,
            ))
        } else {
            EvaluatedCheck::new(Check::new(
                CheckType::LowConfidenceField,
                CheckStatus::Warning,
                "Policy is current but dates were read with low confidence",
                format!("{}; confirm: {}", details, low_confidence_fields.join(", ")),
            ))
            .with_values(Some(as_of_label), Some(format_date(period_end)))
        };
        evaluated.low_confidence_fields = low_confidence_fields;
        evaluated
    }

    /// Insured-party check; None when nothing is known about the expected subcontractor
    pub fn evaluate_insured_party(
        &self,
        expected: &SubcontractorIdentity,
        data: &ExtractedData,
    ) -> Option<EvaluatedCheck> {
        let expected_label = expected
            .name
            .clone()
            .or_else(|| expected.abn.as_ref().map(|abn| format!("ABN {}", abn)))?;
        let actual_label = data
            .insured_party_name
            .clone()
            .or_else(|| data.insured_party_abn.as_ref().map(|abn| format!("ABN {}", abn)));

        let evaluated = match self.names.compare(expected, data) {
            NameMatch::AbnMatch | NameMatch::Exact => {
                let used = ["insured_party_name".to_string(), "insured_party_abn".to_string()];
                let low_confidence_fields = self.low_confidence(data, &used);
                let mut evaluated = if low_confidence_fields.is_empty() {
                    EvaluatedCheck::new(Check::new(
                        CheckType::InsuredNameMatch,
                        CheckStatus::Pass,
                        "Insured party matches subcontractor",
                        format!("Certificate issued to {}", actual_label.unwrap_or_default()),
                    ))
                } else {
                    EvaluatedCheck::new(Check::new(
                        CheckType::LowConfidenceField,
                        CheckStatus::Warning,
                        "Insured party matches but was read with low confidence",
                        format!("Confirm: {}", low_confidence_fields.join(", ")),
                    ))
                    .with_values(Some(expected_label), actual_label)
                };
                evaluated.low_confidence_fields = low_confidence_fields;
                evaluated
            }
            NameMatch::Variation { similarity } => EvaluatedCheck::new(Check::new(
                CheckType::InsuredNameVariation,
                CheckStatus::Warning,
                "Insured party name differs slightly from subcontractor",
                format!("Name similarity {:.2}", similarity),
            ))
            .with_values(Some(expected_label), actual_label),
            NameMatch::Unreadable => EvaluatedCheck::new(Check::new(
                CheckType::InsuredNameVariation,
                CheckStatus::Warning,
                "Insured party could not be confirmed",
                "No insured party name or ABN read from the certificate",
            ))
            .with_values(Some(expected_label), None),
            NameMatch::Mismatch { similarity } => EvaluatedCheck::new(Check::new(
                CheckType::InsuredNameMismatch,
                CheckStatus::Fail,
                "Certificate is issued to a different party",
                format!("Name similarity {:.2}", similarity),
            ))
            .with_values(Some(expected_label), actual_label),
        };

        Some(evaluated)
    }

    fn low_confidence(&self, data: &ExtractedData, fields: &[String]) -> Vec<String> {
        fields
            .iter()
            .filter(|field| {
                data.field_confidence(field)
                    .is_some_and(|confidence| confidence < self.low_field_confidence)
            })
            .cloned()
            .collect()
    }
}

fn malformed_coverage_check(issue: &InputIssue) -> EvaluatedCheck {
    EvaluatedCheck::new(Check::new(
        CheckType::MalformedCoverage,
        CheckStatus::Warning,
        "Extracted coverage line could not be read",
        issue.to_string(),
    ))
}

fn unparseable(field: String, raw: &str) -> Violation {
    let issue = InputIssue::InvalidNumericComparison {
        field,
        raw: raw.to_string(),
    };
    warn!("{}", issue);
    Violation {
        check_type: CheckType::DataUnparseable,
        detail: issue.to_string(),
        required: None,
        actual: Some(raw.to_string()),
    }
}

/// Most severe violation first; ties keep evaluation order
fn pick_primary(mut violations: Vec<Violation>) -> Option<(Violation, Vec<Violation>)> {
    let primary_index = violations
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| {
            severity_for(a.check_type)
                .cmp(&severity_for(b.check_type))
                .then(ib.cmp(ia))
        })
        .map(|(index, _)| index)?;
    let primary = violations.remove(primary_index);
    Some((primary, violations))
}

/// Extraction field names a requirement reads
fn used_fields(coverage_type: &str, requirement: &InsuranceRequirement) -> Vec<String> {
    let mut fields = Vec::new();
    if requirement.minimum_limit.is_some() {
        fields.push(format!("{}_limit", coverage_type));
    }
    if requirement.maximum_excess.is_some() {
        fields.push(format!("{}_excess", coverage_type));
    }
    if requirement.principal_indemnity_required {
        fields.push(format!("{}_principal_indemnity", coverage_type));
    }
    if requirement.cross_liability_required {
        fields.push(format!("{}_cross_liability", coverage_type));
    }
    fields
}

fn describe_requirement(coverage_type: &str, requirement: &InsuranceRequirement) -> String {
    let mut parts = vec![format!("Project requires {} coverage", coverage_type)];
    if let Some(minimum) = &requirement.minimum_limit {
        parts.push(format!(
            "minimum limit {} {}",
            minimum,
            requirement.limit_type.as_str()
        ));
    }
    if let Some(maximum) = &requirement.maximum_excess {
        parts.push(format!("maximum excess {}", maximum));
    }
    if requirement.principal_indemnity_required {
        parts.push("principal indemnity".to_string());
    }
    if requirement.cross_liability_required {
        parts.push("cross liability".to_string());
    }
    parts.join(", ")
}

fn describe_coverage(coverage: &Coverage) -> String {
    let limit = coverage
        .limit
        .as_ref()
        .map(Amount::to_string)
        .unwrap_or_else(|| "not stated".to_string());
    match &coverage.excess {
        Some(excess) => format!("Limit {}, excess {}", limit, excess),
        None => format!("Limit {}", limit),
    }
}

fn coverage_label(coverage_type: &str) -> String {
    coverage_type.replace('_', " ")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "not stated",
    }
    .to_string()
}

fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
