//! Verdict Resolver and the verification entry point
//!
//! A run is a pure function of (requirements, extracted data, as-of time):
//! match -> evaluate checks -> aggregate deficiencies -> gate -> verdict.
//! Re-verification produces a new record; nothing here mutates state.

use chrono::{DateTime, Utc};
use coc_types::{
    Check, CheckStatus, CheckType, Deficiency, ExtractedData, GateDecision, GateOutcome,
    InsuranceRequirement, Severity, SubcontractorIdentity, Verification, VerificationRequest,
    VerificationStatus,
};
use tracing::{info, warn};

use super::checks::{CheckEvaluator, EvaluatedCheck};
use super::deficiency::DeficiencyAggregator;
use super::gate::ConfidenceGate;
use super::matcher::RequirementMatcher;
use crate::config::VerificationPolicy;
use crate::error::{InputIssue, VerificationError, VerificationResult};

/// Combines deficiencies and the gate decision into the terminal status.
///
/// Precedence: gate veto, critical deficiency, gate review, major
/// deficiency, then pass (minor-only deficiencies do not block).
#[derive(Debug, Clone, Copy, Default)]
pub struct VerdictResolver;

impl VerdictResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, deficiencies: &[Deficiency], gate: &GateDecision) -> VerificationStatus {
        let worst = deficiencies.iter().map(|d| d.severity).max();

        match (gate.outcome, worst) {
            (GateOutcome::Fail, _) => VerificationStatus::Fail,
            (_, Some(Severity::Critical)) => VerificationStatus::Fail,
            (GateOutcome::Review, _) => VerificationStatus::Review,
            (GateOutcome::Clear, Some(Severity::Major)) => VerificationStatus::Review,
            (GateOutcome::Clear, Some(Severity::Minor) | None) => VerificationStatus::Pass,
        }
    }
}

/// The verification engine.
///
/// Stateless and `Send + Sync`: share one instance across threads and call
/// it concurrently for different documents.
#[derive(Debug, Clone)]
pub struct Verifier {
    policy: VerificationPolicy,
    matcher: RequirementMatcher,
    evaluator: CheckEvaluator,
    aggregator: DeficiencyAggregator,
    gate: ConfidenceGate,
    resolver: VerdictResolver,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::build(VerificationPolicy::default())
    }
}

impl Verifier {
    /// Create a verifier, rejecting an invalid policy
    pub fn new(policy: VerificationPolicy) -> VerificationResult<Self> {
        policy.validate()?;
        Ok(Self::build(policy))
    }

    fn build(policy: VerificationPolicy) -> Self {
        Self {
            matcher: RequirementMatcher::new(),
            evaluator: CheckEvaluator::new(&policy),
            aggregator: DeficiencyAggregator::new(),
            gate: ConfidenceGate::new(&policy),
            resolver: VerdictResolver::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    /// Verify extracted certificate data against a project's requirements
    pub fn verify(
        &self,
        requirements: &[InsuranceRequirement],
        extracted: Option<&ExtractedData>,
        as_of: DateTime<Utc>,
    ) -> Verification {
        self.verify_for(requirements, extracted, None, as_of)
    }

    /// Verify, additionally checking the insured party against the expected subcontractor
    pub fn verify_for(
        &self,
        requirements: &[InsuranceRequirement],
        extracted: Option<&ExtractedData>,
        subcontractor: Option<&SubcontractorIdentity>,
        as_of: DateTime<Utc>,
    ) -> Verification {
        let Some(data) = extracted else {
            warn!("{}", InputIssue::ExtractionAbsent);
            return self.extraction_failed(as_of);
        };

        let outcome = self.matcher.match_requirements(requirements, &data.coverages);
        let checks =
            self.evaluator
                .evaluate_all(&outcome, data, subcontractor, as_of.date_naive());
        let deficiencies = self.aggregator.aggregate(&checks);
        let gate = self.gate.evaluate(data, &deficiencies);
        let status = self.resolver.resolve(&deficiencies, &gate);

        let verification = Verification {
            document_id: None,
            status,
            confidence_score: confidence_score(data.extraction_confidence),
            extracted_data: Some(data.clone()),
            flagged_fields: flagged_fields(&checks),
            checks: checks.into_iter().map(|evaluated| evaluated.check).collect(),
            deficiencies,
            gate,
            verified_at: as_of,
        };

        info!(
            status = %verification.status,
            checks = verification.checks.len(),
            deficiencies = verification.deficiencies.len(),
            "Verification complete"
        );

        verification
    }

    /// Verify a wire-level request.
    ///
    /// A request without a requirements list is a caller bug and is rejected;
    /// a request without extracted data yields the manual-review record.
    pub fn verify_request(
        &self,
        request: &VerificationRequest,
        as_of: DateTime<Utc>,
    ) -> VerificationResult<Verification> {
        let requirements = request
            .requirements
            .as_deref()
            .ok_or(VerificationError::MissingRequirements)?;

        let mut verification = self.verify_for(
            requirements,
            request.extracted_data.as_ref(),
            request.subcontractor.as_ref(),
            as_of,
        );
        verification.document_id = request.document_id;
        Ok(verification)
    }

    /// Record returned when the extraction step produced nothing
    fn extraction_failed(&self, as_of: DateTime<Utc>) -> Verification {
        let checks = vec![EvaluatedCheck {
            check: Check::new(
                CheckType::ExtractionFailed,
                CheckStatus::Warning,
                "Certificate data could not be extracted",
                "Enter the policy details manually to complete verification",
            ),
            required_value: None,
            actual_value: None,
            low_confidence_fields: Vec::new(),
        }];
        let deficiencies = self.aggregator.aggregate(&checks);

        Verification {
            document_id: None,
            status: VerificationStatus::Review,
            confidence_score: 0,
            extracted_data: None,
            checks: checks.into_iter().map(|evaluated| evaluated.check).collect(),
            deficiencies,
            flagged_fields: Vec::new(),
            gate: GateDecision::review("No extracted data; manual entry required"),
            verified_at: as_of,
        }
    }
}

/// Verify with the default policy
pub fn verify(
    requirements: &[InsuranceRequirement],
    extracted: Option<&ExtractedData>,
    as_of: DateTime<Utc>,
) -> Verification {
    Verifier::default().verify(requirements, extracted, as_of)
}

/// Extraction confidence (0-1) as a whole percentage
fn confidence_score(extraction_confidence: Option<f64>) -> u8 {
    extraction_confidence
        .filter(|c| !c.is_nan())
        .map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u8)
        .unwrap_or(0)
}

/// Low-confidence fields across all checks, first occurrence order
fn flagged_fields(checks: &[EvaluatedCheck]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for field in checks.iter().flat_map(|c| c.low_confidence_fields.iter()) {
        if !fields.contains(field) {
            fields.push(field.clone());
        }
    }
    fields
}
