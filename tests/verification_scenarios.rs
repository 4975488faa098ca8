//! End-to-end verification scenarios
//!
//! Tests verify:
//! 1. Reference scenarios (pass, insufficient limit, low-confidence field,
//!    fraud block, failed extraction)
//! 2. Verdict precedence across mixed deficiencies
//! 3. Wire-level requests (missing requirements vs empty list)
//! 4. Determinism and concurrent use of one verifier
//! 5. Property checks over generated certificates

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use coc_verify::{
    CheckStatus, CheckType, ComplianceRollup, ComplianceStatus, Coverage, ExtractedData,
    FraudAnalysis, GateOutcome, InsuranceRequirement, RequirementTemplateRegistry, RiskLevel,
    Severity, SubcontractorIdentity, Verification, VerificationError, VerificationRequest,
    VerificationStatus, Verifier,
};
use std::collections::BTreeMap;

// ============================================================================
// FIXTURES
// ============================================================================

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn public_liability(minimum: u64) -> InsuranceRequirement {
    InsuranceRequirement::new("public_liability").with_minimum_limit(minimum)
}

fn certificate(coverages: Vec<Coverage>) -> ExtractedData {
    ExtractedData {
        insured_party_name: Some("Acme Scaffolding Pty Ltd".to_string()),
        insured_party_abn: Some("51 824 753 556".to_string()),
        insurer_name: Some("QBE Insurance (Australia) Limited".to_string()),
        policy_number: Some("PL-2025-88231".to_string()),
        period_start: date(2025, 7, 1),
        period_end: date(2026, 6, 30),
        coverages,
        extraction_confidence: Some(0.95),
        field_confidences: BTreeMap::new(),
        fraud_analysis: None,
    }
}

fn check_types(verification: &Verification) -> Vec<CheckType> {
    verification.checks.iter().map(|c| c.check_type).collect()
}

// ============================================================================
// REFERENCE SCENARIOS
// ============================================================================

#[test]
fn test_scenario_a_compliant_certificate_passes() {
    let requirements = vec![public_liability(20_000_000)];
    let data = certificate(vec![Coverage::new("public_liability", 20_000_000u64)]);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert_eq!(verification.status, VerificationStatus::Pass);
    assert!(verification.deficiencies.is_empty());
    assert_eq!(
        check_types(&verification),
        vec![CheckType::CoverageCompliant, CheckType::PolicyCurrent]
    );
    assert_eq!(verification.confidence_score, 95);
    assert!(verification.gate.is_clear());
    assert!(!verification.requires_notification());
}

#[test]
fn test_scenario_b_insufficient_limit_fails() {
    let requirements = vec![public_liability(20_000_000)];
    let data = certificate(vec![Coverage::new("public_liability", 10_000_000u64)]);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert_eq!(verification.status, VerificationStatus::Fail);
    assert_eq!(verification.checks[0].check_type, CheckType::LimitInsufficient);
    assert_eq!(verification.checks[0].status, CheckStatus::Fail);
    assert_eq!(verification.deficiencies.len(), 1);

    let deficiency = &verification.deficiencies[0];
    assert_eq!(deficiency.severity, Severity::Critical);
    assert_eq!(deficiency.required_value.as_deref(), Some("20000000"));
    assert_eq!(deficiency.actual_value.as_deref(), Some("10000000"));
    assert!(verification.requires_notification());
}

#[test]
fn test_scenario_c_low_field_confidence_flags_without_blocking() {
    let requirements = vec![public_liability(20_000_000)];
    let mut data = certificate(vec![Coverage::new("public_liability", 20_000_000u64)]);
    data.field_confidences
        .insert("public_liability_limit".to_string(), 45.0);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert_eq!(verification.checks[0].check_type, CheckType::LowConfidenceField);
    assert_eq!(verification.checks[0].status, CheckStatus::Warning);
    assert_eq!(verification.deficiencies.len(), 1);
    assert_eq!(verification.deficiencies[0].severity, Severity::Minor);
    assert_eq!(verification.flagged_fields, vec!["public_liability_limit"]);

    // Overall extraction confidence is high, so the gate stays clear
    assert!(verification.gate.is_clear());
    assert_eq!(verification.status, VerificationStatus::Pass);
}

#[test]
fn test_scenario_d_fraud_block_vetoes_passing_checks() {
    let requirements = vec![public_liability(20_000_000)];
    let mut data = certificate(vec![Coverage::new("public_liability", 20_000_000u64)]);
    data.fraud_analysis = Some(FraudAnalysis {
        risk_score: Some(92.0),
        risk_level: Some(RiskLevel::Critical),
        is_blocked: true,
        recommendation: Some("Certificate template does not match insurer".to_string()),
    });

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert!(verification.checks.iter().all(|c| c.is_pass()));
    assert!(verification.deficiencies.is_empty());
    assert_eq!(verification.status, VerificationStatus::Fail);
    assert_eq!(verification.gate.outcome, GateOutcome::Fail);
    assert!(verification
        .gate
        .reason
        .as_deref()
        .is_some_and(|r| r.contains("does not match insurer")));
}

#[test]
fn test_scenario_e_missing_extraction_needs_review() {
    let requirements = vec![public_liability(20_000_000)];

    let verification = Verifier::default().verify(&requirements, None, as_of());

    assert_eq!(verification.status, VerificationStatus::Review);
    assert_eq!(check_types(&verification), vec![CheckType::ExtractionFailed]);
    assert_eq!(verification.confidence_score, 0);
    assert!(verification.extracted_data.is_none());
}

// ============================================================================
// VERDICT PRECEDENCE
// ============================================================================

#[test]
fn test_missing_coverage_is_critical() {
    let requirements = vec![
        public_liability(10_000_000),
        InsuranceRequirement::new("workers_compensation"),
    ];
    let data = certificate(vec![Coverage::new("Public Liability", 20_000_000u64)]);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert_eq!(verification.status, VerificationStatus::Fail);
    assert_eq!(
        check_types(&verification),
        vec![
            CheckType::CoverageCompliant,
            CheckType::CoverageMissing,
            CheckType::PolicyCurrent
        ]
    );
    assert_eq!(verification.count_severity(Severity::Critical), 1);
}

#[test]
fn test_major_only_resolves_to_review() {
    let requirements = vec![public_liability(10_000_000)
        .with_maximum_excess(5_000u64)
        .requiring_principal_indemnity()];
    let data = certificate(vec![Coverage::new("public_liability", 20_000_000u64)
        .with_excess(10_000u64)
        .with_principal_indemnity(false)]);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    // Both violations are major; the first evaluated wins, the other is in the details
    assert_eq!(verification.checks[0].check_type, CheckType::ExcessExceeded);
    assert!(verification.checks[0].details.contains("also:"));
    assert_eq!(verification.deficiencies.len(), 1);
    assert_eq!(verification.status, VerificationStatus::Review);
}

#[test]
fn test_critical_outranks_major_within_requirement() {
    let requirements = vec![public_liability(20_000_000).requiring_cross_liability()];
    let data = certificate(vec![Coverage::new("public_liability", 5_000_000u64)]);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert_eq!(verification.checks[0].check_type, CheckType::LimitInsufficient);
    assert!(verification.checks[0].details.contains("cross liability"));
    assert_eq!(verification.status, VerificationStatus::Fail);
}

#[test]
fn test_expired_policy_fails() {
    let requirements = vec![public_liability(10_000_000)];
    let mut data = certificate(vec![Coverage::new("public_liability", 20_000_000u64)]);
    data.period_end = date(2026, 2, 28);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert!(check_types(&verification).contains(&CheckType::PolicyExpired));
    assert_eq!(verification.status, VerificationStatus::Fail);
}

#[test]
fn test_policy_ending_on_verification_day_is_current() {
    let mut data = certificate(vec![]);
    data.period_end = date(2026, 3, 1);

    let verification = Verifier::default().verify(&[], Some(&data), as_of());

    assert_eq!(check_types(&verification), vec![CheckType::PolicyCurrent]);
    assert_eq!(verification.status, VerificationStatus::Pass);
}

#[test]
fn test_unparseable_limit_needs_review() {
    let requirements = vec![public_liability(10_000_000)];
    let data: ExtractedData = serde_json::from_value(serde_json::json!({
        "period_end": "30/06/2026",
        "coverages": [{ "type": "public_liability", "limit": "Ten million" }],
        "extraction_confidence": 0.9
    }))
    .unwrap();

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert_eq!(verification.checks[0].check_type, CheckType::DataUnparseable);
    assert_eq!(verification.status, VerificationStatus::Review);
}

#[test]
fn test_low_extraction_confidence_forces_review() {
    let requirements = vec![public_liability(10_000_000)];
    let mut data = certificate(vec![Coverage::new("public_liability", 20_000_000u64)]);
    data.extraction_confidence = Some(0.42);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert!(verification.deficiencies.is_empty());
    assert_eq!(verification.gate.outcome, GateOutcome::Review);
    assert_eq!(verification.status, VerificationStatus::Review);
    assert_eq!(verification.confidence_score, 42);
}

#[test]
fn test_low_confidence_does_not_soften_critical() {
    let requirements = vec![public_liability(20_000_000)];
    let mut data = certificate(vec![Coverage::new("public_liability", 1_000_000u64)]);
    data.extraction_confidence = Some(0.3);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert_eq!(verification.status, VerificationStatus::Fail);
}

#[test]
fn test_high_fraud_score_without_level_forces_review() {
    let requirements = vec![public_liability(10_000_000)];
    let mut data = certificate(vec![Coverage::new("public_liability", 20_000_000u64)]);
    data.fraud_analysis = Some(FraudAnalysis {
        risk_score: Some(75.0),
        ..Default::default()
    });

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert_eq!(verification.status, VerificationStatus::Review);
}

#[test]
fn test_same_type_coverages_use_highest_limit() {
    let requirements = vec![public_liability(20_000_000)];
    let data = certificate(vec![
        Coverage::new("public_liability", 5_000_000u64),
        Coverage::new("public-liability", 20_000_000u64),
    ]);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    assert_eq!(verification.checks[0].check_type, CheckType::CoverageCompliant);
    assert_eq!(verification.status, VerificationStatus::Pass);
}

#[test]
fn test_no_requirements_checks_structure_only() {
    let data = certificate(vec![Coverage::new("public_liability", 1u64)]);

    let verification = Verifier::default().verify(&[], Some(&data), as_of());

    assert_eq!(check_types(&verification), vec![CheckType::PolicyCurrent]);
    assert_eq!(verification.status, VerificationStatus::Pass);
}

#[test]
fn test_no_requirements_still_reports_unreadable_coverage_lines() {
    let mut data = certificate(vec![Coverage::new("public_liability", 20_000_000u64)]);
    data.coverages.push(Coverage {
        coverage_type: None,
        limit: Some(5_000_000u64.into()),
        ..Default::default()
    });

    let verification = Verifier::default().verify(&[], Some(&data), as_of());

    assert_eq!(
        check_types(&verification),
        vec![CheckType::MalformedCoverage, CheckType::PolicyCurrent]
    );
    assert_eq!(verification.deficiencies.len(), 1);
    assert_eq!(verification.deficiencies[0].severity, Severity::Minor);
    assert_eq!(verification.status, VerificationStatus::Pass);
}

#[test]
fn test_loose_wire_values_do_not_reject_request() {
    let request: VerificationRequest = serde_json::from_value(serde_json::json!({
        "requirements": [
            {
                "coverage_type": "public_liability",
                "minimum_limit": "$20,000,000",
                "cross_liability_required": "yes"
            },
            { "coverage_type": "contract_works", "minimum_limit": "full contract value" }
        ],
        "extracted_data": {
            "period_end": "2026-12-31",
            "coverages": [
                { "type": "public_liability", "limit": "20,000,000", "cross_liability": "Yes" },
                { "type": "contract_works", "limit": 5000000 }
            ],
            "extraction_confidence": "0.91",
            "field_confidences": { "period_end": null },
            "fraud_analysis": { "is_blocked": null, "risk_score": null }
        }
    }))
    .unwrap();

    let verification = Verifier::default()
        .verify_request(&request, as_of())
        .unwrap();

    assert_eq!(
        check_types(&verification),
        vec![
            CheckType::CoverageCompliant,
            CheckType::DataUnparseable,
            CheckType::PolicyCurrent
        ]
    );
    assert_eq!(verification.confidence_score, 91);
    assert_eq!(verification.status, VerificationStatus::Review);
}

// ============================================================================
// INSURED PARTY
// ============================================================================

#[test]
fn test_insured_party_mismatch() {
    let data = certificate(vec![]);
    let expected = SubcontractorIdentity {
        name: Some("Brightline Electrical Services".to_string()),
        abn: None,
    };

    let verification = Verifier::default().verify_for(&[], Some(&data), Some(&expected), as_of());

    assert!(check_types(&verification).contains(&CheckType::InsuredNameMismatch));
    assert_eq!(verification.status, VerificationStatus::Review);
}

#[test]
fn test_insured_party_abn_match_ignores_name_format() {
    let data = certificate(vec![]);
    let expected = SubcontractorIdentity {
        name: Some("Acme Scaffolding Group".to_string()),
        abn: Some("51824753556".to_string()),
    };

    let verification = Verifier::default().verify_for(&[], Some(&data), Some(&expected), as_of());

    assert_eq!(
        check_types(&verification),
        vec![CheckType::PolicyCurrent, CheckType::InsuredNameMatch]
    );
    assert_eq!(verification.status, VerificationStatus::Pass);
}

// ============================================================================
// WIRE REQUESTS
// ============================================================================

#[test]
fn test_request_without_requirements_is_rejected() {
    let request: VerificationRequest = serde_json::from_value(serde_json::json!({
        "extracted_data": { "extraction_confidence": 0.9 }
    }))
    .unwrap();

    let result = Verifier::default().verify_request(&request, as_of());

    assert!(matches!(result, Err(VerificationError::MissingRequirements)));
}

#[test]
fn test_request_with_empty_requirements_is_evaluated() {
    let document_id = uuid::Uuid::new_v4();
    let request: VerificationRequest = serde_json::from_value(serde_json::json!({
        "document_id": document_id,
        "requirements": [],
        "extracted_data": {
            "period_end": "2026-12-31",
            "coverages": null,
            "extraction_confidence": 0.88
        }
    }))
    .unwrap();

    let verification = Verifier::default()
        .verify_request(&request, as_of())
        .unwrap();

    assert_eq!(verification.document_id, Some(document_id));
    assert_eq!(verification.status, VerificationStatus::Pass);
}

#[test]
fn test_malformed_requirement_is_reported_not_fatal() {
    let request: VerificationRequest = serde_json::from_value(serde_json::json!({
        "requirements": [
            { "minimum_limit": 10000000 },
            { "coverage_type": "public_liability", "minimum_limit": 10000000 }
        ],
        "extracted_data": {
            "period_end": "2026-12-31",
            "coverages": [{ "type": "public_liability", "limit": "$20,000,000" }],
            "extraction_confidence": 0.9
        }
    }))
    .unwrap();

    let verification = Verifier::default()
        .verify_request(&request, as_of())
        .unwrap();

    assert_eq!(
        check_types(&verification),
        vec![
            CheckType::MalformedRequirement,
            CheckType::CoverageCompliant,
            CheckType::PolicyCurrent
        ]
    );
    assert_eq!(verification.status, VerificationStatus::Review);
}

#[test]
fn test_verification_serializes_wire_names() {
    let requirements = vec![public_liability(20_000_000)];
    let data = certificate(vec![Coverage::new("public_liability", 10_000_000u64)]);

    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());
    let json = serde_json::to_value(&verification).unwrap();

    assert_eq!(json["status"], "fail");
    assert_eq!(json["deficiencies"][0]["type"], "limit_insufficient");
    assert_eq!(json["deficiencies"][0]["severity"], "critical");
    assert_eq!(json["checks"][0]["status"], "fail");
}

// ============================================================================
// DETERMINISM & CONCURRENCY
// ============================================================================

#[test]
fn test_reverification_is_identical() {
    let requirements = vec![
        public_liability(20_000_000).with_maximum_excess(10_000u64),
        InsuranceRequirement::new("workers_compensation"),
    ];
    let data = certificate(vec![Coverage::new("public_liability", 10_000_000u64)
        .with_excess(2_500u64)]);
    let verifier = Verifier::default();

    let first = verifier.verify(&requirements, Some(&data), as_of());
    let second = verifier.verify(&requirements, Some(&data), as_of());

    assert_eq!(first, second);
}

#[test]
fn test_shared_verifier_across_threads() {
    let verifier = Verifier::default();
    let requirements = vec![public_liability(20_000_000)];
    let limits = [5_000_000u64, 20_000_000, 50_000_000, 19_999_999];

    let results: Vec<VerificationStatus> = std::thread::scope(|scope| {
        let handles: Vec<_> = limits
            .iter()
            .map(|limit| {
                let verifier = &verifier;
                let requirements = &requirements;
                scope.spawn(move || {
                    let data = certificate(vec![Coverage::new("public_liability", *limit)]);
                    verifier.verify(requirements, Some(&data), as_of()).status
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        results,
        vec![
            VerificationStatus::Fail,
            VerificationStatus::Pass,
            VerificationStatus::Pass,
            VerificationStatus::Fail
        ]
    );
}

// ============================================================================
// TEMPLATES & ROLLUP
// ============================================================================

#[test]
fn test_template_requirements_drive_verification() {
    let mut registry = RequirementTemplateRegistry::new();
    registry
        .load_str(
            r#"
templates:
  - id: trade.baseline
    display-name: Baseline
    effective-from: 2025-01-01
    requirements:
      - coverage_type: public_liability
        minimum_limit: 10000000
  - id: trade.high-risk
    display-name: High risk
    effective-from: 2025-01-01
    extends: trade.baseline
    requirements:
      - coverage_type: public_liability
        minimum_limit: 20000000
"#,
        )
        .unwrap();
    registry.build_resolved_cache().unwrap();

    let data = certificate(vec![Coverage::new("public_liability", 15_000_000u64)]);
    let verifier = Verifier::default();

    let baseline = registry.requirements_for("trade.baseline").unwrap();
    let high_risk = registry.requirements_for("trade.high-risk").unwrap();

    assert_eq!(
        verifier.verify(&baseline, Some(&data), as_of()).status,
        VerificationStatus::Pass
    );
    assert_eq!(
        verifier.verify(&high_risk, Some(&data), as_of()).status,
        VerificationStatus::Fail
    );
}

#[test]
fn test_rollup_from_verification() {
    let requirements = vec![public_liability(10_000_000)];
    let data = certificate(vec![Coverage::new("public_liability", 20_000_000u64)]);
    let verification = Verifier::default().verify(&requirements, Some(&data), as_of());

    let rollup = ComplianceRollup::new();
    assert_eq!(
        rollup.status(Some(&verification), &[], as_of()),
        ComplianceStatus::Compliant
    );

    let after_expiry = Utc.with_ymd_and_hms(2026, 7, 15, 0, 0, 0).unwrap();
    assert_eq!(
        rollup.status(Some(&verification), &[], after_expiry),
        ComplianceStatus::NonCompliant
    );
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rank(status: VerificationStatus) -> u8 {
        match status {
            VerificationStatus::Pass => 0,
            VerificationStatus::Review => 1,
            VerificationStatus::Fail => 2,
        }
    }

    fn arb_certificate() -> impl Strategy<Value = (u64, ExtractedData)> {
        (
            1u64..=50,
            0u64..=60,
            proptest::option::of(0u64..=20_000),
            0.0f64..=1.0,
            any::<bool>(),
            -30i64..=365,
        )
            .prop_map(|(minimum, limit, excess, confidence, blocked, days_left)| {
                let mut coverage = Coverage::new("public_liability", limit * 1_000_000);
                if let Some(excess) = excess {
                    coverage = coverage.with_excess(excess);
                }
                let mut data = certificate(vec![coverage]);
                data.extraction_confidence = Some(confidence);
                data.period_end = Some(as_of().date_naive() + chrono::Duration::days(days_left));
                if blocked {
                    data.fraud_analysis = Some(FraudAnalysis {
                        is_blocked: true,
                        ..Default::default()
                    });
                }
                (minimum * 1_000_000, data)
            })
    }

    fn requirements(minimum: u64) -> Vec<InsuranceRequirement> {
        vec![public_liability(minimum).with_maximum_excess(10_000u64)]
    }

    proptest! {
        #[test]
        fn verification_is_deterministic((minimum, data) in arb_certificate()) {
            let verifier = Verifier::default();
            let first = verifier.verify(&requirements(minimum), Some(&data), as_of());
            let second = verifier.verify(&requirements(minimum), Some(&data), as_of());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn critical_deficiency_always_fails((minimum, data) in arb_certificate()) {
            let verification = Verifier::default().verify(&requirements(minimum), Some(&data), as_of());
            if verification.worst_severity() == Some(Severity::Critical) {
                prop_assert_eq!(verification.status, VerificationStatus::Fail);
            }
        }

        #[test]
        fn fraud_block_always_fails((minimum, data) in arb_certificate()) {
            let verification = Verifier::default().verify(&requirements(minimum), Some(&data), as_of());
            if data.fraud_analysis.as_ref().is_some_and(|f| f.is_blocked) {
                prop_assert_eq!(verification.status, VerificationStatus::Fail);
            }
        }

        #[test]
        fn lower_confidence_never_improves_verdict(
            (minimum, data) in arb_certificate(),
            drop in 0.0f64..=1.0,
        ) {
            let verifier = Verifier::default();
            let mut degraded = data.clone();
            degraded.extraction_confidence = data.extraction_confidence.map(|c| c * drop);

            let original = verifier.verify(&requirements(minimum), Some(&data), as_of());
            let lowered = verifier.verify(&requirements(minimum), Some(&degraded), as_of());
            prop_assert!(rank(lowered.status) >= rank(original.status));
        }

        #[test]
        fn every_non_pass_check_has_one_deficiency((minimum, data) in arb_certificate()) {
            let verification = Verifier::default().verify(&requirements(minimum), Some(&data), as_of());
            let non_pass = verification.checks.iter().filter(|c| !c.is_pass()).count();
            prop_assert_eq!(non_pass, verification.deficiencies.len());
        }

        #[test]
        fn low_field_confidence_only_softens_passing_checks(
            (minimum, data) in arb_certificate(),
            lowered in (any::<bool>(), any::<bool>(), any::<bool>()),
            confidence in 0.0f64..60.0,
        ) {
            let fields = [
                ("public_liability_limit", lowered.0),
                ("public_liability_excess", lowered.1),
                ("period_end", lowered.2),
            ];
            let mut degraded = data.clone();
            for (field, lower) in fields {
                if lower {
                    degraded.field_confidences.insert(field.to_string(), confidence);
                }
            }

            let verifier = Verifier::default();
            let original = verifier.verify(&requirements(minimum), Some(&data), as_of());
            let softened = verifier.verify(&requirements(minimum), Some(&degraded), as_of());

            if original.status == VerificationStatus::Fail {
                prop_assert_ne!(softened.status, VerificationStatus::Pass);
            }
            if original.status == VerificationStatus::Pass {
                prop_assert_ne!(softened.status, VerificationStatus::Fail);
            }
            prop_assert_eq!(&original.gate, &softened.gate);

            prop_assert_eq!(original.checks.len(), softened.checks.len());
            for (before, after) in original.checks.iter().zip(&softened.checks) {
                if before.check_type != after.check_type || before.status != after.status {
                    prop_assert_eq!(before.status, CheckStatus::Pass);
                    prop_assert_eq!(after.status, CheckStatus::Warning);
                    prop_assert_eq!(after.check_type, CheckType::LowConfidenceField);
                }
            }
        }
    }
}

#[test]
fn test_shipped_configuration_loads() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));

    let registry = RequirementTemplateRegistry::load_from_dir(root.join("config/requirements")).unwrap();
    let high_risk = registry.requirements_for("trade.high-risk").unwrap();
    assert_eq!(high_risk.len(), 2);
    assert!(high_risk[0].cross_liability_required);

    let policy = coc_verify::VerificationPolicy::from_yaml_file(root.join("config/policy.yaml")).unwrap();
    assert_eq!(policy, coc_verify::VerificationPolicy::default());
}
