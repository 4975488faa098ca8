//! Confidence & Fraud Gate
//!
//! Trust signals that can override what the checks say. Rules run in order
//! and the first match wins:
//!
//! 1. fraud screening blocked the document -> fail, whatever the checks say
//! 2. high fraud risk, or extraction confidence below threshold (or not
//!    reported) -> review; a critical deficiency still forces fail
//! 3. otherwise clear

use coc_types::{Deficiency, ExtractedData, FraudAnalysis, GateDecision, RiskLevel, Severity};
use tracing::debug;

use crate::config::VerificationPolicy;

/// Applies fraud and extraction-confidence thresholds
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceGate {
    min_extraction_confidence: f64,
    fraud_high_risk_score: f64,
    fraud_medium_risk_score: f64,
}

impl ConfidenceGate {
    pub fn new(policy: &VerificationPolicy) -> Self {
        Self {
            min_extraction_confidence: policy.min_extraction_confidence,
            fraud_high_risk_score: policy.fraud_high_risk_score,
            fraud_medium_risk_score: policy.fraud_medium_risk_score,
        }
    }

    /// Reported risk level, or one derived from the score when the level is
    /// missing or unrecognized
    pub fn effective_risk_level(&self, fraud: &FraudAnalysis) -> Option<RiskLevel> {
        match fraud.risk_level {
            Some(level) if level != RiskLevel::Unknown => Some(level),
            _ => fraud.risk_score.filter(|s| !s.is_nan()).map(|score| {
                if score >= self.fraud_high_risk_score {
                    RiskLevel::High
                } else if score >= self.fraud_medium_risk_score {
                    RiskLevel::Medium
                } else {
                    RiskLevel::Low
                }
            }),
        }
    }

    pub fn evaluate(&self, data: &ExtractedData, deficiencies: &[Deficiency]) -> GateDecision {
        let fraud = data.fraud_analysis.as_ref();

        if let Some(fraud) = fraud.filter(|f| f.is_blocked) {
            let reason = match fraud.recommendation.as_deref() {
                Some(recommendation) => format!("Blocked by fraud screening: {}", recommendation),
                None => "Blocked by fraud screening".to_string(),
            };
            return GateDecision::fail(reason);
        }

        let Some(trigger) = self.review_trigger(data, fraud) else {
            return GateDecision::clear();
        };

        debug!(trigger = %trigger, "Trust gate triggered");

        if deficiencies.iter().any(|d| d.severity == Severity::Critical) {
            GateDecision::fail(format!(
                "{}; a critical deficiency is confirmed, so the verdict stays fail",
                trigger
            ))
        } else {
            GateDecision::review(trigger)
        }
    }

    fn review_trigger(&self, data: &ExtractedData, fraud: Option<&FraudAnalysis>) -> Option<String> {
        if let Some(level) = fraud.and_then(|f| self.effective_risk_level(f)) {
            if level >= RiskLevel::High && level != RiskLevel::Unknown {
                return Some(format!("Fraud risk assessed as {}", level.as_str()));
            }
        }

        match data.extraction_confidence.filter(|c| !c.is_nan()) {
            None => Some("Extraction confidence not reported".to_string()),
            Some(confidence) if confidence < self.min_extraction_confidence => Some(format!(
                "Extraction confidence {:.2} below {:.2}",
                confidence, self.min_extraction_confidence
            )),
            Some(_) => None,
        }
    }
}
