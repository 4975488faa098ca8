//! COC Types - Level 1 Foundation Types
//!
//! Pure data structures shared by the verification engine and its callers:
//! project insurance requirements, AI-extracted certificate data, and the
//! verification record (checks, deficiencies, verdict) produced from them.
//!
//! ## Architecture Level: LEVEL 1 (Foundation)
//!
//! Nothing in this crate depends on other workspace crates. The engine crate
//! (`coc-verify`) depends on this one, as can any persistence or API layer
//! that needs the wire shapes without pulling in the rules.
//!
//! ## Contents
//!
//! - Requirement and extraction payloads (every extracted field is nullable)
//! - Currency amounts that tolerate non-numeric extractor output
//! - Check, Deficiency, gate and Verification records
//! - Compliance exceptions and rollup status
//!
//! ## Rules
//!
//! 1. **NO BUSINESS LOGIC** - decision rules live in the engine crate
//! 2. **SERIALIZABLE** - every type round-trips through serde
//! 3. **DETERMINISTIC OUTPUT** - ordered maps only, so serialized records are byte-stable

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// ============================================================================
// CURRENCY AMOUNTS
// ============================================================================

/// A currency amount as reported by the extraction service.
///
/// Extractors occasionally return strings such as `"$20,000,000"` or free
/// text like `"see schedule"`. Anything that cleans up to a decimal becomes
/// [`Amount::Value`]; everything else is kept verbatim as
/// [`Amount::Unparseable`] so the engine can raise a `data_unparseable`
/// check instead of rejecting the whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAmount", into = "RawAmount")]
pub enum Amount {
    /// Exact numeric amount
    Value(Decimal),
    /// Raw extractor output that is not a number
    Unparseable(String),
}

impl Amount {
    /// Numeric value, if the amount parsed
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Amount::Value(value) => Some(*value),
            Amount::Unparseable(_) => None,
        }
    }

    /// True when the extractor produced something that is not a number
    pub fn is_unparseable(&self) -> bool {
        matches!(self, Amount::Unparseable(_))
    }

    /// Parse free text the way extractors tend to format currency
    pub fn parse_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        let unprefixed = trimmed
            .strip_prefix("AUD")
            .or_else(|| trimmed.strip_prefix("A$"))
            .unwrap_or(trimmed);
        let cleaned: String = unprefixed
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | ' ' | '_'))
            .collect();

        match cleaned.parse::<Decimal>() {
            Ok(value) if !cleaned.is_empty() => Amount::Value(value),
            _ => Amount::Unparseable(raw.to_string()),
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Value(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount::Value(Decimal::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Value(value) => write!(f, "{}", value.normalize()),
            Amount::Unparseable(raw) => write!(f, "{}", raw),
        }
    }
}

/// Wire representation of [`Amount`]
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(Decimal),
    Text(String),
    Other(serde_json::Value),
}

impl From<RawAmount> for Amount {
    fn from(raw: RawAmount) -> Self {
        match raw {
            RawAmount::Number(value) => Amount::Value(value),
            RawAmount::Text(text) => Amount::parse_text(&text),
            RawAmount::Other(value) => Amount::Unparseable(value.to_string()),
        }
    }
}

impl From<Amount> for RawAmount {
    fn from(amount: Amount) -> Self {
        match amount {
            Amount::Value(value) => RawAmount::Number(value),
            Amount::Unparseable(raw) => RawAmount::Text(raw),
        }
    }
}

// ============================================================================
// PROJECT REQUIREMENTS
// ============================================================================

/// How a coverage limit is measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitType {
    #[default]
    PerOccurrence,
    Aggregate,
}

impl LimitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitType::PerOccurrence => "per occurrence",
            LimitType::Aggregate => "aggregate",
        }
    }
}

/// One insurance requirement configured on a project.
///
/// The engine treats a requirement list as a snapshot: later edits to the
/// project never alter a verification that already ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceRequirement {
    /// Coverage category, e.g. `public_liability`. Missing on malformed records.
    #[serde(default)]
    pub coverage_type: Option<String>,

    /// Minimum acceptable limit; kept verbatim when it is not a number
    #[serde(default)]
    pub minimum_limit: Option<Amount>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub limit_type: LimitType,

    /// Largest acceptable excess (deductible)
    #[serde(default)]
    pub maximum_excess: Option<Amount>,

    #[serde(default, deserialize_with = "lenient_flag")]
    pub principal_indemnity_required: bool,

    #[serde(default, deserialize_with = "lenient_flag")]
    pub cross_liability_required: bool,
}

impl InsuranceRequirement {
    /// Create a requirement for a coverage type with no constraints
    pub fn new(coverage_type: impl Into<String>) -> Self {
        Self {
            coverage_type: Some(coverage_type.into()),
            minimum_limit: None,
            limit_type: LimitType::PerOccurrence,
            maximum_excess: None,
            principal_indemnity_required: false,
            cross_liability_required: false,
        }
    }

    pub fn with_minimum_limit(mut self, limit: impl Into<Decimal>) -> Self {
        self.minimum_limit = Some(Amount::Value(limit.into()));
        self
    }

    pub fn with_maximum_excess(mut self, excess: impl Into<Decimal>) -> Self {
        self.maximum_excess = Some(Amount::Value(excess.into()));
        self
    }

    pub fn with_limit_type(mut self, limit_type: LimitType) -> Self {
        self.limit_type = limit_type;
        self
    }

    pub fn requiring_principal_indemnity(mut self) -> Self {
        self.principal_indemnity_required = true;
        self
    }

    pub fn requiring_cross_liability(mut self) -> Self {
        self.cross_liability_required = true;
        self
    }
}

// ============================================================================
// EXTRACTED CERTIFICATE DATA
// ============================================================================

/// A single coverage line read off the certificate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    #[serde(rename = "type", default)]
    pub coverage_type: Option<String>,

    #[serde(default)]
    pub limit: Option<Amount>,

    #[serde(default)]
    pub excess: Option<Amount>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub principal_indemnity: Option<bool>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub cross_liability: Option<bool>,
}

impl Coverage {
    pub fn new(coverage_type: impl Into<String>, limit: impl Into<Amount>) -> Self {
        Self {
            coverage_type: Some(coverage_type.into()),
            limit: Some(limit.into()),
            ..Default::default()
        }
    }

    pub fn with_excess(mut self, excess: impl Into<Amount>) -> Self {
        self.excess = Some(excess.into());
        self
    }

    pub fn with_principal_indemnity(mut self, value: bool) -> Self {
        self.principal_indemnity = Some(value);
        self
    }

    pub fn with_cross_liability(mut self, value: bool) -> Self {
        self.cross_liability = Some(value);
        self
    }
}

/// Fraud risk classification reported by the extraction service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
            RiskLevel::Unknown => "unknown",
        }
    }
}

/// Fraud screening attached to an extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FraudAnalysis {
    /// Risk score, 0-100
    #[serde(default, deserialize_with = "lenient_f64")]
    pub risk_score: Option<f64>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub risk_level: Option<RiskLevel>,

    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_blocked: bool,

    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Policy data pulled from an uploaded certificate by the extraction service.
///
/// Every field is optional: the extractor omits whatever it could not read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    #[serde(default)]
    pub insured_party_name: Option<String>,

    #[serde(default)]
    pub insured_party_abn: Option<String>,

    #[serde(default)]
    pub insurer_name: Option<String>,

    #[serde(default)]
    pub policy_number: Option<String>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub period_start: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub period_end: Option<NaiveDate>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub coverages: Vec<Coverage>,

    /// Overall extraction confidence, 0.0 - 1.0
    #[serde(default, deserialize_with = "lenient_f64")]
    pub extraction_confidence: Option<f64>,

    /// Per-field confidence, 0 - 100, keyed by field name
    /// (e.g. `public_liability_limit`, `period_end`).
    /// Entries that are not numbers are dropped.
    #[serde(default, deserialize_with = "lenient_confidences")]
    pub field_confidences: BTreeMap<String, f64>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub fraud_analysis: Option<FraudAnalysis>,
}

impl ExtractedData {
    /// Confidence recorded for a field, if the extractor reported one
    pub fn field_confidence(&self, field: &str) -> Option<f64> {
        self.field_confidences.get(field).copied()
    }
}

/// Expected identity of the subcontractor the certificate was uploaded for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcontractorIdentity {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub abn: Option<String>,
}

/// Wire envelope for a verification run.
///
/// `requirements` and `extracted_data` are distinguished from empty values:
/// a missing requirements list is a caller bug, a missing extraction is a
/// failed upstream step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationRequest {
    #[serde(default)]
    pub document_id: Option<Uuid>,

    #[serde(default)]
    pub requirements: Option<Vec<InsuranceRequirement>>,

    #[serde(default)]
    pub extracted_data: Option<ExtractedData>,

    #[serde(default)]
    pub subcontractor: Option<SubcontractorIdentity>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any value that does not fit `T` reads as `T::default()`
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default())
}

/// `true`/`false`, `"yes"`/`"no"`, `"true"`/`"false"`, `"y"`/`"n"`, `1`/`0`;
/// anything else reads as absent
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_bool))
}

/// Lenient boolean where absent means `false`
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_bool(deserializer)?.unwrap_or(false))
}

/// Numbers or numeric strings (`"85"`, `"85%"`); anything else reads as absent
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_f64))
}

fn lenient_confidences<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(field, value)| value_as_f64(&value).map(|confidence| (field, confidence)))
        .collect())
}

fn value_as_bool(value: &serde_json::Value) -> Option<bool> {
    match value {
        serde_json::Value::Bool(flag) => Some(*flag),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        serde_json::Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Some(true),
            "no" | "n" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(text) => text.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    };
    number.filter(|n: &f64| n.is_finite())
}

/// Accepts ISO dates, ISO timestamps and `DD/MM/YYYY`; anything else reads as absent.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_policy_date))
}

/// Parse the date formats seen on certificates
pub fn parse_policy_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

// ============================================================================
// CHECKS
// ============================================================================

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warning",
            CheckStatus::Fail => "fail",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a check found. Passing checks carry the `*_compliant` / `*_current` /
/// `*_match` kinds; every other kind describes a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    CoverageCompliant,
    CoverageMissing,
    LimitInsufficient,
    ExcessExceeded,
    PrincipalIndemnityMissing,
    CrossLiabilityMissing,
    DataUnparseable,
    LowConfidenceField,
    PolicyCurrent,
    PolicyExpired,
    PolicyNotStarted,
    PolicyPeriodUnknown,
    InsuredNameMatch,
    InsuredNameVariation,
    InsuredNameMismatch,
    MalformedRequirement,
    MalformedCoverage,
    ExtractionFailed,
}

impl CheckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::CoverageCompliant => "coverage_compliant",
            CheckType::CoverageMissing => "coverage_missing",
            CheckType::LimitInsufficient => "limit_insufficient",
            CheckType::ExcessExceeded => "excess_exceeded",
            CheckType::PrincipalIndemnityMissing => "principal_indemnity_missing",
            CheckType::CrossLiabilityMissing => "cross_liability_missing",
            CheckType::DataUnparseable => "data_unparseable",
            CheckType::LowConfidenceField => "low_confidence_field",
            CheckType::PolicyCurrent => "policy_current",
            CheckType::PolicyExpired => "policy_expired",
            CheckType::PolicyNotStarted => "policy_not_started",
            CheckType::PolicyPeriodUnknown => "policy_period_unknown",
            CheckType::InsuredNameMatch => "insured_name_match",
            CheckType::InsuredNameVariation => "insured_name_variation",
            CheckType::InsuredNameMismatch => "insured_name_mismatch",
            CheckType::MalformedRequirement => "malformed_requirement",
            CheckType::MalformedCoverage => "malformed_coverage",
            CheckType::ExtractionFailed => "extraction_failed",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One itemized check in a verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub check_type: CheckType,
    pub description: String,
    pub status: CheckStatus,
    pub details: String,

    /// Coverage type the check was evaluated for (None for structural checks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_type: Option<String>,
}

impl Check {
    pub fn new(
        check_type: CheckType,
        status: CheckStatus,
        description: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            check_type,
            description: description.into(),
            status,
            details: details.into(),
            coverage_type: None,
        }
    }

    pub fn for_coverage(mut self, coverage_type: impl Into<String>) -> Self {
        self.coverage_type = Some(coverage_type.into());
        self
    }

    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

// ============================================================================
// DEFICIENCIES
// ============================================================================

/// Deficiency severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specific way a certificate fails a project requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deficiency {
    #[serde(rename = "type")]
    pub deficiency_type: CheckType,
    pub severity: Severity,
    pub description: String,
    pub required_value: Option<String>,
    pub actual_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_type: Option<String>,
}

// ============================================================================
// VERIFICATION RECORD
// ============================================================================

/// Terminal verdict of a verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pass,
    Fail,
    Review,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pass => "pass",
            VerificationStatus::Fail => "fail",
            VerificationStatus::Review => "review",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the confidence and fraud gate did to the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    /// Verdict follows the deficiencies
    Clear,
    /// Trust signals too weak, human review required
    Review,
    /// Fraud block, verdict forced to fail
    Fail,
}

/// Gate result carried on the verification so a forced verdict explains itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    pub outcome: GateOutcome,
    #[serde(default)]
    pub reason: Option<String>,
}

impl GateDecision {
    pub fn clear() -> Self {
        Self {
            outcome: GateOutcome::Clear,
            reason: None,
        }
    }

    pub fn review(reason: impl Into<String>) -> Self {
        Self {
            outcome: GateOutcome::Review,
            reason: Some(reason.into()),
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            outcome: GateOutcome::Fail,
            reason: Some(reason.into()),
        }
    }

    pub fn is_clear(&self) -> bool {
        self.outcome == GateOutcome::Clear
    }
}

/// The authoritative compliance determination for one uploaded certificate.
///
/// Created once per upload (or per explicit re-verification) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    #[serde(default)]
    pub document_id: Option<Uuid>,

    pub status: VerificationStatus,

    /// Overall extraction confidence as a percentage, 0-100
    pub confidence_score: u8,

    pub extracted_data: Option<ExtractedData>,

    pub checks: Vec<Check>,

    pub deficiencies: Vec<Deficiency>,

    /// Fields read with low confidence, for highlighting in the UI
    #[serde(default)]
    pub flagged_fields: Vec<String>,

    pub gate: GateDecision,

    pub verified_at: DateTime<Utc>,
}

impl Verification {
    /// Callers fire deficiency communications for failed verifications only
    pub fn requires_notification(&self) -> bool {
        self.status == VerificationStatus::Fail
    }

    /// Count deficiencies of the given severity
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.deficiencies
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Highest deficiency severity present
    pub fn worst_severity(&self) -> Option<Severity> {
        self.deficiencies.iter().map(|d| d.severity).max()
    }

    /// One-line description for logs and communications
    pub fn summary(&self) -> String {
        format!(
            "{}: {} checks, {} critical / {} major / {} minor deficiencies, confidence {}%",
            self.status,
            self.checks.len(),
            self.count_severity(Severity::Critical),
            self.count_severity(Severity::Major),
            self.count_severity(Severity::Minor),
            self.confidence_score,
        )
    }
}

// ============================================================================
// COMPLIANCE EXCEPTIONS AND ROLLUP
// ============================================================================

/// Lifecycle of a compliance exception
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionStatus {
    PendingApproval,
    Approved,
    Rejected,
    Revoked,
}

/// Approved, time-bounded waiver letting a non-compliant subcontractor stay on site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceException {
    pub id: Uuid,
    pub reason: String,
    #[serde(default)]
    pub approved_by: Option<String>,
    pub status: ExceptionStatus,
    /// None means the waiver holds until revoked
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ComplianceException {
    /// Whether the waiver is in force at the given instant
    pub fn is_active_at(&self, as_of: DateTime<Utc>) -> bool {
        self.status == ExceptionStatus::Approved
            && self.expires_at.map_or(true, |expires| expires > as_of)
    }
}

/// Compliance status of a subcontractor on a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    Pending,
    Exception,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NonCompliant => "non_compliant",
            ComplianceStatus::Pending => "pending",
            ComplianceStatus::Exception => "exception",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
