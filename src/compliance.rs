//! Compliance Rollup
//!
//! Derives a subcontractor's compliance status on a project from the latest
//! verification and any compliance exceptions. Pure: the caller supplies
//! the clock.

use chrono::{DateTime, Utc};
use coc_types::{ComplianceException, ComplianceStatus, Verification, VerificationStatus};
use tracing::debug;

/// Rolls verifications and exceptions up into a compliance status
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceRollup;

impl ComplianceRollup {
    pub fn new() -> Self {
        Self
    }

    /// Compliance status at `as_of`.
    ///
    /// An active exception covers any verification that is not a pass.
    /// A passing verification stops counting once the verified policy ends.
    pub fn status(
        &self,
        latest: Option<&Verification>,
        exceptions: &[ComplianceException],
        as_of: DateTime<Utc>,
    ) -> ComplianceStatus {
        let passed = latest.is_some_and(|v| v.status == VerificationStatus::Pass);

        if !passed {
            if let Some(exception) = exceptions.iter().find(|e| e.is_active_at(as_of)) {
                debug!(exception_id = %exception.id, "Active compliance exception applies");
                return ComplianceStatus::Exception;
            }
        }

        let Some(verification) = latest else {
            return ComplianceStatus::Pending;
        };

        match verification.status {
            VerificationStatus::Pass if policy_lapsed(verification, as_of) => {
                debug!("Verified policy has since expired");
                ComplianceStatus::NonCompliant
            }
            VerificationStatus::Pass => ComplianceStatus::Compliant,
            VerificationStatus::Fail => ComplianceStatus::NonCompliant,
            VerificationStatus::Review => ComplianceStatus::Pending,
        }
    }
}

/// True when the verified policy period ended before `as_of`
fn policy_lapsed(verification: &Verification, as_of: DateTime<Utc>) -> bool {
    verification
        .extracted_data
        .as_ref()
        .and_then(|data| data.period_end)
        .is_some_and(|end| end < as_of.date_naive())
}
