//! Requirement Matcher
//!
//! Aligns a project's requirement list with the coverages read off a
//! certificate. One output pair per requirement, in requirement order;
//! requirements with no matching coverage are kept with `coverage: None`.

use std::collections::HashMap;

use coc_types::{Coverage, InsuranceRequirement};
use tracing::{debug, warn};

use crate::error::InputIssue;

/// Normalize a coverage type for comparison.
///
/// Case-insensitive; spaces, hyphens and runs of underscores collapse to a
/// single underscore; other punctuation is dropped.
/// `"Public Liability"`, `"public-liability"` and `"PUBLIC__LIABILITY"` all
/// normalize to `public_liability`.
pub fn normalize_coverage_type(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if pending_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            pending_separator = false;
            normalized.extend(c.to_lowercase());
        } else if matches!(c, '_' | ' ' | '-' | '/') {
            pending_separator = true;
        }
    }

    normalized
}

/// A requirement paired with the coverage chosen for it
#[derive(Debug, Clone)]
pub struct RequirementMatch<'a> {
    /// Position in the project's requirement list
    pub position: usize,

    pub requirement: &'a InsuranceRequirement,

    /// Normalized coverage type; None when the requirement is malformed
    pub coverage_type: Option<String>,

    /// Best coverage of that type, if the certificate lists one
    pub coverage: Option<&'a Coverage>,
}

/// Matcher output: the pairs plus any coverages that could not be matched at all
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome<'a> {
    pub matches: Vec<RequirementMatch<'a>>,
    pub issues: Vec<InputIssue>,
}

/// Pairs requirements with extracted coverages
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementMatcher;

impl RequirementMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Match every requirement against the extracted coverages.
    ///
    /// When the certificate lists the same coverage type more than once the
    /// line with the highest numeric limit wins; non-numeric or missing
    /// limits rank below any number and ties keep extraction order.
    pub fn match_requirements<'a>(
        &self,
        requirements: &'a [InsuranceRequirement],
        coverages: &'a [Coverage],
    ) -> MatchOutcome<'a> {
        let (index, issues) = self.index_coverages(coverages);

        let matches = requirements
            .iter()
            .enumerate()
            .map(|(position, requirement)| {
                let coverage_type = requirement
                    .coverage_type
                    .as_deref()
                    .map(normalize_coverage_type)
                    .filter(|t| !t.is_empty());

                let coverage = coverage_type
                    .as_ref()
                    .and_then(|t| index.get(t.as_str()).copied());

                debug!(
                    position,
                    coverage_type = coverage_type.as_deref().unwrap_or("<missing>"),
                    matched = coverage.is_some(),
                    "Matched requirement"
                );

                RequirementMatch {
                    position,
                    requirement,
                    coverage_type,
                    coverage,
                }
            })
            .collect();

        MatchOutcome { matches, issues }
    }

    fn index_coverages<'a>(
        &self,
        coverages: &'a [Coverage],
    ) -> (HashMap<String, &'a Coverage>, Vec<InputIssue>) {
        let mut index: HashMap<String, &'a Coverage> = HashMap::new();
        let mut issues = Vec::new();

        for (position, coverage) in coverages.iter().enumerate() {
            let Some(coverage_type) = coverage
                .coverage_type
                .as_deref()
                .map(normalize_coverage_type)
                .filter(|t| !t.is_empty())
            else {
                let issue = InputIssue::MalformedCoverage {
                    position,
                    reason: "coverage type is missing".to_string(),
                };
                warn!("{}", issue);
                issues.push(issue);
                continue;
            };

            let replace = index
                .get(&coverage_type)
                .map_or(true, |current| limit_rank(coverage) > limit_rank(current));
            if replace {
                index.insert(coverage_type, coverage);
            }
        }

        (index, issues)
    }
}

fn limit_rank(coverage: &Coverage) -> Option<rust_decimal::Decimal> {
    coverage.limit.as_ref().and_then(|l| l.as_decimal())
}
