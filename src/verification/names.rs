//! Insured-party matching
//!
//! Compares the insured party printed on a certificate with the
//! subcontractor the certificate was uploaded for. ABN equality is
//! decisive; otherwise names are compared after normalization:
//! - Unicode NFKC fold
//! - Lowercase conversion
//! - Punctuation stripped, whitespace collapsed
//! - Legal suffixes and trustee wording removed

use coc_types::{ExtractedData, SubcontractorIdentity};
use unicode_normalization::UnicodeNormalization;

/// Legal suffixes and trading words that do not distinguish entities
const LEGAL_SUFFIXES: &[&str] = &[
    "pty",
    "ltd",
    "limited",
    "proprietary",
    "inc",
    "incorporated",
    "corp",
    "corporation",
    "co",
    "company",
    "llc",
    "plc",
    "trading",
];

/// Trustee wording, e.g. "The Trustee for Smith Family Trust" or "Smith Pty Ltd ATF ..."
const TRUSTEE_WORDS: &[&str] = &["the", "trustee", "for", "atf"];

/// Result of comparing the insured party with the expected subcontractor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NameMatch {
    /// ABNs are present on both sides and equal
    AbnMatch,
    /// Normalized names are identical
    Exact,
    /// Names differ but are similar enough to be the same entity
    Variation { similarity: f64 },
    /// Names (or ABNs) identify different entities
    Mismatch { similarity: f64 },
    /// The certificate carries no name or ABN to compare
    Unreadable,
}

/// Normalize an entity name for comparison
pub fn normalize_entity_name(name: &str) -> String {
    let folded: String = name.nfkc().collect();

    let stripped: String = folded
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();

    stripped
        .split_whitespace()
        .filter(|t| !LEGAL_SUFFIXES.contains(t) && !TRUSTEE_WORDS.contains(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Digits of an ABN, ignoring spacing
pub fn normalize_abn(abn: &str) -> String {
    abn.chars().filter(char::is_ascii_digit).collect()
}

/// Compares certificate insured parties against expected subcontractors
#[derive(Debug, Clone, Copy)]
pub struct InsuredNameMatcher {
    similarity_threshold: f64,
}

impl InsuredNameMatcher {
    pub fn new(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
        }
    }

    pub fn compare(&self, expected: &SubcontractorIdentity, data: &ExtractedData) -> NameMatch {
        let expected_abn = expected.abn.as_deref().map(normalize_abn);
        let actual_abn = data.insured_party_abn.as_deref().map(normalize_abn);

        if let (Some(expected_abn), Some(actual_abn)) = (&expected_abn, &actual_abn) {
            if !expected_abn.is_empty() && !actual_abn.is_empty() {
                return if expected_abn == actual_abn {
                    NameMatch::AbnMatch
                } else {
                    NameMatch::Mismatch { similarity: 0.0 }
                };
            }
        }

        let (Some(expected_name), Some(actual_name)) =
            (expected.name.as_deref(), data.insured_party_name.as_deref())
        else {
            return NameMatch::Unreadable;
        };

        let expected_name = normalize_entity_name(expected_name);
        let actual_name = normalize_entity_name(actual_name);
        if actual_name.is_empty() {
            return NameMatch::Unreadable;
        }
        if expected_name == actual_name {
            return NameMatch::Exact;
        }

        let similarity = strsim::jaro_winkler(&expected_name, &actual_name);
        if similarity >= self.similarity_threshold {
            NameMatch::Variation { similarity }
        } else {
            NameMatch::Mismatch { similarity }
        }
    }
}
