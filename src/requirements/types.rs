//! Requirement Template Type Definitions
//!
//! Named requirement sets loaded from YAML, e.g. a baseline for all trades
//! and a stricter set for high-risk work that extends it.

use chrono::NaiveDate;
use coc_types::InsuranceRequirement;
use serde::{Deserialize, Serialize};

/// A requirement template definition (from YAML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementTemplateDef {
    /// Unique identifier (e.g., "trade.baseline")
    pub id: String,

    /// Human-readable display name
    #[serde(rename = "display-name")]
    pub display_name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// When this template becomes effective
    #[serde(rename = "effective-from")]
    pub effective_from: NaiveDate,

    /// When this template stops applying (None = open-ended)
    #[serde(rename = "effective-to", default)]
    pub effective_to: Option<NaiveDate>,

    /// Parent template ID for inheritance
    #[serde(default)]
    pub extends: Option<String>,

    #[serde(default)]
    pub requirements: Vec<InsuranceRequirement>,
}

impl RequirementTemplateDef {
    /// Check if this template applies on a given date
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.map_or(true, |end| end > date)
    }
}

/// A requirement after inheritance resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRequirement {
    pub requirement: InsuranceRequirement,

    /// Which template this requirement came from (may differ due to inheritance)
    pub source_template_id: String,
}

/// YAML file structure for requirement templates
#[derive(Debug, Deserialize)]
pub(crate) struct TemplateFile {
    #[serde(default)]
    pub templates: Vec<RequirementTemplateDef>,
}
