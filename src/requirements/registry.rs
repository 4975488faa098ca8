//! Requirement Template Registry
//!
//! In-memory registry of requirement templates loaded from YAML files.
//! Handles inheritance resolution: a child requirement replaces the inherited
//! requirement for the same coverage type and limit type; everything else
//! (including repeats within one template) is appended.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use coc_types::{InsuranceRequirement, LimitType};
use tracing::{debug, info, warn};

use super::types::{RequirementTemplateDef, ResolvedRequirement, TemplateFile};
use crate::verification::normalize_coverage_type;

/// Maximum `extends` depth
const MAX_INHERITANCE_DEPTH: usize = 10;

/// Registry of requirement templates loaded from YAML
#[derive(Debug, Clone, Default)]
pub struct RequirementTemplateRegistry {
    /// All templates indexed by ID
    templates: HashMap<String, RequirementTemplateDef>,

    /// Pre-resolved templates (with inheritance applied)
    resolved_cache: HashMap<String, Vec<ResolvedRequirement>>,
}

impl RequirementTemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load templates from a directory containing YAML files
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut registry = Self::new();

        if !dir.exists() {
            warn!("Requirement templates directory does not exist: {:?}", dir);
            return Ok(registry);
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read requirement templates directory: {:?}", dir))?
        {
            let path = entry?.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            debug!("Loading requirement templates from {:?}", path);
            registry.load_file(path)?;
        }

        registry.build_resolved_cache()?;

        info!(
            "Loaded {} requirement templates from {:?}",
            registry.templates.len(),
            dir
        );

        Ok(registry)
    }

    /// Load templates from a single YAML file.
    ///
    /// Call [`Self::build_resolved_cache`] once all files are loaded.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template file: {:?}", path))?;
        self.load_str(&content)
            .with_context(|| format!("Failed to parse template file: {:?}", path))
    }

    /// Load templates from YAML text
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: TemplateFile = serde_yaml::from_str(content)?;
        for template in file.templates {
            debug!("Loaded requirement template: {}", template.id);
            self.insert(template);
        }
        Ok(())
    }

    /// Add or replace a template definition
    pub fn insert(&mut self, template: RequirementTemplateDef) {
        for (position, requirement) in template.requirements.iter().enumerate() {
            if requirement.coverage_type.is_none() {
                warn!(
                    "Template {} requirement #{} has no coverage type",
                    template.id, position
                );
            }
        }
        self.templates.insert(template.id.clone(), template);
    }

    /// Get a template by ID (raw, without inheritance resolution)
    pub fn get(&self, template_id: &str) -> Option<&RequirementTemplateDef> {
        self.templates.get(template_id)
    }

    /// Get a template with inheritance resolved
    pub fn get_resolved(&self, template_id: &str) -> Option<&[ResolvedRequirement]> {
        self.resolved_cache.get(template_id).map(|v| v.as_slice())
    }

    /// Resolved requirements for a template, ready to hand to the verifier
    pub fn requirements_for(&self, template_id: &str) -> Option<Vec<InsuranceRequirement>> {
        self.get_resolved(template_id)
            .map(|resolved| resolved.iter().map(|r| r.requirement.clone()).collect())
    }

    /// All template IDs, sorted
    pub fn list_template_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Templates in force on a given date, sorted by ID
    pub fn list_effective_on(&self, date: NaiveDate) -> Vec<&RequirementTemplateDef> {
        let mut effective: Vec<_> = self
            .templates
            .values()
            .filter(|t| t.is_effective_on(date))
            .collect();
        effective.sort_by(|a, b| a.id.cmp(&b.id));
        effective
    }

    /// Build the resolved cache for all templates
    pub fn build_resolved_cache(&mut self) -> Result<()> {
        let mut resolved_cache = HashMap::new();
        for template_id in self.templates.keys() {
            let resolved = self.resolve_inheritance(template_id)?;
            resolved_cache.insert(template_id.clone(), resolved);
        }
        self.resolved_cache = resolved_cache;
        Ok(())
    }

    /// Resolve inheritance for a template
    fn resolve_inheritance(&self, template_id: &str) -> Result<Vec<ResolvedRequirement>> {
        let mut chain = Vec::new();
        let mut current_id = Some(template_id.to_string());
        let mut visited = HashSet::new();

        // Walk up the inheritance chain
        while let Some(id) = current_id {
            if !visited.insert(id.clone()) {
                return Err(anyhow!(
                    "Circular inheritance detected in template: {}",
                    template_id
                ));
            }

            let template = self.templates.get(&id).ok_or_else(|| {
                anyhow!("Template not found: {} (referenced by {})", id, template_id)
            })?;

            chain.push(template);
            current_id = template.extends.clone();

            if chain.len() > MAX_INHERITANCE_DEPTH {
                return Err(anyhow!(
                    "Inheritance chain too deep for template: {}",
                    template_id
                ));
            }
        }

        // Root ancestor first; a child replaces the inherited requirement with
        // the same (coverage type, limit type), anything else is appended
        let mut resolved: Vec<ResolvedRequirement> = Vec::new();
        for template in chain.iter().rev() {
            for requirement in &template.requirements {
                let entry = ResolvedRequirement {
                    requirement: requirement.clone(),
                    source_template_id: template.id.clone(),
                };

                let key = override_key(requirement);
                let inherited = key.as_ref().and_then(|key| {
                    resolved.iter().position(|r| {
                        r.source_template_id != template.id
                            && override_key(&r.requirement).as_ref() == Some(key)
                    })
                });

                match inherited {
                    Some(position) => resolved[position] = entry,
                    None => resolved.push(entry),
                }
            }
        }

        Ok(resolved)
    }
}

/// Identity of a requirement for inheritance; None for malformed requirements
fn override_key(requirement: &InsuranceRequirement) -> Option<(String, LimitType)> {
    requirement
        .coverage_type
        .as_deref()
        .map(normalize_coverage_type)
        .filter(|k| !k.is_empty())
        .map(|k| (k, requirement.limit_type))
}
