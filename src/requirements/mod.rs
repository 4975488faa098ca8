//! Requirement Templates
//!
//! YAML-defined requirement sets that projects snapshot into their
//! insurance requirements.
//!
//! ## Inheritance
//!
//! Templates can extend other templates:
//! - `trade.baseline`: public liability and workers compensation
//! - `trade.high-risk` extends `trade.baseline`: raises the public liability
//!   limit and adds professional indemnity
//!
//! A child requirement replaces the parent requirement with the same
//! (normalized) coverage type; other child requirements are appended.

mod registry;
mod types;

pub use registry::RequirementTemplateRegistry;
pub use types::{RequirementTemplateDef, ResolvedRequirement};
