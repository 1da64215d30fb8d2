//! Concept registry, deductions, GRIB code tables, and the YAML rule engine
//! for the mars2grib GRIB2 encoder.
//!
//! This crate owns everything this encoder calls "concepts", the
//! rule engine, and the deductions/tables they build on.
//! [`mars2grib_sections`] (a dependency) owns the structural section
//! initializers this crate's concepts assume have already run for the
//! active template.

pub mod concepts;
pub mod deductions;
pub mod error;
pub mod registry;
pub mod rule;
pub mod stage;
pub mod tables;

pub use error::{ConceptError, ConceptOpError, DeductionCause, DeductionError, RuleError};
pub use registry::{resolve_variants, run_cell, ConceptOp, Descriptor, ResolvedVariants, CONCEPTS};
pub use stage::{Stage, NUM_SECTIONS, NUM_STAGES};

/// The stat-param rule file driving the `statistics` concept's
/// `statisticalProcessing` working-dict key (paramId-to-processing mapping,
/// see the `statistics` concept module for the scenarios this covers).
pub const DEFAULT_STAT_PARAM_RULES: &str = include_str!("../resources/stat_param_rules.yaml");

/// Parse and apply the default stat-param rule file, writing
/// `statisticalProcessing` into `work` ahead of the main concept dispatch
/// loop so the `statistics` concept can read it back at `Preset`/section 4.
pub fn apply_stat_param_rules(
    initial: &mars2grib_core::MemDict,
    work: &mut mars2grib_core::MemDict,
    out: &mut dyn mars2grib_core::Dictionary,
) -> Result<(), RuleError> {
    let rule = rule::parse_str(DEFAULT_STAT_PARAM_RULES).map_err(|e| RuleError {
        message: format!("failed to parse default stat-param rules: {e}"),
        trace: Vec::new(),
    })?;
    rule::apply(&rule, "stat_param_rules.yaml", initial, work, out)
}
