//! Error taxonomy for deductions, concepts and the rule engine (§7, §10.2).

use mars2grib_core::DictError;

use crate::rule::TraceEntry;
use crate::stage::Stage;

/// A named deduction (§4.4) could not produce a value.
#[derive(Debug, thiserror::Error)]
#[error("deduction '{name}' failed")]
pub struct DeductionError {
    pub name: &'static str,
    #[source]
    pub source: DeductionCause,
}

impl DeductionError {
    pub fn new(name: &'static str, source: impl Into<DeductionCause>) -> Self {
        DeductionError {
            name,
            source: source.into(),
        }
    }
}

/// The underlying cause of a deduction failure.
#[derive(Debug, thiserror::Error)]
pub enum DeductionCause {
    #[error(transparent)]
    Dict(#[from] DictError),

    #[error("{0}")]
    Message(String),
}

/// A concept invocation failed (§7 "Concept error").
#[derive(Debug, thiserror::Error)]
#[error("concept '{concept}' variant '{variant}' failed at stage {stage:?} section {section}")]
pub struct ConceptError {
    pub concept: &'static str,
    pub variant: &'static str,
    pub stage: Stage,
    pub section: u8,
    #[source]
    pub source: ConceptOpError,
}

/// Error produced from inside a concept `op`, before it is tagged with
/// concept/variant/stage/section context by the dispatch loop.
#[derive(Debug, thiserror::Error)]
pub enum ConceptOpError {
    #[error(transparent)]
    Dict(#[from] DictError),

    #[error(transparent)]
    Deduction(#[from] DeductionError),

    #[error("{expected} expected template in {allowed:?}, got {actual}")]
    Validation {
        expected: &'static str,
        allowed: &'static [i64],
        actual: i64,
    },

    #[error("structural precondition violated: {0}")]
    Precondition(String),
}

/// The rule engine could not dispatch (§4.6); carries the log trace so a
/// caller can reproduce the exact branch taken without re-running anything.
#[derive(Debug, thiserror::Error)]
#[error("rule engine failed: {message}")]
pub struct RuleError {
    pub message: String,
    pub trace: Vec<TraceEntry>,
}
