//! Dictionary and code-table error kinds (§7: Dictionary error, Table error).
//!
//! The remaining five kinds (Deduction, Concept, Validation, Rule, Protocol)
//! live in the crates that own the concepts they describe; this crate only
//! defines the two kinds that the dictionary and table layers themselves can
//! raise, since every other error type nests one of these as its `#[source]`.

use crate::Value;

/// Dictionary error: missing key, wrong type, or backend rejection on set.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DictError {
    #[error("key \"{key}\" not found in dictionary")]
    MissingKey { key: String },

    #[error("key \"{key}\" has kind \"{actual}\", requested as \"{requested}\"")]
    TypeMismatch {
        key: String,
        requested: &'static str,
        actual: &'static str,
    },

    #[error("backend rejected set(\"{key}\" = {value:?}): {reason}")]
    BackendRejected {
        key: String,
        value: Value,
        reason: String,
    },
}

impl DictError {
    pub fn missing(key: impl Into<String>) -> Self {
        DictError::MissingKey { key: key.into() }
    }

    pub fn type_mismatch(key: impl Into<String>, requested: &'static str, actual: &Value) -> Self {
        DictError::TypeMismatch {
            key: key.into(),
            requested,
            actual: actual.kind_name(),
        }
    }
}

/// Table error: a GRIB code-table enum cannot be mapped to or from a numeric code.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TableError {
    #[error("table \"{table}\" has no entry named \"{name}\"")]
    UnknownName { table: &'static str, name: String },

    #[error("table \"{table}\" has no entry with code {code}")]
    UnknownCode { table: &'static str, code: i64 },
}
