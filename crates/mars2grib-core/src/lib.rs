#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Dictionary abstraction, value model and shared error taxonomy for the
//! mars2grib GRIB2 encoder.
//!
//! Two dictionary implementations share the [`Dictionary`] trait:
//! - **in-memory** ([`MemDict`]): an `IndexMap`-backed map, used for the
//!   `mars`, `geo`, `par`, `opt` inputs and the rule engine's working dict.
//! - **GRIB-handle adapter** (`mars2grib-runtime::OutDict`): wraps an opaque
//!   backend handle and is defined downstream, since it depends on the
//!   backend crate this workspace does not vendor.

pub mod dict;
pub mod error;
pub mod table;

pub use dict::{Dictionary, MemDict};
pub use error::{DictError, TableError};

/// A value stored in or read from a dictionary (§3 Data Model).
///
/// The set is closed and lossless: no implicit coercions happen inside the
/// dictionary layer itself. A missing value is represented explicitly rather
/// than by the absence of a key, so that `set_missing` followed by `get`
/// round-trips.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    Int(i64),
    Double(f64),
    Str(String),
    Missing,
    IntVec(Vec<i64>),
    DoubleVec(Vec<f64>),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_vec(&self) -> Option<&[i64]> {
        match self {
            Value::IntVec(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double_vec(&self) -> Option<&[f64]> {
        match self {
            Value::DoubleVec(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Name of this value's kind, used in [`DictError`] and table error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Missing => "missing",
            Value::IntVec(_) => "int-vector",
            Value::DoubleVec(_) => "double-vector",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Value::IntVec(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::DoubleVec(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_round_trips() {
        let v = Value::Missing;
        assert!(v.is_missing());
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }

    #[test]
    fn double_reads_int_as_double() {
        // "setting an integer and later reading as double is implementation-defined" (§3)
        // this implementation chooses to widen.
        assert_eq!(Value::Int(4).as_f64(), Some(4.0));
        assert_eq!(Value::Double(4.0).as_i64(), None);
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(Value::Int(0).kind_name(), "int");
        assert_eq!(Value::DoubleVec(vec![]).kind_name(), "double-vector");
    }
}
