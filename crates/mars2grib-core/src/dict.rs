//! The dictionary trait layer (§4.1).
//!
//! Two implementations exist in this workspace: [`MemDict`] here, used for
//! `mars`/`geo`/`par`/`opt` and the rule engine's working dict; and the
//! GRIB-handle adapter in `mars2grib-runtime`, used for the output dict.
//! Both implement the same [`Dictionary`] trait so that concepts, deductions
//! and the rule engine never need to know which backs a given argument.

use indexmap::IndexMap;

use crate::error::DictError;
use crate::Value;

/// Uniform typed accessors over a key/value dictionary (§3).
///
/// `set_or_throw`, `set_missing`, `clone_dict` and `from_sample` are only
/// meaningful for output dictionaries; read-only implementations return a
/// [`DictError::BackendRejected`] for them rather than panicking, so that a
/// concept mistakenly writing to an input dict fails loudly instead of
/// silently no-op'ing.
pub trait Dictionary {
    fn has(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<&Value>;

    fn get_or_throw(&self, key: &str) -> Result<&Value, DictError> {
        self.get(key).ok_or_else(|| DictError::missing(key))
    }

    fn get_i64(&self, key: &str) -> Result<i64, DictError> {
        let v = self.get_or_throw(key)?;
        v.as_i64()
            .ok_or_else(|| DictError::type_mismatch(key, "int", v))
    }

    fn get_f64(&self, key: &str) -> Result<f64, DictError> {
        let v = self.get_or_throw(key)?;
        v.as_f64()
            .ok_or_else(|| DictError::type_mismatch(key, "double", v))
    }

    fn get_str(&self, key: &str) -> Result<&str, DictError> {
        let v = self.get_or_throw(key)?;
        v.as_str()
            .ok_or_else(|| DictError::type_mismatch(key, "string", v))
    }

    fn get_int_vec(&self, key: &str) -> Result<&[i64], DictError> {
        let v = self.get_or_throw(key)?;
        v.as_int_vec()
            .ok_or_else(|| DictError::type_mismatch(key, "int-vector", v))
    }

    fn get_double_vec(&self, key: &str) -> Result<&[f64], DictError> {
        let v = self.get_or_throw(key)?;
        v.as_double_vec()
            .ok_or_else(|| DictError::type_mismatch(key, "double-vector", v))
    }

    fn set_or_throw(&mut self, key: &str, value: Value) -> Result<(), DictError>;

    fn set_missing(&mut self, key: &str) -> Result<(), DictError> {
        self.set_or_throw(key, Value::Missing)
    }
}

/// A pure in-memory dictionary, backed by an order-preserving map.
///
/// Order preservation matters for the rule-engine's `write`/`write-out` key
/// lists and for the JSON dump attached to top-level encode errors (§7):
/// both should reproduce the dictionary in a deterministic, human-legible
/// order rather than hashmap iteration order.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MemDict(IndexMap<String, Value>);

impl MemDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Dictionary for MemDict {
    fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn set_or_throw(&mut self, key: &str, value: Value) -> Result<(), DictError> {
        self.0.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_and_get() {
        let mut d = MemDict::new();
        d.insert("paramId", 8_i64);
        assert!(d.has("paramId"));
        assert!(!d.has("missingKey"));
        assert_eq!(d.get_i64("paramId").unwrap(), 8);
    }

    #[test]
    fn get_or_throw_missing_key() {
        let d = MemDict::new();
        let err = d.get_or_throw("nope").unwrap_err();
        assert!(matches!(err, DictError::MissingKey { .. }));
    }

    #[test]
    fn type_mismatch_reports_both_kinds() {
        let mut d = MemDict::new();
        d.insert("levtype", "sol");
        let err = d.get_i64("levtype").unwrap_err();
        match err {
            DictError::TypeMismatch {
                requested, actual, ..
            } => {
                assert_eq!(requested, "int");
                assert_eq!(actual, "string");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn set_missing_round_trips() {
        let mut d = MemDict::new();
        d.set_missing("x").unwrap();
        assert!(d.get("x").unwrap().is_missing());
    }

    #[test]
    fn preserves_insertion_order() {
        let mut d = MemDict::new();
        d.insert("c", 1_i64);
        d.insert("a", 2_i64);
        d.insert("b", 3_i64);
        let keys: Vec<_> = d.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }
}
