//! GRIB-handle adapter for the output dictionary (§4.1b).
//!
//! This workspace does not vendor a GRIB backend, so `OutDict` is a
//! self-contained stand-in: an in-memory dictionary seeded from a small
//! static sample table, playing the role the real `codes_handle` plays in
//! the system this crate re-expresses. It still honours the adapter
//! contract `clone` is relied on for: a clone is an independent handle, any
//! writes made before the clone are observable on it, and the source handle
//! remains valid and keeps accumulating its own writes afterward.

use mars2grib_core::{DictError, Dictionary, MemDict, Value};

/// Baseline keys seeded by `from_sample`, keyed by sample name.
///
/// Only `"GRIB2"` is required by §6; the numbered/virtual template names are
/// not separate samples in this adapter — the section initializers in
/// `mars2grib-sections` are what actually populate a section's keys once a
/// concept has chosen its template number.
fn sample_baseline(name: &str) -> Option<&'static [(&'static str, i64)]> {
    match name {
        "GRIB2" => Some(&[("editionNumber", 2)]),
        _ => None,
    }
}

/// An output dictionary backed by an in-memory map rather than a real
/// backend handle, implementing the same [`Dictionary`] trait `MemDict`
/// does so concepts and section initializers never need to know which one
/// they were handed.
#[derive(Debug, Clone, Default)]
pub struct OutDict(MemDict);

impl OutDict {
    /// Start a new output dictionary from a named GRIB sample (§6).
    pub fn from_sample(name: &str) -> Result<Self, DictError> {
        let baseline = sample_baseline(name).ok_or_else(|| DictError::BackendRejected {
            key: "sample".to_owned(),
            value: Value::Str(name.to_owned()),
            reason: format!("no sample registered under the name \"{name}\""),
        })?;
        let mut dict = MemDict::new();
        for (key, value) in baseline {
            dict.insert(*key, *value);
        }
        Ok(OutDict(dict))
    }

    /// Produce an independent handle carrying every write made so far,
    /// leaving `self` valid and writable (§4.1b, §5 "total flush").
    pub fn clone_handle(&self) -> Self {
        self.clone()
    }

    pub fn into_mem_dict(self) -> MemDict {
        self.0
    }
}

impl Dictionary for OutDict {
    fn has(&self, key: &str) -> bool {
        self.0.has(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn set_or_throw(&mut self, key: &str, value: Value) -> Result<(), DictError> {
        self.0.set_or_throw(key, value)
    }

    fn set_missing(&mut self, key: &str) -> Result<(), DictError> {
        self.0.set_missing(key)
    }
}
