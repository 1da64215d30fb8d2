//! Section 0 (Indicator) initializer.
//!
//! Placeholder: Section 0 carries no concept-driven or dictionary-based
//! state in this architecture, so this is a no-op kept only so the registry
//! doesn't need a hole for section 0.

use mars2grib_core::{Dictionary, MemDict};

use crate::error::SectionError;

pub fn init(
    _mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    _template: i64,
    _out: &mut dyn Dictionary,
) -> Result<(), SectionError> {
    Ok(())
}
