//! Section 1 (Identification) initializer.
//!
//! Placeholder: identification/origin metadata is not concept-driven in this
//! architecture either, so this is a no-op, same as section 0.

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
