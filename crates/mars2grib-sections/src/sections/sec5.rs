//! Section 5 (Data Representation) initializer.
//!
//! Same shape as Section 4: the template number is the only structural
//! key this section writes, onto `dataRepresentationTemplateNumber`.

use mars2grib_core::{Dictionary, MemDict};

use crate::error::SectionError;

pub fn init(
    _mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    template: i64,
    out: &mut dyn Dictionary,
) -> Result<(), SectionError> {
    out.set_or_throw("dataRepresentationTemplateNumber", template.into())
        .map_err(|e| SectionError::init(5, template, e))
}
