//! Section 4 (Product Definition) initializer.
//!
//! Every registered template number maps straight onto
//! `productDefinitionTemplateNumber`; the concept layer is responsible for
//! everything else this section needs.

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
    out.set_or_throw("productDefinitionTemplateNumber", template.into())
        .map_err(|e| SectionError::init(4, template, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mars2grib_core::MemDict;

    #[test]
    fn writes_template_number_directly() {
        let mars = MemDict::new();
        let geo = MemDict::new();
        let par = MemDict::new();
        let opt = MemDict::new();
        let mut out = MemDict::new();
        init(&mars, &geo, &par, &opt, 8, &mut out).unwrap();
        assert_eq!(out.get_i64("productDefinitionTemplateNumber").unwrap(), 8);
    }
}
