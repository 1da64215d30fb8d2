//! Section 3 (Grid Definition) initializer.
//!
//! Template 50 (spectral) writes a fixed placeholder grid — six arbitrary
//! values and truncation parameters `J=K=M=1` — rather than deriving
//! anything from the geometry dictionary. `geo` is accepted (this is the
//! only section initializer that takes it) but never actually read, in this
//! branch or the standard one; preserved as-is rather than wired up to real
//! grid geometry, since it isn't obvious what it would mean for a spectral
//! placeholder to read a grid-point geometry dict (see Open Questions).

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
    run(template, out).map_err(|e| SectionError::init(3, template, e))
}

fn run(template: i64, out: &mut dyn Dictionary) -> Result<(), mars2grib_core::DictError> {
    if template == 50 {
        out.set_or_throw("numberOfDataPoints", 6_i64.into())?;
        out.set_or_throw("numberOfValues", 6_i64.into())?;
        out.set_or_throw("bitsPerValue", 16_i64.into())?;
        out.set_or_throw("typeOfFirstFixedSurface", 105_i64.into())?;
        out.set_or_throw("values", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0].into())?;
        out.set_or_throw("scaleFactorOfFirstFixedSurface", 0_i64.into())?;
        out.set_or_throw("scaledValueOfFirstFixedSurface", 0_i64.into())?;
        out.set_or_throw("gridDefinitionTemplateNumber", 50_i64.into())?;
        out.set_or_throw("J", 1_i64.into())?;
        out.set_or_throw("K", 1_i64.into())?;
        out.set_or_throw("M", 1_i64.into())?;
        out.set_or_throw("spectralType", 1_i64.into())?;
        out.set_or_throw("spectralMode", 1_i64.into())?;
        out.set_or_throw("numberOfOctectsForNumberOfPoints", 0_i64.into())?;
        out.set_or_throw("interpretationOfNumberOfPoints", 0_i64.into())?;
        out.set_or_throw("dataRepresentationTemplateNumber", 51_i64.into())?;
    } else {
        out.set_or_throw("gridDefinitionTemplateNumber", template.into())?;
        out.set_or_throw("resolutionAndComponentFlags", 0_i64.into())?;
    }

    Ok(())
}
