//! The `representation` concept (§4.3): selects a grid type and Grid
//! Definition Template Number at `Allocate`, writes the full geometry at
//! `Preset`.

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::error::ConceptOpError;
use crate::registry::ConceptOp;
use crate::stage::Stage;

// Matchers see only `mars` and `opt` (§4.2): the grid's shape is requested
// through `opt`, since `geo` itself is only assembled once a grid type (and
// therefore a Grid Definition Template) has already been chosen.
pub fn matcher(mars: &MemDict, opt: &MemDict) -> Option<&'static str> {
    if mars.has("truncation") {
        Some("sphericalHarmonics")
    } else if matches!(opt.get("reducedGrid"), Some(v) if v.as_i64() == Some(1)) {
        Some("reducedGaussian")
    } else if matches!(opt.get("gridType").and_then(|v| v.as_str()), Some("healpix")) {
        Some("healpix")
    } else {
        Some("regularLatLon")
    }
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    if section != 3 {
        return None;
    }
    match (variant, stage) {
        ("regularLatLon", Stage::Allocate) => Some(allocate::<0>),
        ("reducedGaussian", Stage::Allocate) => Some(allocate::<40>),
        ("sphericalHarmonics", Stage::Allocate) => Some(allocate::<50>),
        ("healpix", Stage::Allocate) => Some(allocate::<150>),
        ("regularLatLon", Stage::Preset) => Some(preset_regular_ll),
        ("reducedGaussian", Stage::Preset) => Some(preset_reduced_gg),
        ("sphericalHarmonics", Stage::Preset) => Some(preset_spherical_harmonics),
        ("healpix", Stage::Preset) => Some(preset_healpix),
        _ => None,
    }
}

fn allocate<const TEMPLATE: i64>(
    _mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    out.set_or_throw("gridDefinitionTemplateNumber", Value::Int(TEMPLATE))?;
    Ok(())
}

fn preset_regular_ll(
    _mars: &MemDict,
    geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    out.set_or_throw("Ni", Value::Int(geo.get_i64("Ni")?))?;
    out.set_or_throw("Nj", Value::Int(geo.get_i64("Nj")?))?;
    out.set_or_throw("latitudeOfFirstGridPointInDegrees", Value::Double(geo.get_f64("latitudeOfFirstGridPoint")?))?;
    out.set_or_throw("longitudeOfFirstGridPointInDegrees", Value::Double(geo.get_f64("longitudeOfFirstGridPoint")?))?;
    out.set_or_throw("latitudeOfLastGridPointInDegrees", Value::Double(geo.get_f64("latitudeOfLastGridPoint")?))?;
    out.set_or_throw("longitudeOfLastGridPointInDegrees", Value::Double(geo.get_f64("longitudeOfLastGridPoint")?))?;
    out.set_or_throw("iDirectionIncrementInDegrees", Value::Double(geo.get_f64("iDirectionIncrement")?))?;
    out.set_or_throw("jDirectionIncrementInDegrees", Value::Double(geo.get_f64("jDirectionIncrement")?))?;
    Ok(())
}

fn preset_reduced_gg(
    _mars: &MemDict,
    geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    out.set_or_throw("Nj", Value::Int(geo.get_i64("Nj")?))?;
    out.set_or_throw("pl", Value::IntVec(geo.get_int_vec("pl")?.to_vec()))?;
    Ok(())
}

fn preset_spherical_harmonics(
    _mars: &MemDict,
    geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let j = geo.get_i64("pentagonalResolutionParameterJ")?;
    let k = geo.get_i64("pentagonalResolutionParameterK")?;
    let m = geo.get_i64("pentagonalResolutionParameterM")?;
    out.set_or_throw("J", Value::Int(j))?;
    out.set_or_throw("K", Value::Int(k))?;
    out.set_or_throw("M", Value::Int(m))?;
    Ok(())
}

fn preset_healpix(
    _mars: &MemDict,
    geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    out.set_or_throw("Nside", Value::Int(geo.get_i64("nside")?))?;
    out.set_or_throw("orderingConvention", Value::Str(geo.get_str("orderingConvention")?.to_owned()))?;
    out.set_or_throw(
        "longitudeOfFirstGridPointInDegrees",
        Value::Double(geo.get_f64("longitudeOfFirstGridPoint")?),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matcher_defaults_to_regular_lat_lon() {
        assert_eq!(matcher(&MemDict::new(), &MemDict::new()), Some("regularLatLon"));
    }

    #[test]
    fn matcher_picks_spherical_harmonics_for_truncation() {
        let mut mars = MemDict::new();
        mars.insert("truncation", 63_i64);
        assert_eq!(matcher(&mars, &MemDict::new()), Some("sphericalHarmonics"));
    }

    #[test]
    fn allocate_writes_grid_definition_template_number() {
        let mut out = MemDict::new();
        allocate::<40>(&MemDict::new(), &MemDict::new(), &MemDict::new(), &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("gridDefinitionTemplateNumber").unwrap(), 40);
    }
}
