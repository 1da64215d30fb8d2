//! The `level` concept (§4.3, §8 scenarios 3 and 4).
//!
//! Variant selection is driven by `mars["levtype"]`; `typeOfLevel` is
//! written at both `Preset` and `Runtime` because the backend is known to
//! let an earlier stage's value be clobbered by its own side effects
//! between stages.

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::deductions::{resolve_pv_array, resolve_soil_level};
use crate::error::{ConceptOpError, DeductionError};
use crate::registry::ConceptOp;
use crate::stage::Stage;

pub fn matcher(mars: &MemDict, _opt: &MemDict) -> Option<&'static str> {
    match mars.get("levtype").and_then(|v| v.as_str()) {
        Some("ml") | Some("hybrid") => Some("hybrid"),
        Some("sol") => Some("soil"),
        Some("sfc") => Some("surface"),
        Some("pl") => Some("pressure"),
        _ => None,
    }
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    if section != 4 {
        return None;
    }
    match (variant, stage) {
        ("hybrid", Stage::Allocate) => Some(hybrid_allocate),
        ("hybrid", Stage::Preset) | ("hybrid", Stage::Runtime) => Some(hybrid_write_type_of_level),
        ("soil", Stage::Preset) | ("soil", Stage::Runtime) => Some(soil_write),
        ("surface", Stage::Preset) | ("surface", Stage::Runtime) => Some(surface_write),
        ("pressure", Stage::Preset) | ("pressure", Stage::Runtime) => Some(pressure_write),
        _ => None,
    }
}

fn hybrid_allocate(
    _mars: &MemDict,
    _geo: &MemDict,
    par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let pv = resolve_pv_array(par)?;
    out.set_or_throw("PVPresent", Value::Int(1))?;
    out.set_or_throw("pv", Value::DoubleVec(pv))?;
    Ok(())
}

fn hybrid_write_type_of_level(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    out.set_or_throw("typeOfLevel", Value::Str("hybrid".to_owned()))?;
    let level = mars
        .get_i64("level")
        .map_err(|e| DeductionError::new("level", e))?;
    out.set_or_throw("level", Value::Int(level))?;
    Ok(())
}

fn soil_level(mars: &MemDict) -> Result<crate::deductions::SoilLevel, ConceptOpError> {
    let param_id = mars.get_i64("paramId").map_err(|e| DeductionError::new("level", e))?;
    let level = mars.get_i64("level").map_err(|e| DeductionError::new("level", e))?;
    resolve_soil_level(param_id, level).map_err(Into::into)
}

fn soil_write(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let soil = soil_level(mars)?;
    out.set_or_throw("typeOfLevel", Value::Str(soil.type_of_level.to_owned()))?;
    out.set_or_throw(
        "scaledValueOfFirstFixedSurface",
        Value::Int(soil.scaled_value_of_first_fixed_surface),
    )?;
    match soil.scaled_value_of_second_fixed_surface {
        Some(second) => out.set_or_throw("scaledValueOfSecondFixedSurface", Value::Int(second))?,
        None => {}
    }
    Ok(())
}

fn surface_write(
    _mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    out.set_or_throw("typeOfLevel", Value::Str("surface".to_owned()))?;
    out.set_or_throw("scaledValueOfFirstFixedSurface", Value::Int(0))?;
    Ok(())
}

fn pressure_write(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let level = mars
        .get_i64("level")
        .map_err(|e| DeductionError::new("level", e))?;
    out.set_or_throw("typeOfLevel", Value::Str("isobaricInPa".to_owned()))?;
    out.set_or_throw("scaledValueOfFirstFixedSurface", Value::Int(level * 100))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mars_with(pairs: &[(&str, Value)]) -> MemDict {
        MemDict::from_pairs(pairs.iter().map(|(k, v)| (*k, v.clone())))
    }

    #[test]
    fn matcher_disables_for_unknown_levtype() {
        let mars = mars_with(&[("levtype", Value::Str("unknown".to_owned()))]);
        assert_eq!(matcher(&mars, &MemDict::new()), None);
    }

    #[test]
    fn soil_layer_scenario_matches_spec() {
        let mars = mars_with(&[
            ("paramId", Value::Int(260_367)),
            ("levtype", Value::Str("sol".to_owned())),
            ("level", Value::Int(4)),
        ]);
        let mut out = MemDict::new();
        soil_write(&mars, &MemDict::new(), &MemDict::new(), &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_str("typeOfLevel").unwrap(), "soilLayer");
        assert_eq!(out.get_i64("scaledValueOfFirstFixedSurface").unwrap(), 3);
        assert_eq!(out.get_i64("scaledValueOfSecondFixedSurface").unwrap(), 4);
    }

    #[test]
    fn soil_point_scenario_matches_spec() {
        let mars = mars_with(&[
            ("paramId", Value::Int(260_644)),
            ("levtype", Value::Str("sol".to_owned())),
            ("level", Value::Int(4)),
        ]);
        let mut out = MemDict::new();
        soil_write(&mars, &MemDict::new(), &MemDict::new(), &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_str("typeOfLevel").unwrap(), "soil");
        assert_eq!(out.get_i64("scaledValueOfFirstFixedSurface").unwrap(), 4);
        assert!(!out.has("scaledValueOfSecondFixedSurface"));
    }
}
