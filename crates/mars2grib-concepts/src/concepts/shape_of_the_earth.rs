//! The `shapeOfTheEarth` concept (§4.3). Disabled for spectral
//! representations, since `shapeOfTheEarth` has no meaning without a grid.

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::error::ConceptOpError;
use crate::registry::ConceptOp;
use crate::stage::Stage;
use crate::tables::{ShapeOfTheEarth, SHAPE_OF_THE_EARTH};

pub fn matcher(mars: &MemDict, _opt: &MemDict) -> Option<&'static str> {
    if mars.has("truncation") {
        None
    } else {
        Some("default")
    }
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    match (variant, stage, section) {
        ("default", Stage::Preset, 3) => Some(op),
        _ => None,
    }
}

fn op(
    _mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let shape = match opt.get_str("shapeOfTheEarth").ok() {
        Some(name) => SHAPE_OF_THE_EARTH.name_to_enum(name).map_err(|e| {
            ConceptOpError::Precondition(format!("opt[\"shapeOfTheEarth\"] {name} is not a known shape: {e}"))
        })?,
        None => ShapeOfTheEarth::EarthSphericalRadius6371229,
    };
    out.set_or_throw("shapeOfTheEarth", Value::Int(SHAPE_OF_THE_EARTH.enum_to_code(shape)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matcher_disables_for_spectral_truncation() {
        let mut mars = MemDict::new();
        mars.insert("truncation", 63_i64);
        assert_eq!(matcher(&mars, &MemDict::new()), None);
    }

    #[test]
    fn defaults_to_spherical_earth_radius_6371229() {
        let mut out = MemDict::new();
        op(&MemDict::new(), &MemDict::new(), &MemDict::new(), &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("shapeOfTheEarth").unwrap(), 6);
    }

    #[test]
    fn resolves_real_wgs84_name_to_code_5() {
        let mut opt = MemDict::new();
        opt.insert("shapeOfTheEarth", "earth-wgs84");
        let mut out = MemDict::new();
        op(&MemDict::new(), &MemDict::new(), &MemDict::new(), &opt, &mut out).unwrap();
        assert_eq!(out.get_i64("shapeOfTheEarth").unwrap(), 5);
    }
}
