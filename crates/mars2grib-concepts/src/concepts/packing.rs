//! The `packing` concept (§4.3): selects a Data Representation Template
//! Number at `Allocate`, writes `bitsPerValue` at `Preset` when requested.

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::error::ConceptOpError;
use crate::registry::ConceptOp;
use crate::stage::Stage;

pub fn matcher(_mars: &MemDict, _opt: &MemDict) -> Option<&'static str> {
    Some("default")
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    match (variant, stage, section) {
        ("default", Stage::Allocate, 5) => Some(select_template),
        ("default", Stage::Preset, 5) => Some(write_bits_per_value),
        _ => None,
    }
}

/// `opt["packing"]`: `"simple"` (default) = 0, `"ccsds"` = 42, `"spectralComplex"` = 51.
fn select_template(
    _mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let template = match opt.get_str("packing").ok() {
        Some("ccsds") => 42,
        Some("spectralComplex") => 51,
        Some("simple") | None => 0,
        Some(other) => {
            return Err(ConceptOpError::Precondition(format!(
                "unknown opt[\"packing\"] '{other}'"
            )))
        }
    };
    out.set_or_throw("dataRepresentationTemplateNumber", Value::Int(template))?;
    Ok(())
}

fn write_bits_per_value(
    _mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    if let Some(accuracy) = opt.get("accuracy") {
        let bits = accuracy.as_i64().ok_or_else(|| {
            ConceptOpError::Precondition("opt[\"accuracy\"] is not an integer".to_owned())
        })?;
        out.set_or_throw("bitsPerValue", Value::Int(bits))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_simple_packing() {
        let mut out = MemDict::new();
        select_template(&MemDict::new(), &MemDict::new(), &MemDict::new(), &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("dataRepresentationTemplateNumber").unwrap(), 0);
    }

    #[test]
    fn ccsds_maps_to_42() {
        let mut opt = MemDict::new();
        opt.insert("packing", "ccsds");
        let mut out = MemDict::new();
        select_template(&MemDict::new(), &MemDict::new(), &MemDict::new(), &opt, &mut out).unwrap();
        assert_eq!(out.get_i64("dataRepresentationTemplateNumber").unwrap(), 42);
    }

    #[test]
    fn bits_per_value_only_written_when_accuracy_present() {
        let mut out = MemDict::new();
        write_bits_per_value(&MemDict::new(), &MemDict::new(), &MemDict::new(), &MemDict::new(), &mut out).unwrap();
        assert!(!out.has("bitsPerValue"));
    }
}
