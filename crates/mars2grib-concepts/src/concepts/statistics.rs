//! The `statistics` concept (§4.3, §8 scenarios 5-7).
//!
//! Reads the `statisticalProcessing` working-dict key populated by the
//! stat-param rule file (§4.6) rather than inspecting `paramId` itself —
//! the rule engine is the single place that owns the paramId-to-processing
//! mapping.

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::error::ConceptOpError;
use crate::registry::ConceptOp;
use crate::stage::Stage;

pub fn matcher(_mars: &MemDict, _opt: &MemDict) -> Option<&'static str> {
    Some("default")
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    match (variant, stage, section) {
        ("default", Stage::Preset, 4) => Some(op),
        _ => None,
    }
}

fn op(
    _mars: &MemDict,
    _geo: &MemDict,
    par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let processing = par.get_str("statisticalProcessing").unwrap_or("instantaneous");

    match processing {
        "instantaneous" => {}
        "accumulation" => {
            out.set_or_throw("typeOfStatisticalProcessing", Value::Int(1))?;
        }
        "average24h" => {
            out.set_or_throw("typeOfStatisticalProcessing", Value::Int(2))?;
            out.set_or_throw("lengthOfTimeRange", Value::Int(24))?;
            out.set_or_throw("indicatorOfUnitForTimeRange", Value::Int(1))?;
        }
        other => {
            return Err(ConceptOpError::Precondition(format!(
                "unknown statisticalProcessing '{other}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantaneous_writes_nothing() {
        let par = MemDict::new();
        let mut out = MemDict::new();
        op(&MemDict::new(), &MemDict::new(), &par, &MemDict::new(), &mut out).unwrap();
        assert!(!out.has("typeOfStatisticalProcessing"));
    }

    #[test]
    fn accumulation_scenario_matches_spec() {
        let mut par = MemDict::new();
        par.insert("statisticalProcessing", "accumulation");
        let mut out = MemDict::new();
        op(&MemDict::new(), &MemDict::new(), &par, &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("typeOfStatisticalProcessing").unwrap(), 1);
    }

    #[test]
    fn average24h_scenario_matches_spec() {
        let mut par = MemDict::new();
        par.insert("statisticalProcessing", "average24h");
        let mut out = MemDict::new();
        op(&MemDict::new(), &MemDict::new(), &par, &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("typeOfStatisticalProcessing").unwrap(), 2);
        assert_eq!(out.get_i64("lengthOfTimeRange").unwrap(), 24);
        assert_eq!(out.get_i64("indicatorOfUnitForTimeRange").unwrap(), 1);
    }
}
