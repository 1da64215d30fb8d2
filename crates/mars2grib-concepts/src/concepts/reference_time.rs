//! The `referenceTime` concept (§4.3).
//!
//! The reforecast variant writes everything the default variant does, plus
//! `YearOfModelVersion`…`SecondOfModelVersion` at Section 4 — but only once
//! the active product definition template is `60` or `61`.

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::deductions::{resolve_hindcast_date_time, resolve_reference_date_time};
use crate::error::ConceptOpError;
use crate::registry::ConceptOp;
use crate::stage::Stage;

const REFORECAST_TEMPLATES: &[i64] = &[60, 61];

pub fn matcher(mars: &MemDict, _opt: &MemDict) -> Option<&'static str> {
    if mars.has("hdate") {
        Some("reforecast")
    } else {
        Some("default")
    }
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    match (variant, stage, section) {
        ("default", Stage::Preset, 1) | ("reforecast", Stage::Preset, 1) => Some(write_reference_time),
        ("reforecast", Stage::Preset, 4) => Some(write_model_version_time),
        _ => None,
    }
}

fn write_reference_time(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let dt = resolve_reference_date_time(mars)?;
    out.set_or_throw("significanceOfReferenceTime", Value::Int(1))?;
    out.set_or_throw("year", Value::Int(dt.year))?;
    out.set_or_throw("month", Value::Int(dt.month))?;
    out.set_or_throw("day", Value::Int(dt.day))?;
    out.set_or_throw("hour", Value::Int(dt.hour))?;
    out.set_or_throw("minute", Value::Int(dt.minute))?;
    out.set_or_throw("second", Value::Int(dt.second))?;
    Ok(())
}

fn write_model_version_time(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let active_template = out.get_i64("productDefinitionTemplateNumber").unwrap_or(-1);
    if !REFORECAST_TEMPLATES.contains(&active_template) {
        return Ok(());
    }

    let dt = resolve_hindcast_date_time(mars)?;
    out.set_or_throw("yearOfModelVersion", Value::Int(dt.year))?;
    out.set_or_throw("monthOfModelVersion", Value::Int(dt.month))?;
    out.set_or_throw("dayOfModelVersion", Value::Int(dt.day))?;
    out.set_or_throw("hourOfModelVersion", Value::Int(dt.hour))?;
    out.set_or_throw("minuteOfModelVersion", Value::Int(dt.minute))?;
    out.set_or_throw("secondOfModelVersion", Value::Int(dt.second))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matcher_picks_reforecast_when_hdate_present() {
        let mut mars = MemDict::new();
        mars.insert("hdate", 20_230_101_i64);
        assert_eq!(matcher(&mars, &MemDict::new()), Some("reforecast"));
    }

    #[test]
    fn model_version_is_skipped_outside_reforecast_templates() {
        let mut mars = MemDict::new();
        mars.insert("hdate", 20_230_101_i64);
        mars.insert("htime", 0_i64);
        let mut out = MemDict::new();
        out.insert("productDefinitionTemplateNumber", 0_i64);
        write_model_version_time(&mars, &MemDict::new(), &MemDict::new(), &MemDict::new(), &mut out).unwrap();
        assert!(!out.has("yearOfModelVersion"));
    }

    #[test]
    fn model_version_is_written_for_pdt_60() {
        let mut mars = MemDict::new();
        mars.insert("hdate", 20_230_101_i64);
        mars.insert("htime", 0_i64);
        let mut out = MemDict::new();
        out.insert("productDefinitionTemplateNumber", 60_i64);
        write_model_version_time(&mars, &MemDict::new(), &MemDict::new(), &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("yearOfModelVersion").unwrap(), 2023);
    }
}
