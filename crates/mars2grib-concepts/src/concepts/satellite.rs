//! The `satellite` concept (§4.3): channel at Section 2, contributing-band
//! count and series/number/instrument/wave-number at Section 4.

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::error::ConceptOpError;
use crate::registry::ConceptOp;
use crate::stage::Stage;

const SATELLITE_PDTS: &[i64] = &[32, 33];

pub fn matcher(mars: &MemDict, _opt: &MemDict) -> Option<&'static str> {
    if mars.has("channel") || matches!(mars.get_str("class").ok(), Some("satellite")) {
        Some("default")
    } else {
        None
    }
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    match (variant, stage, section) {
        ("default", Stage::Preset, 2) => Some(write_channel),
        ("default", Stage::Allocate, 4) => Some(allocate_bands),
        ("default", Stage::Preset, 4) => Some(write_instrument_and_wave_number),
        _ => None,
    }
}

fn write_channel(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let local_definition_number = out.get_i64("localDefinitionNumber").unwrap_or(-1);
    if local_definition_number != 14 {
        return Err(ConceptOpError::Precondition(format!(
            "satellite channel requires localDefinitionNumber 14, got {local_definition_number}"
        )));
    }
    out.set_or_throw("channel", Value::Int(mars.get_i64("channel")?))?;
    Ok(())
}

fn allocate_bands(
    _mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    out.set_or_throw("numberOfContributingSpectralBands", Value::Int(1))?;
    Ok(())
}

fn write_instrument_and_wave_number(
    mars: &MemDict,
    _geo: &MemDict,
    par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let active_template = out.get_i64("productDefinitionTemplateNumber").unwrap_or(-1);
    if !SATELLITE_PDTS.contains(&active_template) {
        return Ok(());
    }

    out.set_or_throw("satelliteSeries", Value::Int(mars.get_i64("satelliteSeries")?))?;
    out.set_or_throw("satelliteNumber", Value::Int(mars.get_i64("satelliteNumber")?))?;
    out.set_or_throw("instrumentType", Value::Int(mars.get_i64("instrumentType")?))?;
    out.set_or_throw(
        "scaleFactorOfCentralWaveNumber",
        Value::Int(par.get_i64("scaleFactorOfCentralWaveNumber")?),
    )?;
    out.set_or_throw(
        "scaledValueOfCentralWaveNumber",
        Value::Int(par.get_i64("scaledValueOfCentralWaveNumber")?),
    )?;
    Ok(())
}
