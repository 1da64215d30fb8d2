//! The `wave` concept (§4.3): `Spectra` writes direction/frequency grids and
//! their runtime indices; `Period` writes a `typeOfWavePeriodInterval` plus
//! scaled bound(s) depending on which of `par["iTmin"]`/`par["iTmax"]` is
//! present, and writes nothing when neither is.

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::deductions::{resolve_wave_direction_grid, resolve_wave_frequency_grid};
use crate::error::ConceptOpError;
use crate::registry::ConceptOp;
use crate::stage::Stage;
use crate::tables::TYPE_OF_INTERVAL;

pub fn matcher(mars: &MemDict, _opt: &MemDict) -> Option<&'static str> {
    match mars.get_str("waveProduct").ok() {
        Some("spectra") => Some("spectra"),
        Some("period") => Some("period"),
        _ => None,
    }
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    if section != 4 {
        return None;
    }
    match (variant, stage) {
        ("spectra", Stage::Allocate) => Some(spectra_allocate),
        ("spectra", Stage::Runtime) => Some(spectra_runtime),
        ("period", Stage::Preset) => Some(period_preset),
        _ => None,
    }
}

fn spectra_allocate(
    _mars: &MemDict,
    _geo: &MemDict,
    par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let directions = resolve_wave_direction_grid(par)?;
    let frequencies = resolve_wave_frequency_grid(par)?;

    out.set_or_throw("numberOfDirections", Value::Int(directions.scaled.len() as i64))?;
    out.set_or_throw("scaleFactorOfWaveDirections", Value::Int(directions.scale_factor))?;
    out.set_or_throw("scaledValuesOfWaveDirections", Value::IntVec(directions.scaled))?;

    out.set_or_throw("numberOfFrequencies", Value::Int(frequencies.scaled.len() as i64))?;
    out.set_or_throw("scaleFactorOfWaveFrequencies", Value::Int(frequencies.scale_factor))?;
    out.set_or_throw("scaledValuesOfWaveFrequencies", Value::IntVec(frequencies.scaled))?;

    Ok(())
}

fn spectra_runtime(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let direction_number = mars.get_i64("waveDirectionNumber").unwrap_or(1);
    let frequency_number = mars.get_i64("waveFrequencyNumber").unwrap_or(1);
    out.set_or_throw("waveDirectionNumber", Value::Int(direction_number))?;
    out.set_or_throw("waveFrequencyNumber", Value::Int(frequency_number))?;
    Ok(())
}

fn period_preset(
    _mars: &MemDict,
    _geo: &MemDict,
    par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    use crate::tables::TypeOfInterval;

    let min = par.get_i64("iTmin").ok();
    let max = par.get_i64("iTmax").ok();

    match (min, max) {
        (Some(min), Some(max)) => {
            out.set_or_throw(
                "typeOfWavePeriodInterval",
                Value::Int(TYPE_OF_INTERVAL.enum_to_code(TypeOfInterval::BetweenFirstInclusiveSecondInclusive)),
            )?;
            out.set_or_throw("scaleFactorOfLowerWavePeriodLimit", Value::Int(0))?;
            out.set_or_throw("scaledValueOfLowerWavePeriodLimit", Value::Int(min))?;
            out.set_or_throw("scaleFactorOfUpperWavePeriodLimit", Value::Int(0))?;
            out.set_or_throw("scaledValueOfUpperWavePeriodLimit", Value::Int(max))?;
        }
        (Some(min), None) => {
            out.set_or_throw(
                "typeOfWavePeriodInterval",
                Value::Int(TYPE_OF_INTERVAL.enum_to_code(TypeOfInterval::GreaterThanFirstLimit)),
            )?;
            out.set_or_throw("scaleFactorOfLowerWavePeriodLimit", Value::Int(0))?;
            out.set_or_throw("scaledValueOfLowerWavePeriodLimit", Value::Int(min))?;
        }
        (None, Some(max)) => {
            out.set_or_throw(
                "typeOfWavePeriodInterval",
                Value::Int(TYPE_OF_INTERVAL.enum_to_code(TypeOfInterval::SmallerThanSecondLimit)),
            )?;
            out.set_or_throw("scaleFactorOfUpperWavePeriodLimit", Value::Int(0))?;
            out.set_or_throw("scaledValueOfUpperWavePeriodLimit", Value::Int(max))?;
        }
        (None, None) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matcher_is_missing_without_wave_product() {
        assert_eq!(matcher(&MemDict::new(), &MemDict::new()), None);
    }

    #[test]
    fn spectra_allocate_produces_monotone_direction_grid() {
        let mut par = MemDict::new();
        par.insert("numberOfWaveDirections", 4_i64);
        par.insert("numberOfWaveFrequencies", 3_i64);
        par.insert("waveFrequencyReferenceIndex", 2_i64);
        par.insert("waveFrequencyReference", 1.0_f64);
        par.insert("waveFrequencyRatio", 1.2_f64);
        let mut out = MemDict::new();
        spectra_allocate(&MemDict::new(), &MemDict::new(), &par, &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("numberOfDirections").unwrap(), 4);
        assert_eq!(out.get_i64("numberOfFrequencies").unwrap(), 3);
    }

    #[test]
    fn period_preset_lower_bound_only_is_greater_than_first_limit() {
        let mut par = MemDict::new();
        par.insert("iTmin", 0_i64);
        let mut out = MemDict::new();
        period_preset(&MemDict::new(), &MemDict::new(), &par, &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("typeOfWavePeriodInterval").unwrap(), 3);
        assert_eq!(out.get_i64("scaledValueOfLowerWavePeriodLimit").unwrap(), 0);
        assert!(!out.has("scaledValueOfUpperWavePeriodLimit"));
    }

    #[test]
    fn period_preset_upper_bound_only_is_smaller_than_second_limit() {
        let mut par = MemDict::new();
        par.insert("iTmax", 12_i64);
        let mut out = MemDict::new();
        period_preset(&MemDict::new(), &MemDict::new(), &par, &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("typeOfWavePeriodInterval").unwrap(), 4);
        assert_eq!(out.get_i64("scaledValueOfUpperWavePeriodLimit").unwrap(), 12);
        assert!(!out.has("scaledValueOfLowerWavePeriodLimit"));
    }

    #[test]
    fn period_preset_both_bounds_is_between_inclusive() {
        let mut par = MemDict::new();
        par.insert("iTmin", 3_i64);
        par.insert("iTmax", 9_i64);
        let mut out = MemDict::new();
        period_preset(&MemDict::new(), &MemDict::new(), &par, &MemDict::new(), &mut out).unwrap();
        assert_eq!(out.get_i64("typeOfWavePeriodInterval").unwrap(), 7);
        assert_eq!(out.get_i64("scaledValueOfLowerWavePeriodLimit").unwrap(), 3);
        assert_eq!(out.get_i64("scaledValueOfUpperWavePeriodLimit").unwrap(), 9);
    }

    #[test]
    fn period_preset_neither_bound_writes_nothing() {
        let mut out = MemDict::new();
        period_preset(&MemDict::new(), &MemDict::new(), &MemDict::new(), &MemDict::new(), &mut out).unwrap();
        assert!(!out.has("typeOfWavePeriodInterval"));
    }
}
