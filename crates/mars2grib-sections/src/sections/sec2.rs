//! Section 2 (Local Use) initializer.
//!
//! Two virtual template numbers get DestinE-specific treatment; every other
//! template number — including the other virtual ones registered for this
//! section (1000, 1004) — falls through to the generic branch that writes
//! the template number straight into `localDefinitionNumber`. That's the
//! source's own behavior, not an oversight introduced here: 1000 and 1004
//! are registered dispatch targets but were never given their own
//! `if constexpr` arm, so they end up with a `localDefinitionNumber` of 1000
//! or 1004, which isn't a real ecCodes local definition number. Preserved
//! verbatim rather than "fixed" (see Open Questions).

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
    run(template, out).map_err(|e| SectionError::init(2, template, e))
}

fn run(template: i64, out: &mut dyn Dictionary) -> Result<(), mars2grib_core::DictError> {
    out.set_or_throw("setLocalDefinition", 1_i64.into())?;

    match template {
        1001 => {
            out.set_or_throw("localDefinitionNumber", 1_i64.into())?;
            out.set_or_throw("productionStatusOfProcessedData", 12_i64.into())?;
            out.set_or_throw("dataset", "climate-dt".into())?;
        }
        1002 => {
            out.set_or_throw("localDefinitionNumber", 1_i64.into())?;
            out.set_or_throw("productionStatusOfProcessedData", 12_i64.into())?;
            out.set_or_throw("dataset", "extremes-dt".into())?;
        }
        _ => {
            out.set_or_throw("localDefinitionNumber", template.into())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mars2grib_core::MemDict;

    fn run_ok(template: i64) -> MemDict {
        let mars = MemDict::new();
        let geo = MemDict::new();
        let par = MemDict::new();
        let opt = MemDict::new();
        let mut out = MemDict::new();
        init(&mars, &geo, &par, &opt, template, &mut out).unwrap();
        out
    }

    #[test]
    fn climate_dt_virtual_template() {
        let out = run_ok(1001);
        assert_eq!(out.get_i64("localDefinitionNumber").unwrap(), 1);
        assert_eq!(out.get_i64("productionStatusOfProcessedData").unwrap(), 12);
        assert_eq!(out.get_str("dataset").unwrap(), "climate-dt");
    }

    #[test]
    fn extremes_dt_virtual_template() {
        let out = run_ok(1002);
        assert_eq!(out.get_str("dataset").unwrap(), "extremes-dt");
    }

    #[test]
    fn other_virtual_templates_fall_through_to_generic_branch() {
        // 1000 and 1004 are registered but have no dedicated arm; they end up
        // with localDefinitionNumber set to the (not a real ecCodes number)
        // virtual template number itself, same as the source.
        let out = run_ok(1000);
        assert_eq!(out.get_i64("localDefinitionNumber").unwrap(), 1000);
        let out = run_ok(1004);
        assert_eq!(out.get_i64("localDefinitionNumber").unwrap(), 1004);
    }

    #[test]
    fn standard_template_sets_local_definition_number_directly() {
        let out = run_ok(1);
        assert_eq!(out.get_i64("localDefinitionNumber").unwrap(), 1);
        assert!(!out.has("dataset"));
    }
}
