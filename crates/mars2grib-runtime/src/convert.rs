//! Stage x section orchestrator (§4.2 "Dispatch algorithm").
//!
//! Walks `Allocate -> Preset -> Runtime`, and within each stage walks
//! sections 0..=5 in order. A concept never picks a section's structural
//! template out of thin air: during `Allocate` it writes the relevant
//! template-number key straight into `out`, and this orchestrator reads that
//! key back immediately afterward to invoke the matching section
//! initializer exactly once (§4.5: "the orchestrator does not traverse the
//! table").

use mars2grib_concepts::{registry, Stage};
use mars2grib_core::{Dictionary, MemDict};
use mars2grib_sections::registry as section_registry;

use crate::error::EncodeError;
use crate::out_dict::OutDict;

/// Per-section key the orchestrator reads back after `Allocate`-stage
/// concept dispatch, and the template number used when no concept wrote one.
///
/// Sections 0 and 1 have a single registered template (see
/// `mars2grib-sections::registry`) and no concept ever selects one for them,
/// so they're addressed by the constant `0` rather than a dict key.
fn template_key_and_default(section: u8) -> Option<(&'static str, i64)> {
    match section {
        2 => Some(("localDefinitionNumber", 1000)),
        3 => Some(("gridDefinitionTemplateNumber", 0)),
        4 => Some(("productDefinitionTemplateNumber", 0)),
        5 => Some(("dataRepresentationTemplateNumber", 0)),
        _ => None,
    }
}

fn resolve_template(out: &OutDict, section: u8) -> i64 {
    match template_key_and_default(section) {
        Some((key, default)) => out.get_i64(key).unwrap_or(default),
        None => 0,
    }
}

/// Run the preset stat-param rules, then walk every `(stage, section)` cell,
/// writing into `out` in place (§6 "writes directly through an adapter into
/// a GRIB handle").
pub fn convert(mars: &MemDict, geo: &MemDict, par: &MemDict, opt: &MemDict, out: &mut OutDict) -> Result<(), EncodeError> {
    let mut par_work = par.clone();
    mars2grib_concepts::apply_stat_param_rules(mars, &mut par_work, out)
        .map_err(|e| EncodeError::rule(e, mars, geo, par, opt))?;

    let resolved = registry::resolve_variants(mars, opt);

    for stage in Stage::ALL {
        for section in 0_u8..=5 {
            registry::run_cell(&resolved, stage, section, mars, geo, &par_work, opt, out)
                .map_err(|e| EncodeError::concept(stage, section, e, mars, geo, par, opt))?;

            if stage == Stage::Allocate {
                let template = resolve_template(out, section);
                let init = section_registry::lookup(section, template)
                    .map_err(|e| EncodeError::section(section, template, e, mars, geo, par, opt))?;
                init(mars, geo, &par_work, opt, template, out)
                    .map_err(|e| EncodeError::section(section, template, e, mars, geo, par, opt))?;
            }
        }

        // Total flush at the stage boundary (§5): every write made during
        // this stage becomes observable on a fresh handle before the next
        // stage starts.
        *out = out.clone_handle();
    }

    Ok(())
}

/// Convenience entry point that starts from a named sample and returns the
/// finished in-memory dictionary (§6, first encoder entry point).
pub fn convert_from_sample(
    mars: &MemDict,
    geo: &MemDict,
    par: &MemDict,
    opt: &MemDict,
    sample: &str,
) -> Result<OutDict, EncodeError> {
    let mut out = OutDict::from_sample(sample).map_err(|e| {
        EncodeError::section(
            0,
            0,
            mars2grib_sections::SectionError::Init {
                section: 0,
                template: 0,
                source: e,
            },
            mars,
            geo,
            par,
            opt,
        )
    })?;
    convert(mars, geo, par, opt, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_product_matches_scenario_one() {
        let mars = MemDict::new();
        let geo = MemDict::new();
        let par = MemDict::new();
        let opt = MemDict::new();
        let out = convert_from_sample(&mars, &geo, &par, &opt, "GRIB2").unwrap();
        assert_eq!(out.get_i64("productDefinitionTemplateNumber").unwrap(), 0);
    }

    #[test]
    fn given_param_id_matches_scenario_two() {
        let mut mars = MemDict::new();
        mars.insert("paramId", 8_i64);
        let geo = MemDict::new();
        let par = MemDict::new();
        let opt = MemDict::new();
        let out = convert_from_sample(&mars, &geo, &par, &opt, "GRIB2").unwrap();
        assert_eq!(out.get_i64("productDefinitionTemplateNumber").unwrap(), 8);
        assert_eq!(out.get_i64("paramId").unwrap(), 8);
    }

    #[test]
    fn accumulation_scenario_end_to_end() {
        let mut mars = MemDict::new();
        mars.insert("paramId", 8_i64);
        let geo = MemDict::new();
        let par = MemDict::new();
        let opt = MemDict::new();
        let out = convert_from_sample(&mars, &geo, &par, &opt, "GRIB2").unwrap();
        assert_eq!(out.get_i64("typeOfStatisticalProcessing").unwrap(), 1);
    }

    #[test]
    fn unknown_sample_reports_an_error() {
        let mars = MemDict::new();
        let geo = MemDict::new();
        let par = MemDict::new();
        let opt = MemDict::new();
        assert!(convert_from_sample(&mars, &geo, &par, &opt, "nonexistent").is_err());
    }
}
