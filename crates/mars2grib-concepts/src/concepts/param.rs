//! The `param` concept (§4.3): selects `productDefinitionTemplateNumber` at
//! `Allocate` and writes `paramId` at `Preset`/`Runtime`, both from the same
//! `paramId` deduction (§8 scenarios 1 and 2).

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::deductions::resolve_param_id;
use crate::error::ConceptOpError;
use crate::registry::ConceptOp;
use crate::stage::Stage;

pub fn matcher(_mars: &MemDict, _opt: &MemDict) -> Option<&'static str> {
    Some("default")
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    match (variant, stage, section) {
        ("default", Stage::Allocate, 4) => Some(select_template),
        ("default", Stage::Preset, 4) | ("default", Stage::Runtime, 4) => Some(write_param_id),
        _ => None,
    }
}

fn select_template(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let param_id = resolve_param_id(mars)?;
    out.set_or_throw("productDefinitionTemplateNumber", Value::Int(param_id))?;
    Ok(())
}

fn write_param_id(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    _opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    let param_id = resolve_param_id(mars)?;
    out.set_or_throw("paramId", Value::Int(param_id))?;
    Ok(())
}
