//! The `mars` concept (§4.3): writes `expver` and either the raw
//! `marsClass`/`marsType`/`marsStream` keys or the high-level
//! `class`/`type`/`stream` keys, depending on `opt["enableSideEffects"]`.

use mars2grib_core::{Dictionary, MemDict, Value};

use crate::deductions::{resolve_class, resolve_expver, resolve_stream, resolve_type};
use crate::error::ConceptOpError;
use crate::registry::ConceptOp;
use crate::stage::Stage;

pub fn matcher(_mars: &MemDict, _opt: &MemDict) -> Option<&'static str> {
    Some("default")
}

pub fn dispatch(variant: &'static str, stage: Stage, section: u8) -> Option<ConceptOp> {
    match (variant, stage, section) {
        ("default", Stage::Preset, 2) => Some(op),
        _ => None,
    }
}

fn op(
    mars: &MemDict,
    _geo: &MemDict,
    _par: &MemDict,
    opt: &MemDict,
    out: &mut dyn Dictionary,
) -> Result<(), ConceptOpError> {
    if !out.has("localDefinitionNumber") {
        return Err(ConceptOpError::Precondition(
            "Section 2 must be initialized (localDefinitionNumber set) before the mars concept runs".to_owned(),
        ));
    }

    let expver = resolve_expver(mars)?;
    out.set_or_throw("expver", Value::Str(expver))?;

    let enable_side_effects = matches!(opt.get("enableSideEffects"), Some(v) if v.as_i64() == Some(1));

    if enable_side_effects {
        out.set_or_throw("class", Value::Str(resolve_class(mars)?))?;
        out.set_or_throw("type", Value::Str(resolve_type(mars)?))?;
        out.set_or_throw("stream", Value::Str(resolve_stream(mars)?))?;
    } else {
        out.set_or_throw("marsClass", Value::Str(resolve_class(mars)?))?;
        out.set_or_throw("marsType", Value::Str(resolve_type(mars)?))?;
        out.set_or_throw("marsStream", Value::Str(resolve_stream(mars)?))?;
    }

    Ok(())
}
