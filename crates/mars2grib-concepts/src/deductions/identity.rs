//! Trivial mandatory-string deductions shared by the `mars` and `param` concepts.
//!
//! Each is a direct lookup into `mars` with one RESOLVE line on success and a
//! dictionary error nested on failure — there is no computation to speak of,
//! but routing the read through a named deduction keeps the logging contract
//! (§4.4: "emit exactly one RESOLVE line") uniform across concepts.

use mars2grib_core::{Dictionary, MemDict};

use crate::error::DeductionError;

pub fn resolve_class(mars: &MemDict) -> Result<String, DeductionError> {
    let v = mars
        .get_str("class")
        .map_err(|e| DeductionError::new("class", e))?
        .to_owned();
    tracing::debug!(target: "resolve", deduction = "class", value = %v);
    Ok(v)
}

pub fn resolve_type(mars: &MemDict) -> Result<String, DeductionError> {
    let v = mars
        .get_str("type")
        .map_err(|e| DeductionError::new("type", e))?
        .to_owned();
    tracing::debug!(target: "resolve", deduction = "type", value = %v);
    Ok(v)
}

pub fn resolve_stream(mars: &MemDict) -> Result<String, DeductionError> {
    let v = mars
        .get_str("stream")
        .map_err(|e| DeductionError::new("stream", e))?
        .to_owned();
    tracing::debug!(target: "resolve", deduction = "stream", value = %v);
    Ok(v)
}

pub fn resolve_expver(mars: &MemDict) -> Result<String, DeductionError> {
    let v = mars
        .get_str("expver")
        .map_err(|e| DeductionError::new("expver", e))?
        .to_owned();
    tracing::debug!(target: "resolve", deduction = "expver", value = %v);
    Ok(v)
}

/// `paramId` defaults to 0 when `mars["paramId"]` is absent (scenario 1, §8):
/// an empty `mars` must still produce a valid, if generic, message.
pub fn resolve_param_id(mars: &MemDict) -> Result<i64, DeductionError> {
    let v = match mars.get("paramId") {
        Some(value) => value
            .as_i64()
            .ok_or_else(|| {
                DeductionError::new(
                    "paramId",
                    crate::error::DeductionCause::Message(format!(
                        "mars[\"paramId\"] is not an integer: {value:?}"
                    )),
                )
            })?,
        None => 0,
    };
    tracing::debug!(target: "resolve", deduction = "paramId", value = v);
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_id_defaults_to_zero() {
        let mars = MemDict::new();
        assert_eq!(resolve_param_id(&mars).unwrap(), 0);
    }

    #[test]
    fn param_id_reads_mars_param_id() {
        let mut mars = MemDict::new();
        mars.insert("paramId", 8_i64);
        assert_eq!(resolve_param_id(&mars).unwrap(), 8);
    }

    #[test]
    fn class_fails_fast_when_missing() {
        let mars = MemDict::new();
        assert!(resolve_class(&mars).is_err());
    }
}
