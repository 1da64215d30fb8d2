//! Allowed reference value deduction (§4.4).
//!
//! A small static parameter-range table; the midpoint of `[min, max]` when
//! `mars["param"]` is listed, `0.0` otherwise — there is no failure case.

use mars2grib_core::{Dictionary, MemDict};

use crate::error::DeductionError;

static PARAM_RANGES: &[(i64, f64, f64)] = &[
    (130, 173.0, 331.0),  // temperature (K)
    (165, -40.0, 40.0),   // 10m u-wind (m/s)
    (166, -40.0, 40.0),   // 10m v-wind (m/s)
    (167, 173.0, 331.0),  // 2m temperature (K)
];

pub fn resolve_allowed_reference_value(mars: &MemDict) -> Result<f64, DeductionError> {
    let param = match mars.get("param") {
        Some(v) => v.as_i64(),
        None => None,
    };

    let value = param
        .and_then(|p| PARAM_RANGES.iter().find(|(id, _, _)| *id == p))
        .map(|(_, min, max)| (min + max) / 2.0)
        .unwrap_or(0.0);

    tracing::debug!(target: "resolve", deduction = "allowed-reference-value", value);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_midpoint_for_known_param() {
        let mut mars = MemDict::new();
        mars.insert("param", 130_i64);
        assert_eq!(resolve_allowed_reference_value(&mars).unwrap(), 252.0);
    }

    #[test]
    fn returns_zero_for_unknown_param() {
        let mut mars = MemDict::new();
        mars.insert("param", 999_999_i64);
        assert_eq!(resolve_allowed_reference_value(&mars).unwrap(), 0.0);
    }

    #[test]
    fn returns_zero_when_param_absent() {
        let mars = MemDict::new();
        assert_eq!(resolve_allowed_reference_value(&mars).unwrap(), 0.0);
    }
}
