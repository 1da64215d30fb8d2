//! Soil levelling deduction (§8 scenarios 3 and 4).
//!
//! A handful of soil parameters are defined over a *layer* (top and bottom
//! bound) rather than a single depth; which kind a given `paramId` is comes
//! from a small closed table rather than from `level` itself. Parameters not
//! listed fall back to point levelling — the more common case.

use crate::error::DeductionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoilLevel {
    pub type_of_level: &'static str,
    pub scaled_value_of_first_fixed_surface: i64,
    pub scaled_value_of_second_fixed_surface: Option<i64>,
}

static SOIL_LAYER_PARAMS: &[i64] = &[260367];

pub fn resolve_soil_level(param_id: i64, level: i64) -> Result<SoilLevel, DeductionError> {
    let soil_level = if SOIL_LAYER_PARAMS.contains(&param_id) {
        SoilLevel {
            type_of_level: "soilLayer",
            scaled_value_of_first_fixed_surface: level - 1,
            scaled_value_of_second_fixed_surface: Some(level),
        }
    } else {
        SoilLevel {
            type_of_level: "soil",
            scaled_value_of_first_fixed_surface: level,
            scaled_value_of_second_fixed_surface: None,
        }
    };

    tracing::debug!(
        target: "resolve",
        deduction = "soil-level",
        param_id,
        type_of_level = soil_level.type_of_level
    );
    Ok(soil_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_param_produces_bounded_layer() {
        let soil = resolve_soil_level(260_367, 4).unwrap();
        assert_eq!(soil.type_of_level, "soilLayer");
        assert_eq!(soil.scaled_value_of_first_fixed_surface, 3);
        assert_eq!(soil.scaled_value_of_second_fixed_surface, Some(4));
    }

    #[test]
    fn point_param_has_no_second_surface() {
        let soil = resolve_soil_level(260_644, 4).unwrap();
        assert_eq!(soil.type_of_level, "soil");
        assert_eq!(soil.scaled_value_of_first_fixed_surface, 4);
        assert_eq!(soil.scaled_value_of_second_fixed_surface, None);
    }
}
