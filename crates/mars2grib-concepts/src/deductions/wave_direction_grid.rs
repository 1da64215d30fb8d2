//! Wave direction grid deduction (§4.4, §8 monotonicity property).

use std::f64::consts::PI;

use mars2grib_core::{Dictionary, MemDict};

use crate::error::DeductionError;

const DEFAULT_SCALE: i64 = 2;

pub struct WaveDirectionGrid {
    pub directions: Vec<f64>,
    pub scaled: Vec<i64>,
    pub scale_factor: i64,
}

/// Either takes `par["waveDirections"]` verbatim, or constructs the
/// mid-point discretisation `θ_k = (k + ½)·2π/N` for `k ∈ [0, N)` from
/// `par["numberOfWaveDirections"]`.
pub fn resolve_wave_direction_grid(par: &MemDict) -> Result<WaveDirectionGrid, DeductionError> {
    let scale_factor = match par.get("waveDirectionScaleFactor") {
        Some(_) => par
            .get_i64("waveDirectionScaleFactor")
            .map_err(|e| DeductionError::new("wave-direction-grid", e))?,
        None => DEFAULT_SCALE,
    };

    let directions: Vec<f64> = if let Some(value) = par.get("waveDirections") {
        value
            .as_double_vec()
            .ok_or_else(|| {
                DeductionError::new(
                    "wave-direction-grid",
                    crate::error::DeductionCause::Message(
                        "par[\"waveDirections\"] is not a double vector".to_owned(),
                    ),
                )
            })?
            .to_vec()
    } else {
        let n = par
            .get_i64("numberOfWaveDirections")
            .map_err(|e| DeductionError::new("wave-direction-grid", e))?;
        let step = 2.0 * PI / n as f64;
        (0..n).map(|k| (k as f64 + 0.5) * step).collect()
    };

    let scale = 10f64.powi(scale_factor as i32);
    let scaled = directions.iter().map(|theta| (theta * scale).round() as i64).collect();

    tracing::debug!(
        target: "resolve",
        deduction = "wave-direction-grid",
        n = directions.len(),
        scale_factor
    );

    Ok(WaveDirectionGrid {
        directions,
        scaled,
        scale_factor,
    })
}
