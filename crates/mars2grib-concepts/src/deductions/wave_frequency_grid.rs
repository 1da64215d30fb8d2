//! Wave frequency grid deduction (§4.4, §8 monotonicity/ratio property).

use mars2grib_core::{Dictionary, MemDict};

use crate::error::{DeductionCause, DeductionError};

const DEFAULT_SCALE: i64 = 6;

pub struct WaveFrequencyGrid {
    pub frequencies: Vec<f64>,
    pub scaled: Vec<i64>,
    pub scale_factor: i64,
}

/// Either takes `par["waveFrequencies"]` verbatim, or constructs a geometric
/// grid centred on `ref_freq` at the 1-based `ref_index`, with
/// `f_{i+1} = f_i · ratio` and `f_{i-1} = f_i / ratio`.
pub fn resolve_wave_frequency_grid(par: &MemDict) -> Result<WaveFrequencyGrid, DeductionError> {
    let scale_factor = match par.get("waveFrequencyScaleFactor") {
        Some(_) => par
            .get_i64("waveFrequencyScaleFactor")
            .map_err(|e| DeductionError::new("wave-frequency-grid", e))?,
        None => DEFAULT_SCALE,
    };

    let frequencies: Vec<f64> = if let Some(value) = par.get("waveFrequencies") {
        value
            .as_double_vec()
            .ok_or_else(|| {
                DeductionError::new(
                    "wave-frequency-grid",
                    DeductionCause::Message("par[\"waveFrequencies\"] is not a double vector".to_owned()),
                )
            })?
            .to_vec()
    } else {
        let n = par
            .get_i64("numberOfWaveFrequencies")
            .map_err(|e| DeductionError::new("wave-frequency-grid", e))?;
        let ref_index = par
            .get_i64("waveFrequencyReferenceIndex")
            .map_err(|e| DeductionError::new("wave-frequency-grid", e))?;
        let ref_freq = par
            .get_f64("waveFrequencyReference")
            .map_err(|e| DeductionError::new("wave-frequency-grid", e))?;
        let ratio = par
            .get_f64("waveFrequencyRatio")
            .map_err(|e| DeductionError::new("wave-frequency-grid", e))?;

        if ref_index < 1 || ref_index > n {
            return Err(DeductionError::new(
                "wave-frequency-grid",
                DeductionCause::Message(format!(
                    "waveFrequencyReferenceIndex {ref_index} out of range [1,{n}]"
                )),
            ));
        }

        let mut freqs = vec![0.0; n as usize];
        let ref_pos = (ref_index - 1) as usize;
        freqs[ref_pos] = ref_freq;
        for i in (0..ref_pos).rev() {
            freqs[i] = freqs[i + 1] / ratio;
        }
        for i in (ref_pos + 1)..freqs.len() {
            freqs[i] = freqs[i - 1] * ratio;
        }
        freqs
    };

    let scale = 10f64.powi(scale_factor as i32);
    let scaled = frequencies.iter().map(|f| (f * scale).round() as i64).collect();

    tracing::debug!(
        target: "resolve",
        deduction = "wave-frequency-grid",
        n = frequencies.len(),
        scale_factor
    );

    Ok(WaveFrequencyGrid {
        frequencies,
        scaled,
        scale_factor,
    })
}
