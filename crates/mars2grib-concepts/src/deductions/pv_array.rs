//! PV array deduction for hybrid levels (§4.4).
//!
//! `par["pv"]` wins verbatim when present. Otherwise `par["pvSize"]` selects
//! a byte-exact big-endian table, decoded with an explicit host-endianness
//! check rather than relying on the host's native `f64` layout matching the
//! table's encoding.
//!
//! This crate implements only the byte-table reconstruction described here;
//! see DESIGN.md's "pv-array-two-variants" entry for why the debug-only
//! size-keyed shortcut is not carried forward.

use mars2grib_core::{Dictionary, MemDict};

use crate::error::{DeductionCause, DeductionError};

const SENTINEL: f64 = 1.234_567_89;
const SENTINEL_BE_BYTES: [u8; 8] = [0x3F, 0xF3, 0xC0, 0xCA, 0x42, 0x83, 0xDE, 0x1B];

/// Host-endianness table for PV arrays, keyed by `pvSize` (number of doubles).
/// Each entry's bytes are the big-endian IEEE-754 encoding of the array.
fn pv_size_table() -> &'static [(i64, &'static [[u8; 8]])] {
    static ONE: [[u8; 8]; 1] = [[0x3F, 0xF0, 0, 0, 0, 0, 0, 0]]; // 1.0
    static THREE: [[u8; 8]; 3] = [
        [0x3F, 0xF0, 0, 0, 0, 0, 0, 0], // 1.0
        [0x40, 0x00, 0, 0, 0, 0, 0, 0], // 2.0
        [0x40, 0x08, 0, 0, 0, 0, 0, 0], // 3.0
    ];
    &[(1, &ONE), (3, &THREE)]
}

fn host_is_little_endian() -> bool {
    SENTINEL.to_ne_bytes() != SENTINEL_BE_BYTES
}

fn decode_be_f64(bytes: [u8; 8]) -> f64 {
    if host_is_little_endian() {
        let mut swapped = bytes;
        swapped.reverse();
        f64::from_ne_bytes(swapped)
    } else {
        f64::from_ne_bytes(bytes)
    }
}

pub fn resolve_pv_array(par: &MemDict) -> Result<Vec<f64>, DeductionError> {
    if let Some(value) = par.get("pv") {
        let v = value
            .as_double_vec()
            .ok_or_else(|| {
                DeductionError::new(
                    "pv-array",
                    DeductionCause::Message("par[\"pv\"] is not a double vector".to_owned()),
                )
            })?
            .to_vec();
        tracing::debug!(target: "resolve", deduction = "pv-array", source = "pv", len = v.len());
        return Ok(v);
    }

    let size = par
        .get_i64("pvSize")
        .map_err(|e| DeductionError::new("pv-array", e))?;

    let rows = pv_size_table()
        .iter()
        .find(|(s, _)| *s == size)
        .map(|(_, rows)| *rows)
        .ok_or_else(|| {
            DeductionError::new(
                "pv-array",
                DeductionCause::Message(format!("no PV table entry for pvSize {size}")),
            )
        })?;

    let v: Vec<f64> = rows.iter().map(|bytes| decode_be_f64(*bytes)).collect();
    tracing::debug!(target: "resolve", deduction = "pv-array", source = "pvSize", len = v.len());
    Ok(v)
}
