//! Orchestrator and output-dictionary adapter for the mars2grib GRIB2 encoder.
//!
//! Ties together `mars2grib-core` (dictionary trait + value model),
//! `mars2grib-sections` (structural section initializers) and
//! `mars2grib-concepts` (concept registry, deductions, rule engine) into the
//! `Allocate -> Preset -> Runtime` dispatch loop.

pub mod convert;
pub mod error;
pub mod out_dict;

pub use convert::{convert, convert_from_sample};
pub use error::EncodeError;
pub use out_dict::OutDict;
