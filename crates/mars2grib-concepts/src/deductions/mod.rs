//! Named, single-purpose value extractors consumed by concepts (§4.4).
//!
//! Each deduction reads only input dictionaries, applies a minimal explicit
//! rule, and fails fast with a typed, nested error. Concepts call these
//! rather than re-reading `mars`/`par`/`opt` directly in the middle of an op.

mod allowed_reference_value;
mod identity;
mod pv_array;
mod reference_date_time;
mod soil_level;
mod wave_direction_grid;
mod wave_frequency_grid;

pub use allowed_reference_value::resolve_allowed_reference_value;
pub use identity::{resolve_class, resolve_expver, resolve_param_id, resolve_stream, resolve_type};
pub use pv_array::resolve_pv_array;
pub use reference_date_time::{resolve_hindcast_date_time, resolve_reference_date_time, ReferenceDateTime};
pub use soil_level::{resolve_soil_level, SoilLevel};
pub use wave_direction_grid::{resolve_wave_direction_grid, WaveDirectionGrid};
pub use wave_frequency_grid::{resolve_wave_frequency_grid, WaveFrequencyGrid};
