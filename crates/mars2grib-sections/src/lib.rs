//! GRIB2 section initializer tables (§4.5).
//!
//! A section initializer binds a `(section, template number)` pair to a
//! function that writes that template's structural keys into the output
//! dictionary, before the concept dispatch table gets a chance to write
//! anything concept-specific for that section. The [`registry`] module
//! holds the six per-section tables and the lookup used to resolve one.

pub mod error;
pub mod registry;
pub mod sections;

pub use error::SectionError;
pub use registry::{lookup, Entry, SectionInitFn};
