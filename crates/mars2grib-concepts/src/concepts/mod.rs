//! Concept implementations (§4.3). Each module exposes a `matcher` and a
//! `dispatch` function pointer, wired into the static table in
//! [`crate::registry`].

pub mod level;
pub mod mars;
pub mod packing;
pub mod param;
pub mod reference_time;
pub mod representation;
pub mod satellite;
pub mod shape_of_the_earth;
pub mod statistics;
pub mod wave;
