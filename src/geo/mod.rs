//! Geographic primitives
//!
//! Normalization of raw map input into canonical WGS84 coordinates.

pub mod coordinate;
pub mod normalize;

pub use coordinate::{ClickEvent, Coordinate};
pub use normalize::{clamp_latitude, normalize_longitude};
