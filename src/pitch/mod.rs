//! Spelled pitches and intervals.

pub mod interval;
pub mod note;

pub use interval::{widen, Interval, MINOR_THIRD};
pub use note::{Pitch, Step};
