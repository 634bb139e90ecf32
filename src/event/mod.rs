//! Melody events in musical time.
//!
//! [`Beat`] carries every offset and duration, [`NoteEvent`] is a rest, note,
//! or block chord placed in time, and [`Timeline`] moves events between
//! piece-level time and per-measure time.

pub mod beat;
pub mod timeline;
pub mod types;

pub use beat::{Beat, DEFAULT_BEATS_PER_MEASURE, TICKS_PER_BEAT};
pub use timeline::Timeline;
pub use types::{Element, Measure, NoteEvent};
