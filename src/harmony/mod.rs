//! Harmony: chords, chord-derived scales, and chord progressions.

pub mod chord;
pub mod scale;
pub mod track;

pub use chord::{Chord, ChordQuality};
pub use scale::{Scale, ScaleKind};
pub use track::{ChordEvent, ChordTrack};
