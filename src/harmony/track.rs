//! Chord progressions within a measure and active-chord lookup.

use std::borrow::Cow;

use super::chord::Chord;
use crate::error::GrammarError;
use crate::event::Beat;

/// A chord starting at `offset` within its measure. It sounds until the
/// next chord or the end of the measure.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordEvent {
    pub offset: Beat,
    pub chord: Chord,
}

impl ChordEvent {
    pub fn new(offset: Beat, chord: Chord) -> Self {
        Self { offset, chord }
    }
}

/// Resolves which chord is sounding at a given offset.
///
/// If an event falls before every chord, the first chord is pulled back to
/// the measure start. The adjustment happens once, on a private copy; the
/// caller's chord list is never touched.
pub struct ChordTrack<'a> {
    chords: Cow<'a, [ChordEvent]>,
}

impl<'a> ChordTrack<'a> {
    pub fn new(chords: &'a [ChordEvent]) -> Self {
        Self {
            chords: Cow::Borrowed(chords),
        }
    }

    /// Whether the first chord has been moved to the measure start.
    pub fn is_anchored(&self) -> bool {
        matches!(self.chords, Cow::Owned(_))
    }

    /// The latest chord (in list order) whose offset is at or before
    /// `offset`.
    pub fn resolve(&mut self, offset: Beat) -> Result<&Chord, GrammarError> {
        if self.chords.is_empty() {
            return Err(GrammarError::EmptyChords);
        }

        if self.latest_at(offset).is_none() && !self.is_anchored() {
            log::warn!(
                "no chord at offset {}, anchoring first chord to measure start",
                offset.quarter_length()
            );
            let mut adjusted = self.chords.to_vec();
            adjusted[0].offset = Beat::ZERO;
            self.chords = Cow::Owned(adjusted);
        }

        let idx = self
            .latest_at(offset)
            .ok_or(GrammarError::NoActiveChord {
                offset: offset.as_beats_f64(),
            })?;
        Ok(&self.chords[idx].chord)
    }

    fn latest_at(&self, offset: Beat) -> Option<usize> {
        self.chords.iter().rposition(|c| c.offset <= offset)
    }
}
