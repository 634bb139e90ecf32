//! Event data model: notes, rests, and unanalyzed chords placed in time.

use super::beat::Beat;
use crate::harmony::{Chord, ChordEvent};
use crate::pitch::Pitch;

/// What sounds at an event: silence, a single pitch, or a block chord that
/// has not been reduced to a single melody note.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rest,
    Note(Pitch),
    Chord(Chord),
}

/// A single melody element at an offset, with its own duration.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    /// Start time (within a measure, or absolute on a piece timeline).
    pub offset: Beat,
    /// Length in quarter notes.
    pub duration: Beat,
    pub element: Element,
}

impl NoteEvent {
    pub fn rest(offset: Beat, duration: Beat) -> Self {
        Self {
            offset,
            duration,
            element: Element::Rest,
        }
    }

    pub fn note(offset: Beat, duration: Beat, pitch: Pitch) -> Self {
        Self {
            offset,
            duration,
            element: Element::Note(pitch),
        }
    }

    pub fn chord(offset: Beat, duration: Beat, chord: Chord) -> Self {
        Self {
            offset,
            duration,
            element: Element::Chord(chord),
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self.element, Element::Rest)
    }

    /// The pitch of a single note; `None` for rests and chords.
    pub fn pitch(&self) -> Option<&Pitch> {
        match &self.element {
            Element::Note(pitch) => Some(pitch),
            _ => None,
        }
    }

    /// The same event with its offset measured from `origin` instead.
    pub(crate) fn rebased(&self, origin: Beat) -> NoteEvent {
        NoteEvent {
            offset: self.offset - origin,
            ..self.clone()
        }
    }

    /// The same event pushed later by `shift`.
    pub(crate) fn delayed(&self, shift: Beat) -> NoteEvent {
        NoteEvent {
            offset: self.offset + shift,
            ..self.clone()
        }
    }
}

/// One measure of melody and the chords underneath it. Offsets are relative
/// to the measure start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measure {
    pub notes: Vec<NoteEvent>,
    pub chords: Vec<ChordEvent>,
}

impl Measure {
    pub fn new(notes: Vec<NoteEvent>, chords: Vec<ChordEvent>) -> Self {
        Self { notes, chords }
    }
}
