//! Measure encoder: notes and rests over chords become grammar text.

use super::role::{classify_role, Role};
use super::token::{IntervalRange, Token};
use crate::error::GrammarError;
use crate::event::{Element, NoteEvent};
use crate::harmony::{ChordEvent, ChordTrack};
use crate::pitch::{widen, Pitch};

/// Tokens for one measure, in event order.
///
/// Rests never consult the chord list, so a measure of only rests encodes
/// even without chords. Each token carries the event's own duration. Pitched
/// notes after the first also carry the widened interval from the previous
/// pitched note; block chords are classified but do not count as a
/// previous pitch.
pub fn measure_tokens(
    notes: &[NoteEvent],
    chords: &[ChordEvent],
) -> Result<Vec<Token>, GrammarError> {
    let mut track = ChordTrack::new(chords);
    let mut previous: Option<&Pitch> = None;
    let mut tokens = Vec::with_capacity(notes.len());

    for event in notes {
        if event.is_rest() {
            tokens.push(Token::new(Role::Rest, event.duration));
            continue;
        }

        let chord = track.resolve(event.offset)?;
        let mut token = Token::new(classify_role(chord, &event.element), event.duration);

        if let Element::Note(pitch) = &event.element {
            if let Some(prev) = previous {
                let (upper, lower) = widen(prev, pitch);
                token = token.with_interval(IntervalRange::new(upper, lower));
            }
            previous = Some(pitch);
        }

        tokens.push(token);
    }

    Ok(tokens)
}

/// Encode one measure as a space-joined grammar string.
///
/// An empty measure encodes as the empty string.
pub fn encode_measure(notes: &[NoteEvent], chords: &[ChordEvent]) -> Result<String, GrammarError> {
    let tokens = measure_tokens(notes, chords)?;
    let text: Vec<String> = tokens.iter().map(Token::to_string).collect();
    Ok(text.join(" "))
}
