//! Measure decoder: grammar text over chords becomes concrete notes.
//!
//! Pitches the grammar does not carry are re-chosen from the random source.
//! Each token is placed at the running offset *after* adding its own
//! duration, so the first element of a measure sits at its duration rather
//! than at zero.

use rand::Rng;

use super::role::Role;
use super::token::{IntervalRange, Token};
use super::tones::{
    generate_approach_tone, generate_chord_tone, generate_scale_tone, is_approach_tone,
    is_chord_tone, is_scale_tone,
};
use crate::error::GrammarError;
use crate::event::{Beat, NoteEvent};
use crate::harmony::{Chord, ChordEvent, ChordTrack};
use crate::pitch::Pitch;

/// Lowest octave for a pitch generated without an interval constraint.
pub const FRESH_OCTAVE_FLOOR: i32 = 4;

/// Lowest octave for a pitch chosen inside an interval range.
pub const CONSTRAINED_OCTAVE_FLOOR: i32 = 3;

/// Semitone step used when an interval range holds no fitting pitch.
const FALLBACK_STEP: i32 = 2;

/// Decode one measure of grammar against its chords.
///
/// Blank input gives an empty measure. Tokens that fail to parse are
/// skipped and do not advance the running offset. The only error is a
/// pitched token with no chord to resolve against.
pub fn decode_measure<R: Rng + ?Sized>(
    grammar: &str,
    chords: &[ChordEvent],
    rng: &mut R,
) -> Result<Vec<NoteEvent>, GrammarError> {
    let mut track = ChordTrack::new(chords);
    let mut offset = Beat::ZERO;
    let mut previous: Option<Pitch> = None;
    let mut elements = Vec::new();

    for text in grammar.split_whitespace() {
        let token = match Token::parse(text) {
            Ok(token) => token,
            Err(err) => {
                log::debug!("skipping token: {err}");
                continue;
            }
        };

        offset += token.duration;

        if token.role == Role::Rest {
            elements.push(NoteEvent::rest(offset, token.duration));
            continue;
        }

        let chord = track.resolve(offset)?;
        let pitch = match (&previous, &token.interval) {
            (Some(prev), Some(range)) => {
                let pitch = constrained_pitch(token.role, chord, prev, range, rng);
                raise_to_octave(pitch, CONSTRAINED_OCTAVE_FLOOR)
            }
            _ => raise_to_octave(fresh_pitch(token.role, chord, rng), FRESH_OCTAVE_FLOOR),
        };

        elements.push(NoteEvent::note(offset, token.duration, pitch.clone()));
        previous = Some(pitch);
    }

    Ok(elements)
}

fn fresh_pitch<R: Rng + ?Sized>(role: Role, chord: &Chord, rng: &mut R) -> Pitch {
    match role {
        Role::Chord => generate_chord_tone(chord, rng),
        Role::Scale => generate_scale_tone(chord, rng),
        _ => generate_approach_tone(chord, rng),
    }
}

fn fits_role(role: Role, chord: &Chord, pitch: &Pitch) -> bool {
    match role {
        Role::Chord => is_chord_tone(chord, pitch),
        Role::Scale => is_scale_tone(chord, pitch),
        _ => is_approach_tone(chord, pitch),
    }
}

/// Every pitch from `low` to `high` inclusive, one per semitone, in plain
/// spelling.
fn chromatic_span<'a>(low: &'a Pitch, high: &'a Pitch) -> impl Iterator<Item = Pitch> + 'a {
    let span = (high.ps() - low.ps()).max(0);
    (0..=span).map(move |i| low.transpose_semitones(i).simplify_enharmonic())
}

fn constrained_pitch<R: Rng + ?Sized>(
    role: Role,
    chord: &Chord,
    previous: &Pitch,
    range: &IntervalRange,
    rng: &mut R,
) -> Pitch {
    let (low, high) = range.bounds_from(previous);
    let candidates: Vec<Pitch> = chromatic_span(&low, &high)
        .filter(|p| fits_role(role, chord, p))
        .collect();

    match candidates.as_slice() {
        [] => {
            let shift = if rng.gen_bool(0.5) {
                FALLBACK_STEP
            } else {
                -FALLBACK_STEP
            };
            log::debug!(
                "no {role} candidate between {low} and {high}, stepping {shift:+} from {previous}"
            );
            previous.transpose_semitones(shift)
        }
        [only] => only.clone(),
        _ => {
            let distinct: Vec<&Pitch> = candidates.iter().filter(|p| *p != previous).collect();
            let pool = if distinct.is_empty() {
                candidates.iter().collect()
            } else {
                distinct
            };
            pool[rng.gen_range(0..pool.len())].clone()
        }
    }
}

fn raise_to_octave(pitch: Pitch, floor: i32) -> Pitch {
    if pitch.octave() < floor {
        pitch.with_octave(floor)
    } else {
        pitch
    }
}
