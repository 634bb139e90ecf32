//! The phrase grammar: note roles, the token text format, and the measure
//! encoder and decoder built on them.
//!
//! A measure of melody over chords encodes to a line such as
//! `R,0.500 C,0.500 S,0.500,<P4,m-2>`. Decoding that line against the same
//! (or different) chords yields a new melody with the same rhythm and roles.

pub mod decode;
pub mod encode;
pub mod role;
pub mod token;
pub mod tones;
pub mod vocab;

pub use decode::{decode_measure, CONSTRAINED_OCTAVE_FLOOR, FRESH_OCTAVE_FLOOR};
pub use encode::{encode_measure, measure_tokens};
pub use role::{classify_role, Role};
pub use token::{IntervalRange, Token};
pub use tones::{
    generate_approach_tone, generate_chord_tone, generate_scale_tone, is_approach_tone,
    is_chord_tone, is_scale_tone,
};
pub use vocab::{chord_tones_only, Vocabulary};

use rand::Rng;

use crate::event::{Measure, NoteEvent};

/// Encode every measure of a piece.
///
/// Measures that fail to encode, or that encode to nothing, are logged and
/// left out, so the result can be shorter than the input.
pub fn encode_score(measures: &[Measure]) -> Vec<String> {
    measures
        .iter()
        .enumerate()
        .filter_map(|(index, measure)| {
            match encode_measure(&measure.notes, &measure.chords) {
                Ok(grammar) if grammar.is_empty() => {
                    log::warn!("measure {index}: no notes, skipped");
                    None
                }
                Ok(grammar) => Some(grammar),
                Err(err) => {
                    log::warn!("measure {index}: {err}, skipped");
                    None
                }
            }
        })
        .collect()
}

/// Decode one grammar per measure, pairing `grammars[i]` with the chords of
/// `harmony[i]`.
///
/// Decoding stops at the shorter of the two lists. A measure that fails to
/// decode comes back empty so later measures keep their positions.
pub fn decode_score<R: Rng + ?Sized>(
    grammars: &[String],
    harmony: &[Measure],
    rng: &mut R,
) -> Vec<Vec<NoteEvent>> {
    grammars
        .iter()
        .zip(harmony)
        .enumerate()
        .map(|(index, (grammar, measure))| {
            decode_measure(grammar, &measure.chords, rng).unwrap_or_else(|err| {
                log::warn!("measure {index}: {err}, left empty");
                Vec::new()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Beat;
    use crate::harmony::{Chord, ChordEvent};
    use crate::pitch::Pitch;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn c_major_measure(notes: Vec<NoteEvent>) -> Measure {
        let chord = Chord::from_names(&["C4", "E4", "G4"]).unwrap();
        Measure::new(notes, vec![ChordEvent::new(Beat::ZERO, chord)])
    }

    fn note(beats: u32, name: &str) -> NoteEvent {
        NoteEvent::note(Beat::from_beats(beats), Beat::from_beats(1), Pitch::parse(name).unwrap())
    }

    #[test]
    fn encode_score_skips_broken_and_empty_measures() {
        let good = c_major_measure(vec![note(0, "C4"), note(1, "D4")]);
        let empty = c_major_measure(vec![]);
        let chordless = Measure::new(vec![note(0, "C4")], vec![]);

        let grammars = encode_score(&[good, empty, chordless]);
        assert_eq!(grammars, vec!["C,1.000 S,1.000,<P4,m-2>".to_string()]);
    }

    #[test]
    fn decode_score_pairs_measures_and_keeps_failures_in_place() {
        let harmony = vec![
            c_major_measure(vec![]),
            Measure::default(),
            c_major_measure(vec![]),
        ];
        let grammars = vec![
            "C,1.000 C,1.000".to_string(),
            "C,1.000".to_string(),
            "R,2.000".to_string(),
            "C,4.000".to_string(),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let decoded = decode_score(&grammars, &harmony, &mut rng);

        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].len(), 2);
        assert!(decoded[1].is_empty());
        assert_eq!(decoded[2].len(), 1);
        assert!(decoded[2][0].is_rest());
    }
}
