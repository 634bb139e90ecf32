//! Tone predicates and generators.
//!
//! Chord and scale membership compare note names, so octave never matters
//! but spelling does: `D#` is not a tone of a chord spelled with `Eb`.
//! Approach tones compare pitch classes and accept either spelling.
//! Generators take the random source as a parameter; pass
//! a seeded `ChaCha8Rng` for reproducible output.

use rand::Rng;

use crate::harmony::{Chord, Scale};
use crate::pitch::Pitch;

/// Whether `pitch` belongs to the scale derived from `chord`.
pub fn is_scale_tone(chord: &Chord, pitch: &Pitch) -> bool {
    Scale::derive(chord).contains(pitch)
}

/// Whether `pitch` lies one semitone above or below any chord pitch.
pub fn is_approach_tone(chord: &Chord, pitch: &Pitch) -> bool {
    chord.pitches().iter().any(|c| {
        let distance = (pitch.pitch_class() - c.pitch_class()).rem_euclid(12);
        distance == 1 || distance == 11
    })
}

/// Whether `pitch` names one of the chord's pitches.
pub fn is_chord_tone(chord: &Chord, pitch: &Pitch) -> bool {
    chord.contains_name(pitch)
}

/// One of the chord's own pitches, octave included.
pub fn generate_chord_tone<R: Rng + ?Sized>(chord: &Chord, rng: &mut R) -> Pitch {
    let pitches = chord.pitches();
    pitches[rng.gen_range(0..pitches.len())].clone()
}

/// A random degree of the chord's scale, placed in the octave of a random
/// chord pitch.
pub fn generate_scale_tone<R: Rng + ?Sized>(chord: &Chord, rng: &mut R) -> Pitch {
    let scale = Scale::derive(chord);
    let degrees = scale.pitches();
    let degree = &degrees[rng.gen_range(0..degrees.len())];

    let octaves = chord.octaves();
    let octave = octaves[rng.gen_range(0..octaves.len())];

    degree.with_octave(octave)
}

/// A generated scale tone moved a semitone up or down.
pub fn generate_approach_tone<R: Rng + ?Sized>(chord: &Chord, rng: &mut R) -> Pitch {
    let scale_tone = generate_scale_tone(chord, rng);
    let shift = if rng.gen_bool(0.5) { 1 } else { -1 };
    scale_tone.transpose_semitones(shift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn chord(names: &[&str]) -> Chord {
        Chord::from_names(names).unwrap()
    }

    fn p(name: &str) -> Pitch {
        Pitch::parse(name).unwrap()
    }

    #[test]
    fn chord_tone_ignores_octave_but_not_spelling() {
        let c = chord(&["C4", "Eb4", "G4"]);
        assert!(is_chord_tone(&c, &p("C2")));
        assert!(is_chord_tone(&c, &p("Eb6")));
        assert!(!is_chord_tone(&c, &p("D#4")));
        assert!(!is_chord_tone(&c, &p("E4")));
    }

    #[test]
    fn scale_tone_matches_by_name() {
        let minor = chord(&["C4", "Eb4", "G4"]);
        assert!(is_scale_tone(&minor, &p("Eb5")));
        assert!(!is_scale_tone(&minor, &p("D#5")));
        assert!(!is_scale_tone(&minor, &p("A#4")));
    }

    #[test]
    fn approach_tone_either_side_either_spelling() {
        let c = chord(&["C4", "E4", "G4"]);
        assert!(is_approach_tone(&c, &p("C#4")));
        assert!(is_approach_tone(&c, &p("Db4")));
        assert!(is_approach_tone(&c, &p("B3")));
        assert!(is_approach_tone(&c, &p("Cb5")));
        assert!(is_approach_tone(&c, &p("F1")));
        assert!(!is_approach_tone(&c, &p("D4")));
        assert!(!is_approach_tone(&c, &p("A4")));
        assert!(!is_approach_tone(&c, &p("C4")));
    }

    #[test]
    fn predicates_are_octave_symmetric() {
        let c = chord(&["D3", "F#3", "A3", "C4"]);
        for ps in 48..60 {
            let low = Pitch::from_ps(ps, false);
            let high = low.with_octave(low.octave() + 3);
            assert_eq!(is_chord_tone(&c, &low), is_chord_tone(&c, &high));
            assert_eq!(is_approach_tone(&c, &low), is_approach_tone(&c, &high));
            assert_eq!(is_scale_tone(&c, &low), is_scale_tone(&c, &high));
        }
    }

    #[test]
    fn scale_tone_uses_chord_quality() {
        let major = chord(&["C4", "E4", "G4"]);
        assert!(is_scale_tone(&major, &p("B4")));
        assert!(!is_scale_tone(&major, &p("Bb4")));

        let minor = chord(&["C4", "Eb4", "G4"]);
        assert!(is_scale_tone(&minor, &p("Bb4")));
        assert!(is_scale_tone(&minor, &p("A4")));
        assert!(!is_scale_tone(&minor, &p("Ab4")));
    }

    #[test]
    fn generated_chord_tones_come_from_the_chord() {
        let c = chord(&["C4", "E4", "G4"]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let tone = generate_chord_tone(&c, &mut rng);
            assert!(c.pitches().contains(&tone));
        }
    }

    #[test]
    fn generated_scale_tones_use_chord_octaves() {
        let c = chord(&["A2", "C4", "E5"]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let tone = generate_scale_tone(&c, &mut rng);
            assert!(is_scale_tone(&c, &tone));
            assert!([2, 4, 5].contains(&tone.octave()));
        }
    }

    #[test]
    fn generated_approach_tones_are_a_semitone_off_the_scale() {
        let c = chord(&["C4", "E4", "G4"]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let tone = generate_approach_tone(&c, &mut rng);
            let up = tone.transpose_semitones(1);
            let down = tone.transpose_semitones(-1);
            assert!(is_scale_tone(&c, &up) || is_scale_tone(&c, &down));
        }
    }

    #[test]
    fn scripted_source_picks_first_choices() {
        let c = chord(&["E4", "G4", "C5"]);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(generate_chord_tone(&c, &mut rng), p("E4"));
        // First scale degree (C), lowest chord octave (4), then a semitone up.
        assert_eq!(generate_scale_tone(&c, &mut rng), p("C4"));
        assert_eq!(generate_approach_tone(&c, &mut rng), p("C#4"));
    }

    #[test]
    fn same_seed_same_choices() {
        let c = chord(&["D4", "F4", "A4"]);
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(generate_scale_tone(&c, &mut a), generate_scale_tone(&c, &mut b));
        }
    }
}
