//! Scales derived from a chord's quality.
//!
//! Major chords take a major scale; every other quality takes a Dorian
//! scale. The tonic is the one whose scale holds the most chord tones,
//! searched upward from the chord root so the root wins ties. The same
//! derivation feeds both role classification and tone generation, which is
//! what keeps grammar round trips consistent.

use super::chord::Chord;
use crate::pitch::{Pitch, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Major,
    Dorian,
}

/// Spelling of each major-key tonic by pitch class.
const MAJOR_TONICS: [(Step, i8); 12] = [
    (Step::C, 0),
    (Step::D, -1),
    (Step::D, 0),
    (Step::E, -1),
    (Step::E, 0),
    (Step::F, 0),
    (Step::F, 1),
    (Step::G, 0),
    (Step::A, -1),
    (Step::A, 0),
    (Step::B, -1),
    (Step::B, 0),
];

impl ScaleKind {
    pub fn for_chord(chord: &Chord) -> ScaleKind {
        if chord.quality().is_major() {
            ScaleKind::Major
        } else {
            ScaleKind::Dorian
        }
    }

    /// Semitones above the tonic for degrees 1-7.
    pub fn intervals(self) -> [i32; 7] {
        match self {
            ScaleKind::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleKind::Dorian => [0, 2, 3, 5, 7, 9, 10],
        }
    }

    fn contains_pitch_class(self, tonic_pc: i32, pc: i32) -> bool {
        let degree = (pc - tonic_pc).rem_euclid(12);
        self.intervals().contains(&degree)
    }

    /// Letter and accidental for a tonic. Dorian tonics borrow the spelling
    /// of the major key a whole step below.
    fn tonic_spelling(self, tonic_pc: i32) -> (Step, i8) {
        match self {
            ScaleKind::Major => MAJOR_TONICS[tonic_pc.rem_euclid(12) as usize],
            ScaleKind::Dorian => {
                let (parent, _) = MAJOR_TONICS[(tonic_pc - 2).rem_euclid(12) as usize];
                let step = Step::from_index(parent.index() + 1);
                (step, accidental_for(step, tonic_pc))
            }
        }
    }
}

fn accidental_for(step: Step, pc: i32) -> i8 {
    let alter = (pc - step.natural_pitch_class()).rem_euclid(12);
    if alter > 6 {
        (alter - 12) as i8
    } else {
        alter as i8
    }
}

/// A seven-note scale spelled on consecutive letters, tonic in octave 4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    kind: ScaleKind,
    pitches: Vec<Pitch>,
}

impl Scale {
    pub fn new(kind: ScaleKind, tonic_pc: i32) -> Scale {
        let tonic_pc = tonic_pc.rem_euclid(12);
        let (tonic_step, _) = kind.tonic_spelling(tonic_pc);

        let pitches = kind
            .intervals()
            .iter()
            .enumerate()
            .map(|(degree, &offset)| {
                let letter = tonic_step.index() + degree as i32;
                let step = Step::from_index(letter);
                let alter = accidental_for(step, tonic_pc + offset);
                Pitch::new(step, alter, 4 + letter / 7)
            })
            .collect();

        Scale { kind, pitches }
    }

    /// The scale implied by `chord`.
    pub fn derive(chord: &Chord) -> Scale {
        let kind = ScaleKind::for_chord(chord);
        let root_pc = chord.root().pitch_class();

        let mut best_tonic = root_pc;
        let mut best_count = 0;
        for shift in 0..12 {
            let tonic = (root_pc + shift) % 12;
            let count = chord
                .pitches()
                .iter()
                .filter(|p| kind.contains_pitch_class(tonic, p.pitch_class()))
                .count();
            if count > best_count {
                best_tonic = tonic;
                best_count = count;
            }
        }

        Scale::new(kind, best_tonic)
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn tonic(&self) -> &Pitch {
        &self.pitches[0]
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    /// Octave-free note names, tonic first.
    pub fn names(&self) -> Vec<String> {
        self.pitches.iter().map(Pitch::name).collect()
    }

    /// Whether `pitch` is spelled as one of the scale's degrees, in any
    /// octave.
    pub fn contains(&self, pitch: &Pitch) -> bool {
        self.pitches.iter().any(|p| p.same_name(pitch))
    }
}
