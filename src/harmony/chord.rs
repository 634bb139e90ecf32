//! Chords: a set of sounding pitches with inferred root and quality.

use std::fmt;

use crate::error::GrammarError;
use crate::pitch::Pitch;

/// Triad quality inferred from the chord's root, third, and fifth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Other,
}

impl ChordQuality {
    pub fn is_major(self) -> bool {
        self == ChordQuality::Major
    }
}

/// An unordered set of pitches sounding together. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pitches: Vec<Pitch>,
}

impl Chord {
    pub fn new(pitches: Vec<Pitch>) -> Result<Self, GrammarError> {
        if pitches.is_empty() {
            return Err(GrammarError::EmptyChord);
        }
        Ok(Self { pitches })
    }

    /// Build a chord from pitch names, e.g. `["C4", "E4", "G4"]`.
    pub fn from_names(names: &[&str]) -> Result<Self, GrammarError> {
        let pitches = names
            .iter()
            .map(|name| Pitch::parse(name))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(pitches)
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    /// Pitches sorted from lowest to highest.
    pub fn sorted_ascending(&self) -> Vec<Pitch> {
        let mut sorted = self.pitches.clone();
        sorted.sort_by_key(|p| p.ps());
        sorted
    }

    /// Whether any chord pitch has `pitch`'s note name, in any octave.
    pub fn contains_name(&self, pitch: &Pitch) -> bool {
        self.pitches.iter().any(|p| p.same_name(pitch))
    }

    /// The chord root: the pitch that best explains the others as a stack of
    /// thirds (third, then fifth, then seventh above it). Ties go to the
    /// lowest sounding pitch.
    pub fn root(&self) -> &Pitch {
        let mut best = &self.pitches[0];
        let mut best_score = self.tertian_score(best);
        for candidate in &self.pitches[1..] {
            let score = self.tertian_score(candidate);
            if score > best_score || (score == best_score && candidate.ps() < best.ps()) {
                best = candidate;
                best_score = score;
            }
        }
        best
    }

    fn tertian_score(&self, root: &Pitch) -> i32 {
        let mut score = 0;
        if self.has_above(root, 3) || self.has_above(root, 4) {
            score += 4;
        }
        if self.has_above(root, 7) {
            score += 2;
        }
        if self.has_above(root, 10) || self.has_above(root, 11) {
            score += 1;
        }
        score
    }

    fn has_above(&self, root: &Pitch, semitones: i32) -> bool {
        let target = (root.pitch_class() + semitones).rem_euclid(12);
        self.pitches.iter().any(|p| p.pitch_class() == target)
    }

    /// Quality of the triad built on [`Chord::root`].
    pub fn quality(&self) -> ChordQuality {
        let root = self.root();
        let minor_third = self.has_above(root, 3);
        let major_third = self.has_above(root, 4);
        let diminished_fifth = self.has_above(root, 6);
        let perfect_fifth = self.has_above(root, 7);
        let augmented_fifth = self.has_above(root, 8);

        match (minor_third, major_third) {
            (false, true) if augmented_fifth && !perfect_fifth => ChordQuality::Augmented,
            (false, true) if diminished_fifth && !perfect_fifth => ChordQuality::Other,
            (false, true) => ChordQuality::Major,
            (true, false) if diminished_fifth && !perfect_fifth => ChordQuality::Diminished,
            (true, false) => ChordQuality::Minor,
            _ => ChordQuality::Other,
        }
    }

    /// Octaves of the chord's pitches, lowest pitch first. Repeats are kept.
    pub fn octaves(&self) -> Vec<i32> {
        self.sorted_ascending().iter().map(Pitch::octave).collect()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.pitches.iter().map(Pitch::name_with_octave).collect();
        write!(f, "[{}]", names.join(" "))
    }
}
