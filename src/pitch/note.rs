//! Spelled pitches. Parses "C4", "Eb4", "F#3" and keeps the letter spelling
//! through transposition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::interval::Interval;
use crate::error::GrammarError;

/// A note letter without accidentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::C,
        Step::D,
        Step::E,
        Step::F,
        Step::G,
        Step::A,
        Step::B,
    ];

    pub fn from_char(c: char) -> Option<Step> {
        match c {
            'C' => Some(Step::C),
            'D' => Some(Step::D),
            'E' => Some(Step::E),
            'F' => Some(Step::F),
            'G' => Some(Step::G),
            'A' => Some(Step::A),
            'B' => Some(Step::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Step::C => 'C',
            Step::D => 'D',
            Step::E => 'E',
            Step::F => 'F',
            Step::G => 'G',
            Step::A => 'A',
            Step::B => 'B',
        }
    }

    /// Position within the octave, C = 0 through B = 6.
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Letter at `index`, wrapping around the octave.
    pub fn from_index(index: i32) -> Step {
        Step::ALL[index.rem_euclid(7) as usize]
    }

    /// Pitch class of the natural note.
    pub fn natural_pitch_class(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }
}

const SHARP_SPELLINGS: [(Step, i8); 12] = [
    (Step::C, 0),
    (Step::C, 1),
    (Step::D, 0),
    (Step::D, 1),
    (Step::E, 0),
    (Step::F, 0),
    (Step::F, 1),
    (Step::G, 0),
    (Step::G, 1),
    (Step::A, 0),
    (Step::A, 1),
    (Step::B, 0),
];

const FLAT_SPELLINGS: [(Step, i8); 12] = [
    (Step::C, 0),
    (Step::D, -1),
    (Step::D, 0),
    (Step::E, -1),
    (Step::E, 0),
    (Step::F, 0),
    (Step::G, -1),
    (Step::G, 0),
    (Step::A, -1),
    (Step::A, 0),
    (Step::B, -1),
    (Step::B, 0),
];

/// A pitch with letter spelling, accidental, and octave (C4 = middle C).
///
/// Equality compares the spelling and octave, so `C#4 != Db4`. Use
/// [`Pitch::pitch_class`] or [`Pitch::ps`] for sounding-pitch comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch {
    step: Step,
    alter: i8,
    octave: i32,
}

impl Pitch {
    pub fn new(step: Step, alter: i8, octave: i32) -> Self {
        Self {
            step,
            alter,
            octave,
        }
    }

    /// Parse a pitch name.
    ///
    /// Format: `<letter><accidentals><octave>`
    /// - Letter: C, D, E, F, G, A, B
    /// - Accidentals: any run of `#` (sharp) or `b` (flat)
    /// - Octave: integer, possibly negative (C4 = middle C = MIDI 60)
    pub fn parse(name: &str) -> Result<Pitch, GrammarError> {
        let invalid = || GrammarError::InvalidPitch(name.to_string());

        let mut chars = name.chars().peekable();
        let step = chars.next().and_then(Step::from_char).ok_or_else(invalid)?;

        let mut alter: i8 = 0;
        while let Some(&c) = chars.peek() {
            match c {
                '#' => alter += 1,
                'b' => alter -= 1,
                _ => break,
            }
            chars.next();
            if alter.abs() > 4 {
                return Err(invalid());
            }
        }

        let octave_str: String = chars.collect();
        let octave: i32 = octave_str.parse().map_err(|_| invalid())?;

        Ok(Pitch::new(step, alter, octave))
    }

    /// Spell an absolute semitone number, using flats or sharps for the
    /// black keys.
    pub fn from_ps(ps: i32, prefer_flats: bool) -> Pitch {
        let table = if prefer_flats {
            &FLAT_SPELLINGS
        } else {
            &SHARP_SPELLINGS
        };
        let (step, alter) = table[ps.rem_euclid(12) as usize];
        Pitch::new(step, alter, ps.div_euclid(12) - 1)
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Accidental in semitones: positive for sharps, negative for flats.
    pub fn alter(&self) -> i8 {
        self.alter
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// The same spelling in another octave.
    pub fn with_octave(&self, octave: i32) -> Pitch {
        Pitch::new(self.step, self.alter, octave)
    }

    /// Absolute semitone number (C4 = 60, A4 = 69). Matches MIDI numbering
    /// inside the MIDI range.
    pub fn ps(&self) -> i32 {
        (self.octave + 1) * 12 + self.step.natural_pitch_class() + self.alter as i32
    }

    /// Sounding pitch class, 0 (C) through 11 (B).
    pub fn pitch_class(&self) -> i32 {
        self.ps().rem_euclid(12)
    }

    /// Diatonic position counted in letters from C0.
    pub fn diatonic_index(&self) -> i32 {
        self.octave * 7 + self.step.index()
    }

    /// Note name without octave, e.g. "F#".
    pub fn name(&self) -> String {
        let mut name = String::new();
        name.push(self.step.as_char());
        let accidental = if self.alter > 0 { '#' } else { 'b' };
        for _ in 0..self.alter.unsigned_abs() {
            name.push(accidental);
        }
        name
    }

    /// Note name with octave, e.g. "F#3".
    pub fn name_with_octave(&self) -> String {
        format!("{}{}", self.name(), self.octave)
    }

    /// Transpose by a number of semitones. Flat-spelled pitches stay on the
    /// flat side; everything else is spelled with sharps.
    pub fn transpose_semitones(&self, semitones: i32) -> Pitch {
        Pitch::from_ps(self.ps() + semitones, self.alter < 0)
    }

    /// Transpose by a spelled interval, keeping letter arithmetic
    /// (`D4 + m3 = F4`, not `E#4`). A spelling that would need more
    /// accidentals than an `i8` holds is replaced by the plain one.
    pub fn transpose(&self, interval: Interval) -> Pitch {
        let index = self.diatonic_index() + interval.diatonic();
        let step = Step::from_index(index);
        let octave = index.div_euclid(7);
        let natural = (octave + 1) * 12 + step.natural_pitch_class();
        let target = self.ps() + interval.semitones();
        let alter = target - natural;
        match i8::try_from(alter) {
            Ok(alter) => Pitch::new(step, alter, octave),
            Err(_) => Pitch::from_ps(target, alter < 0),
        }
    }

    /// Respell awkward names: double accidentals and E#, B#, Cb, Fb become
    /// their plain equivalents. Other spellings are left alone.
    pub fn simplify_enharmonic(&self) -> Pitch {
        let awkward = match self.alter {
            0 => false,
            1 => matches!(self.step, Step::E | Step::B),
            -1 => matches!(self.step, Step::C | Step::F),
            _ => true,
        };
        if awkward {
            Pitch::from_ps(self.ps(), self.alter < 0)
        } else {
            self.clone()
        }
    }

    /// The other single-accidental spelling (C#4 <-> Db4). Naturals are
    /// returned unchanged.
    pub fn enharmonic(&self) -> Pitch {
        match self.alter {
            0 => self.clone(),
            a => Pitch::from_ps(self.ps(), a > 0),
        }
    }

    /// Whether both pitches carry the same note name, whatever the octave.
    /// `C#` and `Db` are different names.
    pub fn same_name(&self, other: &Pitch) -> bool {
        self.step == other.step && self.alter == other.alter
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name_with_octave())
    }
}

impl FromStr for Pitch {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::parse(s)
    }
}

impl TryFrom<String> for Pitch {
    type Error = GrammarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Pitch::parse(&value)
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.name_with_octave()
    }
}
