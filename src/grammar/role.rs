//! Note roles: what a melody element does against the chord under it.

use std::fmt;
use std::str::FromStr;

use super::tones::{is_approach_tone, is_chord_tone, is_scale_tone};
use crate::error::GrammarError;
use crate::event::Element;
use crate::harmony::Chord;

/// The five grammar roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// `R`: silence.
    Rest,
    /// `C`: a chord tone.
    Chord,
    /// `S`: a tone of the chord's scale.
    Scale,
    /// `A`: a semitone away from a chord tone.
    Approach,
    /// `X`: anything else.
    Other,
}

impl Role {
    pub fn symbol(self) -> char {
        match self {
            Role::Rest => 'R',
            Role::Chord => 'C',
            Role::Scale => 'S',
            Role::Approach => 'A',
            Role::Other => 'X',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Role> {
        match symbol {
            "R" => Some(Role::Rest),
            "C" => Some(Role::Chord),
            "S" => Some(Role::Scale),
            "A" => Some(Role::Approach),
            "X" => Some(Role::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Role {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_symbol(s).ok_or_else(|| GrammarError::malformed(s, "unknown role"))
    }
}

/// Classify an element against the active chord.
///
/// Checks run in priority order and the first match wins: chord tone (or
/// an unanalyzed block chord), then scale tone, then approach tone.
pub fn classify_role(chord: &Chord, element: &Element) -> Role {
    match element {
        Element::Rest => Role::Rest,
        Element::Chord(_) => Role::Chord,
        Element::Note(pitch) if is_chord_tone(chord, pitch) => Role::Chord,
        Element::Note(pitch) if is_scale_tone(chord, pitch) => Role::Scale,
        Element::Note(pitch) if is_approach_tone(chord, pitch) => Role::Approach,
        Element::Note(_) => Role::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::Pitch;

    fn c_major() -> Chord {
        Chord::from_names(&["C4", "E4", "G4"]).unwrap()
    }

    fn note(name: &str) -> Element {
        Element::Note(Pitch::parse(name).unwrap())
    }

    #[test]
    fn symbols_round_trip() {
        for role in [Role::Rest, Role::Chord, Role::Scale, Role::Approach, Role::Other] {
            let symbol = role.to_string();
            assert_eq!(symbol.parse::<Role>().unwrap(), role);
        }
        assert!("Q".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn rest_is_rest() {
        assert_eq!(classify_role(&c_major(), &Element::Rest), Role::Rest);
    }

    #[test]
    fn block_chord_counts_as_chord_tone() {
        let block = Element::Chord(Chord::from_names(&["D4", "F#4"]).unwrap());
        assert_eq!(classify_role(&c_major(), &block), Role::Chord);
    }

    #[test]
    fn chord_tones_in_any_octave() {
        assert_eq!(classify_role(&c_major(), &note("C4")), Role::Chord);
        assert_eq!(classify_role(&c_major(), &note("E2")), Role::Chord);
        assert_eq!(classify_role(&c_major(), &note("G6")), Role::Chord);
    }

    #[test]
    fn scale_tones() {
        assert_eq!(classify_role(&c_major(), &note("D4")), Role::Scale);
        assert_eq!(classify_role(&c_major(), &note("A4")), Role::Scale);
    }

    #[test]
    fn scale_beats_approach() {
        // F is a semitone above E and B a semitone below C, yet both are in
        // C major: scale wins.
        assert!(is_approach_tone(&c_major(), &Pitch::parse("F4").unwrap()));
        assert_eq!(classify_role(&c_major(), &note("F4")), Role::Scale);
        assert_eq!(classify_role(&c_major(), &note("B3")), Role::Scale);
    }

    #[test]
    fn approach_tones() {
        assert_eq!(classify_role(&c_major(), &note("C#4")), Role::Approach);
        assert_eq!(classify_role(&c_major(), &note("Db4")), Role::Approach);
        assert_eq!(classify_role(&c_major(), &note("Eb4")), Role::Approach);
        assert_eq!(classify_role(&c_major(), &note("F#4")), Role::Approach);
        assert_eq!(classify_role(&c_major(), &note("Ab4")), Role::Approach);
    }

    #[test]
    fn other_tones() {
        // Bb is neither in C major nor a semitone from C, E or G.
        assert_eq!(classify_role(&c_major(), &note("Bb4")), Role::Other);
        let a_minor = Chord::from_names(&["A3", "C4", "E4"]).unwrap();
        // A Dorian has F#, so F is only an approach tone (to E). Bb and G#
        // sit a semitone from A, C# from C.
        assert_eq!(classify_role(&a_minor, &note("F4")), Role::Approach);
        assert_eq!(classify_role(&a_minor, &note("Bb4")), Role::Approach);
        assert_eq!(classify_role(&a_minor, &note("C#4")), Role::Approach);
        assert_eq!(classify_role(&a_minor, &note("G#4")), Role::Approach);
    }

    #[test]
    fn enharmonic_respelling_is_not_a_chord_tone() {
        // D# sounds as Eb but is not named in C-Eb-G or C Dorian, and it is
        // no semitone from C, Eb or G.
        let c_minor = Chord::from_names(&["C4", "Eb4", "G4"]).unwrap();
        assert_eq!(classify_role(&c_minor, &note("Eb4")), Role::Chord);
        assert_eq!(classify_role(&c_minor, &note("D#4")), Role::Other);
    }

    #[test]
    fn classification_is_repeatable() {
        let chord = c_major();
        for name in ["C4", "C#4", "D4", "Eb4", "E4", "F4", "F#4", "G4", "Ab4", "A4", "Bb4", "B4"] {
            let element = note(name);
            let first = classify_role(&chord, &element);
            for _ in 0..5 {
                assert_eq!(classify_role(&chord, &element), first);
            }
        }
    }
}
