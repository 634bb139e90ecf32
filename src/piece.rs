//! Piece files: melody and chords as YAML.
//!
//! Two layouts are accepted. A measured piece lists `measures`, each with its
//! own `chords` and `notes` and offsets relative to the measure start:
//!
//! ```yaml
//! measures:
//!   - chords:
//!       - { offset: 0.0, pitches: [C4, E4, G4] }
//!     notes:
//!       - { offset: 0.0, duration: 0.5 }
//!       - { offset: 0.5, duration: 0.5, pitch: C4 }
//! ```
//!
//! A flat piece gives `melody` and `harmony` on one absolute timeline; it is
//! cut into measures on load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;
use crate::event::{Beat, Element, Measure, NoteEvent, Timeline};
use crate::harmony::{Chord, ChordEvent};
use crate::pitch::Pitch;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PieceFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<MeasureSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub melody: Vec<NoteSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub harmony: Vec<ChordSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureSpec {
    #[serde(default)]
    pub chords: Vec<ChordSpec>,
    #[serde(default)]
    pub notes: Vec<NoteSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordSpec {
    #[serde(default)]
    pub offset: f64,
    pub pitches: Vec<Pitch>,
}

/// A note, a rest (neither `pitch` nor `chord`), or a block chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSpec {
    #[serde(default)]
    pub offset: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<Pitch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chord: Vec<Pitch>,
}

fn checked_offset(offset: f64) -> Result<Beat, GrammarError> {
    if !offset.is_finite() || offset < 0.0 {
        return Err(GrammarError::InvalidPiece(format!(
            "offset {offset} must be a non-negative number"
        )));
    }
    Ok(Beat::from_beats_f64(offset))
}

impl ChordSpec {
    pub fn to_event(&self) -> Result<ChordEvent, GrammarError> {
        let offset = checked_offset(self.offset)?;
        let chord = Chord::new(self.pitches.clone()).map_err(|_| {
            GrammarError::InvalidPiece(format!("chord at offset {} has no pitches", self.offset))
        })?;
        Ok(ChordEvent::new(offset, chord))
    }

    pub fn from_event(event: &ChordEvent) -> Self {
        Self {
            offset: event.offset.as_beats_f64(),
            pitches: event.chord.pitches().to_vec(),
        }
    }
}

impl NoteSpec {
    pub fn to_event(&self) -> Result<NoteEvent, GrammarError> {
        let offset = checked_offset(self.offset)?;
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(GrammarError::InvalidPiece(format!(
                "note at offset {} needs a positive duration, got {}",
                self.offset, self.duration
            )));
        }
        let duration = Beat::from_beats_f64(self.duration);

        match (&self.pitch, self.chord.as_slice()) {
            (Some(_), [_, ..]) => Err(GrammarError::InvalidPiece(format!(
                "note at offset {} has both a pitch and a chord",
                self.offset
            ))),
            (Some(pitch), []) => Ok(NoteEvent::note(offset, duration, pitch.clone())),
            (None, []) => Ok(NoteEvent::rest(offset, duration)),
            (None, pitches) => {
                let chord = Chord::new(pitches.to_vec())?;
                Ok(NoteEvent::chord(offset, duration, chord))
            }
        }
    }

    pub fn from_event(event: &NoteEvent) -> Self {
        let (pitch, chord) = match &event.element {
            Element::Rest => (None, Vec::new()),
            Element::Note(pitch) => (Some(pitch.clone()), Vec::new()),
            Element::Chord(chord) => (None, chord.pitches().to_vec()),
        };
        Self {
            offset: event.offset.as_beats_f64(),
            duration: event.duration.as_beats_f64(),
            pitch,
            chord,
        }
    }
}

impl MeasureSpec {
    pub fn to_measure(&self) -> Result<Measure, GrammarError> {
        let mut notes = self
            .notes
            .iter()
            .map(NoteSpec::to_event)
            .collect::<Result<Vec<_>, _>>()?;
        notes.sort_by_key(|n| n.offset);

        let mut chords = self
            .chords
            .iter()
            .map(ChordSpec::to_event)
            .collect::<Result<Vec<_>, _>>()?;
        chords.sort_by_key(|c| c.offset);

        Ok(Measure::new(notes, chords))
    }

    pub fn from_notes(notes: &[NoteEvent], chords: &[ChordEvent]) -> Self {
        Self {
            chords: chords.iter().map(ChordSpec::from_event).collect(),
            notes: notes.iter().map(NoteSpec::from_event).collect(),
        }
    }
}

impl PieceFile {
    /// The piece as measures of `measure_length`.
    ///
    /// Measured pieces keep their own grouping. Flat pieces are split on
    /// the timeline, carrying a sounding chord into measures that do not
    /// start with one.
    pub fn to_measures(&self, measure_length: Beat) -> Result<Vec<Measure>, GrammarError> {
        let flat = !self.melody.is_empty() || !self.harmony.is_empty();
        if !self.measures.is_empty() {
            if flat {
                return Err(GrammarError::InvalidPiece(
                    "use either measures or melody/harmony, not both".to_string(),
                ));
            }
            return self.measures.iter().map(MeasureSpec::to_measure).collect();
        }

        let melody = self
            .melody
            .iter()
            .map(NoteSpec::to_event)
            .collect::<Result<Vec<_>, _>>()?;
        let mut timeline = Timeline::new();
        timeline.insert_batch(melody);
        let harmony = self
            .harmony
            .iter()
            .map(ChordSpec::to_event)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(timeline.split_measures(&harmony, measure_length))
    }

    /// A measured piece from decoded melody, each measure paired with the
    /// chords it was decoded against.
    pub fn from_decoded(melody: &[Vec<NoteEvent>], harmony: &[Measure]) -> Self {
        let measures = melody
            .iter()
            .zip(harmony)
            .map(|(notes, measure)| MeasureSpec::from_notes(notes, &measure.chords))
            .collect();
        Self {
            measures,
            ..Self::default()
        }
    }

    /// A flat piece: decoded measures stitched onto one timeline.
    pub fn flat_from_decoded(
        melody: Vec<Vec<NoteEvent>>,
        harmony: &[Measure],
        measure_length: Beat,
    ) -> Self {
        let melody = Timeline::stitch(melody, measure_length).into_events();
        let harmony = harmony
            .iter()
            .enumerate()
            .flat_map(|(index, measure)| {
                let start = measure_length.times(index as u64);
                measure.chords.iter().map(move |c| ChordSpec {
                    offset: (c.offset + start).as_beats_f64(),
                    pitches: c.chord.pitches().to_vec(),
                })
            })
            .collect();
        Self {
            melody: melody.iter().map(NoteSpec::from_event).collect(),
            harmony,
            ..Self::default()
        }
    }
}

/// Load a piece from a YAML file.
pub fn load_piece(path: &Path) -> Result<PieceFile, GrammarError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Save a piece as YAML, creating parent directories as needed.
pub fn save_piece(path: &Path, piece: &PieceFile) -> Result<(), GrammarError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(piece)?;
    std::fs::write(path, yaml)?;
    Ok(())
}
