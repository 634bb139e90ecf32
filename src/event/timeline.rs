//! Sorted melody storage with cursor-based consumption.
//!
//! Events are stored sorted by offset. A cursor tracks the current read
//! position so that `drain_range` only scans unconsumed events. Batch
//! insertion defers sorting until the next read operation.
//!
//! A piece-length timeline is cut into measures for encoding, and decoded
//! measures are stitched back into one timeline afterwards.

use super::beat::Beat;
use super::types::{Measure, NoteEvent};
use crate::harmony::{Chord, ChordEvent};

/// A sorted timeline of melody events with a read cursor.
#[derive(Debug, Clone)]
pub struct Timeline {
    events: Vec<NoteEvent>,
    cursor: usize,
    dirty: bool,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            cursor: 0,
            dirty: false,
        }
    }

    /// Insert a batch of events. Defers sorting until the next read.
    pub fn insert_batch(&mut self, events: impl IntoIterator<Item = NoteEvent>) {
        self.events.extend(events);
        self.dirty = true;
    }

    /// Drain all events starting in `[from, to)` and advance the cursor past them.
    ///
    /// Returns the drained events in time order.
    pub fn drain_range(&mut self, from: Beat, to: Beat) -> Vec<NoteEvent> {
        self.ensure_sorted();

        let mut result = Vec::new();
        while self.cursor < self.events.len() {
            let event_time = self.events[self.cursor].offset;
            if event_time >= to {
                break;
            }
            if event_time >= from {
                result.push(self.events[self.cursor].clone());
            }
            self.cursor += 1;
        }
        result
    }

    /// Consume the timeline, returning its events in offset order.
    pub fn into_events(mut self) -> Vec<NoteEvent> {
        self.ensure_sorted();
        self.events
    }

    /// Cut the unconsumed events into consecutive measures of
    /// `measure_length`, pairing each with the chords that start inside it.
    ///
    /// Offsets in the returned measures are relative to each measure start.
    /// A chord still sounding across a barline is repeated at the start of
    /// the next measure unless a new chord begins exactly there. Events are
    /// grouped by onset; a note that rings past the barline stays in the
    /// measure where it started.
    pub fn split_measures(
        &mut self,
        harmony: &[ChordEvent],
        measure_length: Beat,
    ) -> Vec<Measure> {
        if measure_length == Beat::ZERO {
            return Vec::new();
        }
        self.ensure_sorted();

        let mut harmony = harmony.to_vec();
        harmony.sort_by_key(|c| c.offset);

        let last_onset = self.events[self.cursor..]
            .last()
            .map(|e| e.offset)
            .into_iter()
            .chain(harmony.last().map(|c| c.offset))
            .max();
        let Some(last_onset) = last_onset else {
            return Vec::new();
        };
        let count = last_onset.measure_index(measure_length) + 1;

        let mut chords = harmony.into_iter().peekable();
        let mut carried: Option<Chord> = None;
        let mut measures = Vec::with_capacity(count as usize);

        for index in 0..count {
            let start = measure_length.times(index);
            let end = start + measure_length;

            let notes = self
                .drain_range(start, end)
                .into_iter()
                .map(|e| e.rebased(start))
                .collect();

            let mut measure_chords = Vec::new();
            while let Some(c) = chords.next_if(|c| c.offset < end) {
                measure_chords.push(ChordEvent::new(c.offset - start, c.chord));
            }

            let opens_on_downbeat = measure_chords
                .first()
                .is_some_and(|c| c.offset == Beat::ZERO);
            if !opens_on_downbeat {
                if let Some(chord) = carried.take() {
                    measure_chords.insert(0, ChordEvent::new(Beat::ZERO, chord));
                }
            }
            carried = measure_chords.last().map(|c| c.chord.clone());

            measures.push(Measure::new(notes, measure_chords));
        }

        measures
    }

    /// Join per-measure events (offsets relative to each measure) into one
    /// timeline, placing measure `n` at `n * measure_length`.
    pub fn stitch<I>(measures: I, measure_length: Beat) -> Timeline
    where
        I: IntoIterator<Item = Vec<NoteEvent>>,
    {
        let mut timeline = Timeline::new();
        for (index, notes) in measures.into_iter().enumerate() {
            let start = measure_length.times(index as u64);
            timeline.insert_batch(notes.iter().map(|n| n.delayed(start)));
        }
        timeline
    }

    /// Sort events if a batch insert marked the timeline as dirty.
    /// Uses a stable sort to preserve insertion order for simultaneous events.
    fn ensure_sorted(&mut self) {
        if self.dirty {
            self.events[self.cursor..].sort_by(|a, b| a.offset.cmp(&b.offset));
            self.dirty = false;
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::Pitch;

    fn note_at(beats: f64, name: &str) -> NoteEvent {
        NoteEvent::note(
            Beat::from_beats_f64(beats),
            Beat::from_beats_f64(0.5),
            Pitch::parse(name).unwrap(),
        )
    }

    fn chord_at(beats: f64, names: &[&str]) -> ChordEvent {
        ChordEvent::new(Beat::from_beats_f64(beats), Chord::from_names(names).unwrap())
    }

    fn names(events: &[NoteEvent]) -> Vec<String> {
        events
            .iter()
            .map(|e| e.pitch().map(Pitch::name_with_octave).unwrap_or_default())
            .collect()
    }

    #[test]
    fn empty_timeline() {
        let mut tl = Timeline::default();
        assert!(tl.drain_range(Beat::ZERO, Beat::from_beats(10)).is_empty());
        assert!(tl.into_events().is_empty());
    }

    #[test]
    fn batch_insert_sorts_on_read() {
        let mut tl = Timeline::new();
        tl.insert_batch(vec![note_at(3.0, "F4"), note_at(0.0, "C4"), note_at(1.0, "D4")]);

        let events = tl.drain_range(Beat::ZERO, Beat::from_beats(10));
        assert_eq!(names(&events), ["C4", "D4", "F4"]);
    }

    #[test]
    fn batch_insert_keeps_simultaneous_order() {
        let mut tl = Timeline::new();
        tl.insert_batch(vec![note_at(1.0, "G4"), note_at(1.0, "B4"), note_at(0.0, "C4")]);
        assert_eq!(names(&tl.into_events()), ["C4", "G4", "B4"]);
    }

    #[test]
    fn drain_range_from_inclusive_to_exclusive() {
        let mut tl = Timeline::new();
        tl.insert_batch(vec![note_at(1.0, "C4"), note_at(2.0, "D4")]);

        let events = tl.drain_range(Beat::from_beats(1), Beat::from_beats(2));
        assert_eq!(names(&events), ["C4"]);
        let rest = tl.drain_range(Beat::ZERO, Beat::from_beats(10));
        assert_eq!(names(&rest), ["D4"]);
    }

    #[test]
    fn drained_events_stay_in_the_timeline() {
        let mut tl = Timeline::new();
        tl.insert_batch(vec![note_at(0.0, "C4"), note_at(1.0, "D4")]);

        tl.drain_range(Beat::ZERO, Beat::from_beats(10));
        assert!(tl.drain_range(Beat::ZERO, Beat::from_beats(10)).is_empty());
        assert_eq!(names(&tl.into_events()), ["C4", "D4"]);
    }

    #[test]
    fn split_groups_by_onset_and_rebases() {
        let mut tl = Timeline::new();
        tl.insert_batch(vec![
            note_at(0.0, "C4"),
            note_at(3.5, "D4"),
            note_at(4.0, "E4"),
            note_at(9.0, "G4"),
        ]);
        let harmony = vec![
            chord_at(0.0, &["C4", "E4", "G4"]),
            chord_at(6.0, &["G3", "B3", "D4"]),
        ];

        let measures = tl.split_measures(&harmony, Beat::from_beats(4));
        assert_eq!(measures.len(), 3);

        assert_eq!(names(&measures[0].notes), ["C4", "D4"]);
        assert_eq!(measures[0].notes[1].offset, Beat::from_beats_f64(3.5));
        assert_eq!(names(&measures[1].notes), ["E4"]);
        assert_eq!(measures[1].notes[0].offset, Beat::ZERO);
        assert_eq!(names(&measures[2].notes), ["G4"]);
        assert_eq!(measures[2].notes[0].offset, Beat::from_beats(1));
        assert!(tl.drain_range(Beat::ZERO, Beat::from_beats(100)).is_empty());
    }

    #[test]
    fn split_carries_sounding_chord_across_barlines() {
        let mut tl = Timeline::new();
        tl.insert_batch(vec![note_at(0.0, "C4"), note_at(5.0, "E4"), note_at(8.0, "F4")]);
        let c_major = chord_at(0.0, &["C4", "E4", "G4"]);
        let g_major = chord_at(6.0, &["G3", "B3", "D4"]);
        let f_major = chord_at(8.0, &["F3", "A3", "C4"]);
        let harmony = vec![g_major.clone(), c_major.clone(), f_major.clone()];

        let measures = tl.split_measures(&harmony, Beat::from_beats(4));
        assert_eq!(measures.len(), 3);

        assert_eq!(measures[0].chords, vec![c_major.clone()]);

        // C carried into measure 2, then G at beat 2 of that measure.
        assert_eq!(measures[1].chords.len(), 2);
        assert_eq!(measures[1].chords[0], ChordEvent::new(Beat::ZERO, c_major.chord));
        assert_eq!(
            measures[1].chords[1],
            ChordEvent::new(Beat::from_beats(2), g_major.chord)
        );

        // F starts exactly on the barline, so nothing is carried.
        assert_eq!(measures[2].chords, vec![ChordEvent::new(Beat::ZERO, f_major.chord)]);
    }

    #[test]
    fn split_empty_inputs() {
        let mut tl = Timeline::new();
        assert!(tl.split_measures(&[], Beat::from_beats(4)).is_empty());

        tl.insert_batch([note_at(0.0, "C4")]);
        assert!(tl.split_measures(&[], Beat::ZERO).is_empty());
    }

    #[test]
    fn stitch_places_measures_end_to_end() {
        let measures = vec![
            vec![note_at(0.5, "C4")],
            vec![],
            vec![note_at(0.0, "E4"), note_at(1.0, "F4")],
        ];
        let events = Timeline::stitch(measures, Beat::from_beats(4)).into_events();

        let offsets: Vec<Beat> = events.iter().map(|e| e.offset).collect();
        assert_eq!(
            offsets,
            vec![
                Beat::from_beats_f64(0.5),
                Beat::from_beats(8),
                Beat::from_beats(9)
            ]
        );
    }

    #[test]
    fn split_then_stitch_restores_offsets() {
        let source = vec![note_at(0.0, "C4"), note_at(4.5, "D4"), note_at(7.0, "E4")];
        let mut tl = Timeline::new();
        tl.insert_batch(source.clone());

        let harmony = vec![chord_at(0.0, &["C4", "E4", "G4"])];
        let measures = tl.split_measures(&harmony, Beat::from_beats(4));
        let notes = measures.into_iter().map(|m| m.notes);
        let restored = Timeline::stitch(notes, Beat::from_beats(4)).into_events();

        assert_eq!(restored, source);
    }
}
