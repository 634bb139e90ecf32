//! Musical time representation using integer ticks.
//!
//! Uses 960 PPQN (Pulses Per Quarter Note) to avoid floating-point accumulation
//! errors when durations are summed into running offsets. Conversion to and
//! from quarter-length decimals happens only at the text boundary.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Ticks per quarter note (beat). 960 is a common PPQN that divides cleanly
/// by 2, 3, 4, 5, 6, 8, 10, 12, 15, 16, 20, 24, 32, etc.
pub const TICKS_PER_BEAT: u64 = 960;

/// Default measure length: 4 quarter notes.
pub const DEFAULT_BEATS_PER_MEASURE: u32 = 4;

/// Musical time measured in integer ticks at [`TICKS_PER_BEAT`] resolution.
///
/// Used both for offsets within a measure and for note durations, which are
/// expressed in quarter-note units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Beat {
    ticks: u64,
}

impl Beat {
    /// Zero time, the start of a measure or piece.
    pub const ZERO: Beat = Beat { ticks: 0 };

    /// Create a `Beat` from a raw tick count.
    pub fn from_ticks(ticks: u64) -> Self {
        Self { ticks }
    }

    /// Create a `Beat` from whole beats (quarter notes).
    pub fn from_beats(beats: u32) -> Self {
        Self {
            ticks: beats as u64 * TICKS_PER_BEAT,
        }
    }

    /// Create a `Beat` spanning `measures` measures of `beats_per_measure` beats.
    pub fn from_measures(measures: u32, beats_per_measure: u32) -> Self {
        Self {
            ticks: measures as u64 * beats_per_measure as u64 * TICKS_PER_BEAT,
        }
    }

    /// Create a `Beat` from a fractional beat value (e.g. 1.5 = one and a half beats).
    /// Negative values clamp to zero.
    pub fn from_beats_f64(beats: f64) -> Self {
        Self {
            ticks: (beats * TICKS_PER_BEAT as f64).round() as u64,
        }
    }

    /// Return the raw tick count.
    pub fn ticks(self) -> u64 {
        self.ticks
    }

    /// Convert to a floating-point beat value.
    pub fn as_beats_f64(self) -> f64 {
        self.ticks as f64 / TICKS_PER_BEAT as f64
    }

    /// Quarter-note length with three decimals, e.g. "0.500".
    pub fn quarter_length(self) -> String {
        format!("{:.3}", self.as_beats_f64())
    }

    /// Index of the measure containing this position.
    pub fn measure_index(self, measure_length: Beat) -> u64 {
        if measure_length.ticks == 0 {
            return 0;
        }
        self.ticks / measure_length.ticks
    }

    /// Scale a length by a whole number, e.g. the start of measure `n`.
    pub fn times(self, n: u64) -> Self {
        Self {
            ticks: self.ticks * n,
        }
    }
}

impl Ord for Beat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }
}

impl PartialOrd for Beat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Beat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks + rhs.ticks,
        }
    }
}

impl AddAssign for Beat {
    fn add_assign(&mut self, rhs: Self) {
        self.ticks += rhs.ticks;
    }
}

impl Sub for Beat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks.saturating_sub(rhs.ticks),
        }
    }
}

impl fmt::Display for Beat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quarter_length())
    }
}
