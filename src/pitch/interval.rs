//! Directed, spelled intervals and their text names ("M2", "m-3", "P4").

use std::fmt;
use std::str::FromStr;

use super::note::Pitch;
use crate::error::GrammarError;

/// A directed interval: a letter distance plus a semitone distance.
///
/// Keeping both lets `D4 -> F4` (m3) and `D4 -> E#4` (A2) stay distinct
/// while sounding the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    diatonic: i32,
    semitones: i32,
}

/// The minor third used to widen melodic ranges.
pub const MINOR_THIRD: Interval = Interval {
    diatonic: 2,
    semitones: 3,
};

/// Widest interval a name may describe, in semitones either way.
pub const MAX_SEMITONES: i32 = 127;

/// Simple intervals per letter distance: whether the interval belongs to the
/// perfect family, and its semitones when perfect or major.
const SIMPLE: [(bool, i32); 7] = [
    (true, 0),
    (false, 2),
    (false, 4),
    (true, 5),
    (true, 7),
    (false, 9),
    (false, 11),
];

impl Interval {
    pub fn new(diatonic: i32, semitones: i32) -> Self {
        Self {
            diatonic,
            semitones,
        }
    }

    /// The interval from `from` to `to`.
    pub fn between(from: &Pitch, to: &Pitch) -> Interval {
        Interval::new(
            to.diatonic_index() - from.diatonic_index(),
            to.ps() - from.ps(),
        )
    }

    /// Signed letter distance (a second is 1, a descending third is -2).
    pub fn diatonic(self) -> i32 {
        self.diatonic
    }

    /// Signed semitone distance.
    pub fn semitones(self) -> i32 {
        self.semitones
    }

    pub fn reversed(self) -> Interval {
        Interval::new(-self.diatonic, -self.semitones)
    }

    fn is_descending(self) -> bool {
        self.diatonic < 0 || (self.diatonic == 0 && self.semitones < 0)
    }

    /// Name in `<quality>[-]<number>` form, e.g. "M2", "m-3", "P4", "A-4".
    pub fn directed_name(self) -> String {
        let descending = self.is_descending();
        let (diatonic, semitones) = if descending {
            (-self.diatonic, -self.semitones)
        } else {
            (self.diatonic, self.semitones)
        };

        let (perfect, base) = SIMPLE[diatonic.rem_euclid(7) as usize];
        let deviation = semitones - (base + 12 * diatonic.div_euclid(7));

        let quality = match (perfect, deviation) {
            (true, 0) => "P".to_string(),
            (false, 0) => "M".to_string(),
            (false, -1) => "m".to_string(),
            (_, d) if d > 0 => "A".repeat(d as usize),
            (true, d) => "d".repeat(d.unsigned_abs() as usize),
            (false, d) => "d".repeat((d.unsigned_abs() - 1) as usize),
        };

        let sign = if descending { "-" } else { "" };
        format!("{quality}{sign}{}", diatonic + 1)
    }

    /// Parse an interval name. Accepts the direction marker after the
    /// quality (`m-3`) or as a leading sign (`-m3`). Names wider than
    /// [`MAX_SEMITONES`] are rejected.
    pub fn parse(name: &str) -> Result<Interval, GrammarError> {
        let invalid = || GrammarError::InvalidInterval(name.to_string());

        let (leading_minus, rest) = match name.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, name),
        };

        let quality_len = rest
            .find(|c: char| c == '-' || c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (quality, rest) = rest.split_at(quality_len);

        let (inner_minus, digits) = match rest.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, rest),
        };
        if leading_minus && inner_minus {
            return Err(invalid());
        }

        let number: i32 = digits.parse().map_err(|_| invalid())?;
        if number < 1 {
            return Err(invalid());
        }
        let diatonic = number - 1;
        let (perfect, base) = SIMPLE[diatonic.rem_euclid(7) as usize];

        let count = i32::try_from(quality.len()).map_err(|_| invalid())?;
        if count > MAX_SEMITONES {
            return Err(invalid());
        }
        let deviation = match quality {
            "P" if perfect => 0,
            "M" if !perfect => 0,
            "m" if !perfect => -1,
            q if count > 0 && q.chars().all(|c| c == 'A') => count,
            q if count > 0 && q.chars().all(|c| c == 'd') => {
                if perfect {
                    -count
                } else {
                    -count - 1
                }
            }
            _ => return Err(invalid()),
        };

        let nominal = (diatonic / 7)
            .checked_mul(12)
            .and_then(|octaves| octaves.checked_add(base))
            .filter(|nominal| *nominal <= MAX_SEMITONES)
            .ok_or_else(invalid)?;
        let semitones = nominal + deviation;
        if semitones.abs() > MAX_SEMITONES {
            return Err(invalid());
        }

        let interval = Interval::new(diatonic, semitones);
        if leading_minus || inner_minus {
            Ok(interval.reversed())
        } else {
            Ok(interval)
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.directed_name())
    }
}

impl FromStr for Interval {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::parse(s)
    }
}

/// The melodic range around a move from `previous` to `current`: the
/// intervals from `previous` to `current` raised and lowered by a minor
/// third. Returned as `(upper, lower)`.
pub fn widen(previous: &Pitch, current: &Pitch) -> (Interval, Interval) {
    let upper = Interval::between(previous, &current.transpose(MINOR_THIRD));
    let lower = Interval::between(previous, &current.transpose(MINOR_THIRD.reversed()));
    (upper, lower)
}
