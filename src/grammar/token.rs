//! Grammar tokens and their text form.
//!
//! ```text
//! token := role "," duration ["," "<" interval "," interval ">"]
//! ```
//!
//! Durations are written with three decimals; any float literal parses.

use std::fmt;
use std::str::FromStr;

use super::role::Role;
use crate::error::GrammarError;
use crate::event::Beat;
use crate::pitch::{Interval, Pitch};

/// The pair of intervals bounding where a pitch may lie relative to the
/// previous pitched note. Stored in the order written; use
/// [`IntervalRange::ordered`] to get the bounds by size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalRange {
    pub upper: Interval,
    pub lower: Interval,
}

impl IntervalRange {
    pub fn new(upper: Interval, lower: Interval) -> Self {
        Self { upper, lower }
    }

    /// `(low, high)` by semitone size. On a tie the first written interval
    /// is taken as the low bound.
    pub fn ordered(&self) -> (Interval, Interval) {
        if self.upper.semitones() > self.lower.semitones() {
            (self.lower, self.upper)
        } else {
            (self.upper, self.lower)
        }
    }

    /// The inclusive semitone span around `previous`, as absolute pitches.
    pub fn bounds_from(&self, previous: &Pitch) -> (Pitch, Pitch) {
        let (low, high) = self.ordered();
        (previous.transpose(low), previous.transpose(high))
    }
}

/// One grammar unit: role, duration and an optional interval range.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub role: Role,
    pub duration: Beat,
    pub interval: Option<IntervalRange>,
}

impl Token {
    pub fn new(role: Role, duration: Beat) -> Self {
        Self {
            role,
            duration,
            interval: None,
        }
    }

    pub fn with_interval(mut self, range: IntervalRange) -> Self {
        self.interval = Some(range);
        self
    }

    /// Parse one token.
    ///
    /// Rejects fewer than two fields, a duration that is not a positive
    /// number of at least one tick, and an interval term that does not hold
    /// exactly two intervals. A role symbol other than `R C S A X` reads as
    /// [`Role::Other`], so it still decodes as a pitched note.
    pub fn parse(text: &str) -> Result<Token, GrammarError> {
        let fields: Vec<&str> = text.split(',').collect();
        if fields.len() < 2 {
            return Err(GrammarError::malformed(text, "expected role and duration"));
        }

        let role = Role::from_symbol(fields[0]).unwrap_or(Role::Other);

        let beats: f64 = fields[1]
            .trim()
            .parse()
            .map_err(|_| GrammarError::malformed(text, "duration is not a number"))?;
        if !beats.is_finite() || beats <= 0.0 {
            return Err(GrammarError::malformed(text, "duration must be positive"));
        }
        let duration = Beat::from_beats_f64(beats);
        if duration == Beat::ZERO {
            return Err(GrammarError::malformed(text, "duration shorter than a tick"));
        }

        let interval = match &fields[2..] {
            [] => None,
            [first, second] => {
                let first = first.trim_start_matches('<');
                let second = second.trim_end_matches('>');
                let upper = Interval::parse(first)
                    .map_err(|_| GrammarError::malformed(text, "bad interval"))?;
                let lower = Interval::parse(second)
                    .map_err(|_| GrammarError::malformed(text, "bad interval"))?;
                Some(IntervalRange::new(upper, lower))
            }
            _ => {
                return Err(GrammarError::malformed(
                    text,
                    "interval term needs exactly two bounds",
                ))
            }
        };

        Ok(Token {
            role,
            duration,
            interval,
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.role, self.duration.quarter_length())?;
        if let Some(range) = &self.interval {
            write!(f, ",<{},{}>", range.upper, range.lower)?;
        }
        Ok(())
    }
}

impl FromStr for Token {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::parse(s)
    }
}
