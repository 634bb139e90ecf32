//! Lickgram: a phrase grammar for melodies over chords.
//!
//! Each measure of melody is encoded as a line of tokens recording what every
//! note does against the chord under it (chord tone, scale tone, approach
//! tone, other, or rest), how long it lasts, and the interval window around
//! the previous note. Decoding a line against chords draws fresh pitches that
//! respect those roles and windows.

pub mod config;
pub mod error;
pub mod event;
pub mod grammar;
pub mod harmony;
pub mod piece;
pub mod pitch;

pub use error::GrammarError;
pub use grammar::{decode_measure, encode_measure, Role, Token, Vocabulary};
