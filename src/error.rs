//! Error types shared by the pitch, harmony, and grammar layers.

use thiserror::Error;

/// An error raised while building music primitives or processing grammar.
///
/// Malformed grammar text never surfaces here from the decoder: bad tokens
/// are skipped. These variants cover invalid inputs to constructors, broken
/// structural preconditions (a measure with notes but no chords), and file
/// handling.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("invalid pitch: {0:?}")]
    InvalidPitch(String),

    #[error("invalid interval: {0:?}")]
    InvalidInterval(String),

    #[error("malformed grammar token {token:?}: {reason}")]
    MalformedToken { token: String, reason: &'static str },

    #[error("chord has no pitches")]
    EmptyChord,

    #[error("measure has notes but no chords")]
    EmptyChords,

    #[error("no chord sounding at offset {offset:.3}")]
    NoActiveChord { offset: f64 },

    #[error("invalid piece: {0}")]
    InvalidPiece(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GrammarError {
    pub(crate) fn malformed(token: &str, reason: &'static str) -> Self {
        Self::MalformedToken {
            token: token.to_string(),
            reason,
        }
    }
}
