use std::fmt;

/// Errors raised at configuration boundaries.
///
/// The render path itself is total: once a wavetable, voice bank, and score
/// have passed validation, rendering cannot fail. Everything here is caught
/// when the offending value is constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    /// A wavetable shorter than two samples cannot be interpolated.
    InvalidWaveTable { len: usize },
    /// Note identity outside the 128-slot voice bank.
    InvalidNote { note: u8 },
    /// A score with non-finite or negative timing.
    InvalidScore { reason: String },
    /// A score document that failed to parse as JSON.
    Json { message: String },
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::InvalidWaveTable { len } => {
                write!(f, "Wavetable needs at least 2 samples, got {len}")
            }
            SynthError::InvalidNote { note } => {
                write!(f, "Note {note} is outside the supported range 0-127")
            }
            SynthError::InvalidScore { reason } => write!(f, "Invalid score: {reason}"),
            SynthError::Json { message } => write!(f, "Score JSON error: {message}"),
        }
    }
}

impl std::error::Error for SynthError {}

impl From<serde_json::Error> for SynthError {
    fn from(e: serde_json::Error) -> Self {
        SynthError::Json {
            message: e.to_string(),
        }
    }
}
