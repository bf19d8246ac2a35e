//! Score — a serializable list of timed notes for offline rendering.
//!
//! A score is the JSON boundary of the crate: hosts (editor, CLI, the WASM
//! wrapper) describe notes in seconds, the renderer expands them to
//! sample-accurate note-on/note-off events and drives the block engine.

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::event::{TimedEvent, check_note};

fn default_velocity() -> u8 {
    100
}

/// One note in a score: identity, velocity, and timing in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreNote {
    /// Note identity (0-127, A4 = 69).
    pub note: u8,
    /// Velocity (0-127). Recorded with the note; the engine does not
    /// apply it as gain.
    #[serde(default = "default_velocity")]
    pub velocity: u8,
    /// Onset in seconds from the start of the score.
    pub start: f64,
    /// Audible length in seconds (the voice cuts off instantly at the end).
    pub duration: f64,
}

/// A complete score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Score {
    pub notes: Vec<ScoreNote>,
}

impl Score {
    /// Parse and validate a JSON score document.
    pub fn from_json(json: &str) -> Result<Score, SynthError> {
        let score: Score = serde_json::from_str(json)?;
        score.validate()?;
        Ok(score)
    }

    /// Fail fast on notes the voice bank cannot address and on timing that
    /// cannot be mapped to sample offsets.
    pub fn validate(&self) -> Result<(), SynthError> {
        for (i, n) in self.notes.iter().enumerate() {
            check_note(n.note)?;
            if !n.start.is_finite() || n.start < 0.0 {
                return Err(SynthError::InvalidScore {
                    reason: format!("note {i} has start {}", n.start),
                });
            }
            if !n.duration.is_finite() || n.duration < 0.0 {
                return Err(SynthError::InvalidScore {
                    reason: format!("note {i} has duration {}", n.duration),
                });
            }
        }
        Ok(())
    }

    /// Total rendered length in samples: the end of the last note.
    pub fn total_samples(&self, sample_rate: f64) -> usize {
        self.notes
            .iter()
            .map(|n| ((n.start + n.duration) * sample_rate) as usize)
            .max()
            .unwrap_or(0)
    }

    /// Expand to note-on/note-off events with ABSOLUTE sample offsets,
    /// ordered for block dispatch.
    ///
    /// At equal offsets, note-offs sort before note-ons so a note that
    /// retriggers its own slot restarts cleanly; otherwise submission
    /// order is kept (stable sort).
    pub fn schedule(&self, sample_rate: f64) -> Vec<TimedEvent> {
        let mut events: Vec<(u8, TimedEvent)> = Vec::with_capacity(self.notes.len() * 2);
        for n in &self.notes {
            let on_sample = (n.start * sample_rate) as usize;
            let off_sample = ((n.start + n.duration) * sample_rate) as usize;
            // Notes are pre-validated, so construction cannot fail.
            if let Ok(on) = TimedEvent::note_on(on_sample, n.note, n.velocity) {
                events.push((1, on));
            }
            if let Ok(off) = TimedEvent::note_off(off_sample, n.note) {
                events.push((0, off));
            }
        }
        events.sort_by_key(|(rank, ev)| (ev.offset, *rank));
        events.into_iter().map(|(_, ev)| ev).collect()
    }
}
