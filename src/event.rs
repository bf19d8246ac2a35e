//! Note events — the block-level control vocabulary of the engine.

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// Number of distinct note identities the engine supports.
pub const NOTE_COUNT: usize = 128;

/// A note-level state change, addressed by note identity (0-127, A4 = 69).
///
/// Velocity is carried for hosts that record or forward it; the render
/// core maps a note-on to a frequency only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoteEvent {
    /// Start (or retrigger) the voice mapped to `note`.
    NoteOn { note: u8, velocity: u8 },
    /// Silence the voice mapped to `note`. A no-op if it is already silent.
    NoteOff { note: u8 },
    /// Silence every voice.
    AllNotesOff,
}

impl NoteEvent {
    /// The note identity this event addresses, if any.
    pub fn note(&self) -> Option<u8> {
        match self {
            NoteEvent::NoteOn { note, .. } | NoteEvent::NoteOff { note } => Some(*note),
            NoteEvent::AllNotesOff => None,
        }
    }
}

/// A [`NoteEvent`] tagged with its sample offset inside the current block.
///
/// Offsets must lie in `[0, block length]` and arrive in non-decreasing
/// order; equal offsets are applied in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Sample offset within the block at which the event takes effect.
    pub offset: usize,
    pub event: NoteEvent,
}

impl TimedEvent {
    /// A note-on at `offset`. Fails fast on a note identity without a
    /// voice slot — the range is never clamped.
    pub fn note_on(offset: usize, note: u8, velocity: u8) -> Result<Self, SynthError> {
        check_note(note)?;
        Ok(TimedEvent {
            offset,
            event: NoteEvent::NoteOn { note, velocity },
        })
    }

    /// A note-off at `offset`.
    pub fn note_off(offset: usize, note: u8) -> Result<Self, SynthError> {
        check_note(note)?;
        Ok(TimedEvent {
            offset,
            event: NoteEvent::NoteOff { note },
        })
    }

    /// An all-notes-off at `offset`.
    pub fn all_notes_off(offset: usize) -> Self {
        TimedEvent {
            offset,
            event: NoteEvent::AllNotesOff,
        }
    }
}

/// Reject note identities outside the voice bank.
pub fn check_note(note: u8) -> Result<(), SynthError> {
    if (note as usize) < NOTE_COUNT {
        Ok(())
    } else {
        Err(SynthError::InvalidNote { note })
    }
}
