//! Synth engine — event dispatch and block rendering.
//!
//! The engine walks a block's events in timestamp order, rendering the
//! sub-range up to each event boundary before applying the event's state
//! change, then renders the tail after the last event. Active voices are
//! summed into channel 0 and channel 0 is duplicated into the remaining
//! channels. The same code drives the real-time host path and the offline
//! renderer.

use crate::event::{NoteEvent, TimedEvent};

use super::bank::VoiceBank;
use super::buffer::AudioBuffer;
use super::wavetable::WaveTable;

/// Rate the bank is built at before the host calls `prepare_to_play`.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Polyphonic wavetable synthesizer: a voice bank plus block dispatch.
pub struct SynthEngine {
    sample_rate: f64,
    table: WaveTable,
    bank: VoiceBank,
}

impl SynthEngine {
    /// An engine playing the default sine table.
    pub fn new() -> Self {
        SynthEngine::with_table(WaveTable::sine())
    }

    /// An engine playing a caller-provided table.
    pub fn with_table(table: WaveTable) -> Self {
        let bank = VoiceBank::new(table.clone(), DEFAULT_SAMPLE_RATE);
        SynthEngine {
            sample_rate: DEFAULT_SAMPLE_RATE,
            table,
            bank,
        }
    }

    /// Adopt the host sample rate and rebuild the voice bank.
    ///
    /// Phase increments depend on the rate, so every voice is recreated
    /// (and therefore silenced). Call before the first block and again on
    /// every rate change; the host serializes this with rendering.
    pub fn prepare_to_play(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        let tuning = self.bank.tuning_pitch();
        self.bank = VoiceBank::new(self.table.clone(), sample_rate);
        self.bank.set_tuning_pitch(tuning);
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// A4 reference pitch forwarded to the voice bank.
    pub fn set_tuning_pitch(&mut self, a4_hz: f32) {
        self.bank.set_tuning_pitch(a4_hz);
    }

    /// Number of currently sounding voices.
    pub fn active_voices(&self) -> usize {
        self.bank.active_voices()
    }

    /// Render one block, applying `events` at their sample offsets.
    ///
    /// `events` must be ordered by non-decreasing offset with offsets in
    /// `[0, num_frames]`; equal offsets apply in submission order. Output
    /// is ADDED to the buffer's existing contents — callers clear first
    /// (or stack several synthesis passes deliberately). This path
    /// allocates nothing and cannot fail.
    pub fn process_block<B: AudioBuffer>(&mut self, buffer: &mut B, events: &[TimedEvent]) {
        let frames = buffer.num_frames();
        let mut current = 0;

        for timed in events {
            debug_assert!(timed.offset >= current, "events must be offset-ordered");
            debug_assert!(timed.offset <= frames, "event offset beyond block length");
            let boundary = timed.offset.clamp(current, frames);
            self.render(buffer, current, boundary);
            self.apply_event(timed.event);
            current = boundary;
        }

        self.render(buffer, current, frames);
    }

    fn apply_event(&mut self, event: NoteEvent) {
        match event {
            NoteEvent::NoteOn { note, .. } => self.bank.note_on(note),
            NoteEvent::NoteOff { note } => self.bank.note_off(note),
            NoteEvent::AllNotesOff => self.bank.all_notes_off(),
        }
    }

    /// Sum active voices into channel 0 over `[start, end)`, then copy
    /// that range into every other channel. Empty ranges are no-ops.
    fn render<B: AudioBuffer>(&mut self, buffer: &mut B, start: usize, end: usize) {
        if start >= end {
            return;
        }

        for osc in self.bank.iter_mut() {
            if !osc.is_active() {
                continue;
            }
            let first = &mut buffer.channel_mut(0)[start..end];
            for sample in first {
                *sample += osc.next_sample();
            }
        }

        buffer.duplicate_first_channel(start, end);
    }
}

impl Default for SynthEngine {
    fn default() -> Self {
        SynthEngine::new()
    }
}
