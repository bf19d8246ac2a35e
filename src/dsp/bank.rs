//! Voice bank — a fixed pool of oscillators, one slot per note identity.

use crate::event::NOTE_COUNT;

use super::oscillator::WavetableOscillator;
use super::wavetable::WaveTable;

/// Convert a note identity to frequency at standard A4 = 440 Hz tuning.
///
/// Equal-tempered: `440 * 2^((note - 69) / 12)`.
pub fn note_to_frequency(note: u8) -> f32 {
    note_to_frequency_with_tuning(note, 440.0)
}

/// Note-to-frequency conversion with a configurable A4 reference.
///
/// Common values for `a4_hz`: 440.0, 432.0.
pub fn note_to_frequency_with_tuning(note: u8, a4_hz: f32) -> f32 {
    a4_hz * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// 128 oscillators sharing one wavetable and sample rate.
///
/// Slot index equals note identity for the lifetime of the bank: there is
/// no voice stealing and no reassignment. The pool is built once per
/// (table, sample rate) pair and never resized, so the render path touches
/// no allocator.
#[derive(Debug, Clone)]
pub struct VoiceBank {
    oscillators: Vec<WavetableOscillator>,
    tuning_pitch: f32,
}

impl VoiceBank {
    pub fn new(table: WaveTable, sample_rate: f64) -> Self {
        let oscillators = (0..NOTE_COUNT)
            .map(|_| WavetableOscillator::new(table.clone(), sample_rate))
            .collect();
        VoiceBank {
            oscillators,
            tuning_pitch: 440.0,
        }
    }

    /// Set the A4 reference pitch used by subsequent note-ons.
    pub fn set_tuning_pitch(&mut self, a4_hz: f32) {
        self.tuning_pitch = a4_hz;
    }

    pub fn tuning_pitch(&self) -> f32 {
        self.tuning_pitch
    }

    /// Tune the slot for `note` to its equal-tempered frequency.
    ///
    /// Precondition: `note < 128`, enforced where events are constructed.
    pub fn note_on(&mut self, note: u8) {
        let frequency = note_to_frequency_with_tuning(note, self.tuning_pitch);
        self.oscillators[note as usize].set_frequency(frequency);
    }

    /// Silence the slot for `note`. Already-silent slots stay silent.
    pub fn note_off(&mut self, note: u8) {
        self.oscillators[note as usize].stop();
    }

    /// Silence every slot.
    pub fn all_notes_off(&mut self) {
        for osc in &mut self.oscillators {
            osc.stop();
        }
    }

    /// Mutable access to every voice, for the render loop.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WavetableOscillator> {
        self.oscillators.iter_mut()
    }

    /// Number of currently sounding voices.
    pub fn active_voices(&self) -> usize {
        self.oscillators.iter().filter(|o| o.is_active()).count()
    }
}
