//! Wavetable oscillator — a phase accumulator over a shared table.

use super::wavetable::WaveTable;

/// Reads a shared [`WaveTable`] at a fractional index, one sample per call.
///
/// The oscillator owns no table data, only a handle and its own phase
/// state. A zero phase increment means the voice is silent; this doubles
/// as the active/inactive flag, so there is no separate gate state.
#[derive(Debug, Clone)]
pub struct WavetableOscillator {
    table: WaveTable,
    sample_rate: f64,
    /// Fractional read position in `[0, len)`.
    phase: f32,
    /// Step per sample, derived from the target frequency.
    phase_increment: f32,
}

impl WavetableOscillator {
    pub fn new(table: WaveTable, sample_rate: f64) -> Self {
        WavetableOscillator {
            table,
            sample_rate,
            phase: 0.0,
            phase_increment: 0.0,
        }
    }

    /// Tune the oscillator to `frequency` Hz.
    ///
    /// `increment = frequency * len / sample_rate`. No bounds check: an
    /// increment at or above the table length plays, aliased. A frequency
    /// of 0 is equivalent to silence.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.phase_increment = frequency * self.table.len() as f32 / self.sample_rate as f32;
    }

    /// Produce one output sample and advance the phase.
    ///
    /// Stateful: call exactly once per rendered sample. The phase wraps
    /// into `[0, len)` by floating modulo after each advance, so the table
    /// is read cyclically.
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.interpolate_linearly();
        self.phase += self.phase_increment;
        self.phase %= self.table.len() as f32;
        sample
    }

    /// Two-point linear interpolation at the current phase.
    fn interpolate_linearly(&self) -> f32 {
        let samples = self.table.samples();
        let truncated = self.phase as usize;
        let next = (truncated + 1) % samples.len();
        let next_weight = self.phase - truncated as f32;
        (1.0 - next_weight) * samples[truncated] + next_weight * samples[next]
    }

    /// Silence the voice immediately: phase and increment both reset.
    ///
    /// No release ramp — the cut is instantaneous.
    pub fn stop(&mut self) {
        self.phase = 0.0;
        self.phase_increment = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.phase_increment != 0.0
    }
}
