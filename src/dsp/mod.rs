//! DSP core — pure Rust wavetable synthesis.
//!
//! Everything on the signal path lives here: the shared wavetable, the
//! per-voice oscillators, the 128-slot voice bank, and the block engine
//! that dispatches note events. The same code powers the real-time host
//! path and the offline renderer (WAV export, WASM playback buffers).

pub mod bank;
pub mod buffer;
pub mod engine;
pub mod oscillator;
pub mod renderer;
pub mod wavetable;

pub use bank::{VoiceBank, note_to_frequency, note_to_frequency_with_tuning};
pub use buffer::{AudioBuffer, BlockBuffer};
pub use engine::SynthEngine;
pub use oscillator::WavetableOscillator;
pub use wavetable::{SINE_TABLE_LENGTH, WaveTable};
