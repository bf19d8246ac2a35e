//! Offline renderer — drives the block engine over a whole score.
//!
//! The real-time host calls `process_block` itself; this module is the
//! offline equivalent (WAV export, WASM playback buffers). It expands a
//! [`Score`] to sample-accurate events, renders 128-frame blocks through
//! the same engine, and hand-encodes 16-bit PCM WAV bytes.

use crate::error::SynthError;
use crate::event::TimedEvent;
use crate::score::Score;

use super::buffer::{AudioBuffer, BlockBuffer};
use super::engine::SynthEngine;

/// Frames per block in the offline render loop.
const RENDER_BLOCK_SIZE: usize = 128;

/// Render a score to mono f32 samples (the engine's channel 0).
pub fn render_score(score: &Score, sample_rate: u32) -> Result<Vec<f32>, SynthError> {
    score.validate()?;

    let rate = sample_rate as f64;
    let events = score.schedule(rate);
    let total_samples = score.total_samples(rate);

    let mut engine = SynthEngine::new();
    engine.prepare_to_play(rate);

    let mut output = Vec::with_capacity(total_samples);
    let mut buffer = BlockBuffer::new(1, RENDER_BLOCK_SIZE);
    let mut block_events: Vec<TimedEvent> = Vec::new();
    let mut next_event = 0;
    let mut block_start = 0;

    while block_start < total_samples {
        let this_block = RENDER_BLOCK_SIZE.min(total_samples - block_start);
        let block_end = block_start + this_block;

        // Rebase this block's events to offsets within the block. An event
        // landing exactly on a block boundary belongs to the next block.
        block_events.clear();
        while next_event < events.len() && events[next_event].offset < block_end {
            let ev = events[next_event];
            block_events.push(TimedEvent {
                offset: ev.offset - block_start,
                event: ev.event,
            });
            next_event += 1;
        }

        // The engine is additive; the block must be cleared before reuse.
        buffer.clear();
        engine.process_block(&mut buffer, &block_events);
        output.extend_from_slice(&buffer.channel(0)[..this_block]);

        block_start = block_end;
    }

    Ok(output)
}

/// Render a score to a WAV byte buffer (16-bit stereo PCM).
pub fn render_score_wav(score: &Score, sample_rate: u32) -> Result<Vec<u8>, SynthError> {
    let mono = render_score(score, sample_rate)?;

    // Both engine channels carry identical content, so stereo is the mono
    // signal interleaved twice.
    let mut pcm = Vec::with_capacity(mono.len() * 2);
    for &s in &mono {
        let q = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
        pcm.push(q);
        pcm.push(q);
    }

    Ok(encode_wav(&pcm, sample_rate, 2))
}

/// Encode interleaved i16 PCM samples as a WAV byte buffer.
fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let bytes_per_sample = bits_per_sample / 8;
    let block_align = channels * bytes_per_sample;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = (samples.len() * bytes_per_sample as usize) as u32;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data_size).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // uncompressed PCM
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::bank::note_to_frequency;
    use crate::dsp::oscillator::WavetableOscillator;
    use crate::dsp::wavetable::WaveTable;
    use crate::score::ScoreNote;

    fn single_note_score(note: u8, start: f64, duration: f64) -> Score {
        Score {
            notes: vec![ScoreNote {
                note,
                velocity: 100,
                start,
                duration,
            }],
        }
    }

    #[test]
    fn output_length_matches_the_score() {
        let score = single_note_score(69, 0.0, 0.5);
        let samples = render_score(&score, 44100).unwrap();
        assert_eq!(samples.len(), 22050);
    }

    #[test]
    fn empty_score_renders_nothing() {
        let samples = render_score(&Score::default(), 44100).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn block_chaining_is_seamless() {
        // The block loop must be indistinguishable from one long render:
        // compare against a single oscillator run over the whole span.
        let score = single_note_score(69, 0.0, 0.1);
        let rate = 48000;
        let samples = render_score(&score, rate).unwrap();

        let mut osc = WavetableOscillator::new(WaveTable::sine(), rate as f64);
        osc.set_frequency(note_to_frequency(69));
        for (i, &got) in samples.iter().enumerate() {
            let want = osc.next_sample();
            assert!(
                (got - want).abs() < 1e-6,
                "sample {i}: block render {got} diverged from continuous render {want}"
            );
        }
    }

    #[test]
    fn gap_between_notes_is_silent() {
        let score = Score {
            notes: vec![
                ScoreNote {
                    note: 69,
                    velocity: 100,
                    start: 0.0,
                    duration: 0.1,
                },
                ScoreNote {
                    note: 72,
                    velocity: 100,
                    start: 0.2,
                    duration: 0.1,
                },
            ],
        };
        let rate = 44100;
        let samples = render_score(&score, rate).unwrap();

        let gap_start = (0.1 * rate as f64) as usize;
        let gap_end = (0.2 * rate as f64) as usize;
        assert!(
            samples[gap_start..gap_end].iter().all(|&s| s == 0.0),
            "voice cutoff is instantaneous, the gap must be exactly silent"
        );
        assert!(samples[..gap_start].iter().any(|&s| s != 0.0));
        assert!(samples[gap_end..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn invalid_score_is_rejected_before_rendering() {
        let score = single_note_score(69, -1.0, 0.5);
        assert!(matches!(
            render_score(&score, 44100),
            Err(SynthError::InvalidScore { .. })
        ));
    }

    #[test]
    fn wav_header_is_valid() {
        let score = single_note_score(69, 0.0, 0.25);
        let wav = render_score_wav(&score, 44100).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");

        let sr = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(sr, 44100);
        let ch = u16::from_le_bytes([wav[22], wav[23]]);
        assert_eq!(ch, 2);
    }

    #[test]
    fn wav_data_size_is_correct() {
        // 0.5 s at 44100 Hz = 22050 frames × 2 channels × 2 bytes.
        let score = single_note_score(60, 0.0, 0.5);
        let wav = render_score_wav(&score, 44100).unwrap();

        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 88200);
        assert_eq!(wav.len(), 44 + 88200);
    }

    #[test]
    fn wav_contains_audible_samples() {
        let score = single_note_score(69, 0.0, 0.1);
        let wav = render_score_wav(&score, 22050).unwrap();

        let mut has_nonzero = false;
        for pair in wav[44..].chunks_exact(2) {
            if i16::from_le_bytes([pair[0], pair[1]]) != 0 {
                has_nonzero = true;
                break;
            }
        }
        assert!(has_nonzero, "rendered WAV should contain non-silent audio");
    }
}
