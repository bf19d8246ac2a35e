//! WaveTable — one stored cycle of a periodic waveform.
//!
//! A table is generated once, wrapped in a cheap cloneable handle, and
//! shared read-only by every oscillator in the voice bank. Arbitrary
//! frequencies are reconstructed by reading it at a fractional index.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::error::SynthError;

/// Samples in the default sine table.
pub const SINE_TABLE_LENGTH: usize = 64;

/// An immutable single-cycle waveform table.
///
/// Cloning a `WaveTable` clones the handle, not the samples; all clones
/// read the same allocation. Index `len()` is logically identical to
/// index 0 — readers treat the table as cyclic.
#[derive(Debug, Clone)]
pub struct WaveTable {
    samples: Arc<[f32]>,
}

impl WaveTable {
    /// Wrap a sample cycle in a shared table.
    ///
    /// Linear interpolation needs two distinct points, so tables shorter
    /// than 2 samples are rejected here rather than mid-render.
    pub fn from_samples(samples: Vec<f32>) -> Result<Self, SynthError> {
        if samples.len() < 2 {
            return Err(SynthError::InvalidWaveTable {
                len: samples.len(),
            });
        }
        Ok(WaveTable {
            samples: samples.into(),
        })
    }

    /// Generate the default sine table: `sin(2π·i/L)` over one cycle.
    pub fn sine() -> Self {
        let samples: Vec<f32> = (0..SINE_TABLE_LENGTH)
            .map(|i| (2.0 * PI * i as f32 / SINE_TABLE_LENGTH as f32).sin())
            .collect();
        WaveTable {
            samples: samples.into(),
        }
    }

    /// Number of samples in one cycle.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The raw sample cycle.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

impl Default for WaveTable {
    fn default() -> Self {
        WaveTable::sine()
    }
}

impl PartialEq for WaveTable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_table_has_expected_length() {
        let table = WaveTable::sine();
        assert_eq!(table.len(), SINE_TABLE_LENGTH);
    }

    #[test]
    fn sine_table_quarter_points() {
        let table = WaveTable::sine();
        let s = table.samples();
        assert!(s[0].abs() < 1e-6, "sin(0) should be 0, got {}", s[0]);
        assert!(
            (s[SINE_TABLE_LENGTH / 4] - 1.0).abs() < 1e-6,
            "quarter cycle should be 1.0"
        );
        assert!(s[SINE_TABLE_LENGTH / 2].abs() < 1e-5, "half cycle should be ~0");
        assert!(
            (s[3 * SINE_TABLE_LENGTH / 4] + 1.0).abs() < 1e-6,
            "three-quarter cycle should be -1.0"
        );
    }

    #[test]
    fn rejects_degenerate_tables() {
        assert_eq!(
            WaveTable::from_samples(vec![]),
            Err(SynthError::InvalidWaveTable { len: 0 })
        );
        assert_eq!(
            WaveTable::from_samples(vec![1.0]),
            Err(SynthError::InvalidWaveTable { len: 1 })
        );
        assert!(WaveTable::from_samples(vec![0.0, 1.0]).is_ok());
    }

    #[test]
    fn clones_share_the_same_samples() {
        let a = WaveTable::sine();
        let b = a.clone();
        assert!(std::ptr::eq(a.samples(), b.samples()));
    }
}
