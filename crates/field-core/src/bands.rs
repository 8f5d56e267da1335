//! Reduction of an analyser snapshot into named frequency bands.

use crate::constants::{DEFAULT_BAND_COUNT, MAX_BIN_VALUE};
use smallvec::SmallVec;

/// Bass/mid/high energy, each in \[0, 1\].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrequencyBands {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
}

impl FrequencyBands {
    pub const SILENT: FrequencyBands = FrequencyBands {
        bass: 0.0,
        mid: 0.0,
        high: 0.0,
    };

    pub fn new(bass: f32, mid: f32, high: f32) -> Self {
        Self { bass, mid, high }
    }

    /// Three-band reduction of raw byte magnitudes.
    pub fn from_bins(bins: &[u8]) -> Self {
        let bands = reduce(bins, DEFAULT_BAND_COUNT);
        Self {
            bass: bands[0],
            mid: bands[1],
            high: bands[2],
        }
    }

    #[inline]
    pub fn mean(&self) -> f32 {
        (self.bass + self.mid + self.high) / 3.0
    }

    #[inline]
    pub fn is_silent(&self) -> bool {
        self.bass <= 0.0 && self.mid <= 0.0 && self.high <= 0.0
    }

    /// Per-band maximum.
    pub fn max(self, other: FrequencyBands) -> Self {
        Self {
            bass: self.bass.max(other.bass),
            mid: self.mid.max(other.mid),
            high: self.high.max(other.high),
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            bass: self.bass.clamp(0.0, 1.0),
            mid: self.mid.clamp(0.0, 1.0),
            high: self.high.clamp(0.0, 1.0),
        }
    }
}

/// Partition `bins` into `band_count` contiguous ranges and average each.
///
/// Every range holds `bins.len() / band_count` bins except the last, which
/// also absorbs the remainder. Values are normalized by the maximum byte
/// magnitude. Fewer bins than bands (including an empty slice) yields all
/// zeros; the result always has exactly `band_count` entries.
pub fn reduce(bins: &[u8], band_count: usize) -> SmallVec<[f32; 4]> {
    let mut out: SmallVec<[f32; 4]> = SmallVec::from_elem(0.0, band_count);
    let n = bins.len();
    if band_count == 0 || n < band_count {
        return out;
    }
    let width = n / band_count;
    for (band, slot) in out.iter_mut().enumerate() {
        let start = band * width;
        let end = if band + 1 == band_count {
            n
        } else {
            start + width
        };
        let sum: u32 = bins[start..end].iter().map(|&b| b as u32).sum();
        *slot = sum as f32 / (end - start) as f32 / MAX_BIN_VALUE;
    }
    out
}
