//! Synthetic "breathing" driver used while no microphone is live.

use crate::bands::FrequencyBands;
use crate::constants::*;

/// Deterministic function of wall-clock seconds; the field keeps moving
/// without audio input.
#[derive(Clone, Copy, Debug)]
pub struct AmbientGenerator {
    pub center: f32,
    pub depth: f32,
    pub volume_floor: f32,
}

impl Default for AmbientGenerator {
    fn default() -> Self {
        Self {
            center: AMBIENT_CENTER,
            depth: AMBIENT_DEPTH,
            volume_floor: AMBIENT_VOLUME_FLOOR,
        }
    }
}

impl AmbientGenerator {
    pub fn bands(&self, now_sec: f64) -> FrequencyBands {
        let t = now_sec as f32;
        let bass = self.center + self.depth * (t * AMBIENT_BASS_RATE).sin();
        // Mid mixes two rates so the breath never settles into a fixed loop.
        let mid = self.center
            + self.depth * 0.6 * (t * AMBIENT_MID_RATE).cos()
            + self.depth * 0.4 * (t * AMBIENT_BASS_RATE * 0.5).sin();
        let high = self.center * 0.7 + self.depth * 0.5 * (t * AMBIENT_HIGH_RATE + 1.3).sin();
        FrequencyBands::new(bass, mid, high).clamped()
    }

    /// Never below the floor.
    pub fn volume(&self, now_sec: f64) -> f32 {
        self.bands(now_sec).mean().max(self.volume_floor)
    }
}
