use crate::constants::{MORPH_EDGE_END, MORPH_EDGE_START};

/// Hermite smoothstep, matching the WGSL builtin.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Scroll progress through the visual section, polled every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollTracker {
    progress: f32,
}

impl ScrollTracker {
    /// Record `scroll_y / viewport_height`, clamped to \[0, 1\].
    pub fn sample(&mut self, scroll_y: f64, viewport_height: f64) -> f32 {
        self.progress = if viewport_height.is_finite() && viewport_height > 0.0 && scroll_y.is_finite() {
            (scroll_y / viewport_height).clamp(0.0, 1.0) as f32
        } else {
            0.0
        };
        self.progress
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Morph target for the current progress; the simulation springs it.
    pub fn morph_target(&self) -> f32 {
        smoothstep(MORPH_EDGE_START, MORPH_EDGE_END, self.progress)
    }
}
