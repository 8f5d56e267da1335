//! The per-frame values handed to the shading stage, and their GPU layout.

use crate::mode::Pattern;
use glam::{Mat4, Vec3};

/// Complete set of smoothed values the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformBundle {
    /// Seconds since the first tick.
    pub time: f32,
    pub delta_time: f32,
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
    pub volume: f32,
    pub morph: f32,
    pub shape: [f32; 4],
    pub color1: Vec3,
    pub color2: Vec3,
    pub background: Vec3,
    pub pattern: Pattern,
}

/// Uniform block shared by `simulate.wgsl` and `particles.wgsl`.
///
/// Every member is 16-byte sized so the Rust and WGSL layouts agree
/// without explicit padding rules.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FieldUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub color1: [f32; 4],
    pub color2: [f32; 4],
    pub background: [f32; 4],
    /// n, m, displacement, radius
    pub shape: [f32; 4],
    /// bass, mid, high, volume
    pub audio: [f32; 4],
    /// time, delta_time, morph, point_size
    pub timing: [f32; 4],
    /// grid side, pattern, viewport width, viewport height
    pub grid: [u32; 4],
}

impl FieldUniforms {
    pub fn pack(
        bundle: &UniformBundle,
        view_proj: Mat4,
        grid_size: u32,
        point_size: f32,
        viewport: (u32, u32),
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            color1: bundle.color1.extend(1.0).to_array(),
            color2: bundle.color2.extend(1.0).to_array(),
            background: bundle.background.extend(1.0).to_array(),
            shape: bundle.shape,
            audio: [bundle.bass, bundle.mid, bundle.high, bundle.volume],
            timing: [bundle.time, bundle.delta_time, bundle.morph, point_size],
            grid: [grid_size, bundle.pattern.as_u32(), viewport.0, viewport.1],
        }
    }
}
