//! Initial particle state, seeded once on the host.

use crate::constants::{MAX_PARTICLE_GRID, MIN_PARTICLE_GRID};
use rand::prelude::*;

/// Clamp a requested grid side length into the supported range.
pub fn clamp_grid_size(requested: u32) -> u32 {
    requested.clamp(MIN_PARTICLE_GRID, MAX_PARTICLE_GRID)
}

/// Texel coordinate of particle `index` on a `grid x grid` state texture.
#[inline]
pub fn texel_for_index(index: u32, grid: u32) -> (u32, u32) {
    (index % grid, index / grid)
}

/// `grid * grid` texels of `(x, y, z, phase)`: points uniformly inside the
/// unit sphere with a phase in \[0, 1). Same seed, same field.
pub fn seed_sphere(grid: u32, seed: u64) -> Vec<[f32; 4]> {
    let count = (grid as usize) * (grid as usize);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let x: f32 = rng.gen_range(-1.0..1.0);
        let y: f32 = rng.gen_range(-1.0..1.0);
        let z: f32 = rng.gen_range(-1.0..1.0);
        // rejection keeps the density uniform
        if x * x + y * y + z * z > 1.0 {
            continue;
        }
        out.push([x, y, z, rng.gen::<f32>()]);
    }
    out
}
