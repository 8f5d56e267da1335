//! Platform-independent engine for the audio-reactive particle field.
//!
//! Everything the per-frame loop needs that does not touch a browser API
//! lives here so it can be exercised by host tests: band extraction, spring
//! smoothing, the mode registry, scroll/morph tracking, the audio session
//! lifecycle, the ping-pong state machine and GPU uniform packing.

pub mod ambient;
pub mod audio;
pub mod bands;
pub mod constants;
pub mod error;
pub mod keys;
pub mod mode;
pub mod particles;
pub mod pingpong;
pub mod scroll;
pub mod simulation;
pub mod spring;
pub mod state;
pub mod uniforms;

pub use ambient::*;
pub use audio::*;
pub use bands::*;
pub use constants::*;
pub use error::*;
pub use keys::*;
pub use mode::*;
pub use particles::*;
pub use pingpong::*;
pub use scroll::*;
pub use simulation::*;
pub use spring::*;
pub use state::*;
pub use uniforms::*;

// Shaders bundled as string constants
pub static COMMON_WGSL: &str = include_str!("../shaders/common.wgsl");
pub static SIMULATE_WGSL: &str = include_str!("../shaders/simulate.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

/// Full module source for a stage: the shared uniform block and pattern
/// functions followed by the stage body.
pub fn shader_source(stage: &str) -> String {
    let mut src = String::with_capacity(COMMON_WGSL.len() + stage.len() + 1);
    src.push_str(COMMON_WGSL);
    src.push('\n');
    src.push_str(stage);
    src
}
