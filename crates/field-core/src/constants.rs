// Shared audio/visual tuning constants used by the core and the web frontend.

// Audio analysis
pub const DEFAULT_FFT_SIZE: u32 = 256; // 128 frequency bins
pub const DEFAULT_ANALYSER_SMOOTHING: f64 = 0.8;
pub const DEFAULT_BAND_COUNT: usize = 3;
pub const MAX_BIN_VALUE: f32 = 255.0;

// Spring tunables per channel (tension, friction), all within (0, 1]
pub const AUDIO_TENSION: f32 = 0.25; // bands need perceptible reactivity
pub const AUDIO_FRICTION: f32 = 0.7;
pub const VOLUME_TENSION: f32 = 0.2;
pub const VOLUME_FRICTION: f32 = 0.75;
pub const MORPH_TENSION: f32 = 0.06; // scroll morph lags behind the page
pub const MORPH_FRICTION: f32 = 0.8;

// Ambient "breathing" driver
pub const AMBIENT_VOLUME_FLOOR: f32 = 0.12;
pub const AMBIENT_BASS_RATE: f32 = 0.45; // rad/s
pub const AMBIENT_MID_RATE: f32 = 0.71;
pub const AMBIENT_HIGH_RATE: f32 = 1.13;
pub const AMBIENT_DEPTH: f32 = 0.18;
pub const AMBIENT_CENTER: f32 = 0.22;

// Scroll to morph remap
pub const MORPH_EDGE_START: f32 = 0.15;
pub const MORPH_EDGE_END: f32 = 0.85;

// Particle field
pub const DEFAULT_PARTICLE_GRID: u32 = 128; // 128 x 128 = 16384 particles
pub const MIN_PARTICLE_GRID: u32 = 32;
pub const MAX_PARTICLE_GRID: u32 = 256;
pub const PARTICLE_SEED: u64 = 0x5EED_F1E1D;
pub const BASE_POINT_SIZE: f32 = 0.012; // clip-space half extent at w = 1

// Camera
pub const CAMERA_DISTANCE: f32 = 3.2;
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ORBIT_RATE: f32 = 0.05; // rad/s
pub const CAMERA_MORPH_LIFT: f32 = 0.6; // eye height gained at full morph

// Frame timing guard: a backgrounded tab resumes with a huge delta
pub const MAX_FRAME_DELTA_SEC: f32 = 0.1;

// Color fades between modes: overdamped so a switch never overshoots
pub const COLOR_TENSION: f32 = 0.04;
pub const COLOR_FRICTION: f32 = 0.6;
