// Host-side tests for tuning constants and their relationships.

use field_core::*;

#[test]
fn smoothing_tunables_are_stable() {
    for (k, f) in [
        (AUDIO_TENSION, AUDIO_FRICTION),
        (VOLUME_TENSION, VOLUME_FRICTION),
        (MORPH_TENSION, MORPH_FRICTION),
        (COLOR_TENSION, COLOR_FRICTION),
    ] {
        let t = SpringTunables::new(k, f);
        assert!(t.is_stable(), "{k}/{f}");
        assert!(f < 1.0, "friction {f} would never settle");
    }
}

#[test]
fn color_transitions_never_overshoot() {
    assert!(SpringTunables::new(COLOR_TENSION, COLOR_FRICTION).is_overdamped());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_defaults() {
    assert!(DEFAULT_FFT_SIZE.is_power_of_two());
    assert!((32..=32768).contains(&DEFAULT_FFT_SIZE));
    assert!((0.0..1.0).contains(&DEFAULT_ANALYSER_SMOOTHING));
    let config = AnalyserConfig::default();
    assert_eq!(config.bin_count(), 128);
    assert!(config.bin_count() >= DEFAULT_BAND_COUNT);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn particle_grid_bounds() {
    assert!(MIN_PARTICLE_GRID <= DEFAULT_PARTICLE_GRID);
    assert!(DEFAULT_PARTICLE_GRID <= MAX_PARTICLE_GRID);
    assert_eq!(clamp_grid_size(DEFAULT_PARTICLE_GRID), DEFAULT_PARTICLE_GRID);
    assert_eq!(clamp_grid_size(1), MIN_PARTICLE_GRID);
    assert_eq!(clamp_grid_size(4096), MAX_PARTICLE_GRID);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn morph_edges_and_ambient_floor() {
    assert!(0.0 <= MORPH_EDGE_START && MORPH_EDGE_START < MORPH_EDGE_END && MORPH_EDGE_END <= 1.0);
    assert!(AMBIENT_VOLUME_FLOOR > 0.0);
    assert!(AMBIENT_CENTER - AMBIENT_DEPTH >= 0.0);
    assert!(MAX_FRAME_DELTA_SEC > 1.0 / 30.0);
}

#[test]
fn smoothstep_matches_hermite() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    assert!((smoothstep(0.0, 1.0, 0.25) - 0.15625).abs() < 1e-6);
    // degenerate edges act as a step
    assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
    assert_eq!(smoothstep(0.5, 0.5, 0.6), 1.0);
}
