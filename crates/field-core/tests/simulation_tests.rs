// End-to-end behavior of the per-frame simulation state.

use field_core::*;

const DT: f64 = 1.0 / 60.0;
const LOUD: FrequencyBands = FrequencyBands {
    bass: 1.0,
    mid: 1.0,
    high: 1.0,
};

fn run(sim: &mut SimulationState, frame: &mut u32, frames: u32, raw: FrequencyBands) -> UniformBundle {
    let mut last = None;
    for _ in 0..frames {
        last = Some(sim.tick(*frame as f64 * DT, raw));
        *frame += 1;
    }
    last.expect("at least one frame")
}

#[test]
fn mode_switch_fades_color_monotonically() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    sim.set_audio_live(true);
    assert_eq!(sim.mode().id, "genesis");
    let mut frame = 0;

    let settled = run(&mut sim, &mut frame, 120, LOUD);
    assert_eq!(settled.color1, GENESIS.color1, "color should rest on genesis");
    assert!(settled.bass > 0.99 && settled.mid > 0.99 && settled.high > 0.99);

    sim.set_mode("ascension").expect("builtin mode");
    let target = ASCENSION.color1;
    let start = settled.color1;
    let mut prev_dist = start.distance(target);
    for _ in 0..120 {
        let b = sim.tick(frame as f64 * DT, LOUD);
        frame += 1;
        let dist = b.color1.distance(target);
        assert!(dist <= prev_dist + 1e-6, "distance grew {prev_dist} -> {dist}");
        for axis in 0..3 {
            let initial_err = start[axis] - target[axis];
            let err = b.color1[axis] - target[axis];
            assert!(
                err * initial_err.signum() >= -1e-4,
                "channel {axis} overshot: err {err}"
            );
        }
        prev_dist = dist;
    }
    assert!(prev_dist < 0.01, "color1 still {prev_dist} from ascension");
}

#[test]
fn mode_switch_glides_shape_parameters() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    let mut frame = 0;
    let before = run(&mut sim, &mut frame, 10, FrequencyBands::SILENT);
    sim.set_mode("revelation").expect("builtin mode");
    let first = run(&mut sim, &mut frame, 1, FrequencyBands::SILENT);
    // one frame in, n has moved but nowhere near the new target
    assert!(first.shape[0] > before.shape[0]);
    assert!(first.shape[0] < REVELATION.shape[0]);
    let later = run(&mut sim, &mut frame, 600, FrequencyBands::SILENT);
    for i in 0..4 {
        assert!((later.shape[i] - REVELATION.shape[i]).abs() < 1e-3);
    }
    assert_eq!(later.pattern, Pattern::Noise);
}

#[test]
fn first_tick_after_switch_is_not_a_cut() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    let mut frame = 0;
    let before = run(&mut sim, &mut frame, 30, FrequencyBands::SILENT);
    sim.set_mode("ascension").expect("builtin mode");
    let after = run(&mut sim, &mut frame, 1, FrequencyBands::SILENT);
    let jump = after.color1.distance(before.color1);
    let full = GENESIS.color1.distance(ASCENSION.color1);
    assert!(jump < full * 0.05, "jumped {jump} of {full}");
}

#[test]
fn unknown_mode_is_rejected_and_selection_kept() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    let err = sim.set_mode("finale").unwrap_err();
    assert_eq!(err, ModeError::UnknownId("finale".into()));
    assert_eq!(sim.mode().id, "genesis");
}

#[test]
fn with_mode_starts_at_rest_on_that_mode() {
    let mut sim = SimulationState::with_mode(ModeRegistry::builtin(), "ascension").unwrap();
    let b = sim.tick(0.0, FrequencyBands::SILENT);
    assert_eq!(b.color1, ASCENSION.color1);
    assert_eq!(b.background, ASCENSION.background);
    assert_eq!(b.shape, ASCENSION.shape);
    assert!(SimulationState::with_mode(ModeRegistry::builtin(), "nope").is_err());
}

#[test]
fn ambient_keeps_idle_field_moving() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    let mut frame = 0;
    for _ in 0..600 {
        let b = run(&mut sim, &mut frame, 1, FrequencyBands::SILENT);
        assert!(b.volume > 0.05, "idle volume collapsed to {}", b.volume);
        assert!(b.bass.is_finite() && b.mid.is_finite() && b.high.is_finite());
    }
    let b = run(&mut sim, &mut frame, 1, FrequencyBands::SILENT);
    assert!(b.bass + b.mid + b.high > 0.0);
}

#[test]
fn ambient_never_masks_louder_input() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    let mut frame = 0;
    let b = run(&mut sim, &mut frame, 200, LOUD);
    assert!(b.bass > 0.99);
    assert!(b.volume > 0.99);
}

#[test]
fn live_mic_silence_is_respected() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    sim.set_audio_live(true);
    let mut frame = 0;
    let b = run(&mut sim, &mut frame, 300, FrequencyBands::SILENT);
    assert!(b.bass < 1e-3 && b.mid < 1e-3 && b.high < 1e-3);
    assert!(b.volume < 1e-3);
}

#[test]
fn scroll_progress_is_clamped() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    assert_eq!(sim.set_scroll(-50.0, 800.0), 0.0);
    assert_eq!(sim.set_scroll(400.0, 800.0), 0.5);
    assert_eq!(sim.set_scroll(5000.0, 800.0), 1.0);
    assert_eq!(sim.set_scroll(100.0, 0.0), 0.0);
    assert_eq!(sim.set_scroll(f64::NAN, 800.0), 0.0);
}

#[test]
fn morph_lags_behind_scroll() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    let mut frame = 0;
    sim.set_scroll(2000.0, 1000.0);
    let first = run(&mut sim, &mut frame, 1, FrequencyBands::SILENT);
    assert!(first.morph > 0.0 && first.morph < 0.1, "morph {}", first.morph);
    let settled = run(&mut sim, &mut frame, 300, FrequencyBands::SILENT);
    assert!(settled.morph > 0.99);

    sim.set_scroll(0.0, 1000.0);
    let back = run(&mut sim, &mut frame, 300, FrequencyBands::SILENT);
    assert!(back.morph < 0.01);
}

#[test]
fn timing_starts_at_zero_and_clamps_large_gaps() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    let first = sim.tick(100.0, FrequencyBands::SILENT);
    assert_eq!(first.time, 0.0);
    assert_eq!(first.delta_time, 0.0);
    let second = sim.tick(100.0 + DT, FrequencyBands::SILENT);
    assert!((second.delta_time - DT as f32).abs() < 1e-4);
    assert!((second.time - DT as f32).abs() < 1e-4);
    let resumed = sim.tick(160.0, FrequencyBands::SILENT);
    assert_eq!(resumed.delta_time, MAX_FRAME_DELTA_SEC);
}

#[test]
fn bundle_values_stay_in_unit_range() {
    let mut sim = SimulationState::new(ModeRegistry::builtin());
    let mut frame = 0;
    // alternate extremes to provoke spring overshoot
    for i in 0..400 {
        let raw = if (i / 7) % 2 == 0 { LOUD } else { FrequencyBands::SILENT };
        sim.set_audio_live(i % 50 < 25);
        let b = run(&mut sim, &mut frame, 1, raw);
        for v in [b.bass, b.mid, b.high, b.volume, b.morph] {
            assert!((0.0..=1.0).contains(&v), "out of range: {v}");
        }
    }
}
