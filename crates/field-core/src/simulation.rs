//! Per-frame orchestration: audio and scroll inputs in, smoothed uniforms out.

use crate::ambient::AmbientGenerator;
use crate::bands::FrequencyBands;
use crate::constants::*;
use crate::error::ModeError;
use crate::mode::{Mode, ModeRegistry};
use crate::scroll::ScrollTracker;
use crate::spring::{ColorSpring, Spring, SpringTunables};
use crate::uniforms::UniformBundle;

const AUDIO: SpringTunables = SpringTunables::new(AUDIO_TENSION, AUDIO_FRICTION);
const VOLUME: SpringTunables = SpringTunables::new(VOLUME_TENSION, VOLUME_FRICTION);
const MORPH: SpringTunables = SpringTunables::new(MORPH_TENSION, MORPH_FRICTION);
const COLOR: SpringTunables = SpringTunables::new(COLOR_TENSION, COLOR_FRICTION);

/// Holds every smoothed channel and the active mode selection.
///
/// Switching modes only moves spring targets; nothing is reset, so the
/// field always glides from one look to the next.
pub struct SimulationState {
    registry: ModeRegistry,
    mode_index: usize,
    ambient: AmbientGenerator,
    scroll: ScrollTracker,
    audio_live: bool,

    bass: Spring,
    mid: Spring,
    high: Spring,
    volume: Spring,
    morph: Spring,
    shape: [Spring; 4],
    color1: ColorSpring,
    color2: ColorSpring,
    background: ColorSpring,

    start_sec: Option<f64>,
    last_sec: Option<f64>,
}

impl SimulationState {
    /// Start at rest on the registry's default mode.
    pub fn new(registry: ModeRegistry) -> Self {
        Self::at_rest(registry, 0)
    }

    /// Start at rest on `id` instead of the default mode.
    pub fn with_mode(registry: ModeRegistry, id: &str) -> Result<Self, ModeError> {
        let index = registry
            .index_of(id)
            .ok_or_else(|| ModeError::UnknownId(id.to_string()))?;
        Ok(Self::at_rest(registry, index))
    }

    fn at_rest(registry: ModeRegistry, mode_index: usize) -> Self {
        let mode = registry
            .by_index(mode_index)
            .unwrap_or_else(|| registry.default_mode())
            .clone();
        let shape_spring = |v: f32| Spring::new(v, mode.tunables);
        Self {
            mode_index,
            ambient: AmbientGenerator::default(),
            scroll: ScrollTracker::default(),
            audio_live: false,
            bass: Spring::new(0.0, AUDIO),
            mid: Spring::new(0.0, AUDIO),
            high: Spring::new(0.0, AUDIO),
            volume: Spring::new(AMBIENT_VOLUME_FLOOR, VOLUME),
            morph: Spring::new(0.0, MORPH),
            shape: [
                shape_spring(mode.shape[0]),
                shape_spring(mode.shape[1]),
                shape_spring(mode.shape[2]),
                shape_spring(mode.shape[3]),
            ],
            color1: ColorSpring::new(mode.color1, COLOR),
            color2: ColorSpring::new(mode.color2, COLOR),
            background: ColorSpring::new(mode.background, COLOR),
            start_sec: None,
            last_sec: None,
            registry,
        }
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub fn mode(&self) -> &Mode {
        // mode_index only ever comes from the registry itself
        self.registry
            .by_index(self.mode_index)
            .unwrap_or_else(|| self.registry.default_mode())
    }

    /// Chase the look of mode `id`.
    pub fn set_mode(&mut self, id: &str) -> Result<(), ModeError> {
        let index = self
            .registry
            .index_of(id)
            .ok_or_else(|| ModeError::UnknownId(id.to_string()))?;
        if index == self.mode_index {
            return Ok(());
        }
        self.mode_index = index;
        let mode = self.mode().clone();
        for (spring, target) in self.shape.iter_mut().zip(mode.shape) {
            spring.set_tunables(mode.tunables);
            spring.set_target(target);
        }
        self.color1.set_target(mode.color1);
        self.color2.set_target(mode.color2);
        self.background.set_target(mode.background);
        log::info!("[mode] {} ({})", mode.id, mode.frequency_label);
        Ok(())
    }

    pub fn set_scroll(&mut self, scroll_y: f64, viewport_height: f64) -> f32 {
        self.scroll.sample(scroll_y, viewport_height)
    }

    pub fn scroll_progress(&self) -> f32 {
        self.scroll.progress()
    }

    /// Whether the microphone is the driver this frame.
    pub fn set_audio_live(&mut self, live: bool) {
        self.audio_live = live;
    }

    pub fn audio_live(&self) -> bool {
        self.audio_live
    }

    /// Advance every spring one frame and package the results.
    ///
    /// All-zero `raw` bands (audio not ready) still produce a full bundle
    /// from the ambient driver.
    pub fn tick(&mut self, now_sec: f64, raw: FrequencyBands) -> UniformBundle {
        let start = *self.start_sec.get_or_insert(now_sec);
        let delta = match self.last_sec {
            Some(last) => ((now_sec - last) as f32).clamp(0.0, MAX_FRAME_DELTA_SEC),
            None => 0.0,
        };
        self.last_sec = Some(now_sec);

        let raw = raw.clamped();
        let (driver, volume_target) = if self.audio_live {
            (raw, raw.mean())
        } else {
            let driver = self.ambient.bands(now_sec).max(raw);
            let volume = self.ambient.volume(now_sec).max(driver.mean());
            (driver, volume)
        };

        self.bass.set_target(driver.bass);
        self.mid.set_target(driver.mid);
        self.high.set_target(driver.high);
        self.volume.set_target(volume_target);
        self.morph.set_target(self.scroll.morph_target());

        let bass = self.bass.step();
        let mid = self.mid.step();
        let high = self.high.step();
        let volume = self.volume.step();
        let morph = self.morph.step();
        let shape = [
            self.shape[0].step(),
            self.shape[1].step(),
            self.shape[2].step(),
            self.shape[3].step(),
        ];

        UniformBundle {
            time: (now_sec - start) as f32,
            delta_time: delta,
            bass: bass.clamp(0.0, 1.0),
            mid: mid.clamp(0.0, 1.0),
            high: high.clamp(0.0, 1.0),
            volume: volume.clamp(0.0, 1.0),
            morph: morph.clamp(0.0, 1.0),
            shape,
            color1: self.color1.step(),
            color2: self.color2.step(),
            background: self.background.step(),
            pattern: self.mode().pattern,
        }
    }
}
