//! Named visual parameter bundles and the registry they are selected from.

use crate::error::ModeError;
use crate::spring::SpringTunables;
use glam::Vec3;

/// Procedural pattern the particle fragment stage shades with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Standing-wave plate figure driven by `shape.x`/`shape.y`.
    Chladni,
    /// Layered trigonometric noise scaled by `shape.x`.
    Noise,
}

impl Pattern {
    pub fn as_u32(self) -> u32 {
        match self {
            Pattern::Chladni => 0,
            Pattern::Noise => 1,
        }
    }
}

/// Immutable configuration for one visual mode.
///
/// `shape` is `[n, m, displacement, radius]`: the two pattern frequencies,
/// how far audio may push particles off their rest surface, and the rest
/// radius of the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Mode {
    pub id: &'static str,
    pub label: &'static str,
    pub frequency_label: &'static str,
    pub color1: Vec3,
    pub color2: Vec3,
    pub background: Vec3,
    pub tunables: SpringTunables,
    pub shape: [f32; 4],
    pub pattern: Pattern,
}

impl Mode {
    pub fn validate(&self) -> Result<(), ModeError> {
        if !SpringTunables::in_stable_range(self.tunables.tension) {
            return Err(ModeError::InvalidTension {
                id: self.id.to_string(),
                value: self.tunables.tension,
            });
        }
        if !SpringTunables::in_stable_range(self.tunables.friction) {
            return Err(ModeError::InvalidFriction {
                id: self.id.to_string(),
                value: self.tunables.friction,
            });
        }
        Ok(())
    }
}

pub const GENESIS: Mode = Mode {
    id: "genesis",
    label: "Genesis",
    frequency_label: "396 Hz",
    color1: Vec3::new(0.96, 0.72, 0.32),
    color2: Vec3::new(0.85, 0.35, 0.18),
    background: Vec3::new(0.04, 0.03, 0.02),
    tunables: SpringTunables::new(0.15, 0.85),
    shape: [3.0, 5.0, 0.35, 1.0],
    pattern: Pattern::Chladni,
};

pub const REVELATION: Mode = Mode {
    id: "revelation",
    label: "Revelation",
    frequency_label: "528 Hz",
    color1: Vec3::new(0.62, 0.45, 0.98),
    color2: Vec3::new(0.25, 0.75, 0.95),
    background: Vec3::new(0.03, 0.02, 0.06),
    tunables: SpringTunables::new(0.12, 0.88),
    shape: [4.0, 7.0, 0.5, 1.15],
    pattern: Pattern::Noise,
};

pub const ASCENSION: Mode = Mode {
    id: "ascension",
    label: "Ascension",
    frequency_label: "963 Hz",
    color1: Vec3::new(0.55, 0.95, 0.9),
    color2: Vec3::new(0.95, 0.97, 1.0),
    background: Vec3::new(0.02, 0.05, 0.06),
    tunables: SpringTunables::new(0.1, 0.9),
    shape: [6.0, 9.0, 0.25, 1.3],
    pattern: Pattern::Chladni,
};

pub const BUILTIN_MODES: [Mode; 3] = [GENESIS, REVELATION, ASCENSION];

/// Ordered, validated set of modes a page can switch between.
#[derive(Clone, Debug)]
pub struct ModeRegistry {
    modes: Vec<Mode>,
}

impl ModeRegistry {
    /// Validate and wrap `modes`. The first mode is the default.
    pub fn new(modes: Vec<Mode>) -> Result<Self, ModeError> {
        if modes.is_empty() {
            return Err(ModeError::Empty);
        }
        for (i, mode) in modes.iter().enumerate() {
            mode.validate()?;
            if modes[..i].iter().any(|m| m.id == mode.id) {
                return Err(ModeError::DuplicateId(mode.id.to_string()));
            }
        }
        Ok(Self { modes })
    }

    /// genesis, revelation, ascension.
    pub fn builtin() -> Self {
        Self {
            modes: BUILTIN_MODES.to_vec(),
        }
    }

    pub fn default_mode(&self) -> &Mode {
        &self.modes[0]
    }

    pub fn get(&self, id: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.id == id)
    }

    pub fn lookup(&self, id: &str) -> Result<&Mode, ModeError> {
        self.get(id)
            .ok_or_else(|| ModeError::UnknownId(id.to_string()))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.modes.iter().position(|m| m.id == id)
    }

    pub fn by_index(&self, index: usize) -> Option<&Mode> {
        self.modes.get(index)
    }

    /// Mode `step` places after (or before, if negative) `id`, wrapping.
    pub fn cycle(&self, id: &str, step: i32) -> &Mode {
        let len = self.modes.len() as i32;
        let current = self.index_of(id).unwrap_or(0) as i32;
        let next = (current + step).rem_euclid(len);
        &self.modes[next as usize]
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mode> {
        self.modes.iter()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
