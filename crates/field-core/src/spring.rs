//! Damped spring used to smooth every shader driver.
//!
//! Each frame the spring chases its target:
//!
//! ```text
//! force    = (target - value) * tension
//! velocity = (velocity + force) * friction
//! value    = value + velocity
//! ```
//!
//! For `tension, friction` in (0, 1] the recurrence never diverges; friction
//! below 1 makes it converge. Tunables are checked where modes are authored
//! (see [`crate::mode::ModeRegistry::new`]), not here.

use glam::Vec3;

/// Responsiveness (`tension`) and energy retention (`friction`) of a spring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringTunables {
    pub tension: f32,
    pub friction: f32,
}

impl SpringTunables {
    pub const fn new(tension: f32, friction: f32) -> Self {
        Self { tension, friction }
    }

    #[inline]
    pub fn in_stable_range(value: f32) -> bool {
        value > 0.0 && value <= 1.0
    }

    pub fn is_stable(&self) -> bool {
        Self::in_stable_range(self.tension) && Self::in_stable_range(self.friction)
    }

    /// True when the recurrence has real eigenvalues, i.e. a spring starting
    /// at rest approaches its target without crossing it.
    pub fn is_overdamped(&self) -> bool {
        let k = self.tension;
        let f = self.friction;
        let trace = 1.0 + f - f * k;
        trace * trace >= 4.0 * f
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    tunables: SpringTunables,
}

impl Spring {
    /// A spring at rest on `value`.
    pub fn new(value: f32, tunables: SpringTunables) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            tunables,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn tunables(&self) -> SpringTunables {
        self.tunables
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Retune without touching value or velocity.
    pub fn set_tunables(&mut self, tunables: SpringTunables) {
        self.tunables = tunables;
    }

    /// Largest distance the next [`step`](Self::step) can move the value.
    pub fn step_bound(&self) -> f32 {
        let force = (self.target - self.value).abs() * self.tunables.tension;
        (self.velocity.abs() + force) * self.tunables.friction
    }

    /// Advance one frame and return the new value.
    pub fn step(&mut self) -> f32 {
        let force = (self.target - self.value) * self.tunables.tension;
        self.velocity = (self.velocity + force) * self.tunables.friction;
        self.value += self.velocity;
        self.value
    }
}

/// Three independent springs, one per RGB channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSpring {
    channels: [Spring; 3],
}

impl ColorSpring {
    pub fn new(rgb: Vec3, tunables: SpringTunables) -> Self {
        Self {
            channels: [
                Spring::new(rgb.x, tunables),
                Spring::new(rgb.y, tunables),
                Spring::new(rgb.z, tunables),
            ],
        }
    }

    pub fn set_target(&mut self, rgb: Vec3) {
        self.channels[0].set_target(rgb.x);
        self.channels[1].set_target(rgb.y);
        self.channels[2].set_target(rgb.z);
    }

    pub fn target(&self) -> Vec3 {
        Vec3::new(
            self.channels[0].target(),
            self.channels[1].target(),
            self.channels[2].target(),
        )
    }

    pub fn value(&self) -> Vec3 {
        Vec3::new(
            self.channels[0].value(),
            self.channels[1].value(),
            self.channels[2].value(),
        )
    }

    pub fn step(&mut self) -> Vec3 {
        Vec3::new(
            self.channels[0].step(),
            self.channels[1].step(),
            self.channels[2].step(),
        )
    }
}
