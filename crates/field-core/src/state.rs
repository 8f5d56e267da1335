//! Camera description shared with the web frontend.
//!
//! Avoids platform-specific APIs; the frontend only feeds it the canvas
//! aspect ratio and uploads the resulting matrix with the frame uniforms.

use crate::constants::{CAMERA_DISTANCE, CAMERA_FOVY, CAMERA_MORPH_LIFT, CAMERA_ORBIT_RATE};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Slow orbit around the origin; the eye rises as the field morphs so
    /// the flattened "field" state is seen from above.
    pub fn orbiting(time_sec: f32, morph: f32, aspect: f32) -> Self {
        let angle = time_sec * CAMERA_ORBIT_RATE;
        let lift = morph.clamp(0.0, 1.0) * CAMERA_MORPH_LIFT;
        let eye = Vec3::new(
            angle.sin() * CAMERA_DISTANCE,
            lift * CAMERA_DISTANCE,
            angle.cos() * CAMERA_DISTANCE,
        );
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: CAMERA_FOVY,
            znear: 0.05,
            zfar: 50.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
