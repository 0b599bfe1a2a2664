//! Damped orbit controls around a fixed target.
//!
//! The camera sits on a sphere around `target`. Input accumulates into a
//! pending spherical delta; every [`OrbitControls::update`] applies a
//! `damping_factor` share of it and keeps the rest, so rotation eases out
//! over the following frames. Zoom is not damped: the queued scale lands in
//! full on the next update, with the radius kept within
//! `[min_distance, max_distance]`.

use std::f32::consts::{PI, TAU};

use glam::{Mat3, Quat, Vec2, Vec3};

/// Keeps the polar angle away from the poles where look-at degenerates.
const POLAR_EPSILON: f32 = 1e-6;

/// Base zoom ratio per wheel step at `zoom_speed = 1`.
const ZOOM_STEP: f32 = 0.95;

/// Tunables for [`OrbitControls`].
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitSettings {
    /// Closest allowed distance to the target.
    pub min_distance: f32,
    /// Farthest allowed distance to the target.
    pub max_distance: f32,
    /// Ease out rotation over several frames. Zoom always applies at once.
    pub enable_damping: bool,
    /// Share of the pending motion applied per update, in `(0, 1]`.
    pub damping_factor: f32,
    /// Orbit speed multiplier.
    pub rotate_speed: f32,
    /// Zoom speed multiplier.
    pub zoom_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

/// Input gathered over one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitInput {
    /// Pointer drag in physical pixels while the rotate button is held.
    pub rotate_delta: Vec2,
    /// Wheel steps; positive zooms in.
    pub zoom_steps: f32,
}

/// Where the camera is and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Look-at point.
    pub target: Vec3,
}

impl CameraPose {
    /// Rotation that points the camera's -Z axis at the target with +Y up.
    pub fn rotation(&self) -> Quat {
        let back = (self.position - self.target).normalize_or_zero();
        if back == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        let right = Vec3::Y.cross(back).normalize_or(Vec3::X);
        let up = back.cross(right);
        Quat::from_mat3(&Mat3::from_cols(right, up, back))
    }
}

/// Orbit camera controller: drag to orbit, wheel to zoom.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    /// Tunables.
    pub settings: OrbitSettings,
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    scale: f32,
}

impl OrbitControls {
    /// Controls orbiting `target` from `position`.
    pub fn new(position: Vec3, target: Vec3, settings: OrbitSettings) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            settings,
            target,
            radius,
            theta,
            phi,
            pending_theta: 0.0,
            pending_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Queue input from one frame. `viewport_height` is in physical pixels;
    /// a drag across the full height orbits one full turn at `rotate_speed = 1`.
    pub fn handle_input(&mut self, input: &OrbitInput, viewport_height: f32) {
        if input.rotate_delta != Vec2::ZERO && viewport_height > 0.0 {
            let per_pixel = TAU / viewport_height * self.settings.rotate_speed;
            self.rotate_left(input.rotate_delta.x * per_pixel);
            self.rotate_up(input.rotate_delta.y * per_pixel);
        }
        if input.zoom_steps != 0.0 {
            self.dolly(input.zoom_steps);
        }
    }

    /// Queue an azimuth change. Positive swings the camera to its left.
    pub fn rotate_left(&mut self, angle: f32) {
        self.pending_theta -= angle;
    }

    /// Queue a polar change. Positive swings the camera upward.
    pub fn rotate_up(&mut self, angle: f32) {
        self.pending_phi -= angle;
    }

    /// Queue a zoom of `steps` wheel notches. Positive moves closer.
    pub fn dolly(&mut self, steps: f32) {
        self.scale *= ZOOM_STEP.powf(self.settings.zoom_speed * steps);
    }

    /// Apply pending motion and return the new camera pose. Call once per
    /// frame before rendering.
    pub fn update(&mut self) -> CameraPose {
        let s = &self.settings;
        let share = if s.enable_damping {
            s.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        self.theta += self.pending_theta * share;
        self.phi += self.pending_phi * share;
        self.phi = self.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        // Bounds are not trusted to be ordered; `clamp` panics when they are not.
        self.radius = (self.radius * self.scale)
            .max(s.min_distance)
            .min(s.max_distance);

        if s.enable_damping {
            self.pending_theta *= 1.0 - share;
            self.pending_phi *= 1.0 - share;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }
        self.scale = 1.0;

        self.pose()
    }

    /// Current pose without applying pending motion.
    pub fn pose(&self) -> CameraPose {
        let sin_phi_radius = self.phi.sin() * self.radius;
        let offset = Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        );
        CameraPose {
            position: self.target + offset,
            target: self.target,
        }
    }

    /// Distance from camera to target.
    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// The look-at point.
    pub fn target(&self) -> Vec3 {
        self.target
    }
}
