//! VR locomotion - head orientation, controller translation and
//! point-and-teleport movement with obstacle collision
//!
//! Core modules:
//! - `locomotion`: Orientation integration, translation flags, teleport trigger
//! - `sim`: Scene nodes, raycasting, collision queries and the per-frame step
//! - `renderer`: Geometry generation and GPU vertex format for guide meshes
//! - `settings`: Serde-backed tuning

pub mod locomotion;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use locomotion::{
    ArcTeleporter, Locomotion, LocomotionEvent, Orientation, SelectionEvent, Teleportation,
};
pub use settings::{Settings, TeleportSettings};

/// Locomotion configuration constants
pub mod consts {
    /// Fixed frame timestep (90 Hz, typical headset refresh)
    pub const SIM_DT: f32 = 1.0 / 90.0;

    /// Translation velocity in m/s
    pub const DEFAULT_VELOCITY: f32 = 2.0;
    /// Multiplier applied to pointer deltas before integration
    pub const DEFAULT_ANGULAR_VELOCITY: f32 = 1.0;

    /// Fallback viewport used to scale pointer deltas
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1920.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 1080.0;

    /// Seconds a thumbpad must stay touched before walking forward starts
    pub const HOLD_TO_WALK_DELAY: f64 = 0.5;
    /// Idle gap (seconds) after the last aim movement before a teleport fires
    pub const TELEPORT_DEBOUNCE: f64 = 1.0;

    /// Teleport arc defaults
    pub const TELEPORT_LAUNCH_SPEED: f32 = 8.0;
    pub const TELEPORT_GRAVITY: f32 = 9.8;
    pub const TELEPORT_MAX_DISTANCE: f32 = 20.0;
    pub const TELEPORT_SEGMENTS: usize = 32;
    /// Steepest surface (degrees from horizontal) accepted as a landing spot
    pub const TELEPORT_MAX_SLOPE_DEGREES: f32 = 30.0;

    /// Guide mesh dimensions
    pub const RAY_CURVE_WIDTH: f32 = 0.02;
    pub const HIT_MARKER_RADIUS: f32 = 0.25;
    pub const HIT_MARKER_HEIGHT: f32 = 0.02;

    /// Player collider defaults
    pub const PLAYER_HEIGHT: f32 = 1.7;
    /// Obstacles lower than this (meters above the feet) can be stepped over
    pub const STEP_HEIGHT: f32 = 0.3;
}

/// Clamp a pitch angle to straight up / straight down
#[inline]
pub fn clamp_pitch(phi: f32) -> f32 {
    use std::f32::consts::FRAC_PI_2;
    phi.clamp(-FRAC_PI_2, FRAC_PI_2)
}
