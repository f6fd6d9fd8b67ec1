//! Orientation derived from integrated pitch/yaw

use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

/// Euler angles applied yaw (y), then pitch (x), then roll (z)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    /// Pitch (radians)
    pub x: f32,
    /// Yaw (radians)
    pub y: f32,
    /// Roll (radians)
    pub z: f32,
}

impl Euler {
    pub const ORDER: EulerRot = EulerRot::YXZ;

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(Self::ORDER, self.y, self.x, self.z)
    }
}

/// Head/look orientation as both euler angles and quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub quaternion: Quat,
    pub euler: Euler,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            quaternion: Quat::IDENTITY,
            euler: Euler::default(),
        }
    }
}

impl Orientation {
    /// Orientation for a pitch `phi` and yaw `theta`, no roll
    pub fn from_pitch_yaw(phi: f32, theta: f32) -> Self {
        let euler = Euler::new(phi, theta, 0.0);
        Self {
            quaternion: euler.to_quat(),
            euler,
        }
    }

    /// Yaw-only rotation, used to steer the body (pitch never tilts movement)
    pub fn heading(&self) -> Quat {
        Quat::from_rotation_y(self.euler.y)
    }
}
