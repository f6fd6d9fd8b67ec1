//! Locomotion settings and tuning
//!
//! Persisted as JSON next to the host application's other preferences.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Teleport arc tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportSettings {
    /// Initial speed of the aim arc (m/s)
    pub launch_speed: f32,
    /// Downward acceleration bending the arc (m/s²)
    pub gravity: f32,
    /// Straight-line reach of the arc (m)
    pub max_distance: f32,
    /// Arc samples
    pub segments: usize,
    /// Seconds the aim must rest on a target before teleporting
    pub debounce_secs: f64,
    /// Steepest landing surface, degrees from horizontal
    pub max_slope_degrees: f32,
    /// Ray curve ribbon width (m)
    pub curve_width: f32,
    /// Hit marker radius (m)
    pub marker_radius: f32,
}

impl Default for TeleportSettings {
    fn default() -> Self {
        Self {
            launch_speed: TELEPORT_LAUNCH_SPEED,
            gravity: TELEPORT_GRAVITY,
            max_distance: TELEPORT_MAX_DISTANCE,
            segments: TELEPORT_SEGMENTS,
            debounce_secs: TELEPORT_DEBOUNCE,
            max_slope_degrees: TELEPORT_MAX_SLOPE_DEGREES,
            curve_width: RAY_CURVE_WIDTH,
            marker_radius: HIT_MARKER_RADIUS,
        }
    }
}

impl TeleportSettings {
    /// Minimum `normal.y` of an acceptable landing surface
    pub fn min_landing_normal_y(&self) -> f32 {
        self.max_slope_degrees.clamp(0.0, 90.0).to_radians().cos()
    }
}

/// Locomotion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Movement ===
    /// Translation velocity (m/s)
    pub velocity: f32,
    /// Look sensitivity multiplier
    pub angular_velocity: f32,
    /// Seconds the thumbpad is held before walking backward
    pub hold_to_walk_delay: f64,

    // === Pointer scaling ===
    /// Width of the pointer space (screen units)
    pub viewport_width: f32,
    /// Height of the pointer space (screen units)
    pub viewport_height: f32,

    // === Collision ===
    /// Obstacles lower than this above the feet can be walked over
    pub collision_height_threshold: Option<f32>,
    /// Height of the player collider (m)
    pub player_height: f32,

    // === Teleport ===
    pub teleport: TeleportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY,
            angular_velocity: DEFAULT_ANGULAR_VELOCITY,
            hold_to_walk_delay: HOLD_TO_WALK_DELAY,

            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,

            collision_height_threshold: Some(STEP_HEIGHT),
            player_height: PLAYER_HEIGHT,

            teleport: TeleportSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::info!("No settings at {} ({}), using defaults", path.display(), e),
        }
        Self::default()
    }

    /// Save settings as JSON; failures are logged, not fatal
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let json = match self.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize settings: {}", e);
                return;
            }
        };
        match std::fs::write(path, json) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.velocity, 2.0);
        assert_eq!(s.angular_velocity, 1.0);
        assert_eq!(s.hold_to_walk_delay, 0.5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "velocity": 3.5, "teleport": { "gravity": 4.0 } }"#).unwrap();
        assert_eq!(s.velocity, 3.5);
        assert_eq!(s.angular_velocity, DEFAULT_ANGULAR_VELOCITY);
        assert_eq!(s.teleport.gravity, 4.0);
        assert_eq!(s.teleport.segments, TELEPORT_SEGMENTS);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ velocity: }").is_err());
    }

    #[test]
    fn test_no_step_threshold() {
        let s = Settings::from_json(r#"{ "collision_height_threshold": null }"#).unwrap();
        assert_eq!(s.collision_height_threshold, None);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let s = Settings::load("/nonexistent/vr-locomotion/settings.json");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("vr_locomotion_settings_{}.json", std::process::id()));
        let mut s = Settings::default();
        s.velocity = 1.25;
        s.teleport.max_distance = 7.0;
        s.save(&path);
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, s);
    }

    #[test]
    fn test_min_landing_normal() {
        let mut t = TeleportSettings::default();
        t.max_slope_degrees = 0.0;
        assert!((t.min_landing_normal_y() - 1.0).abs() < 1e-6);
        t.max_slope_degrees = 90.0;
        assert!(t.min_landing_normal_y().abs() < 1e-6);
    }
}
