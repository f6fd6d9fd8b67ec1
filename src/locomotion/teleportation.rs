//! Point-and-teleport collaborator
//!
//! Locomotion only talks to the [`Teleportation`] trait. [`ArcTeleporter`] is
//! the stock implementation: a parabolic ray curve, a cylinder hit marker,
//! and a debounced activation that fires once the aim has rested on a valid
//! landing spot.

use glam::Vec3;

use super::timer::Debounce;
use super::trajectory::ArcTrajectory;
use crate::consts::HIT_MARKER_HEIGHT;
use crate::renderer::shapes;
use crate::settings::TeleportSettings;
use crate::sim::{Ray, SceneNode};

/// Scene ids reserved for the guide meshes
pub const RAY_CURVE_ID: u32 = u32::MAX - 1;
pub const HIT_MARKER_ID: u32 = u32::MAX - 2;

/// Contract between locomotion and whatever draws and resolves the teleport arc
///
/// Invariant: `hit_point` is `Some` only while the ray curve is active and a
/// valid surface is under the aim.
pub trait Teleportation {
    /// Renderable arc shown while aiming
    fn ray_curve(&self) -> &SceneNode;
    /// Renderable marker at the landing spot
    fn hit_marker(&self) -> &SceneNode;
    /// Current landing spot
    fn hit_point(&self) -> Option<Vec3>;
    fn is_ray_curve_active(&self) -> bool;
    /// Set once a debounced activation has fired on a valid target
    fn is_teleport_active(&self) -> bool;
    /// Debounced confirm; safe to call every frame
    fn activate_teleport(&mut self, now: f64);
    /// Back to idle: hide the arc, drop the target, cancel pending activation
    fn reset_teleport(&mut self);
    fn set_ray_curve_state(&mut self, active: bool);
    /// Re-trace the arc for this frame's aim
    fn update_ray_curve(&mut self, aim: &Ray, world: &[SceneNode], now: f64);

    /// Where to move the player, once a teleport has been confirmed
    fn destination(&self) -> Option<Vec3> {
        if self.is_teleport_active() {
            self.hit_point()
        } else {
            None
        }
    }
}

/// Parabolic-arc teleporter
#[derive(Debug, Clone)]
pub struct ArcTeleporter {
    settings: TeleportSettings,
    ray_curve: SceneNode,
    hit_marker: SceneNode,
    hit_point: Option<Vec3>,
    ray_curve_active: bool,
    teleport_active: bool,
    debounce: Debounce,
}

impl Default for ArcTeleporter {
    fn default() -> Self {
        Self::new(TeleportSettings::default())
    }
}

impl ArcTeleporter {
    pub fn new(settings: TeleportSettings) -> Self {
        let mut ray_curve = SceneNode::group(RAY_CURVE_ID, "teleport_ray_curve");
        ray_curve.visible = false;

        let mut hit_marker = SceneNode::mesh(
            HIT_MARKER_ID,
            "teleport_hit_marker",
            shapes::cylinder(settings.marker_radius, HIT_MARKER_HEIGHT, 24),
        );
        hit_marker.visible = false;

        Self {
            debounce: Debounce::new(settings.debounce_secs),
            settings,
            ray_curve,
            hit_marker,
            hit_point: None,
            ray_curve_active: false,
            teleport_active: false,
        }
    }

    pub fn settings(&self) -> &TeleportSettings {
        &self.settings
    }

    /// True while a debounced activation is waiting for the aim to settle
    pub fn is_activation_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    fn set_hit_point(&mut self, hit_point: Option<Vec3>) {
        self.hit_point = hit_point;
        match hit_point {
            Some(point) => {
                self.hit_marker.position = point;
                self.hit_marker.visible = true;
            }
            None => {
                self.hit_marker.visible = false;
                // A stale target must not be confirmed later
                self.debounce.cancel();
            }
        }
    }
}

impl Teleportation for ArcTeleporter {
    fn ray_curve(&self) -> &SceneNode {
        &self.ray_curve
    }

    fn hit_marker(&self) -> &SceneNode {
        &self.hit_marker
    }

    fn hit_point(&self) -> Option<Vec3> {
        self.hit_point
    }

    fn is_ray_curve_active(&self) -> bool {
        self.ray_curve_active
    }

    fn is_teleport_active(&self) -> bool {
        self.teleport_active
    }

    fn activate_teleport(&mut self, now: f64) {
        if self.ray_curve_active && self.hit_point.is_some() && !self.teleport_active {
            self.debounce.call(now);
        }
    }

    fn reset_teleport(&mut self) {
        if self.ray_curve_active || self.teleport_active {
            log::debug!("Teleport reset");
        }
        self.set_ray_curve_state(false);
    }

    fn set_ray_curve_state(&mut self, active: bool) {
        self.ray_curve_active = active;
        self.ray_curve.visible = active;
        if active {
            log::debug!("Teleport aiming");
        } else {
            self.teleport_active = false;
            self.ray_curve.geometry = None;
            self.set_hit_point(None);
        }
    }

    fn update_ray_curve(&mut self, aim: &Ray, world: &[SceneNode], now: f64) {
        if !self.ray_curve_active {
            return;
        }

        let arc = ArcTrajectory::calculate(aim, world, &self.settings);
        self.ray_curve.geometry = Some(shapes::ribbon(&arc.points, self.settings.curve_width));
        self.set_hit_point(arc.landing());

        if self.debounce.poll(now) && self.hit_point.is_some() {
            self.teleport_active = true;
            log::info!("Teleport confirmed at {:?}", self.hit_point);
        }
    }
}
