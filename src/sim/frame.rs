//! Per-frame player step
//!
//! Applies locomotion to the player collider once per frame: steer by yaw,
//! translate unless the move runs into the world, refresh the teleport arc
//! and jump to a confirmed teleport destination.

use glam::Vec3;

use super::collision::check_mesh_collision;
use super::ray::{Intersection, Ray};
use super::scene::SceneNode;
use crate::locomotion::{Locomotion, Teleportation};

/// What happened to the player this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// World-space displacement applied by translation
    pub moved: Vec3,
    /// Obstacle that stopped the translation
    pub blocked: Option<Intersection>,
    /// Teleport destination applied this frame
    pub teleported_to: Option<Vec3>,
}

/// Advance the player by one frame
///
/// `player` is the collider node whose `position` is its center; obstacles
/// lower than `height_threshold` above its base are walked over. On teleport
/// the collider keeps its height above the landing point.
pub fn step_frame<T: Teleportation>(
    locomotion: &mut Locomotion<T>,
    player: &mut SceneNode,
    world: &[SceneNode],
    aim: &Ray,
    dt: f32,
    now: f64,
    height_threshold: Option<f32>,
) -> FrameReport {
    let mut report = FrameReport::default();

    locomotion.update(now);

    // Body follows yaw only
    let heading = locomotion.orientation().heading();
    player.rotation = heading;

    let local = Vec3::new(
        locomotion.translating_x().unwrap_or(0.0),
        0.0,
        locomotion.translating_z().unwrap_or(0.0),
    );
    let step = heading * (local * dt);

    if step.length_squared() > 0.0 {
        let from = player.position;
        player.position += step;
        match check_mesh_collision(player, world, height_threshold, step.normalize()) {
            Some(hit) => {
                player.position = from;
                log::debug!("Movement blocked by object {} at {:?}", hit.object_id, hit.point);
                report.blocked = Some(hit);
            }
            None => report.moved = step,
        }
    }

    let teleportation = locomotion.teleportation_mut();
    teleportation.update_ray_curve(aim, world, now);
    if let Some(destination) = teleportation.destination() {
        let lift = player
            .world_bounds()
            .map(|bounds| player.position.y - bounds.min.y)
            .unwrap_or(0.0);
        player.position = destination + Vec3::Y * lift;
        teleportation.reset_teleport();
        log::info!("Teleported to {:?}", player.position);
        report.teleported_to = Some(player.position);
    }

    report
}
