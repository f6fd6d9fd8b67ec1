//! Collision queries used to keep the player out of solid geometry
//!
//! Both queries are stateless: each call builds its own raycaster, so no hit
//! from one call can leak into the next.

use glam::Vec3;

use super::ray::{Intersection, Raycaster};
use super::scene::SceneNode;

/// Nearest hit of `raycaster` against `target`
///
/// A target with children is treated as a group: its children (placed under
/// the target's transform) are tested recursively and the target's own
/// geometry is not. A childless target is tested directly.
pub fn check_ray_collision(raycaster: &Raycaster, target: &SceneNode) -> Option<Intersection> {
    let hits = if target.has_children() {
        raycaster.intersect_objects_under(&target.children, target.matrix(), true)
    } else {
        raycaster.intersect_object(target, true)
    };
    hits.into_iter().next()
}

/// Check whether `mesh` would run into `obstacles` when moving along
/// `direction`
///
/// Rays are cast from the mesh position toward each corner of its world
/// bounding box that lies ahead of the travel direction (angle ≤ 90°), out to
/// that corner's distance. The first hit whose point is higher than
/// `bounds.min.y + height_threshold` is returned, so low obstacles can be
/// stepped over; without a threshold any hit counts.
///
/// `direction` should be normalized by the caller. A zero direction, a mesh
/// without vertices, or one whose box has collapsed to a point reports no
/// collision.
pub fn check_mesh_collision(
    mesh: &SceneNode,
    obstacles: &[SceneNode],
    height_threshold: Option<f32>,
    direction: Vec3,
) -> Option<Intersection> {
    let bounds = mesh.world_bounds()?;
    if bounds.is_degenerate() {
        return None;
    }
    let origin = mesh.position;
    let mut raycaster = Raycaster::default();

    for corner in bounds.corners() {
        let to_corner = corner - origin;
        if !is_ahead(direction, to_corner) {
            continue;
        }

        raycaster.set(origin, to_corner);
        raycaster.far = to_corner.length();

        let hit = raycaster
            .intersect_objects(obstacles, true)
            .into_iter()
            .find(|hit| match height_threshold {
                Some(height) => hit.point.y > bounds.min.y + height,
                None => true,
            });
        if hit.is_some() {
            return hit;
        }
    }

    None
}

/// Angle between `direction` and `to_corner` is at most 90°.
/// Zero-length vectors have no angle and never count as ahead.
#[inline]
fn is_ahead(direction: Vec3, to_corner: Vec3) -> bool {
    if direction.length_squared() == 0.0 || to_corner.length_squared() == 0.0 {
        return false;
    }
    direction.dot(to_corner) >= 0.0
}
