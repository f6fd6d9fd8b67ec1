//! Teleport aim arc
//!
//! Samples a thrown parabola and raycasts each step against the world.

use glam::Vec3;

use crate::settings::TeleportSettings;
use crate::sim::{Intersection, Ray, Raycaster, SceneNode};

/// Parabolic aim arc, cut short where it first meets the world
#[derive(Clone, Debug, Default)]
pub struct ArcTrajectory {
    /// Points along the arc, ending at the hit point if there was one
    pub points: Vec<Vec3>,
    /// First surface the arc ran into
    pub hit: Option<Intersection>,
    /// Whether `hit` is flat enough to stand on
    pub is_valid: bool,
}

impl ArcTrajectory {
    /// Trace the arc from `aim` through `world`
    ///
    /// The arc is sampled in `segments` steps; each step is raycast against
    /// the world so thin geometry between samples is not skipped. Sampling
    /// stops at the first hit or once the arc leaves `max_distance`.
    pub fn calculate(aim: &Ray, world: &[SceneNode], settings: &TeleportSettings) -> Self {
        let segments = settings.segments.max(1);
        let velocity = aim.direction * settings.launch_speed;
        let time_step = Self::time_step(settings, segments);

        let mut points = Vec::with_capacity(segments + 1);
        points.push(aim.origin);
        let mut previous = aim.origin;

        for i in 1..=segments {
            let t = i as f32 * time_step;
            let position = Self::position_at_time(aim.origin, velocity, settings.gravity, t);

            let step = position - previous;
            let length = step.length();
            if length > 0.0 {
                let caster = Raycaster::new(previous, step).with_far(length);
                if let Some(hit) = caster.intersect_objects(world, true).into_iter().next() {
                    points.push(hit.point);
                    return Self {
                        points,
                        is_valid: hit.normal.y >= settings.min_landing_normal_y(),
                        hit: Some(hit),
                    };
                }
            }

            if (position - aim.origin).length() > settings.max_distance {
                break;
            }
            points.push(position);
            previous = position;
        }

        Self {
            points,
            hit: None,
            is_valid: false,
        }
    }

    /// Landing point, if the arc ended on walkable ground
    pub fn landing(&self) -> Option<Vec3> {
        self.hit.filter(|_| self.is_valid).map(|hit| hit.point)
    }

    /// Time between samples: enough total flight for a flat throw to cover
    /// twice the reach, so downward aims still land inside it
    fn time_step(settings: &TeleportSettings, segments: usize) -> f32 {
        let speed = settings.launch_speed.max(f32::EPSILON);
        2.0 * settings.max_distance / speed / segments as f32
    }

    fn position_at_time(start: Vec3, velocity: Vec3, gravity: f32, time: f32) -> Vec3 {
        start + velocity * time - Vec3::Y * (0.5 * gravity * time * time)
    }
}
