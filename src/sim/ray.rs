//! Rays, raycasting against scene nodes, and intersection records

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Geometry};
use super::scene::SceneNode;

/// Parallel-ray rejection threshold for triangle tests
const RAY_EPSILON: f32 = 1e-7;

/// A half-line with a unit (or zero) direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized (zero stays zero and
    /// intersects nothing)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Möller–Trumbore, double sided. Returns distance along the ray and the
    /// unnormalized face normal (counter-clockwise winding).
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<(f32, Vec3)> {
        let edge1 = b - a;
        let edge2 = c - a;
        let h = self.direction.cross(edge2);
        let det = edge1.dot(h);

        if det.abs() < RAY_EPSILON {
            return None; // Parallel or degenerate
        }

        let f = 1.0 / det;
        let s = self.origin - a;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * self.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if t < 0.0 {
            return None;
        }
        Some((t, edge1.cross(edge2)))
    }

    /// Slab test; returns the entry distance (0 when starting inside)
    pub fn intersect_aabb(&self, aabb: &Aabb, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

            if dir.abs() < RAY_EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let (t1, t2) = ((lo - origin) * inv, (hi - origin) * inv);
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// A ray hit against a scene node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// World-space unit face normal, facing the ray origin
    pub normal: Vec3,
    /// Id of the node that was hit
    pub object_id: u32,
    /// Triangle index within the node's geometry
    pub face_index: usize,
}

/// Casts a ray against scene nodes within a `[near, far]` distance window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycaster {
    pub ray: Ray,
    pub near: f32,
    pub far: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            ray: Ray::new(Vec3::ZERO, Vec3::NEG_Z),
            near: 0.0,
            far: f32::INFINITY,
        }
    }
}

impl Raycaster {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            ray: Ray::new(origin, direction),
            ..Default::default()
        }
    }

    /// Re-aim; the distance window is left unchanged
    pub fn set(&mut self, origin: Vec3, direction: Vec3) {
        self.ray = Ray::new(origin, direction);
    }

    pub fn with_far(mut self, far: f32) -> Self {
        self.far = far;
        self
    }

    /// Intersect a single root node (and, if `recursive`, its descendants),
    /// sorted nearest first
    pub fn intersect_object(&self, object: &SceneNode, recursive: bool) -> Vec<Intersection> {
        let mut hits = Vec::new();
        self.collect(object, Mat4::IDENTITY, recursive, &mut hits);
        sort_nearest_first(&mut hits);
        hits
    }

    /// Intersect several root nodes, sorted nearest first
    pub fn intersect_objects(&self, objects: &[SceneNode], recursive: bool) -> Vec<Intersection> {
        self.intersect_objects_under(objects, Mat4::IDENTITY, recursive)
    }

    /// Intersect nodes whose parent has world matrix `parent`
    pub fn intersect_objects_under(
        &self,
        objects: &[SceneNode],
        parent: Mat4,
        recursive: bool,
    ) -> Vec<Intersection> {
        let mut hits = Vec::new();
        for object in objects {
            self.collect(object, parent, recursive, &mut hits);
        }
        sort_nearest_first(&mut hits);
        hits
    }

    fn collect(&self, node: &SceneNode, parent: Mat4, recursive: bool, hits: &mut Vec<Intersection>) {
        let world = parent * node.matrix();
        if let Some(geometry) = &node.geometry {
            self.collect_geometry(node.id, geometry, &world, hits);
        }
        if recursive {
            for child in &node.children {
                self.collect(child, world, recursive, hits);
            }
        }
    }

    fn collect_geometry(
        &self,
        object_id: u32,
        geometry: &Geometry,
        world: &Mat4,
        hits: &mut Vec<Intersection>,
    ) {
        let Some(local_bounds) = geometry.bounds() else {
            return;
        };
        // Broad phase against the world-space box
        if self
            .ray
            .intersect_aabb(&local_bounds.transformed(world), self.far)
            .is_none()
        {
            return;
        }

        for (face_index, [a, b, c]) in geometry.triangles() {
            let (a, b, c) = (
                world.transform_point3(a),
                world.transform_point3(b),
                world.transform_point3(c),
            );
            let Some((distance, normal)) = self.ray.intersect_triangle(a, b, c) else {
                continue;
            };
            if distance < self.near || distance > self.far {
                continue;
            }
            let mut normal = normal.normalize_or_zero();
            if normal.dot(self.ray.direction) > 0.0 {
                normal = -normal;
            }
            hits.push(Intersection {
                distance,
                point: self.ray.at(distance),
                normal,
                object_id,
                face_index,
            });
        }
    }
}

fn sort_nearest_first(hits: &mut [Intersection]) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}
