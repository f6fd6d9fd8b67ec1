//! Bounding boxes and indexed triangle geometry
//!
//! Geometry is stored in local (object) space; scene nodes place it in the
//! world through their transform hierarchy.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Smallest box enclosing all points, `None` for an empty set
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            aabb.expand_by_point(p);
        }
        Some(aabb)
    }

    pub fn expand_by_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True when the box has collapsed to a single point
    pub fn is_degenerate(&self) -> bool {
        self.max.cmple(self.min).all()
    }

    /// The eight corners, +z face first then -z face, each wound
    /// (+x,+y) (-x,+y) (-x,-y) (+x,-y)
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
        ]
    }

    /// Bounds of this box after an affine transform
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let corners = self.corners().map(|c| matrix.transform_point3(c));
        // Eight corners are never empty
        Aabb::from_points(corners).unwrap_or(*self)
    }
}

/// Indexed triangle list in local space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
}

impl Geometry {
    pub fn new(positions: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        Self { positions, indices }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Local-space bounds, `None` when there are no vertices
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Copy with every vertex moved by `matrix`
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            positions: self.positions.iter().map(|p| matrix.transform_point3(*p)).collect(),
            indices: self.indices.clone(),
        }
    }

    /// Iterate triangles as vertex triples, skipping faces that reference
    /// missing vertices
    pub fn triangles(&self) -> impl Iterator<Item = (usize, [Vec3; 3])> + '_ {
        self.indices.iter().enumerate().filter_map(|(face, tri)| {
            let a = *self.positions.get(tri[0] as usize)?;
            let b = *self.positions.get(tri[1] as usize)?;
            let c = *self.positions.get(tri[2] as usize)?;
            Some((face, [a, b, c]))
        })
    }

    /// Axis-aligned box centered on the origin
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let h = Vec3::new(width, height, depth) * 0.5;
        let positions = Aabb::new(-h, h).corners().to_vec();
        // Vertex order follows Aabb::corners
        let indices = vec![
            // +z face
            [0, 1, 2],
            [0, 2, 3],
            // -z face
            [4, 7, 6],
            [4, 6, 5],
            // +y face
            [0, 4, 5],
            [0, 5, 1],
            // -y face
            [3, 2, 6],
            [3, 6, 7],
            // +x face
            [0, 3, 7],
            [0, 7, 4],
            // -x face
            [1, 5, 6],
            [1, 6, 2],
        ];
        Self { positions, indices }
    }

    /// Horizontal quad in the XZ plane, facing +y
    pub fn plane(width: f32, depth: f32) -> Self {
        let (hw, hd) = (width * 0.5, depth * 0.5);
        Self {
            positions: vec![
                Vec3::new(-hw, 0.0, -hd),
                Vec3::new(hw, 0.0, -hd),
                Vec3::new(hw, 0.0, hd),
                Vec3::new(-hw, 0.0, hd),
            ],
            indices: vec![[0, 2, 1], [0, 3, 2]],
        }
    }
}
