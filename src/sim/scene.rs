//! Scene nodes with a transform hierarchy
//!
//! A node without geometry is a group. World transforms compose parent by
//! local (scale, then rotation, then translation).

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Geometry};

/// A node in the scene graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: u32,
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Triangle geometry in local space (`None` for groups)
    pub geometry: Option<Geometry>,
    pub children: Vec<SceneNode>,
    /// Render visibility; raycasts ignore it
    pub visible: bool,
}

impl SceneNode {
    /// An empty group node
    pub fn group(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            geometry: None,
            children: Vec::new(),
            visible: true,
        }
    }

    /// A node carrying geometry
    pub fn mesh(id: u32, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::group(id, name)
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Local transform relative to the parent
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Visit this node and all descendants with their world matrices,
    /// `parent` being the world matrix of this node's parent
    pub fn traverse<F>(&self, parent: Mat4, visit: &mut F)
    where
        F: FnMut(&SceneNode, &Mat4),
    {
        let world = parent * self.matrix();
        visit(self, &world);
        for child in &self.children {
            child.traverse(world, visit);
        }
    }

    /// World-space bounds of this node's geometry and all descendants,
    /// treating this node as a root. `None` when nothing has vertices.
    pub fn world_bounds(&self) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        self.traverse(Mat4::IDENTITY, &mut |node, world| {
            let Some(geometry) = &node.geometry else {
                return;
            };
            let points = geometry.positions.iter().map(|p| world.transform_point3(*p));
            if let Some(b) = Aabb::from_points(points) {
                bounds = Some(match bounds {
                    Some(acc) => acc.union(&b),
                    None => b,
                });
            }
        });
        bounds
    }
}
