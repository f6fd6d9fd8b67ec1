//! Scene and collision module
//!
//! Scene nodes, raycasting and the collision queries that keep the player
//! out of solid geometry. This module is pure and frame-driven:
//! - Time only enters through explicit arguments
//! - No rendering or platform dependencies
//! - Queries never mutate their inputs

pub mod collision;
pub mod frame;
pub mod geometry;
pub mod ray;
pub mod scene;

pub use collision::{check_mesh_collision, check_ray_collision};
pub use frame::{FrameReport, step_frame};
pub use geometry::{Aabb, Geometry};
pub use ray::{Intersection, Ray, Raycaster};
pub use scene::SceneNode;
