//! Guide-mesh rendering helpers
//!
//! The host owns the GPU; this module only produces geometry and an
//! upload-ready vertex format.

pub mod shapes;
pub mod vertex;

pub use shapes::{cylinder, ribbon};
pub use vertex::{Vertex, triangle_list, vertex_bytes};
