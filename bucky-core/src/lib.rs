/// Bucky Core Library - Buckyball construction and shared geometry logic
///
/// This library provides the stateless core: the truncated icosahedron (C60)
/// generator, rotation matrices, orthographic projection, and STL loading
/// into indexed meshes.

pub mod bucky;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use bucky::generate;
pub use error::{GeometryError, StlError};
pub use geometry::{edges_within, Mesh, Wireframe};
pub use projection::{project, Plane, Viewport};
pub use transform::{rotate_points, rotation, RotationState};
