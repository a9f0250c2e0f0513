//! Dynamic bounding-volume hierarchy over an external primitive
//! collection, flattened into a pointer-free `f32` buffer for a
//! GPU-side traversal.

pub mod geometry;
pub mod scene;
pub use geometry::{Aabb, Mesh};
pub use scene::bvh::{Config, Tree, TreeError};
pub use scene::{Bounded, Primitive, PrimitiveSource, Sphere, Triangle};
