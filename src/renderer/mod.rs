//! Beam rendering primitives
//!
//! Frame-scoped primitive pooling, wave sampling and mesh generation. Drawing
//! itself (pipelines, shaders) belongs to the host renderer.

pub mod pool;
pub mod shapes;
pub mod vertex;
pub mod wave;

pub use pool::{EffectMarker, RenderPrimitive, SegmentPool};
pub use shapes::build_mesh;
pub use vertex::Vertex;
