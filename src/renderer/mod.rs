//! WebGPU rendering module
//!
//! Snapshots are turned into flat-colored triangles in canvas space, then
//! mapped to NDC and drawn in a single pass.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
