//! Triangle renderer
//!
//! Shapes are tessellated in field coordinates by [`batch::VertexBatch`]; the
//! wgpu pipeline letterboxes them into the canvas.

pub mod batch;
#[cfg(target_arch = "wasm32")]
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
#[cfg(target_arch = "wasm32")]
pub use pipeline::RenderState;
pub use vertex::Vertex;
