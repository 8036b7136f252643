//! WebGPU rendering module
//!
//! The scene is rebuilt as flat-colored triangles every frame; text lives in
//! the DOM overlay, not here.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
