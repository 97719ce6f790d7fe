//! WebGPU rendering module
//!
//! Scenes are built on the CPU as flat-colored triangle lists in logical
//! canvas space and uploaded once per frame.

pub mod pipeline;
pub mod rain;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use rain::CodeRain;
pub use vertex::{Vertex, colors};
