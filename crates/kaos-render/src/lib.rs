//! wgpu renderer shared by the web and native front-ends.

mod gpu;
mod helpers;
mod post;
mod scene;
mod targets;
pub mod uniforms;

pub use gpu::GpuState;
pub use uniforms::*;
