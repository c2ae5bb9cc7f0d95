//! Platform-free animation state engine for the K.A.O.S. MNG page.
//!
//! Hosts feed raw events into [`KaosEngine`] and pull one [`FrameOutput`] per
//! display refresh; the renderer and DOM layers only consume that output.

pub mod chaos;
pub mod clock;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod glitch;
pub mod particles;
pub mod post;
pub mod signals;
pub mod smoothing;
pub mod state;
pub mod surface;
pub mod uniforms;

pub static SURFACE_WGSL: &str = include_str!("../shaders/surface.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use chaos::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use engine::*;
pub use error::*;
pub use glitch::*;
pub use particles::*;
pub use post::*;
pub use signals::*;
pub use smoothing::*;
pub use state::*;
pub use surface::*;
pub use uniforms::*;
