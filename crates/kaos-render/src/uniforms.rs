//! GPU-side uniform layouts. Every struct is a multiple of 16 bytes and
//! mirrors the matching WGSL struct field for field.

use glam::{Mat4, Vec3};
use kaos_core::{
    Camera, ParticleTransform, PostParams, UniformSnapshot, PALETTE_A, PALETTE_B, PALETTE_C,
    PARTICLE_WORLD_SIZE,
};

/// sRGB-encoded channel to linear light.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn linear_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(srgb_to_linear)
}

fn palette_entry(rgb: [f32; 3]) -> [f32; 4] {
    let [r, g, b] = linear_rgb(rgb);
    [r, g, b, 1.0]
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// time, glitch intensity, scroll progress, scroll speed
    pub signal: [f32; 4],
    pub mouse: [f32; 4],
    pub palette_a: [f32; 4],
    pub palette_b: [f32; 4],
    pub palette_c: [f32; 4],
}

impl SceneUniforms {
    pub fn new(camera: &Camera, u: &UniformSnapshot) -> Self {
        let model = mesh_model(u);
        Self {
            view_proj: (camera.projection_matrix() * camera.view_matrix()).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            signal: [u.time, u.glitch_intensity, u.scroll_progress, u.scroll_speed],
            mouse: [u.mouse.x, u.mouse.y, 0.0, 0.0],
            palette_a: palette_entry(PALETTE_A),
            palette_b: palette_entry(PALETTE_B),
            palette_c: palette_entry(PALETTE_C),
        }
    }
}

/// Object-to-world transform of the deformation surface.
pub fn mesh_model(u: &UniformSnapshot) -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(u.scale), u.mesh_rotation(), Vec3::ZERO)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CloudUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    /// world size per unit of particle size, opacity multiplier
    pub params: [f32; 4],
}

impl CloudUniforms {
    pub fn new(camera: &Camera, t: &ParticleTransform) -> Self {
        let (right, up) = camera_basis(camera);
        let model =
            Mat4::from_scale_rotation_translation(Vec3::splat(t.scale), t.rotation(), Vec3::ZERO);
        Self {
            view_proj: (camera.projection_matrix() * camera.view_matrix()).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            params: [PARTICLE_WORLD_SIZE, 1.0, 0.0, 0.0],
        }
    }
}

/// World-space right and up vectors of the camera, for billboards.
pub fn camera_basis(camera: &Camera) -> (Vec3, Vec3) {
    let forward = (camera.target - camera.eye).normalize_or_zero();
    let right = forward.cross(camera.up).normalize_or_zero();
    let up = right.cross(forward);
    (right, up)
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub bloom_threshold: f32,
    pub bloom_smoothing: f32,
    pub bloom_intensity: f32,
    pub aberration: f32,
    pub grain_opacity: f32,
    pub vignette_offset: f32,
    pub vignette_darkness: f32,
    pub _pad: [f32; 2],
}

impl PostUniforms {
    pub fn new(p: &PostParams, time: f32, width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            time,
            bloom_threshold: p.bloom_threshold,
            bloom_smoothing: p.bloom_smoothing,
            bloom_intensity: p.bloom_intensity,
            aberration: p.aberration_offset,
            grain_opacity: p.grain_opacity,
            vignette_offset: p.vignette_offset,
            vignette_darkness: p.vignette_darkness,
            _pad: [0.0; 2],
        }
    }
}
