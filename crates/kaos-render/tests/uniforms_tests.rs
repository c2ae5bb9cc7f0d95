// Host-side tests for GPU uniform packing; no adapter required.

use glam::{Vec2, Vec3, Vec4};
use kaos_core::*;
use kaos_render::*;

#[test]
fn uniform_structs_are_16_byte_multiples() {
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 224);
    assert_eq!(std::mem::size_of::<CloudUniforms>(), 176);
    assert_eq!(std::mem::size_of::<PostUniforms>(), 48);
    for size in [
        std::mem::size_of::<SceneUniforms>(),
        std::mem::size_of::<CloudUniforms>(),
        std::mem::size_of::<PostUniforms>(),
    ] {
        assert_eq!(size % 16, 0);
    }
}

#[test]
fn vertex_layouts_match_shader_strides() {
    assert_eq!(std::mem::size_of::<SurfaceVertex>(), 24);
    assert_eq!(std::mem::size_of::<Particle>(), 32);
}

#[test]
fn scene_uniforms_carry_signals_in_shader_order() {
    let snap = UniformSnapshot {
        time: 3.0,
        glitch_intensity: 0.25,
        scroll_progress: 0.5,
        scroll_speed: 0.75,
        mouse: Vec2::new(-0.2, 0.4),
        rotation_x: 0.1,
        rotation_y: 0.2,
        scale: 2.2,
    };
    let u = SceneUniforms::new(&Camera::default(), &snap);
    assert_eq!(u.signal, [3.0, 0.25, 0.5, 0.75]);
    assert_eq!(&u.mouse[..2], &[-0.2, 0.4]);
    assert_eq!(u.camera_pos, [0.0, 0.0, CAMERA_Z, 1.0]);
}

#[test]
fn mesh_model_scales_uniformly_and_keeps_origin() {
    let snap = UniformSnapshot {
        rotation_x: 0.7,
        rotation_y: -1.3,
        scale: 2.5,
        ..Default::default()
    };
    let m = mesh_model(&snap);
    let origin = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(origin.truncate().length() < 1e-6);
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        let v = m.transform_vector3(axis);
        assert!((v.length() - 2.5).abs() < 1e-5);
    }
}

#[test]
fn camera_basis_is_orthonormal_and_faces_origin() {
    let camera = Camera::default();
    let (right, up) = camera_basis(&camera);
    assert!((right.length() - 1.0).abs() < 1e-6);
    assert!((up.length() - 1.0).abs() < 1e-6);
    assert!(right.dot(up).abs() < 1e-6);
    assert!((right - Vec3::X).length() < 1e-6);
    assert!((up - Vec3::Y).length() < 1e-6);
}

#[test]
fn post_uniforms_copy_params() {
    let mut signals = SignalState::default();
    signals.glitching = true;
    let params = PostParams::from_signals(&signals);
    let u = PostUniforms::new(&params, 1.5, 1920, 1080);
    assert_eq!(u.resolution, [1920.0, 1080.0]);
    assert_eq!(u.aberration, ABERRATION_GLITCH);
    assert_eq!(u.bloom_threshold, BLOOM_THRESHOLD);
    assert_eq!(u.vignette_offset, VIGNETTE_OFFSET);
}

#[test]
fn srgb_conversion_endpoints_and_monotonic() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    let mut prev = -1.0;
    for i in 0..=100 {
        let v = srgb_to_linear(i as f32 / 100.0);
        assert!(v > prev);
        prev = v;
    }
    let bg = linear_rgb(BACKGROUND_RGB);
    assert!(bg.iter().all(|c| *c > 0.0 && *c < 0.01));
}

#[test]
fn projection_tracks_viewport_aspect() {
    let mut camera = Camera::default();
    camera.set_viewport(1600, 800);
    assert_eq!(camera.aspect, 2.0);
    camera.set_viewport(0, 800);
    assert_eq!(camera.aspect, 2.0);
    let clip = camera.projection_matrix() * camera.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(clip.x.abs() < 1e-6 && clip.y.abs() < 1e-6);
}
