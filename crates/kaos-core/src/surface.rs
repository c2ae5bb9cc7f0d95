//! Deformation surface: icosphere mesh plus CPU references of the shader math.
//!
//! `shaders/surface.wgsl` is the source of truth on the GPU. The functions here
//! mirror it term by term so the deformation can be bounded and tested on the
//! host.

use crate::constants::SURFACE_ALPHA_MIN;
use crate::uniforms::{heartbeat, UniformSnapshot};
use fnv::FnvHashMap;
use glam::{Vec2, Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Unit icosphere; each subdivision level splits every face in four.
    pub fn icosphere(subdivisions: u32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let mut positions: Vec<Vec3> = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ]
        .iter()
        .map(|p| Vec3::from(*p).normalize())
        .collect();
        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        for _ in 0..subdivisions {
            let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
            let mut next = Vec::with_capacity(faces.len() * 4);
            for [a, b, c] in faces {
                let ab = midpoint(&mut positions, &mut midpoints, a, b);
                let bc = midpoint(&mut positions, &mut midpoints, b, c);
                let ca = midpoint(&mut positions, &mut midpoints, c, a);
                next.push([a, ab, ca]);
                next.push([b, bc, ab]);
                next.push([c, ca, bc]);
                next.push([ab, bc, ca]);
            }
            faces = next;
        }

        let vertices = positions
            .iter()
            .map(|p| SurfaceVertex {
                position: p.to_array(),
                normal: p.to_array(),
            })
            .collect();
        let indices = faces.iter().flat_map(|f| f.iter().copied()).collect();
        Self { vertices, indices }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut FnvHashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    *cache.entry(key).or_insert_with(|| {
        let mid = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize();
        positions.push(mid);
        (positions.len() - 1) as u32
    })
}

// ---------------- Simplex noise (Ashima / Gustavson 3D) ----------------

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + Vec4::ONE) * x)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

#[inline]
fn step3(edge: Vec3, x: Vec3) -> Vec3 {
    Vec3::select(x.cmpge(edge), Vec3::ONE, Vec3::ZERO)
}

/// 3D simplex noise, roughly in [-1, 1].
pub fn snoise(v: Vec3) -> f32 {
    let c = Vec2::new(1.0 / 6.0, 1.0 / 3.0);
    let d = Vec4::new(0.0, 0.5, 1.0, 2.0);

    let i = (v + Vec3::splat(v.dot(Vec3::splat(c.y)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(c.x)));

    let g = step3(x0.yzx(), x0);
    let l = Vec3::ONE - g;
    let i1 = g.min(l.zxy());
    let i2 = g.max(l.zxy());

    let x1 = x0 - i1 + Vec3::splat(c.x);
    let x2 = x0 - i2 + Vec3::splat(c.y);
    let x3 = x0 - Vec3::splat(d.y);

    let i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    let n_ = 0.142_857_15_f32;
    let ns = d.wyz() * n_ - d.xzx();

    let j = p - (p * ns.z * ns.z).floor() * 49.0;
    let x_ = (j * ns.z).floor();
    let y_ = (j - x_ * 7.0).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);

    let s0 = b0.floor() * 2.0 + Vec4::ONE;
    let s1 = b1.floor() * 2.0 + Vec4::ONE;
    let sh = Vec4::select(h.cmple(Vec4::ZERO), Vec4::splat(-1.0), Vec4::ZERO);

    let a0 = b0.xzyw() + s0.xzyw() * sh.xxyy();
    let a1 = b1.xzyw() + s1.xzyw() * sh.zzww();

    let mut p0 = Vec3::new(a0.x, a0.y, h.x);
    let mut p1 = Vec3::new(a0.z, a0.w, h.y);
    let mut p2 = Vec3::new(a1.x, a1.y, h.z);
    let mut p3 = Vec3::new(a1.z, a1.w, h.w);

    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    p0 *= norm.x;
    p1 *= norm.y;
    p2 *= norm.z;
    p3 *= norm.w;

    let m = (Vec4::splat(0.6) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;
    42.0 * (m * m).dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

// ---------------- Vertex stage reference ----------------

/// Breakdown of the displacement applied along the normal at one vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    pub turbulence: f32,
    pub pulse: f32,
    pub pointer: f32,
    pub glitch: f32,
    pub scroll: f32,
}

impl Displacement {
    #[inline]
    pub fn total(&self) -> f32 {
        self.turbulence + self.pulse + self.pointer + self.glitch + self.scroll
    }
}

pub fn displacement(pos: Vec3, u: &UniformSnapshot) -> Displacement {
    let t = u.time;
    let freq = 1.5 + u.scroll_progress * 1.5;
    let amp = 0.12 + u.glitch_intensity * 0.25 + u.scroll_speed * 0.1;
    let noise = snoise(pos * freq + Vec3::new(t * 0.25, t * 0.15, t * 0.1));

    let (hb1, hb2) = heartbeat(t);
    let pulse = (hb1 + hb2) * 0.08 * (1.0 + u.scroll_progress * 0.5);

    let pointer = (u.mouse.x * pos.x + u.mouse.y * pos.y) * 0.15;

    let scroll = if u.scroll_speed > 0.0 {
        u.scroll_speed * snoise(Vec3::new(pos.x * 8.0, pos.y * 8.0, t * 3.0)) * 0.15
    } else {
        0.0
    };
    let glitch = if u.glitch_intensity > 0.0 {
        snoise(Vec3::new(pos.x * 12.0, pos.y * 12.0, t * 6.0)) * u.glitch_intensity * 0.25
    } else {
        0.0
    };

    Displacement {
        turbulence: noise * amp,
        pulse,
        pointer,
        glitch,
        scroll,
    }
}

/// Displaced object-space position of a surface point.
pub fn displaced_position(vertex: &SurfaceVertex, u: &UniformSnapshot) -> Vec3 {
    let pos = Vec3::from(vertex.position);
    let normal = Vec3::from(vertex.normal);
    pos + normal * displacement(pos, u).total()
}

// ---------------- Fragment stage reference ----------------

/// View-angle rim term, 0 facing the camera and 1 at grazing angles.
#[inline]
pub fn fresnel(view_dir: Vec3, normal: Vec3, power: f32) -> f32 {
    (1.0 - view_dir.dot(normal).max(0.0)).clamp(0.0, 1.0).powf(power)
}

#[inline]
pub fn surface_alpha(fresnel: f32) -> f32 {
    SURFACE_ALPHA_MIN + fresnel.clamp(0.0, 1.0) * (1.0 - SURFACE_ALPHA_MIN)
}

/// Horizontal color tearing added to the RGB channels while glitching.
/// `y` is the displaced position in object space, before the model transform,
/// so the stripes rotate and scale with the mesh.
#[inline]
pub fn glitch_tear(y: f32, time: f32, glitch_intensity: f32) -> Vec3 {
    if glitch_intensity <= 0.0 {
        return Vec3::ZERO;
    }
    let offset = (y * 60.0 + time * 12.0).sin() * glitch_intensity;
    Vec3::new(offset * 0.4, -offset * 0.2, -offset * 0.3)
}
