use crate::constants::*;
use glam::{Quat, Vec3};
use rand::prelude::*;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// Per-frame transform of the whole cloud.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParticleTransform {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub scale: f32,
}

impl ParticleTransform {
    pub fn at(time: f32, scroll_progress: f32) -> Self {
        Self {
            rotation_x: (time * PARTICLE_WOBBLE_FREQ).sin() * PARTICLE_WOBBLE_AMP,
            rotation_y: time * PARTICLE_SPIN_Y,
            scale: 1.0 + scroll_progress.clamp(0.0, 1.0) * PARTICLE_SCROLL_SCALE,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::XYZ, self.rotation_x, self.rotation_y, 0.0)
    }
}

/// Static point cloud in a spherical shell. Topology never changes after
/// construction; only [`ParticleTransform`] varies per frame.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5EED_9A27_1C1E_F1E1);
        let palette = [
            Vec3::from(PALETTE_A),
            Vec3::from(PALETTE_B),
            Vec3::from(PALETTE_C),
        ];
        let particles = (0..count)
            .map(|_| {
                let radius = PARTICLE_RADIUS_MIN + rng.gen::<f32>() * PARTICLE_RADIUS_SPAN;
                let theta = rng.gen::<f32>() * std::f32::consts::TAU;
                let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
                let position = Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                );

                let edge = rng.gen::<f32>();
                let (from, to) = if edge < 0.33 {
                    (palette[0], palette[1])
                } else if edge < 0.66 {
                    (palette[1], palette[2])
                } else {
                    (palette[2], palette[0])
                };
                let color = from.lerp(to, rng.gen::<f32>());

                Particle {
                    position: position.to_array(),
                    size: PARTICLE_SIZE_MIN + rng.gen::<f32>() * PARTICLE_SIZE_SPAN,
                    color: [color.x, color.y, color.z, PARTICLE_OPACITY],
                }
            })
            .collect();
        Self { particles }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
