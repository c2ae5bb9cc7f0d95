// Shared tuning constants used by both web and native frontends.

// Signal sampling
pub const SCROLL_SPEED_GAIN: f32 = 10.0; // |dy| / dt_ms multiplier before clamping
pub const SCROLL_SPEED_DECAY: f32 = 0.9; // applied every decay tick
pub const SCROLL_DECAY_INTERVAL_MS: u32 = 50;
pub const MIN_SAMPLE_DT_MS: f64 = 1.0;
pub const ORIENTATION_RANGE_DEG: f32 = 45.0; // tilt that maps to a full pointer deflection
pub const ORIENTATION_NEUTRAL_BETA_DEG: f32 = 45.0; // phone held at a reading angle

// Glitch timing
pub const GLITCH_TIMEOUT_MS: f64 = 5000.0;
pub const GLITCH_SUPERVISOR_INTERVAL_MS: u32 = 3000;
pub const GLITCH_AUTO_THRESHOLD: f32 = 0.95;
pub const GLITCH_AUTO_MIN_MS: f64 = 200.0;
pub const GLITCH_AUTO_SPAN_MS: f64 = 500.0;

// Smoothing rates (fraction of the remaining distance covered per frame)
pub const RATE_GLITCH_INTENSITY: f32 = 0.08;
pub const RATE_SCROLL_PROGRESS: f32 = 0.04;
pub const RATE_SCROLL_SPEED: f32 = 0.10;
pub const RATE_MESH_SCALE: f32 = 0.08;
pub const RATE_MESH_ROTATION: f32 = 0.05;
pub const RATE_CHAOS_LEVEL: f32 = 0.15;

// Mesh transform
pub const MESH_BASE_SCALE: f32 = 2.2;
pub const MESH_SCROLL_SCALE: f32 = 0.2;
pub const MESH_PULSE_SCALE: f32 = 0.06;
pub const ROTATION_Y_SPEED: f32 = 0.08;
pub const ROTATION_Y_POINTER: f32 = 0.6;
pub const ROTATION_X_WOBBLE_FREQ: f32 = 0.04;
pub const ROTATION_X_WOBBLE_AMP: f32 = 0.15;
pub const ROTATION_X_POINTER: f32 = 0.4;

// Heartbeat
pub const HEARTBEAT_FREQ: f32 = 2.5;
pub const HEARTBEAT_SECOND_PHASE: f32 = 0.3;

// Deformation surface
pub const SURFACE_SUBDIVISIONS: u32 = 5;
pub const SURFACE_MAX_SUBDIVISIONS: u32 = 7;
pub const PALETTE_A: [f32; 3] = [1.0, 0.0, 0.502]; // #ff0080
pub const PALETTE_B: [f32; 3] = [0.0, 1.0, 1.0]; // #00ffff
pub const PALETTE_C: [f32; 3] = [0.502, 0.0, 1.0]; // #8000ff
pub const SURFACE_ALPHA_MIN: f32 = 0.92;

// Particle field
pub const PARTICLE_COUNT: usize = 2000;
pub const PARTICLE_MAX_COUNT: usize = 20_000;
pub const PARTICLE_RADIUS_MIN: f32 = 3.0;
pub const PARTICLE_RADIUS_SPAN: f32 = 5.0;
pub const PARTICLE_SIZE_MIN: f32 = 1.0;
pub const PARTICLE_SIZE_SPAN: f32 = 3.0;
pub const PARTICLE_OPACITY: f32 = 0.8;
/// World-space billboard width per unit of particle size.
pub const PARTICLE_WORLD_SIZE: f32 = 0.006;
pub const PARTICLE_SPIN_Y: f32 = 0.02;
pub const PARTICLE_WOBBLE_FREQ: f32 = 0.01;
pub const PARTICLE_WOBBLE_AMP: f32 = 0.1;
pub const PARTICLE_SCROLL_SCALE: f32 = 0.5;

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 0.15;
pub const BLOOM_SMOOTHING: f32 = 0.9;
pub const BLOOM_INTENSITY: f32 = 2.0;
pub const ABERRATION_BASE: f32 = 0.001;
pub const ABERRATION_GLITCH: f32 = 0.008;
pub const ABERRATION_SPEED_GAIN: f32 = 0.003;
pub const ABERRATION_SPEED_MAX: f32 = 0.004;
pub const GRAIN_OPACITY: f32 = 0.04;
pub const VIGNETTE_OFFSET: f32 = 0.1;
pub const VIGNETTE_DARKNESS: f32 = 0.7;

// Chaos level readout
pub const CHAOS_INITIAL: f32 = 50.0;
pub const CHAOS_BASE: f32 = 30.0;
pub const CHAOS_PROGRESS_WEIGHT: f32 = 40.0;
pub const CHAOS_SPEED_WEIGHT: f32 = 50.0;
pub const CHAOS_TIER_AGITATED: f32 = 40.0;
pub const CHAOS_TIER_CRITICAL: f32 = 70.0;

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const BACKGROUND_RGB: [f32; 3] = [0.0196, 0.0196, 0.0314]; // #050508

pub const DEFAULT_SEED: u64 = 42;
