//! The process-wide state container.
//!
//! One [`KaosEngine`] is created on mount and owns every signal, the glitch
//! controller, the loop clock and the smoothed uniforms. Event handlers write
//! raw signals through it; the frame loop reads them back out in a fixed
//! order. After [`KaosEngine::teardown`] every input is ignored and no frame
//! is produced.

use crate::chaos::ChaosLevel;
use crate::clock::{AnimationClock, FrameTime, LoopToken};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::glitch::{GlitchController, GlitchTiming, UnitRandom};
use crate::particles::{ParticleField, ParticleTransform};
use crate::post::PostParams;
use crate::signals::SignalSampler;
use crate::state::SignalState;
use crate::surface::SurfaceMesh;
use crate::uniforms::{UniformSnapshot, UniformState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    GlitchStarted,
    GlitchEnded,
}

pub type EngineEvents = SmallVec<[EngineEvent; 2]>;

/// Everything the renderer and the page need for one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub time: FrameTime,
    pub signals: SignalState,
    pub uniforms: UniformSnapshot,
    pub particles: ParticleTransform,
    pub post: PostParams,
    pub chaos_level: f32,
    /// Glitch transitions since the previous frame, oldest first.
    pub events: EngineEvents,
}

pub struct KaosEngine {
    config: EngineConfig,
    sampler: SignalSampler,
    glitch: GlitchController,
    clock: AnimationClock,
    uniforms: UniformState,
    chaos: ChaosLevel,
    particles: ParticleField,
    rng: Box<dyn UnitRandom>,
    pending: EngineEvents,
    torn_down: bool,
}

impl KaosEngine {
    pub fn new(config: EngineConfig, mount_ms: f64) -> Result<Self, ConfigError> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_random(config, mount_ms, Box::new(rng))
    }

    /// Build with an explicit randomness source for the glitch supervisor.
    pub fn with_random(
        config: EngineConfig,
        mount_ms: f64,
        rng: Box<dyn UnitRandom>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sampler = SignalSampler::new(config.scroll_speed_gain, config.scroll_speed_decay, mount_ms);
        let glitch = GlitchController::new(GlitchTiming {
            timeout_ms: config.glitch_timeout_ms,
            auto_threshold: config.glitch_auto_threshold,
            auto_min_ms: config.glitch_auto_min_ms,
            auto_span_ms: config.glitch_auto_span_ms,
        });
        let uniforms = UniformState::new(&config.rates);
        let chaos = ChaosLevel::new(config.rates.chaos_level);
        let particles = ParticleField::generate(config.particle_count, config.seed);
        log::info!(
            "[engine] mounted particles={} subdivisions={} seed={}",
            particles.len(),
            config.surface_subdivisions,
            config.seed
        );
        Ok(Self {
            config,
            sampler,
            glitch,
            clock: AnimationClock::new(),
            uniforms,
            chaos,
            particles,
            rng,
            pending: EngineEvents::new(),
            torn_down: false,
        })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn signals(&self) -> SignalState {
        SignalState {
            pointer: self.sampler.pointer,
            scroll: self.sampler.scroll,
            glitching: self.glitch.is_glitching(),
        }
    }

    #[inline]
    pub fn glitch(&self) -> &GlitchController {
        &self.glitch
    }

    #[inline]
    pub fn sampler(&self) -> &SignalSampler {
        &self.sampler
    }

    // ---------------- Inputs ----------------

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) {
        if self.torn_down {
            return;
        }
        self.sampler
            .on_pointer_move(client_x, client_y, viewport_w, viewport_h);
    }

    pub fn orientation(&mut self, beta_deg: Option<f64>, gamma_deg: Option<f64>) {
        if self.torn_down {
            return;
        }
        self.sampler.on_orientation(beta_deg, gamma_deg);
    }

    pub fn scroll_sample(&mut self, scroll_y: f64, max_scroll_y: f64, now_ms: f64) {
        if self.torn_down {
            return;
        }
        self.sampler.on_scroll_sample(scroll_y, max_scroll_y, now_ms);
    }

    pub fn trigger_glitch(&mut self, now_ms: f64) -> bool {
        if self.torn_down {
            return false;
        }
        let started = self.glitch.trigger(now_ms);
        if started {
            self.pending.push(EngineEvent::GlitchStarted);
        }
        started
    }

    pub fn clear_glitch(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let ended = self.glitch.clear();
        if ended {
            self.pending.push(EngineEvent::GlitchEnded);
        }
        ended
    }

    /// Fixed-interval housekeeping: scroll speed decay and glitch expiry.
    pub fn decay_tick(&mut self, now_ms: f64) {
        if self.torn_down {
            return;
        }
        self.sampler.decay_tick();
        self.poll_glitch(now_ms);
    }

    /// Spontaneous glitch supervisor step. Returns whether a glitch fired.
    pub fn supervisor_tick(&mut self, now_ms: f64) -> bool {
        if self.torn_down {
            return false;
        }
        self.poll_glitch(now_ms);
        let fired = self.glitch.supervise(now_ms, self.rng.as_mut());
        if fired {
            log::debug!("[engine] spontaneous glitch at {:.0} ms", now_ms);
            self.pending.push(EngineEvent::GlitchStarted);
        }
        fired
    }

    fn poll_glitch(&mut self, now_ms: f64) {
        if self.glitch.poll(now_ms) {
            self.pending.push(EngineEvent::GlitchEnded);
        }
    }

    // ---------------- Frame loop ----------------

    /// Begin the frame loop. Returns `None` once torn down.
    pub fn start_loop(&mut self) -> Option<LoopToken> {
        if self.torn_down {
            return None;
        }
        Some(self.clock.subscribe())
    }

    #[inline]
    pub fn is_current(&self, token: LoopToken) -> bool {
        self.clock.is_current(token)
    }

    /// One tick: glitch expiry, uniform smoothing, mesh and particle
    /// transforms, post parameters, chaos readout. Rendering follows with the
    /// returned output. `None` for a stale token or after teardown.
    pub fn frame(&mut self, token: LoopToken, now_ms: f64) -> Option<FrameOutput> {
        if self.torn_down {
            return None;
        }
        let time = self.clock.tick(token, now_ms)?;
        self.poll_glitch(now_ms);

        let signals = self.signals();
        let uniforms = self.uniforms.update(time.elapsed_sec, &signals);
        let particles = ParticleTransform::at(time.elapsed_sec, signals.scroll.progress);
        let post = PostParams::from_signals(&signals);
        let chaos_level = self.chaos.tick(&signals.scroll);

        Some(FrameOutput {
            time,
            signals,
            uniforms,
            particles,
            post,
            chaos_level,
            events: std::mem::take(&mut self.pending),
        })
    }

    // ---------------- Outputs ----------------

    #[inline]
    pub fn scroll_progress(&self) -> f32 {
        self.sampler.scroll.progress
    }

    #[inline]
    pub fn is_glitching(&self) -> bool {
        self.glitch.is_glitching()
    }

    /// Glitch state as of `now_ms`, applying any deadline that has already
    /// passed since the last tick.
    pub fn is_glitching_at(&mut self, now_ms: f64) -> bool {
        if !self.torn_down {
            self.poll_glitch(now_ms);
        }
        self.glitch.is_glitching()
    }

    #[inline]
    pub fn chaos(&self) -> &ChaosLevel {
        &self.chaos
    }

    #[inline]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn surface_mesh(&self) -> SurfaceMesh {
        SurfaceMesh::icosphere(self.config.surface_subdivisions)
    }

    // ---------------- Lifecycle ----------------

    /// Stop the loop and drop pending work. Safe to call any number of times;
    /// returns `true` only for the first call.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.clock.cancel();
        self.glitch.clear();
        self.pending.clear();
        log::info!("[engine] torn down after {} frames", self.clock.frame_count());
        true
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
