//! Desktop preview of the visual engine.
//!
//! The mouse wheel scrolls a virtual page a few screens tall, the cursor
//! drives the pointer signal, `G` triggers a glitch and `F` clears it. The
//! window title carries the chaos readout.

use instant::Instant;
use kaos_core::{ChaosTier, EngineConfig, EngineEvent, KaosEngine, LoopToken};
use kaos_render::GpuState;
use std::sync::Arc;
use winit::dpi::LogicalSize;
use winit::event::*;
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowBuilder};

/// Height of the virtual page in viewport heights.
const VIRTUAL_PAGE_SCREENS: f64 = 6.0;
/// Pixels scrolled per wheel line.
const WHEEL_LINE_PX: f64 = 48.0;
/// Interval callbacks missed while the window was stalled are dropped past this.
const MAX_CATCH_UP: u32 = 8;

/// Fixed-period timer driven from the event loop, standing in for `setInterval`.
struct Ticker {
    period_ms: f64,
    next_ms: f64,
}

impl Ticker {
    fn new(period_ms: u32, start_ms: f64) -> Self {
        let period_ms = (period_ms as f64).max(1.0);
        Self {
            period_ms,
            next_ms: start_ms + period_ms,
        }
    }

    /// Deadlines passed since the last call, oldest first.
    fn due(&mut self, now_ms: f64) -> Vec<f64> {
        let mut fired = Vec::new();
        while self.next_ms <= now_ms {
            if fired.len() as u32 == MAX_CATCH_UP {
                self.next_ms = now_ms + self.period_ms;
                break;
            }
            fired.push(self.next_ms);
            self.next_ms += self.period_ms;
        }
        fired
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct VirtualScroll {
    y: f64,
}

impl VirtualScroll {
    fn max(viewport_h: f64) -> f64 {
        ((VIRTUAL_PAGE_SCREENS - 1.0) * viewport_h).max(0.0)
    }

    fn scroll_by(&mut self, delta_px: f64, viewport_h: f64) {
        self.y = (self.y + delta_px).clamp(0.0, Self::max(viewport_h));
    }
}

fn wheel_pixels(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -(y as f64) * WHEEL_LINE_PX,
        MouseScrollDelta::PixelDelta(p) => -p.y,
    }
}

struct Preview {
    window: Arc<Window>,
    engine: KaosEngine,
    gpu: Option<GpuState<'static>>,
    token: LoopToken,
    start: Instant,
    scroll: VirtualScroll,
    decay: Ticker,
    supervisor: Ticker,
    title: Option<(u8, ChaosTier, bool)>,
}

impl Preview {
    fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let start = Instant::now();
        let mut engine = KaosEngine::new(EngineConfig::default(), 0.0)?;
        let token = engine
            .start_loop()
            .ok_or_else(|| anyhow::anyhow!("engine already torn down"))?;
        let size = window.inner_size();
        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            size.width,
            size.height,
            &engine.surface_mesh(),
            engine.particles().particles(),
        ))?;
        let decay = Ticker::new(engine.config().decay_interval_ms, 0.0);
        let supervisor = Ticker::new(engine.config().glitch_supervisor_interval_ms, 0.0);
        Ok(Self {
            window,
            engine,
            gpu: Some(gpu),
            token,
            start,
            scroll: VirtualScroll::default(),
            decay,
            supervisor,
            title: None,
        })
    }

    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    fn viewport_h(&self) -> f64 {
        self.window.inner_size().height as f64
    }

    fn on_window_event(&mut self, event: WindowEvent, elwt: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
                let h = size.height as f64;
                self.scroll.scroll_by(0.0, h);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = self.window.inner_size();
                self.engine.pointer_move(
                    position.x as f32,
                    position.y as f32,
                    size.width as f32,
                    size.height as f32,
                );
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let h = self.viewport_h();
                self.scroll.scroll_by(wheel_pixels(delta), h);
                let now = self.now_ms();
                self.engine
                    .scroll_sample(self.scroll.y, VirtualScroll::max(h), now);
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::KeyG) => {
                        let now = self.now_ms();
                        self.engine.trigger_glitch(now);
                    }
                    PhysicalKey::Code(KeyCode::KeyF) => {
                        self.engine.clear_glitch();
                    }
                    PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn run_intervals(&mut self, now_ms: f64) {
        for at in self.decay.due(now_ms) {
            self.engine.decay_tick(at);
        }
        for at in self.supervisor.due(now_ms) {
            self.engine.supervisor_tick(at);
        }
    }

    fn frame(&mut self, elwt: &EventLoopWindowTarget<()>) {
        let now = self.now_ms();
        self.run_intervals(now);
        let Some(output) = self.engine.frame(self.token, now) else {
            return;
        };
        for ev in &output.events {
            match ev {
                EngineEvent::GlitchStarted => log::info!("[preview] glitch"),
                EngineEvent::GlitchEnded => log::info!("[preview] glitch cleared"),
            }
        }

        if let Some(gpu) = self.gpu.as_mut() {
            match gpu.render(&output) {
                Ok(()) => self.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("render error: {:?}", e),
            }
        }
        self.update_title(output.signals.glitching);
    }

    fn update_title(&mut self, glitching: bool) {
        let chaos = self.engine.chaos();
        let key = (chaos.display(), chaos.tier(), glitching);
        if self.title == Some(key) {
            return;
        }
        self.title = Some(key);
        let (level, tier, glitching) = key;
        self.window.set_title(&format!(
            "K.A.O.S. | chaos {}% ({:?}){}",
            level,
            tier,
            if glitching { " | GLITCH" } else { "" }
        ));
    }

    fn shutdown(&mut self) {
        self.engine.teardown();
        if let Some(gpu) = self.gpu.take() {
            gpu.destroy();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("K.A.O.S.")
            .with_inner_size(LogicalSize::new(1280.0, 800.0))
            .build(&event_loop)?,
    );
    let mut preview = Preview::new(window)?;
    log::info!("[preview] wheel scrolls, G glitches, F clears, Esc quits");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => preview.on_window_event(event, elwt),
        Event::AboutToWait => preview.frame(elwt),
        Event::LoopExiting => preview.shutdown(),
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_fires_once_per_period() {
        let mut t = Ticker::new(50, 0.0);
        assert!(t.due(49.0).is_empty());
        assert_eq!(t.due(50.0), vec![50.0]);
        assert_eq!(t.due(160.0), vec![100.0, 150.0]);
        assert!(t.due(160.0).is_empty());
    }

    #[test]
    fn ticker_drops_long_stalls() {
        let mut t = Ticker::new(50, 0.0);
        let fired = t.due(10_000.0);
        assert_eq!(fired.len() as u32, MAX_CATCH_UP);
        assert!(t.due(10_000.0).is_empty());
        assert_eq!(t.due(10_050.0), vec![10_050.0]);
    }

    #[test]
    fn virtual_scroll_stays_on_the_page() {
        let mut s = VirtualScroll::default();
        s.scroll_by(-100.0, 800.0);
        assert_eq!(s.y, 0.0);
        s.scroll_by(1e9, 800.0);
        assert_eq!(s.y, VirtualScroll::max(800.0));
        // Shrinking the window pulls the offset back inside the page.
        s.scroll_by(0.0, 400.0);
        assert_eq!(s.y, VirtualScroll::max(400.0));
    }

    #[test]
    fn wheel_down_scrolls_forward() {
        assert!(wheel_pixels(MouseScrollDelta::LineDelta(0.0, -1.0)) > 0.0);
        assert_eq!(
            wheel_pixels(MouseScrollDelta::LineDelta(0.0, 1.0)),
            -WHEEL_LINE_PX
        );
    }
}
