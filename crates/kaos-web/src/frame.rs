use crate::dom::PageOutputs;
use kaos_core::{EngineEvent, KaosEngine, LoopToken};
use kaos_render::GpuState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: Rc<RefCell<KaosEngine>>,
    pub gpu: Rc<RefCell<Option<GpuState<'static>>>>,
    pub canvas: web::HtmlCanvasElement,
    pub page: PageOutputs,
    pub token: LoopToken,
}

impl FrameContext {
    /// One display refresh. Returns `false` once the loop should stop.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let Some(output) = self.engine.borrow_mut().frame(self.token, now_ms) else {
            return false;
        };
        for ev in &output.events {
            match ev {
                EngineEvent::GlitchStarted => log::debug!("[frame] glitch started"),
                EngineEvent::GlitchEnded => log::debug!("[frame] glitch ended"),
            }
        }

        if let Some(gpu) = self.gpu.borrow_mut().as_mut() {
            gpu.resize(self.canvas.width(), self.canvas.height());
            match gpu.render(&output) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::Timeout) => log::debug!("[frame] surface timeout"),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        let engine = self.engine.borrow();
        self.page.apply(
            output.signals.scroll.progress,
            output.signals.glitching,
            engine.chaos(),
        );
        true
    }
}

/// Handle on the running requestAnimationFrame chain.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    web::window()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

pub fn start_loop(ctx: FrameContext) -> FrameLoop {
    let ctx = Rc::new(RefCell::new(ctx));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        raf_clone.set(None);
        if !ctx.borrow_mut().frame(now_ms) {
            return;
        }
        if let Some(cb) = tick_clone.borrow().as_ref() {
            raf_clone.set(request_frame(cb));
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = tick.borrow().as_ref() {
        raf_id.set(request_frame(cb));
    }
    FrameLoop { raf_id, tick }
}

impl FrameLoop {
    /// Cancel the pending request and release the callback with everything it
    /// captured.
    pub fn cancel(self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}
