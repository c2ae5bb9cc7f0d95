#![cfg(target_arch = "wasm32")]
//! Browser front-end: wires page events into a [`KaosEngine`], drives it from
//! requestAnimationFrame and renders through WebGPU on `#kaos-canvas`.

pub mod dom;
pub mod events;
mod frame;
pub mod input;

use events::{Interval, ListenerSet};
use frame::{FrameContext, FrameLoop};
use kaos_core::KaosEngine;
use kaos_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct App {
    engine: Rc<RefCell<KaosEngine>>,
    gpu: Rc<RefCell<Option<GpuState<'static>>>>,
    listeners: ListenerSet,
    intervals: Vec<Interval>,
    frame_loop: Option<FrameLoop>,
}

impl App {
    fn teardown(mut self) {
        self.engine.borrow_mut().teardown();
        let detached = self.listeners.clear();
        for interval in self.intervals.drain(..) {
            interval.cancel();
        }
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }
        if let Some(gpu) = self.gpu.borrow_mut().take() {
            gpu.destroy();
        }
        if let Some(document) = dom::window_document() {
            dom::clear_scanlines(&document);
        }
        log::info!("[app] teardown complete ({} listeners removed)", detached);
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_engine<R>(f: impl FnOnce(&mut KaosEngine) -> R) -> Option<R> {
    APP.with(|app| {
        app.borrow()
            .as_ref()
            .map(|app| f(&mut app.engine.borrow_mut()))
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("kaos-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(dom::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", dom::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let (width, height) = dom::sync_canvas_backing_size(&canvas);
    let config = dom::read_config(&canvas);
    let engine = KaosEngine::new(config, dom::now_ms())?;
    let mesh = engine.surface_mesh();
    let particles = engine.particles().particles().to_vec();
    let engine = Rc::new(RefCell::new(engine));

    let listeners = events::wire_inputs(&engine, &window, &document, &canvas);
    let intervals = events::start_intervals(&engine, &window);
    let token = engine
        .borrow_mut()
        .start_loop()
        .ok_or_else(|| anyhow::anyhow!("engine torn down before the loop started"))?;

    let gpu: Rc<RefCell<Option<GpuState<'static>>>> = Rc::new(RefCell::new(None));
    let frame_loop = frame::start_loop(FrameContext {
        engine: engine.clone(),
        gpu: gpu.clone(),
        canvas: canvas.clone(),
        page: dom::PageOutputs::new(&document),
        token,
    });

    let previous = APP.with(|app| {
        app.borrow_mut().replace(App {
            engine: engine.clone(),
            gpu: gpu.clone(),
            listeners,
            intervals,
            frame_loop: Some(frame_loop),
        })
    });
    if let Some(previous) = previous {
        log::warn!("[app] replacing a running instance");
        previous.teardown();
    }

    // The page works without a GPU; rendering joins once the device is ready.
    match GpuState::new(
        wgpu::SurfaceTarget::Canvas(canvas),
        width,
        height,
        &mesh,
        &particles,
    )
    .await
    {
        Ok(state) => {
            if engine.borrow().is_torn_down() {
                log::info!("[gpu] ready after teardown; releasing");
                state.destroy();
            } else {
                *gpu.borrow_mut() = Some(state);
                log::info!("[gpu] ready");
            }
        }
        Err(e) => log::warn!("[gpu] WebGPU unavailable, continuing without rendering: {:?}", e),
    }
    Ok(())
}

/// Remove every listener, stop the loop and intervals, release the GPU.
/// Calling it again does nothing.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(app) = APP.with(|app| app.borrow_mut().take()) {
        app.teardown();
    }
}

#[wasm_bindgen(js_name = triggerGlitch)]
pub fn trigger_glitch() -> bool {
    with_engine(|e| e.trigger_glitch(dom::now_ms())).unwrap_or(false)
}

#[wasm_bindgen(js_name = clearGlitch)]
pub fn clear_glitch() -> bool {
    with_engine(|e| e.clear_glitch()).unwrap_or(false)
}

#[wasm_bindgen(js_name = scrollProgress)]
pub fn scroll_progress() -> f32 {
    with_engine(|e| e.scroll_progress()).unwrap_or(0.0)
}

#[wasm_bindgen(js_name = isGlitching)]
pub fn is_glitching() -> bool {
    with_engine(|e| e.is_glitching_at(dom::now_ms())).unwrap_or(false)
}

#[wasm_bindgen(js_name = chaosLevel)]
pub fn chaos_level() -> u8 {
    with_engine(|e| e.chaos().display()).unwrap_or(0)
}
