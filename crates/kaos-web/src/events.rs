use crate::dom;
use crate::input;
use kaos_core::KaosEngine;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A DOM listener that owns its closure and can take itself off the target.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("[events] could not listen for {}: {:?}", kind, e);
            return None;
        }
        Some(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    pub fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn push(&mut self, listener: Option<Listener>) {
        self.listeners.extend(listener);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Detach everything. Returns how many listeners were removed; a second
    /// call removes nothing.
    pub fn clear(&mut self) -> usize {
        let n = self.listeners.len();
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        n
    }
}

/// `setInterval` handle that keeps its callback alive until cancelled.
pub struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn every(
        window: &web::Window,
        period_ms: u32,
        handler: impl FnMut() + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms.min(i32::MAX as u32) as i32,
        ) {
            Ok(id) => Some(Self {
                id,
                _closure: closure,
            }),
            Err(e) => {
                log::warn!("[events] setInterval({} ms) failed: {:?}", period_ms, e);
                None
            }
        }
    }

    pub fn cancel(self) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(self.id);
        }
    }
}

/// Feed the window's current scroll position to the engine.
pub fn sample_scroll(engine: &mut KaosEngine, window: &web::Window, now_ms: f64) {
    let m = dom::scroll_metrics(window);
    engine.scroll_sample(m.scroll_y, m.max_scroll_y, now_ms);
}

/// Hook every page input up to the engine.
pub fn wire_inputs(
    engine: &Rc<RefCell<KaosEngine>>,
    window: &web::Window,
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
) -> ListenerSet {
    let mut set = ListenerSet::default();

    {
        let engine = engine.clone();
        let win = window.clone();
        set.push(Listener::attach(window, "pointermove", true, move |ev| {
            let Some((x, y)) = input::pointer_client(&ev) else {
                return;
            };
            let (w, h) = dom::viewport_size(&win);
            engine.borrow_mut().pointer_move(x, y, w, h);
        }));
    }
    {
        let engine = engine.clone();
        let win = window.clone();
        set.push(Listener::attach(window, "scroll", true, move |ev| {
            sample_scroll(&mut engine.borrow_mut(), &win, ev.time_stamp());
        }));
    }
    // A restored scroll position is picked up before the first scroll event.
    sample_scroll(&mut engine.borrow_mut(), window, dom::now_ms());
    {
        let engine = engine.clone();
        set.push(Listener::attach(window, "deviceorientation", true, move |ev| {
            let (beta, gamma) = input::orientation_angles(&ev);
            engine.borrow_mut().orientation(beta, gamma);
        }));
    }
    {
        let canvas = canvas.clone();
        set.push(Listener::attach(window, "resize", true, move |_| {
            let (w, h) = dom::sync_canvas_backing_size(&canvas);
            log::debug!("[events] canvas {}x{}", w, h);
        }));
    }

    match document.get_element_by_id(dom::GLITCH_TRIGGER_ID) {
        Some(el) => {
            let engine = engine.clone();
            set.push(Listener::attach(&el, "mouseenter", false, move |_| {
                engine.borrow_mut().trigger_glitch(dom::now_ms());
            }));
        }
        None => log::debug!("[events] no #{}", dom::GLITCH_TRIGGER_ID),
    }
    match document.get_element_by_id(dom::GLITCH_FIX_ID) {
        Some(el) => {
            let engine = engine.clone();
            set.push(Listener::attach(&el, "click", false, move |_| {
                engine.borrow_mut().clear_glitch();
            }));
        }
        None => log::debug!("[events] no #{}", dom::GLITCH_FIX_ID),
    }

    log::info!("[events] {} listeners attached", set.len());
    set
}

/// Scroll speed decay and the spontaneous glitch supervisor.
pub fn start_intervals(engine: &Rc<RefCell<KaosEngine>>, window: &web::Window) -> Vec<Interval> {
    let (decay_ms, supervisor_ms) = {
        let e = engine.borrow();
        (
            e.config().decay_interval_ms,
            e.config().glitch_supervisor_interval_ms,
        )
    };
    let decay = {
        let engine = engine.clone();
        Interval::every(window, decay_ms, move || {
            engine.borrow_mut().decay_tick(dom::now_ms());
        })
    };
    let supervisor = {
        let engine = engine.clone();
        Interval::every(window, supervisor_ms, move || {
            engine.borrow_mut().supervisor_tick(dom::now_ms());
        })
    };
    decay.into_iter().chain(supervisor).collect()
}
