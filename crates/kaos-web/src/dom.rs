use kaos_core::{ChaosLevel, ChaosTier, EngineConfig};
use wasm_bindgen::JsCast;
use web_sys as web;

pub const CANVAS_ID: &str = "kaos-canvas";
pub const GLITCH_TRIGGER_ID: &str = "glitch-trigger";
pub const GLITCH_FIX_ID: &str = "glitch-fix";
pub const PROGRESS_BAR_ID: &str = "scroll-progress";
pub const CHAOS_LEVEL_ID: &str = "chaos-level";
pub const SCANLINES_CLASS: &str = "scanlines";
pub const PROGRESS_VAR: &str = "--scroll-progress";
pub const REVEAL_AT_ATTR: &str = "data-reveal-at";
pub const REVEALED_ATTR: &str = "data-revealed";

/// Canvas `data-*` keys (camel-cased as the dataset exposes them) and the
/// config override each one feeds.
const CONFIG_KEYS: [(&str, &str); 5] = [
    ("particles", "particles"),
    ("seed", "seed"),
    ("subdivisions", "subdivisions"),
    ("speedGain", "speed-gain"),
    ("glitchTimeout", "glitch-timeout"),
];

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// High resolution page time in milliseconds, the same clock rAF stamps use.
#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).max(1);
        let h_px = ((rect.height() * dpr) as u32).max(1);
        if canvas.width() != w_px {
            canvas.set_width(w_px);
        }
        if canvas.height() != h_px {
            canvas.set_height(h_px);
        }
    }
    (canvas.width(), canvas.height())
}

/// Viewport size in CSS pixels, `(0, 0)` when unavailable.
pub fn viewport_size(window: &web::Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    /// Document height minus viewport height, never negative.
    pub max_scroll_y: f64,
}

pub fn scroll_metrics(window: &web::Window) -> ScrollMetrics {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let document_h = window
        .document()
        .and_then(|d| d.document_element())
        .map(|e| e.scroll_height() as f64)
        .unwrap_or(0.0);
    ScrollMetrics {
        scroll_y,
        max_scroll_y: (document_h - viewport_h).max(0.0),
    }
}

/// Engine configuration with overrides from the canvas `data-*` attributes.
/// Unparsable values are skipped; an override set that fails validation falls
/// back to the defaults as a whole.
pub fn read_config(canvas: &web::HtmlElement) -> EngineConfig {
    let defaults = EngineConfig::default();
    let dataset = canvas.dataset();
    let mut config = defaults.clone();
    for (data_key, key) in CONFIG_KEYS {
        let Some(value) = dataset.get(data_key) else {
            continue;
        };
        match config.apply_override(key, &value) {
            Ok(_) => log::info!("[config] {}={}", key, value.trim()),
            Err(e) => log::warn!("[config] ignoring override: {}", e),
        }
    }
    if let Err(e) = config.validate() {
        log::warn!("[config] overrides rejected ({}); using defaults", e);
        return defaults;
    }
    config
}

struct Reveal {
    element: web::Element,
    at: f32,
    revealed: bool,
}

/// Page-side consumers of the engine state. Each output is written only when
/// its value changes.
pub struct PageOutputs {
    root: Option<web::HtmlElement>,
    body: Option<web::HtmlElement>,
    progress_bar: Option<web::HtmlElement>,
    chaos_label: Option<web::Element>,
    reveals: Vec<Reveal>,
    last_progress: Option<f32>,
    last_glitching: Option<bool>,
    last_chaos: Option<(u8, ChaosTier)>,
}

impl PageOutputs {
    pub fn new(document: &web::Document) -> Self {
        let root = document
            .document_element()
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok());
        let progress_bar = document
            .get_element_by_id(PROGRESS_BAR_ID)
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok());
        let chaos_label = document.get_element_by_id(CHAOS_LEVEL_ID);
        let reveals = collect_reveals(document);
        log::debug!("[page] {} reveal targets", reveals.len());
        Self {
            root,
            body: document.body(),
            progress_bar,
            chaos_label,
            reveals,
            last_progress: None,
            last_glitching: None,
            last_chaos: None,
        }
    }

    pub fn apply(&mut self, progress: f32, glitching: bool, chaos: &ChaosLevel) {
        self.apply_progress(progress);
        self.apply_glitch(glitching);
        self.apply_chaos(chaos.display(), chaos.tier());
    }

    fn apply_progress(&mut self, progress: f32) {
        let progress = progress.clamp(0.0, 1.0);
        if self
            .last_progress
            .is_some_and(|last| (last - progress).abs() < 1e-4)
        {
            return;
        }
        self.last_progress = Some(progress);
        if let Some(root) = &self.root {
            let _ = root
                .style()
                .set_property(PROGRESS_VAR, &format!("{:.4}", progress));
        }
        if let Some(bar) = &self.progress_bar {
            let _ = bar
                .style()
                .set_property("width", &format!("{:.2}%", progress * 100.0));
        }
        for reveal in self.reveals.iter_mut().filter(|r| !r.revealed) {
            if progress >= reveal.at {
                let _ = reveal.element.set_attribute(REVEALED_ATTR, "true");
                reveal.revealed = true;
            }
        }
    }

    fn apply_glitch(&mut self, glitching: bool) {
        if self.last_glitching == Some(glitching) {
            return;
        }
        self.last_glitching = Some(glitching);
        if let Some(body) = &self.body {
            let _ = body
                .class_list()
                .toggle_with_force(SCANLINES_CLASS, glitching);
        }
    }

    fn apply_chaos(&mut self, display: u8, tier: ChaosTier) {
        if self.last_chaos == Some((display, tier)) {
            return;
        }
        let previous_tier = self.last_chaos.map(|(_, t)| t);
        self.last_chaos = Some((display, tier));
        let Some(label) = &self.chaos_label else {
            return;
        };
        label.set_text_content(Some(&format!("{}%", display)));
        if previous_tier != Some(tier) {
            let classes = label.class_list();
            if let Some(prev) = previous_tier {
                let _ = classes.remove_1(prev.css_class());
            }
            let _ = classes.add_1(tier.css_class());
        }
    }
}

/// Remove the glitch styling so a torn down engine leaves a calm page.
pub fn clear_scanlines(document: &web::Document) {
    if let Some(body) = document.body() {
        let _ = body.class_list().remove_1(SCANLINES_CLASS);
    }
}

fn collect_reveals(document: &web::Document) -> Vec<Reveal> {
    let Ok(nodes) = document.query_selector_all(&format!("[{}]", REVEAL_AT_ATTR)) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .filter_map(|element| {
            let raw = element.get_attribute(REVEAL_AT_ATTR)?;
            match raw.trim().parse::<f32>() {
                Ok(at) if at.is_finite() => Some(Reveal {
                    revealed: element.has_attribute(REVEALED_ATTR),
                    element,
                    at: at.clamp(0.0, 1.0),
                }),
                _ => {
                    log::warn!("[page] bad {}=\"{}\"", REVEAL_AT_ATTR, raw);
                    None
                }
            }
        })
        .collect()
}
