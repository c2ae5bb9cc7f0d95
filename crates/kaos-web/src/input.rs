use wasm_bindgen::JsCast;
use web_sys as web;

/// Client coordinates of a pointer or mouse event in CSS pixels.
#[inline]
pub fn pointer_client(ev: &web::Event) -> Option<(f32, f32)> {
    let ev = ev.dyn_ref::<web::MouseEvent>()?;
    Some((ev.client_x() as f32, ev.client_y() as f32))
}

/// `(beta, gamma)` in degrees. Either is `None` when the sensor does not
/// report it.
pub fn orientation_angles(ev: &web::Event) -> (Option<f64>, Option<f64>) {
    let Some(ev) = ev.dyn_ref::<web::DeviceOrientationEvent>() else {
        return (None, None);
    };
    let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
    (finite(ev.beta()), finite(ev.gamma()))
}
