use folio_core::{EnvironmentSignals, SignalSource};
use wasm_bindgen::JsValue;

/// Reads capability signals from `navigator` and `window`.
pub struct BrowserSignals;

impl SignalSource for BrowserSignals {
    fn sample(&self) -> EnvironmentSignals {
        let Some(window) = web_sys::window() else {
            log::warn!("No window; using default signals");
            return EnvironmentSignals::default();
        };
        let navigator = window.navigator();

        let cores = navigator.hardware_concurrency();
        let logical_cores = (cores.is_finite() && cores >= 1.0).then_some(cores as u32);

        // Chromium-only; absent elsewhere.
        let device_memory_gb = js_sys::Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
            .ok()
            .and_then(|v| v.as_f64());

        let dimension = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };

        EnvironmentSignals {
            user_agent: navigator.user_agent().unwrap_or_default(),
            logical_cores,
            device_memory_gb,
            device_pixel_ratio: window.device_pixel_ratio() as f32,
            viewport_width: dimension(window.inner_width()),
            viewport_height: dimension(window.inner_height()),
        }
    }
}
