pub mod deferred;
pub mod style;
pub mod timing;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod gpu;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod layer;
#[cfg(target_arch = "wasm32")]
mod signals;

#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::app::Background;

    thread_local! {
        static ACTIVE: RefCell<Option<Rc<RefCell<Background>>>> = const { RefCell::new(None) };
    }

    /// WASM entry point. Sets the panic hook, initializes logging and mounts
    /// the background.
    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }
        log::info!("Folio background starting...");
        mount_background();
    }

    /// Mount the background if it is not mounted already.
    #[wasm_bindgen]
    pub fn mount_background() {
        if ACTIVE.with(|a| a.borrow().is_some()) {
            log::warn!("Background already mounted");
            return;
        }
        let seed = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
        match Background::mount(seed) {
            Ok(background) => ACTIVE.with(|a| *a.borrow_mut() = Some(background)),
            Err(e) => show_error_to_user(&format!("{e}")),
        }
    }

    /// Log the error and raise a browser alert.
    fn show_error_to_user(msg: &str) {
        log::error!("Background mount failed: {msg}");
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!("Folio background error: {msg}"));
        }
    }

    /// Tear the background down. Safe to call when nothing is mounted.
    #[wasm_bindgen]
    pub fn unmount_background() {
        if let Some(background) = ACTIVE.with(|a| a.borrow_mut().take()) {
            background.borrow_mut().unmount();
        }
    }
}
