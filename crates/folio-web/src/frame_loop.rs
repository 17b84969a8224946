use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame loop with an explicit stop.
///
/// The closure is created once and re-registered each frame. `stop` cancels
/// the outstanding request and drops the closure, which also breaks the
/// closure's reference to its own cell.
pub struct FrameLoop {
    closure: RafClosure,
    request_id: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            closure: Rc::new(RefCell::new(None)),
            request_id: Rc::new(Cell::new(None)),
        }
    }

    /// Start calling `on_frame(timestamp_ms)` once per display refresh until
    /// it returns false or `stop` is called.
    pub fn start(&self, mut on_frame: impl FnMut(f64) -> bool + 'static) {
        let closure_clone = self.closure.clone();
        let request_id = self.request_id.clone();

        *self.closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            request_id.set(None);
            if !on_frame(timestamp) {
                log::debug!("Frame loop finished");
                return;
            }
            request_id.set(request_frame(&closure_clone));
        }) as Box<dyn FnMut(f64)>));

        // Kick off first frame
        self.request_id.set(request_frame(&self.closure));
    }

    pub fn is_running(&self) -> bool {
        self.request_id.get().is_some()
    }

    /// Cancel the pending frame and release the callback.
    pub fn stop(&self) {
        if let Some(id) = self.request_id.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {e:?}");
                }
            }
        }
        self.closure.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(closure: &RafClosure) -> Option<i32> {
    let window = web_sys::window()?;
    let borrowed = closure.borrow();
    let callback = borrowed.as_ref()?;
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("rAF registration failed: {e:?}");
            None
        }
    }
}
