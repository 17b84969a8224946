use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use folio_core::constants::IDLE_FALLBACK_DELAY_MS;
use folio_scene::{Scheduler, Task, TaskHandle, When};
use wasm_bindgen::prelude::*;

use crate::deferred::DeferredDrop;

/// Callback invoked when a scheduled task fires.
pub type Deliver = Rc<dyn Fn(Task, TaskHandle)>;

enum HostTimer {
    Idle(u32),
    Timeout(i32),
}

struct Entry {
    timer: HostTimer,
    _callback: Closure<dyn FnMut()>,
}

/// `Scheduler` over `requestIdleCallback` (with a timeout) and `setTimeout`.
///
/// A fired entry cannot be dropped during delivery because its closure is
/// still on the stack. It is parked instead and released by a zero-delay
/// sweep timeout once the callback has returned.
pub struct BrowserScheduler {
    deliver: Deliver,
    next_id: u32,
    entries: HashMap<TaskHandle, Entry>,
    retired: Rc<RefCell<DeferredDrop<Entry>>>,
    sweep: Closure<dyn FnMut()>,
    sweep_timer: Rc<Cell<Option<i32>>>,
}

impl BrowserScheduler {
    pub fn new(deliver: Deliver) -> Self {
        let retired = Rc::new(RefCell::new(DeferredDrop::new()));
        let sweep_timer = Rc::new(Cell::new(None));
        let sweep = {
            let retired = retired.clone();
            let sweep_timer = sweep_timer.clone();
            Closure::<dyn FnMut()>::new(move || {
                sweep_timer.set(None);
                let released = retired.borrow_mut().sweep();
                log::trace!("Released {released} fired task callbacks");
            })
        };
        Self {
            deliver,
            next_id: 1,
            entries: HashMap::new(),
            retired,
            sweep,
            sweep_timer,
        }
    }

    /// Mark a task as delivered. Must be called from its own callback.
    pub fn retire(&mut self, handle: TaskHandle) {
        let Some(entry) = self.entries.remove(&handle) else {
            return;
        };
        if self.retired.borrow_mut().park(entry) {
            self.arm_sweep();
        }
    }

    fn arm_sweep(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.sweep.as_ref().unchecked_ref(),
            0,
        ) {
            Ok(id) => self.sweep_timer.set(Some(id)),
            Err(e) => log::warn!("Failed to arm callback sweep: {e:?}"),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    fn arm(
        window: &web_sys::Window,
        when: When,
        callback: &Closure<dyn FnMut()>,
    ) -> Result<HostTimer, JsValue> {
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        match when {
            When::IdleOrDeadline { deadline_ms } if has_idle_callback(window) => {
                let options = web_sys::IdleRequestOptions::new();
                options.set_timeout(deadline_ms);
                window
                    .request_idle_callback_with_options(function, &options)
                    .map(HostTimer::Idle)
            }
            When::IdleOrDeadline { .. } => window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    function,
                    IDLE_FALLBACK_DELAY_MS as i32,
                )
                .map(HostTimer::Timeout),
            When::After { delay_ms } => window
                .set_timeout_with_callback_and_timeout_and_arguments_0(function, delay_ms as i32)
                .map(HostTimer::Timeout),
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, task: Task, when: When) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;

        let deliver = self.deliver.clone();
        let callback = Closure::<dyn FnMut()>::new(move || deliver(task, handle));

        let Some(window) = web_sys::window() else {
            log::error!("No window; {task:?} will never run");
            return handle;
        };

        match Self::arm(&window, when, &callback) {
            Ok(timer) => {
                self.entries.insert(
                    handle,
                    Entry {
                        timer,
                        _callback: callback,
                    },
                );
            }
            Err(e) => log::error!("Failed to schedule {task:?}: {e:?}"),
        }
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let Some(entry) = self.entries.remove(&handle) else {
            return;
        };
        if let Some(window) = web_sys::window() {
            match entry.timer {
                HostTimer::Idle(id) => window.cancel_idle_callback(id),
                HostTimer::Timeout(id) => window.clear_timeout_with_handle(id),
            }
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        let handles: Vec<TaskHandle> = self.entries.keys().copied().collect();
        for handle in handles {
            self.cancel(handle);
        }
        if let (Some(id), Some(window)) = (self.sweep_timer.take(), web_sys::window()) {
            window.clear_timeout_with_handle(id);
        }
    }
}

fn has_idle_callback(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("requestIdleCallback")).unwrap_or(false)
}

/// Host clock in milliseconds, same time base as animation-frame timestamps.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
