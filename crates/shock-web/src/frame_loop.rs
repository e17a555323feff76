//! `requestAnimationFrame` loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls `on_frame(now_ms)` once per animation frame until it returns
/// `false` or the loop is stopped.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Result<Self, JsValue> {
        let running = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let reschedule = callback.clone();
        let loop_running = running.clone();
        let loop_handle = handle.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            loop_handle.set(None);
            if !loop_running.get() {
                return;
            }
            if !on_frame(now) {
                loop_running.set(false);
                return;
            }
            match request_frame(&reschedule) {
                Ok(id) => loop_handle.set(Some(id)),
                Err(err) => {
                    log::error!("requestAnimationFrame failed: {:?}", err);
                    loop_running.set(false);
                }
            }
        }) as Box<dyn FnMut(f64)>));

        handle.set(Some(request_frame(&callback)?));
        Ok(Self {
            running,
            handle,
            callback,
        })
    }

    /// Cancel the pending frame and release the callback.
    /// Must not be called from inside `on_frame`.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Dropping the closure breaks the self-reference that kept it alive.
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let borrow = callback.borrow();
    let closure = borrow
        .as_ref()
        .ok_or_else(|| JsValue::from_str("frame callback released"))?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}
