use crate::FieldState;
use field_core::FrameScheduler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Shared slot holding the requestAnimationFrame callback.
pub type CallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules the frame callback with `requestAnimationFrame`.
pub struct RafScheduler {
    slot: CallbackSlot,
    handle: Option<i32>,
}

impl RafScheduler {
    pub fn new(slot: CallbackSlot) -> Self {
        Self { slot, handle: None }
    }

    /// The pending request has fired and can no longer be cancelled.
    pub fn fired(&mut self) {
        self.handle = None;
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        let slot = self.slot.borrow();
        let Some(cb) = slot.as_ref() else {
            log::trace!("frame requested before the callback was installed");
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.handle = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel_frame(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
    }
}

/// Install the per-frame callback. It only holds a weak reference, so
/// dropping the field state ends the loop without a reference cycle.
pub fn install_frame_callback(slot: &CallbackSlot, state: Weak<RefCell<FieldState>>) {
    let cb = Closure::wrap(Box::new(move || {
        let Some(state) = state.upgrade() else {
            log::trace!("frame after field was dropped");
            return;
        };
        let Ok(mut guard) = state.try_borrow_mut() else {
            log::trace!("frame skipped: field state busy");
            return;
        };
        guard.frame();
    }) as Box<dyn FnMut()>);
    *slot.borrow_mut() = Some(cb);
}
