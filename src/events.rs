use crate::dom;
use crate::input::{self, KeyAction};
use crate::FieldState;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Registered DOM listener, removed again when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new<E: JsCast + 'static>(
        target: &web::EventTarget,
        kind: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                kind,
                closure,
            }),
            Err(e) => {
                log::warn!("could not add {kind} listener: {:?}", e);
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Run `f` against the field state if it is still alive and not borrowed.
fn with_state(state: &Weak<RefCell<FieldState>>, f: impl FnOnce(&mut FieldState)) {
    if let Some(state) = state.upgrade() {
        if let Ok(mut guard) = state.try_borrow_mut() {
            f(&mut guard);
        }
    }
}

/// Pointer, resize, keyboard and pagehide listeners for one mounted field.
pub fn wire_field_listeners(
    canvas: &web::HtmlCanvasElement,
    state: Weak<RefCell<FieldState>>,
) -> Vec<Listener> {
    let Some(window) = web::window() else {
        return Vec::new();
    };
    let target: &web::EventTarget = window.as_ref();
    let mut listeners = Vec::with_capacity(4);

    let st = state.clone();
    let canvas_move = canvas.clone();
    listeners.extend(Listener::new(target, "pointermove", move |ev: web::PointerEvent| {
        let rect = dom::canvas_rect(&canvas_move);
        let pointer = input::pointer_from_client(ev.client_x() as f32, ev.client_y() as f32, rect);
        with_state(&st, |s| s.signals.set_pointer(pointer));
    }));

    let st = state.clone();
    let canvas_resize = canvas.clone();
    listeners.extend(Listener::new(target, "resize", move |_: web::Event| {
        let viewport = dom::sync_canvas_backing_size(&canvas_resize);
        with_state(&st, |s| s.field.resize(viewport));
    }));

    let st = state.clone();
    listeners.extend(Listener::new(target, "keydown", move |ev: web::KeyboardEvent| {
        if ev.repeat() {
            return;
        }
        match input::key_action(&ev.key()) {
            Some(KeyAction::ToggleAudible) => with_state(&st, FieldState::toggle_audible),
            Some(KeyAction::EnableAudio) => with_state(&st, FieldState::enable_audio),
            None => {}
        }
    }));

    listeners.extend(Listener::new(target, "pagehide", move |_: web::Event| {
        with_state(&state, FieldState::shutdown);
    }));

    listeners
}
