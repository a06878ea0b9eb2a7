// Pure input helpers shared by the DOM listeners; no web-sys types here so
// they can be exercised on the host.

use crate::constants::{KEY_ENABLE_AUDIO, KEY_TOGGLE_AUDIBLE};
use field_core::{PointerState, Viewport};

/// Bounding rectangle of the canvas in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CssRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CssRect {
    pub fn viewport(&self, device_pixel_ratio: f32) -> Viewport {
        Viewport::new(
            css_px(self.width),
            css_px(self.height),
            device_pixel_ratio,
        )
    }
}

#[inline]
fn css_px(v: f32) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round() as u32
    } else {
        0
    }
}

/// Normalize a client-space pointer position against the canvas rectangle.
#[inline]
pub fn pointer_from_client(client_x: f32, client_y: f32, rect: CssRect) -> PointerState {
    let vp = Viewport::new(css_px(rect.width), css_px(rect.height), 1.0);
    PointerState::from_viewport_px(client_x - rect.left, client_y - rect.top, vp)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleAudible,
    EnableAudio,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    if key.eq_ignore_ascii_case(KEY_TOGGLE_AUDIBLE) {
        Some(KeyAction::ToggleAudible)
    } else if key.eq_ignore_ascii_case(KEY_ENABLE_AUDIO) {
        Some(KeyAction::EnableAudio)
    } else {
        None
    }
}
