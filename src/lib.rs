#![cfg(target_arch = "wasm32")]
//! Browser front end: mounts the particle field on a canvas, drives it from
//! `requestAnimationFrame` and feeds it pointer and analyser input.

use field_core::{FieldConfig, InstantClock, Preset, RenderLoop, Signals};
use field_render::GpuSurface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;

use constants::{DEFAULT_CANVAS_ID, PRESET_ATTR};

type WebLoop = RenderLoop<GpuSurface<'static>, frame::RafScheduler, InstantClock>;

/// Everything one mounted field owns. Listeners and the frame callback hold
/// weak references to it.
pub(crate) struct FieldState {
    field: WebLoop,
    signals: Signals,
    audio: Option<audio::AudioTap>,
    canvas: web::HtmlCanvasElement,
}

impl FieldState {
    fn frame(&mut self) {
        self.field.scheduler_mut().fired();
        if !self.canvas.is_connected() {
            log::info!("canvas left the document");
            self.shutdown();
            return;
        }
        if let Some(tap) = self.audio.as_mut() {
            tap.read_into(&mut self.signals);
        }
        self.field.tick(&self.signals);
    }

    fn enable_audio(&mut self) {
        if let Some(tap) = &self.audio {
            tap.resume();
            return;
        }
        if !self.field.config().audio_reactive {
            log::info!("preset is not audio reactive; audio stays off");
            return;
        }
        match audio::AudioTap::new() {
            Ok(tap) => self.audio = Some(tap),
            Err(e) => log::error!("audio init failed: {e:?}"),
        }
    }

    fn set_audio_audible(&mut self, audible: bool) {
        match self.audio.as_mut() {
            Some(tap) => tap.set_audible(audible),
            None => log::debug!("audio not enabled; ignoring audible={audible}"),
        }
    }

    fn toggle_audible(&mut self) {
        let audible = self.audio.as_ref().is_some_and(|t| t.is_audible());
        self.set_audio_audible(!audible);
    }

    fn shutdown(&mut self) {
        self.field.teardown();
        self.audio = None;
        self.signals.clear_amplitude();
    }
}

/// Handle returned to JavaScript for one mounted field.
#[wasm_bindgen]
pub struct FieldHandle {
    state: Rc<RefCell<FieldState>>,
    listeners: Vec<events::Listener>,
}

#[wasm_bindgen]
impl FieldHandle {
    /// Start the analyser drone. Call from a user gesture so the context may run.
    pub fn enable_audio(&self) {
        self.with_state(FieldState::enable_audio);
    }

    pub fn set_audio_audible(&self, audible: bool) {
        self.with_state(|s| s.set_audio_audible(audible));
    }

    pub fn is_running(&self) -> bool {
        self.state
            .try_borrow()
            .map(|s| s.field.is_running())
            .unwrap_or(false)
    }

    /// Tear the field down and detach all listeners. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.listeners.clear();
        self.with_state(FieldState::shutdown);
    }
}

impl FieldHandle {
    fn with_state(&self, f: impl FnOnce(&mut FieldState)) {
        match self.state.try_borrow_mut() {
            Ok(mut s) => f(&mut s),
            Err(_) => log::warn!("field state busy; call ignored"),
        }
    }
}

async fn mount(canvas_id: &str, preset: Preset) -> anyhow::Result<FieldHandle> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let viewport = dom::sync_canvas_backing_size(&canvas);

    let surface = GpuSurface::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), viewport).await?;
    let slot = frame::CallbackSlot::default();
    let field = RenderLoop::new(
        FieldConfig::preset(preset),
        viewport,
        surface,
        frame::RafScheduler::new(slot.clone()),
        InstantClock::new(),
    )?;

    let state = Rc::new(RefCell::new(FieldState {
        field,
        signals: Signals::default(),
        audio: None,
        canvas: canvas.clone(),
    }));
    frame::install_frame_callback(&slot, Rc::downgrade(&state));
    state.borrow_mut().field.start(&mut StdRng::from_entropy())?;

    let listeners = events::wire_field_listeners(&canvas, Rc::downgrade(&state));
    log::info!("mounted {preset} field on #{canvas_id}");
    Ok(FieldHandle { state, listeners })
}

/// Mount a field on `<canvas id=canvas_id>`. `preset` is "ambient" or "neural".
#[wasm_bindgen]
pub async fn mount_field(canvas_id: String, preset: Option<String>) -> Result<FieldHandle, JsValue> {
    let preset = match preset.as_deref() {
        Some(name) => name
            .parse::<Preset>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => Preset::default(),
    };
    mount(&canvas_id, preset).await.map_err(|e| {
        log::error!("mount_field: {e:?}");
        JsValue::from_str(&format!("{e:#}"))
    })
}

thread_local! {
    static AUTO_FIELD: RefCell<Option<FieldHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("neural-field-web starting");

    let Some(canvas) = dom::window_document().and_then(|d| d.get_element_by_id(DEFAULT_CANVAS_ID))
    else {
        log::info!("no #{DEFAULT_CANVAS_ID}; waiting for mount_field");
        return Ok(());
    };
    let preset = canvas
        .get_attribute(PRESET_ATTR)
        .and_then(|p| match p.parse::<Preset>() {
            Ok(preset) => Some(preset),
            Err(e) => {
                log::warn!("{e}; using the default preset");
                None
            }
        })
        .unwrap_or_default();

    spawn_local(async move {
        match mount(DEFAULT_CANVAS_ID, preset).await {
            Ok(handle) => AUTO_FIELD.with(|slot| *slot.borrow_mut() = Some(handle)),
            Err(e) => log::error!("init error: {:?}", e),
        }
    });
    Ok(())
}
