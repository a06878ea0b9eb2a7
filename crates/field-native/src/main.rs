use std::sync::{Arc, Mutex};

use clap::Parser;
use field_core::{
    FieldConfig, FrameScheduler, InstantClock, LinkStrategy, PointerState, Preset, RenderLoop,
    Signals, TickOutcome, Viewport,
};
use field_render::GpuSurface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

mod audio;

#[derive(Parser, Debug)]
#[command(name = "field-native", about = "Particle field backdrop in a desktop window")]
struct Args {
    /// Field preset: ambient or neural
    #[arg(long, default_value_t = Preset::Neural)]
    preset: Preset,
    /// Seed for reproducible fields; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Feed the default microphone into audio-reactive presets
    #[arg(long)]
    audio: bool,
    /// Build links with the spatial grid instead of the pairwise scan
    #[arg(long)]
    grid_links: bool,
    #[arg(long, default_value_t = 1280)]
    width: u32,
    #[arg(long, default_value_t = 800)]
    height: u32,
}

impl Args {
    fn field_config(&self) -> FieldConfig {
        let strategy = if self.grid_links {
            LinkStrategy::Grid
        } else {
            LinkStrategy::Quadratic
        };
        FieldConfig::preset(self.preset).with_link_strategy(strategy)
    }
}

/// Redraw requests stand in for animation frames.
struct WindowScheduler {
    window: Arc<Window>,
    pending: bool,
}

impl WindowScheduler {
    /// Consume the pending request. False for redraws the loop did not ask for.
    fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.window.request_redraw();
    }

    fn cancel_frame(&mut self) {
        self.pending = false;
    }
}

type NativeLoop = RenderLoop<GpuSurface<'static>, WindowScheduler, InstantClock>;

fn window_viewport(window: &Window) -> Viewport {
    let scale = window.scale_factor();
    let logical = window.inner_size().to_logical::<f64>(scale);
    Viewport::new(
        logical.width.round() as u32,
        logical.height.round() as u32,
        scale as f32,
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();
    let args = Args::parse();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(format!("neural-field ({})", args.preset))
            .with_inner_size(LogicalSize::new(args.width, args.height))
            .build(&event_loop)?,
    );

    let config = args.field_config();
    let tap: audio::SharedTap = Arc::new(Mutex::new(audio::AmplitudeTap::new(
        audio::WINDOW_SAMPLES,
    )));
    let input_stream = if args.audio && config.audio_reactive {
        audio::start_input(Arc::clone(&tap))
    } else {
        if args.audio {
            log::info!("{} preset ignores audio; microphone stays closed", args.preset);
        }
        None
    };

    let viewport = window_viewport(&window);
    let surface = pollster::block_on(GpuSurface::new(Arc::clone(&window), viewport))?;
    let scheduler = WindowScheduler {
        window: Arc::clone(&window),
        pending: false,
    };
    let mut field: NativeLoop =
        RenderLoop::new(config, viewport, surface, scheduler, InstantClock::new())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    field.start(&mut rng)?;

    let mut signals = Signals::default();
    let mut window_buf = Vec::with_capacity(audio::WINDOW_SAMPLES);
    let listen = input_stream.is_some();

    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run(move |event, elwt| {
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                field.teardown();
                elwt.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                field.resize(window_viewport(&window));
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(window.scale_factor());
                signals.set_pointer(PointerState::from_viewport_px(
                    logical.x,
                    logical.y,
                    field.viewport(),
                ));
            }
            WindowEvent::RedrawRequested => {
                if !field.scheduler_mut().take_pending() {
                    return;
                }
                if listen {
                    let full = tap
                        .lock()
                        .map(|t| t.snapshot(&mut window_buf))
                        .unwrap_or(false);
                    if full {
                        if let Err(e) = signals.push_amplitude(&window_buf) {
                            log::debug!("amplitude frame dropped: {e}");
                        }
                    }
                }
                if field.tick(&signals) == TickOutcome::Stopped {
                    log::error!("field stopped; closing window");
                    elwt.exit();
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}
