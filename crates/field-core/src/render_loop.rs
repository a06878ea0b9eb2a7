//! Render loop state machine.
//!
//! The loop owns the camera, the particle groups, the edge sets and the
//! output surface. Hosts drive it by calling [`RenderLoop::tick`] from their
//! frame callback; the loop asks for the next callback through its
//! [`FrameScheduler`] and stops asking once torn down.

use crate::camera::{Camera, Viewport};
use crate::clock::{Clock, FrameScheduler, RebuildThrottle};
use crate::config::FieldConfig;
use crate::error::{FieldError, SurfaceError};
use crate::generator::generate_field;
use crate::group::ParticleGroup;
use crate::links::{EdgeSet, LinkBuilder, Links};
use crate::physics;
use crate::signal::Signals;
use crate::surface::{Frame, OutputSurface};
use glam::Mat4;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Stopped,
}

impl LoopState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Drawn,
    /// The loop was not running; nothing was touched.
    Skipped,
    /// A fatal draw error tore the loop down during this tick.
    Stopped,
}

pub struct RenderLoop<S: OutputSurface, F: FrameScheduler, C: Clock> {
    config: FieldConfig,
    viewport: Viewport,
    camera: Camera,
    surface: Option<S>,
    scheduler: F,
    clock: C,
    groups: Vec<ParticleGroup>,
    edges: EdgeSet,
    scratch: EdgeSet,
    links: Links,
    throttle: RebuildThrottle,
    state: LoopState,
}

impl<S: OutputSurface, F: FrameScheduler, C: Clock> RenderLoop<S, F, C> {
    pub fn new(
        config: FieldConfig,
        viewport: Viewport,
        surface: S,
        scheduler: F,
        clock: C,
    ) -> Result<Self, FieldError> {
        config.validate()?;
        let throttle = RebuildThrottle::new(
            config.links.rebuild_interval_sec,
            config.links.rebuild_window_sec,
        );
        Ok(Self {
            links: Links::for_strategy(config.link_strategy),
            camera: Camera::for_viewport(viewport),
            viewport,
            surface: Some(surface),
            scheduler,
            clock,
            groups: Vec::new(),
            edges: EdgeSet::default(),
            scratch: EdgeSet::default(),
            throttle,
            state: LoopState::Uninitialized,
            config,
        })
    }

    /// Generate the field, hand it to the surface and schedule the first frame.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), FieldError> {
        if self.state != LoopState::Uninitialized {
            return Err(FieldError::InvalidTransition {
                from: self.state.name(),
                to: LoopState::Running.name(),
            });
        }
        let Some(surface) = self.surface.as_mut() else {
            return Err(FieldError::InvalidTransition {
                from: "released",
                to: LoopState::Running.name(),
            });
        };

        let groups = generate_field(&self.config, self.viewport, rng);
        let cap = self.config.links.cap;
        surface.attach(&groups, cap)?;
        surface.resize(self.viewport);

        self.edges = EdgeSet::with_capacity(cap);
        self.scratch = EdgeSet::with_capacity(cap);
        if let Some(primary) = groups.first() {
            self.links
                .rebuild(primary.positions(), &self.config.links, &mut self.edges);
        }
        self.groups = groups;
        self.state = LoopState::Running;
        self.scheduler.request_frame();
        log::info!(
            "field started: {} groups, {} particles, {} links",
            self.groups.len(),
            self.particle_count(),
            self.edges.len()
        );
        Ok(())
    }

    /// Advance physics, rebuild links when due, draw once and ask for the next frame.
    pub fn tick(&mut self, signals: &Signals) -> TickOutcome {
        if self.state != LoopState::Running || self.surface.is_none() {
            log::trace!("tick skipped in state {}", self.state.name());
            return TickOutcome::Skipped;
        }

        let now = self.clock.now_secs();
        let t = now as f32;
        for group in &mut self.groups {
            physics::step(
                group,
                &self.config.physics,
                self.config.audio_reactive,
                signals.pointer,
                signals.amplitude.as_ref(),
                t,
            );
        }

        if self.throttle.due(now) {
            if let Some(primary) = self.groups.first() {
                self.links
                    .rebuild(primary.positions(), &self.config.links, &mut self.scratch);
                std::mem::swap(&mut self.edges, &mut self.scratch);
            }
        }

        let result = match self.surface.as_mut() {
            Some(surface) => {
                let frame = Frame {
                    camera: &self.camera,
                    groups: &self.groups,
                    edges: &self.edges,
                    line_style: &self.config.line_style,
                    link_transform: self
                        .groups
                        .first()
                        .map_or(Mat4::IDENTITY, ParticleGroup::model_matrix),
                };
                surface.draw(&frame)
            }
            None => return TickOutcome::Skipped,
        };

        match result {
            Ok(()) => {}
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                if let Some(surface) = self.surface.as_mut() {
                    surface.resize(self.viewport);
                }
            }
            Err(SurfaceError::OutOfMemory) => {
                log::error!("out of memory while drawing, stopping the field");
                self.teardown();
                return TickOutcome::Stopped;
            }
            Err(e) => log::warn!("draw failed: {e}"),
        }

        self.scheduler.request_frame();
        TickOutcome::Drawn
    }

    /// Follow a viewport change. Particles are left where they are.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport);
        }
    }

    /// Stop scheduling and release the surface. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        let from = self.state;
        self.state = LoopState::Stopped;
        self.scheduler.cancel_frame();
        if let Some(surface) = self.surface.take() {
            surface.release();
        }
        self.groups = Vec::new();
        self.edges = EdgeSet::default();
        self.scratch = EdgeSet::default();
        log::info!("field stopped (was {})", from.name());
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn groups(&self) -> &[ParticleGroup] {
        &self.groups
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn particle_count(&self) -> usize {
        self.groups.iter().map(ParticleGroup::count).sum()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<S: OutputSurface, F: FrameScheduler, C: Clock> Drop for RenderLoop<S, F, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
