//! Platform-free core of the particle field backdrop.
//!
//! Everything here runs on the host as well as in the browser: the typed
//! configuration and presets, the field generator, the per-tick physics, the
//! proximity-link builders and the render loop state machine. Output
//! surfaces, frame schedulers and clocks are capabilities handed in by the
//! front ends.

pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod group;
pub mod links;
pub mod physics;
pub mod render_loop;
pub mod signal;
pub mod surface;

pub use camera::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use generator::{generate_field, generate_group};
pub use group::*;
pub use links::*;
pub use render_loop::*;
pub use signal::*;
pub use surface::*;
