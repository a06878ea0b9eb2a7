//! Output surface capability and the per-frame data handed to it.

use crate::camera::{Camera, Viewport};
use crate::config::LineStyle;
use crate::error::SurfaceError;
use crate::group::ParticleGroup;
use crate::links::EdgeSet;
use glam::Mat4;

/// Everything a surface needs to draw one frame.
pub struct Frame<'a> {
    pub camera: &'a Camera,
    pub groups: &'a [ParticleGroup],
    pub edges: &'a EdgeSet,
    pub line_style: &'a LineStyle,
    /// Model transform of the primary group, shared by the edge lines.
    pub link_transform: Mat4,
}

/// A drawable target owned by the render loop until teardown.
pub trait OutputSurface {
    /// Allocate per-group buffers. Group counts never change afterwards.
    fn attach(&mut self, groups: &[ParticleGroup], edge_capacity: usize)
        -> Result<(), SurfaceError>;

    fn resize(&mut self, viewport: Viewport);

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError>;

    /// Free GPU-side resources. Consumes the surface so it runs at most once.
    fn release(self)
    where
        Self: Sized,
    {
    }
}
