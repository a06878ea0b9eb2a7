//! CPU-side layouts uploaded to the GPU each frame.

use field_core::{LineStyle, ParticleGroup, SurfaceError};
use glam::Mat4;

/// Matches `Uniforms` in `field.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
    pub params: [f32; 4],
}

impl Uniforms {
    pub fn for_group(view_proj: Mat4, group: &ParticleGroup) -> Self {
        let style = group.style();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: group.model_matrix().to_cols_array_2d(),
            tint: [1.0, 1.0, 1.0, style.opacity],
            params: [style.point_size, 0.0, 0.0, 0.0],
        }
    }

    pub fn for_lines(view_proj: Mat4, model: Mat4, style: &LineStyle) -> Self {
        let [r, g, b] = style.color;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            tint: [r, g, b, style.opacity],
            params: [0.0; 4],
        }
    }
}

/// One particle quad instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Instance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl Instance {
    pub const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

pub const LINE_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

pub fn line_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (3 * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &LINE_ATTRIBS,
    }
}

/// Refill `out` with one instance per particle. Missing size scales count as 1.
pub fn pack_instances(group: &ParticleGroup, out: &mut Vec<Instance>) {
    out.clear();
    let sizes = group.size_scale();
    out.extend(
        group
            .positions()
            .iter()
            .zip(group.colors())
            .enumerate()
            .map(|(i, (p, c))| Instance {
                position: p.to_array(),
                size: sizes.and_then(|s| s.get(i)).copied().unwrap_or(1.0),
                color: c.to_array(),
                _pad: 0.0,
            }),
    );
}

pub fn map_surface_error(err: wgpu::SurfaceError) -> SurfaceError {
    match err {
        wgpu::SurfaceError::Lost => SurfaceError::Lost,
        wgpu::SurfaceError::Outdated => SurfaceError::Outdated,
        wgpu::SurfaceError::OutOfMemory => SurfaceError::OutOfMemory,
        wgpu::SurfaceError::Timeout => SurfaceError::Timeout,
        other => SurfaceError::Other(other.to_string()),
    }
}
