//! wgpu output surface for the particle field.
//!
//! Works with any [`wgpu::SurfaceTarget`]: a canvas on the web, a window on
//! native. Buffers are sized once in [`OutputSurface::attach`]; each frame
//! only writes into them.

mod helpers;
pub mod packing;

use field_core::{EdgeSet, Frame, OutputSurface, ParticleGroup, SurfaceError, Viewport};
use packing::{line_layout, map_surface_error, pack_instances, Instance, Uniforms};

pub static FIELD_WGSL: &str = include_str!("../shaders/field.wgsl");

/// Near-black backdrop with a hint of blue.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.02,
    a: 1.0,
};

struct GroupDraw {
    instances: wgpu::Buffer,
    count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct LineDraw {
    vertices: wgpu::Buffer,
    capacity: usize,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuSurface<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    uniform_bgl: wgpu::BindGroupLayout,
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    groups: Vec<GroupDraw>,
    lines: Option<LineDraw>,
    staging: Vec<Instance>,
}

impl<'w> GpuSurface<'w> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        viewport: Viewport,
    ) -> anyhow::Result<Self> {
        let (width, height) = viewport.physical_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("field_shader"),
            source: wgpu::ShaderSource::Wgsl(FIELD_WGSL.into()),
        });
        let uniform_bgl = helpers::uniform_layout(&device);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("field_pl"),
            bind_group_layouts: &[&uniform_bgl],
            push_constant_ranges: &[],
        });
        let point_pipeline = helpers::make_pipeline(
            &device,
            &layout,
            &shader,
            format,
            helpers::PipelineSpec {
                label: "point_pipeline",
                vs_entry: "vs_point",
                fs_entry: "fs_point",
                buffers: &[Instance::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        let line_pipeline = helpers::make_pipeline(
            &device,
            &layout,
            &shader,
            format,
            helpers::PipelineSpec {
                label: "line_pipeline",
                vs_entry: "vs_line",
                fs_entry: "fs_line",
                buffers: &[line_layout()],
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );
        log::info!("gpu surface ready: {width}x{height} {format:?}");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_bgl,
            point_pipeline,
            line_pipeline,
            groups: Vec::new(),
            lines: None,
            staging: Vec::new(),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn write_frame(&mut self, frame: &Frame<'_>) -> usize {
        let view_proj = frame.camera.view_projection();
        for (draw, group) in self.groups.iter().zip(frame.groups) {
            pack_instances(group, &mut self.staging);
            let n = self.staging.len().min(draw.count as usize);
            if n > 0 {
                self.queue.write_buffer(
                    &draw.instances,
                    0,
                    bytemuck::cast_slice(&self.staging[..n]),
                );
            }
            let u = Uniforms::for_group(view_proj, group);
            self.queue
                .write_buffer(&draw.uniforms, 0, bytemuck::bytes_of(&u));
        }

        let Some(lines) = self.lines.as_ref() else {
            return 0;
        };
        let edges = frame.edges.len().min(lines.capacity);
        if edges > 0 {
            let floats = &frame.edges.as_slice()[..edges * EdgeSet::FLOATS_PER_EDGE];
            self.queue
                .write_buffer(&lines.vertices, 0, bytemuck::cast_slice(floats));
        }
        let u = Uniforms::for_lines(view_proj, frame.link_transform, frame.line_style);
        self.queue
            .write_buffer(&lines.uniforms, 0, bytemuck::bytes_of(&u));
        edges
    }
}

impl OutputSurface for GpuSurface<'_> {
    fn attach(
        &mut self,
        groups: &[ParticleGroup],
        edge_capacity: usize,
    ) -> Result<(), SurfaceError> {
        let blank: Uniforms = bytemuck::Zeroable::zeroed();
        self.groups = groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let bytes = (g.count() * std::mem::size_of::<Instance>()) as u64;
                let instances =
                    helpers::vertex_buffer(&self.device, &format!("group{i}_instances"), bytes);
                let (uniforms, bind_group) = helpers::uniform_binding::<Uniforms>(
                    &self.device,
                    &self.uniform_bgl,
                    &format!("group{i}_uniforms"),
                    &blank,
                );
                GroupDraw {
                    instances,
                    count: g.count() as u32,
                    uniforms,
                    bind_group,
                }
            })
            .collect();

        let bytes = (edge_capacity * EdgeSet::FLOATS_PER_EDGE * 4) as u64;
        let vertices = helpers::vertex_buffer(&self.device, "link_vertices", bytes);
        let (uniforms, bind_group) = helpers::uniform_binding::<Uniforms>(
            &self.device,
            &self.uniform_bgl,
            "link_uniforms",
            &blank,
        );
        self.lines = Some(LineDraw {
            vertices,
            capacity: edge_capacity,
            uniforms,
            bind_group,
        });
        let largest = groups.iter().map(ParticleGroup::count).max().unwrap_or(0);
        self.staging = Vec::with_capacity(largest);
        log::debug!(
            "attached {} group buffers, link capacity {edge_capacity}",
            self.groups.len()
        );
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        let (width, height) = viewport.physical_size();
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SurfaceError> {
        let edges = self.write_frame(frame);
        let output = self.surface.get_current_texture().map_err(map_surface_error)?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("field_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("field_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(lines) = self.lines.as_ref().filter(|_| edges > 0) {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_bind_group(0, &lines.bind_group, &[]);
                rpass.set_vertex_buffer(0, lines.vertices.slice(..));
                rpass.draw(0..(edges * 2) as u32, 0..1);
            }

            rpass.set_pipeline(&self.point_pipeline);
            for draw in self.groups.iter().filter(|d| d.count > 0) {
                rpass.set_bind_group(0, &draw.bind_group, &[]);
                rpass.set_vertex_buffer(0, draw.instances.slice(..));
                rpass.draw(0..6, 0..draw.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(self) {
        for draw in &self.groups {
            draw.instances.destroy();
            draw.uniforms.destroy();
        }
        if let Some(lines) = &self.lines {
            lines.vertices.destroy();
            lines.uniforms.destroy();
        }
        log::info!("gpu surface released");
    }
}
