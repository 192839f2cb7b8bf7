//! WebGPU presentation of a `VertexBatch`

use super::DrawSurface;
use super::batch::VertexBatch;
use super::shapes::stage_to_ndc;
use super::vertex::Vertex;
use crate::error::StartupError;

/// Device, surface and the single flat-color pipeline
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    /// Grown on demand, never shrunk
    vertex_buffer: Option<wgpu::Buffer>,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, StartupError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("modus-invaders-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| StartupError::Graphics(format!("failed to create device: {e}")))?;

        let config = surface
            .get_default_config(adapter, width, height)
            .ok_or_else(|| StartupError::Graphics("surface not supported by adapter".into()))?;
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));

        // No bind groups: positions arrive in NDC and colors per vertex
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stage_pipeline"),
            layout: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(config.format.into())],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!("Render pipeline ready ({width}x{height}, {:?})", config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer: None,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Copy vertices into the vertex buffer, reallocating only when it is too small
    fn upload(&mut self, vertices: &[Vertex]) -> u64 {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let len = bytes.len() as u64;

        let buffer = match self.vertex_buffer.take() {
            Some(buffer) if buffer.size() >= len => buffer,
            _ => self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("stage_vertices"),
                size: len.next_power_of_two(),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
        };
        self.queue.write_buffer(&buffer, 0, bytes);
        self.vertex_buffer = Some(buffer);
        len
    }

    /// Clear to black and draw the batch
    pub fn render(&mut self, batch: &VertexBatch) -> Result<(), wgpu::SurfaceError> {
        let stage = batch.stage_size();
        let vertices: Vec<Vertex> = batch
            .vertices()
            .iter()
            .map(|v| Vertex {
                position: stage_to_ndc(v.position, stage),
                ..*v
            })
            .collect();
        let uploaded = if vertices.is_empty() {
            0
        } else {
            self.upload(&vertices)
        };

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("stage_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stage_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            if let Some(buffer) = self.vertex_buffer.as_ref().filter(|_| uploaded > 0) {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, buffer.slice(..uploaded));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
