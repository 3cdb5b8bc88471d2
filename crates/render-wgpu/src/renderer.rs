use crate::context::GpuContext;
use crate::error::{FrameError, InitializationError};
use crate::shaders;
use boxfall_common::ClearColor;
use boxfall_kernel::{QUAD_HALF_EXTENT, QuadVertex, quad_vertices};
use boxfall_render::FrameTarget;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    model: [[f32; 4]; 4],
}

/// GPU resources for the box: the quad, its transform, and the pipeline.
pub struct QuadRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    transform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
}

impl QuadRenderer {
    /// Upload the quad and build the pipeline for `surface_format`.
    ///
    /// The vertex upload runs inside an error scope so a failed allocation
    /// is reported here instead of through the device's error handler.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, InitializationError> {
        let vertices = quad_vertices(QUAD_HALF_EXTENT);

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let validation = pollster::block_on(device.pop_error_scope());
        let out_of_memory = pollster::block_on(device.pop_error_scope());
        if let Some(e) = validation.or(out_of_memory) {
            return Err(InitializationError::VertexBuffer(e.to_string()));
        }

        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("transform_buffer"),
            contents: bytemuck::bytes_of(&TransformUniform {
                model: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("transform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("transform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quad_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quad_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::QUAD_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quad_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        tracing::debug!(vertices = vertices.len(), "quad uploaded");

        Ok(Self {
            pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            transform_buffer,
            transform_bind_group,
        })
    }

    fn write_transform(&self, queue: &wgpu::Queue, transform: &Mat4) {
        queue.write_buffer(
            &self.transform_buffer,
            0,
            bytemuck::bytes_of(&TransformUniform {
                model: transform.to_cols_array_2d(),
            }),
        );
    }

    /// Record and submit one pass: clear, then optionally draw the quad.
    fn encode_pass(
        &self,
        gpu: &GpuContext,
        view: &wgpu::TextureView,
        clear: wgpu::Color,
        vertex_count: Option<u32>,
    ) {
        let mut encoder = gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("box_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if let Some(count) = vertex_count {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.transform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..count.min(self.vertex_count), 0..1);
            }
        }

        gpu.queue().submit(std::iter::once(encoder.finish()));
    }
}

struct PendingFrame {
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    clear: wgpu::Color,
    submitted: bool,
}

/// One frame's worth of rendering into the window surface.
///
/// `clear` acquires the back buffer; `draw` records and submits the pass;
/// `present` flips. When `clear` could not acquire a back buffer, `draw` and
/// `present` do nothing. A frame dropped before `present` is discarded.
pub struct SurfaceTarget<'a> {
    gpu: &'a GpuContext,
    quad: &'a QuadRenderer,
    frame: Option<PendingFrame>,
}

impl<'a> SurfaceTarget<'a> {
    pub fn new(gpu: &'a GpuContext, quad: &'a QuadRenderer) -> Self {
        Self {
            gpu,
            quad,
            frame: None,
        }
    }
}

impl FrameTarget for SurfaceTarget<'_> {
    type Error = FrameError;

    fn clear(&mut self, color: ClearColor) -> Result<(), FrameError> {
        let texture = self.gpu.acquire_frame()?;
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.frame = Some(PendingFrame {
            texture,
            view,
            clear: wgpu::Color {
                r: color.r,
                g: color.g,
                b: color.b,
                a: color.a,
            },
            submitted: false,
        });
        Ok(())
    }

    fn upload_transform(&mut self, transform: &Mat4) -> Result<(), FrameError> {
        self.quad.write_transform(self.gpu.queue(), transform);
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32) -> Result<(), FrameError> {
        // No back buffer: `clear` already reported why.
        let Some(frame) = self.frame.as_mut() else {
            return Ok(());
        };
        self.quad
            .encode_pass(self.gpu, &frame.view, frame.clear, Some(vertex_count));
        frame.submitted = true;
        Ok(())
    }

    fn present(&mut self) -> Result<(), FrameError> {
        let Some(frame) = self.frame.take() else {
            return Ok(());
        };
        if !frame.submitted {
            // Nothing was drawn; the clear still has to reach the screen.
            self.quad.encode_pass(self.gpu, &frame.view, frame.clear, None);
        }
        frame.texture.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_uniform_is_one_matrix() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 64);
    }

    #[test]
    fn transform_uniform_keeps_column_major_translation() {
        let t = Mat4::from_translation(glam::Vec3::new(0.0, 0.003, 0.0));
        let u = TransformUniform {
            model: t.to_cols_array_2d(),
        };
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&u));
        assert_eq!(floats.len(), 16);
        // Translation lives in the fourth column.
        assert_eq!(floats[13], 0.003);
        assert_eq!(floats[15], 1.0);
    }

    #[test]
    fn vertex_stride_matches_attribute() {
        let attrs = wgpu::vertex_attr_array![0 => Float32x3];
        assert_eq!(
            attrs[0].format.size(),
            std::mem::size_of::<QuadVertex>() as u64
        );
    }
}
