//! Wireframe line-list pipeline. Depth testing is disabled so the frame
//! always draws over the starfield; the material is alpha-blended and lit
//! by the scene's three point lights in the fragment stage.

use crate::camera::Camera;
use crate::scene::{PointLight, Wireframe};
use glam::Mat4;
use wgpu::util::DeviceExt;

/// Per-light uniform block, respecting std140 layout.
/// Must match `Light` in `wireframe_lines.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightStd140 {
    pub position: [f32; 3],
    pub range: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Frame uniform for the wireframe pass, respecting std140 layout.
/// Must match `WireUniform` in `wireframe_lines.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WireUniformStd140 {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub opacity: f32,
    pub lights: [LightStd140; 3],
}

impl WireUniformStd140 {
    pub fn build(camera: &Camera, wireframe: &Wireframe, lights: &[PointLight; 3]) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            model: Mat4::from_scale(wireframe.scale.value()).to_cols_array_2d(),
            color: wireframe.color.value().to_array(),
            opacity: wireframe.opacity,
            lights: lights.map(|l| LightStd140 {
                position: l.position.to_array(),
                range: l.range,
                color: l.color.to_array(),
                intensity: l.intensity,
            }),
        }
    }
}

pub struct WireframePipeline {
    pipeline: wgpu::RenderPipeline,
    vtx: wgpu::Buffer,
    idx: wgpu::Buffer,
    index_count: u32,
    ubo: wgpu::Buffer,
    bind: wgpu::BindGroup,
}

impl WireframePipeline {
    pub fn new(
        device: &wgpu::Device,
        color_fmt: wgpu::TextureFormat,
        depth_fmt: wgpu::TextureFormat,
        wireframe: &Wireframe,
    ) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Wireframe UBO Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<WireUniformStd140>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shaders/wireframe_lines.wgsl"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../../shaders/wireframe_lines.wgsl").into(),
            ),
        });

        let positions: Vec<[f32; 3]> = wireframe
            .geometry
            .vertices
            .iter()
            .map(|v| v.to_array())
            .collect();
        let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wireframe Vertices"),
            contents: bytemuck::cast_slice(&positions),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices = wireframe.geometry.line_indices();
        let idx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wireframe Edge Indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Wireframe UBO"),
            size: std::mem::size_of::<WireUniformStd140>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Wireframe BindGroup"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Wireframe PipelineLayout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wireframe Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        shader_location: 0,
                        offset: 0,
                        format: wgpu::VertexFormat::Float32x3,
                    }],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            // Depth test disabled: the wireframe draws over everything.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_fmt,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_fmt,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Self {
            pipeline,
            vtx,
            idx,
            index_count: indices.len() as u32,
            ubo,
            bind,
        }
    }

    pub fn upload_frame(&self, queue: &wgpu::Queue, uniform: &WireUniformStd140) {
        queue.write_buffer(&self.ubo, 0, bytemuck::bytes_of(uniform));
    }

    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind, &[]);
        rpass.set_vertex_buffer(0, self.vtx.slice(..));
        rpass.set_index_buffer(self.idx.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
