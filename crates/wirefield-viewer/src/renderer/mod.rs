//! The rendering orchestrator. Owns the GPU context, the depth target and
//! the two scene pipelines; the egui overlay renderer is composited by the
//! app after the scene pass.

pub mod context;
pub mod pipelines;
pub mod targets;

use self::{
    context::GfxContext,
    pipelines::{
        lines::{WireframePipeline, WireUniformStd140},
        points::{StarfieldPipeline, StarUniformStd140},
    },
    targets::Targets,
};
use crate::{camera::Camera, scene::Scene, viewport::Viewport};
use std::sync::Arc;
use winit::window::Window;

pub struct Renderer {
    pub gfx: GfxContext,
    pub targets: Targets,
    pub wires: WireframePipeline,
    pub stars: StarfieldPipeline,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, viewport: Viewport, scene: &Scene) -> anyhow::Result<Self> {
        let gfx = GfxContext::new(window, viewport).await?;

        let targets = Targets::new(&gfx.device, viewport.physical());
        let wires = WireframePipeline::new(
            &gfx.device,
            gfx.config.format,
            targets.depth_fmt,
            &scene.wireframe,
        );
        let stars = StarfieldPipeline::new(
            &gfx.device,
            gfx.config.format,
            targets.depth_fmt,
            &scene.starfield,
        );

        let egui_renderer = egui_wgpu::Renderer::new(&gfx.device, gfx.config.format, None, 1);

        Ok(Self {
            gfx,
            targets,
            wires,
            stars,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.gfx.resize(viewport);
        self.targets.resize(&self.gfx.device, viewport.physical());
    }

    /// Draws the starfield and wireframe into `swap_view`.
    pub fn render(&mut self, swap_view: &wgpu::TextureView, scene: &Scene, camera: &Camera) {
        self.stars
            .upload_frame(&self.gfx.queue, &StarUniformStd140::build(camera));
        self.wires.upload_frame(
            &self.gfx.queue,
            &WireUniformStd140::build(camera, &scene.wireframe, &scene.lights),
        );

        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.0,
                            g: 0.0,
                            b: 0.0,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Stars first, then the wireframe over them.
            self.stars.draw(&mut pass);
            self.wires.draw(&mut pass);
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }
}
