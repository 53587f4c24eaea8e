use crate::{
    camera::{Camera, OrbitControls},
    input::ColorReactor,
    renderer::Renderer,
    scene::Scene,
    timeline::IntroTimeline,
    ui::{self, Overlay},
    viewport::{Viewport, PIXEL_RATIO},
};
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use winit::{event::WindowEvent, window::Window};

pub struct App {
    pub renderer: Renderer,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub scene: Scene,
    pub overlay: Overlay,
    pub timeline: IntroTimeline,
    pub reactor: ColorReactor,
    pub viewport: Viewport,
    rng: rand::rngs::ThreadRng,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    last_frame: Instant,
}

impl App {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height);

        let mut rng = rand::thread_rng();
        let scene = Scene::new(&mut rng);
        let renderer = Renderer::new(window.clone(), viewport, &scene).await?;

        let camera = Camera::new(viewport.aspect());
        let controls = OrbitControls::new(&camera);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &*window,
            None,
            None,
        );

        log::info!(
            "scene ready: {} wireframe edges, {} stars, {}x{} viewport",
            scene.wireframe.geometry.edges.len(),
            scene.starfield.len(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            renderer,
            camera,
            controls,
            scene,
            overlay: Overlay::new(),
            timeline: IntroTimeline::new(),
            reactor: ColorReactor::new(),
            viewport,
            rng,
            egui_ctx,
            egui_state,
            last_frame: Instant::now(),
        })
    }

    /// Synchronous resize: viewport, camera aspect and surface stay in step.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if self.viewport.set(new_size.width, new_size.height) {
            self.camera.set_aspect(self.viewport.aspect());
            self.renderer.resize(self.viewport);
        }
    }

    /// Reconfigures the surface at the current viewport. Recovery path for
    /// a lost swap chain.
    pub fn reconfigure(&mut self) {
        self.renderer.resize(self.viewport);
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        if response.consumed {
            return true;
        }

        self.controls.handle_event(event);
        self.reactor
            .handle_event(event, self.viewport, &mut self.scene, &mut self.rng);

        if let WindowEvent::Resized(physical_size) = event {
            self.resize(*physical_size);
        }

        false
    }

    /// Seconds since the previous frame, clamped against stalls.
    pub fn frame_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        dt
    }

    /// Per-frame simulation step: controls, then timeline, then tweens.
    /// Always runs strictly before `render` for the same frame; callable a
    /// bounded number of times with a fixed `dt` for deterministic tests.
    pub fn advance(&mut self, dt: f32) {
        self.controls.update(dt, &mut self.camera);
        self.timeline.tick(&mut self.scene, &mut self.overlay);
        self.scene.tick(dt);
        self.overlay.tick(dt);
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let frame = self.renderer.gfx.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(&swap_view, &self.scene, &self.camera);

        // Overlay pass: nav bar and title over the scene.
        let egui_input = self.egui_state.take_egui_input(window);
        self.egui_ctx.begin_frame(egui_input);
        ui::draw_overlay(&self.egui_ctx, &self.overlay);
        let egui_output = self.egui_ctx.end_frame();

        let pixels_per_point = PIXEL_RATIO as f32;
        let shapes = self.egui_ctx.tessellate(egui_output.shapes, pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                self.renderer.gfx.config.width,
                self.renderer.gfx.config.height,
            ],
            pixels_per_point,
        };

        let mut encoder =
            self.renderer
                .gfx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Overlay Encoder"),
                });

        for (id, delta) in &egui_output.textures_delta.set {
            self.renderer.egui_renderer.update_texture(
                &self.renderer.gfx.device,
                &self.renderer.gfx.queue,
                *id,
                delta,
            );
        }

        self.renderer.egui_renderer.update_buffers(
            &self.renderer.gfx.device,
            &self.renderer.gfx.queue,
            &mut encoder,
            &shapes,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer
                .egui_renderer
                .render(&mut render_pass, &shapes, &screen_descriptor);
        }

        for id in &egui_output.textures_delta.free {
            self.renderer.egui_renderer.free_texture(id);
        }

        self.renderer
            .gfx
            .queue
            .submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}
