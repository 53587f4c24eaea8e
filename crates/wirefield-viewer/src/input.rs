//! Pointer/touch color reactor. While a press gate is open, movement events
//! retarget the wireframe color channel; the tween engine's last-writer-wins
//! rule resolves overlapping moves.

use crate::scene::Scene;
use crate::viewport::Viewport;
use glam::Vec3;
use rand::Rng;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

/// Fixed blue channel for drag-driven colors, out of 255.
pub const DRAG_BLUE: u8 = 150;

pub struct ColorReactor {
    pointer_down: bool,
    touch_active: bool,
}

impl ColorReactor {
    pub fn new() -> Self {
        Self {
            pointer_down: false,
            touch_active: false,
        }
    }

    pub fn pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn touch_active(&self) -> bool {
        self.touch_active
    }

    /// Routes window events into the press gates and color retargets.
    pub fn handle_event(
        &mut self,
        event: &WindowEvent,
        viewport: Viewport,
        scene: &mut Scene,
        rng: &mut impl Rng,
    ) {
        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => self.set_pointer(*state == ElementState::Pressed),
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position.x, position.y, viewport, scene);
            }
            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started => self.set_touch(true),
                TouchPhase::Ended | TouchPhase::Cancelled => self.set_touch(false),
                TouchPhase::Moved => self.touch_moved(scene, rng),
            },
            _ => {}
        }
    }

    pub fn set_pointer(&mut self, down: bool) {
        self.pointer_down = down;
    }

    pub fn set_touch(&mut self, active: bool) {
        self.touch_active = active;
    }

    /// A gated-off move is a no-op; otherwise the wireframe color tweens
    /// toward the cursor-derived target.
    pub fn pointer_moved(&mut self, x: f64, y: f64, viewport: Viewport, scene: &mut Scene) {
        if self.pointer_down {
            scene.animate_wireframe_color(Self::drag_color(x, y, viewport));
        }
    }

    pub fn touch_moved(&mut self, scene: &mut Scene, rng: &mut impl Rng) {
        if self.touch_active {
            scene.animate_wireframe_color(Self::touch_color(rng));
        }
    }

    /// Normalized-cursor color: red tracks x, green tracks y, blue fixed.
    pub fn drag_color(x: f64, y: f64, viewport: Viewport) -> Vec3 {
        let channel = |v: f64, extent: u32| -> f32 {
            let byte = (v / extent as f64 * 255.0).round().clamp(0.0, 255.0);
            byte as f32 / 255.0
        };
        Vec3::new(
            channel(x, viewport.width),
            channel(y, viewport.height),
            DRAG_BLUE as f32 / 255.0,
        )
    }

    /// Fully random color, each byte uniform in [0, 256).
    pub fn touch_color(rng: &mut impl Rng) -> Vec3 {
        Vec3::new(
            rng.gen_range(0..256u32) as f32 / 255.0,
            rng.gen_range(0..256u32) as f32 / 255.0,
            rng.gen_range(0..256u32) as f32 / 255.0,
        )
    }
}

impl Default for ColorReactor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene() -> Scene {
        Scene::new(&mut StdRng::seed_from_u64(9))
    }

    #[test]
    fn moves_without_press_leave_color_untouched() {
        let mut scene = scene();
        let mut reactor = ColorReactor::new();
        let vp = Viewport::new(800, 600);

        let before = scene.wireframe.color.value();
        reactor.pointer_moved(400.0, 300.0, vp, &mut scene);
        for _ in 0..60 {
            scene.tick(1.0 / 60.0);
        }
        assert_eq!(scene.wireframe.color.value(), before);
        assert!(scene.wireframe.color.settled());
    }

    #[test]
    fn drag_at_right_edge_top_settles_to_reference_color() {
        let mut scene = scene();
        let mut reactor = ColorReactor::new();
        let vp = Viewport::new(800, 600);

        reactor.set_pointer(true);
        reactor.pointer_moved(800.0, 0.0, vp, &mut scene);
        for _ in 0..120 {
            scene.tick(1.0 / 60.0);
        }

        let settled = scene.wireframe.color.value();
        let expected = Vec3::new(1.0, 0.0, 150.0 / 255.0);
        assert!((settled - expected).length() < 1e-5);
    }

    #[test]
    fn drag_color_rounds_per_channel() {
        let vp = Viewport::new(1000, 1000);
        let c = ColorReactor::drag_color(501.0, 499.0, vp);
        assert_eq!(c.x, 128.0 / 255.0);
        assert_eq!(c.y, 127.0 / 255.0);
        assert_eq!(c.z, 150.0 / 255.0);
    }

    #[test]
    fn touch_colors_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let c = ColorReactor::touch_color(&mut rng);
            for ch in c.to_array() {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
    }

    #[test]
    fn release_closes_the_gate() {
        let mut scene = scene();
        let mut reactor = ColorReactor::new();
        let vp = Viewport::new(800, 600);

        reactor.set_pointer(true);
        reactor.pointer_moved(100.0, 100.0, vp, &mut scene);
        reactor.set_pointer(false);
        for _ in 0..120 {
            scene.tick(1.0 / 60.0);
        }
        let settled = scene.wireframe.color.value();

        // Further moves while released change nothing.
        reactor.pointer_moved(700.0, 500.0, vp, &mut scene);
        scene.tick(1.0 / 60.0);
        assert_eq!(scene.wireframe.color.value(), settled);
    }
}
