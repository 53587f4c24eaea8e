//! Overlay chrome: the nav bar and the title, both driven by entrance
//! timeline channels and composited over the 3D scene with egui.

use crate::anim::Channel;

/// Nav bar height in egui points.
pub const NAV_HEIGHT: f32 = 48.0;

pub const NAV_LABEL: &str = "WIREFIELD";
pub const TITLE_TEXT: &str = "Give it a spin";

/// Animated overlay state. `nav_offset` is a fraction of the bar's own
/// height (-1 fully hidden above the window edge, 0 resting); opacity is
/// [0, 1].
pub struct Overlay {
    pub nav_offset: Channel<f32>,
    pub title_opacity: Channel<f32>,
}

impl Overlay {
    pub fn new() -> Self {
        Self {
            nav_offset: Channel::new(-1.0),
            title_opacity: Channel::new(0.0),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.nav_offset.tick(dt);
        self.title_opacity.tick(dt);
    }

    /// Nav bar top edge in points, relative to the window top.
    pub fn nav_top(&self) -> f32 {
        self.nav_offset.value() * NAV_HEIGHT
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Paints the overlay for the current frame.
pub fn draw_overlay(ctx: &egui::Context, overlay: &Overlay) {
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("nav"))
        .fixed_pos(egui::pos2(0.0, overlay.nav_top()))
        .show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(screen.width(), NAV_HEIGHT),
                egui::Sense::hover(),
            );
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(160));
            ui.painter().text(
                rect.left_center() + egui::vec2(16.0, 0.0),
                egui::Align2::LEFT_CENTER,
                NAV_LABEL,
                egui::FontId::proportional(18.0),
                egui::Color32::WHITE,
            );
        });

    let alpha = (overlay.title_opacity.value().clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Area::new(egui::Id::new("title"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, screen.height() * 0.28))
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(TITLE_TEXT)
                    .size(28.0)
                    .color(egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha)),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::{Ease, DEFAULT_DURATION};

    #[test]
    fn starts_hidden() {
        let overlay = Overlay::new();
        assert_eq!(overlay.nav_offset.value(), -1.0);
        assert_eq!(overlay.title_opacity.value(), 0.0);
        assert_eq!(overlay.nav_top(), -NAV_HEIGHT);
    }

    #[test]
    fn nav_slides_to_rest() {
        let mut overlay = Overlay::new();
        overlay
            .nav_offset
            .animate_from_to(-1.0, 0.0, DEFAULT_DURATION, Ease::QuadOut);
        for _ in 0..60 {
            overlay.tick(1.0 / 60.0);
        }
        assert!(overlay.nav_top().abs() < 1e-4);
    }
}
