//! One-shot entrance timeline: wireframe scale-in, then nav slide-in, then
//! title fade-in. Steps run strictly back-to-back and never replay.

use crate::anim::{Ease, DEFAULT_DURATION};
use crate::scene::Scene;
use crate::ui::Overlay;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    ScaleIn,
    NavSlide,
    TitleFade,
    Done,
}

pub struct IntroTimeline {
    step: Step,
    started: bool,
}

impl IntroTimeline {
    pub fn new() -> Self {
        Self {
            step: Step::ScaleIn,
            started: false,
        }
    }

    pub fn finished(&self) -> bool {
        self.step == Step::Done
    }

    /// Drives the current step. Called once per frame, before the channel
    /// ticks, so a step's first frame renders its start value.
    pub fn tick(&mut self, scene: &mut Scene, overlay: &mut Overlay) {
        match self.step {
            Step::ScaleIn => {
                if !self.started {
                    scene.wireframe.scale.animate_from_to(
                        Vec3::ZERO,
                        Vec3::ONE,
                        DEFAULT_DURATION,
                        Ease::QuadOut,
                    );
                    self.started = true;
                } else if scene.wireframe.scale.settled() {
                    self.advance(Step::NavSlide);
                }
            }
            Step::NavSlide => {
                if !self.started {
                    overlay
                        .nav_offset
                        .animate_from_to(-1.0, 0.0, DEFAULT_DURATION, Ease::QuadOut);
                    self.started = true;
                } else if overlay.nav_offset.settled() {
                    self.advance(Step::TitleFade);
                }
            }
            Step::TitleFade => {
                if !self.started {
                    overlay
                        .title_opacity
                        .animate_from_to(0.0, 1.0, DEFAULT_DURATION, Ease::QuadOut);
                    self.started = true;
                } else if overlay.title_opacity.settled() {
                    log::debug!("entrance timeline complete");
                    self.advance(Step::Done);
                }
            }
            Step::Done => {}
        }
    }

    fn advance(&mut self, next: Step) {
        self.step = next;
        self.started = false;
    }
}

impl Default for IntroTimeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn run(frames: usize) -> (IntroTimeline, Scene, Overlay) {
        let mut scene = Scene::new(&mut StdRng::seed_from_u64(3));
        let mut overlay = Overlay::new();
        let mut timeline = IntroTimeline::new();
        for _ in 0..frames {
            timeline.tick(&mut scene, &mut overlay);
            scene.tick(DT);
            overlay.tick(DT);
        }
        (timeline, scene, overlay)
    }

    #[test]
    fn settles_at_final_values() {
        let (timeline, scene, overlay) = run(300);
        assert!(timeline.finished());
        assert!((scene.wireframe.scale.value() - Vec3::ONE).length() < 1e-5);
        assert!(overlay.nav_offset.value().abs() < 1e-5);
        assert!((overlay.title_opacity.value() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn steps_are_strictly_sequential() {
        // Mid-way through the scale-in, neither overlay step has begun.
        let (timeline, scene, overlay) = run(10);
        assert!(!timeline.finished());
        let scale = scene.wireframe.scale.value();
        assert!(scale.x > 0.0 && scale.x < 1.0);
        assert_eq!(overlay.nav_offset.value(), -1.0);
        assert_eq!(overlay.title_opacity.value(), 0.0);
    }

    #[test]
    fn runs_exactly_once() {
        let (mut timeline, mut scene, mut overlay) = run(300);
        // Further ticks change nothing.
        for _ in 0..60 {
            timeline.tick(&mut scene, &mut overlay);
            scene.tick(DT);
            overlay.tick(DT);
        }
        assert!(timeline.finished());
        assert!((scene.wireframe.scale.value() - Vec3::ONE).length() < 1e-5);
    }
}
