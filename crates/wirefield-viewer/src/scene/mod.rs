//! CPU-side scene description: the wireframe, the starfield and the lights.
//! GPU upload lives in `renderer`; this module owns the mutable visual state
//! (wireframe scale and color) and the tweens driving it.

pub mod geometry;
pub mod starfield;

use crate::anim::{Channel, Ease, DEFAULT_DURATION};
use geometry::WireframeGeometry;
use glam::Vec3;
use rand::Rng;
use starfield::Starfield;

pub const WIREFRAME_RADIUS: f32 = 6.0;
pub const WIREFRAME_DETAIL: u32 = 3;

/// Fixed-position light with inverse-square falloff cut off at `range`.
/// Immutable after construction.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
}

/// The centerpiece line object. Scale and color are the only mutable
/// visual state in the scene, both tween-driven.
pub struct Wireframe {
    pub geometry: WireframeGeometry,
    pub scale: Channel<Vec3>,
    pub color: Channel<Vec3>,
    pub opacity: f32,
}

pub struct Scene {
    pub wireframe: Wireframe,
    pub starfield: Starfield,
    pub lights: [PointLight; 3],
}

impl Scene {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            wireframe: Wireframe {
                geometry: WireframeGeometry::octahedron(WIREFRAME_RADIUS, WIREFRAME_DETAIL),
                scale: Channel::new(Vec3::ONE),
                color: Channel::new(Vec3::ONE),
                opacity: 1.0,
            },
            starfield: Starfield::generate(rng),
            lights: [
                PointLight {
                    position: Vec3::new(0.0, 10.0, 10.0),
                    color: rgb(0xdfccaf),
                    intensity: 125.0,
                    range: 100.0,
                },
                PointLight {
                    position: Vec3::new(0.0, -10.0, 0.0),
                    color: rgb(0x854442),
                    intensity: 125.0,
                    range: 100.0,
                },
                PointLight {
                    position: Vec3::new(-10.0, 0.0, 0.0),
                    color: rgb(0xffffff),
                    intensity: 125.0,
                    range: 100.0,
                },
            ],
        }
    }

    /// Advances the in-flight wireframe tweens.
    pub fn tick(&mut self, dt: f32) {
        self.wireframe.scale.tick(dt);
        self.wireframe.color.tick(dt);
    }

    /// Retargets the wireframe color. Supersedes any in-flight color tween.
    pub fn animate_wireframe_color(&mut self, target: Vec3) {
        self.wireframe
            .color
            .animate_to(target, DEFAULT_DURATION, Ease::QuadOut);
    }
}

/// 0xRRGGBB to linear-ish [0,1] RGB.
fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scene_holds_three_fixed_lights() {
        let scene = Scene::new(&mut StdRng::seed_from_u64(1));
        assert_eq!(scene.lights.len(), 3);
        for light in &scene.lights {
            assert_eq!(light.intensity, 125.0);
            assert_eq!(light.range, 100.0);
        }
        assert_eq!(scene.lights[0].position, Vec3::new(0.0, 10.0, 10.0));
        assert_eq!(scene.lights[1].position, Vec3::new(0.0, -10.0, 0.0));
        assert_eq!(scene.lights[2].position, Vec3::new(-10.0, 0.0, 0.0));
    }

    #[test]
    fn color_retarget_settles_on_target() {
        let mut scene = Scene::new(&mut StdRng::seed_from_u64(1));
        let target = Vec3::new(1.0, 0.0, 150.0 / 255.0);
        scene.animate_wireframe_color(target);
        for _ in 0..120 {
            scene.tick(1.0 / 60.0);
        }
        assert!((scene.wireframe.color.value() - target).length() < 1e-5);
    }

    #[test]
    fn hex_to_rgb_triplet() {
        let warm = rgb(0xdfccaf);
        assert!((warm.x - 223.0 / 255.0).abs() < 1e-6);
        assert!((warm.y - 204.0 / 255.0).abs() < 1e-6);
        assert!((warm.z - 175.0 / 255.0).abs() < 1e-6);
    }
}
