use glam::{Mat4, Vec2, Vec3};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};

/// Auto-rotation rate in radians per second at speed 1. One full orbit per
/// minute, matching the reference orbit controller's convention.
pub const AUTO_ROTATE_RATE: f32 = std::f32::consts::TAU / 60.0;

/// Drag-to-rotate rate, radians per pixel.
const ROTATE_RATE: f32 = 0.005;
/// Pan rate as a fraction of the orbit radius per pixel.
const PAN_RATE: f32 = 0.002;
/// Multiplicative zoom step per scroll line.
const ZOOM_STEP: f32 = 1.1;
const MIN_RADIUS: f32 = 2.0;
const MAX_RADIUS: f32 = 60.0;
/// Elevation clamp keeps the orbit off the poles.
const MAX_ELEVATION: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Perspective camera orbiting a focal point.
#[derive(Debug, Clone)]
pub struct Camera {
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_y_deg: 45.0,
            aspect,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 0.0, 9.0),
            target: Vec3::ZERO,
        }
    }

    /// Recomputes the projection aspect. Called on every resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.proj() * self.view()
    }
}

/// Damped orbital camera controller with pan, zoom and auto-rotation.
///
/// Input events accumulate into pending velocities; `update` applies them
/// once per frame, strictly before rendering.
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,

    radius: f32,
    azimuth: f32,
    elevation: f32,

    azimuth_vel: f32,
    elevation_vel: f32,
    pan_pending: Vec2,
    zoom_pending: f32,

    rotate_held: bool,
    pan_held: bool,
    last_cursor: Option<(f64, f64)>,
    last_touch: Option<(u64, f64, f64)>,
}

impl OrbitControls {
    /// Creates a controller whose spherical state matches the camera's
    /// current position relative to its target.
    pub fn new(camera: &Camera) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length().max(MIN_RADIUS);
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            enable_pan: true,
            enable_zoom: true,
            auto_rotate: true,
            auto_rotate_speed: 1.0,
            radius,
            azimuth: offset.x.atan2(offset.z),
            elevation: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            azimuth_vel: 0.0,
            elevation_vel: 0.0,
            pan_pending: Vec2::ZERO,
            zoom_pending: 1.0,
            rotate_held: false,
            pan_held: false,
            last_cursor: None,
            last_touch: None,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// Routes window events into pending orbit state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { button, state, .. } => match button {
                MouseButton::Left => self.press_rotate(*state == ElementState::Pressed),
                MouseButton::Right => self.press_pan(*state == ElementState::Pressed),
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
                self.scroll(lines);
            }
            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started => {
                    self.last_touch = Some((touch.id, touch.location.x, touch.location.y));
                }
                TouchPhase::Moved => {
                    if let Some((id, lx, ly)) = self.last_touch {
                        if id == touch.id {
                            self.rotate_by(
                                (touch.location.x - lx) as f32,
                                (touch.location.y - ly) as f32,
                            );
                            self.last_touch = Some((id, touch.location.x, touch.location.y));
                        }
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    self.last_touch = None;
                }
            },
            _ => {}
        }
    }

    pub fn press_rotate(&mut self, held: bool) {
        self.rotate_held = held;
    }

    pub fn press_pan(&mut self, held: bool) {
        self.pan_held = held;
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if let Some((lx, ly)) = self.last_cursor {
            let dx = (x - lx) as f32;
            let dy = (y - ly) as f32;
            if self.rotate_held {
                self.rotate_by(dx, dy);
            }
            if self.pan_held && self.enable_pan {
                self.pan_pending += Vec2::new(dx, dy);
            }
        }
        self.last_cursor = Some((x, y));
    }

    /// Accumulates a drag delta, in pixels, into rotation velocity.
    pub fn rotate_by(&mut self, dx_px: f32, dy_px: f32) {
        self.azimuth_vel -= dx_px * ROTATE_RATE;
        self.elevation_vel += dy_px * ROTATE_RATE;
    }

    /// Accumulates scroll lines into a pending multiplicative zoom.
    /// Positive lines (scroll up) zoom in.
    pub fn scroll(&mut self, lines: f32) {
        if self.enable_zoom {
            self.zoom_pending *= ZOOM_STEP.powf(-lines);
        }
    }

    /// Advances damping, auto-rotation, pan and zoom by one time step and
    /// recomputes the camera position. Must run before the frame renders.
    pub fn update(&mut self, dt: f32, camera: &mut Camera) {
        if self.auto_rotate && !self.rotate_held {
            self.azimuth -= AUTO_ROTATE_RATE * self.auto_rotate_speed * dt;
        }

        if self.enable_damping {
            self.azimuth += self.azimuth_vel * self.damping_factor;
            self.elevation += self.elevation_vel * self.damping_factor;
            // Exponential decay, normalized to a 60 Hz reference frame.
            let keep = (1.0 - self.damping_factor).powf(dt * 60.0);
            self.azimuth_vel *= keep;
            self.elevation_vel *= keep;
        } else {
            self.azimuth += self.azimuth_vel;
            self.elevation += self.elevation_vel;
            self.azimuth_vel = 0.0;
            self.elevation_vel = 0.0;
        }
        self.elevation = self.elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION);

        if self.enable_pan && self.pan_pending != Vec2::ZERO {
            let forward = (camera.target - camera.position).normalize_or_zero();
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward);
            let step = self.radius * PAN_RATE;
            camera.target += (right * -self.pan_pending.x + up * self.pan_pending.y) * step;
            self.pan_pending = Vec2::ZERO;
        }

        self.radius = (self.radius * self.zoom_pending).clamp(MIN_RADIUS, MAX_RADIUS);
        self.zoom_pending = 1.0;

        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        camera.position =
            camera.target + self.radius * Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn rig() -> (Camera, OrbitControls) {
        let camera = Camera::new(16.0 / 9.0);
        let controls = OrbitControls::new(&camera);
        (camera, controls)
    }

    #[test]
    fn aspect_follows_resize() {
        let mut camera = Camera::new(1280.0 / 720.0);
        camera.set_aspect(1000.0 / 500.0);
        assert_eq!(camera.aspect, 2.0);
        // Projection must pick the new aspect up.
        let proj = camera.proj();
        let fov_scale = 1.0 / (camera.fov_y_deg.to_radians() / 2.0).tan();
        assert!((proj.col(0).x - fov_scale / 2.0).abs() < 1e-5);
    }

    #[test]
    fn initial_orbit_matches_camera_position() {
        let (camera, controls) = rig();
        assert!((controls.radius() - 9.0).abs() < 1e-6);
        assert!(controls.azimuth().abs() < 1e-6);
        assert!(controls.elevation().abs() < 1e-6);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 9.0));
    }

    #[test]
    fn auto_rotate_advances_one_orbit_per_minute() {
        let (mut camera, mut controls) = rig();
        let before = controls.azimuth();
        controls.update(1.0, &mut camera);
        let swept = before - controls.azimuth();
        assert!((swept - AUTO_ROTATE_RATE).abs() < 1e-5);
        // Position stays on the orbit sphere.
        assert!(((camera.position - camera.target).length() - 9.0).abs() < 1e-4);
    }

    #[test]
    fn drag_impulse_settles_to_full_delta_under_damping() {
        let (mut camera, mut controls) = rig();
        controls.auto_rotate = false;

        controls.press_rotate(true);
        controls.cursor_moved(100.0, 100.0);
        controls.cursor_moved(200.0, 100.0); // 100 px right
        controls.press_rotate(false);

        let start = controls.azimuth();
        for _ in 0..600 {
            controls.update(DT, &mut camera);
        }
        // Damping applies the accumulated velocity in full, asymptotically.
        let expected = -100.0 * 0.005;
        assert!((controls.azimuth() - start - expected).abs() < 1e-3);
        assert!(controls.azimuth_vel.abs() < 1e-6);
    }

    #[test]
    fn elevation_never_reaches_the_poles() {
        let (mut camera, mut controls) = rig();
        controls.auto_rotate = false;
        for _ in 0..50 {
            controls.rotate_by(0.0, 10_000.0);
            controls.update(DT, &mut camera);
        }
        assert!(controls.elevation() <= MAX_ELEVATION + 1e-6);
    }

    #[test]
    fn zoom_is_multiplicative_and_clamped() {
        let (mut camera, mut controls) = rig();
        controls.scroll(-1.0); // zoom out one step
        controls.update(DT, &mut camera);
        assert!((controls.radius() - 9.0 * ZOOM_STEP).abs() < 1e-4);

        for _ in 0..200 {
            controls.scroll(-10.0);
            controls.update(DT, &mut camera);
        }
        assert!(controls.radius() <= MAX_RADIUS);

        for _ in 0..200 {
            controls.scroll(10.0);
            controls.update(DT, &mut camera);
        }
        assert!(controls.radius() >= MIN_RADIUS);
    }

    #[test]
    fn pan_moves_the_target() {
        let (mut camera, mut controls) = rig();
        controls.auto_rotate = false;
        controls.press_pan(true);
        controls.cursor_moved(0.0, 0.0);
        controls.cursor_moved(50.0, 0.0);
        controls.update(DT, &mut camera);
        assert!(camera.target != Vec3::ZERO);
        // Camera follows the panned target at the same radius.
        assert!(((camera.position - camera.target).length() - controls.radius()).abs() < 1e-4);
    }
}
