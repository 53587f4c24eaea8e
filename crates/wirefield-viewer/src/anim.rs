//! Minimal tween engine: time-based interpolation of scalar and vector
//! properties with per-property last-writer-wins retargeting.

use glam::Vec3;

/// Stock duration for tweens that don't specify one, in seconds.
pub const DEFAULT_DURATION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out; the stock curve.
    #[default]
    QuadOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Interpolatable property value.
pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }
}

/// A single in-flight interpolation.
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(f32::EPSILON),
            elapsed: 0.0,
            ease,
        }
    }

    /// Advances by `dt` seconds and returns the current value.
    pub fn advance(&mut self, dt: f32) -> T {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.sample()
    }

    pub fn sample(&self) -> T {
        let t = self.ease.apply(self.elapsed / self.duration);
        T::lerp(self.from, self.to, t)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// One animated property. Retargeting a channel with an active tween drops
/// the old tween and starts the new one from the channel's current value:
/// last writer wins.
#[derive(Debug, Clone)]
pub struct Channel<T: Lerp> {
    value: T,
    tween: Option<Tween<T>>,
}

impl<T: Lerp> Channel<T> {
    pub fn new(value: T) -> Self {
        Self { value, tween: None }
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Sets the value immediately, cancelling any in-flight tween.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.tween = None;
    }

    /// Animates from the current value toward `to`.
    pub fn animate_to(&mut self, to: T, duration: f32, ease: Ease) {
        self.tween = Some(Tween::new(self.value, to, duration, ease));
    }

    /// Snaps to `from`, then animates toward `to`.
    pub fn animate_from_to(&mut self, from: T, to: T, duration: f32, ease: Ease) {
        self.value = from;
        self.animate_to(to, duration, ease);
    }

    /// Advances the active tween, if any.
    pub fn tick(&mut self, dt: f32) {
        if let Some(tween) = &mut self.tween {
            self.value = tween.advance(dt);
            if tween.finished() {
                self.tween = None;
            }
        }
    }

    /// True when no tween is in flight.
    pub fn settled(&self) -> bool {
        self.tween.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn linear_tween_hits_midpoint_and_end() {
        let mut tween = Tween::new(0.0f32, 10.0, 1.0, Ease::Linear);
        let mid = tween.advance(0.5);
        assert!((mid - 5.0).abs() < 1e-6);
        let end = tween.advance(0.5);
        assert!((end - 10.0).abs() < 1e-6);
        assert!(tween.finished());
    }

    #[test]
    fn quad_out_starts_fast() {
        // Ease-out covers more than half the distance in the first half.
        assert!(Ease::QuadOut.apply(0.5) > 0.5);
        assert_eq!(Ease::QuadOut.apply(0.0), 0.0);
        assert_eq!(Ease::QuadOut.apply(1.0), 1.0);
    }

    #[test]
    fn channel_settles_at_target() {
        let mut ch = Channel::new(Vec3::ZERO);
        ch.animate_to(Vec3::ONE, DEFAULT_DURATION, Ease::QuadOut);
        for _ in 0..60 {
            ch.tick(DT);
        }
        assert!(ch.settled());
        assert!((ch.value() - Vec3::ONE).length() < 1e-5);
    }

    #[test]
    fn retarget_supersedes_without_jumping() {
        let mut ch = Channel::new(0.0f32);
        ch.animate_to(1.0, 1.0, Ease::Linear);
        for _ in 0..30 {
            ch.tick(DT);
        }
        let mid = ch.value();
        assert!(mid > 0.0 && mid < 1.0);

        // Last writer wins: the new tween starts from the current value.
        ch.animate_to(-1.0, 1.0, Ease::Linear);
        assert_eq!(ch.value(), mid);
        for _ in 0..120 {
            ch.tick(DT);
        }
        assert!(ch.settled());
        assert!((ch.value() - (-1.0)).abs() < 1e-5);
    }

    #[test]
    fn set_cancels_in_flight_tween() {
        let mut ch = Channel::new(0.0f32);
        ch.animate_to(5.0, 1.0, Ease::Linear);
        ch.tick(DT);
        ch.set(2.0);
        assert!(ch.settled());
        for _ in 0..10 {
            ch.tick(DT);
        }
        assert_eq!(ch.value(), 2.0);
    }
}
