//! Window-tracked viewport dimensions and the fixed output pixel ratio.

/// The render surface is always configured at twice the logical viewport
/// resolution, matching the reference visual regardless of device scale.
pub const PIXEL_RATIO: u32 = 2;

/// Logical viewport size. Source of truth is the window; re-read on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Aspect ratio from the logical dimensions.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Surface dimensions in output pixels.
    pub fn physical(&self) -> (u32, u32) {
        (self.width * PIXEL_RATIO, self.height * PIXEL_RATIO)
    }

    /// Applies a resize event. Returns `true` if the dimensions changed.
    /// Zero-sized updates (mid-minimize) are ignored; repeated events with
    /// unchanged dimensions are no-ops.
    pub fn set(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_tracks_dimensions() {
        let mut vp = Viewport::new(1280, 720);
        assert_eq!(vp.aspect(), 1280.0 / 720.0);

        assert!(vp.set(1000, 500));
        assert_eq!(vp.aspect(), 2.0);
    }

    #[test]
    fn physical_size_is_doubled() {
        let vp = Viewport::new(640, 480);
        assert_eq!(vp.physical(), (1280, 960));
    }

    #[test]
    fn zero_and_repeat_resizes_are_ignored() {
        let mut vp = Viewport::new(800, 600);
        assert!(!vp.set(0, 600));
        assert!(!vp.set(800, 0));
        assert!(!vp.set(800, 600));
        assert_eq!(vp, Viewport::new(800, 600));
    }
}
