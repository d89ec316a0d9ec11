//! Pixel-offset smooth scroll with exponential ease-out.
//!
//! Stands in for the browser's `behavior: "smooth"`: each frame covers a fixed
//! share of the remaining distance, so the track decelerates into place.

/// Scroll-offset animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current offset in page pixels.
    position: f64,
    target: f64,
    /// `position += (target - position) * speed` each tick.
    /// Good range: 0.25–0.45 at 30 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(from: f64, to: f64, speed: f64) -> Self {
        Self {
            position: from,
            target: to,
            speed: speed.clamp(0.05, 1.0),
        }
    }

    /// Redirect a running animation; keeps the current position.
    pub fn retarget(&mut self, to: f64) {
        self.target = to;
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Advance one frame and return the new offset.
    pub fn tick(&mut self) -> f64 {
        self.position += (self.target - self.position) * self.speed;
        if (self.target - self.position).abs() < 0.5 {
            self.position = self.target;
        }
        self.position
    }

    /// True until the offset has reached its target.
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}
