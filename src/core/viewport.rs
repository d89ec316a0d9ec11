//! Viewport dimensions and the compact-layout query.

/// Widths at or below this count as a compact (mobile) layout.
pub const COMPACT_BREAKPOINT: f64 = 1023.0;

/// Outer window size plus the width taken by the vertical scrollbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Pixels the page scrollbar occupies; `0` when the page does not scroll
    /// or scrolling is locked.
    pub scrollbar_width: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scrollbar_width: 0.0,
        }
    }

    /// Width available to content, i.e. the window width minus the scrollbar.
    pub fn client_width(&self) -> f64 {
        (self.width - self.scrollbar_width).max(0.0)
    }

    /// `true` iff the current width is at or below `breakpoint`.
    ///
    /// Never cached: the window can be resized at any time.
    pub fn is_compact(&self, breakpoint: f64) -> bool {
        self.width <= breakpoint
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
