// File: crates/simplechart-core/src/types.rs
// Summary: Shared types and constants (container fallback size, plot margins).

/// Fallback container width in pixels when no inline width is set.
pub const DEFAULT_WIDTH: i32 = 400;
/// Fallback container height in pixels when no inline height is set.
pub const DEFAULT_HEIGHT: i32 = 250;

/// Space between the container edge and the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal margin (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(10, 25, 30, 25)
    }
}

/// Outer container size and the plot area left after margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotSize {
    pub outer_width: i32,
    pub outer_height: i32,
    pub margin: Margin,
}

impl PlotSize {
    pub fn new(outer_width: i32, outer_height: i32, margin: Margin) -> Self {
        Self { outer_width, outer_height, margin }
    }

    /// Drawable width; may be negative for containers narrower than the margins.
    pub fn width(&self) -> f64 {
        f64::from(self.outer_width) - f64::from(self.margin.hsum())
    }

    /// Drawable height; may be negative for containers shorter than the margins.
    pub fn height(&self) -> f64 {
        f64::from(self.outer_height) - f64::from(self.margin.vsum())
    }
}

impl Default for PlotSize {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, Margin::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plot_area_subtracts_margins() {
        let size = PlotSize::default();
        assert_eq!(size.width(), 350.0);
        assert_eq!(size.height(), 210.0);
    }
}
