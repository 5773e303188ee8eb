//! Spread dimensions.
//!
//! ## Learning: Copy Types
//!
//! `SpreadGeometry` is three `f64`s, so it derives `Copy`. Passing it by
//! value is as cheap as passing a reference and keeps signatures simple.

use serde::{Deserialize, Serialize};

/// Pixel dimensions of a two-page spread and the inset around each page's
/// placeable box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadGeometry {
    /// Full spread width (both pages)
    pub width: f64,
    /// Spread height (same as a single page)
    pub height: f64,
    /// Margin between a page edge and its placeable box
    pub inset: f64,
}

impl SpreadGeometry {
    /// Creates a spread geometry.
    pub fn new(width: f64, height: f64, inset: f64) -> Self {
        Self {
            width,
            height,
            inset,
        }
    }

    /// Builds a spread from a single page's dimensions.
    pub fn from_page(page_width: f64, page_height: f64, inset: f64) -> Self {
        Self::new(page_width * 2.0, page_height, inset)
    }

    /// Width of one page.
    pub fn page_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Height of one page.
    pub fn page_height(&self) -> f64 {
        self.height
    }

    /// Width of a page's placeable box. Never negative.
    pub fn placeable_width(&self) -> f64 {
        (self.page_width() - 2.0 * self.inset).max(0.0)
    }

    /// Height of a page's placeable box. Never negative.
    pub fn placeable_height(&self) -> f64 {
        (self.height - 2.0 * self.inset).max(0.0)
    }

    /// Returns true if `(x, y)` lies on the spread.
    ///
    /// The right and bottom edges are exclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width && y < self.height
    }
}

impl Default for SpreadGeometry {
    fn default() -> Self {
        Self::from_page(700.0, 800.0, 40.0)
    }
}
