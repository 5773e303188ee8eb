//! # Recipebook Geometry
//!
//! Maps pointer coordinates over a two-page spread to sticker positions,
//! and stored sticker positions back to pixels on a page.
//!
//! ## Coordinate Spaces
//!
//! ```text
//!  spread (0,0)
//!  ┌───────────────────────┬───────────────────────┐
//!  │ inset                 │ inset                 │
//!  │   ┌───────────────┐   │   ┌───────────────┐   │
//!  │   │ placeable box │   │   │ placeable box │   │
//!  │   │ (0..100 %)    │   │   │ (0..100 %)    │   │
//!  │   └───────────────┘   │   └───────────────┘   │
//!  │        left           │        right          │
//!  └───────────────────────┴───────────────────────┘
//! ```
//!
//! Stickers are stored as percentages of the placeable box, never as pixels,
//! so the same sticker lands in the same spot at any page size.
//!
//! Everything here is pure and stateless.

mod placement;
mod spread;

pub use placement::{Placement, PixelOffset, pixel_from_placement, placement_from_pointer};
pub use spread::SpreadGeometry;

use serde::{Deserialize, Serialize};

/// Which half of a spread a page occupies.
///
/// Page index `i` in a page sequence is `Left` when `i` is even and
/// `Right` when it is odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the side of the page at `page_index` in a flattened sequence.
    pub fn of_page(page_index: usize) -> Self {
        if page_index % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Offset of this side within a spread (0 for left, 1 for right).
    pub fn offset(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// A pointer position relative to the spread's top-left corner, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    /// Creates a new pointer position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Clamps a percentage into `[0, 100]`.
///
/// NaN is treated as 0 so a stored position is always a valid number.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
