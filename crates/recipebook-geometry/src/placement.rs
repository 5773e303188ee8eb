//! Pointer-to-placement and placement-to-pixel transforms.
//!
//! ## Learning: Option as a Rejection Value
//!
//! A click that misses the spread is not an error in the usual sense; the
//! caller just keeps waiting for a better click. Returning `Option` instead
//! of `Result` says exactly that: there may be no placement, and that's fine.

use serde::{Deserialize, Serialize};

use crate::spread::SpreadGeometry;
use crate::{Pointer, Side, clamp_percent};

/// A resolved sticker position on one page of a spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Which page of the spread was hit
    pub side: Side,
    /// Horizontal position in the placeable box, `0..=100`
    pub x_percent: f64,
    /// Vertical position in the placeable box, `0..=100`
    pub y_percent: f64,
}

/// Absolute pixel offset of a sticker's anchor within its page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelOffset {
    pub left: f64,
    pub top: f64,
}

/// Converts a pointer over the spread into a page-relative placement.
///
/// Returns `None` only when the pointer is off the spread entirely. Anywhere
/// on the spread, including the inset margins, the position is clamped into
/// the placeable box of the page under the pointer.
pub fn placement_from_pointer(pointer: Pointer, spread: SpreadGeometry) -> Option<Placement> {
    if !spread.contains(pointer.x, pointer.y) {
        return None;
    }

    let half_width = spread.page_width();
    let side = if pointer.x < half_width {
        Side::Left
    } else {
        Side::Right
    };

    let x_on_page = pointer.x % half_width;
    let placeable_width = spread.placeable_width();
    let placeable_height = spread.placeable_height();

    let x = (x_on_page - spread.inset).clamp(0.0, placeable_width);
    let y = (pointer.y - spread.inset).clamp(0.0, placeable_height);

    Some(Placement {
        side,
        x_percent: to_percent(x, placeable_width),
        y_percent: to_percent(y, placeable_height),
    })
}

/// Converts a stored placement back into a pixel offset on a page.
///
/// Percentages are expected to be in `0..=100` already; they are not
/// re-validated here.
pub fn pixel_from_placement(
    x_percent: f64,
    y_percent: f64,
    page_width: f64,
    page_height: f64,
    inset: f64,
) -> PixelOffset {
    PixelOffset {
        left: inset + (x_percent / 100.0) * (page_width - 2.0 * inset),
        top: inset + (y_percent / 100.0) * (page_height - 2.0 * inset),
    }
}

fn to_percent(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        clamp_percent(offset / extent * 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spread() -> SpreadGeometry {
        SpreadGeometry::default()
    }

    #[test]
    fn test_left_page_hit() {
        let placement = placement_from_pointer(Pointer::new(50.0, 50.0), spread()).unwrap();
        assert_eq!(placement.side, Side::Left);
        // 10px into a 620px wide box, 10px into a 720px tall box
        assert!((placement.x_percent - 10.0 / 620.0 * 100.0).abs() < 1e-9);
        assert!((placement.y_percent - 10.0 / 720.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_right_page_hit() {
        let placement = placement_from_pointer(Pointer::new(700.0 + 350.0, 400.0), spread()).unwrap();
        assert_eq!(placement.side, Side::Right);
        assert!((placement.x_percent - 310.0 / 620.0 * 100.0).abs() < 1e-9);
        assert!((placement.y_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_margin_clicks_clamp_to_box_edge() {
        let top_left = placement_from_pointer(Pointer::new(5.0, 5.0), spread()).unwrap();
        assert_eq!(top_left.x_percent, 0.0);
        assert_eq!(top_left.y_percent, 0.0);

        let bottom_right = placement_from_pointer(Pointer::new(1399.0, 799.0), spread()).unwrap();
        assert_eq!(bottom_right.side, Side::Right);
        assert_eq!(bottom_right.x_percent, 100.0);
        assert_eq!(bottom_right.y_percent, 100.0);
    }

    #[test]
    fn test_off_spread_is_rejected() {
        assert!(placement_from_pointer(Pointer::new(-1.0, 10.0), spread()).is_none());
        assert!(placement_from_pointer(Pointer::new(10.0, 800.0), spread()).is_none());
        assert!(placement_from_pointer(Pointer::new(1400.0, 10.0), spread()).is_none());
        assert!(placement_from_pointer(Pointer::new(f64::NAN, 10.0), spread()).is_none());
    }

    #[test]
    fn test_degenerate_box_places_at_origin() {
        let tiny = SpreadGeometry::new(60.0, 60.0, 40.0);
        let placement = placement_from_pointer(Pointer::new(10.0, 10.0), tiny).unwrap();
        assert_eq!(placement.x_percent, 0.0);
        assert_eq!(placement.y_percent, 0.0);
    }

    #[test]
    fn test_pixel_from_placement() {
        let offset = pixel_from_placement(50.0, 50.0, 700.0, 800.0, 40.0);
        assert_eq!(offset.left, 40.0 + 310.0);
        assert_eq!(offset.top, 40.0 + 360.0);

        let origin = pixel_from_placement(0.0, 0.0, 700.0, 800.0, 40.0);
        assert_eq!(origin, PixelOffset { left: 40.0, top: 40.0 });
    }

    proptest! {
        #[test]
        fn prop_round_trip_inside_box(
            fx in 0.001f64..0.999,
            fy in 0.001f64..0.999,
            right in any::<bool>(),
            page_width in 200.0f64..2000.0,
            page_height in 200.0f64..2000.0,
            inset in 0.0f64..60.0,
        ) {
            let spread = SpreadGeometry::from_page(page_width, page_height, inset);
            let x_on_page = inset + fx * spread.placeable_width();
            let y = inset + fy * spread.placeable_height();
            let x = if right { page_width + x_on_page } else { x_on_page };

            let placement = placement_from_pointer(Pointer::new(x, y), spread).unwrap();
            prop_assert_eq!(placement.side, if right { Side::Right } else { Side::Left });

            let offset = pixel_from_placement(
                placement.x_percent,
                placement.y_percent,
                page_width,
                page_height,
                inset,
            );
            // Within one percentage point of the placeable box
            prop_assert!((offset.left - x_on_page).abs() <= spread.placeable_width() / 100.0);
            prop_assert!((offset.top - y).abs() <= spread.placeable_height() / 100.0);
        }

        #[test]
        fn prop_percentages_always_in_range(
            x in -5000.0f64..5000.0,
            y in -5000.0f64..5000.0,
        ) {
            if let Some(placement) = placement_from_pointer(Pointer::new(x, y), spread()) {
                prop_assert!((0.0..=100.0).contains(&placement.x_percent));
                prop_assert!((0.0..=100.0).contains(&placement.y_percent));
            }
        }
    }
}
