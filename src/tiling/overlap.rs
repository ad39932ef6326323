//! Per-crop retention policy.
//!
//! For each crop window, an annotation in the resized frame is either kept
//! whole, kept and clipped to the crop, or dropped:
//!
//! 1. If its minimum corner lies before the window's minimum edge on either
//!    axis, it is dropped. Overflow past the minimum edge is never tolerated,
//!    however little of the box lies outside.
//! 2. If its maximum corner is also inside the window, it is kept whole.
//! 3. Otherwise it is kept and clipped only when the overflow past the
//!    window's maximum edge is strictly less than a third of the box's own
//!    extent on both axes.

use super::grid::CropWindow;
use crate::geom::transform::rebase;
use crate::geom::{Annotation, CropLocal, Rectangle, Scaled};

/// The policy's decision for one annotation against one crop window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Fully contained; re-based without clipping.
    Inside,
    /// Slightly past the window's maximum edge; re-based and clamped.
    Clipped,
    Dropped,
}

/// Decides how a resized-frame box relates to a crop window.
pub fn classify(bbox: &Rectangle<Scaled>, window: &CropWindow) -> Placement {
    let bounds = window.bounds();
    if bbox.xmin < bounds.xmin || bbox.ymin < bounds.ymin {
        return Placement::Dropped;
    }

    if bbox.xmax <= bounds.xmax && bbox.ymax <= bounds.ymax {
        return Placement::Inside;
    }

    if within_tolerance(bbox.xmin, bbox.xmax, bounds.xmax)
        && within_tolerance(bbox.ymin, bbox.ymax, bounds.ymax)
    {
        Placement::Clipped
    } else {
        Placement::Dropped
    }
}

/// `(max - edge) < (max - min) / 3`, evaluated exactly.
///
/// Widened to `i128` so that no pair of `i64` coordinates can overflow.
#[inline]
fn within_tolerance(min: i64, max: i64, edge: i64) -> bool {
    let overflow = i128::from(max) - i128::from(edge);
    let extent = i128::from(max) - i128::from(min);
    3 * overflow < extent
}

/// Applies the policy to one annotation, returning it in crop-local
/// coordinates if it survives.
pub fn place(ann: &Annotation<Scaled>, window: &CropWindow) -> Option<Annotation<CropLocal>> {
    match classify(&ann.bbox, window) {
        Placement::Inside => Some(rebase(ann, window.left, window.top)),
        Placement::Clipped => {
            let local = rebase(ann, window.left, window.top);
            let bbox = Rectangle::new(
                local.bbox.xmin,
                local.bbox.ymin,
                local.bbox.xmax.min(window.crop_size),
                local.bbox.ymax.min(window.crop_size),
            );
            Some(Annotation::new(local.label, bbox))
        }
        Placement::Dropped => None,
    }
}

/// Returns the annotations that belong in `window`, re-based to its local
/// frame, in input order.
pub fn overlap_annotations(
    scaled: &[Annotation<Scaled>],
    window: &CropWindow,
) -> Vec<Annotation<CropLocal>> {
    scaled.iter().filter_map(|ann| place(ann, window)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> CropWindow {
        // Cell (1, 1) of a 100px grid: [100, 200) x [100, 200)
        CropWindow::new(1, 1, 100)
    }

    fn ann(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Annotation<Scaled> {
        Annotation::new("human", Rectangle::new(xmin, ymin, xmax, ymax))
    }

    #[test]
    fn fully_contained_box_is_shifted_by_window_origin() {
        let kept = place(&ann(110, 120, 150, 160), &window()).expect("kept");
        assert_eq!(kept.bbox, Rectangle::new(10, 20, 50, 60));
        assert_eq!(kept.label, "human");
    }

    #[test]
    fn box_touching_max_edge_is_inside() {
        assert_eq!(
            classify(&Rectangle::new(150, 150, 200, 200), &window()),
            Placement::Inside
        );
    }

    #[test]
    fn min_edge_overflow_is_always_dropped() {
        // One pixel past the left edge, otherwise inside.
        assert_eq!(
            classify(&Rectangle::new(99, 110, 190, 190), &window()),
            Placement::Dropped
        );
        // One pixel past the top edge.
        assert_eq!(
            classify(&Rectangle::new(110, 99, 190, 190), &window()),
            Placement::Dropped
        );
    }

    #[test]
    fn small_max_edge_overflow_is_clipped() {
        // width 29, overflow 9 < 9.66..
        let kept = place(&ann(180, 110, 209, 140), &window()).expect("kept");
        assert_eq!(kept.bbox, Rectangle::new(80, 10, 100, 40));
    }

    #[test]
    fn overflow_of_exactly_one_third_is_dropped() {
        // width 30, overflow 10
        assert_eq!(
            classify(&Rectangle::new(180, 110, 210, 140), &window()),
            Placement::Dropped
        );
        // height 30, overflow 10
        assert_eq!(
            classify(&Rectangle::new(110, 180, 140, 210), &window()),
            Placement::Dropped
        );
    }

    #[test]
    fn non_integer_third_uses_exact_comparison() {
        // width 31: limit is 10.33.., overflow 10 is kept
        assert_eq!(
            classify(&Rectangle::new(179, 110, 210, 140), &window()),
            Placement::Clipped
        );
        // width 29: limit is 9.66.., overflow 10 is dropped
        assert_eq!(
            classify(&Rectangle::new(181, 110, 210, 140), &window()),
            Placement::Dropped
        );
    }

    #[test]
    fn overflow_on_both_axes_must_be_within_tolerance() {
        // x overflow ok (5 < 10), y overflow too large (15 >= 10)
        assert_eq!(
            classify(&Rectangle::new(175, 185, 205, 215), &window()),
            Placement::Dropped
        );
        let kept = place(&ann(175, 175, 205, 205), &window()).expect("kept");
        assert_eq!(kept.bbox, Rectangle::new(75, 75, 100, 100));
    }

    #[test]
    fn box_beyond_window_is_dropped() {
        assert_eq!(
            classify(&Rectangle::new(250, 110, 280, 140), &window()),
            Placement::Dropped
        );
        assert_eq!(
            classify(&Rectangle::new(110, 200, 140, 230), &window()),
            Placement::Dropped
        );
    }

    #[test]
    fn degenerate_boxes_follow_the_same_rules() {
        // Zero-width line inside the window
        assert_eq!(
            classify(&Rectangle::new(150, 110, 150, 140), &window()),
            Placement::Inside
        );
        // Zero-height line crossing the bottom edge: zero tolerance
        assert_eq!(
            classify(&Rectangle::new(110, 201, 140, 201), &window()),
            Placement::Dropped
        );
        // Zero-area point left of the window
        assert_eq!(
            classify(&Rectangle::new(50, 150, 50, 150), &window()),
            Placement::Dropped
        );
    }

    #[test]
    fn overlap_annotations_preserves_input_order() {
        let scaled = vec![
            ann(150, 150, 160, 160),
            ann(10, 10, 20, 20),
            ann(110, 110, 120, 120),
        ];
        let kept = overlap_annotations(&scaled, &window());
        assert_eq!(
            kept.iter().map(|a| a.bbox).collect::<Vec<_>>(),
            vec![Rectangle::new(50, 50, 60, 60), Rectangle::new(10, 10, 20, 20)]
        );
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        // Far past the max edge: overflow dwarfs a third of the extent.
        assert_eq!(
            classify(&Rectangle::new(150, 150, i64::MAX, 190), &window()),
            Placement::Dropped
        );
        // Unordered box with a saturated max corner.
        assert_eq!(
            classify(&Rectangle::new(150, 150, i64::MIN, 190), &window()),
            Placement::Inside
        );
        let kept = place(&ann(150, 150, i64::MIN, 190), &window()).expect("kept");
        assert_eq!(kept.bbox.xmax, i64::MIN);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(overlap_annotations(&[], &window()).is_empty());
    }
}
