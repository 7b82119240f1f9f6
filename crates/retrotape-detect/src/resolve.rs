//! Crosshair geometry for an accepted pair: anchor corners, steering-line
//! intersection and flank distances.

use nalgebra::Point2;

use retrotape_core::{distance, line_intersection, Side, SidePair};

use crate::candidate::CandidateTarget;

/// Two adjacent candidates resolved into a virtual crosshair.
///
/// `previous` is the left strip, `current` the right one (the scan runs
/// left to right). The four anchors are the inner-facing corners flanking
/// the gap between the strips.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetPair {
    pub previous_top: Point2<f32>,
    pub previous_bottom: Point2<f32>,
    pub current_top: Point2<f32>,
    pub current_bottom: Point2<f32>,
    /// Steering-line intersection. `None` when the lines are parallel or
    /// degenerate, which callers treat as "no valid target" for the frame.
    pub intersection: Option<Point2<f32>>,
    /// Length of the previous-bottom → current-top steering line.
    pub left_distance: f32,
    /// Length of the current-bottom → previous-top steering line.
    pub right_distance: f32,
    /// Signed horizontal distance from the intersection to the image
    /// center; positive is target right of center. `None` exactly when
    /// `intersection` is.
    pub offset: Option<f32>,
}

/// Split a candidate's short sides into (top, bottom) by the y of each
/// side's first point; smaller y (higher in the image) is the top.
fn top_bottom(sides: &SidePair) -> (Side, Side) {
    if sides.first.a.y < sides.second.a.y {
        (sides.first, sides.second)
    } else {
        (sides.second, sides.first)
    }
}

/// Resolve an accepted (previous, current) pair into its crosshair.
///
/// The current (right) strip contributes the leftmost point of each of its
/// short sides, the previous (left) strip the rightmost point of each of
/// its own: the corner pair closest to the gap, on both the top and the
/// bottom edge. The two steering lines joined across the gap cross inside
/// it; their intersection against the frame midline is the steering offset.
pub fn resolve_pair(
    previous: &CandidateTarget,
    current: &CandidateTarget,
    frame_width: f32,
) -> TargetPair {
    let (prev_top_side, prev_bottom_side) = top_bottom(&previous.sides);
    let (curr_top_side, curr_bottom_side) = top_bottom(&current.sides);

    let previous_top = prev_top_side.rightmost();
    let previous_bottom = prev_bottom_side.rightmost();
    let current_top = curr_top_side.leftmost();
    let current_bottom = curr_bottom_side.leftmost();

    let intersection =
        line_intersection(&previous_bottom, &current_top, &current_bottom, &previous_top);

    TargetPair {
        previous_top,
        previous_bottom,
        current_top,
        current_bottom,
        intersection,
        left_distance: distance(&previous_bottom, &current_top),
        right_distance: distance(&current_bottom, &previous_top),
        offset: intersection.map(|p| p.x - frame_width / 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn candidate_with_sides(top: Side, bottom: Side) -> CandidateTarget {
        CandidateTarget {
            area: 1200.0,
            min_x: top.a.x.min(bottom.a.x),
            sides: SidePair {
                first: top,
                second: bottom,
            },
            angle_deg: 0.0,
        }
    }

    fn side(ax: f32, ay: f32, bx: f32, by: f32) -> Side {
        Side {
            a: Point2::new(ax, ay),
            b: Point2::new(bx, by),
        }
    }

    /// Mirror-symmetric pair around x = 320.
    fn symmetric_pair() -> (CandidateTarget, CandidateTarget) {
        let previous = candidate_with_sides(
            side(100.0, 100.0, 120.0, 100.0),
            side(90.0, 200.0, 110.0, 200.0),
        );
        let current = candidate_with_sides(
            side(520.0, 100.0, 540.0, 100.0),
            side(530.0, 200.0, 550.0, 200.0),
        );
        (previous, current)
    }

    #[test]
    fn anchors_are_the_inner_facing_corners() {
        let (previous, current) = symmetric_pair();
        let pair = resolve_pair(&previous, &current, 640.0);

        assert_eq!(pair.previous_top, Point2::new(120.0, 100.0));
        assert_eq!(pair.previous_bottom, Point2::new(110.0, 200.0));
        assert_eq!(pair.current_top, Point2::new(520.0, 100.0));
        assert_eq!(pair.current_bottom, Point2::new(530.0, 200.0));
    }

    #[test]
    fn side_order_does_not_change_top_bottom_split() {
        let (previous, current) = symmetric_pair();
        let swapped = CandidateTarget {
            sides: SidePair {
                first: previous.sides.second,
                second: previous.sides.first,
            },
            ..previous.clone()
        };
        let a = resolve_pair(&previous, &current, 640.0);
        let b = resolve_pair(&swapped, &current, 640.0);
        assert_eq!(a.previous_top, b.previous_top);
        assert_eq!(a.previous_bottom, b.previous_bottom);
    }

    #[test]
    fn symmetric_pair_is_centered_with_equal_flanks() {
        let (previous, current) = symmetric_pair();
        let pair = resolve_pair(&previous, &current, 640.0);

        let p = pair.intersection.expect("crossing steering lines");
        assert_relative_eq!(p.x, 320.0, epsilon = 1e-3);
        assert_relative_eq!(pair.offset.unwrap(), 0.0, epsilon = 1e-3);
        assert_relative_eq!(pair.left_distance, pair.right_distance, epsilon = 1e-3);
    }

    #[test]
    fn offset_is_signed_from_frame_center() {
        let (previous, current) = symmetric_pair();
        // Same geometry against a narrower frame: intersection at x = 320,
        // center at 240.
        let pair = resolve_pair(&previous, &current, 480.0);
        assert_relative_eq!(pair.offset.unwrap(), 80.0, epsilon = 1e-3);
    }

    #[test]
    fn off_center_intersection_gives_a_positive_offset() {
        // The symmetric geometry shifted 80 px right: the intersection lands
        // at x = 400 against a 640-wide frame.
        let previous = candidate_with_sides(
            side(180.0, 100.0, 200.0, 100.0),
            side(170.0, 200.0, 190.0, 200.0),
        );
        let current = candidate_with_sides(
            side(600.0, 100.0, 620.0, 100.0),
            side(610.0, 200.0, 630.0, 200.0),
        );
        let pair = resolve_pair(&previous, &current, 640.0);
        assert_relative_eq!(pair.intersection.unwrap().x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(pair.offset.unwrap(), 80.0, epsilon = 1e-3);
    }

    #[test]
    fn parallel_steering_lines_yield_no_offset() {
        // Horizontally overlapping strips make both steering lines vertical:
        // previous-bottom sits straight under current-top and previous-top
        // straight over current-bottom.
        let previous = candidate_with_sides(
            side(290.0, 100.0, 310.0, 100.0),
            side(280.0, 200.0, 300.0, 200.0),
        );
        let current = candidate_with_sides(
            side(300.0, 100.0, 320.0, 100.0),
            side(310.0, 200.0, 330.0, 200.0),
        );
        let pair = resolve_pair(&previous, &current, 640.0);
        assert!(pair.intersection.is_none());
        assert!(pair.offset.is_none());
        // Flank distances are still defined.
        assert!(pair.left_distance > 0.0);
        assert!(pair.right_distance > 0.0);
    }
}
