//! Short-side resolution for a minimum-area bounding rectangle.

use nalgebra::Point2;

use crate::geometry::{distance, midpoint};

/// One edge of a bounding rectangle, as an unordered 2-point segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Side {
    pub a: Point2<f32>,
    pub b: Point2<f32>,
}

impl Side {
    pub fn length(&self) -> f32 {
        distance(&self.a, &self.b)
    }

    pub fn midpoint(&self) -> Point2<f32> {
        midpoint(&self.a, &self.b)
    }

    /// Endpoint with the smaller x. Ties go to `b`.
    pub fn leftmost(&self) -> Point2<f32> {
        if self.a.x < self.b.x {
            self.a
        } else {
            self.b
        }
    }

    /// Endpoint with the larger x. Ties go to `b`.
    pub fn rightmost(&self) -> Point2<f32> {
        if self.a.x > self.b.x {
            self.a
        } else {
            self.b
        }
    }
}

/// The two shortest, mutually non-adjacent edges of a bounding rectangle:
/// the physical tape's narrow ends. `first` is the shortest of the two.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SidePair {
    pub first: Side,
    pub second: Side,
}

/// Resolve the two short sides of a 4-corner bounding rectangle.
///
/// Corner order is unspecified, so all 6 unordered point pairs are ranked by
/// Euclidean distance and the two smallest win. For a rectangle with
/// `width != height` those are always the two short edges: the long edges
/// and both diagonals are strictly longer. A near-square box makes the
/// choice ambiguous; callers must tolerate either side being picked. That
/// is a known fidelity limit of the tape's aspect ratio, not a defect to
/// mask here.
pub fn short_sides(corners: &[Point2<f32>; 4]) -> SidePair {
    const COMBINATIONS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

    let mut ranked: Vec<(Side, f32)> = COMBINATIONS
        .iter()
        .map(|&(i, j)| {
            let side = Side {
                a: corners[i],
                b: corners[j],
            };
            let len = side.length();
            (side, len)
        })
        .collect();

    ranked.sort_by(|x, y| x.1.partial_cmp(&y.1).unwrap_or(std::cmp::Ordering::Equal));

    SidePair {
        first: ranked[0].0,
        second: ranked[1].0,
    }
}
