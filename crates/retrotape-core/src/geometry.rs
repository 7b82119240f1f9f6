//! Point-pair primitives: midpoint, distance, inclination angle and the
//! steering-line intersection solve.

use nalgebra::Point2;

/// Determinant magnitude below which two lines are judged parallel.
pub const PARALLEL_EPS: f64 = 1e-8;

/// Midpoint of the segment `a`..`b`.
#[inline]
pub fn midpoint(a: &Point2<f32>, b: &Point2<f32>) -> Point2<f32> {
    Point2::new(0.5 * (a.x + b.x), 0.5 * (a.y + b.y))
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Point2<f32>, b: &Point2<f32>) -> f32 {
    (b - a).norm()
}

/// Inclination of the line through `p1` and `p2` relative to horizontal,
/// in degrees.
///
/// Uses `atan(Δy/Δx)`, so the result lies in `(-90, 90)` and does not depend
/// on the order of the two points. A vertical line (`Δx == 0`) is defined as
/// exactly `90.0`; the branch is explicit rather than relying on the
/// division producing an infinity.
pub fn find_angle_deg(p1: &Point2<f32>, p2: &Point2<f32>) -> f32 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    if dx == 0.0 {
        return 90.0;
    }
    (dy / dx).atan().to_degrees()
}

/// Intersection of the two infinite lines through `a1`..`a2` and `b1`..`b2`.
///
/// Solves the 2x2 linear system in the direction-vector determinant. Returns
/// `None` when the determinant magnitude falls below [`PARALLEL_EPS`], i.e.
/// the lines are parallel or a segment is degenerate. The determinant is
/// accumulated in `f64` so the tolerance is meaningful for pixel-scale
/// coordinates.
pub fn line_intersection(
    a1: &Point2<f32>,
    a2: &Point2<f32>,
    b1: &Point2<f32>,
    b2: &Point2<f32>,
) -> Option<Point2<f32>> {
    let d1x = f64::from(a2.x - a1.x);
    let d1y = f64::from(a2.y - a1.y);
    let d2x = f64::from(b2.x - b1.x);
    let d2y = f64::from(b2.y - b1.y);

    let det = d1x * d2y - d1y * d2x;
    if det.abs() < PARALLEL_EPS {
        return None;
    }

    let rx = f64::from(b1.x - a1.x);
    let ry = f64::from(b1.y - a1.y);
    let t = (rx * d2y - ry * d2x) / det;

    Some(Point2::new(
        (f64::from(a1.x) + t * d1x) as f32,
        (f64::from(a1.y) + t * d1y) as f32,
    ))
}
