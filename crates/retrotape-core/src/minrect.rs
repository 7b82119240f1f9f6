//! Minimum-area enclosing rectangle via convex hull + rotating calipers.

use nalgebra::{Point2, Vector2};

fn cross(o: &Point2<f32>, a: &Point2<f32>, b: &Point2<f32>) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn sort_key(p: &Point2<f32>) -> (f32, f32) {
    (p.x, p.y)
}

/// Convex hull of a point set (Andrew's monotone chain).
///
/// Returns the hull vertices in boundary order with collinear points
/// removed. Inputs with fewer than three distinct points come back
/// unchanged (deduplicated); collinear inputs collapse to the two extremes.
pub fn convex_hull(points: &[Point2<f32>]) -> Vec<Point2<f32>> {
    let mut pts: Vec<Point2<f32>> = points.to_vec();
    pts.sort_by(|a, b| {
        sort_key(a)
            .partial_cmp(&sort_key(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<Point2<f32>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point2<f32>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    // Endpoints are shared between the two chains.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Minimum-area rectangle (at any rotation) enclosing `points`.
///
/// Rotating calipers over the convex hull: one rectangle side is always
/// flush with a hull edge, so scanning hull edges and projecting the hull
/// onto each edge frame finds the optimum. Corner order is *not* specified;
/// consumers that care about sides must go through [`crate::short_sides`].
///
/// Returns `None` for inputs with fewer than three distinct points. A
/// collinear input degenerates to a zero-width rectangle spanning the two
/// extremes, which downstream treats like any near-square ambiguity.
pub fn min_area_rect(points: &[Point2<f32>]) -> Option<[Point2<f32>; 4]> {
    let mut distinct: Vec<Point2<f32>> = points.to_vec();
    distinct.sort_by(|a, b| {
        sort_key(a)
            .partial_cmp(&sort_key(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    distinct.dedup();
    if distinct.len() < 3 {
        return None;
    }

    let hull = convex_hull(&distinct);
    if hull.len() == 2 {
        return Some([hull[0], hull[1], hull[1], hull[0]]);
    }

    let n = hull.len();
    let mut best_area = f32::INFINITY;
    let mut best: Option<[Point2<f32>; 4]> = None;

    for i in 0..n {
        let edge = hull[(i + 1) % n] - hull[i];
        let len = edge.norm();
        if len <= f32::EPSILON {
            continue;
        }
        let u = edge / len;
        let v = Vector2::new(-u.y, u.x);

        let mut min_u = f32::INFINITY;
        let mut max_u = f32::NEG_INFINITY;
        let mut min_v = f32::INFINITY;
        let mut max_v = f32::NEG_INFINITY;
        for p in &hull {
            let d = p - hull[i];
            let pu = d.dot(&u);
            let pv = d.dot(&v);
            min_u = min_u.min(pu);
            max_u = max_u.max(pu);
            min_v = min_v.min(pv);
            max_v = max_v.max(pv);
        }

        let area = (max_u - min_u) * (max_v - min_v);
        if area < best_area {
            best_area = area;
            let o = hull[i];
            best = Some([
                o + u * min_u + v * min_v,
                o + u * max_u + v * min_v,
                o + u * max_u + v * max_v,
                o + u * min_u + v * max_v,
            ]);
        }
    }

    best
}
