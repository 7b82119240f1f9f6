//! Contour boundary type produced once per frame by the extractor.

use nalgebra::Point2;

/// Ordered boundary of one connected foreground region in the mask.
///
/// Created per frame, never mutated, discarded at end of frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<Point2<f32>>,
}

impl Contour {
    pub fn new(points: Vec<Point2<f32>>) -> Self {
        Self { points }
    }

    /// Enclosed area by the shoelace formula. Fewer than 3 points enclose
    /// nothing.
    pub fn area(&self) -> f32 {
        let pts = &self.points;
        if pts.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0f32;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            sum += a.x * b.y - b.x * a.y;
        }
        0.5 * sum.abs()
    }

    /// Left edge of the axis-aligned bounding rectangle; the left-to-right
    /// sort key for candidate ordering. Empty contours sort last.
    pub fn min_x(&self) -> f32 {
        self.points
            .iter()
            .map(|p| p.x)
            .fold(f32::INFINITY, f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn area_of_axis_aligned_square() {
        let c = Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]);
        assert_relative_eq!(c.area(), 100.0);
    }

    #[test]
    fn area_is_orientation_independent() {
        let cw = Contour::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(6.0, 4.0),
            Point2::new(6.0, 0.0),
        ]);
        assert_relative_eq!(cw.area(), 24.0);
    }

    #[test]
    fn degenerate_contours_have_zero_area() {
        assert_eq!(Contour::default().area(), 0.0);
        let segment = Contour::new(vec![Point2::new(1.0, 2.0), Point2::new(5.0, 2.0)]);
        assert_eq!(segment.area(), 0.0);
    }

    #[test]
    fn min_x_picks_left_edge() {
        let c = Contour::new(vec![
            Point2::new(7.0, 0.0),
            Point2::new(3.0, 5.0),
            Point2::new(9.0, 9.0),
        ]);
        assert_eq!(c.min_x(), 3.0);
        assert!(Contour::default().min_x().is_infinite());
    }
}
