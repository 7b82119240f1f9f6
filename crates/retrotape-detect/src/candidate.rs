use log::debug;

use retrotape_core::{find_angle_deg, min_area_rect, short_sides, Contour, SidePair};

use crate::params::PairParams;

/// A contour that survived filtering, annotated with the derived geometry
/// the pairing scan needs.
#[derive(Clone, Debug)]
pub struct CandidateTarget {
    /// Enclosed contour area (px²).
    pub area: f32,
    /// Left edge of the axis-aligned bounding rectangle; the left-to-right
    /// ordering key.
    pub min_x: f32,
    /// Short sides of the minimum-area bounding rectangle.
    pub sides: SidePair,
    /// Inclination of the line joining the two short-side midpoints,
    /// degrees; 90.0 when that line is vertical.
    pub angle_deg: f32,
}

impl CandidateTarget {
    /// Annotate a contour with its bounding-rectangle geometry.
    ///
    /// `None` when the contour has too few distinct points for a
    /// minimum-area rectangle.
    pub fn from_contour(contour: &Contour) -> Option<Self> {
        let corners = min_area_rect(&contour.points)?;
        let sides = short_sides(&corners);
        let angle_deg = find_angle_deg(&sides.first.midpoint(), &sides.second.midpoint());
        Some(Self {
            area: contour.area(),
            min_x: contour.min_x(),
            sides,
            angle_deg,
        })
    }
}

/// Keep contours with enclosed area at or above the limit, order them left
/// to right, truncate to the candidate cap and annotate the survivors.
///
/// An empty input yields an empty output; there are no error conditions.
pub fn select_candidates(contours: &[Contour], params: &PairParams) -> Vec<CandidateTarget> {
    let mut candidates: Vec<CandidateTarget> = contours
        .iter()
        .filter(|c| c.area() >= params.min_area)
        .filter_map(|c| {
            let candidate = CandidateTarget::from_contour(c);
            if candidate.is_none() {
                debug!("contour over area limit has no bounding rectangle, dropped");
            }
            candidate
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.min_x
            .partial_cmp(&b.min_x)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(params.max_candidates);
    candidates
}
