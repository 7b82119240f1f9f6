use serde::{Deserialize, Serialize};

/// Expected lean of a valid left/right strip pair.
///
/// The scan orders candidates left to right, and the sign of each strip's
/// midline angle encodes which way its top leans (image coordinates, y
/// down: negative is a top leaning right). Which combination of signs marks
/// a valid pair depends on how the camera is mounted relative to the field
/// target, so the convention is a parameter rather than a hard-coded rule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum LeanConvention {
    /// Strip tops lean toward each other: left strip negative, right strip
    /// positive. Matches the original upright mounting.
    #[default]
    Inward,
    /// Strip tops lean away from each other: left positive, right negative.
    Outward,
}

impl LeanConvention {
    /// Whether the (previous, current) angle signs form a valid pair.
    pub fn accepts(self, prev_angle_deg: f32, curr_angle_deg: f32) -> bool {
        match self {
            LeanConvention::Inward => prev_angle_deg < 0.0 && curr_angle_deg > 0.0,
            LeanConvention::Outward => prev_angle_deg > 0.0 && curr_angle_deg < 0.0,
        }
    }
}

/// Parameters for the tape-pair detector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PairParams {
    /// Minimal enclosed contour area (px²) to survive candidate filtering.
    pub min_area: f32,

    /// Keep at most this many of the leftmost candidates per frame.
    pub max_candidates: usize,

    /// Maximal mirror-angle mismatch `||a_prev| - |a_curr||` in degrees for
    /// two strips to count as a pair.
    pub angle_tolerance_deg: f32,

    /// Camera-mounting lean convention.
    pub lean: LeanConvention,
}

impl Default for PairParams {
    fn default() -> Self {
        Self {
            min_area: 1000.0,
            max_candidates: 4,
            angle_tolerance_deg: 15.0,
            lean: LeanConvention::Inward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inward_wants_negative_then_positive() {
        let lean = LeanConvention::Inward;
        assert!(lean.accepts(-10.0, 12.0));
        assert!(!lean.accepts(10.0, -12.0));
        assert!(!lean.accepts(-10.0, -12.0));
        assert!(!lean.accepts(0.0, 12.0));
    }

    #[test]
    fn outward_is_the_mirror_rule() {
        let lean = LeanConvention::Outward;
        assert!(lean.accepts(10.0, -12.0));
        assert!(!lean.accepts(-10.0, 12.0));
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = PairParams {
            min_area: 500.0,
            ..PairParams::default()
        };
        let json = serde_json::to_string(&params).expect("serialize");
        let back: PairParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.min_area, 500.0);
        assert_eq!(back.max_candidates, 4);
        assert_eq!(back.lean, LeanConvention::Inward);
    }
}
