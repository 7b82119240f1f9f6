use log::debug;

use retrotape_core::Contour;

use crate::candidate::select_candidates;
use crate::pairing::pair_candidates;
use crate::params::PairParams;
use crate::resolve::TargetPair;

/// Tape-pair detector: candidate filtering plus the pairing scan.
///
/// One frame in, zero or more resolved pairs out. All state is
/// per-invocation; the detector itself is immutable and reusable across
/// frames.
pub struct TapePairDetector {
    params: PairParams,
}

impl TapePairDetector {
    pub fn new(params: PairParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PairParams {
        &self.params
    }

    /// Run the scan over one frame's raw contour set.
    ///
    /// `frame_width` is the full image width in pixels; the steering offset
    /// is signed against its midline.
    pub fn detect_from_contours(&self, contours: &[Contour], frame_width: f32) -> Vec<TargetPair> {
        let candidates = select_candidates(contours, &self.params);
        debug!(
            "{} of {} contours kept as candidates",
            candidates.len(),
            contours.len()
        );
        pair_candidates(&candidates, frame_width, &self.params)
    }
}
