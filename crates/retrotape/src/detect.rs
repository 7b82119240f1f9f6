//! End-to-end helpers: BGR frame → mask → contours → tape pairs.

use retrotape_core::FrameView;
use retrotape_detect::{TapePairDetector, TargetPair};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::calibration::CalibrationBounds;
use crate::contours::extract_contours;
use crate::segment::threshold_mask;

/// Errors produced by the raw-buffer entry point.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid BGR frame buffer length (expected {expected} bytes, got {got})")]
    InvalidFrameBuffer { expected: usize, got: usize },
}

/// Segment one frame against the calibration bounds and run the tape-pair
/// detector over the resulting contours.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(frame, bounds, detector), fields(width = frame.width, height = frame.height))
)]
pub fn detect_tape_pairs(
    frame: &FrameView<'_>,
    bounds: &CalibrationBounds,
    detector: &TapePairDetector,
) -> Vec<TargetPair> {
    let mask = threshold_mask(frame, bounds);
    let contours = extract_contours(&mask);
    detector.detect_from_contours(&contours, frame.width as f32)
}

/// Same as [`detect_tape_pairs`], from a raw packed BGR buffer whose length
/// is validated against the stated dimensions.
pub fn detect_tape_pairs_raw(
    width: usize,
    height: usize,
    data: &[u8],
    bounds: &CalibrationBounds,
    detector: &TapePairDetector,
) -> Result<Vec<TargetPair>, DetectError> {
    let expected = width * height * 3;
    if data.len() != expected {
        return Err(DetectError::InvalidFrameBuffer {
            expected,
            got: data.len(),
        });
    }
    let view = FrameView {
        width,
        height,
        data,
    };
    Ok(detect_tape_pairs(&view, bounds, detector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrotape_detect::PairParams;

    #[test]
    fn raw_entry_rejects_mismatched_buffers() {
        let bounds = CalibrationBounds {
            low: [50, 100, 100],
            high: [70, 255, 255],
        };
        let detector = TapePairDetector::new(PairParams::default());
        let err = detect_tape_pairs_raw(10, 10, &[0u8; 7], &bounds, &detector).unwrap_err();
        assert!(matches!(
            err,
            DetectError::InvalidFrameBuffer {
                expected: 300,
                got: 7
            }
        ));
    }
}
