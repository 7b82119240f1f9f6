//! Persisted HSV threshold bounds for the segmenter.
//!
//! The bounds live in one JSON document on disk. The offline tuning
//! workflow is the only writer; the processing loop re-reads the file every
//! frame, so a concurrent recalibration is picked up within one frame.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Lower/upper HSV triplets delimiting foreground pixels.
///
/// Channel layout is `[h, s, v]` in the 8-bit OpenCV convention: hue
/// halved into `0..=179`, saturation and value in `0..=255`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBounds {
    pub low: [u8; 3],
    pub high: [u8; 3],
}

impl CalibrationBounds {
    /// Inclusive per-channel range test.
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.low[i] <= hsv[i] && hsv[i] <= self.high[i])
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("cannot read calibration file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("calibration file {path:?} is corrupt: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode calibration bounds: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("cannot write calibration file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Calibration store bound to one file path.
///
/// Missing or corrupt bounds are a fail-fast condition at startup; the
/// segmenter never falls back to silent defaults.
pub struct CalibrationStore {
    path: PathBuf,
}

impl CalibrationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted bounds.
    pub fn load(&self) -> Result<CalibrationBounds, CalibrationError> {
        let text = fs::read_to_string(&self.path).map_err(|source| CalibrationError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CalibrationError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the persisted bounds. Used by the offline tuning workflow
    /// only; the processing loop never writes.
    pub fn save(&self, bounds: &CalibrationBounds) -> Result<(), CalibrationError> {
        let json = serde_json::to_vec_pretty(bounds).map_err(CalibrationError::Encode)?;
        fs::write(&self.path, json).map_err(|source| CalibrationError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CalibrationBounds {
        CalibrationBounds {
            low: [50, 100, 100],
            high: [70, 255, 255],
        }
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let bounds = sample();
        assert!(bounds.contains([50, 100, 100]));
        assert!(bounds.contains([70, 255, 255]));
        assert!(bounds.contains([60, 180, 200]));
        assert!(!bounds.contains([49, 180, 200]));
        assert!(!bounds.contains([71, 180, 200]));
        assert!(!bounds.contains([60, 99, 200]));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CalibrationStore::new(dir.path().join("hsv.json"));
        store.save(&sample()).expect("save");
        assert_eq!(store.load().expect("load"), sample());
    }

    #[test]
    fn missing_file_fails_fast() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CalibrationStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load(), Err(CalibrationError::Read { .. })));
    }

    #[test]
    fn corrupt_file_fails_fast() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hsv.json");
        std::fs::write(&path, b"{not json").expect("write");
        let store = CalibrationStore::new(path);
        assert!(matches!(store.load(), Err(CalibrationError::Parse { .. })));
    }
}
