//! Per-frame processing loop wiring a frame source, the segmenter, the
//! tape-pair detector and a telemetry sink.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{info, warn};

use retrotape_detect::TapePairDetector;

use crate::calibration::{CalibrationError, CalibrationStore};
use crate::detect::detect_tape_pairs;
use crate::display::save_overlay;
use crate::sink::{TargetReport, TelemetrySink};
use crate::source::FrameSource;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// Counters for one pipeline run.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineStats {
    pub frames: u64,
    pub published: u64,
    pub elapsed: Duration,
}

impl PipelineStats {
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }
}

/// The processing loop. Collaborators are constructed by the caller and
/// injected, so both ends are substitutable in tests.
pub struct Pipeline<S, T> {
    source: S,
    sink: T,
    detector: TapePairDetector,
    calibration: CalibrationStore,
    overlay_dir: Option<PathBuf>,
}

impl<S: FrameSource, T: TelemetrySink> Pipeline<S, T> {
    pub fn new(
        source: S,
        sink: T,
        detector: TapePairDetector,
        calibration: CalibrationStore,
    ) -> Self {
        Self {
            source,
            sink,
            detector,
            calibration,
            overlay_dir: None,
        }
    }

    /// Also write annotated overlay PNGs to `dir`, one per frame.
    pub fn with_overlay_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.overlay_dir = Some(dir.into());
        self
    }

    /// Run until the source is exhausted or `cancel` is raised; the flag is
    /// checked once per iteration.
    ///
    /// Calibration bounds must load at startup (fail fast). Mid-run they
    /// are re-read every frame so a concurrent recalibration lands within
    /// one frame; a failing reload keeps the previous bounds for that
    /// frame. A frame's geometric failure only means no telemetry for that
    /// frame; the loop itself never halts on one.
    pub fn run(&mut self, cancel: &AtomicBool) -> Result<PipelineStats, PipelineError> {
        let mut bounds = self.calibration.load()?;
        let started = Instant::now();
        let mut stats = PipelineStats::default();

        while !cancel.load(Ordering::Relaxed) {
            let Some(frame) = self.source.next_frame() else {
                break;
            };

            match self.calibration.load() {
                Ok(fresh) => bounds = fresh,
                Err(err) => warn!("calibration reload failed, keeping previous bounds: {err}"),
            }

            let pairs = detect_tape_pairs(&frame.view(), &bounds, &self.detector);
            for pair in &pairs {
                let Some(offset) = pair.offset else {
                    // Degenerate crosshair: no valid target this frame.
                    continue;
                };
                let report = TargetReport {
                    offset,
                    left_distance: pair.left_distance,
                    right_distance: pair.right_distance,
                };
                match self.sink.publish(&report) {
                    Ok(()) => stats.published += 1,
                    Err(err) => warn!("telemetry publish failed: {err}"),
                }
            }

            if let Some(dir) = &self.overlay_dir {
                if let Err(err) = save_overlay(dir, stats.frames, &frame, &pairs) {
                    warn!("overlay write failed: {err}");
                }
            }

            stats.frames += 1;
        }

        stats.elapsed = started.elapsed();
        info!(
            "processed {} frames in {:.2}s (~{:.1} fps), {} reports published",
            stats.frames,
            stats.elapsed.as_secs_f64(),
            stats.fps(),
            stats.published
        );
        Ok(stats)
    }
}
