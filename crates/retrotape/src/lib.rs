//! High-level facade crate for the `retrotape-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the core geometry and pairing crates
//! - (feature-gated) segmentation, contour extraction and end-to-end
//!   helpers over BGR rasters
//! - the pipeline driver that wires a frame source, the detector and a
//!   telemetry sink into the per-frame processing loop
//!
//! ## Quickstart
//!
//! ```no_run
//! use retrotape::detect::detect_tape_pairs;
//! use retrotape::{CalibrationStore, PairParams, TapePairDetector};
//! use retrotape_core::Frame;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bounds = CalibrationStore::new("calibration.json").load()?;
//! let detector = TapePairDetector::new(PairParams::default());
//!
//! let frame = Frame::new(640, 480); // one BGR frame from your capture path
//! let pairs = detect_tape_pairs(&frame.view(), &bounds, &detector);
//! for pair in &pairs {
//!     if let Some(offset) = pair.offset {
//!         println!("offset {offset:+.1} px");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`retrotape_core`] (re-exported as `core`): geometry primitives,
//!   contours, BGR frame views, logger.
//! - [`retrotape_detect`] (re-exported as `pair`): candidate selection,
//!   pairing engine, crosshair resolution.
//! - [`calibration`]: persisted HSV threshold bounds.
//! - [`segment`], [`contours`], [`detect`] (feature `image`): frame →
//!   mask → contours → pairs.
//! - [`source`], [`sink`], [`pipeline`]: injected collaborators and the
//!   processing loop.
//! - `retrotape` binary (feature `cli`): offline runner and threshold
//!   tuning persistence.

pub use retrotape_core as core;
pub use retrotape_detect as pair;

pub use retrotape_detect::{
    LeanConvention, PairParams, TapePairDetector, TargetPair,
};

pub mod calibration;
pub mod sink;
pub mod source;

pub use calibration::{CalibrationBounds, CalibrationError, CalibrationStore};
pub use sink::{JsonLineSink, TargetReport, TelemetrySink};
pub use source::{FrameSource, LatestFrameSlot};

#[cfg(feature = "image")]
pub mod contours;
#[cfg(feature = "image")]
pub mod detect;
#[cfg(feature = "image")]
pub mod display;
#[cfg(feature = "image")]
pub mod pipeline;
#[cfg(feature = "image")]
pub mod segment;

#[cfg(feature = "image")]
pub use pipeline::{Pipeline, PipelineError, PipelineStats};
#[cfg(feature = "image")]
pub use source::ImageSequenceSource;
