//! Core geometry and shared types for vision-tape target detection.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any image decoder or contour extractor; those live behind the
//! `retrotape` facade. Everything here operates on `nalgebra::Point2<f32>`
//! values and plain byte buffers.

mod contour;
mod geometry;
mod image;
mod logger;
mod minrect;
mod sides;

pub use contour::Contour;
pub use geometry::{distance, find_angle_deg, line_intersection, midpoint, PARALLEL_EPS};
pub use image::{Frame, FrameView};
pub use minrect::{convex_hull, min_area_rect};
pub use sides::{short_sides, Side, SidePair};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
