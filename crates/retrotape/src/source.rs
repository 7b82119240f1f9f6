//! Frame sources: the latest-frame slot and an image-sequence reader.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use retrotape_core::Frame;

/// Supplies one frame per processing-loop iteration.
///
/// `None` means the source is exhausted and no further frame will ever
/// arrive; the loop ends. Sources are expected to hand over the *most
/// recent* available frame, dropping history under load.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<Frame>;
}

#[derive(Default)]
struct SlotState {
    frame: Option<Frame>,
    closed: bool,
}

/// Single-cell last-frame-wins buffer decoupling capture from processing.
///
/// A background capture path `store`s frames as fast as they arrive; each
/// store overwrites any unread predecessor, so the processing side only
/// ever sees the newest frame. There is no queueing and no backpressure;
/// frame loss under load is expected. Cloning shares the same cell.
#[derive(Clone, Default)]
pub struct LatestFrameSlot {
    inner: Arc<(Mutex<SlotState>, Condvar)>,
}

impl LatestFrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.inner.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Publish a frame, discarding any unread predecessor.
    pub fn store(&self, frame: Frame) {
        let mut state = self.lock();
        state.frame = Some(frame);
        self.inner.1.notify_one();
    }

    /// Mark the capture path finished. Readers drain whatever frame is
    /// still in the cell, then see the end of the stream.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        self.inner.1.notify_all();
    }

    /// Newest frame right now, if any; never waits.
    pub fn take_latest(&self) -> Option<Frame> {
        self.lock().frame.take()
    }
}

impl FrameSource for LatestFrameSlot {
    /// Wait for the next stored frame. The wait is on the cell, never on
    /// the capture device; whichever frame is newest when the processing
    /// side gets here wins.
    fn next_frame(&mut self) -> Option<Frame> {
        let mut state = self.lock();
        loop {
            if let Some(frame) = state.frame.take() {
                return Some(frame);
            }
            if state.closed {
                return None;
            }
            state = self
                .inner
                .1
                .wait(state)
                .unwrap_or_else(|e| e.into_inner());
        }
    }
}

/// Reads frames from still images on disk, oldest first.
///
/// Serves offline runs and tests in place of a live capture path. Files
/// that fail to load are skipped with a warning.
#[cfg(feature = "image")]
pub struct ImageSequenceSource {
    paths: std::collections::VecDeque<std::path::PathBuf>,
}

#[cfg(feature = "image")]
impl ImageSequenceSource {
    pub fn new(paths: impl IntoIterator<Item = std::path::PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

#[cfg(feature = "image")]
impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Option<Frame> {
        while let Some(path) = self.paths.pop_front() {
            match image::open(&path) {
                Ok(img) => {
                    let rgb = img.to_rgb8();
                    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
                    let mut frame = Frame::new(width, height);
                    for (x, y, pixel) in rgb.enumerate_pixels() {
                        let [r, g, b] = pixel.0;
                        frame.put_bgr(x as usize, y as usize, [b, g, r]);
                    }
                    return Some(frame);
                }
                Err(err) => {
                    log::warn!("skipping unreadable frame {path:?}: {err}");
                }
            }
        }
        None
    }
}
