//! HSV color segmentation of a BGR frame.

use image::{GrayImage, Luma};

use retrotape_core::FrameView;

use crate::calibration::CalibrationBounds;

/// Convert one 8-bit BGR pixel to HSV in the 8-bit OpenCV convention:
/// hue halved into `0..=179`, saturation and value scaled to `0..=255`.
/// The calibration bounds are expressed in the same convention.
pub fn bgr_to_hsv(bgr: [u8; 3]) -> [u8; 3] {
    let b = f32::from(bgr[0]) / 255.0;
    let g = f32::from(bgr[1]) / 255.0;
    let r = f32::from(bgr[2]) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        120.0 + 60.0 * ((b - r) / delta)
    } else {
        240.0 + 60.0 * ((r - g) / delta)
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    [
        (((h / 2.0).round() as u16).min(179)) as u8,
        (s * 255.0).round() as u8,
        (max * 255.0).round() as u8,
    ]
}

/// Binary in-range mask over a frame: 255 where the pixel's HSV value lies
/// inside the calibration bounds (inclusive), 0 elsewhere.
pub fn threshold_mask(frame: &FrameView<'_>, bounds: &CalibrationBounds) -> GrayImage {
    let mut mask = GrayImage::new(frame.width as u32, frame.height as u32);
    for y in 0..frame.height {
        for x in 0..frame.width {
            if bounds.contains(bgr_to_hsv(frame.bgr(x, y))) {
                mask.put_pixel(x as u32, y as u32, Luma([255u8]));
            }
        }
    }
    mask
}
