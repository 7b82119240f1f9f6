//! Headless display: annotated overlay frames written as PNGs.

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

use retrotape_core::Frame;
use retrotape_detect::TargetPair;

const CURRENT_ANCHOR: Rgb<u8> = Rgb([0, 0, 255]);
const PREVIOUS_ANCHOR: Rgb<u8> = Rgb([0, 255, 0]);
const STEERING_LINE: Rgb<u8> = Rgb([255, 0, 0]);
const MIDLINE: Rgb<u8> = Rgb([0, 0, 0]);
const CROSSHAIR: Rgb<u8> = Rgb([255, 255, 0]);

/// Render one frame's detections over the frame and save it as
/// `frame_<index>.png` in `dir` (created if absent).
pub fn save_overlay(
    dir: &Path,
    frame_index: u64,
    frame: &Frame,
    pairs: &[TargetPair],
) -> image::ImageResult<()> {
    std::fs::create_dir_all(dir)?;

    let mut canvas = RgbImage::new(frame.width as u32, frame.height as u32);
    let view = frame.view();
    for y in 0..frame.height {
        for x in 0..frame.width {
            let [b, g, r] = view.bgr(x, y);
            canvas.put_pixel(x as u32, y as u32, Rgb([r, g, b]));
        }
    }

    let mid_x = frame.width as f32 / 2.0;
    draw_line_segment_mut(
        &mut canvas,
        (mid_x, 0.0),
        (mid_x, frame.height as f32),
        MIDLINE,
    );

    for pair in pairs {
        for anchor in [pair.current_top, pair.current_bottom] {
            draw_hollow_circle_mut(
                &mut canvas,
                (anchor.x as i32, anchor.y as i32),
                5,
                CURRENT_ANCHOR,
            );
        }
        for anchor in [pair.previous_top, pair.previous_bottom] {
            draw_hollow_circle_mut(
                &mut canvas,
                (anchor.x as i32, anchor.y as i32),
                5,
                PREVIOUS_ANCHOR,
            );
        }

        draw_line_segment_mut(
            &mut canvas,
            (pair.previous_bottom.x, pair.previous_bottom.y),
            (pair.current_top.x, pair.current_top.y),
            STEERING_LINE,
        );
        draw_line_segment_mut(
            &mut canvas,
            (pair.current_bottom.x, pair.current_bottom.y),
            (pair.previous_top.x, pair.previous_top.y),
            STEERING_LINE,
        );

        if let Some(p) = pair.intersection {
            draw_hollow_circle_mut(&mut canvas, (p.x as i32, p.y as i32), 8, CROSSHAIR);
        }
    }

    canvas.save(dir.join(format!("frame_{frame_index:05}.png")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_lands_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let frame = Frame::new(64, 48);
        save_overlay(dir.path(), 3, &frame, &[]).expect("save");
        assert!(dir.path().join("frame_00003.png").exists());
    }
}
