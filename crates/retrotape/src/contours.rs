//! Contour extraction over the binary mask.

use image::GrayImage;
use nalgebra::Point2;

use retrotape_core::Contour;

/// Extract region boundaries from a binary mask via Suzuki-Abe border
/// following.
///
/// Both outer borders and hole borders are kept; the candidate area filter
/// downstream disposes of specks and hole noise, so no pre-filtering
/// happens here.
pub fn extract_contours(mask: &GrayImage) -> Vec<Contour> {
    let raw: Vec<imageproc::contours::Contour<u32>> = imageproc::contours::find_contours(mask);

    raw.into_iter()
        .map(|c| {
            Contour::new(
                c.points
                    .into_iter()
                    .map(|p| Point2::new(p.x as f32, p.y as f32))
                    .collect(),
            )
        })
        .collect()
}
