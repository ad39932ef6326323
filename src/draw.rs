//! Debug overlay: draws VisDrone boxes onto their crop image.

use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::error::VoctileError;
use crate::geom::{Annotation, CropLocal, Rectangle};
use crate::io::images::{load_image, save_image};
use crate::io::io_visdrone::read_visdrone_file;

const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Returns a copy of `image` with each box outlined in red.
///
/// The outline covers `(xmin, ymin)` to `(xmax, ymax)` inclusive. Parts
/// outside the image are clipped; unordered boxes are skipped.
pub fn draw_boxes(image: &DynamicImage, annotations: &[Annotation<CropLocal>]) -> RgbImage {
    let mut canvas = image.to_rgb8();
    for ann in annotations {
        match outline_rect(&ann.bbox) {
            Some(rect) => draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR),
            None => tracing::warn!(bbox = ?ann.bbox, "skipping box that cannot be drawn"),
        }
    }
    canvas
}

/// Loads an image and its VisDrone file, draws the boxes and writes the
/// result to `output`.
pub fn render_overlay(
    image_path: &Path,
    annotations_path: &Path,
    output: &Path,
) -> Result<usize, VoctileError> {
    let image = load_image(image_path)?;
    let annotations = read_visdrone_file(annotations_path)?;
    let canvas = draw_boxes(&image, &annotations);
    save_image(&DynamicImage::ImageRgb8(canvas), output)?;
    Ok(annotations.len())
}

fn outline_rect(bbox: &Rectangle<CropLocal>) -> Option<Rect> {
    if !bbox.is_ordered() {
        return None;
    }
    let left = i32::try_from(bbox.xmin).ok()?;
    let top = i32::try_from(bbox.ymin).ok()?;
    let width = u32::try_from(bbox.width()).ok()?.checked_add(1)?;
    let height = u32::try_from(bbox.height()).ok()?.checked_add(1)?;
    Some(Rect::at(left, top).of_size(width, height))
}
