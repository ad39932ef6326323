//! Tile grid orchestration.
//!
//! The source image is resized to exactly `width_crops * crop_size` by
//! `height_crops * crop_size` pixels, so the grid covers it with no remainder.
//! Every cell is matched against the scaled annotations, and the cells with
//! the most retained annotations are kept.

use std::cmp::Reverse;

use image::imageops::FilterType;
use image::DynamicImage;
use serde::Serialize;

use super::overlap::overlap_annotations;
use crate::error::VoctileError;
use crate::geom::transform::scale;
use crate::geom::{Annotation, CropLocal, Rectangle, Scaled, Source};

/// Grid and retention parameters for one tiling call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GridSpec {
    /// Side length of each square crop in pixels.
    pub crop_size: u32,
    /// How many crops to keep per image.
    pub top_n: usize,
    /// Number of crop columns.
    pub width_crops: u32,
    /// Number of crop rows.
    pub height_crops: u32,
}

impl GridSpec {
    pub fn new(crop_size: u32, top_n: usize, width_crops: u32, height_crops: u32) -> Self {
        Self {
            crop_size,
            top_n,
            width_crops,
            height_crops,
        }
    }

    /// Checks that every parameter is positive and that the resized image
    /// dimensions fit in `u32`.
    pub fn validate(&self) -> Result<(), VoctileError> {
        for (name, value) in [
            ("crop_size", self.crop_size as u64),
            ("width_crops", self.width_crops as u64),
            ("height_crops", self.height_crops as u64),
            ("top_n", self.top_n as u64),
        ] {
            if value == 0 {
                return Err(VoctileError::InvalidGridParameter {
                    message: format!("{name} must be greater than 0"),
                });
            }
        }

        if self.width_crops.checked_mul(self.crop_size).is_none()
            || self.height_crops.checked_mul(self.crop_size).is_none()
        {
            return Err(VoctileError::InvalidGridParameter {
                message: format!(
                    "grid of {}x{} crops of {}px exceeds the maximum image size",
                    self.width_crops, self.height_crops, self.crop_size
                ),
            });
        }

        Ok(())
    }

    /// Total number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.width_crops as usize * self.height_crops as usize
    }

    /// Size of the resized image the grid tiles exactly.
    pub fn resized_dimensions(&self) -> (u32, u32) {
        (
            self.width_crops * self.crop_size,
            self.height_crops * self.crop_size,
        )
    }

    /// Per-axis factors mapping source coordinates onto the resized image.
    pub fn scale_factors(&self, width: u32, height: u32) -> Result<(f64, f64), VoctileError> {
        if width == 0 || height == 0 {
            return Err(VoctileError::InvalidDimension { width, height });
        }

        let (resized_width, resized_height) = self.resized_dimensions();
        Ok((
            resized_width as f64 / width as f64,
            resized_height as f64 / height as f64,
        ))
    }

    /// Enumerates cell windows column by column: every row of column 0,
    /// then every row of column 1, and so on.
    pub fn windows(&self) -> impl Iterator<Item = CropWindow> {
        let crop_size = self.crop_size;
        let height_crops = self.height_crops;
        (0..self.width_crops).flat_map(move |column| {
            (0..height_crops).map(move |row| CropWindow::new(column, row, crop_size))
        })
    }
}

/// One grid cell's bounds in the resized image frame.
///
/// `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CropWindow {
    pub column: u32,
    pub row: u32,
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub crop_size: i64,
}

impl CropWindow {
    pub fn new(column: u32, row: u32, crop_size: u32) -> Self {
        let size = crop_size as i64;
        let left = column as i64 * size;
        let top = row as i64 * size;
        Self {
            column,
            row,
            left,
            top,
            right: left + size,
            bottom: top + size,
            crop_size: size,
        }
    }

    pub fn bounds(&self) -> Rectangle<Scaled> {
        Rectangle::new(self.left, self.top, self.right, self.bottom)
    }
}

/// A ranked cell before any pixels are touched.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPlan {
    pub window: CropWindow,
    pub annotations: Vec<Annotation<CropLocal>>,
}

/// A selected crop: pixels plus annotations in its local frame.
#[derive(Clone, Debug)]
pub struct TileCrop {
    pub window: CropWindow,
    pub image: DynamicImage,
    pub annotations: Vec<Annotation<CropLocal>>,
}

/// Orders cells by retained-annotation count, highest first, and keeps
/// `top_n`. Equal counts keep their enumeration order.
pub fn rank_cells(mut cells: Vec<CellPlan>, top_n: usize) -> Vec<CellPlan> {
    cells.sort_by_key(|cell| Reverse(cell.annotations.len()));
    cells.truncate(top_n);
    cells
}

/// Computes the selected cells for an image of the given size without
/// reading any pixels.
///
/// `annotations` are in the source image's frame.
pub fn plan_cells(
    image_width: u32,
    image_height: u32,
    annotations: &[Annotation<Source>],
    spec: &GridSpec,
) -> Result<Vec<CellPlan>, VoctileError> {
    spec.validate()?;
    let (k_x, k_y) = spec.scale_factors(image_width, image_height)?;

    let scaled: Vec<Annotation<Scaled>> = annotations
        .iter()
        .map(|ann| scale(ann, k_x, k_y))
        .collect();
    tracing::debug!(
        cells = spec.cell_count(),
        annotations = scaled.len(),
        k_x,
        k_y,
        "scaled annotations onto grid"
    );

    let cells: Vec<CellPlan> = spec
        .windows()
        .map(|window| {
            let annotations = overlap_annotations(&scaled, &window);
            tracing::trace!(
                column = window.column,
                row = window.row,
                retained = annotations.len(),
                "planned cell"
            );
            CellPlan {
                window,
                annotations,
            }
        })
        .collect();

    Ok(rank_cells(cells, spec.top_n))
}

/// Resizes `image` onto the grid and returns the `top_n` crops richest in
/// annotations, each with its annotations in crop-local coordinates.
///
/// Fails before producing any output if the image has a zero dimension or
/// the grid parameters are invalid.
pub fn crop_sample(
    image: &DynamicImage,
    annotations: &[Annotation<Source>],
    spec: &GridSpec,
    filter: FilterType,
) -> Result<Vec<TileCrop>, VoctileError> {
    let cells = plan_cells(image.width(), image.height(), annotations, spec)?;

    let (width, height) = spec.resized_dimensions();
    let resized;
    let grid_image = if image.width() == width && image.height() == height {
        image
    } else {
        resized = image.resize_exact(width, height, filter);
        &resized
    };

    let crop_size = spec.crop_size;
    Ok(cells
        .into_iter()
        .map(|cell| TileCrop {
            image: grid_image.crop_imm(
                cell.window.column * crop_size,
                cell.window.row * crop_size,
                crop_size,
                crop_size,
            ),
            window: cell.window,
            annotations: cell.annotations,
        })
        .collect())
}
