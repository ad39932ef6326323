//! Dataset-level tiling: walk a VOC dataset, tile each image and write the
//! kept crops in VisDrone layout.
//!
//! # Output layout
//!
//! ```text
//! <out>/images/<stem>_<rank>.<ext>
//! <out>/annotations/<stem>_<rank>.txt
//! ```
//!
//! `rank` is 0-based: `_0` is the crop with the most retained annotations.

use std::fs;
use std::path::Path;

use image::DynamicImage;

use crate::config::TileSettings;
use crate::error::VoctileError;
use crate::geom::{Annotation, Source};
use crate::io::images::{image_dimensions, load_image, save_image};
use crate::io::io_visdrone::save_annotations;
use crate::io::io_voc_xml::{discover_layout, read_voc_annotations, VocLayout};
use crate::tiling::{crop_sample, plan_cells, CropSummary, ImageTileSummary, TileReport};

pub const IMAGES_DIR: &str = "images";
pub const ANNOTATIONS_DIR: &str = "annotations";

/// Options for [`tile_dataset`].
#[derive(Clone, Debug)]
pub struct TileOptions {
    pub settings: TileSettings,
    /// Stems to process. Empty means every annotation file in the dataset.
    pub stems: Vec<String>,
    /// Plan only: read image sizes from headers and write nothing.
    pub dry_run: bool,
}

/// Tiles every selected image of the VOC dataset at `voc_dir` into `out_dir`.
///
/// Stops at the first failing image.
pub fn tile_dataset(
    voc_dir: &Path,
    out_dir: &Path,
    options: &TileOptions,
) -> Result<TileReport, VoctileError> {
    let layout = discover_layout(voc_dir)?;
    let stems = if options.stems.is_empty() {
        layout.list_stems()?
    } else {
        options.stems.clone()
    };

    tracing::info!(
        images = stems.len(),
        root = %layout.root.display(),
        dry_run = options.dry_run,
        "tiling dataset"
    );

    let mut report = TileReport::new(options.settings.grid, options.dry_run);
    for stem in &stems {
        let summary = if options.dry_run {
            plan_image(&layout, stem, &options.settings)?
        } else {
            tile_image(&layout, stem, out_dir, &options.settings)?
        };
        tracing::info!(
            %stem,
            crops = summary.crops.len(),
            source_annotations = summary.source_annotations,
            "tiled image"
        );
        report.add(summary);
    }

    Ok(report)
}

/// Loads the image and source-frame annotations for `stem`.
pub fn load_sample(
    layout: &VocLayout,
    stem: &str,
) -> Result<(DynamicImage, Vec<Annotation<Source>>), VoctileError> {
    let image = load_image(&layout.image_path(stem)?)?;
    let annotations = read_voc_annotations(&layout.annotation_path(stem))?;
    Ok((image, annotations))
}

/// Tiles one image and writes its kept crops.
pub fn tile_image(
    layout: &VocLayout,
    stem: &str,
    out_dir: &Path,
    settings: &TileSettings,
) -> Result<ImageTileSummary, VoctileError> {
    let (image, annotations) = load_sample(layout, stem)?;
    let crops = crop_sample(
        &image,
        &annotations,
        &settings.grid,
        settings.filter.to_image_filter(),
    )?;

    let images_dir = out_dir.join(IMAGES_DIR);
    let annotations_dir = out_dir.join(ANNOTATIONS_DIR);
    fs::create_dir_all(&images_dir).map_err(VoctileError::Io)?;

    let mut summaries = Vec::with_capacity(crops.len());
    for (rank, crop) in crops.iter().enumerate() {
        let name = crop_name(stem, rank);
        save_image(
            &crop.image,
            &images_dir.join(format!("{name}.{}", settings.image_extension)),
        )?;
        save_annotations(&name, &crop.annotations, &annotations_dir)?;
        tracing::debug!(%name, column = crop.window.column, row = crop.window.row, "wrote crop");

        summaries.push(CropSummary {
            name,
            column: crop.window.column,
            row: crop.window.row,
            annotations: crop.annotations.len(),
        });
    }

    Ok(ImageTileSummary {
        stem: stem.to_string(),
        source_width: image.width(),
        source_height: image.height(),
        source_annotations: annotations.len(),
        crops: summaries,
    })
}

/// Computes what [`tile_image`] would write, without decoding pixels.
pub fn plan_image(
    layout: &VocLayout,
    stem: &str,
    settings: &TileSettings,
) -> Result<ImageTileSummary, VoctileError> {
    let (width, height) = image_dimensions(&layout.image_path(stem)?)?;
    let annotations = read_voc_annotations(&layout.annotation_path(stem))?;
    let cells = plan_cells(width, height, &annotations, &settings.grid)?;

    Ok(ImageTileSummary {
        stem: stem.to_string(),
        source_width: width,
        source_height: height,
        source_annotations: annotations.len(),
        crops: cells
            .iter()
            .enumerate()
            .map(|(rank, cell)| CropSummary {
                name: crop_name(stem, rank),
                column: cell.window.column,
                row: cell.window.row,
                annotations: cell.annotations.len(),
            })
            .collect(),
    })
}

/// Output file stem for the crop at `rank`.
pub fn crop_name(stem: &str, rank: usize) -> String {
    format!("{stem}_{rank}")
}
