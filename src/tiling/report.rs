//! Tiling run report.
//!
//! Summarizes what a `tile` run produced (or, for a dry run, would produce)
//! so it can be printed for users or emitted as JSON.

use serde::Serialize;
use std::fmt;

use super::grid::GridSpec;

/// The result of tiling a set of images.
#[derive(Clone, Debug, Serialize)]
pub struct TileReport {
    /// Grid parameters used for every image.
    pub grid: GridSpec,
    /// True if nothing was written.
    pub dry_run: bool,
    /// Per-image results, in processing order.
    pub images: Vec<ImageTileSummary>,
}

impl TileReport {
    pub fn new(grid: GridSpec, dry_run: bool) -> Self {
        Self {
            grid,
            dry_run,
            images: Vec::new(),
        }
    }

    pub fn add(&mut self, summary: ImageTileSummary) {
        self.images.push(summary);
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn crop_count(&self) -> usize {
        self.images.iter().map(|img| img.crops.len()).sum()
    }

    /// Annotations read from the source files.
    pub fn source_annotation_count(&self) -> usize {
        self.images.iter().map(|img| img.source_annotations).sum()
    }

    /// Annotations written across all kept crops.
    ///
    /// May exceed the source count: a box can be retained by more than one
    /// crop when it is clipped.
    pub fn retained_annotation_count(&self) -> usize {
        self.images
            .iter()
            .flat_map(|img| img.crops.iter())
            .map(|crop| crop.annotations)
            .sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for TileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "Would write" } else { "Wrote" };
        writeln!(
            f,
            "{} {} crop(s) from {} image(s) ({} source annotation(s), {} retained)",
            verb,
            self.crop_count(),
            self.image_count(),
            self.source_annotation_count(),
            self.retained_annotation_count()
        )?;
        writeln!(
            f,
            "  grid: {}x{} crops of {}px, top {} per image",
            self.grid.width_crops, self.grid.height_crops, self.grid.crop_size, self.grid.top_n
        )?;

        for image in &self.images {
            writeln!(f, "  {}", image)?;
        }

        Ok(())
    }
}

/// Result for one source image.
#[derive(Clone, Debug, Serialize)]
pub struct ImageTileSummary {
    pub stem: String,
    pub source_width: u32,
    pub source_height: u32,
    pub source_annotations: usize,
    pub crops: Vec<CropSummary>,
}

impl fmt::Display for ImageTileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<String> = self
            .crops
            .iter()
            .map(|crop| format!("({},{})={}", crop.column, crop.row, crop.annotations))
            .collect();
        write!(
            f,
            "{} [{}x{}, {} annotation(s)]: {}",
            self.stem,
            self.source_width,
            self.source_height,
            self.source_annotations,
            counts.join(" ")
        )
    }
}

/// One kept crop.
#[derive(Clone, Debug, Serialize)]
pub struct CropSummary {
    /// Output file stem, e.g. `12_0`.
    pub name: String,
    pub column: u32,
    pub row: u32,
    pub annotations: usize,
}
