//! Tiling engine: grid enumeration, per-crop retention and ranking.

pub mod grid;
pub mod overlap;
pub mod report;

pub use grid::{crop_sample, plan_cells, rank_cells, CellPlan, CropWindow, GridSpec, TileCrop};
pub use overlap::{classify, overlap_annotations, place, Placement};
pub use report::{CropSummary, ImageTileSummary, TileReport};
