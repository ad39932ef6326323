#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use voctile::geom::{Annotation, Rectangle, Scaled, Source};
use voctile::tiling::{CropWindow, GridSpec};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Any ordered rectangle with coordinates in `[0, limit]`.
pub fn arb_rect<F: 'static>(limit: i64) -> BoxedStrategy<Rectangle<F>> {
    (0..=limit, 0..=limit, 0..=limit, 0..=limit)
        .prop_map(|(a, b, c, d)| Rectangle::new(a.min(c), b.min(d), a.max(c), b.max(d)))
        .boxed()
}

/// A grid of `1..=max_cells` columns and rows with crops of 8..=128 px.
pub fn arb_grid(max_cells: u32) -> BoxedStrategy<GridSpec> {
    (8u32..=128, 1..=max_cells, 1..=max_cells)
        .prop_map(|(crop_size, width_crops, height_crops)| {
            GridSpec::new(
                crop_size,
                (width_crops * height_crops) as usize,
                width_crops,
                height_crops,
            )
        })
        .boxed()
}

/// A window somewhere on a grid of up to 8x8 cells.
pub fn arb_window() -> BoxedStrategy<CropWindow> {
    (8u32..=128, 0u32..8, 0u32..8)
        .prop_map(|(crop_size, column, row)| CropWindow::new(column, row, crop_size))
        .boxed()
}

/// A box of positive size lying inside one cell of `grid`, touching at most
/// that cell's maximum edges.
pub fn arb_box_in_cell(grid: GridSpec) -> BoxedStrategy<Annotation<Source>> {
    let size = grid.crop_size as i64;
    (
        0..grid.width_crops,
        0..grid.height_crops,
        0..size,
        0..size,
        1..=size,
        1..=size,
    )
        .prop_map(move |(column, row, x, y, w, h)| {
            let left = column as i64 * size;
            let top = row as i64 * size;
            let xmax = (x + w).min(size);
            let ymax = (y + h).min(size);
            Annotation::new(
                "human",
                Rectangle::new(left + x, top + y, left + xmax, top + ymax),
            )
        })
        .boxed()
}

/// A box inside `window`'s bounds (maximum edge inclusive).
pub fn arb_box_in_window(window: CropWindow) -> BoxedStrategy<Annotation<Scaled>> {
    arb_rect::<Scaled>(window.crop_size)
        .prop_map(move |rect| {
            Annotation::new(
                "human",
                Rectangle::new(
                    rect.xmin + window.left,
                    rect.ymin + window.top,
                    rect.xmax + window.left,
                    rect.ymax + window.top,
                ),
            )
        })
        .boxed()
}
