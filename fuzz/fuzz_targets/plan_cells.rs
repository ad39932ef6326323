//! Fuzz target for cell planning.
//!
//! Arbitrary image sizes, grid parameters and boxes must either plan cleanly
//! or return an error, never panic or overflow.

#![no_main]

use libfuzzer_sys::fuzz_target;
use voctile::geom::{Annotation, Rectangle, Source};
use voctile::tiling::{plan_cells, GridSpec};

fuzz_target!(|input: (u16, u16, u16, u8, u8, u8, Vec<(i32, i32, i32, i32)>)| {
    let (width, height, crop_size, top_n, width_crops, height_crops, boxes) = input;
    if boxes.len() > 256 {
        return;
    }

    let spec = GridSpec::new(
        u32::from(crop_size),
        usize::from(top_n),
        u32::from(width_crops),
        u32::from(height_crops),
    );
    let annotations: Vec<Annotation<Source>> = boxes
        .into_iter()
        .map(|(a, b, c, d)| {
            Annotation::new("object", Rectangle::new(a.into(), b.into(), c.into(), d.into()))
        })
        .collect();

    if let Ok(cells) = plan_cells(u32::from(width), u32::from(height), &annotations, &spec) {
        assert!(cells.len() <= usize::from(top_n));
    }
});
