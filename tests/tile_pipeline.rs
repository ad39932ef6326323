use std::fs;
use std::path::Path;

use voctile::config::TileConfig;
use voctile::io::images::ResizeFilter;
use voctile::pipeline::{tile_dataset, TileOptions};
use voctile::VoctileError;

mod common;

fn options(crop_size: u32, top_n: usize, width_crops: u32, height_crops: u32) -> TileOptions {
    let settings = TileConfig {
        crop_size: Some(crop_size),
        top_n: Some(top_n),
        width_crops: Some(width_crops),
        height_crops: Some(height_crops),
        filter: Some(ResizeFilter::Nearest),
        image_extension: Some("png".to_string()),
    }
    .resolve()
    .expect("resolve settings");

    TileOptions {
        settings,
        stems: Vec::new(),
        dry_run: false,
    }
}

fn write_two_cell_sample(root: &Path) {
    common::write_sample(
        root,
        "1",
        200,
        200,
        &[
            ("human", 10, 10, 50, 50),
            ("human", 110, 20, 150, 60),
            ("human", 120, 30, 160, 70),
        ],
    );
}

#[test]
fn tiles_rank_crops_by_annotation_count() {
    let voc = tempfile::tempdir().expect("create voc dir");
    let out = tempfile::tempdir().expect("create out dir");
    write_two_cell_sample(voc.path());

    let report = tile_dataset(voc.path(), out.path(), &options(100, 2, 2, 2)).expect("tile");

    assert_eq!(report.image_count(), 1);
    assert_eq!(report.crop_count(), 2);
    assert_eq!(report.source_annotation_count(), 3);
    assert_eq!(report.retained_annotation_count(), 3);

    let crops = &report.images[0].crops;
    assert_eq!((crops[0].column, crops[0].row, crops[0].annotations), (1, 0, 2));
    assert_eq!((crops[1].column, crops[1].row, crops[1].annotations), (0, 0, 1));
    assert_eq!(crops[0].name, "1_0");

    let best = fs::read_to_string(out.path().join("annotations/1_0.txt")).expect("read best");
    assert_eq!(best, "10,20,40,40,1,1,0,0\n20,30,40,40,1,1,0,0\n");
    let second = fs::read_to_string(out.path().join("annotations/1_1.txt")).expect("read second");
    assert_eq!(second, "10,10,40,40,1,1,0,0\n");

    let image = image::open(out.path().join("images/1_0.png")).expect("decode crop");
    assert_eq!((image.width(), image.height()), (100, 100));
    assert!(!out.path().join("images/1_2.png").exists());
}

#[test]
fn small_images_are_upscaled_onto_the_grid() {
    let voc = tempfile::tempdir().expect("create voc dir");
    let out = tempfile::tempdir().expect("create out dir");
    common::write_sample(voc.path(), "3", 50, 50, &[("car", 10, 10, 20, 20)]);

    tile_dataset(voc.path(), out.path(), &options(100, 1, 1, 1)).expect("tile");

    let text = fs::read_to_string(out.path().join("annotations/3_0.txt")).expect("read");
    assert_eq!(text, "20,20,20,20,1,1,0,0\n");
    let image = image::open(out.path().join("images/3_0.png")).expect("decode crop");
    assert_eq!((image.width(), image.height()), (100, 100));
}

#[test]
fn images_without_annotations_still_produce_crops() {
    let voc = tempfile::tempdir().expect("create voc dir");
    let out = tempfile::tempdir().expect("create out dir");
    common::write_sample(voc.path(), "5", 64, 64, &[]);

    let report = tile_dataset(voc.path(), out.path(), &options(32, 3, 2, 2)).expect("tile");

    assert_eq!(report.crop_count(), 3);
    for rank in 0..3 {
        let text = fs::read_to_string(out.path().join(format!("annotations/5_{rank}.txt")))
            .expect("read annotations");
        assert!(text.is_empty());
    }
}

#[test]
fn dry_run_writes_nothing() {
    let voc = tempfile::tempdir().expect("create voc dir");
    let out = tempfile::tempdir().expect("create out dir");
    write_two_cell_sample(voc.path());

    let mut opts = options(100, 2, 2, 2);
    opts.dry_run = true;
    let report = tile_dataset(voc.path(), &out.path().join("tiles"), &opts).expect("plan");

    assert!(report.dry_run);
    assert_eq!(report.crop_count(), 2);
    assert_eq!(report.images[0].crops[0].annotations, 2);
    assert!(!out.path().join("tiles").exists());
}

#[test]
fn stems_are_processed_in_numeric_order() {
    let voc = tempfile::tempdir().expect("create voc dir");
    let out = tempfile::tempdir().expect("create out dir");
    for stem in ["10", "2", "1"] {
        common::write_sample(voc.path(), stem, 32, 32, &[]);
    }

    let mut opts = options(32, 1, 1, 1);
    opts.dry_run = true;
    let report = tile_dataset(voc.path(), out.path(), &opts).expect("plan");

    let stems: Vec<&str> = report.images.iter().map(|i| i.stem.as_str()).collect();
    assert_eq!(stems, ["1", "2", "10"]);
}

#[test]
fn selected_stems_limit_the_run() {
    let voc = tempfile::tempdir().expect("create voc dir");
    let out = tempfile::tempdir().expect("create out dir");
    common::write_sample(voc.path(), "1", 32, 32, &[]);
    common::write_sample(voc.path(), "2", 32, 32, &[]);

    let mut opts = options(32, 1, 1, 1);
    opts.stems = vec!["2".to_string()];
    let report = tile_dataset(voc.path(), out.path(), &opts).expect("tile");

    assert_eq!(report.image_count(), 1);
    assert!(out.path().join("images/2_0.png").is_file());
    assert!(!out.path().join("images/1_0.png").exists());
}

#[test]
fn missing_image_is_a_layout_error() {
    let voc = tempfile::tempdir().expect("create voc dir");
    let out = tempfile::tempdir().expect("create out dir");
    common::write_voc_xml(voc.path(), "9", &[("human", 1, 1, 5, 5)]);
    fs::create_dir_all(voc.path().join("JPEGImages")).expect("create images dir");

    let err = tile_dataset(voc.path(), out.path(), &options(32, 1, 1, 1)).unwrap_err();
    assert!(matches!(err, VoctileError::VocLayoutInvalid { .. }), "{err}");
}

#[test]
fn dataset_without_images_dir_is_rejected() {
    let voc = tempfile::tempdir().expect("create voc dir");
    let out = tempfile::tempdir().expect("create out dir");
    common::write_voc_xml(voc.path(), "9", &[]);

    let err = tile_dataset(voc.path(), out.path(), &options(32, 1, 1, 1)).unwrap_err();
    assert!(matches!(err, VoctileError::VocLayoutInvalid { .. }), "{err}");
}

#[test]
fn out_of_range_coordinates_fail_the_run() {
    let voc = tempfile::tempdir().expect("create voc dir");
    let out = tempfile::tempdir().expect("create out dir");
    common::write_image(voc.path(), "8", 64, 64);
    fs::create_dir_all(voc.path().join("Annotations")).expect("create annotations dir");
    fs::write(
        voc.path().join("Annotations/8.xml"),
        "<annotation><object><name>human</name><bndbox><xmin>10</xmin><ymin>10</ymin>\
<xmax>1e300</xmax><ymax>20</ymax></bndbox></object></annotation>",
    )
    .expect("write xml");

    let err = tile_dataset(voc.path(), out.path(), &options(32, 1, 2, 2)).unwrap_err();
    assert!(matches!(err, VoctileError::VocXmlParse { .. }), "{err}");
    assert!(err.to_string().contains("outside the supported range"));
}
