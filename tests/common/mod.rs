#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage};

/// Writes `<root>/JPEGImages/<stem>.png` with a horizontal gradient.
pub fn write_image(root: &Path, stem: &str, width: u32, height: u32) {
    let dir = root.join("JPEGImages");
    fs::create_dir_all(&dir).expect("create images dir");

    let pixels = RgbImage::from_fn(width, height, |x, _| {
        let shade = (x * 255 / width.max(1)) as u8;
        Rgb([shade, shade, shade])
    });
    DynamicImage::ImageRgb8(pixels)
        .save(dir.join(format!("{stem}.png")))
        .expect("write image");
}

/// Writes `<root>/Annotations/<stem>.xml` with one `<object>` per box.
pub fn write_voc_xml(root: &Path, stem: &str, boxes: &[(&str, i64, i64, i64, i64)]) {
    let dir = root.join("Annotations");
    fs::create_dir_all(&dir).expect("create annotations dir");

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotation>\n");
    xml.push_str(&format!("  <filename>{stem}.png</filename>\n"));
    for (name, xmin, ymin, xmax, ymax) in boxes {
        xml.push_str(&format!(
            "  <object>\n    <name>{name}</name>\n    <bndbox>\n      <xmin>{xmin}</xmin>\n      <ymin>{ymin}</ymin>\n      <xmax>{xmax}</xmax>\n      <ymax>{ymax}</ymax>\n    </bndbox>\n  </object>\n"
        ));
    }
    xml.push_str("</annotation>\n");

    fs::write(dir.join(format!("{stem}.xml")), xml).expect("write xml");
}

/// Writes a complete sample for `stem`.
pub fn write_sample(
    root: &Path,
    stem: &str,
    width: u32,
    height: u32,
    boxes: &[(&str, i64, i64, i64, i64)],
) {
    write_image(root, stem, width, height);
    write_voc_xml(root, stem, boxes);
}
