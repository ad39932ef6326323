//! Pascal VOC XML reader.
//!
//! Supports the VOC layout used by drone datasets such as LADD: an
//! `Annotations/` directory with one XML file per image and a `JPEGImages/`
//! directory holding images with the same file stem. Boxes are returned in
//! the source image's pixel frame.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;
use walkdir::WalkDir;

use crate::error::VoctileError;
use crate::geom::{Annotation, Rectangle, Source};

const VOC_XML_EXTENSION: &str = "xml";
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "JPG", "PNG"];

/// Resolved directories of a VOC dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocLayout {
    pub root: PathBuf,
    pub annotations_dir: PathBuf,
    pub images_dir: PathBuf,
}

impl VocLayout {
    /// Path of the annotation file for `stem`.
    pub fn annotation_path(&self, stem: &str) -> PathBuf {
        self.annotations_dir
            .join(format!("{stem}.{VOC_XML_EXTENSION}"))
    }

    /// Path of the image for `stem`, trying the supported extensions in order.
    pub fn image_path(&self, stem: &str) -> Result<PathBuf, VoctileError> {
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| self.images_dir.join(format!("{stem}.{ext}")))
            .find(|path| path.is_file())
            .ok_or_else(|| VoctileError::VocLayoutInvalid {
                path: self.images_dir.clone(),
                message: format!(
                    "no image found for '{stem}' (tried {})",
                    IMAGE_EXTENSIONS.join(", ")
                ),
            })
    }

    /// Lists annotation file stems in `Annotations/`.
    ///
    /// Stems are ordered numerically when every stem is an integer (`2`
    /// before `10`), lexicographically otherwise.
    pub fn list_stems(&self) -> Result<Vec<String>, VoctileError> {
        let mut stems: Vec<String> = collect_xml_files(&self.annotations_dir)?
            .iter()
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect();

        if stems.iter().all(|stem| stem.parse::<u64>().is_ok()) {
            stems.sort_by_key(|stem| stem.parse::<u64>().unwrap_or(u64::MAX));
        } else {
            stems.sort();
        }
        Ok(stems)
    }
}

/// Resolves a VOC dataset layout.
///
/// `path` may be the dataset root containing `Annotations/` and
/// `JPEGImages/`, or the `Annotations/` directory itself.
pub fn discover_layout(input: &Path) -> Result<VocLayout, VoctileError> {
    if !input.is_dir() {
        return Err(VoctileError::VocLayoutInvalid {
            path: input.to_path_buf(),
            message: "input must be a directory".to_string(),
        });
    }

    let (root, annotations_dir) = if input.join("Annotations").is_dir() {
        (input.to_path_buf(), input.join("Annotations"))
    } else if is_dir_named(input, "Annotations") {
        let root = input
            .parent()
            .ok_or_else(|| VoctileError::VocLayoutInvalid {
                path: input.to_path_buf(),
                message: "Annotations directory has no parent directory".to_string(),
            })?
            .to_path_buf();
        (root, input.to_path_buf())
    } else {
        return Err(VoctileError::VocLayoutInvalid {
            path: input.to_path_buf(),
            message: "expected a VOC dataset root containing Annotations/ or an Annotations/ directory itself"
                .to_string(),
        });
    };

    let images_dir = root.join("JPEGImages");
    if !images_dir.is_dir() {
        return Err(VoctileError::VocLayoutInvalid {
            path: root,
            message: "missing JPEGImages/ directory next to Annotations/".to_string(),
        });
    }

    Ok(VocLayout {
        root,
        annotations_dir,
        images_dir,
    })
}

/// Reads every `<object>` of a VOC annotation file.
pub fn read_voc_annotations(path: &Path) -> Result<Vec<Annotation<Source>>, VoctileError> {
    let xml = fs::read_to_string(path).map_err(VoctileError::Io)?;
    parse_voc_xml_str(&xml, path)
}

/// Parse VOC XML from a UTF-8 string.
pub fn from_voc_xml_str(xml: &str) -> Result<Vec<Annotation<Source>>, VoctileError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<Vec<Annotation<Source>>, VoctileError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| VoctileError::VocXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_voc_xml_str(xml)
}

fn collect_xml_files(dir: &Path) -> Result<Vec<PathBuf>, VoctileError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(VoctileError::Io)? {
        let entry = entry.map_err(VoctileError::Io)?;
        let path = entry.path();
        if path.is_file() && has_xml_extension(&path) {
            files.push(path);
        }
    }

    let mut nested_xml = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).min_depth(2) {
        let entry = entry.map_err(|source| VoctileError::VocLayoutInvalid {
            path: dir.to_path_buf(),
            message: format!("failed while traversing annotations directory: {source}"),
        })?;

        if entry.file_type().is_file() && has_xml_extension(entry.path()) {
            nested_xml.push(entry.path().to_path_buf());
        }
    }

    if !nested_xml.is_empty() {
        nested_xml.sort();
        tracing::warn!(
            skipped = nested_xml.len(),
            example = %rel_string(dir, &nested_xml[0]),
            "VOC reader scans Annotations/ flat (non-recursive); skipping nested .xml files"
        );
    }

    Ok(files)
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<Vec<Annotation<Source>>, VoctileError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| VoctileError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let mut annotations = Vec::new();
    for object in document
        .root_element()
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let label = optional_child_text(object, "name").unwrap_or_else(|| {
            tracing::warn!(path = %path.display(), "<object> without <name>; using empty label");
            String::new()
        });

        let bndbox = child_element(object, "bndbox").ok_or_else(|| VoctileError::VocXmlParse {
            path: path.to_path_buf(),
            message: format!("missing <bndbox> in <object> '{label}'"),
        })?;

        let xmin = parse_coord(bndbox, "xmin", path)?;
        let ymin = parse_coord(bndbox, "ymin", path)?;
        let xmax = parse_coord(bndbox, "xmax", path)?;
        let ymax = parse_coord(bndbox, "ymax", path)?;

        let bbox = Rectangle::new(xmin, ymin, xmax, ymax);
        if !bbox.is_ordered() {
            tracing::warn!(path = %path.display(), %label, ?bbox, "box has min > max");
        }
        annotations.push(Annotation::new(label, bbox));
    }

    Ok(annotations)
}

/// Reads a `<bndbox>` coordinate.
///
/// A missing value is read as 0. Decimal values are accepted and rounded
/// half to even. Values outside the `i32` range are rejected.
fn parse_coord(bndbox: Node<'_, '_>, tag: &str, path: &Path) -> Result<i64, VoctileError> {
    let Some(raw) = optional_child_text(bndbox, tag) else {
        tracing::warn!(path = %path.display(), "missing <{tag}> in <bndbox>; using 0");
        return Ok(0);
    };

    // Float-to-int `as` saturates, so huge decimals land in the range check.
    let value = raw
        .parse::<i64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(|value| value.round_ties_even() as i64)
        })
        .ok_or_else(|| VoctileError::VocXmlParse {
            path: path.to_path_buf(),
            message: format!("invalid <{tag}> value '{raw}' in <bndbox>; expected a number"),
        })?;

    if i32::try_from(value).is_err() {
        return Err(VoctileError::VocXmlParse {
            path: path.to_path_buf(),
            message: format!(
                "<{tag}> value '{raw}' in <bndbox> is outside the supported range ({}..={})",
                i32::MIN,
                i32::MAX
            ),
        });
    }

    Ok(value)
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(VOC_XML_EXTENSION))
        .unwrap_or(false)
}

fn is_dir_named(path: &Path, dir_name: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.eq_ignore_ascii_case(dir_name))
        .unwrap_or(false)
}

fn rel_string(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}
