//! VisDrone annotation writer and reader.
//!
//! # Format
//!
//! One text file per image, one line per box, no header:
//!
//! ```text
//! <left>,<top>,<width>,<height>,<score>,<class>,<truncation>,<occlusion>
//! ```
//!
//! Crops are written with fixed placeholder fields `score=1`, `class=1`,
//! `truncation=0`, `occlusion=0`. The annotation label is not written.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::VoctileError;
use crate::geom::{Annotation, CropLocal, Rectangle};

const VISDRONE_EXTENSION: &str = "txt";

/// A single line of a VisDrone annotation file.
#[derive(Debug, Serialize)]
struct VisDroneRow {
    left: i64,
    top: i64,
    width: i64,
    height: i64,
    score: u8,
    class: u8,
    truncation: u8,
    occlusion: u8,
}

impl VisDroneRow {
    fn from_annotation(ann: &Annotation<CropLocal>) -> Self {
        let (left, top, width, height) = ann.bbox.to_xywh();
        Self {
            left,
            top,
            width,
            height,
            score: 1,
            class: 1,
            truncation: 0,
            occlusion: 0,
        }
    }
}

/// Writes crop annotations to a VisDrone file at `path`.
///
/// An empty slice produces an empty file.
pub fn write_visdrone_file(
    path: &Path,
    annotations: &[Annotation<CropLocal>],
) -> Result<(), VoctileError> {
    let file = File::create(path).map_err(VoctileError::Io)?;
    let mut writer = visdrone_writer(BufWriter::new(file));

    write_rows(&mut writer, annotations).map_err(|source| VoctileError::VisDroneWrite {
        path: path.to_path_buf(),
        source,
    })?;

    writer
        .into_inner()
        .map_err(|e| VoctileError::Io(e.into_error()))?
        .flush()
        .map_err(VoctileError::Io)
}

/// Renders crop annotations as VisDrone text.
pub fn to_visdrone_string(annotations: &[Annotation<CropLocal>]) -> Result<String, VoctileError> {
    let mut writer = visdrone_writer(Vec::new());

    write_rows(&mut writer, annotations).map_err(|source| VoctileError::VisDroneWrite {
        path: PathBuf::from("<memory>"),
        source,
    })?;

    let bytes = writer
        .into_inner()
        .map_err(|e| VoctileError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| VoctileError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Writes `<out_dir>/<stem>.txt`, creating `out_dir` if needed.
///
/// Returns the path written.
pub fn save_annotations(
    stem: &str,
    annotations: &[Annotation<CropLocal>],
    out_dir: &Path,
) -> Result<PathBuf, VoctileError> {
    fs::create_dir_all(out_dir).map_err(VoctileError::Io)?;
    let path = out_dir.join(format!("{stem}.{VISDRONE_EXTENSION}"));
    write_visdrone_file(&path, annotations)?;
    Ok(path)
}

/// Reads a VisDrone file.
///
/// Only the first four fields are required. The `class` field, when present,
/// becomes the label.
pub fn read_visdrone_file(path: &Path) -> Result<Vec<Annotation<CropLocal>>, VoctileError> {
    let text = fs::read_to_string(path).map_err(VoctileError::Io)?;
    parse_visdrone_str(&text, path)
}

/// Parse VisDrone text from a string.
pub fn from_visdrone_str(text: &str) -> Result<Vec<Annotation<CropLocal>>, VoctileError> {
    parse_visdrone_str(text, Path::new("<memory>"))
}

fn visdrone_writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}

fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    annotations: &[Annotation<CropLocal>],
) -> Result<(), csv::Error> {
    for ann in annotations {
        writer.serialize(VisDroneRow::from_annotation(ann))?;
    }
    Ok(())
}

fn parse_visdrone_str(text: &str, path: &Path) -> Result<Vec<Annotation<CropLocal>>, VoctileError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut annotations = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|source| VoctileError::VisDroneParse {
            path: path.to_path_buf(),
            line: source
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(idx + 1),
            message: source.to_string(),
        })?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(idx + 1);

        if let Some(ann) = parse_record(&record, path, line)? {
            annotations.push(ann);
        }
    }

    Ok(annotations)
}

/// Parses one VisDrone row. Blank rows yield `None`.
fn parse_record(
    record: &csv::StringRecord,
    path: &Path,
    line: usize,
) -> Result<Option<Annotation<CropLocal>>, VoctileError> {
    if record.iter().all(str::is_empty) {
        return Ok(None);
    }

    let parse_error = |message: String| VoctileError::VisDroneParse {
        path: path.to_path_buf(),
        line,
        message,
    };

    if record.len() < 4 {
        return Err(parse_error(format!(
            "expected at least 4 fields, found {}",
            record.len()
        )));
    }

    let mut values = [0i64; 4];
    for (slot, raw) in values.iter_mut().zip(record.iter()) {
        *slot = raw
            .parse::<i64>()
            .map_err(|_| parse_error(format!("invalid integer '{raw}'")))?;
    }

    let [left, top, width, height] = values;
    let (Some(right), Some(bottom)) = (left.checked_add(width), top.checked_add(height)) else {
        return Err(parse_error("box extends past i64 range".to_string()));
    };

    let label = record.get(5).unwrap_or_default();
    Ok(Some(Annotation::new(
        label,
        Rectangle::new(left, top, right, bottom),
    )))
}

/// Fuzz-only entrypoint for single-line VisDrone parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_visdrone_line(input: &str) -> Result<(), VoctileError> {
    let record = csv::StringRecord::from(input.split(',').map(str::trim).collect::<Vec<_>>());
    let _ = parse_record(&record, Path::new("<fuzz>"), 1)?;
    Ok(())
}
