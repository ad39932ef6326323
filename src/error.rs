use std::path::PathBuf;
use thiserror::Error;

/// The main error type for voctile operations.
#[derive(Debug, Error)]
pub enum VoctileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimension { width: u32, height: u32 },

    #[error("Invalid grid parameter: {message}")]
    InvalidGridParameter { message: String },

    #[error("Failed to parse VOC XML from {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("Invalid VOC dataset layout at {path}: {message}")]
    VocLayoutInvalid { path: PathBuf, message: String },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read image size from {path}: {message}")]
    ImageSize { path: PathBuf, message: String },

    #[error("Failed to encode image {path}: {source}")]
    ImageEncode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse VisDrone annotations from {path} (line {line}): {message}")]
    VisDroneParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to write VisDrone annotations to {path}: {source}")]
    VisDroneWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to parse config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to serialize report as JSON: {0}")]
    ReportJson(#[source] serde_json::Error),
}
