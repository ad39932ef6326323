//! Image decode/encode helpers around the `image` crate.

use std::path::Path;

use image::DynamicImage;
use serde::Deserialize;

use crate::error::VoctileError;

/// Interpolation filter used when resizing a source image onto the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbor (fastest, blocky).
    Nearest,
    /// Bilinear.
    Triangle,
    /// Bicubic.
    #[default]
    CatmullRom,
    Gaussian,
    /// Lanczos with window 3 (slowest, sharpest).
    Lanczos3,
}

impl ResizeFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Triangle => image::imageops::FilterType::Triangle,
            ResizeFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResizeFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Decodes an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage, VoctileError> {
    image::open(path).map_err(|source| VoctileError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads `(width, height)` from the file header without decoding pixels.
pub fn image_dimensions(path: &Path) -> Result<(u32, u32), VoctileError> {
    let size = imagesize::size(path).map_err(|source| VoctileError::ImageSize {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let width = u32::try_from(size.width).map_err(|_| VoctileError::ImageSize {
        path: path.to_path_buf(),
        message: format!("width {} does not fit in u32", size.width),
    })?;
    let height = u32::try_from(size.height).map_err(|_| VoctileError::ImageSize {
        path: path.to_path_buf(),
        message: format!("height {} does not fit in u32", size.height),
    })?;

    Ok((width, height))
}

/// Encodes `image` to `path`; the format follows the file extension.
///
/// Images are converted to 8-bit RGB first so that JPEG output accepts
/// sources with an alpha channel or 16-bit samples.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<(), VoctileError> {
    let rgb = match image {
        DynamicImage::ImageRgb8(_) => None,
        other => Some(DynamicImage::ImageRgb8(other.to_rgb8())),
    };

    rgb.as_ref()
        .unwrap_or(image)
        .save(path)
        .map_err(|source| VoctileError::ImageEncode {
            path: path.to_path_buf(),
            source,
        })
}
