//! Tiling job configuration.
//!
//! Settings come from three layers, highest priority first: command-line
//! flags, an optional YAML file, and built-in defaults.
//!
//! ```yaml
//! crop_size: 640
//! top_n: 4
//! width_crops: 4
//! height_crops: 3
//! filter: catmull-rom
//! image_extension: jpg
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::VoctileError;
use crate::io::images::ResizeFilter;
use crate::tiling::GridSpec;

pub const DEFAULT_CROP_SIZE: u32 = 640;
pub const DEFAULT_TOP_N: usize = 4;
pub const DEFAULT_WIDTH_CROPS: u32 = 4;
pub const DEFAULT_HEIGHT_CROPS: u32 = 3;
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

const SUPPORTED_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A partial set of tiling settings. Unset fields fall through to the next
/// layer.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileConfig {
    pub crop_size: Option<u32>,
    pub top_n: Option<usize>,
    pub width_crops: Option<u32>,
    pub height_crops: Option<u32>,
    pub filter: Option<ResizeFilter>,
    pub image_extension: Option<String>,
}

/// Fully resolved, validated settings for a run.
#[derive(Clone, Debug, PartialEq)]
pub struct TileSettings {
    pub grid: GridSpec,
    pub filter: ResizeFilter,
    pub image_extension: String,
}

impl TileConfig {
    /// Loads a YAML config file. An empty file is an empty config.
    pub fn load(path: &Path) -> Result<Self, VoctileError> {
        let text = fs::read_to_string(path).map_err(VoctileError::Io)?;
        Self::from_yaml_str(&text, path)
    }

    fn from_yaml_str(text: &str, path: &Path) -> Result<Self, VoctileError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| VoctileError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns `self` with every field set in `overrides` replaced.
    pub fn merged_with(self, overrides: TileConfig) -> TileConfig {
        TileConfig {
            crop_size: overrides.crop_size.or(self.crop_size),
            top_n: overrides.top_n.or(self.top_n),
            width_crops: overrides.width_crops.or(self.width_crops),
            height_crops: overrides.height_crops.or(self.height_crops),
            filter: overrides.filter.or(self.filter),
            image_extension: overrides.image_extension.or(self.image_extension),
        }
    }

    /// Applies defaults and validates the result.
    pub fn resolve(&self) -> Result<TileSettings, VoctileError> {
        let grid = GridSpec::new(
            self.crop_size.unwrap_or(DEFAULT_CROP_SIZE),
            self.top_n.unwrap_or(DEFAULT_TOP_N),
            self.width_crops.unwrap_or(DEFAULT_WIDTH_CROPS),
            self.height_crops.unwrap_or(DEFAULT_HEIGHT_CROPS),
        );
        grid.validate()?;

        let image_extension = self
            .image_extension
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_EXTENSION)
            .trim_start_matches('.')
            .to_ascii_lowercase();
        if !SUPPORTED_IMAGE_EXTENSIONS.contains(&image_extension.as_str()) {
            return Err(VoctileError::ConfigInvalid {
                message: format!(
                    "unsupported image extension '{image_extension}' (supported: {})",
                    SUPPORTED_IMAGE_EXTENSIONS.join(", ")
                ),
            });
        }

        Ok(TileSettings {
            grid,
            filter: self.filter.unwrap_or_default(),
            image_extension,
        })
    }
}
