//! Coordinate frame marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to record which
//! image a box belongs to, so a box measured against the source image cannot
//! be handed to code that expects crop-local coordinates.

use std::fmt;

/// Marker for the source image's native pixel frame (as read from VOC XML).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {}

/// Marker for the resized image frame, `width_crops * crop_size` by
/// `height_crops * crop_size` pixels.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scaled {}

/// Marker for a single crop's local frame, `[0, crop_size)` on both axes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropLocal {}

impl fmt::Debug for Source {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Scaled {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for CropLocal {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
