//! Coordinate transforms between frames.
//!
//! All functions are total and return new values; inputs are never mutated.

use super::annotation::Annotation;
use super::frame::{CropLocal, Scaled, Source};

/// Rescales a source-frame annotation into the resized-image frame.
///
/// Each coordinate is multiplied by its axis factor and rounded half to
/// even. The label is carried through unchanged.
pub fn scale(src: &Annotation<Source>, x_factor: f64, y_factor: f64) -> Annotation<Scaled> {
    Annotation::new(
        src.label.clone(),
        src.bbox.scale(x_factor, y_factor).reframe(),
    )
}

/// Translates an annotation within its own frame by subtracting the offsets.
pub fn shift<TFrame>(src: &Annotation<TFrame>, x_shift: i64, y_shift: i64) -> Annotation<TFrame> {
    Annotation::new(src.label.clone(), src.bbox.shift(x_shift, y_shift))
}

/// Moves a resized-frame annotation into the local frame of the crop whose
/// top-left corner is `(left, top)`.
pub fn rebase(src: &Annotation<Scaled>, left: i64, top: i64) -> Annotation<CropLocal> {
    Annotation::new(src.label.clone(), src.bbox.shift(left, top).reframe())
}
