//! Integer rectangles in XYXY form, tagged with their coordinate frame.

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// An axis-aligned rectangle `(xmin, ymin, xmax, ymax)` in a half-open,
/// top-left-origin pixel frame.
///
/// The `TFrame` parameter is one of [`Source`](super::Source),
/// [`Scaled`](super::Scaled) or [`CropLocal`](super::CropLocal).
///
/// Construction accepts any four integers. A rectangle with `xmin > xmax` or
/// `ymin > ymax` can be represented so that readers can report it; use
/// [`Rectangle::is_ordered`] to check.
pub struct Rectangle<TFrame> {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
    _frame: PhantomData<TFrame>,
}

impl<TFrame> Rectangle<TFrame> {
    #[inline]
    pub fn new(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            _frame: PhantomData,
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    ///
    /// The far corner saturates at the `i64` range.
    #[inline]
    pub fn from_xywh(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// `xmax - xmin`, saturating.
    #[inline]
    pub fn width(&self) -> i64 {
        self.xmax.saturating_sub(self.xmin)
    }

    /// `ymax - ymin`, saturating.
    #[inline]
    pub fn height(&self) -> i64 {
        self.ymax.saturating_sub(self.ymin)
    }

    /// Returns `width * height`, saturating. Zero for degenerate boxes.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width().saturating_mul(self.height())
    }

    /// Returns true if `xmin <= xmax` and `ymin <= ymax`.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }

    /// Returns `(left, top, width, height)`.
    #[inline]
    pub fn to_xywh(&self) -> (i64, i64, i64, i64) {
        (self.xmin, self.ymin, self.width(), self.height())
    }

    /// Multiplies each coordinate by its axis factor, rounding half to even.
    pub fn scale(&self, x_factor: f64, y_factor: f64) -> Self {
        Self::new(
            round_coord(self.xmin as f64 * x_factor),
            round_coord(self.ymin as f64 * y_factor),
            round_coord(self.xmax as f64 * x_factor),
            round_coord(self.ymax as f64 * y_factor),
        )
    }

    /// Subtracts `(x_shift, y_shift)` from both corners, saturating at the
    /// `i64` range.
    pub fn shift(&self, x_shift: i64, y_shift: i64) -> Self {
        Self::new(
            self.xmin.saturating_sub(x_shift),
            self.ymin.saturating_sub(y_shift),
            self.xmax.saturating_sub(x_shift),
            self.ymax.saturating_sub(y_shift),
        )
    }

    /// Re-tags the same coordinates with another frame.
    ///
    /// Kept crate-private: frame changes go through the functions in
    /// [`transform`](super::transform).
    #[inline]
    pub(crate) fn reframe<TOther>(self) -> Rectangle<TOther> {
        Rectangle::new(self.xmin, self.ymin, self.xmax, self.ymax)
    }
}

/// Rounds to the nearest integer, ties to even.
#[inline]
fn round_coord(value: f64) -> i64 {
    value.round_ties_even() as i64
}

// Manual impls avoid placing bounds on TFrame.
impl<TFrame> Clone for Rectangle<TFrame> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<TFrame> Copy for Rectangle<TFrame> {}

impl<TFrame> PartialEq for Rectangle<TFrame> {
    fn eq(&self, other: &Self) -> bool {
        self.xmin == other.xmin
            && self.ymin == other.ymin
            && self.xmax == other.xmax
            && self.ymax == other.ymax
    }
}

impl<TFrame> Eq for Rectangle<TFrame> {}

impl<TFrame> Hash for Rectangle<TFrame> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.xmin, self.ymin, self.xmax, self.ymax).hash(state);
    }
}

impl<TFrame> std::fmt::Debug for Rectangle<TFrame> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rectangle")
            .field("xmin", &self.xmin)
            .field("ymin", &self.ymin)
            .field("xmax", &self.xmax)
            .field("ymax", &self.ymax)
            .finish()
    }
}

impl<TFrame> Default for Rectangle<TFrame> {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}
