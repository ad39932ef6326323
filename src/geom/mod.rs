//! Geometric primitives for tiling.
//!
//! Boxes are integer XYXY rectangles tagged with the frame they are measured
//! in. Three frames occur during a tiling run:
//!
//! 1. [`Source`]: the original image, as read from the annotation file.
//! 2. [`Scaled`]: the image resized to an exact multiple of the crop size.
//! 3. [`CropLocal`]: a single crop, with `(0, 0)` at its top-left corner.
//!
//! Moving a box between frames goes through [`transform::scale`] and
//! [`transform::rebase`], so the compiler rejects frame-mismatched calls.
//!
//! # Example
//!
//! ```
//! use voctile::geom::{transform, Annotation, Rectangle, Source};
//!
//! let ann = Annotation::<Source>::new("human", Rectangle::new(10, 20, 30, 40));
//! let scaled = transform::scale(&ann, 2.0, 2.0);
//! assert_eq!(scaled.bbox, Rectangle::new(20, 40, 60, 80));
//! ```

mod annotation;
mod frame;
mod rect;
pub mod transform;

pub use annotation::Annotation;
pub use frame::{CropLocal, Scaled, Source};
pub use rect::Rectangle;
