use super::rect::Rectangle;

/// A labeled bounding box.
///
/// The label is an opaque category identifier and is never validated here.
/// The box's frame is part of the type, see [`Rectangle`].
pub struct Annotation<TFrame> {
    pub label: String,
    pub bbox: Rectangle<TFrame>,
}

impl<TFrame> Annotation<TFrame> {
    pub fn new(label: impl Into<String>, bbox: Rectangle<TFrame>) -> Self {
        Self {
            label: label.into(),
            bbox,
        }
    }
}

impl<TFrame> Clone for Annotation<TFrame> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            bbox: self.bbox,
        }
    }
}

impl<TFrame> PartialEq for Annotation<TFrame> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.bbox == other.bbox
    }
}

impl<TFrame> Eq for Annotation<TFrame> {}

impl<TFrame> std::fmt::Debug for Annotation<TFrame> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotation")
            .field("label", &self.label)
            .field("bbox", &self.bbox)
            .finish()
    }
}
