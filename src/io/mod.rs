//! Adapters between files on disk and the tiling engine.
//!
//! - [`io_voc_xml`]: reads source annotations (Pascal VOC XML)
//! - [`io_visdrone`]: writes crop annotations (VisDrone txt) and reads them back
//! - [`images`]: decodes source images and encodes crops

pub mod images;
pub mod io_visdrone;
pub mod io_voc_xml;
