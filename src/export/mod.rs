//! Still-image exports: PNG snapshots and SVG documents.

pub(crate) mod raster;
#[cfg(feature = "vector-export")]
pub(crate) mod svg;
