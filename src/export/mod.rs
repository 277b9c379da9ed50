/// Batch driver writing `ribbon-N.svg` files.
pub mod batch;
/// PNG previews via `usvg` + `resvg`.
pub mod preview;
/// Fit-to-viewBox and SVG serialization.
pub mod svg;
