use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    error::{RibbonError, RibbonResult},
    math::unpremultiply_rgba8_in_place,
};

/// Rasterize an SVG document into straight-alpha RGBA8 at `width × height`.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> RibbonResult<Vec<u8>> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|e| RibbonError::evaluation(format!("svg parse failed: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RibbonError::evaluation("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut data = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut data);
    Ok(data)
}

/// Write a PNG preview of `svg` next to it.
pub fn write_png_preview(svg: &str, size: u32, path: &Path) -> RibbonResult<()> {
    let data = rasterize_svg(svg, size, size)?;
    image::save_buffer_with_format(
        path,
        &data,
        size,
        size,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png preview '{}'", path.display()))?;
    Ok(())
}
