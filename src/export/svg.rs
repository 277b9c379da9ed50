use std::fmt::Write as _;

use crate::{
    curve::elliptic::ProjectedStrand,
    foundation::{
        core::{Point, Rect},
        error::{RibbonError, RibbonResult},
        math::WINDOW_EPSILON,
    },
};

/// Uniform scale + translation that centers a point cloud in a square viewBox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitTransform {
    /// Center of the source bounding box.
    pub center: Point,
    pub scale: f64,
    /// Half the viewBox side.
    pub half: f64,
}

impl FitTransform {
    /// Tightest uniform fit of `bbox` into `size × size`, multiplied by `zoom`.
    ///
    /// Degenerate boxes (zero width or height) are fitted along their other axis.
    pub fn fit(bbox: Rect, size: f64, zoom: f64) -> Self {
        let w = bbox.width().max(WINDOW_EPSILON);
        let h = bbox.height().max(WINDOW_EPSILON);
        let fit = (size / w).min(size / h);
        Self {
            center: bbox.center(),
            scale: fit * zoom,
            half: size / 2.0,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.center.x) * self.scale + self.half,
            (p.y - self.center.y) * self.scale + self.half,
        )
    }
}

/// Bounding box of every point of every strand; `None` when there are no points.
pub fn bounding_box(strands: &[ProjectedStrand]) -> Option<Rect> {
    let mut points = strands.iter().flat_map(|s| s.points.iter().copied());
    let first = points.next()?;
    Some(points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

/// Appearance of exported paths.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgStyle {
    /// Square viewBox side in user units.
    pub size: u32,
    /// Any SVG paint value (`white`, `#fff`, ...).
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            size: 800,
            stroke: "white".to_string(),
            stroke_width: 1.0,
        }
    }
}

// `-0` reads oddly in path data.
fn num(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

/// Absolute `M x y L x y ...` polyline through the fitted points.
pub fn path_data(points: &[Point], fit: &FitTransform) -> String {
    let mut d = String::with_capacity(points.len() * 24);
    for (k, p) in points.iter().enumerate() {
        let p = fit.apply(*p);
        if k > 0 {
            d.push(' ');
        }
        let cmd = if k == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd} {} {}", num(p.x), num(p.y));
    }
    d
}

/// Accepts SVG paint values such as `white`, `#fff` or `rgb(255, 0, 0)`: nothing that could
/// leave a quoted attribute.
pub fn is_paint_token(s: &str) -> bool {
    !s.trim().is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ' | '-')
        })
}

/// Serialize strands (already in paint order) into a standalone SVG document.
pub fn write_svg_document(
    strands: &[ProjectedStrand],
    style: &SvgStyle,
    zoom: f64,
) -> RibbonResult<String> {
    if style.size == 0 {
        return Err(RibbonError::validation("svg size must be > 0"));
    }
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(RibbonError::validation("svg zoom must be finite and > 0"));
    }
    if !is_paint_token(&style.stroke) {
        return Err(RibbonError::validation(format!(
            "svg stroke '{}' is not a paint value",
            style.stroke
        )));
    }
    let bbox = bounding_box(strands)
        .ok_or_else(|| RibbonError::evaluation("ribbon produced no points"))?;
    let fit = FitTransform::fit(bbox, f64::from(style.size), zoom);

    let size = style.size;
    let stroke = &style.stroke;
    let mut svg = String::new();
    let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#
    );
    for strand in strands {
        let _ = writeln!(
            svg,
            r#"  <path fill="none" stroke="{stroke}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" d="{}"/>"#,
            style.stroke_width,
            path_data(&strand.points, &fit),
        );
    }
    let _ = writeln!(svg, "</svg>");
    Ok(svg)
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
