use crate::{
    foundation::{
        core::Point,
        error::{RibbonError, RibbonResult},
    },
    render::surface::{DrawSurface, FrameRGBA, StrokeStyle},
};

/// CPU raster surface powered by `vello_cpu`.
///
/// Strokes are recorded into a render context and rasterized into the pixmap on
/// [`DrawSurface::present`]; [`CpuSurface::snapshot`] reads the last presented frame back.
pub struct CpuSurface {
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
    width: u16,
    height: u16,
    dpr: f64,
}

impl Default for CpuSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSurface {
    /// An unallocated surface; call [`DrawSurface::resize`] before drawing.
    pub fn new() -> Self {
        Self {
            ctx: None,
            pixmap: None,
            width: 0,
            height: 0,
            dpr: 1.0,
        }
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.pixmap
            .as_ref()
            .map(|_| (u32::from(self.width), u32::from(self.height)))
    }

    /// Copy out the last presented frame (premultiplied RGBA8).
    pub fn snapshot(&self) -> RibbonResult<FrameRGBA> {
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or_else(|| RibbonError::evaluation("surface has not been sized"))?;
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn ctx_mut(&mut self) -> RibbonResult<&mut vello_cpu::RenderContext> {
        self.ctx
            .as_mut()
            .ok_or_else(|| RibbonError::evaluation("surface has not been sized"))
    }
}

impl DrawSurface for CpuSurface {
    fn resize(&mut self, width: u32, height: u32, dpr: f64) -> RibbonResult<()> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| RibbonError::evaluation("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| RibbonError::evaluation("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(RibbonError::validation(format!(
                "surface size must be non-zero (got {width}x{height})"
            )));
        }

        match &self.ctx {
            Some(ctx) if ctx.width() == width_u16 && ctx.height() == height_u16 => {}
            _ => {
                self.ctx = Some(vello_cpu::RenderContext::new(width_u16, height_u16));
                self.pixmap = Some(vello_cpu::Pixmap::new(width_u16, height_u16));
                self.width = width_u16;
                self.height = height_u16;
            }
        }
        self.dpr = dpr;
        Ok(())
    }

    fn clear(&mut self) -> RibbonResult<()> {
        self.ctx_mut()?.reset();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.data_as_u8_slice_mut().fill(0);
        }
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) -> RibbonResult<()> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };

        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(vello_cpu::kurbo::Point::new(first.x, first.y));
        for p in rest {
            path.line_to(vello_cpu::kurbo::Point::new(p.x, p.y));
        }

        let [r, g, b, a] = style.color.to_rgba8();
        let stroke = vello_cpu::kurbo::Stroke::new(style.width)
            .with_join(vello_cpu::kurbo::Join::Round)
            .with_caps(vello_cpu::kurbo::Cap::Round);

        let dpr = self.dpr;
        let ctx = self.ctx_mut()?;
        ctx.set_transform(vello_cpu::kurbo::Affine::scale(dpr));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.set_stroke(stroke);
        ctx.stroke_path(&path);
        Ok(())
    }

    fn present(&mut self) -> RibbonResult<()> {
        let (Some(ctx), Some(pixmap)) = (self.ctx.as_mut(), self.pixmap.as_mut()) else {
            return Err(RibbonError::evaluation("surface has not been sized"));
        };
        ctx.flush();
        ctx.render_to_pixmap(pixmap);
        Ok(())
    }
}
