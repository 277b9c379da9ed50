use crate::{
    curve::color::Rgba,
    foundation::{core::Point, error::RibbonResult},
};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in device pixels.
    pub width: u32,
    /// Frame height in device pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Stroke parameters for one strand. Joins and caps are always round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    /// Line width in CSS pixels.
    pub width: f64,
}

/// The drawing surface a [`crate::RibbonRenderer`] paints into.
///
/// Coordinates passed to [`DrawSurface::stroke_polyline`] are CSS pixels; the surface applies the
/// device pixel ratio it was last resized with.
pub trait DrawSurface {
    /// Reallocate the backing buffer at `width × height` device pixels.
    fn resize(&mut self, width: u32, height: u32, dpr: f64) -> RibbonResult<()>;
    /// Clear the whole buffer to transparent.
    fn clear(&mut self) -> RibbonResult<()>;
    /// Stroke an open polyline.
    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) -> RibbonResult<()>;
    /// Called once after the last stroke of a frame.
    fn present(&mut self) -> RibbonResult<()> {
        Ok(())
    }
}

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    Resize { width: u32, height: u32, dpr: f64 },
    Clear,
    Stroke { points: Vec<Point>, style: StrokeStyle },
    Present,
}

/// Surface that records calls instead of rasterizing; for hosts that replay strokes elsewhere
/// and for tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear_count(&self) -> usize {
        self.count(|e| matches!(e, SurfaceEvent::Clear))
    }

    pub fn stroke_count(&self) -> usize {
        self.count(|e| matches!(e, SurfaceEvent::Stroke { .. }))
    }

    pub fn present_count(&self) -> usize {
        self.count(|e| matches!(e, SurfaceEvent::Present))
    }

    /// Strokes in draw order.
    pub fn strokes(&self) -> impl Iterator<Item = (&[Point], &StrokeStyle)> {
        self.events.iter().filter_map(|e| match e {
            SurfaceEvent::Stroke { points, style } => Some((points.as_slice(), style)),
            _ => None,
        })
    }

    /// The most recent resize, if any.
    pub fn last_resize(&self) -> Option<(u32, u32, f64)> {
        self.events.iter().rev().find_map(|e| match *e {
            SurfaceEvent::Resize { width, height, dpr } => Some((width, height, dpr)),
            _ => None,
        })
    }

    fn count(&self, f: impl Fn(&SurfaceEvent) -> bool) -> usize {
        self.events.iter().filter(|e| f(*e)).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32, dpr: f64) -> RibbonResult<()> {
        self.events.push(SurfaceEvent::Resize { width, height, dpr });
        Ok(())
    }

    fn clear(&mut self) -> RibbonResult<()> {
        self.events.push(SurfaceEvent::Clear);
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) -> RibbonResult<()> {
        self.events.push(SurfaceEvent::Stroke {
            points: points.to_vec(),
            style: *style,
        });
        Ok(())
    }

    fn present(&mut self) -> RibbonResult<()> {
        self.events.push(SurfaceEvent::Present);
        Ok(())
    }
}
