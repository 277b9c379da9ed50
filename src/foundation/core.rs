pub use kurbo::{Point, Rect};

/// Monotonic index of a renderer tick.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// A point in ribbon object space, before projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Measured size of the drawing surface in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportGeometry {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl ViewportGeometry {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self { width, height, dpr }
    }

    /// Zero, negative or NaN sizes cannot be drawn into.
    pub fn is_drawable(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Backing buffer size in device pixels (`floor(css * dpr)`).
    pub fn buffer_size(self) -> (u32, u32) {
        let w = (self.width * self.dpr).floor().max(0.0) as u32;
        let h = (self.height * self.dpr).floor().max(0.0) as u32;
        (w, h)
    }
}
