use crate::foundation::math::{clamp01, lerp};

/// Straight-alpha color: channels in `0..=255`, alpha in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Self = Self::new(255.0, 255.0, 255.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }

    /// Rounded 8-bit channels, alpha scaled to `0..=255`.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn chan(v: f64) -> u8 {
            v.round().clamp(0.0, 255.0) as u8
        }
        [
            chan(self.r),
            chan(self.g),
            chan(self.b),
            chan(clamp01(self.a) * 255.0),
        ]
    }

    /// CSS `rgba(r, g, b, a)` with integer channels and a 3-decimal alpha.
    pub fn to_css(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({r}, {g}, {b}, {:.3})", clamp01(self.a))
    }
}

/// Three-stop gradient indexed by a strand's normalized lateral position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gradient3 {
    pub start: Rgba,
    pub mid: Rgba,
    pub end: Rgba,
}

impl Default for Gradient3 {
    fn default() -> Self {
        Self {
            start: Rgba::new(244.0, 51.0, 171.0, 0.25),
            mid: Rgba::new(242.0, 169.0, 0.0, 0.25),
            end: Rgba::new(77.0, 60.0, 255.0, 0.25),
        }
    }
}

impl Gradient3 {
    /// `start → mid` over `[0, 0.5]`, `mid → end` over `(0.5, 1]`; `t` is clamped.
    pub fn color_at(&self, t: f64) -> Rgba {
        let t = clamp01(t);
        if t <= 0.5 {
            self.start.lerp(self.mid, t / 0.5)
        } else {
            self.mid.lerp(self.end, (t - 0.5) / 0.5)
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.start, self.mid, self.end]
            .iter()
            .all(|c| c.r.is_finite() && c.g.is_finite() && c.b.is_finite() && c.a.is_finite())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/color.rs"]
mod tests;
