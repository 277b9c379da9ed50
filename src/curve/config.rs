use std::{f64::consts::PI, io::Read, path::Path};

use anyhow::Context as _;

use crate::{
    curve::color::Gradient3,
    foundation::error::{RibbonError, RibbonResult},
};

/// Geometry and motion parameters of the canvas ribbon.
///
/// Built once at setup and never mutated afterwards. Every field has a default, so a JSON
/// document only needs to name the parameters it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RibbonConfig {
    pub line_count: usize,
    pub line_spacing: f64,
    pub line_width: f64,
    /// Centerline anchor as a fraction of the surface width.
    pub pin_x: f64,
    pub steps_per_strand: usize,

    /// Clock increment per rendered frame.
    pub time_speed: f64,
    /// Radians of phase drift per unit of clock time.
    pub phase_drift_speed: f64,

    pub torsion: TorsionField,
    pub entry_twist: TwistWindow,
    pub exit_twist: TwistWindow,
    pub exit_lateral: LateralWindow,
    pub exit_loop: Option<LoopWindow>,
    pub ripple: Option<Ripple>,

    pub perspective_distance: f64,
    /// How much depth leaks into screen-space y.
    pub vertical_tilt: f64,

    pub gradient: Gradient3,
}

/// Multi-harmonic twist angle along the strand.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TorsionField {
    pub base_twist: f64,
    pub amplitude: f64,
    /// Cycles of the fundamental over `u ∈ [0, 1]`.
    pub cycles: f64,
    pub h2_ratio: f64,
    pub h3_ratio: f64,
    pub h2_gain: f64,
    pub h3_gain: f64,
    /// Phase offset between neighbouring strands.
    pub phase_per_line: f64,
}

impl Default for TorsionField {
    fn default() -> Self {
        Self {
            base_twist: 0.26,
            amplitude: 0.78,
            cycles: 1.55,
            h2_ratio: 2.25,
            h3_ratio: 3.65,
            h2_gain: 0.62,
            h3_gain: 0.28,
            phase_per_line: 0.18,
        }
    }
}

/// Extra twist of `total` radians eased over `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwistWindow {
    pub start: f64,
    pub end: f64,
    pub power: f64,
    pub total: f64,
}

/// Sideways push of `px` pixels eased over `[start, end]`; negative values push left.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LateralWindow {
    pub start: f64,
    pub end: f64,
    pub power: f64,
    pub px: f64,
}

/// Up-and-back loop near the exit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoopWindow {
    pub start: f64,
    pub end: f64,
    /// Peak lateral pull back against the exit direction, in pixels.
    pub amplitude: f64,
    /// Peak vertical lift, in pixels.
    pub vertical: f64,
}

impl Default for LoopWindow {
    fn default() -> Self {
        Self {
            start: 0.86,
            end: 0.97,
            amplitude: 180.0,
            vertical: 100.0,
        }
    }
}

/// Mid-ribbon bump adding twist and a lateral wave around `center`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Ripple {
    pub center: f64,
    /// Half-width of the falloff, in `u` units.
    pub width: f64,
    pub twist: f64,
    pub wave: f64,
}

impl Default for Ripple {
    fn default() -> Self {
        Self {
            center: 0.5,
            width: 0.12,
            twist: 0.6,
            wave: 24.0,
        }
    }
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self::site_default()
    }
}

impl RibbonConfig {
    /// Exits to the right through a 3D loop.
    pub fn site_default() -> Self {
        Self {
            line_count: 33,
            line_spacing: 7.0,
            line_width: 1.0,
            pin_x: 0.20,
            steps_per_strand: 260,
            time_speed: 0.003,
            phase_drift_speed: 0.55,
            torsion: TorsionField::default(),
            entry_twist: TwistWindow {
                start: 0.0,
                end: 0.1,
                power: 2.0,
                total: PI,
            },
            exit_twist: TwistWindow {
                start: 0.86,
                end: 0.985,
                power: 1.9,
                total: PI,
            },
            exit_lateral: LateralWindow {
                start: 0.85,
                end: 0.998,
                power: 1.0,
                px: 700.0,
            },
            exit_loop: Some(LoopWindow::default()),
            ripple: None,
            perspective_distance: 760.0,
            vertical_tilt: 0.05,
            gradient: Gradient3::default(),
        }
    }

    /// Sweeps off to the left without a loop.
    pub fn exit_left() -> Self {
        Self {
            entry_twist: TwistWindow {
                start: 0.0,
                end: 0.16,
                power: 2.0,
                total: PI,
            },
            exit_twist: TwistWindow {
                start: 0.84,
                end: 0.985,
                power: 1.9,
                total: PI,
            },
            exit_lateral: LateralWindow {
                start: 0.84,
                end: 0.998,
                power: 1.7,
                px: -520.0,
            },
            exit_loop: None,
            ..Self::site_default()
        }
    }

    pub fn from_json_reader(r: impl Read) -> RibbonResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| RibbonError::serde(format!("ribbon config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> RibbonResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open ribbon config '{}'", path.display()))?;
        Self::from_json_reader(std::io::BufReader::new(f))
    }

    /// Index of the (possibly fractional) middle strand.
    pub fn center_index(&self) -> f64 {
        (self.line_count.saturating_sub(1)) as f64 / 2.0
    }

    /// Lateral offset of one strand from the centerline.
    pub fn strand_offset(&self, strand: usize) -> f64 {
        (strand as f64 - self.center_index()) * self.line_spacing
    }

    /// `line_count` offsets, evenly spaced by `line_spacing` and symmetric around zero.
    pub fn strand_offsets(&self) -> Vec<f64> {
        (0..self.line_count).map(|i| self.strand_offset(i)).collect()
    }

    pub fn max_offset(&self) -> f64 {
        self.center_index() * self.line_spacing.abs()
    }

    pub fn validate(&self) -> RibbonResult<()> {
        if self.line_count < 2 {
            return Err(RibbonError::validation("line_count must be >= 2"));
        }
        if self.steps_per_strand == 0 {
            return Err(RibbonError::validation("steps_per_strand must be > 0"));
        }

        let mut scalars = vec![
            ("line_spacing", self.line_spacing),
            ("line_width", self.line_width),
            ("pin_x", self.pin_x),
            ("time_speed", self.time_speed),
            ("phase_drift_speed", self.phase_drift_speed),
            ("perspective_distance", self.perspective_distance),
            ("vertical_tilt", self.vertical_tilt),
            ("torsion.base_twist", self.torsion.base_twist),
            ("torsion.amplitude", self.torsion.amplitude),
            ("torsion.cycles", self.torsion.cycles),
            ("torsion.h2_ratio", self.torsion.h2_ratio),
            ("torsion.h3_ratio", self.torsion.h3_ratio),
            ("torsion.h2_gain", self.torsion.h2_gain),
            ("torsion.h3_gain", self.torsion.h3_gain),
            ("torsion.phase_per_line", self.torsion.phase_per_line),
        ];
        for (name, w) in [("entry_twist", &self.entry_twist), ("exit_twist", &self.exit_twist)] {
            scalars.extend([
                (name, w.start),
                (name, w.end),
                (name, w.power),
                (name, w.total),
            ]);
        }
        let l = &self.exit_lateral;
        scalars.extend([
            ("exit_lateral", l.start),
            ("exit_lateral", l.end),
            ("exit_lateral", l.power),
            ("exit_lateral", l.px),
        ]);
        if let Some(lp) = &self.exit_loop {
            scalars.extend([
                ("exit_loop", lp.start),
                ("exit_loop", lp.end),
                ("exit_loop", lp.amplitude),
                ("exit_loop", lp.vertical),
            ]);
        }
        if let Some(r) = &self.ripple {
            scalars.extend([
                ("ripple", r.center),
                ("ripple", r.width),
                ("ripple", r.twist),
                ("ripple", r.wave),
            ]);
        }
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RibbonError::validation(format!("{name} must be finite")));
        }
        if !self.gradient.is_finite() {
            return Err(RibbonError::validation("gradient stops must be finite"));
        }

        if self.line_spacing <= 0.0 {
            return Err(RibbonError::validation("line_spacing must be > 0"));
        }
        if self.line_width <= 0.0 {
            return Err(RibbonError::validation("line_width must be > 0"));
        }
        if self.perspective_distance <= self.max_offset() {
            return Err(RibbonError::validation(format!(
                "perspective_distance ({}) must exceed the widest strand offset ({})",
                self.perspective_distance,
                self.max_offset()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/config.rs"]
mod tests;
