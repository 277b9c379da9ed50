//! Elliptical-arc evaluator used by the static exporter.
//!
//! The centerline is a quarter of an ellipse inscribed in the frame, starting on one of the four
//! axis points. Strands are spread along the arc normal, twisted inside two soft regions, and
//! pushed in depth by a slow wave before a perspective divide about the frame center.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::foundation::{
    core::{Point, Point3},
    error::{RibbonError, RibbonResult},
    math::{hash1, smoothstep},
};

/// Ellipse semi-axes as a fraction of the frame size.
const ARC_RADIUS_FRACTION: f64 = 0.45;
/// Scales the distance to a twist region before it is eased; lower is softer.
const TWIST_SOFTNESS: f64 = 0.45;

/// Randomized geometry of one exported ribbon.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EllipticConfig {
    pub seed: f64,
    /// Arc start angle; a multiple of `π/2`.
    pub start_angle: f64,
    pub lines: usize,
    pub steps: usize,
    pub perspective: f64,
    /// Total spread of the strands along the arc normal.
    pub ribbon_depth: f64,
    pub wave_frequency: f64,
    pub wave_amplitude: f64,
    pub twist_1_amount: f64,
    pub twist_2_amount: f64,
    pub twist_1_position: f64,
    pub twist_2_position: f64,
    pub twist_region_width: f64,
    pub base_twist_turns: f64,
}

impl EllipticConfig {
    /// Draw every parameter from `hash1(seed + k)` within its tuned range.
    pub fn from_seed(seed: f64) -> Self {
        let r = |offset: f64, lo: f64, hi: f64| lo + hash1(seed + offset) * (hi - lo);
        let quadrant = (hash1(seed + 50.0) * 4.0).floor().min(3.0);
        Self {
            seed,
            start_angle: quadrant * FRAC_PI_2,
            lines: r(1.0, 45.0, 75.0).floor() as usize,
            steps: r(2.0, 320.0, 420.0).floor() as usize,
            perspective: 800.0,
            ribbon_depth: r(3.0, 280.0, 420.0),
            wave_frequency: r(4.0, 0.5, 4.0),
            wave_amplitude: r(5.0, 0.0, 32.0),
            twist_1_amount: r(6.0, 0.06, 0.25),
            twist_2_amount: r(7.0, 0.06, 0.25),
            twist_1_position: r(8.0, 0.25, 0.45),
            twist_2_position: r(9.0, 0.5, 0.75),
            twist_region_width: r(10.0, 0.28, 0.5),
            base_twist_turns: r(11.0, 0.0, 0.18),
        }
    }

    pub fn validate(&self) -> RibbonResult<()> {
        if self.lines < 2 {
            return Err(RibbonError::validation("lines must be >= 2"));
        }
        if self.steps == 0 {
            return Err(RibbonError::validation("steps must be > 0"));
        }
        if self.twist_region_width <= 0.0 {
            return Err(RibbonError::validation("twist_region_width must be > 0"));
        }
        let max_depth = self.ribbon_depth.abs() / 2.0 + self.wave_amplitude.abs();
        if self.perspective <= max_depth {
            return Err(RibbonError::validation(
                "perspective must exceed half the ribbon depth plus the wave amplitude",
            ));
        }
        Ok(())
    }

    pub fn line_spacing(&self) -> f64 {
        self.ribbon_depth / (self.lines.max(2) - 1) as f64
    }
}

/// One projected strand and its mean depth.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedStrand {
    pub index: usize,
    pub points: Vec<Point>,
    pub avg_z: f64,
}

/// Evaluates exporter ribbon points inside a square-ish `width × height` frame.
#[derive(Clone, Debug)]
pub struct EllipticEvaluator<'a> {
    cfg: &'a EllipticConfig,
    center: Point,
    radii: (f64, f64),
}

impl<'a> EllipticEvaluator<'a> {
    pub fn new(cfg: &'a EllipticConfig, width: f64, height: f64) -> Self {
        Self {
            cfg,
            center: Point::new(width * 0.5, height * 0.5),
            radii: (width * ARC_RADIUS_FRACTION, height * ARC_RADIUS_FRACTION),
        }
    }

    /// Twist angle at `u`: two soft sine bumps plus a slow linear base twist.
    pub fn twist_angle(&self, u: f64) -> f64 {
        let cfg = self.cfg;
        let width = cfg.twist_region_width.max(f64::EPSILON);
        let envelope = |position: f64| {
            let dist = (u - position).abs() / width;
            1.0 - smoothstep((dist * TWIST_SOFTNESS).min(1.0))
        };
        let twist_1 = (u * TAU).sin() * cfg.twist_1_amount * envelope(cfg.twist_1_position);
        let twist_2 =
            (u * TAU + FRAC_PI_2).sin() * cfg.twist_2_amount * envelope(cfg.twist_2_position);
        let base = u * TAU * cfg.base_twist_turns;
        (twist_1 + twist_2) * PI + base
    }

    /// Pre-projection point: `x`/`y` on the frame, `z` the simulated depth.
    pub fn point(&self, strand: usize, u: f64) -> Point3 {
        let cfg = self.cfg;
        let mid = (cfg.lines.max(2) - 1) as f64 / 2.0;
        let offset = (strand as f64 - mid) * cfg.line_spacing();

        let theta = cfg.start_angle + u * FRAC_PI_2;
        let (sin_t, cos_t) = theta.sin_cos();
        let (a, b) = self.radii;
        let on_arc = Point::new(self.center.x + a * cos_t, self.center.y + b * sin_t);

        // Unit normal of the arc (tangent rotated by -90°).
        let (tx, ty) = (-a * sin_t, b * cos_t);
        let len = tx.hypot(ty);
        let len = if len > 0.0 { len } else { 1.0 };
        let (nx, ny) = (ty / len, -tx / len);

        let wave = cfg.wave_amplitude * (theta * cfg.wave_frequency).sin();
        let (sin_tw, cos_tw) = self.twist_angle(u).sin_cos();
        let radial = offset * cos_tw;

        Point3 {
            x: on_arc.x + nx * radial,
            y: on_arc.y + ny * radial,
            z: offset * sin_tw + wave,
        }
    }

    /// Perspective divide about the frame center.
    pub fn project(&self, p: Point3) -> Point {
        let scale = self.cfg.perspective / (self.cfg.perspective + p.z);
        Point::new(
            self.center.x + (p.x - self.center.x) * scale,
            self.center.y + (p.y - self.center.y) * scale,
        )
    }

    pub fn strand(&self, strand: usize) -> ProjectedStrand {
        let steps = self.cfg.steps.max(1);
        let mut points = Vec::with_capacity(steps + 1);
        let mut z_sum = 0.0;
        for j in 0..=steps {
            let u = j as f64 / steps as f64;
            let p = self.point(strand, u);
            points.push(self.project(p));
            z_sum += p.z;
        }
        let avg_z = z_sum / points.len() as f64;
        ProjectedStrand {
            index: strand,
            points,
            avg_z,
        }
    }

    /// All strands, farthest (lowest mean depth) first.
    pub fn strands_back_to_front(&self) -> Vec<ProjectedStrand> {
        let mut strands: Vec<_> = (0..self.cfg.lines).map(|i| self.strand(i)).collect();
        z_sort(&mut strands);
        strands
    }
}

/// Stable ascending sort by mean depth; ties keep their strand order.
pub fn z_sort(strands: &mut [ProjectedStrand]) {
    strands.sort_by(|a, b| a.avg_z.total_cmp(&b.avg_z));
}

#[cfg(test)]
#[path = "../../tests/unit/curve/elliptic.rs"]
mod tests;
