//! Vertical-scan evaluator used by the canvas renderer.
//!
//! A strand runs from the top of the surface (`u = 0`) to the bottom (`u = 1`) around a centerline
//! pinned at `pin_x * width`. The strand's lateral offset is rotated about that centerline by the
//! torsion angle, which lands part of it in depth; depth is then folded back onto the screen by a
//! perspective divide on x and a small tilt on y.

use std::f64::consts::{PI, TAU};

use crate::{
    curve::{
        config::RibbonConfig,
        seed::{HarmonicPhases, SeedState},
    },
    foundation::{
        core::{Point, Point3},
        math::{WINDOW_EPSILON, bump, clamp01, fade_out01, ramp01, smoothstep, window_progress},
    },
};

/// Second and third harmonic coupling to the per-strand phase.
const H2_LINE_COUPLING: f64 = -0.65;
const H3_LINE_COUPLING: f64 = 0.35;

/// Evaluates canvas ribbon points for one frame.
///
/// Holds only values derived from its inputs, so two evaluators built from the same
/// `(config, seed, time, size)` produce bit-identical points.
#[derive(Clone, Debug)]
pub struct VerticalEvaluator<'a> {
    cfg: &'a RibbonConfig,
    sign: f64,
    phases: HarmonicPhases,
    pin_x: f64,
    height: f64,
}

impl<'a> VerticalEvaluator<'a> {
    /// `time` is the animation clock; pass `0.0` for a still frame.
    pub fn new(
        cfg: &'a RibbonConfig,
        seed: &SeedState,
        time: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            cfg,
            sign: seed.sign(),
            phases: seed.phases(time * cfg.phase_drift_speed),
            pin_x: width * cfg.pin_x,
            height,
        }
    }

    /// Twist angle (radians) of strand `strand` at progress `u`.
    pub fn twist_angle(&self, strand: usize, u: f64) -> f64 {
        let cfg = self.cfg;
        let tf = &cfg.torsion;
        let lp = (strand as f64 - cfg.center_index()) * tf.phase_per_line;
        let p = self.phases;

        let a1 = (u * tf.cycles * TAU + p.a + lp).sin();
        let a2 = (u * tf.cycles * tf.h2_ratio * TAU + p.b + lp * H2_LINE_COUPLING).sin();
        let a3 = (u * tf.cycles * tf.h3_ratio * TAU + p.c + lp * H3_LINE_COUPLING).sin();
        let field = tf.base_twist + tf.amplitude * (a1 + tf.h2_gain * a2 + tf.h3_gain * a3);

        let e = &cfg.entry_twist;
        let x = &cfg.exit_twist;
        let entry = fade_out01(u, e.start, e.end, e.power) * e.total;
        let exit = ramp01(u, x.start, x.end, x.power) * x.total;

        let ripple = cfg
            .ripple
            .map(|r| ripple_envelope(u, r.center, r.width) * r.twist)
            .unwrap_or(0.0);

        self.sign * (field + entry + exit + ripple)
    }

    /// Centerline displacement at `u`: `(lateral px, vertical lift px)`.
    pub fn centerline_shift(&self, u: f64) -> (f64, f64) {
        let cfg = self.cfg;
        let l = &cfg.exit_lateral;
        let mut lateral = l.px * ramp01(u, l.start, l.end, l.power);
        let mut lift = 0.0;

        if let Some(lp) = &cfg.exit_loop
            && u >= lp.start
            && u <= lp.end
        {
            let raw = window_progress(u, lp.start, lp.end);
            let eased = smoothstep(raw);
            let envelope = bump(raw);
            let shape = (1.0 - (eased * TAU).cos()) * 0.5 * envelope;
            // The loop pulls back against the direction of travel.
            lateral -= l.px.signum() * shape * lp.amplitude;
            lift = (eased * PI).sin() * lp.vertical * envelope;
        }

        if let Some(r) = &cfg.ripple {
            let env = ripple_envelope(u, r.center, r.width);
            if env > 0.0 {
                let w = r.width.abs().max(WINDOW_EPSILON);
                lateral += r.wave * env * (TAU * (u - r.center) / w).sin();
            }
        }

        (lateral, lift)
    }

    /// Object-space point: `x` already includes the strand's rotated offset, `y` the loop lift.
    pub fn point(&self, strand: usize, u: f64) -> Point3 {
        let s0 = self.cfg.strand_offset(strand);
        let theta = self.twist_angle(strand, u);
        let (lateral, lift) = self.centerline_shift(u);
        Point3 {
            x: self.pin_x + lateral + s0 * theta.cos(),
            y: u * self.height - lift,
            z: s0 * theta.sin(),
        }
    }

    /// Perspective divide around the pinned centerline plus depth tilt on y.
    pub fn project(&self, p: Point3) -> Point {
        let d = self.cfg.perspective_distance;
        let scale = d / (d - p.z);
        Point::new(
            (p.x - self.pin_x) * scale + self.pin_x,
            p.y + p.z * self.cfg.vertical_tilt,
        )
    }

    pub fn screen_point(&self, strand: usize, u: f64) -> Point {
        self.project(self.point(strand, u))
    }

    /// Fill `out` with the `steps_per_strand + 1` projected samples of one strand.
    pub fn strand_polyline(&self, strand: usize, out: &mut Vec<Point>) {
        let steps = self.cfg.steps_per_strand.max(1);
        out.clear();
        out.reserve(steps + 1);
        for j in 0..=steps {
            let u = j as f64 / steps as f64;
            out.push(self.screen_point(strand, u));
        }
    }

    /// Normalized lateral position of a strand, used for its gradient color.
    pub fn strand_gradient_t(&self, strand: usize) -> f64 {
        let cfg = self.cfg;
        let min = cfg.strand_offset(0);
        let max = cfg.strand_offset(cfg.line_count.saturating_sub(1));
        clamp01((cfg.strand_offset(strand) - min) / (max - min).max(WINDOW_EPSILON))
    }
}

/// `(1 − dist)²` inside `width` of `center`, zero outside.
fn ripple_envelope(u: f64, center: f64, width: f64) -> f64 {
    let dist = (u - center).abs() / width.abs().max(WINDOW_EPSILON);
    if dist < 1.0 {
        (1.0 - dist) * (1.0 - dist)
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/vertical.rs"]
mod tests;
