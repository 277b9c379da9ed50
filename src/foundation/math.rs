//! Scalar primitives shared by both curve evaluators.

use std::f64::consts::TAU;

/// Smallest window width used as a denominator by the easing ramps.
pub const WINDOW_EPSILON: f64 = 1e-6;

/// Classic shader hash: `frac(sin(n * 127.1) * 43758.5453123)`, in `[0, 1)`.
pub fn hash1(n: f64) -> f64 {
    let s = (n * 127.1).sin() * 43_758.545_312_3;
    s - s.floor()
}

/// [`hash1`] scaled to an angle in `[0, 2π)`.
pub fn hash_angle(n: f64) -> f64 {
    hash1(n) * TAU
}

pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Cubic Hermite `t²(3 − 2t)`; callers clamp `t` first.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Endpoint-exact linear interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

fn window_ratio(u: f64, start: f64, end: f64) -> f64 {
    clamp01((u - start) / (end - start).max(WINDOW_EPSILON))
}

/// 0 before `start`, 1 after `end`, smoothstep in between raised to `power` when `power > 1`.
pub fn ramp01(u: f64, start: f64, end: f64, power: f64) -> f64 {
    let x = smoothstep(window_ratio(u, start, end));
    if power > 1.0 { x.powf(power) } else { x }
}

/// 1 before `start`, 0 after `end`: `1 − smoothstep(t)^power`.
pub fn fade_out01(u: f64, start: f64, end: f64, power: f64) -> f64 {
    1.0 - smoothstep(window_ratio(u, start, end)).powf(power)
}

/// Progress through `[start, end]` (clamped) with a guarded denominator.
pub fn window_progress(u: f64, start: f64, end: f64) -> f64 {
    window_ratio(u, start, end)
}

/// `smoothstep(p) * smoothstep(1 − p)`: zero at both ends of a window, peaks in the middle.
pub fn bump(p: f64) -> f64 {
    let p = clamp01(p);
    smoothstep(p) * smoothstep(1.0 - p)
}

/// SplitMix64 generator used to derive seeds.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeded from the wall clock; only used when the caller supplies no seed.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(nanos ^ u64::from(std::process::id()).rotate_left(32))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Convert premultiplied RGBA8 back to straight alpha in place.
pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
