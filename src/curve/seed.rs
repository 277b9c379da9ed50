use std::f64::consts::TAU;

use crate::foundation::math::{Rng64, hash_angle, hash1};

/// Upper bound (exclusive) for seeds drawn at random.
pub const SEED_RANGE: f64 = 10_000.0;

const PHASE_A_OFFSET: f64 = 10.1;
const PHASE_B_OFFSET: f64 = 20.2;
const PHASE_C_OFFSET: f64 = 30.3;
const SIGN_OFFSET: f64 = 99.9;

/// Relative drift rates of the second and third harmonic against the first.
const DRIFT_B: f64 = -0.7;
const DRIFT_C: f64 = 0.35;

/// Per-run randomness: one scalar seed and everything derived from it.
///
/// Fixed for the lifetime of one renderer instance or one exported file.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SeedState {
    pub seed: f64,
    base: HarmonicPhases,
    sign: f64,
}

/// The three torsion harmonic phases, in radians.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HarmonicPhases {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl SeedState {
    pub fn new(seed: f64) -> Self {
        let base = HarmonicPhases {
            a: hash_angle(seed + PHASE_A_OFFSET),
            b: hash_angle(seed + PHASE_B_OFFSET),
            c: hash_angle(seed + PHASE_C_OFFSET),
        };
        let sign = if hash1(seed + SIGN_OFFSET) < 0.5 {
            -1.0
        } else {
            1.0
        };
        Self { seed, base, sign }
    }

    /// A seed uniformly drawn from `[0, SEED_RANGE)`.
    pub fn from_entropy() -> Self {
        Self::new(Rng64::from_entropy().next_f64_01() * SEED_RANGE)
    }

    /// Global twist direction, `-1.0` or `1.0`.
    pub fn sign(&self) -> f64 {
        self.sign
    }

    pub fn base_phases(&self) -> HarmonicPhases {
        self.base
    }

    /// Phases after `drift` radians of slow rotation; the harmonics drift at decorrelated rates.
    pub fn phases(&self, drift: f64) -> HarmonicPhases {
        HarmonicPhases {
            a: self.base.a + drift,
            b: self.base.b + drift * DRIFT_B,
            c: self.base.c + drift * DRIFT_C,
        }
    }
}

/// Reproducible stream of independent seeds in `[0, SEED_RANGE)`.
#[derive(Clone, Debug)]
pub struct SeedSequence {
    rng: Rng64,
}

impl SeedSequence {
    pub fn new(base: u64) -> Self {
        Self {
            rng: Rng64::new(base),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Rng64::from_entropy(),
        }
    }

    pub fn next_seed(&mut self) -> f64 {
        self.rng.next_f64_01() * SEED_RANGE
    }

    pub fn take_seeds(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.next_seed()).collect()
    }
}
