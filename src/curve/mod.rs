//! Ribbon curve evaluators.
//!
//! Both variants are pure functions of `(seed, config, strand, u)` (plus the animation clock for
//! the canvas variant); nothing here reads shared mutable state.

/// Gradient stops and color formatting.
pub mod color;
/// Canvas ribbon configuration.
pub mod config;
/// Elliptical-arc evaluator for the static exporter.
pub mod elliptic;
/// Seed-derived phases and seed streams.
pub mod seed;
/// Vertical-scan evaluator for the canvas renderer.
pub mod vertical;
