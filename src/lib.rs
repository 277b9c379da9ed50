//! Procedural twisted-ribbon line art.
//!
//! Two front ends share one family of curve evaluators:
//!
//! - [`RibbonRenderer`] animates a vertical ribbon of strands on any [`DrawSurface`], driven one
//!   tick at a time by a host [`FrameScheduler`].
//! - [`export_batch`] writes a batch of static SVG ribbons traced along elliptical arcs.
//!
//! Every curve is a pure function of seed, configuration, strand index, curve parameter and
//! (for the animated variant) the animation clock.
#![forbid(unsafe_code)]

/// Curve evaluators and their configuration.
pub mod curve;
/// Static SVG export.
pub mod export;
/// Shared primitives: geometry types, errors, easing and hashing.
pub mod foundation;
/// Animated canvas renderer and its host seams.
pub mod render;

pub use crate::curve::color::{Gradient3, Rgba};
pub use crate::curve::config::{
    LateralWindow, LoopWindow, RibbonConfig, Ripple, TorsionField, TwistWindow,
};
pub use crate::curve::elliptic::{EllipticConfig, EllipticEvaluator, ProjectedStrand};
pub use crate::curve::seed::{SeedSequence, SeedState};
pub use crate::curve::vertical::VerticalEvaluator;
pub use crate::export::batch::{
    ExportOpts, ExportReport, ExportedFile, GeneratedRibbon, export_batch, generate_ribbon,
};
pub use crate::foundation::core::{FrameIndex, Point, Point3, ViewportGeometry};
pub use crate::foundation::error::{RibbonError, RibbonResult};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::pipeline::{DriveStats, drive_frames, render_to_sink};
pub use crate::render::renderer::{FrameOutcome, RendererOpts, ResizeOutcome, RibbonRenderer};
pub use crate::render::scheduler::{FrameQueue, FrameScheduler};
pub use crate::render::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::render::surface::{DrawSurface, FrameRGBA, RecordingSurface, StrokeStyle};
