use crate::{
    curve::{config::RibbonConfig, seed::SeedState, vertical::VerticalEvaluator},
    foundation::{
        core::{FrameIndex, Point, ViewportGeometry},
        error::RibbonResult,
    },
    render::{
        scheduler::FrameScheduler,
        surface::{DrawSurface, StrokeStyle},
    },
};

/// Safety and motion knobs of a [`RibbonRenderer`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererOpts {
    /// When false the renderer draws once per resize and never schedules frames.
    pub motion: bool,
    /// Device pixel ratios above this are clamped.
    pub max_dpr: f64,
    /// CSS heights above this are clamped.
    pub max_height: f64,
    /// Clamped heights above this draw only every `skip_frames + 1`-th frame.
    pub skip_threshold: f64,
    pub skip_frames: u32,
}

impl Default for RendererOpts {
    fn default() -> Self {
        Self {
            motion: true,
            max_dpr: 2.0,
            max_height: 5000.0,
            skip_threshold: 3000.0,
            skip_frames: 1,
        }
    }
}

/// Monotonic animation time, advanced by a fixed step once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    time: f64,
}

impl AnimationClock {
    pub fn time(self) -> f64 {
        self.time
    }

    pub fn advance(&mut self, step: f64) {
        self.time += step;
    }
}

/// Result of [`RibbonRenderer::resize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeOutcome {
    /// The measured size cannot be drawn into; the renderer stays idle.
    Rejected,
    Ready {
        /// Backing buffer size in device pixels.
        buffer: (u32, u32),
        /// Whether the height was clamped to [`RendererOpts::max_height`].
        clamped: bool,
        /// Frames skipped between draws (0 draws every frame).
        skip_frames: u32,
    },
}

/// Result of one [`RibbonRenderer::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No usable geometry; nothing drawn and no frame scheduled.
    Idle,
    /// The frame was drawn.
    Drawn,
    /// Throttled: the clock advanced but nothing was drawn.
    Skipped,
}

/// One mounted ribbon animation.
///
/// Owns its seed, clock and geometry cache, so several renderers can coexist. The host feeds it
/// sizes through [`RibbonRenderer::resize`] and drives it through [`RibbonRenderer::tick`].
pub struct RibbonRenderer {
    cfg: RibbonConfig,
    seed: SeedState,
    opts: RendererOpts,

    viewport: Option<ViewportGeometry>,
    offsets: Vec<f64>,
    clock: AnimationClock,
    frame_count: u64,
    skip_frames: u32,
    running: bool,
    initialized: bool,
    draw_count: u64,
    /// A frame for the current geometry has been presented.
    frame_ready: bool,

    scratch: Vec<Point>,
}

impl RibbonRenderer {
    pub fn new(cfg: RibbonConfig, seed: SeedState, opts: RendererOpts) -> RibbonResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            seed,
            opts,
            viewport: None,
            offsets: Vec::new(),
            clock: AnimationClock::default(),
            frame_count: 0,
            skip_frames: 0,
            running: false,
            initialized: false,
            draw_count: 0,
            frame_ready: false,
            scratch: Vec::new(),
        })
    }

    pub fn config(&self) -> &RibbonConfig {
        &self.cfg
    }

    pub fn seed(&self) -> &SeedState {
        &self.seed
    }

    /// Set once the renderer has mounted on a drawable surface.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    /// Ticks received while geometry was usable.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Full redraws performed so far.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// Whether the surface holds a frame drawn at the current geometry.
    pub fn has_frame(&self) -> bool {
        self.frame_ready
    }

    pub fn skip_frames(&self) -> u32 {
        self.skip_frames
    }

    /// The clamped CSS geometry currently drawn into.
    pub fn viewport(&self) -> Option<ViewportGeometry> {
        self.viewport
    }

    pub fn strand_offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Recompute geometry from a fresh measurement.
    ///
    /// Overwrites whatever an in-flight frame would have read; the next tick uses the new values.
    #[tracing::instrument(skip(self, surface))]
    pub fn resize(
        &mut self,
        measured: ViewportGeometry,
        surface: &mut dyn DrawSurface,
    ) -> RibbonResult<ResizeOutcome> {
        self.frame_ready = false;
        let dpr = if measured.dpr.is_finite() && measured.dpr > 0.0 {
            measured.dpr.min(self.opts.max_dpr)
        } else {
            1.0
        };

        if !measured.is_drawable() {
            tracing::warn!(
                width = measured.width,
                height = measured.height,
                "ribbon surface dimensions are invalid"
            );
            self.viewport = None;
            return Ok(ResizeOutcome::Rejected);
        }

        let mut height = measured.height;
        let clamped = height > self.opts.max_height;
        if clamped {
            tracing::warn!(
                height,
                max = self.opts.max_height,
                "ribbon surface height exceeds maximum; limiting for performance"
            );
            height = self.opts.max_height;
        }

        let geometry = ViewportGeometry::new(measured.width, height, dpr);
        let buffer = geometry.buffer_size();
        if buffer.0 == 0 || buffer.1 == 0 {
            tracing::warn!(?buffer, "ribbon backing buffer would be empty");
            self.viewport = None;
            return Ok(ResizeOutcome::Rejected);
        }

        self.skip_frames = if height > self.opts.skip_threshold {
            self.opts.skip_frames
        } else {
            0
        };
        tracing::debug!(?buffer, skip_frames = self.skip_frames, "ribbon resized");

        surface.resize(buffer.0, buffer.1, dpr)?;
        self.viewport = Some(geometry);
        self.offsets = self.cfg.strand_offsets();

        if !self.opts.motion {
            self.draw(surface)?;
        }

        Ok(ResizeOutcome::Ready {
            buffer,
            clamped,
            skip_frames: self.skip_frames,
        })
    }

    /// Mount: mark the renderer initialized and schedule the first frame.
    ///
    /// Returns `false` (and stays idle) while no drawable geometry is known.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.viewport.is_none() {
            return false;
        }
        self.initialized = true;
        if self.opts.motion && !self.running {
            self.running = true;
            scheduler.request_frame();
        }
        true
    }

    /// Turn motion on or off from outside.
    ///
    /// Turning it off lets the next tick draw one last frame at the current clock and stop.
    /// Turning it back on resumes a stopped, mounted renderer by requesting a frame.
    pub fn set_motion(&mut self, enabled: bool, scheduler: &mut dyn FrameScheduler) {
        self.opts.motion = enabled;
        if enabled && self.initialized && !self.running && self.viewport.is_some() {
            self.running = true;
            scheduler.request_frame();
        }
    }

    /// One frame callback.
    ///
    /// Draws on frames selected by the skip factor, advances the clock on every tick while motion
    /// is enabled, and reschedules itself through `scheduler`.
    pub fn tick(
        &mut self,
        surface: &mut dyn DrawSurface,
        scheduler: &mut dyn FrameScheduler,
    ) -> RibbonResult<FrameOutcome> {
        if self.viewport.is_none() {
            self.running = false;
            return Ok(FrameOutcome::Idle);
        }

        self.frame_count += 1;
        let should_draw =
            self.skip_frames == 0 || self.frame_count % (u64::from(self.skip_frames) + 1) == 0;

        if should_draw {
            self.draw(surface)?;
        }

        if self.opts.motion {
            self.clock.advance(self.cfg.time_speed);
            self.running = true;
            scheduler.request_frame();
        } else {
            self.running = false;
        }

        Ok(if should_draw {
            FrameOutcome::Drawn
        } else {
            FrameOutcome::Skipped
        })
    }

    /// Index the next tick will get.
    pub fn next_frame_index(&self) -> FrameIndex {
        FrameIndex(self.frame_count)
    }

    /// Clear and stroke every strand at the current clock value.
    ///
    /// The clock only moves while motion is on, so a stopped renderer redraws the frame it
    /// stopped on.
    pub fn draw(&mut self, surface: &mut dyn DrawSurface) -> RibbonResult<()> {
        let Some(viewport) = self.viewport else {
            return Ok(());
        };

        let ev = VerticalEvaluator::new(
            &self.cfg,
            &self.seed,
            self.clock.time(),
            viewport.width,
            viewport.height,
        );

        surface.clear()?;
        let mut pts = std::mem::take(&mut self.scratch);
        for i in 0..self.offsets.len() {
            let style = StrokeStyle {
                color: self.cfg.gradient.color_at(ev.strand_gradient_t(i)),
                width: self.cfg.line_width,
            };
            ev.strand_polyline(i, &mut pts);
            surface.stroke_polyline(&pts, &style)?;
        }
        self.scratch = pts;
        surface.present()?;
        self.draw_count += 1;
        self.frame_ready = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
