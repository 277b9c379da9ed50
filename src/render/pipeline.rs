use crate::{
    foundation::{
        core::FrameIndex,
        error::{RibbonError, RibbonResult},
    },
    render::{
        cpu::CpuSurface,
        renderer::{FrameOutcome, RibbonRenderer},
        scheduler::FrameQueue,
        sink::{FrameSink, SinkConfig},
        surface::DrawSurface,
    },
};

/// Counters from a headless run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveStats {
    pub ticks: u64,
    pub drawn: u64,
    pub skipped: u64,
}

/// Honour pending frame requests, ticking the renderer until the queue drains or `max_ticks`
/// is reached. `on_frame` sees every tick's outcome together with the surface.
pub fn drive_frames<S: DrawSurface>(
    renderer: &mut RibbonRenderer,
    surface: &mut S,
    queue: &mut FrameQueue,
    max_ticks: u64,
    mut on_frame: impl FnMut(FrameIndex, FrameOutcome, &S) -> RibbonResult<()>,
) -> RibbonResult<DriveStats> {
    let mut stats = DriveStats::default();
    while stats.ticks < max_ticks && queue.take() {
        let idx = renderer.next_frame_index();
        let outcome = renderer.tick(surface, queue)?;
        stats.ticks += 1;
        match outcome {
            FrameOutcome::Drawn => stats.drawn += 1,
            FrameOutcome::Skipped => stats.skipped += 1,
            FrameOutcome::Idle => {}
        }
        on_frame(idx, outcome, surface)?;
        if outcome == FrameOutcome::Idle {
            break;
        }
    }
    Ok(stats)
}

/// Run an already-sized renderer for `ticks` frames on a CPU surface, pushing every drawn frame
/// into `sink`.
#[tracing::instrument(skip(renderer, surface, sink))]
pub fn render_to_sink(
    renderer: &mut RibbonRenderer,
    surface: &mut CpuSurface,
    ticks: u64,
    sink: &mut dyn FrameSink,
) -> RibbonResult<DriveStats> {
    let (width, height) = surface
        .size()
        .ok_or_else(|| RibbonError::validation("surface must be sized before rendering"))?;

    let mut queue = FrameQueue::new();
    if !renderer.start(&mut queue) {
        return Err(RibbonError::validation(
            "renderer has no drawable geometry; resize it first",
        ));
    }
    if queue.pending() == 0 {
        // Motion disabled: a single still frame, usually already drawn by `resize`.
        if !renderer.has_frame() {
            renderer.draw(surface)?;
        }
        sink.begin(SinkConfig { width, height })?;
        sink.push_frame(FrameIndex(0), &surface.snapshot()?)?;
        sink.end()?;
        return Ok(DriveStats {
            ticks: 0,
            drawn: 1,
            skipped: 0,
        });
    }

    sink.begin(SinkConfig { width, height })?;
    let stats = drive_frames(renderer, surface, &mut queue, ticks, |idx, outcome, s| {
        if outcome == FrameOutcome::Drawn {
            sink.push_frame(idx, &s.snapshot()?)?;
        }
        Ok(())
    })?;
    sink.end()?;
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
