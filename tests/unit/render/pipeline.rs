use super::*;
use crate::{
    curve::{config::RibbonConfig, seed::SeedState},
    foundation::core::ViewportGeometry,
    render::{renderer::RendererOpts, sink::InMemorySink, surface::RecordingSurface},
};

fn renderer(opts: RendererOpts) -> RibbonRenderer {
    let cfg = RibbonConfig {
        line_count: 3,
        steps_per_strand: 12,
        ..RibbonConfig::site_default()
    };
    RibbonRenderer::new(cfg, SeedState::new(77.0), opts).unwrap()
}

#[test]
fn drive_frames_stops_at_budget() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    let mut queue = FrameQueue::new();
    r.resize(ViewportGeometry::new(200.0, 150.0, 1.0), &mut surface)
        .unwrap();
    assert!(r.start(&mut queue));

    let mut seen = Vec::new();
    let stats = drive_frames(&mut r, &mut surface, &mut queue, 6, |idx, outcome, _| {
        seen.push((idx, outcome));
        Ok(())
    })
    .unwrap();

    assert_eq!(
        stats,
        DriveStats {
            ticks: 6,
            drawn: 6,
            skipped: 0
        }
    );
    assert_eq!(seen.first().map(|s| s.0), Some(FrameIndex(0)));
    assert_eq!(seen.last().map(|s| s.0), Some(FrameIndex(5)));
    assert_eq!(queue.pending(), 1);
}

#[test]
fn drive_frames_does_nothing_without_a_request() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    let mut queue = FrameQueue::new();
    r.resize(ViewportGeometry::new(200.0, 150.0, 1.0), &mut surface)
        .unwrap();

    let stats = drive_frames(&mut r, &mut surface, &mut queue, 10, |_, _, _| Ok(())).unwrap();
    assert_eq!(stats, DriveStats::default());
    assert_eq!(surface.clear_count(), 0);
}

#[test]
fn render_to_sink_pushes_only_drawn_frames() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = CpuSurface::new();
    r.resize(ViewportGeometry::new(40.0, 3200.0, 1.0), &mut surface)
        .unwrap();
    assert_eq!(r.skip_frames(), 1);

    let mut sink = InMemorySink::new();
    let stats = render_to_sink(&mut r, &mut surface, 4, &mut sink).unwrap();
    assert_eq!((stats.drawn, stats.skipped), (2, 2));

    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, vec![1, 3]);
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 40,
            height: 3200
        })
    );
    assert!(sink.frames().iter().all(|(_, f)| f.premultiplied));
}

#[test]
fn render_to_sink_without_motion_emits_one_still() {
    let mut r = renderer(RendererOpts {
        motion: false,
        ..RendererOpts::default()
    });
    let mut surface = CpuSurface::new();
    r.resize(ViewportGeometry::new(64.0, 64.0, 1.0), &mut surface)
        .unwrap();

    let mut sink = InMemorySink::new();
    let stats = render_to_sink(&mut r, &mut surface, 10, &mut sink).unwrap();
    assert_eq!(stats.drawn, 1);
    assert_eq!(r.draw_count(), 1);
    assert_eq!(sink.frames().len(), 1);
    assert!(sink.frames()[0].1.data.chunks_exact(4).any(|px| px[3] > 0));
}

#[test]
fn render_to_sink_draws_a_still_when_motion_was_turned_off_after_resize() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = CpuSurface::new();
    let mut queue = FrameQueue::new();
    r.resize(ViewportGeometry::new(64.0, 64.0, 1.0), &mut surface)
        .unwrap();
    assert!(!r.has_frame());
    r.set_motion(false, &mut queue);

    let mut sink = InMemorySink::new();
    render_to_sink(&mut r, &mut surface, 10, &mut sink).unwrap();
    assert_eq!(r.draw_count(), 1);
    assert_eq!(sink.frames().len(), 1);
    assert_eq!(queue.requested_total(), 0);
}

#[test]
fn render_to_sink_requires_a_sized_surface() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = CpuSurface::new();
    let mut sink = InMemorySink::new();
    assert!(render_to_sink(&mut r, &mut surface, 3, &mut sink).is_err());
    assert!(sink.frames().is_empty());
}
