use super::*;
use crate::render::{scheduler::FrameQueue, surface::RecordingSurface};

fn small_cfg() -> RibbonConfig {
    RibbonConfig {
        line_count: 5,
        steps_per_strand: 16,
        ..RibbonConfig::site_default()
    }
}

fn renderer(opts: RendererOpts) -> RibbonRenderer {
    RibbonRenderer::new(small_cfg(), SeedState::new(2024.0), opts).unwrap()
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let cfg = RibbonConfig {
        line_count: 0,
        ..RibbonConfig::default()
    };
    assert!(RibbonRenderer::new(cfg, SeedState::new(1.0), RendererOpts::default()).is_err());
}

#[test]
fn zero_geometry_does_no_work_and_stays_stopped() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    let mut queue = FrameQueue::new();

    let out = r
        .resize(ViewportGeometry::new(0.0, 0.0, 1.0), &mut surface)
        .unwrap();
    assert_eq!(out, ResizeOutcome::Rejected);
    assert!(!r.start(&mut queue));
    assert!(!r.is_running());
    assert!(!r.is_initialized());

    assert_eq!(r.tick(&mut surface, &mut queue).unwrap(), FrameOutcome::Idle);
    assert!(surface.events().is_empty());
    assert_eq!(queue.requested_total(), 0);
    assert_eq!(r.time(), 0.0);
}

#[test]
fn negative_geometry_is_rejected() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    let out = r
        .resize(ViewportGeometry::new(800.0, -5.0, 1.0), &mut surface)
        .unwrap();
    assert_eq!(out, ResizeOutcome::Rejected);
    assert!(r.viewport().is_none());
}

#[test]
fn normal_geometry_draws_every_frame() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    let mut queue = FrameQueue::new();

    let out = r
        .resize(ViewportGeometry::new(800.0, 600.0, 1.0), &mut surface)
        .unwrap();
    assert_eq!(
        out,
        ResizeOutcome::Ready {
            buffer: (800, 600),
            clamped: false,
            skip_frames: 0
        }
    );
    assert!(r.start(&mut queue));
    assert!(r.is_initialized());
    assert!(r.is_running());

    for _ in 0..4 {
        assert!(queue.take());
        assert_eq!(r.tick(&mut surface, &mut queue).unwrap(), FrameOutcome::Drawn);
    }
    assert_eq!(surface.clear_count(), 4);
    assert_eq!(surface.stroke_count(), 4 * 5);
    assert_eq!(queue.pending(), 1);
}

#[test]
fn tall_geometry_is_clamped_and_throttled() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    let mut queue = FrameQueue::new();

    let out = r
        .resize(ViewportGeometry::new(800.0, 6000.0, 1.0), &mut surface)
        .unwrap();
    assert_eq!(
        out,
        ResizeOutcome::Ready {
            buffer: (800, 5000),
            clamped: true,
            skip_frames: 1
        }
    );
    assert_eq!(r.viewport().unwrap().height, 5000.0);
    r.start(&mut queue);

    let mut drawn = 0;
    let mut skipped = 0;
    for _ in 0..10 {
        assert!(queue.take());
        match r.tick(&mut surface, &mut queue).unwrap() {
            FrameOutcome::Drawn => drawn += 1,
            FrameOutcome::Skipped => skipped += 1,
            FrameOutcome::Idle => panic!("tall surface should not idle"),
        }
    }
    assert_eq!((drawn, skipped), (5, 5));
    assert_eq!(surface.clear_count(), 5);
}

#[test]
fn skipping_does_not_change_clock_rate() {
    let mut short = renderer(RendererOpts::default());
    let mut tall = renderer(RendererOpts::default());
    let mut s1 = RecordingSurface::new();
    let mut s2 = RecordingSurface::new();
    let mut q1 = FrameQueue::new();
    let mut q2 = FrameQueue::new();
    short
        .resize(ViewportGeometry::new(800.0, 600.0, 1.0), &mut s1)
        .unwrap();
    tall.resize(ViewportGeometry::new(800.0, 6000.0, 1.0), &mut s2)
        .unwrap();

    for _ in 0..7 {
        short.tick(&mut s1, &mut q1).unwrap();
        tall.tick(&mut s2, &mut q2).unwrap();
    }
    assert_eq!(short.time(), tall.time());
    assert!(short.time() > 0.0);
}

#[test]
fn resize_sequence_recovers_after_invalid_size() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    let mut queue = FrameQueue::new();

    r.resize(ViewportGeometry::new(0.0, 0.0, 1.0), &mut surface)
        .unwrap();
    assert_eq!(r.tick(&mut surface, &mut queue).unwrap(), FrameOutcome::Idle);
    assert_eq!(surface.stroke_count(), 0);

    r.resize(ViewportGeometry::new(800.0, 600.0, 1.0), &mut surface)
        .unwrap();
    assert!(r.start(&mut queue));
    assert_eq!(r.tick(&mut surface, &mut queue).unwrap(), FrameOutcome::Drawn);
    assert_eq!(r.skip_frames(), 0);

    r.resize(ViewportGeometry::new(800.0, 6000.0, 1.0), &mut surface)
        .unwrap();
    assert_eq!(r.skip_frames(), 1);
    assert_eq!(surface.last_resize(), Some((800, 5000, 1.0)));
}

#[test]
fn device_pixel_ratio_is_clamped() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    r.resize(ViewportGeometry::new(400.0, 300.0, 3.0), &mut surface)
        .unwrap();
    assert_eq!(surface.last_resize(), Some((800, 600, 2.0)));

    r.resize(ViewportGeometry::new(400.0, 300.0, 0.0), &mut surface)
        .unwrap();
    assert_eq!(surface.last_resize(), Some((400, 300, 1.0)));
}

#[test]
fn motion_disabled_draws_once_and_never_schedules() {
    let mut r = renderer(RendererOpts {
        motion: false,
        ..RendererOpts::default()
    });
    let mut surface = RecordingSurface::new();
    let mut queue = FrameQueue::new();

    r.resize(ViewportGeometry::new(640.0, 480.0, 1.0), &mut surface)
        .unwrap();
    assert_eq!(surface.clear_count(), 1);
    assert_eq!(surface.stroke_count(), 5);

    assert!(r.start(&mut queue));
    assert!(!r.is_running());
    assert_eq!(queue.requested_total(), 0);

    assert_eq!(r.tick(&mut surface, &mut queue).unwrap(), FrameOutcome::Drawn);
    assert!(!r.is_running());
    assert_eq!(queue.requested_total(), 0);
    assert_eq!(r.time(), 0.0);
}

#[test]
fn strokes_carry_gradient_and_sample_count() {
    let mut r = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    r.resize(ViewportGeometry::new(800.0, 600.0, 1.0), &mut surface)
        .unwrap();
    r.draw(&mut surface).unwrap();

    let cfg = small_cfg();
    let strokes: Vec<_> = surface.strokes().collect();
    assert_eq!(strokes.len(), cfg.line_count);
    for (points, style) in &strokes {
        assert_eq!(points.len(), cfg.steps_per_strand + 1);
        assert_eq!(style.width, cfg.line_width);
    }
    assert_eq!(strokes[0].1.color, cfg.gradient.start);
    assert_eq!(strokes[2].1.color, cfg.gradient.mid);
    assert_eq!(strokes[4].1.color, cfg.gradient.end);
}

#[test]
fn separate_instances_do_not_interfere() {
    let mut a = renderer(RendererOpts::default());
    let mut b = renderer(RendererOpts::default());
    let mut sa = RecordingSurface::new();
    let mut sb = RecordingSurface::new();
    let mut q = FrameQueue::new();
    a.resize(ViewportGeometry::new(800.0, 600.0, 1.0), &mut sa)
        .unwrap();
    b.resize(ViewportGeometry::new(800.0, 600.0, 1.0), &mut sb)
        .unwrap();

    for _ in 0..3 {
        a.tick(&mut sa, &mut q).unwrap();
    }
    assert_eq!(b.time(), 0.0);
    b.tick(&mut sb, &mut q).unwrap();
    assert_ne!(a.time(), b.time());
}

#[test]
fn turning_motion_off_freezes_on_the_current_frame() {
    let mut r = renderer(RendererOpts::default());
    let mut twin = renderer(RendererOpts::default());
    let mut surface = RecordingSurface::new();
    let mut twin_surface = RecordingSurface::new();
    let mut queue = FrameQueue::new();
    let mut twin_queue = FrameQueue::new();
    let size = ViewportGeometry::new(800.0, 600.0, 1.0);
    r.resize(size, &mut surface).unwrap();
    twin.resize(size, &mut twin_surface).unwrap();
    assert!(r.start(&mut queue));
    assert!(twin.start(&mut twin_queue));

    for _ in 0..5 {
        assert!(queue.take());
        r.tick(&mut surface, &mut queue).unwrap();
        assert!(twin_queue.take());
        twin.tick(&mut twin_surface, &mut twin_queue).unwrap();
    }
    surface.take_events();
    twin_surface.take_events();

    r.set_motion(false, &mut queue);
    let stopped_at = r.time();
    let requested = queue.requested_total();

    assert!(queue.take());
    assert_eq!(r.tick(&mut surface, &mut queue).unwrap(), FrameOutcome::Drawn);
    let last = surface.take_events();
    assert!(!r.is_running());
    assert_eq!(queue.pending(), 0);
    assert_eq!(queue.requested_total(), requested);
    assert_eq!(r.time(), stopped_at);

    // The final frame continues the animation instead of snapping back to the start.
    twin.tick(&mut twin_surface, &mut twin_queue).unwrap();
    assert_eq!(last, twin_surface.take_events());

    r.draw(&mut surface).unwrap();
    assert_eq!(surface.take_events(), last);

    let mut fresh = renderer(RendererOpts::default());
    let mut fresh_surface = RecordingSurface::new();
    fresh.resize(size, &mut fresh_surface).unwrap();
    fresh.draw(&mut fresh_surface).unwrap();
    assert_ne!(fresh_surface.take_events(), last);
}

#[test]
fn turning_motion_back_on_resumes_a_stopped_renderer() {
    let mut r = renderer(RendererOpts {
        motion: false,
        ..RendererOpts::default()
    });
    let mut surface = RecordingSurface::new();
    let mut queue = FrameQueue::new();

    // Not mounted yet: nothing to resume.
    r.set_motion(true, &mut queue);
    assert_eq!(queue.requested_total(), 0);
    r.set_motion(false, &mut queue);

    r.resize(ViewportGeometry::new(640.0, 480.0, 1.0), &mut surface)
        .unwrap();
    assert!(r.start(&mut queue));
    assert!(!r.is_running());
    assert_eq!(queue.requested_total(), 0);

    r.set_motion(true, &mut queue);
    assert!(r.is_running());
    assert_eq!(queue.pending(), 1);
    r.set_motion(true, &mut queue);
    assert_eq!(queue.requested_total(), 1);

    assert!(queue.take());
    assert_eq!(r.tick(&mut surface, &mut queue).unwrap(), FrameOutcome::Drawn);
    assert!(r.time() > 0.0);
    assert_eq!(queue.pending(), 1);
}
