use super::*;

fn gradient() -> Gradient3 {
    Gradient3 {
        start: Rgba::new(244.0, 51.0, 171.0, 0.25),
        mid: Rgba::new(242.0, 169.0, 0.0, 0.5),
        end: Rgba::new(77.0, 60.0, 255.0, 0.1),
    }
}

#[test]
fn stops_are_hit_exactly() {
    let g = gradient();
    assert_eq!(g.color_at(0.0), g.start);
    assert_eq!(g.color_at(0.5), g.mid);
    assert_eq!(g.color_at(1.0), g.end);
}

#[test]
fn out_of_range_input_is_clamped() {
    let g = gradient();
    assert_eq!(g.color_at(-3.0), g.start);
    assert_eq!(g.color_at(7.0), g.end);
}

#[test]
fn intermediate_values_interpolate_per_channel() {
    let g = gradient();
    let q = g.color_at(0.25);
    assert!((q.r - 243.0).abs() < 1e-9);
    assert!((q.g - 110.0).abs() < 1e-9);
    assert!((q.b - 85.5).abs() < 1e-9);
    assert!((q.a - 0.375).abs() < 1e-9);

    let q = g.color_at(0.75);
    assert!((q.r - 159.5).abs() < 1e-9);
    assert!((q.g - 114.5).abs() < 1e-9);
    assert!((q.b - 127.5).abs() < 1e-9);
    assert!((q.a - 0.3).abs() < 1e-9);
}

#[test]
fn css_rounds_channels_and_fixes_alpha_precision() {
    let c = Rgba::new(159.5, 114.4, 0.0, 0.3);
    assert_eq!(c.to_css(), "rgba(160, 114, 0, 0.300)");
    assert_eq!(
        Gradient3::default().color_at(0.0).to_css(),
        "rgba(244, 51, 171, 0.250)"
    );
}

#[test]
fn rgba8_scales_alpha() {
    assert_eq!(Rgba::WHITE.to_rgba8(), [255, 255, 255, 255]);
    assert_eq!(Rgba::new(10.4, 0.0, 300.0, 0.5).to_rgba8(), [10, 0, 255, 128]);
}
