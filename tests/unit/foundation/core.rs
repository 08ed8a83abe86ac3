use super::*;

#[test]
fn viewport_rejects_bad_dimensions() {
    assert!(Viewport::new(f64::NAN, 10.0).is_err());
    assert!(Viewport::new(10.0, -1.0).is_err());
    let vp = Viewport::new(1440.0, 900.0).unwrap();
    assert_eq!(vp.height_pct(200.0), 1800.0);
}

#[test]
fn element_rect_edges() {
    let r = ElementRect::new(100.0, 50.0);
    assert_eq!(r.bottom(), 150.0);
    assert_eq!(r.center(), 125.0);
    assert_eq!(ElementRect::new(0.0, -5.0).height, 0.0);
}

#[test]
fn resting_state_is_identity() {
    let s = VisualState::RESTING;
    assert!(s.is_resting());
    assert_eq!(s.to_affine(), Affine::IDENTITY);
    assert!(!VisualState::hidden().is_visible());
}

#[test]
fn to_affine_translates_then_scales() {
    let s = VisualState::RESTING.with_translate(0.0, -36.0).with_scale(0.5);
    let p = s.to_affine() * kurbo::Point::new(10.0, 10.0);
    assert_eq!(p, kurbo::Point::new(5.0, -31.0));
}

#[test]
fn lerp_midpoint() {
    let a = VisualState::hidden().with_translate(0.0, 36.0);
    let b = VisualState::RESTING;
    let m = VisualState::lerp(&a, &b, 0.5);
    assert_eq!(m.opacity, 0.5);
    assert_eq!(m.translate, Vec2::new(0.0, 18.0));
}
