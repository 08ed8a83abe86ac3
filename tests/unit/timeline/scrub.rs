use super::*;
use crate::{
    animation::ease::Ease,
    animation::tween::{Prop, TargetId},
    foundation::core::{Vec2, Viewport},
    scroll::normalizer::{InputEvent, NormalizerConfig, ScrollMetrics, ScrollNormalizer},
};

fn driver(headless: bool) -> TimelineDriver {
    let vp = Viewport::new(1440.0, 1000.0).unwrap();
    let metrics = ScrollMetrics {
        viewport: vp,
        content_height: 11_000.0,
    };
    let n = ScrollNormalizer::new(NormalizerConfig::default(), Some(metrics)).unwrap();
    if headless {
        TimelineDriver::headless(n, vp)
    } else {
        TimelineDriver::new(n, vp)
    }
}

fn scroll_to(d: &mut TimelineDriver, offset: f64, now_ms: f64) {
    d.handle(InputEvent::ScrollTo {
        offset,
        immediate: true,
    });
    d.tick(now_ms);
}

fn hero_exit() -> ScrubScene {
    let mut tl = Timeline::new(vec![VisualState::RESTING; 2]);
    tl.to(TargetId(0), Prop::TranslateY, -70.0, 0.0, 1.0, Ease::Linear)
        .unwrap()
        .to(TargetId(0), Prop::Opacity, 0.0, 0.0, 1.0, Ease::Linear)
        .unwrap()
        .to(TargetId(1), Prop::Scale, 0.92, 0.0, 1.0, Ease::Linear)
        .unwrap()
        .to(TargetId(1), Prop::Opacity, 0.0, 0.0, 1.0, Ease::Linear)
        .unwrap();
    ScrubScene::new(TriggerSpec::parse("top top", "+=80%").unwrap(), 0.0, true, tl).unwrap()
}

#[test]
fn pinned_scene_follows_progress() {
    let mut d = driver(false);
    let mut s = hero_exit();
    s.mount(&mut d, Some(ElementRect::new(0.0, 1000.0))).unwrap();
    scroll_to(&mut d, 400.0, 0.0);

    let f = s.frame(&d);
    assert_eq!(f.progress, 0.5);
    assert_eq!(f.targets[0].translate, Vec2::new(0.0, -35.0));
    assert_eq!(f.targets[0].opacity, 0.5);
    assert!((f.targets[1].scale - 0.96).abs() < 1e-12);
    assert!(f.pin.pinned);
    assert_eq!(f.pin.spacer_px, 800.0);

    scroll_to(&mut d, 5000.0, 16.0);
    let f = s.frame(&d);
    assert_eq!(f.targets[0].opacity, 0.0);
    assert!(!f.pin.pinned);
}

#[test]
fn parallax_spans_viewport_crossing() {
    let mut d = driver(false);
    let mut tl = Timeline::new(vec![VisualState::RESTING]);
    tl.to(TargetId(0), Prop::TranslateY, -80.0, 0.0, 1.0, Ease::Linear)
        .unwrap();
    let mut s = ScrubScene::new(
        TriggerSpec::parse("top bottom", "bottom top").unwrap(),
        0.0,
        false,
        tl,
    )
    .unwrap();
    s.mount(&mut d, Some(ElementRect::new(2000.0, 1000.0))).unwrap();
    scroll_to(&mut d, 2000.0, 0.0);
    assert_eq!(s.frame(&d).targets[0].translate.y, -40.0);
}

#[test]
fn rejects_tweens_past_the_progress_axis() {
    let mut tl = Timeline::new(vec![VisualState::RESTING]);
    tl.to(TargetId(0), Prop::Opacity, 0.0, 0.5, 1.0, Ease::Linear)
        .unwrap();
    let trigger = TriggerSpec::parse("top top", "bottom top").unwrap();
    assert!(ScrubScene::new(trigger, 0.0, false, tl).is_err());
}

#[test]
fn static_host_renders_scene_at_rest() {
    let mut d = driver(true);
    let mut s = hero_exit();
    s.mount(&mut d, Some(ElementRect::new(0.0, 1000.0))).unwrap();
    scroll_to(&mut d, 400.0, 0.0);
    let f = s.frame(&d);
    assert!(f.targets.iter().all(VisualState::is_resting));
    assert_eq!(f.pin, PinState::default());
}

#[test]
fn orbs_drift_with_page_progress() {
    let [a, b, c] = BackgroundDrift::orbs(0.0);
    assert!(a.translate == Vec2::ZERO && b.translate == Vec2::ZERO);
    assert!((c.opacity - 0.04).abs() < 1e-12);

    let [a, b, c] = BackgroundDrift::orbs(0.5);
    assert_eq!(a.translate, Vec2::new(-30.0, -60.0));
    assert_eq!(b.translate, Vec2::new(40.0, 30.0));
    assert!((c.opacity - 0.08).abs() < 1e-12);
}

#[test]
fn drift_binding_spans_whole_page() {
    let mut d = driver(false);
    let mut drift = BackgroundDrift::new();
    drift.mount(&mut d).unwrap();
    scroll_to(&mut d, 5000.0, 0.0);
    assert_eq!(drift.frame(&d)[0].translate, Vec2::new(-30.0, -60.0));
    drift.unmount(&mut d);
    drift.unmount(&mut d);
    assert!(d.is_empty());
}
