use super::*;
use crate::{
    foundation::core::Viewport,
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

fn jump(d: &mut TimelineDriver, offset: f64) {
    d.handle(InputEvent::ScrollTo {
        offset,
        immediate: true,
    });
}

#[test]
fn direction_offsets() {
    assert_eq!(Direction::Up.offset(48.0), Vec2::new(0.0, 48.0));
    assert_eq!(Direction::Down.offset(48.0), Vec2::new(0.0, -48.0));
    assert_eq!(Direction::Left.offset(48.0), Vec2::new(48.0, 0.0));
    assert_eq!(Direction::Right.offset(48.0), Vec2::new(-48.0, 0.0));
    assert_eq!(Direction::None.offset(48.0), Vec2::ZERO);
}

#[test]
fn fade_in_waits_for_trigger_then_plays_on_the_clock() {
    let mut d = driver(false);
    let mut e = Entrance::fade_in(Direction::Up, 0.0, 1.1).unwrap();
    // Start resolves to 2000 - 0.88 * 1000 = 1120.
    e.mount(&mut d, Some(ElementRect::new(2000.0, 400.0))).unwrap();

    d.tick(0.0);
    let f = e.frame(&d);
    assert_eq!(f[0].opacity, 0.0);
    assert_eq!(f[0].translate.y, 48.0);

    jump(&mut d, 1200.0);
    d.tick(100.0);
    jump(&mut d, 0.0);
    d.tick(650.0);
    let f = e.frame(&d);
    assert!((f[0].opacity - Ease::OutQuint.apply(0.5)).abs() < 1e-9);

    d.tick(1300.0);
    assert!(e.frame(&d)[0].is_resting());
    jump(&mut d, 1200.0);
    d.tick(1400.0);
    assert!(e.frame(&d)[0].is_resting());
}

#[test]
fn stagger_offsets_each_item() {
    let mut d = driver(false);
    let trigger = TriggerSpec::parse("0", "max").unwrap();
    let from = VisualState::hidden().with_translate(0.0, 44.0);
    let mut e = Entrance::staggered(trigger, 3, from, 0.0, 1.0, 0.5).unwrap();
    assert_eq!(e.timeline().duration(), 2.0);
    e.mount(&mut d, Some(ElementRect::new(0.0, 800.0))).unwrap();

    d.tick(0.0);
    d.tick(500.0);
    let f = e.frame(&d);
    assert!(f[0].opacity > 0.0);
    assert_eq!(f[1].opacity, 0.0);
    assert_eq!(f[2], from);

    d.tick(2000.0);
    assert!(e.frame(&d).iter().all(VisualState::is_resting));
}

#[test]
fn missing_layout_and_static_hosts_show_content() {
    let mut d = driver(false);
    let mut e = Entrance::fade_in(Direction::Left, 0.2, 1.1).unwrap();
    e.mount(&mut d, None).unwrap();
    d.tick(0.0);
    assert!(e.frame(&d)[0].is_resting());

    let mut d = driver(true);
    let mut e = Entrance::fade_in(Direction::Up, 0.0, 1.1).unwrap();
    e.mount(&mut d, Some(ElementRect::new(2000.0, 400.0))).unwrap();
    d.tick(0.0);
    assert!(e.frame(&d)[0].is_resting());
}

#[test]
fn unmount_releases_registration() {
    let mut d = driver(false);
    let mut e = Entrance::fade_in(Direction::Up, 0.0, 1.1).unwrap();
    e.mount(&mut d, Some(ElementRect::new(2000.0, 400.0))).unwrap();
    e.mount(&mut d, Some(ElementRect::new(2000.0, 400.0))).unwrap();
    assert_eq!(d.len(), 1);
    e.unmount(&mut d);
    e.unmount(&mut d);
    assert!(d.is_empty());
    assert!(e.id().is_none());
}

#[test]
fn fade_group_keeps_per_item_direction_and_delay() {
    let e = Entrance::fade_group(&[(Direction::Left, 0.0), (Direction::Right, 0.15)], 1.1).unwrap();
    let start = e.timeline().sample(0.0);
    assert_eq!(start[0].translate, Vec2::new(48.0, 0.0));
    assert_eq!(start[1].translate, Vec2::new(-48.0, 0.0));
    assert!((e.timeline().duration() - 1.25).abs() < 1e-12);
}
