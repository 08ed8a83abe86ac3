use super::*;

fn vp() -> Viewport {
    Viewport::new(1440.0, 1000.0).unwrap()
}

fn ctx(offset: f64, now_ms: f64) -> FrameCtx {
    FrameCtx {
        offset,
        viewport: vp(),
        dt_secs: 1.0 / 60.0,
        now_ms,
    }
}

fn pinned() -> TimelineBinding {
    let mut b =
        TimelineBinding::scrub(TriggerSpec::parse("top top", "+=200%").unwrap(), 0.0, true)
            .unwrap();
    b.measure(Some(ElementRect::new(1000.0, 1000.0)), vp(), 10_000.0);
    b
}

#[test]
fn starts_unarmed_and_arms_on_measure() {
    let mut b =
        TimelineBinding::scrub(TriggerSpec::parse("top top", "+=100%").unwrap(), 0.0, false)
            .unwrap();
    assert_eq!(b.state(), TimelineState::Unarmed);
    assert_eq!(b.update(&ctx(500.0, 0.0)), None);
    b.measure(Some(ElementRect::new(0.0, 100.0)), vp(), 5000.0);
    assert_eq!(b.state(), TimelineState::Idle);
}

#[test]
fn progress_is_monotonic_in_offset() {
    let mut b = pinned();
    let mut last = -1.0;
    for step in 0..=60 {
        let offset = 500.0 + step as f64 * 50.0;
        b.update(&ctx(offset, 0.0));
        assert!(b.raw_progress() >= last);
        last = b.raw_progress();
    }
    assert_eq!(last, 1.0);
}

#[test]
fn enters_active_inside_and_snaps_on_exit() {
    let mut b = pinned();
    assert_eq!(b.update(&ctx(2000.0, 0.0)), Some(TimelineState::Active));
    assert_eq!(b.progress(), 0.5);
    assert!(b.pin().pinned);
    assert_eq!(b.pin().offset_px, 1000.0);

    // A jump far past the end in one frame still lands on exactly 1.
    assert_eq!(b.update(&ctx(9000.0, 16.0)), Some(TimelineState::Idle));
    assert_eq!(b.progress(), 1.0);
    assert!(!b.pin().pinned);
    assert_eq!(b.pin().spacer_px, 2000.0);

    b.update(&ctx(1500.0, 32.0));
    assert_eq!(b.update(&ctx(0.0, 48.0)), Some(TimelineState::Idle));
    assert_eq!(b.progress(), 0.0);
}

#[test]
fn scrub_lag_trails_raw_progress_then_snaps() {
    let mut b =
        TimelineBinding::scrub(TriggerSpec::parse("top top", "+=100%").unwrap(), 0.6, false)
            .unwrap();
    b.measure(Some(ElementRect::new(0.0, 1000.0)), vp(), 5000.0);
    b.update(&ctx(500.0, 0.0));
    assert_eq!(b.raw_progress(), 0.5);
    assert!(b.progress() > 0.0 && b.progress() < 0.5);

    b.update(&ctx(5000.0, 16.0));
    assert_eq!(b.progress(), 1.0);
    assert_eq!(b.state(), TimelineState::Idle);
}

#[test]
fn once_plays_through_and_never_rearms() {
    let mut b = TimelineBinding::once(TriggerSpec::parse("top 88%", "bottom top").unwrap(), 1.0)
        .unwrap();
    b.measure(Some(ElementRect::new(2000.0, 400.0)), vp(), 9000.0);

    assert_eq!(b.update(&ctx(0.0, 0.0)), None);
    assert_eq!(b.state(), TimelineState::Idle);

    assert_eq!(b.update(&ctx(1200.0, 100.0)), Some(TimelineState::Active));
    assert_eq!(b.triggered_at_ms(), Some(100.0));
    b.update(&ctx(0.0, 600.0));
    assert_eq!(b.progress(), 0.5);
    assert_eq!(b.update(&ctx(0.0, 1100.0)), Some(TimelineState::Complete));

    assert_eq!(b.update(&ctx(1200.0, 5000.0)), None);
    assert_eq!(b.state(), TimelineState::Complete);
    assert_eq!(b.triggered_at_ms(), Some(100.0));
}

#[test]
fn missing_element_stays_idle_at_rest() {
    let mut b = pinned();
    b.measure(None, vp(), 10_000.0);
    assert!(b.is_detached());
    assert_eq!(b.update(&ctx(2000.0, 0.0)), None);
    assert_eq!(b.pin(), PinState::default());
    assert!(b.snapshot().detached);
}

#[test]
fn dispose_is_idempotent_and_releases_pin() {
    let mut b = pinned();
    b.update(&ctx(2000.0, 0.0));
    assert!(b.pin().pinned);
    assert!(b.dispose());
    assert_eq!(b.pin(), PinState::default());
    assert!(!b.dispose());
    assert_eq!(b.state(), TimelineState::Disposed);
    assert_eq!(b.update(&ctx(2500.0, 16.0)), None);
}

#[test]
fn released_pin_never_returns() {
    let mut b = pinned();
    assert!(b.release_pin());
    assert!(!b.release_pin());
    b.update(&ctx(2000.0, 0.0));
    assert_eq!(b.pin(), PinState::default());
    b.measure(Some(ElementRect::new(1000.0, 1000.0)), vp(), 10_000.0);
    assert_eq!(b.pin().spacer_px, 0.0);
}

#[test]
fn rejects_pinned_once_and_bad_lag() {
    let spec = TriggerSpec::parse("top top", "+=100%").unwrap();
    assert!(
        TimelineBinding::new(
            spec,
            BindingOptions {
                mode: BindingMode::Once { play_secs: 1.0 },
                pin: true,
            },
        )
        .is_err()
    );
    assert!(TimelineBinding::scrub(spec, f64::NAN, false).is_err());
}
