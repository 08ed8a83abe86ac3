use super::*;

fn vp() -> Viewport {
    Viewport::new(1440.0, 1000.0).unwrap()
}

#[test]
fn visible_fraction_clips_to_viewport() {
    let r = ElementRect::new(900.0, 400.0);
    assert_eq!(visible_fraction(r, 0.0, vp()), 0.25);
    assert_eq!(visible_fraction(r, 900.0, vp()), 1.0);
    assert_eq!(visible_fraction(r, 1300.0, vp()), 0.0);
    assert_eq!(visible_fraction(ElementRect::new(0.0, 0.0), 0.0, vp()), 0.0);
}

#[test]
fn plays_on_entry_and_pauses_on_exit() {
    let mut m = MediaAutoplay::default();
    assert_eq!(m.observe(0.05), None);
    assert_eq!(m.observe(0.1), Some(MediaCommand::Play));
    assert_eq!(m.observe(0.8), None);
    assert_eq!(m.observe(0.0), Some(MediaCommand::Pause));
    assert_eq!(m.state(), PlaybackState::Paused);
}

#[test]
fn rejected_play_is_recorded_and_retried_on_next_entry() {
    let mut m = MediaAutoplay::default();
    m.observe(1.0);
    m.play_rejected();
    assert_eq!(m.state(), PlaybackState::Blocked);
    assert_eq!(m.observe(1.0), None);
    assert_eq!(m.observe(0.0), None);
    assert_eq!(m.observe(0.5), Some(MediaCommand::Play));
    assert_eq!(m.rejections(), 1);
}
