use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn opacities(p: f64, t: &SegmentTable) -> Vec<f64> {
    compute_visual_state(p, t).iter().map(|s| s.opacity).collect()
}

#[test]
fn process_four_steps_partition() {
    let t = SegmentTable::partition(4, SegmentConfig::process()).unwrap();
    assert_eq!(t.segments().len(), 3);
    assert!(approx(t.usable(), 0.85));
    assert!(approx(t.segment_width(), 0.85 / 3.0));
    assert_eq!(t.segments()[0].range_start, 0.0);
    assert_eq!(t.segments()[2].range_end, t.usable());
}

#[test]
fn segments_are_contiguous() {
    for n in 2..9 {
        for cfg in [SegmentConfig::process(), SegmentConfig::work()] {
            let t = SegmentTable::partition(n, cfg).unwrap();
            let segs = t.segments();
            assert_eq!(segs.len(), n - 1);
            for pair in segs.windows(2) {
                assert_eq!(pair[0].range_end, pair[1].range_start);
            }
            assert_eq!(segs[0].range_start, 0.0);
            assert_eq!(segs[n - 2].range_end, t.usable());
        }
    }
}

#[test]
fn process_scenario_at_key_positions() {
    let t = SegmentTable::partition(4, SegmentConfig::process()).unwrap();

    assert_eq!(opacities(0.0, &t), vec![1.0, 0.0, 0.0, 0.0]);

    // Step 0 has finished leaving before step 1 starts arriving.
    let at = opacities(0.09, &t);
    assert_eq!(at[0], 0.0);
    assert_eq!(at[1], 0.0);

    let at = opacities(0.10, &t);
    assert_eq!(at[0], 0.0);
    assert!(at[1] > 0.0 && at[1] < 0.01);

    let at = opacities(0.20, &t);
    assert_eq!(at[0], 0.0);
    assert_eq!(at[1], 1.0);

    let at = opacities(0.30, &t);
    assert!(at[1] > 0.0 && at[1] < 1.0);
    assert_eq!(at[2], 0.0);

    let end = compute_visual_state(t.usable(), &t);
    assert_eq!(end[3], StepVisualState::resting(3));
    assert_eq!(opacities(t.usable(), &t)[..3], [0.0, 0.0, 0.0]);
}

#[test]
fn waiting_and_exited_offsets_follow_motion() {
    let t = SegmentTable::partition(4, SegmentConfig::process()).unwrap();
    let s = compute_visual_state(0.0, &t);
    assert_eq!(s[2].translate_y, 36.0);
    let s = compute_visual_state(0.2, &t);
    assert_eq!(s[0].translate_y, -36.0);
}

#[test]
fn work_slides_shrink_and_slide_up() {
    let t = SegmentTable::partition(3, SegmentConfig::work()).unwrap();
    // Timeline position 0.2 is reached at scroll progress 0.2 / 0.825.
    let s = compute_visual_state(0.2 / t.timeline_end(), &t);
    assert!(approx(s[0].opacity, 0.2));
    assert!(approx(s[0].scale, 0.944));
    assert!(approx(s[1].opacity, 0.5));
    assert!(approx(s[1].translate_y, 4.0));
    assert_eq!(s[2].opacity, 0.0);

    let v = s[1].to_visual(TranslateUnit::Percent, 500.0);
    assert!(approx(v.translate.y, 20.0));
}

#[test]
fn work_timeline_ends_with_last_arrival() {
    let t = SegmentTable::partition(3, SegmentConfig::work()).unwrap();
    assert!(approx(t.timeline_end(), 0.825));

    let s = compute_visual_state(0.7, &t);
    assert!((s[1].opacity - 0.69).abs() < 1e-6);
    assert!((s[2].opacity - 0.01).abs() < 1e-6);

    let s = compute_visual_state(0.9, &t);
    assert!((s[1].opacity - 0.03).abs() < 1e-6);
    assert!((s[2].opacity - 0.67).abs() < 1e-6);

    // The last project is still arriving until the pin's very end.
    assert!(compute_visual_state(0.99, &t)[2].opacity < 1.0);
    assert_eq!(compute_visual_state(1.0, &t)[2], StepVisualState::resting(2));
}

#[test]
fn reserved_timelines_end_at_one() {
    let t = SegmentTable::partition(4, SegmentConfig::process()).unwrap();
    assert_eq!(t.timeline_end(), 1.0);
    let mut cfg = SegmentConfig::work();
    cfg.trailing_reserve = 0.1;
    assert_eq!(SegmentTable::partition(3, cfg).unwrap().timeline_end(), 1.0);
    assert_eq!(
        SegmentTable::partition(1, SegmentConfig::work()).unwrap().timeline_end(),
        1.0
    );
}

#[test]
fn at_most_two_adjacent_steps_visible() {
    for n in 2..8 {
        for cfg in [SegmentConfig::process(), SegmentConfig::work()] {
            let t = SegmentTable::partition(n, cfg).unwrap();
            for k in 0..=1000 {
                let p = k as f64 / 1000.0;
                let visible: Vec<usize> = compute_visual_state(p, &t)
                    .iter()
                    .filter(|s| s.opacity > 0.0)
                    .map(|s| s.index)
                    .collect();
                assert!(visible.len() <= 2, "n={n} p={p} visible={visible:?}");
                if let [a, b] = visible[..] {
                    assert_eq!(b, a + 1);
                }
            }
        }
    }
}

#[test]
fn exactly_one_step_fully_visible_between_windows() {
    let t = SegmentTable::partition(4, SegmentConfig::process()).unwrap();
    // Gaps between the incoming end of one segment and the next segment start.
    for p in [0.0, 0.25, 0.5, 0.8, 1.0] {
        let full = opacities(p, &t).iter().filter(|&&o| o == 1.0).count();
        assert_eq!(full, 1, "p={p}");
    }
}

#[test]
fn every_step_reaches_full_visibility() {
    let t = SegmentTable::partition(5, SegmentConfig::process()).unwrap();
    for seg in t.segments() {
        let s = compute_visual_state(seg.range_start, &t);
        assert_eq!(s[seg.index].opacity, 1.0);
    }
    assert_eq!(compute_visual_state(1.0, &t)[4].opacity, 1.0);
}

#[test]
fn single_step_is_always_visible() {
    let t = SegmentTable::partition(1, SegmentConfig::process()).unwrap();
    assert!(t.segments().is_empty());
    for p in [0.0, 0.5, 0.9, 1.0] {
        assert_eq!(compute_visual_state(p, &t), vec![StepVisualState::resting(0)]);
        assert_eq!(t.section_opacity(p), 1.0);
    }
    assert_eq!(t.indicator(0.3).label, "01");
}

#[test]
fn zero_steps_is_rejected() {
    assert!(SegmentTable::partition(0, SegmentConfig::process()).is_err());
}

#[test]
fn invalid_windows_are_rejected() {
    let mut cfg = SegmentConfig::process();
    cfg.trailing_reserve = 1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SegmentConfig::process();
    cfg.incoming_start = 0.8;
    assert!(SegmentTable::partition(3, cfg).is_err());

    let mut cfg = SegmentConfig::work();
    cfg.outgoing_len = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = SegmentConfig::process();
    cfg.mark_len = 0.7;
    assert!(cfg.validate().is_err());
}

#[test]
fn section_fades_over_trailing_reserve() {
    let t = SegmentTable::partition(4, SegmentConfig::process()).unwrap();
    assert_eq!(t.section_opacity(0.5), 1.0);
    assert!(approx(t.section_opacity(0.925), 0.5));
    assert_eq!(t.section_opacity(1.0), 0.0);

    let w = SegmentTable::partition(3, SegmentConfig::work()).unwrap();
    assert_eq!(w.section_opacity(1.0), 1.0);
}

#[test]
fn numbered_indicator_tracks_steps() {
    let t = SegmentTable::partition(4, SegmentConfig::process()).unwrap();
    let i = t.indicator(0.0);
    assert_eq!(i.active, 0);
    assert_eq!(i.label, "01");
    assert_eq!(i.fill, 0.0);
    let marks: Vec<f64> = i.marks.iter().map(|m| m.opacity).collect();
    assert_eq!(marks, vec![1.0, 0.3, 0.3, 0.3]);

    let i = t.indicator(0.3);
    assert_eq!(i.active, 1);
    assert_eq!(i.label, "02");
    assert!(approx(i.fill, 0.3 / t.usable()));

    let i = t.indicator(1.0);
    assert_eq!(i.active, 3);
    assert_eq!(i.fill, 1.0);
    assert_eq!(i.marks[3].opacity, 1.0);
}

#[test]
fn dot_indicator_picks_nearest_step() {
    let t = SegmentTable::partition(3, SegmentConfig::work()).unwrap();
    assert_eq!(t.indicator(0.24).active, 0);
    let i = t.indicator(0.5);
    assert_eq!(i.active, 1);
    assert_eq!(i.label, "02");
    assert_eq!(i.marks[1], MarkState { opacity: 1.0, scale: 1.0 });
    assert_eq!(i.marks[0], MarkState { opacity: 0.3, scale: 0.8 });
    assert_eq!(t.indicator(1.0).active, 2);
}

#[test]
fn resting_states_cover_every_step() {
    let t = SegmentTable::partition(4, SegmentConfig::process()).unwrap();
    let r = t.resting_states();
    assert_eq!(r.len(), 4);
    assert!(r.iter().all(StepVisualState::is_resting));
}

#[test]
fn incoming_marker_brightens_over_its_own_window() {
    let t = SegmentTable::partition(4, SegmentConfig::process()).unwrap();
    let w = t.segment_width();
    // Marker 1 is fully bright once 30% of the segment has passed after 0.35.
    let i = t.indicator(0.65 * w);
    assert!(approx(i.marks[1].opacity, 1.0));
    // The step itself is still arriving at that point.
    let s = compute_visual_state(0.65 * w, &t);
    assert!(s[1].opacity < 1.0);

    let i = t.indicator(0.5 * w);
    assert!(approx(i.marks[1].opacity, 0.3 + 0.7 * 0.5));
}

#[test]
fn mark_window_defaults_when_omitted() {
    let json = r#"{
        "trailing_reserve": 0.0,
        "outgoing_len": 0.5,
        "incoming_start": 0.15,
        "incoming_len": 0.5,
        "motion": { "unit": "percent", "enter_y": 8.0, "exit_y": 0.0, "exit_scale": 0.93 },
        "indicator": "dots"
    }"#;
    let cfg: SegmentConfig = serde_json::from_str(json).unwrap();
    assert_eq!(cfg, SegmentConfig::work());
}
