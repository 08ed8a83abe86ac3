use super::*;

fn vp() -> Viewport {
    Viewport::new(1440.0, 1000.0).unwrap()
}

#[test]
fn parses_edge_pairs() {
    let p: Position = "top 88%".parse().unwrap();
    assert_eq!(p, Position::edges(Edge::Top, Edge::Percent(88.0)));
    let p: Position = "bottom top".parse().unwrap();
    assert_eq!(p, Position::edges(Edge::Bottom, Edge::Top));
    let p: Position = "center 120px".parse().unwrap();
    assert_eq!(p, Position::edges(Edge::Center, Edge::Px(120.0)));
}

#[test]
fn parses_relative_absolute_and_max() {
    assert_eq!(
        "+=200%".parse::<Position>().unwrap(),
        Position::After(Span::Percent(200.0))
    );
    assert_eq!(
        "+=500".parse::<Position>().unwrap(),
        Position::After(Span::Px(500.0))
    );
    assert_eq!("0".parse::<Position>().unwrap(), Position::Absolute(0.0));
    assert_eq!("max".parse::<Position>().unwrap(), Position::Max);
}

#[test]
fn rejects_malformed_positions() {
    assert!("".parse::<Position>().is_err());
    assert!("top top top".parse::<Position>().is_err());
    assert!("middle top".parse::<Position>().is_err());
    assert!("+=lots".parse::<Position>().is_err());
    assert!(TriggerSpec::parse("+=10%", "max").is_err());
}

#[test]
fn display_round_trips_through_parse() {
    for s in ["top 88%", "bottom top", "+=200%", "max", "top 75%"] {
        let p: Position = s.parse().unwrap();
        assert_eq!(p.to_string().parse::<Position>().unwrap(), p);
    }
}

#[test]
fn resolves_pinned_range() {
    let spec = TriggerSpec::parse("top top", "+=200%").unwrap();
    let range = spec.resolve(ElementRect::new(3000.0, 1000.0), vp(), 9000.0);
    assert_eq!(range.start_px, 3000.0);
    assert_eq!(range.end_px, 5000.0);
    assert!(range.contains(4000.0));
    assert!(!range.contains(3000.0));
}

#[test]
fn resolves_parallax_range_across_viewport() {
    let spec = TriggerSpec::parse("top bottom", "bottom top").unwrap();
    let range = spec.resolve(ElementRect::new(2000.0, 800.0), vp(), 9000.0);
    assert_eq!(range.start_px, 1000.0);
    assert_eq!(range.end_px, 2800.0);
}

#[test]
fn inverted_ranges_collapse_to_start() {
    let spec = TriggerSpec::parse("bottom top", "top top").unwrap();
    let range = spec.resolve(ElementRect::new(100.0, 500.0), vp(), 9000.0);
    assert_eq!(range.start_px, 600.0);
    assert_eq!(range.end_px, 600.0);
    assert!(range.is_empty());
}

#[test]
fn whole_page_range_uses_limit() {
    let spec = TriggerSpec::parse("0", "max").unwrap();
    let range = spec.resolve(ElementRect::new(0.0, 0.0), vp(), 7200.0);
    assert_eq!((range.start_px, range.end_px), (0.0, 7200.0));
}

#[test]
fn serde_uses_string_notation() {
    let spec = TriggerSpec::parse("top 88%", "+=80%").unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    assert_eq!(json, r#"{"start":"top 88%","end":"+=80%"}"#);
    let back: TriggerSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
}

#[test]
fn relative_len_is_known_before_layout() {
    let spec = TriggerSpec::parse("top top", "+=200%").unwrap();
    assert_eq!(spec.relative_len(vp()), Some(2000.0));
    let spec = TriggerSpec::parse("top top", "bottom top").unwrap();
    assert_eq!(spec.relative_len(vp()), None);
}
