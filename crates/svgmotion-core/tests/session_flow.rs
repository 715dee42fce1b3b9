use svgmotion_core::{
    AnimationProperties, Config, PropertyValue, SequentialIdSource, Session, ValidationError,
};

const MARKUP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"><path id="p1" d="M0 0h10"/><rect id="r1" width="4" height="4"/></svg>"##;

fn num(n: f64) -> PropertyValue {
    PropertyValue::Number(n)
}

fn session() -> Session {
    Session::with_id_source(Config::default(), Box::new(SequentialIdSource::new()))
}

/// it should load markup into a layer tree and reset back to empty
#[test]
fn load_and_reset() {
    let mut session = session();
    session.load(MARKUP).unwrap();
    assert_eq!(session.tree().layers().len(), 2);
    assert!(session.document().is_some());

    session.reset();
    assert!(session.tree().is_empty());
    assert!(session.document().is_none());
    assert_eq!(session.timeline().current_time, 0.0);
}

/// it should leave the workspace untouched when ingestion fails
#[test]
fn failed_load_changes_nothing() {
    let mut session = session();
    session.load(MARKUP).unwrap();
    session.select(Some("p1"));

    assert!(session.load("<svg><broken").is_err());
    assert_eq!(session.tree().layers().len(), 2);
    assert!(session.selected_layer().is_some());
}

/// it should capture the layer's base snapshot at the current playback
/// position
#[test]
fn capture_keyframe_uses_current_time() {
    let mut session = session();
    session.load(MARKUP).unwrap();
    session.seek(1250.0);
    session.capture_keyframe("p1");

    let layer = session.tree().find("p1").unwrap();
    assert_eq!(layer.keyframes.len(), 1);
    assert_eq!(layer.keyframes[0].time, 1250.0);
    assert_eq!(layer.keyframes[0].properties, layer.properties);

    // unknown ids are tolerated
    session.capture_keyframe("missing");
    assert_eq!(session.tree().find("p1").unwrap().keyframes.len(), 1);
}

/// it should surface grouping validation instead of silently skipping
#[test]
fn group_validation_is_surfaced() {
    let mut session = session();
    session.load(MARKUP).unwrap();
    let err = session
        .group_layers(&["p1".to_string()], "Solo")
        .unwrap_err();
    assert_eq!(err, ValidationError::GroupTooSmall(1));
    assert_eq!(session.tree().layers().len(), 2);

    session
        .group_layers(&["p1".to_string(), "r1".to_string()], "Pair")
        .unwrap();
    assert_eq!(session.tree().layers().len(), 1);
}

/// it should recompute exclusive selection and highlight on the tree
#[test]
fn selection_follows_session_state() {
    let mut session = session();
    session.load(MARKUP).unwrap();
    session.select(Some("p1"));
    session.highlight(Some("r1"));
    assert!(session.tree().find("p1").unwrap().is_selected);
    assert!(!session.tree().find("r1").unwrap().is_selected);
    assert!(session.tree().find("r1").unwrap().is_highlighted);

    session.select(Some("r1"));
    assert!(!session.tree().find("p1").unwrap().is_selected);
    assert!(session.tree().find("r1").unwrap().is_selected);
}

/// it should advance the clock only while playing and wrap at the end
#[test]
fn playback_ticks_and_wraps() {
    let mut session = session();
    session.load(MARKUP).unwrap();
    assert_eq!(session.tick(), 0.0);

    session.toggle_playback();
    let t1 = session.tick();
    let t2 = session.tick();
    assert!(t1 > 0.0 && t2 > t1);

    session.seek(4999.0);
    assert_eq!(session.tick(), 0.0);
}

/// it should sample a layer pose at the current position
#[test]
fn samples_at_current_time() {
    let mut session = session();
    session.load(MARKUP).unwrap();
    let mut zero = AnimationProperties::new();
    zero.set("opacity", 0.0);
    let mut one = AnimationProperties::new();
    one.set("opacity", 1.0);
    session.add_keyframe("p1", 0.0, zero);
    session.add_keyframe("p1", 1000.0, one);

    session.seek(500.0);
    let pose = session.sample("p1").unwrap();
    assert_eq!(pose.get("opacity"), Some(&num(0.5)));
    assert!(session.sample("missing").is_none());
}

/// it should write preview classes and pose attributes onto the live
/// document
#[test]
fn applies_pose_to_document() {
    let mut session = session();
    session.load(MARKUP).unwrap();
    session.select(Some("p1"));
    session.highlight(Some("r1"));

    let mut from = AnimationProperties::new();
    from.set("opacity", 0.0);
    from.set("translateX", 0.0);
    let mut to = AnimationProperties::new();
    to.set("opacity", 1.0);
    to.set("translateX", 10.0);
    session.add_keyframe("p1", 0.0, from);
    session.add_keyframe("p1", 1000.0, to);

    session.seek(500.0);
    session.apply_current_pose();

    let markup = session.document().unwrap().to_markup().unwrap();
    assert!(markup.contains(r#"class="svg-selected""#));
    assert!(markup.contains(r#"class="svg-highlighted""#));
    assert!(markup.contains(r#"opacity="0.5""#));
    assert!(markup.contains(r#"transform="translate(5,0)""#));

    // reapplying after the selection moves does not stack classes
    session.select(Some("r1"));
    session.apply_current_pose();
    let markup = session.document().unwrap().to_markup().unwrap();
    assert!(!markup.contains("svg-selected svg-selected"));
    assert_eq!(markup.matches("svg-highlighted").count(), 1);
}

/// it should export through the session using the extraction-time document
#[test]
fn exports_current_timelines() {
    let mut session = session();
    session.load(MARKUP).unwrap();
    let mut zero = AnimationProperties::new();
    zero.set("opacity", 0.0);
    let mut one = AnimationProperties::new();
    one.set("opacity", 1.0);
    session.add_keyframe("p1", 0.0, zero);
    session.add_keyframe("p1", 5000.0, one);

    let out = session.export().unwrap();
    assert!(out.contains("@keyframes anim-layer-1 {"));
    assert!(out.contains("animation: anim-layer-1 5s linear infinite;"));

    // exporting twice is stable
    assert_eq!(out, session.export().unwrap());
}

/// it should refuse to export before anything is loaded
#[test]
fn export_requires_document() {
    let session = session();
    assert!(session.export().is_err());
}
