use svgmotion_core::{
    compile_document, extract, AnimationProperties, LayerKind, PropertyValue, SequentialIdSource,
};

fn num(n: f64) -> PropertyValue {
    PropertyValue::Number(n)
}

fn text(s: &str) -> PropertyValue {
    PropertyValue::Text(s.to_string())
}

/// it should extract drawables in document order, including ones nested in
/// groups, as a flat list
#[test]
fn extracts_in_document_order() {
    let markup = r##"<svg xmlns="http://www.w3.org/2000/svg">
  <path id="wing" d="M0 0 L10 10"/>
  <g><circle id="eye" r="3"/><ellipse id="body" rx="4" ry="2"/></g>
  <rect id="base" width="8" height="8"/>
  <text id="label">hi</text>
</svg>"##;
    let mut ids = SequentialIdSource::new();
    let (_, layers) = extract(markup, &mut ids).unwrap();

    let got: Vec<(&str, LayerKind)> = layers
        .iter()
        .map(|l| (l.id.as_str(), l.kind))
        .collect();
    assert_eq!(
        got,
        vec![
            ("wing", LayerKind::Path),
            ("eye", LayerKind::Circle),
            ("body", LayerKind::Path),
            ("base", LayerKind::Rect),
        ]
    );
    assert_eq!(layers[0].name, "Layer 1");
    assert_eq!(layers[3].name, "Layer 4");
    assert_eq!(layers[0].path_data.as_deref(), Some("M0 0 L10 10"));
    assert_eq!(layers[1].path_data, None);
    assert!(layers.iter().all(|l| l.keyframes.is_empty()));
    assert!(layers.iter().all(|l| !l.is_selected && !l.is_highlighted));
}

/// it should seed properties from presentation attributes with the fixed
/// fallbacks
#[test]
fn seeds_properties_with_fallbacks() {
    let markup = r##"<svg xmlns="http://www.w3.org/2000/svg"><circle id="c" r="5" fill="#ff0000" stroke-width="2.5"/><rect id="r" width="1" height="1" opacity="0.25" stroke="#00ff00"/></svg>"##;
    let mut ids = SequentialIdSource::new();
    let (_, layers) = extract(markup, &mut ids).unwrap();

    let circle = &layers[0].properties;
    assert_eq!(circle.get("fill"), Some(&text("#ff0000")));
    assert_eq!(circle.get("stroke"), Some(&text("#000000")));
    assert_eq!(circle.get("strokeWidth"), Some(&num(2.5)));
    assert_eq!(circle.get("opacity"), Some(&num(1.0)));

    let rect = &layers[1].properties;
    assert_eq!(rect.get("fill"), Some(&text("none")));
    assert_eq!(rect.get("stroke"), Some(&text("#00ff00")));
    assert_eq!(rect.get("strokeWidth"), Some(&num(1.0)));
    assert_eq!(rect.get("opacity"), Some(&num(0.25)));
}

/// it should fall back to the default when a numeric attribute does not
/// parse
#[test]
fn tolerates_unparsable_numeric_attributes() {
    let markup = r##"<svg xmlns="http://www.w3.org/2000/svg"><rect id="r" width="1" height="1" stroke-width="thick"/></svg>"##;
    let mut ids = SequentialIdSource::new();
    let (_, layers) = extract(markup, &mut ids).unwrap();
    assert_eq!(layers[0].properties.get("strokeWidth"), Some(&num(1.0)));
}

/// it should assign generated ids in place so a later export can re-locate
/// the same elements
#[test]
fn generated_ids_are_visible_to_export() {
    let markup = r##"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0h5"/><circle id="c1" r="1"/></svg>"##;
    let mut ids = SequentialIdSource::new();
    let (mut document, layers) = extract(markup, &mut ids).unwrap();

    // first drawable had no id: prefix carries its index
    assert_eq!(layers[0].id, "path-0-0");
    assert_eq!(layers[1].id, "c1");
    let roundtrip = document.to_markup().unwrap();
    assert!(roundtrip.contains(r#"id="path-0-0""#));

    // keyframe the generated-id layer and compile against the same document
    let tree = svgmotion_core::LayerTree::new(layers);
    let tree = tree.add_keyframe(
        "path-0-0",
        0.0,
        AnimationProperties::new(),
        &mut ids,
    );
    let tree = tree.add_keyframe("path-0-0", 1000.0, AnimationProperties::new(), &mut ids);
    let out = compile_document(&mut document, &tree, 1000.0).unwrap();
    assert!(out.contains(r#"id="path-0-0" class="layer-1""#));
}

/// it should keep authored ids untouched
#[test]
fn keeps_existing_ids() {
    let markup = r##"<svg xmlns="http://www.w3.org/2000/svg"><rect id="keep-me" width="1" height="1"/></svg>"##;
    let mut ids = SequentialIdSource::new();
    let (document, layers) = extract(markup, &mut ids).unwrap();
    assert_eq!(layers[0].id, "keep-me");
    assert!(document.to_markup().unwrap().contains(r#"id="keep-me""#));
}

/// it should fail on malformed markup without producing a partial tree
#[test]
fn rejects_malformed_markup() {
    let mut ids = SequentialIdSource::new();
    assert!(extract("<svg><path</svg>", &mut ids).is_err());
    assert!(extract("not markup at all", &mut ids).is_err());
    assert!(extract("", &mut ids).is_err());
}
