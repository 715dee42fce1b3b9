#![cfg(target_arch = "wasm32")]
use serde_json::json;
use serde_wasm_bindgen as swb;
use svgmotion_wasm::SvgMotion;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use svgmotion_core::LayerTree;

const MARKUP: &str =
    r##"<svg xmlns="http://www.w3.org/2000/svg"><path id="p1" d="M0 0h10"/><rect id="r1" width="4" height="4"/></svg>"##;

fn engine() -> SvgMotion {
    SvgMotion::new(JsValue::UNDEFINED).expect("engine should construct with defaults")
}

#[wasm_bindgen_test]
fn loads_markup_into_layers() {
    let mut engine = engine();
    let tree_js = engine.load_svg(MARKUP).expect("load should succeed");
    let tree: LayerTree = swb::from_value(tree_js).expect("tree should deserialize");
    assert_eq!(tree.layers().len(), 2);
    assert_eq!(tree.layers()[0].id, "p1");
}

#[wasm_bindgen_test]
fn rejects_bad_markup() {
    let mut engine = engine();
    assert!(engine.load_svg("<svg><broken").is_err());
}

#[wasm_bindgen_test]
fn keyframes_and_sampling_round_trip() {
    let mut engine = engine();
    engine.load_svg(MARKUP).expect("load should succeed");

    let props = swb::to_value(&json!({ "opacity": 0.0 })).unwrap();
    engine.add_keyframe("p1", 0.0, props).unwrap();
    let props = swb::to_value(&json!({ "opacity": 1.0 })).unwrap();
    engine.add_keyframe("p1", 1000.0, props).unwrap();

    engine.seek(500.0);
    let pose = engine.sample("p1").unwrap();
    let pose: serde_json::Value = swb::from_value(pose).unwrap();
    assert_eq!(pose["opacity"], json!(0.5));

    assert!(engine.sample("missing").unwrap().is_null());
}

#[wasm_bindgen_test]
fn grouping_validation_throws() {
    let mut engine = engine();
    engine.load_svg(MARKUP).expect("load should succeed");
    let one = swb::to_value(&json!(["p1"])).unwrap();
    assert!(engine.group_layers(one, "Solo").is_err());
    let two = swb::to_value(&json!(["p1", "r1"])).unwrap();
    engine.group_layers(two, "Pair").expect("pair should group");
}

#[wasm_bindgen_test]
fn exports_animated_markup() {
    let mut engine = engine();
    engine.load_svg(MARKUP).expect("load should succeed");
    let props = swb::to_value(&json!({ "opacity": 0.0 })).unwrap();
    engine.add_keyframe("p1", 0.0, props).unwrap();
    let props = swb::to_value(&json!({ "opacity": 1.0 })).unwrap();
    engine.add_keyframe("p1", 5000.0, props).unwrap();

    let out = engine.export_svg().expect("export should succeed");
    assert!(out.contains("@keyframes anim-layer-1"));
    assert!(out.contains("<style"));
}
