//! Animation compiler: bake every layer timeline into a stylesheet embedded
//! in the source document.
//!
//! Output is deterministic for a given tree and duration: class names derive
//! from layer names, keyframe percentages are fixed to one decimal place,
//! and the transform-composing properties collapse into a single `transform`
//! declaration per keyframe. Recompiling is idempotent: class tokens are
//! appended at most once and the style container is reused, not duplicated.

use std::cmp::Ordering;

use log::{debug, warn};

use crate::data::{Keyframe, Layer};
use crate::document::{add_class_token, SvgDocument};
use crate::error::ParseError;
use crate::properties::{compose_transform, css_value, kebab_case, TRANSFORM_KEYS};
use crate::tree::LayerTree;

/// Derive the CSS class token for a layer name: lowercase, every run of
/// non-`[a-z0-9]` collapsed to a single `-`, leading/trailing `-` trimmed.
pub fn class_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Compile raw markup plus a layer tree into an exportable markup string.
pub fn compile(markup: &str, tree: &LayerTree, duration_ms: f64) -> Result<String, ParseError> {
    let mut document = SvgDocument::parse(markup)?;
    compile_document(&mut document, tree, duration_ms)
}

/// Compile against an already-parsed document (the one extraction mutated,
/// so generated ids resolve). The document keeps the applied classes and
/// style container afterwards.
pub fn compile_document(
    document: &mut SvgDocument,
    tree: &LayerTree,
    duration_ms: f64,
) -> Result<String, ParseError> {
    let mut css = String::new();
    emit_layers(document, tree.layers(), duration_ms, &mut css);
    document.set_style_content(&css);
    debug!("compiled stylesheet of {} bytes", css.len());
    document.to_markup()
}

fn emit_layers(document: &mut SvgDocument, layers: &[Layer], duration_ms: f64, css: &mut String) {
    for layer in layers {
        if layer.is_group() {
            materialize_group(document, layer);
        }
        if !layer.keyframes.is_empty() {
            let class = class_name(&layer.name);
            if class.is_empty() {
                warn!("layer {} has no usable class name ({:?}), skipping", layer.id, layer.name);
            } else {
                match document.element_by_id_mut(&layer.id) {
                    Some(el) => add_class_token(el, &class),
                    None => warn!("layer {} has no element in the document", layer.id),
                }
                emit_keyframes_block(layer, &class, duration_ms, css);
                emit_binding_rule(layer, &class, duration_ms, css);
            }
        }
        // groups first, then their members, so nested animated layers are
        // emitted too
        emit_layers(document, &layer.children, duration_ms, css);
    }
}

/// Groups exist only in the layer model until export; give each one a `<g>`
/// carrying its id and move the member elements inside.
fn materialize_group(document: &mut SvgDocument, layer: &Layer) {
    document.ensure_group_element(&layer.id);
    // nested groups need their own element before the parent can adopt it
    for child in &layer.children {
        if child.is_group() {
            materialize_group(document, child);
        }
    }
    for child in &layer.children {
        document.adopt_element(&layer.id, &child.id);
    }
}

fn emit_keyframes_block(layer: &Layer, class: &str, duration_ms: f64, css: &mut String) {
    let mut sorted: Vec<&Keyframe> = layer.keyframes.iter().collect();
    sorted.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));

    css.push_str(&format!("\n@keyframes anim-{class} {{\n"));
    for keyframe in sorted {
        let percentage = if duration_ms > 0.0 {
            (keyframe.time / duration_ms) * 100.0
        } else {
            0.0
        };
        css.push_str(&format!("  {percentage:.1}% {{\n"));
        for (key, value) in keyframe.properties.iter() {
            if TRANSFORM_KEYS.contains(&key) {
                continue;
            }
            css.push_str(&format!("    {}: {};\n", kebab_case(key), css_value(key, value)));
        }
        if let Some(transform) = compose_transform(&keyframe.properties, true) {
            css.push_str(&format!("    transform: {transform};\n"));
        }
        css.push_str("  }\n");
    }
    css.push_str("}\n");
}

fn emit_binding_rule(layer: &Layer, class: &str, duration_ms: f64, css: &mut String) {
    let seconds = duration_ms / 1000.0;
    css.push_str(&format!(".{class} {{\n"));
    css.push_str(&format!("  animation: anim-{class} {seconds}s linear infinite;\n"));
    // rotation must pivot around the shape's own box, not the document origin
    if layer
        .keyframes
        .iter()
        .any(|kf| kf.properties.get("rotate").is_some())
    {
        css.push_str("  transform-origin: center;\n");
        css.push_str("  transform-box: fill-box;\n");
    }
    css.push_str("}\n");
}
