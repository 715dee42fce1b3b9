//! Attribute-based preview rendering.
//!
//! The live canvas shows poses by writing resolved attributes straight onto
//! the rendered elements, a separate path from the class-based compiled
//! export. The two must agree numerically for the same query time; both go
//! through [`crate::sample::resolve`] and the same transform composition.

use xmltree::Element;

use crate::data::Layer;
use crate::document::{add_class_token, remove_class_token, SvgDocument};
use crate::properties::{compose_transform, kebab_case, AnimationProperties, PropertyValue, TRANSFORM_KEYS};
use crate::sample::resolve;
use crate::tree::LayerTree;

/// Class applied to the hovered layer's element.
pub const HIGHLIGHT_CLASS: &str = "svg-highlighted";
/// Class applied to the selected layer's element.
pub const SELECT_CLASS: &str = "svg-selected";

/// Reset-and-reapply hook for the rendering collaborator: clears and
/// reassigns the highlight/selection classes on every drawable, and writes
/// the keyframe-derived pose for `time` as attributes where one exists.
pub fn apply_pose(document: &mut SvgDocument, tree: &LayerTree, time: f64) {
    apply_layers(document, tree.layers(), time);
}

fn apply_layers(document: &mut SvgDocument, layers: &[Layer], time: f64) {
    for layer in layers {
        if layer.is_group() {
            apply_layers(document, &layer.children, time);
            continue;
        }
        let Some(el) = document.element_by_id_mut(&layer.id) else {
            continue;
        };
        remove_class_token(el, HIGHLIGHT_CLASS);
        remove_class_token(el, SELECT_CLASS);
        if layer.is_highlighted {
            add_class_token(el, HIGHLIGHT_CLASS);
        }
        if layer.is_selected {
            add_class_token(el, SELECT_CLASS);
        }
        if layer.keyframes.is_empty() {
            continue;
        }
        let pose = resolve(&layer.keyframes, &layer.properties, time);
        write_pose(el, &pose);
    }
}

fn write_pose(el: &mut Element, pose: &AnimationProperties) {
    for (key, value) in pose.iter() {
        if TRANSFORM_KEYS.contains(&key) {
            continue;
        }
        el.attributes.insert(kebab_case(key), attribute_value(value));
    }
    // unitless attribute syntax; same numbers as the compiled CSS transform
    if let Some(transform) = compose_transform(pose, false) {
        el.attributes.insert("transform".to_string(), transform);
    }
}

fn attribute_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Number(n) => format!("{n}"),
        PropertyValue::Text(s) => s.clone(),
    }
}
