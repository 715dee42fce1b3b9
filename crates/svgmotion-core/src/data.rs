//! Canonical layer/keyframe data model.
//!
//! Serde names match the editor shell's JSON shapes (camelCase fields,
//! lowercase kind tags).

use serde::{Deserialize, Serialize};

use crate::properties::AnimationProperties;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Path,
    Circle,
    Rect,
    Group,
}

/// A property snapshot pinned to a time on a layer's timeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub id: String,
    /// Milliseconds from the start of the clip. Non-negative; may exceed the
    /// timeline duration, in which case rendering clamps rather than errors.
    pub time: f64,
    /// Full or partial snapshot; absent keys are not interpolated.
    pub properties: AnimationProperties,
}

/// One animatable unit: a drawable primitive, or a named group of layers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Unique across the whole tree, stable once assigned.
    pub id: String,
    /// Human label; the exported CSS class name derives from it.
    pub name: String,
    pub kind: LayerKind,
    /// Opaque geometry payload copied verbatim from a path element's `d`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_data: Option<String>,
    /// Only groups have children; the structure is a tree, never a graph.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Layer>,
    /// Authoring-time base state.
    pub properties: AnimationProperties,
    /// Ordered ascending by time; coincident times keep insertion order.
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    /// Derived from the active selection; recomputed, never authoritative.
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default)]
    pub is_highlighted: bool,
}

impl Layer {
    /// A bare layer with empty properties and no keyframes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: LayerKind) -> Self {
        Layer {
            id: id.into(),
            name: name.into(),
            kind,
            path_data: None,
            children: Vec::new(),
            properties: AnimationProperties::new(),
            keyframes: Vec::new(),
            is_selected: false,
            is_highlighted: false,
        }
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        self.kind == LayerKind::Group
    }
}
