//! The editable layer tree and its operations.
//!
//! The tree is an explicit value: every operation takes the current tree and
//! returns the next one, leaving the input untouched. A reader holding an
//! older tree keeps observing a consistent snapshot, never a half-applied
//! change.

use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::{Keyframe, Layer, LayerKind};
use crate::error::ValidationError;
use crate::ids::IdSource;
use crate::properties::AnimationProperties;

/// Partial layer update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Option<AnimationProperties>,
    #[serde(default)]
    pub path_data: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct LayerTree {
    layers: Vec<Layer>,
}

impl LayerTree {
    pub fn new(layers: Vec<Layer>) -> Self {
        LayerTree { layers }
    }

    /// Top-level layers in order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Find a layer at any depth.
    pub fn find(&self, layer_id: &str) -> Option<&Layer> {
        find_layer(&self.layers, layer_id)
    }

    /// Ids of every non-group layer, depth-first. Group/ungroup must leave
    /// this multiset unchanged.
    pub fn leaf_ids(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_leaf_ids(&self.layers, &mut out);
        out
    }

    /// Merge a partial update into the matching layer at any depth. No-op on
    /// unknown ids.
    pub fn update(&self, layer_id: &str, patch: &LayerPatch) -> LayerTree {
        let mut next = self.clone();
        match find_layer_mut(&mut next.layers, layer_id) {
            Some(layer) => {
                if let Some(name) = &patch.name {
                    layer.name = name.clone();
                }
                if let Some(properties) = &patch.properties {
                    layer.properties = properties.clone();
                }
                if let Some(path_data) = &patch.path_data {
                    layer.path_data = Some(path_data.clone());
                }
            }
            None => debug!("update: no layer {layer_id}, ignoring"),
        }
        next
    }

    pub fn rename(&self, layer_id: &str, new_name: &str) -> LayerTree {
        self.update(
            layer_id,
            &LayerPatch {
                name: Some(new_name.to_string()),
                ..LayerPatch::default()
            },
        )
    }

    /// Append a keyframe to the target layer, keeping the sequence sorted
    /// ascending by time (stable, so coincident times keep insertion order).
    pub fn add_keyframe(
        &self,
        layer_id: &str,
        time: f64,
        properties: AnimationProperties,
        ids: &mut dyn IdSource,
    ) -> LayerTree {
        let mut next = self.clone();
        match find_layer_mut(&mut next.layers, layer_id) {
            Some(layer) => {
                layer.keyframes.push(Keyframe {
                    id: ids.next_id("kf"),
                    time,
                    properties,
                });
                sort_keyframes(&mut layer.keyframes);
            }
            None => debug!("add_keyframe: no layer {layer_id}, ignoring"),
        }
        next
    }

    /// Remove a keyframe by id. No-op when either id is unknown.
    pub fn remove_keyframe(&self, layer_id: &str, keyframe_id: &str) -> LayerTree {
        let mut next = self.clone();
        match find_layer_mut(&mut next.layers, layer_id) {
            Some(layer) => layer.keyframes.retain(|kf| kf.id != keyframe_id),
            None => debug!("remove_keyframe: no layer {layer_id}, ignoring"),
        }
        next
    }

    /// Wrap the named top-level layers into a new group appended at the top
    /// level, preserving their relative order. Layers nested inside existing
    /// groups are not eligible. Requires at least two requested ids; ids
    /// that match nothing are tolerated as stale.
    pub fn group(
        &self,
        layer_ids: &[String],
        group_name: &str,
        ids: &mut dyn IdSource,
    ) -> Result<LayerTree, ValidationError> {
        if layer_ids.len() < 2 {
            return Err(ValidationError::GroupTooSmall(layer_ids.len()));
        }
        let mut grouped: Vec<Layer> = Vec::new();
        let mut remaining: Vec<Layer> = Vec::new();
        for layer in self.layers.iter().cloned() {
            if layer_ids.iter().any(|id| *id == layer.id) {
                grouped.push(layer);
            } else {
                remaining.push(layer);
            }
        }
        let mut group = Layer::new(ids.next_id("group"), group_name, LayerKind::Group);
        group.children = grouped;
        remaining.push(group);
        Ok(LayerTree { layers: remaining })
    }

    /// Replace a group with its children, spliced into the group's position
    /// in order. No-op when the id is absent or not a group.
    pub fn ungroup(&self, group_id: &str) -> LayerTree {
        let mut next = self.clone();
        if !ungroup_in(&mut next.layers, group_id) {
            debug!("ungroup: no group {group_id}, ignoring");
        }
        next
    }

    /// Recompute selection flags tree-wide: exactly the matching layer (if
    /// any) is selected; selecting a group does not select its children.
    pub fn with_selection(&self, selected: Option<&str>) -> LayerTree {
        let mut next = self.clone();
        for_each_layer_mut(&mut next.layers, &mut |layer| {
            layer.is_selected = selected == Some(layer.id.as_str());
        });
        next
    }

    /// Highlight follows the same exclusivity rule, independently of
    /// selection.
    pub fn with_highlight(&self, highlighted: Option<&str>) -> LayerTree {
        let mut next = self.clone();
        for_each_layer_mut(&mut next.layers, &mut |layer| {
            layer.is_highlighted = highlighted == Some(layer.id.as_str());
        });
        next
    }
}

pub(crate) fn sort_keyframes(keyframes: &mut [Keyframe]) {
    keyframes.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));
}

fn for_each_layer_mut(layers: &mut [Layer], f: &mut dyn FnMut(&mut Layer)) {
    for layer in layers {
        f(layer);
        for_each_layer_mut(&mut layer.children, f);
    }
}

fn find_layer<'a>(layers: &'a [Layer], id: &str) -> Option<&'a Layer> {
    for layer in layers {
        if layer.id == id {
            return Some(layer);
        }
        if let Some(found) = find_layer(&layer.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_layer_mut<'a>(layers: &'a mut [Layer], id: &str) -> Option<&'a mut Layer> {
    for layer in layers {
        if layer.id == id {
            return Some(layer);
        }
        if let Some(found) = find_layer_mut(&mut layer.children, id) {
            return Some(found);
        }
    }
    None
}

fn collect_leaf_ids(layers: &[Layer], out: &mut Vec<String>) {
    for layer in layers {
        if layer.is_group() {
            collect_leaf_ids(&layer.children, out);
        } else {
            out.push(layer.id.clone());
        }
    }
}

fn ungroup_in(layers: &mut Vec<Layer>, group_id: &str) -> bool {
    if let Some(pos) = layers
        .iter()
        .position(|l| l.id == group_id && l.is_group())
    {
        let group = layers.remove(pos);
        for (offset, child) in group.children.into_iter().enumerate() {
            layers.insert(pos + offset, child);
        }
        return true;
    }
    for layer in layers.iter_mut() {
        if layer.is_group() && ungroup_in(&mut layer.children, group_id) {
            return true;
        }
    }
    false
}
