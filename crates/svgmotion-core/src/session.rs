//! Editing session: data ownership and the public API the editor shell
//! drives.
//!
//! The session owns the parsed document, the current layer tree value, the
//! shared timeline, and the id source. Every mutation swaps in a whole new
//! tree value from the pure operations in [`crate::tree`]; nothing is edited
//! in place, so a reader holding the previous tree never observes a
//! half-applied change.

use log::debug;

use crate::compile::compile_document;
use crate::config::Config;
use crate::data::Layer;
use crate::document::SvgDocument;
use crate::error::{ParseError, ValidationError};
use crate::extract::extract;
use crate::ids::{ClockIdSource, IdSource};
use crate::preview::apply_pose;
use crate::properties::AnimationProperties;
use crate::sample::sample_layer;
use crate::timeline::Timeline;
use crate::tree::{LayerPatch, LayerTree};

pub struct Session {
    config: Config,
    ids: Box<dyn IdSource>,
    document: Option<SvgDocument>,
    tree: LayerTree,
    timeline: Timeline,
    selected: Option<String>,
    highlighted: Option<String>,
}

impl Session {
    /// A session using the wall-clock id source.
    pub fn new(config: Config) -> Self {
        Session::with_id_source(config, Box::new(ClockIdSource))
    }

    /// A session with an injected id source (deterministic tests, wasm
    /// hosts).
    pub fn with_id_source(config: Config, ids: Box<dyn IdSource>) -> Self {
        Session {
            timeline: Timeline::new(config.default_duration_ms),
            config,
            ids,
            document: None,
            tree: LayerTree::default(),
            selected: None,
            highlighted: None,
        }
    }

    /// Ingest a markup string, replacing the workspace on success. On
    /// failure no state changes.
    pub fn load(&mut self, markup: &str) -> Result<(), ParseError> {
        let (document, layers) = extract(markup, self.ids.as_mut())?;
        self.document = Some(document);
        self.tree = LayerTree::new(layers);
        self.timeline = Timeline::new(self.config.default_duration_ms);
        self.selected = None;
        self.highlighted = None;
        Ok(())
    }

    /// Drop everything back to the empty workspace.
    pub fn reset(&mut self) {
        self.document = None;
        self.tree = LayerTree::default();
        self.timeline = Timeline::new(self.config.default_duration_ms);
        self.selected = None;
        self.highlighted = None;
    }

    pub fn tree(&self) -> &LayerTree {
        &self.tree
    }

    pub fn document(&self) -> Option<&SvgDocument> {
        self.document.as_ref()
    }

    pub fn timeline(&self) -> Timeline {
        self.timeline
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected.as_deref().and_then(|id| self.tree.find(id))
    }

    /// Change the active selection; selection flags are recomputed
    /// tree-wide.
    pub fn select(&mut self, layer_id: Option<&str>) {
        self.selected = layer_id.map(str::to_string);
        self.tree = self.tree.with_selection(layer_id);
    }

    /// Change the hovered layer; same exclusivity as selection,
    /// independently tracked.
    pub fn highlight(&mut self, layer_id: Option<&str>) {
        self.highlighted = layer_id.map(str::to_string);
        self.tree = self.tree.with_highlight(layer_id);
    }

    pub fn update_layer(&mut self, layer_id: &str, patch: &LayerPatch) {
        self.tree = self.tree.update(layer_id, patch);
    }

    pub fn rename_layer(&mut self, layer_id: &str, new_name: &str) {
        self.tree = self.tree.rename(layer_id, new_name);
    }

    pub fn add_keyframe(&mut self, layer_id: &str, time: f64, properties: AnimationProperties) {
        self.tree = self
            .tree
            .add_keyframe(layer_id, time, properties, self.ids.as_mut());
    }

    /// Capture the layer's current base snapshot at the current playback
    /// position. No-op on unknown ids.
    pub fn capture_keyframe(&mut self, layer_id: &str) {
        let Some(properties) = self.tree.find(layer_id).map(|l| l.properties.clone()) else {
            debug!("capture_keyframe: no layer {layer_id}, ignoring");
            return;
        };
        self.add_keyframe(layer_id, self.timeline.current_time, properties);
    }

    pub fn remove_keyframe(&mut self, layer_id: &str, keyframe_id: &str) {
        self.tree = self.tree.remove_keyframe(layer_id, keyframe_id);
    }

    pub fn group_layers(
        &mut self,
        layer_ids: &[String],
        group_name: &str,
    ) -> Result<(), ValidationError> {
        self.tree = self.tree.group(layer_ids, group_name, self.ids.as_mut())?;
        Ok(())
    }

    pub fn ungroup_layers(&mut self, group_id: &str) {
        self.tree = self.tree.ungroup(group_id);
    }

    pub fn toggle_playback(&mut self) {
        self.timeline.toggle();
    }

    /// Advance one frame, returning the new playback position.
    pub fn tick(&mut self) -> f64 {
        self.timeline.tick_by(self.config.frame_step_ms);
        self.timeline.current_time
    }

    pub fn seek(&mut self, time: f64) {
        self.timeline.seek(time);
    }

    pub fn set_duration(&mut self, duration: f64) -> Result<(), ValidationError> {
        self.timeline.set_duration(duration)
    }

    /// Resolved snapshot of a layer at the current playback position.
    pub fn sample(&self, layer_id: &str) -> Option<AnimationProperties> {
        self.sample_at(layer_id, self.timeline.current_time)
    }

    pub fn sample_at(&self, layer_id: &str, time: f64) -> Option<AnimationProperties> {
        self.tree.find(layer_id).map(|l| sample_layer(l, time))
    }

    /// Re-render selection classes and keyframe poses onto the live
    /// document at the current position.
    pub fn apply_current_pose(&mut self) {
        if let Some(document) = self.document.as_mut() {
            apply_pose(document, &self.tree, self.timeline.current_time);
        }
    }

    /// Bake all timelines into an exportable markup string. The session's
    /// own document is untouched; export works on a copy.
    pub fn export(&self) -> Result<String, ParseError> {
        let Some(document) = self.document.as_ref() else {
            return Err(ParseError::EmptyDocument);
        };
        let mut copy = document.clone();
        compile_document(&mut copy, &self.tree, self.timeline.duration)
    }
}
