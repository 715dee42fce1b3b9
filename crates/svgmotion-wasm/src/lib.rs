//! wasm-bindgen interface over the svgmotion editing session.
//!
//! JsValue payloads cross the boundary through serde, so the JS side works
//! with the same camelCase layer/keyframe/timeline shapes the core
//! serializes.

use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use svgmotion_core::{
    AnimationProperties, Config, IdSource, LayerPatch, Session, ANIMATABLE_PROPERTIES,
};

/// Id source backed by the JS clock and RNG. The core's default source uses
/// the system clock, which `wasm32-unknown-unknown` does not provide.
struct JsClockIdSource;

impl IdSource for JsClockIdSource {
    fn next_id(&mut self, prefix: &str) -> String {
        let millis = js_sys::Date::now() as u64;
        let suffix = (js_sys::Math::random() * (u32::MAX as f64)) as u32;
        format!("{prefix}-{millis}-{suffix:07x}")
    }
}

#[wasm_bindgen]
pub struct SvgMotion {
    core: Session,
}

#[wasm_bindgen]
impl SvgMotion {
    /// Create a new session. Pass a JSON config object or undefined/null for
    /// defaults. Example:
    ///   new SvgMotion({ defaultDurationMs: 3000 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SvgMotion, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if config.is_undefined() || config.is_null() {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(SvgMotion {
            core: Session::with_id_source(cfg, Box::new(JsClockIdSource)),
        })
    }

    /// Ingest a markup string, replacing the workspace. Returns the layer
    /// tree. Malformed markup throws and leaves the workspace untouched.
    #[wasm_bindgen(js_name = load_svg)]
    pub fn load_svg(&mut self, markup: &str) -> Result<JsValue, JsError> {
        self.core
            .load(markup)
            .map_err(|e| JsError::new(&format!("load_svg error: {e}")))?;
        self.layers()
    }

    /// The current layer tree.
    pub fn layers(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.core.tree())
            .map_err(|e| JsError::new(&format!("layers serialize error: {e}")))
    }

    /// The shared playback timeline (duration/currentTime/playing).
    pub fn timeline(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.timeline())
            .map_err(|e| JsError::new(&format!("timeline serialize error: {e}")))
    }

    #[wasm_bindgen(js_name = select_layer)]
    pub fn select_layer(&mut self, layer_id: Option<String>) {
        self.core.select(layer_id.as_deref());
    }

    #[wasm_bindgen(js_name = highlight_layer)]
    pub fn highlight_layer(&mut self, layer_id: Option<String>) {
        self.core.highlight(layer_id.as_deref());
    }

    /// Merge a partial update ({ name?, properties?, pathData? }) into a
    /// layer.
    #[wasm_bindgen(js_name = update_layer)]
    pub fn update_layer(&mut self, layer_id: &str, patch: JsValue) -> Result<(), JsError> {
        let patch: LayerPatch = swb::from_value(patch)
            .map_err(|e| JsError::new(&format!("update_layer parse error: {e}")))?;
        self.core.update_layer(layer_id, &patch);
        Ok(())
    }

    #[wasm_bindgen(js_name = rename_layer)]
    pub fn rename_layer(&mut self, layer_id: &str, new_name: &str) {
        self.core.rename_layer(layer_id, new_name);
    }

    #[wasm_bindgen(js_name = add_keyframe)]
    pub fn add_keyframe(
        &mut self,
        layer_id: &str,
        time: f64,
        properties: JsValue,
    ) -> Result<(), JsError> {
        let properties: AnimationProperties = swb::from_value(properties)
            .map_err(|e| JsError::new(&format!("add_keyframe parse error: {e}")))?;
        self.core.add_keyframe(layer_id, time, properties);
        Ok(())
    }

    /// Capture the layer's current properties at the current playback
    /// position.
    #[wasm_bindgen(js_name = capture_keyframe)]
    pub fn capture_keyframe(&mut self, layer_id: &str) {
        self.core.capture_keyframe(layer_id);
    }

    #[wasm_bindgen(js_name = remove_keyframe)]
    pub fn remove_keyframe(&mut self, layer_id: &str, keyframe_id: &str) {
        self.core.remove_keyframe(layer_id, keyframe_id);
    }

    /// Group the named top-level layers. Throws when fewer than two ids are
    /// passed.
    #[wasm_bindgen(js_name = group_layers)]
    pub fn group_layers(&mut self, layer_ids: JsValue, group_name: &str) -> Result<(), JsError> {
        let layer_ids: Vec<String> = swb::from_value(layer_ids)
            .map_err(|e| JsError::new(&format!("group_layers parse error: {e}")))?;
        self.core
            .group_layers(&layer_ids, group_name)
            .map_err(|e| JsError::new(&format!("group_layers error: {e}")))
    }

    #[wasm_bindgen(js_name = ungroup_layers)]
    pub fn ungroup_layers(&mut self, group_id: &str) {
        self.core.ungroup_layers(group_id);
    }

    #[wasm_bindgen(js_name = toggle_playback)]
    pub fn toggle_playback(&mut self) {
        self.core.toggle_playback();
    }

    /// Advance one frame; returns the new playback position (ms).
    pub fn tick(&mut self) -> f64 {
        self.core.tick()
    }

    pub fn seek(&mut self, time: f64) {
        self.core.seek(time);
    }

    #[wasm_bindgen(js_name = set_duration)]
    pub fn set_duration(&mut self, duration: f64) -> Result<(), JsError> {
        self.core
            .set_duration(duration)
            .map_err(|e| JsError::new(&format!("set_duration error: {e}")))
    }

    /// Resolved pose of one layer at the current position, or null for
    /// unknown ids.
    pub fn sample(&self, layer_id: &str) -> Result<JsValue, JsError> {
        match self.core.sample(layer_id) {
            Some(pose) => swb::to_value(&pose)
                .map_err(|e| JsError::new(&format!("sample serialize error: {e}"))),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = sample_at)]
    pub fn sample_at(&self, layer_id: &str, time: f64) -> Result<JsValue, JsError> {
        match self.core.sample_at(layer_id, time) {
            Some(pose) => swb::to_value(&pose)
                .map_err(|e| JsError::new(&format!("sample_at serialize error: {e}"))),
            None => Ok(JsValue::NULL),
        }
    }

    /// Bake all timelines into a standalone animated markup string.
    #[wasm_bindgen(js_name = export_svg)]
    pub fn export_svg(&self) -> Result<String, JsError> {
        self.core
            .export()
            .map_err(|e| JsError::new(&format!("export_svg error: {e}")))
    }

    /// Drop back to the empty workspace.
    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// The animatable-property registry (name/label/editor ranges) the
    /// properties panel renders from.
    #[wasm_bindgen(js_name = animatable_properties)]
    pub fn animatable_properties() -> Result<JsValue, JsError> {
        swb::to_value(ANIMATABLE_PROPERTIES)
            .map_err(|e| JsError::new(&format!("registry serialize error: {e}")))
    }
}
