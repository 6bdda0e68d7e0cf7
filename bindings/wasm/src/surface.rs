use js_sys::{Array, Function, Object, Reflect};
use redline_core::{CameraDirective, FeatureId, RenderSurface, RenderedFeature};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};

use crate::common::*;

/// A [`RenderSurface`] backed by a JS object of callbacks:
/// `setParcelData(fc)`, `setExtrusionData(fc)`, `setExtrusionVisible(bool)`,
/// `setFeatureHover(id, bool)`, `queryParcelFeatures() -> [{id, properties}]`,
/// and optionally `applyCamera(directive)` and `rotateBearing(degrees)`.
///
/// A missing or throwing callback is reported to the console and skipped.
pub(crate) struct JsSurface {
    callbacks: Object,
}

impl JsSurface {
    pub(crate) fn new(callbacks: JsValue) -> Result<Self, JsValue> {
        let callbacks = callbacks.dyn_into::<Object>()
            .map_err(|_| js_err("[JsSurface::new] callbacks must be an object"))?;
        Ok(Self { callbacks })
    }

    fn callback(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.callbacks, &JsValue::from_str(name)).ok()?.dyn_into::<Function>().ok()
    }

    fn call(&self, name: &str, args: &[JsValue]) -> Option<JsValue> {
        let Some(f) = self.callback(name) else {
            console_warn(&format!("[redline] render callback {name} is not defined"));
            return None;
        };
        let args: Array = args.iter().collect();
        f.apply(&self.callbacks, &args)
            .map_err(|e| console_warn(&format!("[redline] render callback {name} failed: {e:?}")))
            .ok()
    }

    fn send(&self, name: &str, value: &impl serde::Serialize) {
        match to_js(value) {
            Ok(js) => { self.call(name, &[js]); }
            Err(e) => console_warn(&format!("[redline] {name}: {e:#}")),
        }
    }
}

impl RenderSurface for JsSurface {
    fn set_parcel_data(&mut self, collection: Value) { self.send("setParcelData", &collection) }

    fn set_extrusion_data(&mut self, collection: Value) { self.send("setExtrusionData", &collection) }

    fn set_extrusion_visible(&mut self, visible: bool) {
        self.call("setExtrusionVisible", &[JsValue::from_bool(visible)]);
    }

    fn set_feature_hover(&mut self, id: FeatureId, hovered: bool) {
        self.call("setFeatureHover", &[JsValue::from_f64(id.0 as f64), JsValue::from_bool(hovered)]);
    }

    fn query_parcel_features(&self) -> Vec<RenderedFeature> {
        let Some(result) = self.call("queryParcelFeatures", &[]) else { return Vec::new() };
        let raw: Vec<Value> = match from_js_opt(&result) {
            Ok(raw) => raw.unwrap_or_default(),
            Err(e) => {
                console_warn(&format!("[redline] queryParcelFeatures: {e:#}"));
                return Vec::new();
            }
        };
        // Features whose id is not a plain integer are left unmapped.
        raw.into_iter().filter_map(|f| serde_json::from_value(f).ok()).collect()
    }

    fn apply_camera(&mut self, directive: &CameraDirective) {
        if self.callback("applyCamera").is_some() { self.send("applyCamera", directive) }
    }

    fn rotate_bearing(&mut self, degrees: f64) {
        if self.callback("rotateBearing").is_some() {
            self.call("rotateBearing", &[JsValue::from_f64(degrees)]);
        }
    }
}
