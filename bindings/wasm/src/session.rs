use redline_core::{
    read_records_str, AreaId, Dataset, FeatureId, RenderConfig, Session, Story, StoryObserver,
};
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::common::*;
use crate::surface::JsSurface;

#[wasm_bindgen]
pub struct WasmSession {
    inner: Session<JsSurface>,
}

#[wasm_bindgen]
impl WasmSession {
    /// Build a session from a JSON records string.
    /// story: optional array of {title, description?, field?}; defaults to the Boston story.
    /// config: optional partial render config.
    /// callbacks: render surface callbacks (see `JsSurface`).
    #[wasm_bindgen(constructor)]
    pub fn new(records: &str, story: JsValue, config: JsValue, callbacks: JsValue) -> Result<WasmSession, JsValue> {
        let records = read_records_str(records).map_err(js_err)?;
        let story: Story = from_js_opt(&story).map_err(js_err)?.unwrap_or_default();
        let config: RenderConfig = from_js_opt(&config).map_err(js_err)?.unwrap_or_default();
        let dataset = Dataset::from_records(records, config.city.as_deref());
        let surface = JsSurface::new(callbacks)?;
        Ok(WasmSession { inner: Session::new(dataset, story, config, surface) })
    }

    pub fn mount(&mut self) { self.inner.mount() }

    pub fn remount(&mut self) { self.inner.remount() }

    #[wasm_bindgen(js_name = "onStepChange")]
    pub fn on_step_change(&mut self, index: usize) { self.inner.on_step_change(index) }

    /// Advance one animation frame. Returns whether to request another.
    pub fn tick(&mut self) -> bool { self.inner.tick() }

    #[wasm_bindgen(js_name = "needsFrame")]
    pub fn needs_frame(&self) -> bool { self.inner.needs_frame() }

    #[wasm_bindgen(js_name = "onHoverEnter")]
    pub fn on_hover_enter(&mut self, area_id: &str) { self.inner.on_hover_enter(&AreaId::new(area_id)) }

    #[wasm_bindgen(js_name = "onHoverLeave")]
    pub fn on_hover_leave(&mut self, area_id: &str) { self.inner.on_hover_leave(&AreaId::new(area_id)) }

    /// Call on the engine's idle event. Returns how many identities were recorded.
    #[wasm_bindgen(js_name = "onSurfaceIdle")]
    pub fn on_surface_idle(&mut self) -> usize { self.inner.on_surface_idle() }

    /// Area id of a hovered engine feature, if known.
    #[wasm_bindgen(js_name = "onMapHover")]
    pub fn on_map_hover(&self, feature_id: Option<f64>) -> Option<String> {
        let id = feature_id.filter(|id| id.fract() == 0.0 && *id >= 0.0).map(|id| FeatureId(id as u64));
        self.inner.on_map_hover(id).map(|area| area.to_string())
    }

    #[wasm_bindgen(js_name = "onPointerDown")]
    pub fn on_pointer_down(&mut self) { self.inner.on_pointer_down() }

    #[wasm_bindgen(js_name = "onPointerUp")]
    pub fn on_pointer_up(&mut self) { self.inner.on_pointer_up() }

    pub fn step(&self) -> usize { self.inner.step() }

    /// Active step as {title, description?, field?}.
    #[wasm_bindgen(js_name = "activeStep")]
    pub fn active_step(&self) -> Result<JsValue, JsValue> {
        to_js_small(self.inner.active_step())
    }

    /// Distribution of the active step's field, or null.
    pub fn distribution(&self) -> Result<JsValue, JsValue> {
        to_js_small(&self.inner.distribution())
    }

    /// {field: {min, max}} over the whole dataset.
    #[wasm_bindgen(js_name = "fieldStatistics")]
    pub fn field_statistics(&self) -> Result<JsValue, JsValue> {
        to_js_small(self.inner.field_statistics())
    }

    /// Area currently highlighted from the list, if any.
    pub fn hovered(&self) -> Option<String> { self.inner.hovered().map(|area| area.to_string()) }
}
