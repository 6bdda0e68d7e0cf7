use anyhow::{anyhow, Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize to a JSON string and let JS parse it; large GeoJSON values
/// come across faster this way than field by field.
pub(crate) fn to_js(value: &impl Serialize) -> Result<JsValue> {
    let text = serde_json::to_string(value).context("[common::to_js] Failed to serialize value")?;
    js_sys::JSON::parse(&text).map_err(|e| anyhow!("[common::to_js] Failed to parse JSON in JS: {e:?}"))
}

/// Small values go through serde-wasm-bindgen directly, as plain objects
/// (not JS `Map`s) with `null` for `None`.
pub(crate) fn to_js_small(value: &impl Serialize) -> Result<JsValue, JsValue> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).map_err(|e| e.into())
}

/// Inverse of [`to_js`]: stringify in JS, parse with serde.
pub(crate) fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T> {
    let text = js_sys::JSON::stringify(value)
        .map_err(|e| anyhow!("[common::from_js] Failed to stringify value: {e:?}"))?
        .as_string()
        .ok_or_else(|| anyhow!("[common::from_js] Value has no JSON representation"))?;
    serde_json::from_str(&text).context("[common::from_js] Failed to deserialize value")
}

/// `from_js` for optional arguments; `undefined` and `null` give `None`.
pub(crate) fn from_js_opt<T: DeserializeOwned>(value: &JsValue) -> Result<Option<T>> {
    if value.is_undefined() || value.is_null() { return Ok(None) }
    from_js(value).map(Some)
}

pub(crate) fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}
