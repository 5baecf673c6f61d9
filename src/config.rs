//! Page configuration
//!
//! Defaults can be overridden by a `window.taskflowConfig` object set
//! before this script loads, e.g. `{ alert_dismiss_ms: 8000 }`. A JSON
//! string holding the same object is accepted too.

use taskflow_core::UiConfig;

const CONFIG_GLOBAL: &str = "taskflowConfig";

pub fn load() -> UiConfig {
    let Some(window) = crate::dom::window() else {
        return UiConfig::default();
    };
    let value = match js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into()) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => return UiConfig::default(),
    };
    let parsed = match value.as_string() {
        Some(raw) => UiConfig::from_json(&raw).map_err(|error| error.to_string()),
        None => serde_wasm_bindgen::from_value(value).map_err(|error| error.to_string()),
    };
    match parsed {
        Ok(config) => config,
        Err(error) => {
            tracing::debug!(%error, "ignoring invalid window.{}", CONFIG_GLOBAL);
            UiConfig::default()
        }
    }
}
