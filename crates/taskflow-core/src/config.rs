//! UI Configuration
//!
//! Delays and storage keys used by the page components. Every field has a
//! default, so a partial override object deserializes cleanly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Quiet period before a draft is written
    pub draft_debounce_ms: u32,
    /// Delay before transient alerts are dismissed
    pub alert_dismiss_ms: u32,
    /// Storage key prefix for drafts, followed by the hour key
    pub draft_key_prefix: String,
    /// Storage key holding the explicit theme choice
    pub theme_key: String,
    /// Attribute set on the document element
    pub theme_attribute: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            draft_debounce_ms: 1000,
            alert_dismiss_ms: 5000,
            draft_key_prefix: "task-draft-".to_string(),
            theme_key: "theme".to_string(),
            theme_attribute: "data-theme".to_string(),
        }
    }
}

impl UiConfig {
    /// Parse overrides from JSON, keeping defaults for missing fields.
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        serde_json::from_str(raw).map_err(crate::Error::InvalidConfig)
    }
}
