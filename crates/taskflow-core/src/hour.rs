//! Hour Key
//!
//! Identifier of one bookable hour slot in the daily view. Correlates the
//! `edit-form-<hour>` element with the `task-draft-<hour>` record.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourKey(String);

impl HourKey {
    /// Use a key exactly as the page rendered it
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    /// Two-digit key for an hour of the day, e.g. `9` -> `"09"`
    pub fn from_hour(hour: u8) -> Self {
        Self(format!("{:02}", hour))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the inline edit form for this hour
    pub fn form_id(&self) -> String {
        format!("edit-form-{}", self.0)
    }

    /// Recover the key from an `edit-form-<hour>` id
    pub fn from_form_id(id: &str) -> Option<Self> {
        id.strip_prefix("edit-form-")
            .filter(|rest| !rest.is_empty())
            .map(Self::new)
    }

    /// Storage key for this hour's draft under `prefix`
    pub fn storage_key(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.0)
    }
}

impl fmt::Display for HourKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HourKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
