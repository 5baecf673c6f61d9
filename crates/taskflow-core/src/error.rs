//! Core error type.
//!
//! Nothing here is ever shown to the user: the page-facing operations
//! turn these into defaults. The typed variants exist for callers that
//! want to know why a stored value was ignored.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed stored draft: {0}")]
    MalformedDraft(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(serde_json::Error),

    #[error("unknown priority: {0:?}")]
    UnknownPriority(String),

    #[error("unknown theme: {0:?}")]
    UnknownTheme(String),

    #[error("unknown alert severity: {0:?}")]
    UnknownSeverity(String),

    #[error("invalid month {month} of {year}")]
    InvalidMonth { year: i32, month: u32 },
}
