//! Taskflow Core
//!
//! Browser-independent behaviour behind the Taskflow pages.
//! Every component receives its storage, timers and DOM access as
//! injected values, so the whole crate runs under `cargo test`.
//!
//! - storage / schedule: persistence and deferred-work abstractions
//! - forms / draft: inline edit forms and their autosaved drafts
//! - calendar: month grid, keyboard navigation, month arithmetic
//! - alerts / validation / theme: page chrome

mod error;
mod config;
mod storage;
mod schedule;
mod hour;
mod draft;
mod forms;
mod calendar;
mod alerts;
mod validation;
mod theme;

pub use error::{Error, Result};
pub use config::UiConfig;
pub use storage::{KeyValueStore, MemoryStore};
pub use schedule::{Debouncer, ManualHandle, ManualScheduler, Scheduler};
pub use hour::HourKey;
pub use draft::{Draft, DraftAutosave, DraftField, DraftForm, DraftStore, Priority};
pub use forms::{ClickTarget, EditForms, FormVisibility};
pub use calendar::{format_long_date, CalendarGrid, CalendarNavigator, CalendarTable, GridPos, MonthRef, NavKey, NavOutcome};
pub use alerts::{AlertAutoDismiss, AlertBanner, AlertHost, Severity};
pub use validation::{
    confirm_submit, on_blur, on_input, on_submit, validate, Confirm, SubmitDecision, SubmitForm, ValidState,
    Validatable,
};
pub use theme::{Theme, ThemeController, ThemeSurface};
