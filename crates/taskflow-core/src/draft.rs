//! Task Drafts
//!
//! Unsaved snapshots of an hour's edit form, kept in persistent storage so a
//! reload does not lose what the user typed. One record per hour key; the
//! record is overwritten after each quiet period and removed once the task
//! is saved.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::UiConfig;
use crate::hour::HourKey;
use crate::schedule::{Debouncer, Scheduler};
use crate::storage::KeyValueStore;
use crate::{Error, Result};

/// Task priority, matching the server's choices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::UnknownPriority(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named fields of a task form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Hour,
    Title,
    Description,
    Priority,
}

impl DraftField {
    /// Value of the element's `name` attribute
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Hour => "hour",
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Priority => "priority",
        }
    }
}

/// Read/write access to one rendered task form
pub trait DraftForm {
    /// Current value, `None` when the form has no such field
    fn value(&self, field: DraftField) -> Option<String>;

    fn set_value(&self, field: DraftField, value: &str);
}

/// Persisted snapshot of a task form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default)]
    pub hour: HourKey,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl Draft {
    /// Snapshot a form. Forms without an hour field cannot be keyed.
    pub fn read_from(form: &impl DraftForm) -> Option<Self> {
        let hour = form.value(DraftField::Hour).map(HourKey::new)?;
        if hour.as_str().is_empty() {
            return None;
        }
        Some(Self {
            hour,
            title: form.value(DraftField::Title).unwrap_or_default(),
            description: form.value(DraftField::Description).unwrap_or_default(),
            priority: form
                .value(DraftField::Priority)
                .and_then(|raw| raw.parse().ok()),
        })
    }
}

/// Drafts keyed by hour in a [`KeyValueStore`]
#[derive(Clone, Debug)]
pub struct DraftStore<K> {
    store: K,
    prefix: String,
}

impl<K: KeyValueStore> DraftStore<K> {
    pub fn new(store: K, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn from_config(store: K, config: &UiConfig) -> Self {
        Self::new(store, config.draft_key_prefix.clone())
    }

    fn key(&self, hour: &HourKey) -> String {
        hour.storage_key(&self.prefix)
    }

    /// Load a draft, reporting records that fail to decode
    pub fn try_load(&self, hour: &HourKey) -> Result<Option<Draft>> {
        let Some(raw) = self.store.get(&self.key(hour)) else {
            return Ok(None);
        };
        let mut draft: Draft = serde_json::from_str(&raw)?;
        // Older records carried no hour of their own
        if draft.hour.as_str().is_empty() {
            draft.hour = hour.clone();
        }
        Ok(Some(draft))
    }

    /// Load a draft; anything unreadable counts as no draft
    pub fn load(&self, hour: &HourKey) -> Option<Draft> {
        match self.try_load(hour) {
            Ok(draft) => draft,
            Err(error) => {
                tracing::debug!(%hour, %error, "ignoring stored draft");
                None
            }
        }
    }

    pub fn save(&self, draft: &Draft) {
        match serde_json::to_string(draft) {
            Ok(raw) => {
                self.store.set(&self.key(&draft.hour), &raw);
                tracing::trace!(hour = %draft.hour, "draft saved");
            }
            Err(error) => tracing::debug!(%error, "draft not serializable"),
        }
    }

    /// Forget the draft once the task has been saved
    pub fn clear(&self, hour: &HourKey) {
        self.store.remove(&self.key(hour));
    }

    /// Fill a form from its stored draft.
    ///
    /// Title and description are only written into empty fields so values
    /// typed by the user or rendered by the server win. Priority is applied
    /// whenever the draft has one. Returns whether a draft was found.
    pub fn apply_to(&self, form: &impl DraftForm) -> bool {
        let Some(hour) = form.value(DraftField::Hour).map(HourKey::new) else {
            return false;
        };
        let Some(draft) = self.load(&hour) else {
            return false;
        };

        for (field, stored) in [
            (DraftField::Title, &draft.title),
            (DraftField::Description, &draft.description),
        ] {
            let current = form.value(field);
            if current.as_deref() == Some("") && !stored.is_empty() {
                form.set_value(field, stored);
            }
        }
        if let Some(priority) = draft.priority {
            if form.value(DraftField::Priority).is_some() {
                form.set_value(DraftField::Priority, priority.as_str());
            }
        }
        true
    }
}

/// Debounced draft writer for one form
pub struct DraftAutosave<K, S: Scheduler> {
    drafts: DraftStore<K>,
    debouncer: Debouncer<S>,
}

impl<K, S> DraftAutosave<K, S>
where
    K: KeyValueStore + Clone + 'static,
    S: Scheduler,
{
    pub fn new(drafts: DraftStore<K>, scheduler: S, delay_ms: u32) -> Self {
        Self {
            drafts,
            debouncer: Debouncer::new(scheduler, delay_ms),
        }
    }

    /// Restart the quiet period; the form is read when it elapses.
    pub fn on_input<F: DraftForm + 'static>(&self, form: Rc<F>) {
        let drafts = self.drafts.clone();
        self.debouncer.call(move || match Draft::read_from(&*form) {
            Some(draft) => drafts.save(&draft),
            None => tracing::debug!("task form has no hour field, draft skipped"),
        });
    }

    /// Drop a pending write, e.g. when the form is submitted
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Form with the given fields present
    #[derive(Default)]
    struct FakeForm {
        fields: RefCell<HashMap<&'static str, String>>,
    }

    impl FakeForm {
        fn with_hour(hour: &str) -> Self {
            let form = Self::default();
            for (name, value) in [("hour", hour), ("title", ""), ("description", ""), ("priority", "medium")] {
                form.fields.borrow_mut().insert(name, value.to_string());
            }
            form
        }

        fn get(&self, name: &str) -> String {
            self.fields.borrow().get(name).cloned().unwrap_or_default()
        }
    }

    impl DraftForm for FakeForm {
        fn value(&self, field: DraftField) -> Option<String> {
            self.fields.borrow().get(field.name()).cloned()
        }

        fn set_value(&self, field: DraftField, value: &str) {
            self.fields.borrow_mut().insert(field.name(), value.to_string());
        }
    }

    fn drafts() -> (MemoryStore, DraftStore<MemoryStore>) {
        let store = MemoryStore::new();
        (store.clone(), DraftStore::new(store, "task-draft-"))
    }

    #[test]
    fn test_burst_of_input_saves_once_with_last_values() {
        let (store, drafts) = drafts();
        let scheduler = ManualScheduler::new();
        let autosave = DraftAutosave::new(drafts.clone(), scheduler.clone(), 1000);
        let form = Rc::new(FakeForm::with_hour("14"));

        for text in ["S", "St", "Sta", "Standup"] {
            form.set_value(DraftField::Title, text);
            autosave.on_input(form.clone());
            scheduler.advance(300);
        }
        assert!(store.is_empty());

        scheduler.advance(1000);
        assert_eq!(store.keys(), vec!["task-draft-14".to_string()]);
        let draft = drafts.load(&HourKey::new("14")).unwrap();
        assert_eq!(draft.title, "Standup");
    }

    #[test]
    fn test_standup_scenario() {
        let (_, drafts) = drafts();
        let scheduler = ManualScheduler::new();
        let autosave = DraftAutosave::new(drafts.clone(), scheduler.clone(), 1000);
        let form = Rc::new(FakeForm::with_hour("14"));

        form.set_value(DraftField::Title, "Standup");
        autosave.on_input(form.clone());
        scheduler.advance(1200);

        let expected = Draft {
            hour: HourKey::new("14"),
            title: "Standup".to_string(),
            description: String::new(),
            priority: Some(Priority::Medium),
        };
        assert_eq!(drafts.load(&HourKey::new("14")), Some(expected));

        // Reopened later with an empty title: prefilled
        let reopened = FakeForm::with_hour("14");
        assert!(drafts.apply_to(&reopened));
        assert_eq!(reopened.get("title"), "Standup");

        // Reopened with a server-rendered title: untouched
        let existing = FakeForm::with_hour("14");
        existing.set_value(DraftField::Title, "Planning");
        drafts.apply_to(&existing);
        assert_eq!(existing.get("title"), "Planning");
    }

    #[test]
    fn test_priority_always_applied() {
        let (_, drafts) = drafts();
        drafts.save(&Draft {
            hour: HourKey::new("09"),
            title: String::new(),
            description: String::new(),
            priority: Some(Priority::High),
        });

        let form = FakeForm::with_hour("09");
        form.set_value(DraftField::Priority, "low");
        drafts.apply_to(&form);
        assert_eq!(form.get("priority"), "high");
    }

    #[test]
    fn test_clear_removes_draft() {
        let (_, drafts) = drafts();
        let hour = HourKey::new("10");
        drafts.save(&Draft {
            hour: hour.clone(),
            title: "Review".to_string(),
            description: "PR queue".to_string(),
            priority: None,
        });
        assert!(drafts.load(&hour).is_some());

        drafts.clear(&hour);
        assert_eq!(drafts.load(&hour), None);
        // Clearing twice is harmless
        drafts.clear(&hour);
    }

    #[test]
    fn test_malformed_record_reads_as_absent() {
        let (store, drafts) = drafts();
        store.set("task-draft-11", "{not json");

        let hour = HourKey::new("11");
        assert!(matches!(drafts.try_load(&hour), Err(Error::MalformedDraft(_))));
        assert_eq!(drafts.load(&hour), None);
        assert!(!drafts.apply_to(&FakeForm::with_hour("11")));
    }

    #[test]
    fn test_legacy_record_without_hour() {
        let (store, drafts) = drafts();
        store.set("task-draft-08", r#"{"title":"Gym","priority":"low"}"#);

        let draft = drafts.load(&HourKey::new("08")).unwrap();
        assert_eq!(draft.hour.as_str(), "08");
        assert_eq!(draft.title, "Gym");
        assert_eq!(draft.description, "");
        assert_eq!(draft.priority, Some(Priority::Low));
    }

    #[test]
    fn test_form_without_hour_is_not_saved() {
        let (store, drafts) = drafts();
        let scheduler = ManualScheduler::new();
        let autosave = DraftAutosave::new(drafts, scheduler.clone(), 1000);

        let form = Rc::new(FakeForm::default());
        form.set_value(DraftField::Title, "Orphan");
        autosave.on_input(form);
        scheduler.advance(2000);

        assert!(store.is_empty());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert!(matches!("urgent".parse::<Priority>(), Err(Error::UnknownPriority(_))));
    }
}
