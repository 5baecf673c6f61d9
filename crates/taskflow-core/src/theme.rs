//! Theme Controller
//!
//! Light/dark theme reflected as an attribute on the document element.
//! An explicit choice is persisted and always wins; without one the page
//! follows the system color-scheme preference, live.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use crate::config::UiConfig;
use crate::storage::KeyValueStore;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle button label: shows the theme a click switches to
    pub fn toggle_glyph(&self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::UnknownTheme(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the theme becomes visible
pub trait ThemeSurface {
    /// Set `name=value` on the document element
    fn set_root_attribute(&self, name: &str, value: &str);

    /// Relabel the theme toggle control; no-op when the page has none
    fn set_toggle_glyph(&self, glyph: &str);
}

pub struct ThemeController<K, D> {
    store: K,
    surface: D,
    key: String,
    attribute: String,
    applied: Cell<Theme>,
}

impl<K: KeyValueStore, D: ThemeSurface> ThemeController<K, D> {
    pub fn new(store: K, surface: D, config: &UiConfig) -> Self {
        Self {
            store,
            surface,
            key: config.theme_key.clone(),
            attribute: config.theme_attribute.clone(),
            applied: Cell::new(Theme::default()),
        }
    }

    /// Explicit user choice, if one is stored and readable
    pub fn stored_preference(&self) -> Option<Theme> {
        let raw = self.store.get(&self.key)?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(error) => {
                tracing::debug!(%error, "ignoring stored theme");
                None
            }
        }
    }

    /// Stored theme, `light` when none
    pub fn current_theme(&self) -> Theme {
        self.stored_preference().unwrap_or_default()
    }

    /// Theme currently shown on the page
    pub fn applied(&self) -> Theme {
        self.applied.get()
    }

    /// Persist an explicit choice and show it
    pub fn set_theme(&self, theme: Theme) {
        self.store.set(&self.key, theme.as_str());
        self.apply(theme);
    }

    /// Flip the shown theme and persist the result
    pub fn toggle(&self) -> Theme {
        let next = self.applied().toggled();
        self.set_theme(next);
        next
    }

    /// Show the stored theme, or the system one when nothing is stored.
    /// Nothing is persisted, so the page keeps following the system.
    pub fn init(&self, system_prefers_dark: bool) -> Theme {
        let theme = self
            .stored_preference()
            .unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        self.apply(theme);
        tracing::debug!(%theme, "theme initialised");
        theme
    }

    /// System preference changed; ignored while an explicit choice exists.
    /// Returns whether the page changed theme.
    pub fn on_system_change(&self, prefers_dark: bool) -> bool {
        if self.stored_preference().is_some() {
            return false;
        }
        let theme = Theme::from_system(prefers_dark);
        self.apply(theme);
        true
    }

    /// Forget the explicit choice and go back to following the system
    pub fn clear_preference(&self, system_prefers_dark: bool) -> Theme {
        self.store.remove(&self.key);
        self.init(system_prefers_dark)
    }

    fn apply(&self, theme: Theme) {
        self.surface.set_root_attribute(&self.attribute, theme.as_str());
        self.surface.set_toggle_glyph(theme.toggle_glyph());
        self.applied.set(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeDocument {
        attribute: RefCell<Option<(String, String)>>,
        glyph: RefCell<String>,
    }

    impl ThemeSurface for &FakeDocument {
        fn set_root_attribute(&self, name: &str, value: &str) {
            *self.attribute.borrow_mut() = Some((name.to_string(), value.to_string()));
        }

        fn set_toggle_glyph(&self, glyph: &str) {
            *self.glyph.borrow_mut() = glyph.to_string();
        }
    }

    fn shown(doc: &FakeDocument) -> String {
        doc.attribute.borrow().as_ref().map(|(_, v)| v.clone()).unwrap_or_default()
    }

    #[test]
    fn test_set_theme_persists() {
        let store = MemoryStore::new();
        let doc = FakeDocument::default();
        let themes = ThemeController::new(store.clone(), &doc, &UiConfig::default());

        themes.set_theme(Theme::Dark);
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert_eq!(*doc.attribute.borrow(), Some(("data-theme".to_string(), "dark".to_string())));
        assert_eq!(*doc.glyph.borrow(), "☀️");

        // A fresh controller over the same storage, as after a reload
        let reloaded = ThemeController::new(store, &doc, &UiConfig::default());
        assert_eq!(reloaded.current_theme(), Theme::Dark);
    }

    #[test]
    fn test_explicit_choice_beats_system_change() {
        let store = MemoryStore::new();
        let doc = FakeDocument::default();
        let themes = ThemeController::new(store.clone(), &doc, &UiConfig::default());

        themes.init(false);
        themes.set_theme(Theme::Dark);
        assert!(!themes.on_system_change(false));

        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert_eq!(shown(&doc), "dark");
    }

    #[test]
    fn test_follows_system_without_choice() {
        let store = MemoryStore::new();
        let doc = FakeDocument::default();
        let themes = ThemeController::new(store.clone(), &doc, &UiConfig::default());

        assert_eq!(themes.init(true), Theme::Dark);
        assert!(store.is_empty());
        assert_eq!(themes.current_theme(), Theme::Light);

        assert!(themes.on_system_change(false));
        assert_eq!(shown(&doc), "light");
        assert_eq!(*doc.glyph.borrow(), "🌙");
    }

    #[test]
    fn test_toggle_flips_shown_theme() {
        let store = MemoryStore::new();
        let doc = FakeDocument::default();
        let themes = ThemeController::new(store.clone(), &doc, &UiConfig::default());

        themes.init(true);
        assert_eq!(themes.toggle(), Theme::Light);
        assert_eq!(store.get("theme").as_deref(), Some("light"));

        assert_eq!(themes.clear_preference(true), Theme::Dark);
        assert!(store.get("theme").is_none());
    }

    #[test]
    fn test_garbage_preference_is_ignored() {
        let store = MemoryStore::new();
        store.set("theme", "sepia");
        let doc = FakeDocument::default();
        let themes = ThemeController::new(store, &doc, &UiConfig::default());

        assert_eq!(themes.current_theme(), Theme::Light);
        assert_eq!(themes.init(true), Theme::Dark);
        assert!(themes.on_system_change(false));
    }
}
