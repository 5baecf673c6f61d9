//! Theme wiring: document attribute, `#theme-toggle`, and the system
//! `prefers-color-scheme` media query.

use std::rc::Rc;

use taskflow_core::{ThemeController, ThemeSurface, UiConfig};
use web_sys::{Document, MediaQueryListEvent};
use wasm_bindgen::JsCast;

use crate::dom;
use crate::storage::LocalStore;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";
const TOGGLE_ID: &str = "theme-toggle";

pub struct PageTheme {
    document: Document,
}

impl ThemeSurface for PageTheme {
    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute(name, value);
        }
    }

    fn set_toggle_glyph(&self, glyph: &str) {
        if let Some(toggle) = self.document.get_element_by_id(TOGGLE_ID) {
            toggle.set_text_content(Some(glyph));
        }
    }
}

pub type Themes = ThemeController<LocalStore, PageTheme>;

pub fn install(document: &Document, config: &UiConfig, store: LocalStore) -> Rc<Themes> {
    let themes = Rc::new(ThemeController::new(
        store,
        PageTheme { document: document.clone() },
        config,
    ));
    themes.init(dom::media_matches(DARK_QUERY));

    if let Some(query) = dom::window().and_then(|w| w.match_media(DARK_QUERY).ok().flatten()) {
        let on_change = Rc::clone(&themes);
        dom::listen(&query, "change", move |event| {
            if let Some(event) = event.dyn_ref::<MediaQueryListEvent>() {
                on_change.on_system_change(event.matches());
            }
        });
    }

    if let Some(toggle) = document.get_element_by_id(TOGGLE_ID) {
        let on_click = Rc::clone(&themes);
        dom::listen(&toggle, "click", move |_| {
            let theme = on_click.toggle();
            tracing::debug!(%theme, "theme toggled");
        });
    }
    themes
}
