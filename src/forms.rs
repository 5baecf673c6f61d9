//! Daily Task Forms
//!
//! Binds the hourly edit forms to the page: one open form at a time,
//! outside clicks close it, drafts autosave while typing and are restored
//! when a form is opened.

use std::rc::Rc;

use taskflow_core::{
    ClickTarget, DraftAutosave, DraftField, DraftForm, DraftStore, EditForms, FormVisibility,
    HourKey, UiConfig,
};
use web_sys::{Document, Element, HtmlElement};
use wasm_bindgen::JsCast;

use crate::dom;
use crate::storage::LocalStore;
use crate::timers::BrowserScheduler;

/// The `edit-form-<hour>` elements; visibility is their inline `display`
pub struct PageForms {
    document: Document,
}

impl PageForms {
    fn element(&self, hour: &HourKey) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(&hour.form_id())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl EditForms for PageForms {
    fn hour_keys(&self) -> Vec<HourKey> {
        dom::select_all(&self.document, "[id^=\"edit-form-\"]")
            .iter()
            .filter_map(|el| HourKey::from_form_id(&el.id()))
            .collect()
    }

    fn is_visible(&self, hour: &HourKey) -> Option<bool> {
        let display = self.element(hour)?.style().get_property_value("display").ok()?;
        Some(display != "none")
    }

    fn set_visible(&self, hour: &HourKey, visible: bool) {
        if let Some(el) = self.element(hour) {
            let _ = el
                .style()
                .set_property("display", if visible { "block" } else { "none" });
        }
    }

    fn focus_title(&self, hour: &HourKey) {
        if let Some(title) = self
            .element(hour)
            .and_then(|el| dom::select_one(&el, "input[name=\"title\"]"))
        {
            dom::focus(&title);
        }
    }
}

/// Named fields inside a rendered task form
pub struct TaskForm {
    root: Element,
}

impl TaskForm {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    fn field(&self, field: DraftField) -> Option<Element> {
        dom::select_one(&self.root, &format!("[name=\"{}\"]", field.name()))
    }
}

impl DraftForm for TaskForm {
    fn value(&self, field: DraftField) -> Option<String> {
        self.field(field).and_then(|el| dom::field_value(&el))
    }

    fn set_value(&self, field: DraftField, value: &str) {
        if let Some(el) = self.field(field) {
            dom::set_field_value(&el, value);
        }
    }
}

/// Controller behind `editTask` / `cancelEdit` / `clearDraft`
pub struct DailyTasks {
    document: Document,
    visibility: FormVisibility<PageForms>,
    drafts: DraftStore<LocalStore>,
}

impl DailyTasks {
    pub fn edit_task(&self, hour: &HourKey) {
        if self.visibility.toggle(hour) == Some(true) {
            if let Some(root) = self.document.get_element_by_id(&hour.form_id()) {
                self.drafts.apply_to(&TaskForm::new(root));
            }
        }
    }

    pub fn cancel_edit(&self, hour: &HourKey) {
        self.visibility.cancel(hour);
    }

    pub fn clear_draft(&self, hour: &HourKey) {
        self.drafts.clear(hour);
    }

    fn on_document_click(&self, event: &web_sys::Event) {
        let target = ClickTarget {
            inside_task_form: dom::closest_to_target(event, ".task-form").is_some(),
            inside_button: dom::closest_to_target(event, "button").is_some(),
        };
        self.visibility.on_document_click(target);
    }
}

pub fn install(document: &Document, config: &UiConfig, store: LocalStore) -> Rc<DailyTasks> {
    let drafts = DraftStore::from_config(store, config);
    let tasks = Rc::new(DailyTasks {
        document: document.clone(),
        visibility: FormVisibility::new(PageForms { document: document.clone() }),
        drafts: drafts.clone(),
    });

    let on_click = Rc::clone(&tasks);
    dom::listen(document, "click", move |event| on_click.on_document_click(&event));

    for root in dom::select_all(document, ".task-form form") {
        let form = Rc::new(TaskForm::new(root.clone()));
        drafts.apply_to(&*form);

        let autosave = Rc::new(DraftAutosave::new(
            drafts.clone(),
            BrowserScheduler,
            config.draft_debounce_ms,
        ));
        for input in dom::select_within(&root, "input[name=\"title\"], textarea[name=\"description\"]") {
            let (autosave, form) = (Rc::clone(&autosave), Rc::clone(&form));
            dom::listen(&input, "input", move |_| autosave.on_input(Rc::clone(&form)));
        }
        dom::listen(&root, "submit", move |_| autosave.cancel());
    }

    tasks
}
