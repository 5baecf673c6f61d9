//! Live validation styling and submit confirmation.

use taskflow_core::{on_blur, on_input, on_submit, Confirm, SubmitDecision, SubmitForm, Validatable};
use web_sys::{Document, Element};
use wasm_bindgen::JsCast;

use crate::dom;

/// An input, textarea or select element
struct Field(Element);

impl Validatable for Field {
    fn check_validity(&self) -> bool {
        if let Some(input) = self.0.dyn_ref::<web_sys::HtmlInputElement>() {
            input.check_validity()
        } else if let Some(textarea) = self.0.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            textarea.check_validity()
        } else if let Some(select) = self.0.dyn_ref::<web_sys::HtmlSelectElement>() {
            select.check_validity()
        } else {
            true
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }
}

/// `window.confirm`
struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        dom::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// A form element; `data-confirm` holds its confirmation question
struct PageForm(Element);

impl SubmitForm for PageForm {
    fn confirm_message(&self) -> Option<String> {
        self.0.get_attribute(CONFIRM_ATTRIBUTE)
    }

    fn mark_busy(&self) {
        let Some(button) = dom::select_one(&self.0, "button[type=\"submit\"]") else {
            return;
        };
        let _ = button.class_list().add_1("loading");
        if let Some(button) = button.dyn_ref::<web_sys::HtmlButtonElement>() {
            button.set_disabled(true);
        }
    }
}

const CONFIRM_ATTRIBUTE: &str = "data-confirm";
const GUARDED_ATTRIBUTE: &str = "data-submit-guard";

pub fn install(document: &Document) {
    for form in dom::select_all(document, "form") {
        for element in dom::select_within(&form, "input, textarea, select") {
            let blurred = Field(element.clone());
            dom::listen(&element, "blur", move |_| {
                on_blur(&blurred);
            });
            let typed = Field(element.clone());
            dom::listen(&element, "input", move |_| {
                on_input(&typed);
            });
        }
        guard_submit(&form);
    }
}

/// Ask before submitting `form`; declining cancels the submit
pub fn confirm_before_submit(form: &Element, message: &str) {
    let _ = form.set_attribute(CONFIRM_ATTRIBUTE, message);
    guard_submit(form);
}

/// One submit listener per form: confirm, then show the busy state
fn guard_submit(form: &Element) {
    if form.has_attribute(GUARDED_ATTRIBUTE) {
        return;
    }
    let _ = form.set_attribute(GUARDED_ATTRIBUTE, "");
    let page_form = PageForm(form.clone());
    dom::listen(form, "submit", move |event| {
        if on_submit(&page_form, &BrowserConfirm) == SubmitDecision::Cancel {
            event.prevent_default();
            event.stop_immediate_propagation();
        }
    });
}
