//! Page Enhancements
//!
//! Small progressive touches: smooth in-page scrolling, busy state on
//! navigation links, and Bootstrap tooltips when that library is loaded.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::dom;

const ANCHOR_OFFSET_PX: f64 = 20.0;

pub fn install(document: &Document) {
    install_anchor_scrolling(document);
    install_link_loading(document);
    let tooltips = install_tooltips(document);
    tracing::debug!(tooltips, "page enhancements ready");
}

pub fn prefers_reduced_motion() -> bool {
    dom::media_matches("(prefers-reduced-motion: reduce)")
}

/// Scroll to `element`, `offset` pixels above its top edge
pub fn scroll_to(element: &HtmlElement, offset: f64) {
    let Some(window) = dom::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(f64::from(element.offset_top()) - offset);
    options.set_behavior(if prefers_reduced_motion() {
        ScrollBehavior::Instant
    } else {
        ScrollBehavior::Smooth
    });
    window.scroll_to_with_scroll_to_options(&options);
}

fn install_anchor_scrolling(document: &Document) {
    for anchor in dom::select_all(document, "a[href^=\"#\"]") {
        let (link, doc) = (anchor.clone(), document.clone());
        dom::listen(&anchor, "click", move |event| {
            event.prevent_default();
            let target = link
                .get_attribute("href")
                .and_then(|href| doc.query_selector(&href).ok().flatten())
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(target) = target {
                scroll_to(&target, ANCHOR_OFFSET_PX);
            }
        });
    }
}

fn install_link_loading(document: &Document) {
    let selector = "a[href]:not([href^=\"#\"]):not([href^=\"mailto:\"]):not([href^=\"tel:\"])";
    for link in dom::select_all(document, selector) {
        let target = link.clone();
        dom::listen(&link, "click", move |_| {
            let same_window = target
                .get_attribute("target")
                .map_or(true, |t| t.is_empty() || t == "_self");
            if same_window {
                let _ = target.class_list().add_1("loading");
            }
        });
    }
}

/// Wrap tooltip triggers with `bootstrap.Tooltip` when the library is on
/// the page. Returns how many were created.
fn install_tooltips(document: &Document) -> usize {
    let Some(window) = dom::window() else {
        return 0;
    };
    let constructor = js_sys::Reflect::get(&window, &JsValue::from_str("bootstrap"))
        .ok()
        .filter(|bootstrap| bootstrap.is_object())
        .and_then(|bootstrap| js_sys::Reflect::get(&bootstrap, &JsValue::from_str("Tooltip")).ok())
        .and_then(|ctor| ctor.dyn_into::<js_sys::Function>().ok());
    let Some(constructor) = constructor else {
        return 0;
    };

    dom::select_all(document, "[data-bs-toggle=\"tooltip\"]")
        .iter()
        .filter(|el| js_sys::Reflect::construct(&constructor, &js_sys::Array::of1(el)).is_ok())
        .count()
}
