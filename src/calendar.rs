//! Month Calendar
//!
//! Keyboard navigation over the month table's `.calendar-day` cells and
//! month-to-month navigation through the `year` / `month` query string.

use std::rc::Rc;

use taskflow_core::{CalendarNavigator, CalendarTable, MonthRef, NavKey};
use web_sys::{Document, Element, KeyboardEvent};
use wasm_bindgen::JsCast;

use crate::dom;

const DAY_SELECTOR: &str = ".calendar-day";

/// The month table; cells are its `td` elements
pub struct MonthTable {
    document: Document,
}

impl MonthTable {
    /// The day element of a cell: the cell itself or a descendant
    fn day_of(&self, cell: &Element) -> Option<Element> {
        if cell.matches(DAY_SELECTOR).unwrap_or(false) {
            Some(cell.clone())
        } else {
            dom::select_one(cell, DAY_SELECTOR)
        }
    }

    /// Cell holding a day element, or the day itself outside a table
    fn cell_of(day: &Element) -> Element {
        day.closest("td").ok().flatten().unwrap_or_else(|| day.clone())
    }
}

fn children(element: &Element) -> Vec<Element> {
    let children = element.children();
    (0..children.length()).filter_map(|i| children.item(i)).collect()
}

impl CalendarTable for MonthTable {
    type Cell = Element;

    fn day_cells(&self) -> Vec<Element> {
        dom::select_all(&self.document, DAY_SELECTOR)
            .iter()
            .map(Self::cell_of)
            .collect()
    }

    fn rows_around(&self, cell: &Element) -> Vec<Vec<Element>> {
        let Some(section) = cell
            .closest("tr")
            .ok()
            .flatten()
            .and_then(|row| row.parent_element())
        else {
            return Vec::new();
        };
        children(&section)
            .iter()
            .filter(|el| el.tag_name().eq_ignore_ascii_case("tr"))
            .map(children)
            .collect()
    }

    fn is_day(&self, cell: &Element) -> bool {
        self.day_of(cell).is_some()
    }

    fn set_tab_stop(&self, cell: &Element) {
        if let Some(day) = self.day_of(cell) {
            let _ = day.set_attribute("tabindex", "0");
        }
    }

    fn focus_day(&self, cell: &Element) {
        if let Some(day) = self.day_of(cell) {
            dom::focus(&day);
        }
    }

    fn activate_day(&self, cell: &Element) {
        if let Some(day) = self.day_of(cell) {
            dom::click(&day);
        }
    }
}

pub fn install(document: &Document) {
    let navigator = Rc::new(CalendarNavigator::new(MonthTable {
        document: document.clone(),
    }));
    let count = navigator.init();

    dom::listen(document, "keydown", move |event| {
        let Some(key) = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|ev| NavKey::from_key(&ev.key()))
        else {
            return;
        };
        let Some(day) = dom::closest_to_target(&event, DAY_SELECTOR) else {
            return;
        };
        if navigator.on_key(&MonthTable::cell_of(&day), key).prevents_default() {
            event.prevent_default();
        }
    });
    tracing::debug!(count, "calendar days focusable");
}

/// Reload the month view on another month
pub fn navigate_to_month(year: i32, month: u32) {
    let month = match MonthRef::new(year, month) {
        Ok(month) => month,
        Err(error) => {
            tracing::debug!(%error, "month navigation ignored");
            return;
        }
    };
    let Some(location) = dom::window().map(|w| w.location()) else {
        return;
    };
    let Ok(url) = location.href().and_then(|href| web_sys::Url::new(&href)) else {
        return;
    };
    let params = url.search_params();
    for (name, value) in month.query_pairs() {
        params.set(name, &value);
    }
    let _ = location.set_href(&url.href());
}
