//! Global entry points
//!
//! Functions on `window` for inline handlers in the server templates,
//! e.g. `onclick="editTask(9)"`.

use std::rc::Rc;

use taskflow_core::{format_long_date, HourKey, Severity, Theme};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use crate::alerts::Alerts;
use crate::calendar;
use crate::forms::DailyTasks;
use crate::theme::Themes;
use crate::validation;

/// Templates pass hours as numbers or strings
fn hour_arg(value: &JsValue) -> Option<HourKey> {
    if let Some(raw) = value.as_string() {
        return Some(HourKey::new(raw));
    }
    value
        .as_f64()
        .filter(|n| n.is_finite() && n.fract() == 0.0)
        .map(|n| HourKey::new((n as i64).to_string()))
}

fn int_arg(value: &JsValue) -> Option<i64> {
    value
        .as_f64()
        .or_else(|| value.as_string().and_then(|s| s.trim().parse().ok()))
        .filter(|n| n.is_finite())
        .map(|n| n as i64)
}

fn export(window: &Window, name: &str, function: &JsValue) {
    if js_sys::Reflect::set(window, &JsValue::from_str(name), function).is_err() {
        tracing::debug!(name, "global not exported");
    }
}

fn export_hour_fn(window: &Window, name: &str, f: impl Fn(&HourKey) + 'static) {
    let closure = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
        if let Some(hour) = hour_arg(&value) {
            f(&hour);
        }
    });
    export(window, name, closure.as_ref());
    closure.forget();
}

pub fn install(window: &Window, tasks: Rc<DailyTasks>, alerts: Rc<Alerts>, themes: Rc<Themes>) {
    let edit = Rc::clone(&tasks);
    export_hour_fn(window, "editTask", move |hour| edit.edit_task(hour));
    let cancel = Rc::clone(&tasks);
    export_hour_fn(window, "cancelEdit", move |hour| cancel.cancel_edit(hour));
    export_hour_fn(window, "clearDraft", move |hour| tasks.clear_draft(hour));

    let show = Closure::<dyn Fn(JsValue, JsValue, JsValue)>::new(
        move |message: JsValue, severity: JsValue, duration: JsValue| {
            let message = message.as_string().unwrap_or_default();
            let severity = severity
                .as_string()
                .and_then(|s| s.parse::<Severity>().ok())
                .unwrap_or_default();
            match int_arg(&duration) {
                Some(ms) => {
                    alerts.show(&message, severity, ms.clamp(0, i64::from(u32::MAX)) as u32);
                }
                None => {
                    alerts.show_default(&message, severity);
                }
            }
        },
    );
    export(window, "showAlert", show.as_ref());
    show.forget();

    let navigate = Closure::<dyn Fn(JsValue, JsValue)>::new(|year: JsValue, month: JsValue| {
        if let (Some(year), Some(month)) = (int_arg(&year), int_arg(&month)) {
            if let (Ok(year), Ok(month)) = (i32::try_from(year), u32::try_from(month)) {
                calendar::navigate_to_month(year, month);
            }
        }
    });
    export(window, "navigateToMonth", navigate.as_ref());
    navigate.forget();

    let set_theme = Closure::<dyn Fn(JsValue)>::new(move |theme: JsValue| {
        if let Some(theme) = theme.as_string().and_then(|s| s.parse::<Theme>().ok()) {
            themes.set_theme(theme);
        }
    });
    export(window, "setTheme", set_theme.as_ref());
    set_theme.forget();

    let format_date = Closure::<dyn Fn(JsValue, JsValue, JsValue) -> JsValue>::new(
        |year: JsValue, month: JsValue, day: JsValue| {
            let date = match (int_arg(&year), int_arg(&month), int_arg(&day)) {
                (Some(y), Some(m), Some(d)) => i32::try_from(y).ok().and_then(|y| {
                    chrono::NaiveDate::from_ymd_opt(y, u32::try_from(m).ok()?, u32::try_from(d).ok()?)
                }),
                _ => None,
            };
            date.map_or(JsValue::UNDEFINED, |date| JsValue::from_str(&format_long_date(date)))
        },
    );
    export(window, "formatDate", format_date.as_ref());
    format_date.forget();

    let confirm = Closure::<dyn Fn(JsValue, JsValue)>::new(|form: JsValue, message: JsValue| {
        if let Ok(form) = form.dyn_into::<web_sys::Element>() {
            validation::confirm_before_submit(&form, &message.as_string().unwrap_or_default());
        }
    });
    export(window, "confirmSubmit", confirm.as_ref());
    confirm.forget();
}
