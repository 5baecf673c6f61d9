//! Taskflow Frontend Entry Point
//!
//! Progressive enhancement for the server-rendered Taskflow pages. Each
//! component is installed once the document is parsed and afterwards only
//! reacts to its own DOM events.

mod dom;
mod config;
mod storage;
mod timers;
mod forms;
mod calendar;
mod alerts;
mod validation;
mod theme;
mod enhancements;
mod globals;

use web_sys::Document;

use storage::LocalStore;

fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        let doc = document.clone();
        dom::listen(&document, "DOMContentLoaded", move |_| start(&doc));
    } else {
        start(&document);
    }
}

fn start(document: &Document) {
    let Some(window) = dom::window() else {
        return;
    };
    let config = config::load();
    let store = LocalStore::open();

    validation::install(document);
    let tasks = forms::install(document, &config, store.clone());
    calendar::install(document);
    let alerts = alerts::install(document, &config);
    let themes = theme::install(document, &config, store);
    enhancements::install(document);
    globals::install(&window, tasks, alerts, themes);

    tracing::info!("Taskflow frontend initialised");
}
