//! Alert banners rendered by the server or shown from script.

use std::rc::Rc;

use taskflow_core::{AlertAutoDismiss, AlertBanner, AlertHost, Severity, UiConfig};
use web_sys::{Document, Element};

use crate::dom;
use crate::timers::BrowserScheduler;

pub struct PageAlerts {
    document: Document,
}

impl PageAlerts {
    fn container(&self) -> Option<Element> {
        [".messages", ".container"]
            .iter()
            .find_map(|selector| self.document.query_selector(selector).ok().flatten())
    }

    fn build(&self, message: &str, severity: Severity) -> Option<Element> {
        let banner = AlertBanner::new(message, severity);
        let alert = self.document.create_element("div").ok()?;
        alert.set_class_name(&banner.class_name);
        let _ = alert.set_attribute("role", banner.role);
        alert.set_text_content(Some(&banner.text));

        let close = self.document.create_element("button").ok()?;
        close.set_class_name("btn-close");
        for (name, value) in AlertBanner::CLOSE_ATTRIBUTES {
            let _ = close.set_attribute(name, value);
        }
        alert.append_child(&close).ok()?;
        Some(alert)
    }
}

impl AlertHost for PageAlerts {
    type Alert = Element;

    fn transient_alerts(&self) -> Vec<Element> {
        dom::select_all(&self.document, ".alert:not(.alert-permanent)")
    }

    fn dismiss(&self, alert: &Element) {
        if let Some(close) = dom::select_one(alert, ".btn-close") {
            dom::click(&close);
        }
    }

    fn prepend(&self, message: &str, severity: Severity) -> Option<Element> {
        let container = self.container()?;
        let alert = self.build(message, severity)?;
        container.prepend_with_node_1(&alert).ok()?;
        Some(alert)
    }
}

pub type Alerts = AlertAutoDismiss<PageAlerts, BrowserScheduler>;

pub fn install(document: &Document, config: &UiConfig) -> Rc<Alerts> {
    let alerts = Rc::new(AlertAutoDismiss::new(
        Rc::new(PageAlerts { document: document.clone() }),
        BrowserScheduler,
        config.alert_dismiss_ms,
    ));
    alerts.init();
    alerts
}
