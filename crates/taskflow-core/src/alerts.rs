//! Alert Banners
//!
//! Transient notification banners are dismissed automatically after a
//! delay by clicking their own close control, so the page's dismiss
//! animation still runs. Permanent alerts are left alone.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::schedule::Scheduler;
use crate::{Error, Result};

/// Alert styling level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    /// Styling class, e.g. `alert-warning`
    pub fn css_class(&self) -> String {
        format!("alert-{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "success" => Ok(Severity::Success),
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            // Server-side message level
            "danger" | "error" => Ok(Severity::Danger),
            other => Err(Error::UnknownSeverity(other.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markup for a dismissible banner built from script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBanner {
    pub class_name: String,
    pub role: &'static str,
    /// Shown as plain text, never parsed as HTML
    pub text: String,
}

impl AlertBanner {
    /// Attributes of the banner's close button (class `btn-close`)
    pub const CLOSE_ATTRIBUTES: [(&'static str, &'static str); 3] =
        [("type", "button"), ("data-bs-dismiss", "alert"), ("aria-label", "Close")];

    pub fn new(message: &str, severity: Severity) -> Self {
        AlertBanner {
            class_name: format!("alert {} alert-dismissible fade show", severity.css_class()),
            role: "alert",
            text: message.to_string(),
        }
    }
}

/// Page access to alert banners
pub trait AlertHost {
    type Alert: Clone + 'static;

    /// Rendered alerts not marked permanent
    fn transient_alerts(&self) -> Vec<Self::Alert>;

    /// Trigger the alert's close control; no-op when it has none
    fn dismiss(&self, alert: &Self::Alert);

    /// Insert a dismissible alert as the first child of the messages
    /// region. `None` when the page has no such region.
    fn prepend(&self, message: &str, severity: Severity) -> Option<Self::Alert>;
}

pub struct AlertAutoDismiss<H, S: Scheduler> {
    host: Rc<H>,
    scheduler: S,
    delay_ms: u32,
}

impl<H, S> AlertAutoDismiss<H, S>
where
    H: AlertHost + 'static,
    S: Scheduler,
{
    pub fn new(host: Rc<H>, scheduler: S, delay_ms: u32) -> Self {
        Self {
            host,
            scheduler,
            delay_ms,
        }
    }

    /// Schedule dismissal of every alert already on the page.
    /// Returns how many were scheduled.
    pub fn init(&self) -> usize {
        let alerts = self.host.transient_alerts();
        let count = alerts.len();
        for alert in alerts {
            self.dismiss_later(alert, self.delay_ms);
        }
        tracing::debug!(count, delay_ms = self.delay_ms, "alerts scheduled for dismissal");
        count
    }

    /// Show a new alert. `duration_ms == 0` keeps it until the user closes
    /// it. Returns whether the page had somewhere to put it.
    pub fn show(&self, message: &str, severity: Severity, duration_ms: u32) -> bool {
        let Some(alert) = self.host.prepend(message, severity) else {
            return false;
        };
        if duration_ms > 0 {
            self.dismiss_later(alert, duration_ms);
        }
        true
    }

    /// Show with the configured default duration
    pub fn show_default(&self, message: &str, severity: Severity) -> bool {
        self.show(message, severity, self.delay_ms)
    }

    fn dismiss_later(&self, alert: H::Alert, delay_ms: u32) {
        let host = Rc::clone(&self.host);
        // Dismissals are never cancelled, so no handle is kept
        self.scheduler
            .schedule_detached(delay_ms, Box::new(move || host.dismiss(&alert)));
    }
}
