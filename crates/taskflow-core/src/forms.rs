//! Inline Edit Forms
//!
//! The daily view renders one hidden edit form per hour. At most one is
//! open at a time; the open state lives in the page itself.

use crate::hour::HourKey;

/// Page access to the `edit-form-<hour>` elements
pub trait EditForms {
    /// Hours that currently have a form on the page
    fn hour_keys(&self) -> Vec<HourKey>;

    /// `None` when no form exists for `hour`
    fn is_visible(&self, hour: &HourKey) -> Option<bool>;

    fn set_visible(&self, hour: &HourKey, visible: bool);

    /// Move keyboard focus to the form's title input, if it has one
    fn focus_title(&self, hour: &HourKey);
}

/// Where a document click landed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// Inside a `.task-form` container
    pub inside_task_form: bool,
    /// On or inside a button
    pub inside_button: bool,
}

impl ClickTarget {
    pub fn is_outside(&self) -> bool {
        !self.inside_task_form && !self.inside_button
    }
}

/// Keeps at most one edit form open
pub struct FormVisibility<F> {
    forms: F,
}

impl<F: EditForms> FormVisibility<F> {
    pub fn new(forms: F) -> Self {
        Self { forms }
    }

    #[cfg(test)]
    pub fn forms(&self) -> &F {
        &self.forms
    }

    /// Flip `hour`'s form, closing every other one first.
    ///
    /// Returns the new visibility, or `None` (and changes nothing) when the
    /// page has no such form.
    pub fn toggle(&self, hour: &HourKey) -> Option<bool> {
        let was_visible = self.forms.is_visible(hour)?;
        for other in self.forms.hour_keys() {
            if &other != hour && self.forms.is_visible(&other) == Some(true) {
                self.forms.set_visible(&other, false);
            }
        }

        let visible = !was_visible;
        self.forms.set_visible(hour, visible);
        if visible {
            self.forms.focus_title(hour);
        }
        tracing::debug!(%hour, visible, "edit form toggled");
        Some(visible)
    }

    /// Hide `hour`'s form whatever its state
    pub fn cancel(&self, hour: &HourKey) {
        if self.forms.is_visible(hour).is_some() {
            self.forms.set_visible(hour, false);
        }
    }

    pub fn hide_all(&self) {
        for hour in self.forms.hour_keys() {
            self.forms.set_visible(&hour, false);
        }
    }

    /// Close everything on a click outside any form or button.
    /// Returns whether the click counted as outside.
    pub fn on_document_click(&self, target: ClickTarget) -> bool {
        if target.is_outside() {
            self.hide_all();
            true
        } else {
            false
        }
    }

    /// Hour of the open form, if any
    #[cfg(test)]
    pub fn open_form(&self) -> Option<HourKey> {
        self.forms
            .hour_keys()
            .into_iter()
            .find(|hour| self.forms.is_visible(hour) == Some(true))
    }
}
