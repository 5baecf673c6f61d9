//! Form Validation Feedback
//!
//! Mirrors native constraint validation as `is-valid` / `is-invalid`
//! classes. A field is checked on blur; while it is marked invalid it is
//! re-checked on every input so the error clears as soon as it is fixed.

/// Outcome of a validity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidState {
    Valid,
    Invalid,
}

impl ValidState {
    pub fn class(&self) -> &'static str {
        match self {
            ValidState::Valid => "is-valid",
            ValidState::Invalid => "is-invalid",
        }
    }

    fn other(&self) -> ValidState {
        match self {
            ValidState::Valid => ValidState::Invalid,
            ValidState::Invalid => ValidState::Valid,
        }
    }
}

/// An input, textarea or select
pub trait Validatable {
    /// Native constraint validation result
    fn check_validity(&self) -> bool;
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// Check `element` and apply exactly one of the two state classes
pub fn validate(element: &impl Validatable) -> ValidState {
    let state = if element.check_validity() {
        ValidState::Valid
    } else {
        ValidState::Invalid
    };
    element.remove_class(state.other().class());
    element.add_class(state.class());
    state
}

pub fn on_blur(element: &impl Validatable) -> ValidState {
    validate(element)
}

/// Re-check only fields already marked invalid
pub fn on_input(element: &impl Validatable) -> Option<ValidState> {
    element
        .has_class(ValidState::Invalid.class())
        .then(|| validate(element))
}

/// Asks the user a yes/no question
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed,
    Cancel,
}

/// Guard for destructive submits
pub fn confirm_submit(prompt: &impl Confirm, message: &str) -> SubmitDecision {
    if prompt.confirm(message) {
        SubmitDecision::Proceed
    } else {
        SubmitDecision::Cancel
    }
}

/// A form about to be submitted
pub trait SubmitForm {
    /// Confirmation question the form asks before submitting, if any
    fn confirm_message(&self) -> Option<String>;

    /// Mark the submit button busy and disable it
    fn mark_busy(&self);
}

/// Run the submit guard: a declined confirmation cancels the submit and
/// leaves the form untouched, otherwise the form is marked busy.
pub fn on_submit(form: &impl SubmitForm, prompt: &impl Confirm) -> SubmitDecision {
    if let Some(message) = form.confirm_message() {
        if confirm_submit(prompt, &message) == SubmitDecision::Cancel {
            return SubmitDecision::Cancel;
        }
    }
    form.mark_busy();
    SubmitDecision::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct FakeInput {
        valid: Cell<bool>,
        classes: RefCell<BTreeSet<String>>,
    }

    impl FakeInput {
        fn classes(&self) -> Vec<String> {
            self.classes.borrow().iter().cloned().collect()
        }
    }

    impl Validatable for FakeInput {
        fn check_validity(&self) -> bool {
            self.valid.get()
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.borrow().contains(class)
        }

        fn add_class(&self, class: &str) {
            self.classes.borrow_mut().insert(class.to_string());
        }

        fn remove_class(&self, class: &str) {
            self.classes.borrow_mut().remove(class);
        }
    }

    struct Answer(bool);

    impl Confirm for Answer {
        fn confirm(&self, _message: &str) -> bool {
            self.0
        }
    }

    #[test]
    fn test_classes_are_exclusive() {
        let input = FakeInput::default();
        assert_eq!(on_blur(&input), ValidState::Invalid);
        assert_eq!(input.classes(), vec!["is-invalid"]);

        input.valid.set(true);
        assert_eq!(validate(&input), ValidState::Valid);
        assert_eq!(input.classes(), vec!["is-valid"]);
    }

    #[test]
    fn test_input_rechecks_only_invalid_fields() {
        let input = FakeInput::default();
        // Untouched field: typing does not mark it yet
        assert_eq!(on_input(&input), None);
        assert!(input.classes().is_empty());

        on_blur(&input);
        input.valid.set(true);
        assert_eq!(on_input(&input), Some(ValidState::Valid));

        // Once valid, input events leave it alone
        input.valid.set(false);
        assert_eq!(on_input(&input), None);
        assert_eq!(input.classes(), vec!["is-valid"]);
    }

    #[derive(Default)]
    struct FakeForm {
        confirm: Option<String>,
        busy: Cell<bool>,
    }

    impl SubmitForm for FakeForm {
        fn confirm_message(&self) -> Option<String> {
            self.confirm.clone()
        }

        fn mark_busy(&self) {
            self.busy.set(true);
        }
    }

    #[test]
    fn test_plain_submit_marks_busy() {
        let form = FakeForm::default();
        assert_eq!(on_submit(&form, &Answer(false)), SubmitDecision::Proceed);
        assert!(form.busy.get());
    }

    #[test]
    fn test_declined_confirm_is_not_busy() {
        let form = FakeForm { confirm: Some("Delete this task?".to_string()), ..Default::default() };
        assert_eq!(on_submit(&form, &Answer(false)), SubmitDecision::Cancel);
        assert!(!form.busy.get());

        assert_eq!(on_submit(&form, &Answer(true)), SubmitDecision::Proceed);
        assert!(form.busy.get());
    }

    #[test]
    fn test_confirm_submit() {
        assert_eq!(confirm_submit(&Answer(true), "Delete?"), SubmitDecision::Proceed);
        assert_eq!(confirm_submit(&Answer(false), "Delete?"), SubmitDecision::Cancel);
    }
}
