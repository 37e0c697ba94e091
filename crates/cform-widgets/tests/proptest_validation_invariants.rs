//! Property-based invariant tests for contact form validation and submission.
//!
//! 1. First name errors iff empty or shorter than 5 characters, one error at most.
//! 2. Last name and email report "required" iff empty.
//! 3. Message never errors.
//! 4. Values containing whitespace are never valid emails.
//! 5. Well-formed `local@domain.tld` addresses always pass.
//! 6. Submit succeeds iff every field validates; failed submits leave the snapshot alone.
//! 7. After arbitrary key input, every error shown matches the field's current value
//!    and the cursor stays within the focused value's grapheme count.

use cform_core::event::KeyCode;
use cform_render::Role;
use cform_runtime::Model;
use cform_widgets::contact_form::{ContactForm, Field, Msg, SubmitOutcome, validate};
use cform_widgets::validation::{ERROR_CODE_MIN_LENGTH, ERROR_CODE_REQUIRED};
use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

// ── Helpers ─────────────────────────────────────────────────────────────

fn field_strategy() -> impl Strategy<Value = Field> {
    prop::sample::select(Field::ALL.to_vec())
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z ]{1,8}",
        "[a-z]{1,6}@[a-z]{1,6}(\\.[a-z]{2,3})?",
        "\\PC{0,10}",
    ]
}

fn key_strategy() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        4 => prop::char::range('a', 'z').prop_map(KeyCode::Char),
        2 => any::<char>().prop_map(KeyCode::Char),
        2 => prop::sample::select(vec![
            '\u{301}',
            '\u{200D}',
            '\u{1F44D}',
            '\u{1F3FD}',
            '\u{1F1FA}',
            '\u{1F1F8}',
        ])
        .prop_map(KeyCode::Char),
        1 => Just(KeyCode::Char('@')),
        1 => Just(KeyCode::Char('.')),
        1 => Just(KeyCode::Backspace),
        1 => Just(KeyCode::Delete),
        1 => Just(KeyCode::Left),
        1 => Just(KeyCode::Right),
        1 => Just(KeyCode::Home),
        1 => Just(KeyCode::End),
        1 => Just(KeyCode::Tab),
        1 => Just(KeyCode::BackTab),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Per-field rules
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn first_name_rule(value in "\\PC{0,10}") {
        let err = validate(Field::FirstName, &value);
        let chars = value.chars().count();
        match err.map(|e| e.code) {
            Some(code) if code == ERROR_CODE_REQUIRED => prop_assert!(value.is_empty()),
            Some(code) if code == ERROR_CODE_MIN_LENGTH => {
                prop_assert!(!value.is_empty() && chars < 5);
            }
            Some(other) => prop_assert!(false, "unexpected code {other}"),
            None => prop_assert!(chars >= 5),
        }
    }

    #[test]
    fn required_iff_empty(field in prop::sample::select(vec![Field::LastName, Field::Email]),
                          value in value_strategy()) {
        let required = validate(field, &value).is_some_and(|e| e.code == ERROR_CODE_REQUIRED);
        prop_assert_eq!(required, value.is_empty());
    }

    #[test]
    fn message_never_errors(value in "\\PC{0,40}") {
        prop_assert!(validate(Field::Message, &value).is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Email shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn whitespace_is_never_a_valid_email(
        left in "[a-z@.]{0,6}",
        ws in prop::sample::select(vec![" ", "\t", "\n"]),
        right in "[a-z@.]{0,6}",
    ) {
        let value = format!("{left}{ws}{right}");
        prop_assert!(validate(Field::Email, &value).is_some());
    }

    #[test]
    fn well_formed_addresses_pass(address in "[a-z0-9+_]{1,8}@[a-z0-9-]{1,8}(\\.[a-z]{1,4}){1,3}") {
        prop_assert!(validate(Field::Email, &address).is_none(), "rejected {}", address);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Submission gating
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn submit_succeeds_iff_all_fields_validate(
        first in value_strategy(),
        last in value_strategy(),
        email in value_strategy(),
        message in value_strategy(),
    ) {
        let mut form = ContactForm::new();
        form.set_value(Field::Message, "seed");
        form.set_value(Field::FirstName, "Seeded");
        form.set_value(Field::LastName, "Value");
        form.set_value(Field::Email, "seed@example.com");
        prop_assert_eq!(form.submit(), SubmitOutcome::Accepted);
        let before = form.snapshot().cloned();

        form.set_value(Field::FirstName, first.clone());
        form.set_value(Field::LastName, last.clone());
        form.set_value(Field::Email, email.clone());
        form.set_value(Field::Message, message.clone());
        let values = form.values().clone();

        let failing = Field::ALL
            .iter()
            .filter(|f| validate(**f, values.get(**f)).is_some())
            .count();

        match form.submit() {
            SubmitOutcome::Accepted => {
                prop_assert_eq!(failing, 0);
                prop_assert_eq!(form.snapshot().map(|s| s.values()), Some(&values));
                prop_assert!(form.values().is_empty());
                prop_assert!(form.errors().is_empty());
            }
            SubmitOutcome::Rejected { errors } => {
                prop_assert_eq!(errors, failing);
                prop_assert_eq!(form.errors().len(), failing);
                prop_assert!(!form.errors().contains(Field::Message));
                prop_assert_eq!(form.snapshot().cloned(), before);
                prop_assert_eq!(form.values(), &values);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Errors track current values
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn errors_match_current_values(
        start in field_strategy(),
        keys in prop::collection::vec(key_strategy(), 0..40),
        submit_midway in any::<bool>(),
    ) {
        let mut form = ContactForm::new();
        form.update(Msg::Focus(start));
        for (i, key) in keys.iter().enumerate() {
            if submit_midway && i == keys.len() / 2 {
                form.update(Msg::Submit);
            }
            form.update(Msg::Key(cform_core::event::KeyEvent::new(*key)));
            if let Some(field) = form.focused() {
                let clusters = form.values().get(field).graphemes(true).count();
                prop_assert!(
                    form.cursor() <= clusters,
                    "cursor {} past {} clusters after {:?}",
                    form.cursor(),
                    clusters,
                    key
                );
            }
        }

        for (field, err) in form.errors().iter() {
            let expected = validate(field, form.values().get(field));
            prop_assert_eq!(Some(err), expected.as_ref());
        }

        let mut frame = cform_render::Frame::new();
        form.view(&mut frame);
        let alerts = frame
            .root()
            .descendants()
            .filter(|n| n.role == Role::Alert)
            .count();
        prop_assert_eq!(alerts, form.errors().len());
    }
}
