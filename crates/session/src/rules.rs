//! Cross-field validation checks.
//!
//! Each check spans more than one field but attaches its failure message
//! to a single target field, so the user sees the error next to the field
//! they are expected to fix. Checks expose the set of fields they read so
//! the session can run only the affected checks on a value change.

use std::collections::BTreeSet;

use formwork_core::{RuleDecl, Translator};
use serde_json::Value as Json;

use crate::predicates;
use crate::value::ValueMap;

/// Runtime form of a [`RuleDecl`].
#[derive(Debug, Clone, PartialEq)]
pub enum CrossFieldCheck {
    PasswordConfirmation {
        password: String,
        confirm: String,
        min_length: usize,
    },
    RequiredWhen {
        trigger: String,
        equals: Json,
        field: String,
    },
}

impl CrossFieldCheck {
    pub fn from_decl(decl: &RuleDecl) -> CrossFieldCheck {
        match decl {
            RuleDecl::PasswordConfirmation {
                password,
                confirm,
                min_length,
            } => CrossFieldCheck::PasswordConfirmation {
                password: password.clone(),
                confirm: confirm.clone(),
                min_length: *min_length,
            },
            RuleDecl::RequiredWhen {
                trigger,
                equals,
                field,
            } => CrossFieldCheck::RequiredWhen {
                trigger: trigger.clone(),
                equals: equals.clone(),
                field: field.clone(),
            },
        }
    }

    /// The field the failure message attaches to.
    pub fn target(&self) -> &str {
        match self {
            CrossFieldCheck::PasswordConfirmation { confirm, .. } => confirm,
            CrossFieldCheck::RequiredWhen { field, .. } => field,
        }
    }

    /// Every field this check reads. A change to any of these re-runs the
    /// check.
    pub fn touches(&self) -> BTreeSet<&str> {
        match self {
            CrossFieldCheck::PasswordConfirmation {
                password, confirm, ..
            } => [password.as_str(), confirm.as_str()].into_iter().collect(),
            CrossFieldCheck::RequiredWhen { trigger, field, .. } => {
                [trigger.as_str(), field.as_str()].into_iter().collect()
            }
        }
    }

    /// A field whose own validation must be re-run whenever this check is
    /// evaluated. A conditionally required field's error has to track its
    /// requiredness, which changes with the trigger value, not only with
    /// the field's own value.
    pub fn revalidates(&self) -> Option<&str> {
        match self {
            CrossFieldCheck::RequiredWhen { field, .. } => Some(field),
            CrossFieldCheck::PasswordConfirmation { .. } => None,
        }
    }

    /// Evaluate against the full value map. True means the check passes.
    pub fn evaluate(&self, values: &ValueMap) -> bool {
        match self {
            CrossFieldCheck::PasswordConfirmation {
                password,
                confirm,
                min_length,
            } => {
                let pw = values
                    .get(password)
                    .and_then(|v| v.as_text())
                    .unwrap_or("");
                let rp = values.get(confirm).and_then(|v| v.as_text()).unwrap_or("");
                predicates::min_length(pw, *min_length) && pw == rp
            }
            CrossFieldCheck::RequiredWhen {
                trigger,
                equals,
                field,
            } => {
                let triggered = values
                    .get(trigger)
                    .map(|v| v.matches_json(equals))
                    .unwrap_or(false);
                if !triggered {
                    return true;
                }
                values.get(field).map(predicates::non_empty).unwrap_or(false)
            }
        }
    }

    /// Localized failure message for the target field.
    pub fn message(&self, translator: &dyn Translator) -> String {
        match self {
            CrossFieldCheck::PasswordConfirmation { min_length, .. } => translator.translate(
                "error.passwordConfirmation",
                Some("Passwords must match and be at least {min} characters"),
                &[("min", &min_length.to_string())],
            ),
            CrossFieldCheck::RequiredWhen { .. } => translator.translate(
                "error.requiredWhen",
                Some("This field is required"),
                &[],
            ),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
