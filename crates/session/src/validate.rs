//! Field-local validation pass.
//!
//! Checks one field's current value against its requiredness and declared
//! constraints. The outcome is split in two layers: `check_field` returns
//! a typed [`Violation`] (pure, locale-independent), and
//! `violation_message` renders it through the translator. Whole-form
//! validity is recomputed from the typed layer so it never depends on the
//! active locale.

use std::collections::BTreeSet;

use formwork_core::{Constraints, FieldDescriptor, SchemaDef, Translator};

use crate::predicates;
use crate::rules::CrossFieldCheck;
use crate::value::{Value, ValueMap};

/// A failed field-local check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Digits(usize),
    Pattern,
    Min(i64),
    Max(i64),
}

/// Check a field's value. `None` means the field passes. An absent or
/// blank value violates only requiredness; constraints apply once a value
/// is filled in, optional fields included.
pub fn check_field(
    required: bool,
    constraints: &Constraints,
    value: Option<&Value>,
) -> Option<Violation> {
    let v = match value {
        Some(v) if predicates::non_empty(v) => v,
        _ => return required.then_some(Violation::Required),
    };

    if let Some(text) = v.as_text() {
        if let Some(min) = constraints.min_length {
            if !predicates::min_length(text, min) {
                return Some(Violation::MinLength(min));
            }
        }
        if let Some(max) = constraints.max_length {
            if !predicates::max_length(text, max) {
                return Some(Violation::MaxLength(max));
            }
        }
        if let Some(count) = constraints.digits {
            if !predicates::exact_digits(text, count) {
                return Some(Violation::Digits(count));
            }
        }
        if let Some(pattern) = &constraints.pattern {
            if !predicates::matches_pattern(text, pattern) {
                return Some(Violation::Pattern);
            }
        }
    }

    if let Value::Number(n) = v {
        if let Some(min) = constraints.min {
            if !predicates::in_range(n, Some(min), None) {
                return Some(Violation::Min(min));
            }
        }
        if let Some(max) = constraints.max {
            if !predicates::in_range(n, None, Some(max)) {
                return Some(Violation::Max(max));
            }
        }
    }

    None
}

pub fn violation_message(violation: &Violation, translator: &dyn Translator) -> String {
    match violation {
        Violation::Required => {
            translator.translate("error.required", Some("This field is required"), &[])
        }
        Violation::MinLength(min) => translator.translate(
            "error.minLength",
            Some("Must be at least {min} characters"),
            &[("min", &min.to_string())],
        ),
        Violation::MaxLength(max) => translator.translate(
            "error.maxLength",
            Some("Must be at most {max} characters"),
            &[("max", &max.to_string())],
        ),
        Violation::Digits(count) => translator.translate(
            "error.digits",
            Some("Must be exactly {count} digits"),
            &[("count", &count.to_string())],
        ),
        Violation::Pattern => {
            translator.translate("error.pattern", Some("Invalid format"), &[])
        }
        Violation::Min(min) => translator.translate(
            "error.min",
            Some("Must be at least {min}"),
            &[("min", &min.to_string())],
        ),
        Violation::Max(max) => translator.translate(
            "error.max",
            Some("Must be at most {max}"),
            &[("max", &max.to_string())],
        ),
    }
}

/// Check a field and render the failure, if any.
pub fn validate_field(
    descriptor: &FieldDescriptor,
    constraints: &Constraints,
    value: Option<&Value>,
    translator: &dyn Translator,
) -> Option<String> {
    check_field(descriptor.required, constraints, value)
        .map(|v| violation_message(&v, translator))
}

/// Whole-form validity: every visible field passes its local checks and
/// every cross-field check holds. Hidden fields never block validity.
pub fn form_is_valid(
    descriptors: &[FieldDescriptor],
    schema: &SchemaDef,
    checks: &[CrossFieldCheck],
    values: &ValueMap,
    visible: &BTreeSet<String>,
) -> bool {
    let none = Constraints::default();
    let fields_ok = descriptors
        .iter()
        .filter(|d| visible.contains(&d.name))
        .all(|d| {
            let constraints = schema
                .field_by_name(&d.name)
                .map(|f| &f.constraints)
                .unwrap_or(&none);
            check_field(d.required, constraints, values.get(&d.name)).is_none()
        });
    fields_ok && checks.iter().all(|c| c.evaluate(values))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
