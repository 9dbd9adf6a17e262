//! Visibility evaluator.
//!
//! A field's visibility rule is a conjunction of conditions over the
//! current values of other fields. Evaluation is pure: the same value map
//! and rule always produce the same answer, and nothing here mutates
//! state. Short-circuiting on the first failed condition is safe for the
//! same reason.
//!
//! A condition may reference a field that is itself currently hidden; it
//! still reads that field's last-known value. Hiding is a rendering
//! decision, not a data-clearing one.

use std::collections::BTreeSet;

use formwork_core::{Condition, FieldDescriptor, Operator};

use crate::value::{Value, ValueMap};

/// Evaluate a visibility rule. Empty rule means always visible.
pub fn is_visible(rule: &[Condition], values: &ValueMap) -> bool {
    rule.iter().all(|c| condition_holds(c, values))
}

/// Compute the set of currently visible field names.
pub fn visible_set(descriptors: &[FieldDescriptor], values: &ValueMap) -> BTreeSet<String> {
    descriptors
        .iter()
        .filter(|d| is_visible(&d.visibility_rule, values))
        .map(|d| d.name.clone())
        .collect()
}

fn condition_holds(condition: &Condition, values: &ValueMap) -> bool {
    let value = values.get(&condition.field);
    match &condition.operator {
        Operator::Equals => match (&condition.value, value) {
            (Some(literal), Some(v)) => v.matches_json(literal),
            _ => false,
        },
        Operator::NotEquals => match (&condition.value, value) {
            (Some(literal), Some(v)) => !v.matches_json(literal),
            // An unset field equals nothing.
            (Some(_), None) => true,
            (None, _) => true,
        },
        Operator::Contains => substring(value, condition, false),
        Operator::NotContains => substring(value, condition, true),
        Operator::IsTrue => matches!(value, Some(Value::Bool(true))),
        Operator::IsFalse => matches!(value, Some(Value::Bool(false))),
        Operator::Other(op) => {
            // Fail open so a schema authored against a newer operator set
            // still renders; the diagnostic keeps it from going unnoticed.
            log::warn!(
                "unknown visibility operator '{}' on field '{}', treating as satisfied",
                op,
                condition.field
            );
            true
        }
    }
}

/// `contains`/`notContains` apply only to text-shaped values with a
/// string literal; anything else fails the condition either way.
fn substring(value: Option<&Value>, condition: &Condition, negate: bool) -> bool {
    let needle = match condition.value.as_ref().and_then(|v| v.as_str()) {
        Some(s) => s,
        None => return false,
    };
    match value.and_then(Value::as_text) {
        Some(text) => text.contains(needle) != negate,
        None => false,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
