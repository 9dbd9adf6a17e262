//! Compiled field descriptors.
//!
//! A `FieldDescriptor` is the renderer-agnostic description of one form
//! field: everything a widget layer needs to pick and populate an input
//! control, with all user-facing text already resolved for the active
//! locale. Descriptors are immutable between recompiles; the session
//! rebuilds them when the schema or the locale changes.

use std::collections::BTreeSet;

use serde_json::Value as Json;

use crate::condition::Condition;

/// Render kind of a field, derived from its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    SingleChoice,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::SingleChoice => "single-choice",
        }
    }
}

/// One selectable option of a single-choice field: the localized label and
/// the raw literal value, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

/// Compiled description of one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Present only for single-choice kind.
    pub options: Vec<ChoiceOption>,
    /// Resolved localized label. Falls back to a humanized field name.
    pub label: String,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    /// Conjunction of visibility conditions; empty = always visible.
    pub visibility_rule: Vec<Condition>,
    /// Field names the visibility rule reads, computed at compile time so
    /// the session can recompute only affected fields on a value change.
    pub deps: BTreeSet<String>,
    /// Masked-input hint for the consuming widget.
    pub secret: bool,
}

impl FieldDescriptor {
    pub fn always_visible(&self) -> bool {
        self.visibility_rule.is_empty()
    }

    /// Serialize for a widget layer that consumes descriptors as JSON.
    pub fn to_json(&self) -> Json {
        serde_json::json!({
            "name": self.name,
            "kind": self.kind.as_str(),
            "required": self.required,
            "options": self
                .options
                .iter()
                .map(|o| serde_json::json!({ "label": o.label, "value": o.value }))
                .collect::<Vec<_>>(),
            "label": self.label,
            "placeholder": self.placeholder,
            "description": self.description,
            "showConditions": self
                .visibility_rule
                .iter()
                .map(Condition::to_json)
                .collect::<Vec<_>>(),
            "secret": self.secret,
        })
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
