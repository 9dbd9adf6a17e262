//! Schema-to-descriptor compiler.
//!
//! Walks the schema IR and produces one `FieldDescriptor` per declared
//! field: render kind, requiredness, localized label/placeholder/option
//! text, visibility rule, and the rule's dependency set. Compilation is
//! deterministic -- the same schema and translator produce an identical
//! descriptor list, in declaration order.
//!
//! Authoring mistakes inside the visibility metadata are handled fail
//! open: a condition referencing a field that does not exist in the schema
//! is dropped with a warning, leaving the field visible rather than
//! crashing the form.

use std::collections::BTreeSet;

use crate::descriptor::{ChoiceOption, FieldDescriptor, FieldKind};
use crate::schema::{FieldDecl, FieldType, SchemaDef};
use crate::translate::Translator;

/// Compile every declared field into a descriptor.
pub fn compile(schema: &SchemaDef, translator: &dyn Translator) -> Vec<FieldDescriptor> {
    let declared: BTreeSet<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
    schema
        .fields
        .iter()
        .map(|field| compile_field(field, &declared, translator))
        .collect()
}

fn compile_field(
    field: &FieldDecl,
    declared: &BTreeSet<&str>,
    translator: &dyn Translator,
) -> FieldDescriptor {
    let (inner, required) = match &field.field_type {
        FieldType::Optional(inner) => (inner.as_ref(), false),
        other => (other, true),
    };

    let kind = match inner {
        FieldType::Text => FieldKind::Text,
        FieldType::Number => FieldKind::Number,
        FieldType::Boolean => FieldKind::Boolean,
        FieldType::Choice(_) => FieldKind::SingleChoice,
        FieldType::Optional(_) => {
            log::warn!(
                "field '{}': nested optional wrapper, rendering as text",
                field.name
            );
            FieldKind::Text
        }
    };

    let options = match inner {
        FieldType::Choice(values) => values
            .iter()
            .map(|value| ChoiceOption {
                label: option_label(&field.name, value, translator),
                value: value.clone(),
            })
            .collect(),
        _ => Vec::new(),
    };

    let label = translator
        .lookup(&format!("field.{}", field.name))
        .unwrap_or_else(|| humanize(&field.name));
    let placeholder = translator.lookup(&format!("field.{}.placeholder", field.name));
    let description = translator.lookup(&format!("field.{}.description", field.name));

    // Conditions referencing undeclared fields are configuration errors;
    // drop them so the field degrades to always-visible.
    let visibility_rule: Vec<_> = field
        .show_conditions
        .iter()
        .filter(|c| {
            let known = declared.contains(c.field.as_str());
            if !known {
                log::warn!(
                    "field '{}': show condition references unknown field '{}', dropping it",
                    field.name,
                    c.field
                );
            }
            known
        })
        .cloned()
        .collect();

    let deps: BTreeSet<String> = visibility_rule.iter().map(|c| c.field.clone()).collect();

    FieldDescriptor {
        name: field.name.clone(),
        kind,
        required,
        options,
        label,
        placeholder,
        description,
        visibility_rule,
        deps,
        secret: field.name.to_lowercase().contains("password"),
    }
}

fn option_label(field_name: &str, value: &str, translator: &dyn Translator) -> String {
    translator
        .lookup(&format!("{}.{}", field_name, value))
        .unwrap_or_else(|| capitalize(value))
}

/// Split a field name on word boundaries (camelCase, snake_case, kebab),
/// lowercase the words, and capitalize the first letter of the result.
/// `phoneNumber` becomes `Phone number`.
fn humanize(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch == '_' || ch == '-' {
            spaced.push(' ');
        } else if ch.is_uppercase() {
            if i > 0 {
                spaced.push(' ');
            }
            spaced.extend(ch.to_lowercase());
        } else {
            spaced.push(ch);
        }
    }
    capitalize(spaced.trim())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
