//! Live form session.
//!
//! A `FormSession` owns one form's runtime state: current values, the
//! visible field set, per-field localized errors, and whole-form
//! validity. Every mutation is a single synchronous transition -- by the
//! time a call returns, visibility, errors, and validity all reflect the
//! new values. Sessions share nothing; concurrent forms each own an
//! independent session.
//!
//! Policy on hidden fields: hiding never clears data. A hidden field
//! keeps its last-known value, conditions over it still read that value,
//! and submit hands the complete value map to the callback, hidden
//! fields included. Consumers that want purging call `reset` or set the
//! value explicitly.

use std::collections::{BTreeMap, BTreeSet};

use formwork_core::{compile, Constraints, FieldDescriptor, SchemaDef, Translator};

use crate::rules::CrossFieldCheck;
use crate::validate;
use crate::value::{Value, ValueMap};
use crate::visibility;

/// Rejection returned by [`FormSession::submit`]. A control-flow signal,
/// not a fault: the form simply is not valid yet.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("form has validation errors")]
    Invalid,
}

pub struct FormSession {
    schema: SchemaDef,
    translator: Box<dyn Translator>,
    descriptors: Vec<FieldDescriptor>,
    checks: Vec<CrossFieldCheck>,
    defaults: ValueMap,
    values: ValueMap,
    errors: BTreeMap<String, String>,
    visible: BTreeSet<String>,
    is_valid: bool,
}

impl FormSession {
    /// Compile the schema and start a session with the given defaults.
    /// Runs an initial full validation pass, so `errors` and `is_valid`
    /// are meaningful before the first edit.
    pub fn new(
        schema: SchemaDef,
        translator: Box<dyn Translator>,
        defaults: ValueMap,
    ) -> FormSession {
        let descriptors = compile(&schema, translator.as_ref());
        let checks = schema.rules.iter().map(CrossFieldCheck::from_decl).collect();

        let mut defaults_kept = ValueMap::new();
        for (name, value) in defaults {
            if schema.field_by_name(&name).is_some() {
                defaults_kept.insert(name, value);
            } else {
                log::warn!("ignoring default for undeclared field '{}'", name);
            }
        }

        let visible = visibility::visible_set(&descriptors, &defaults_kept);
        let mut session = FormSession {
            schema,
            translator,
            descriptors,
            checks,
            values: defaults_kept.clone(),
            defaults: defaults_kept,
            errors: BTreeMap::new(),
            visible,
            is_valid: false,
        };
        session.revalidate_all();
        session
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn schema(&self) -> &SchemaDef {
        &self.schema
    }

    /// All compiled descriptors, in declaration order.
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// Descriptors of currently visible fields, in declaration order.
    pub fn visible_descriptors(&self) -> Vec<&FieldDescriptor> {
        self.descriptors
            .iter()
            .filter(|d| self.visible.contains(&d.name))
            .collect()
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn visible(&self) -> &BTreeSet<String> {
        &self.visible
    }

    pub fn is_visible(&self, field: &str) -> bool {
        self.visible.contains(field)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn locale(&self) -> &str {
        self.translator.locale()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Record a user edit. Recomputes visibility of dependent fields,
    /// re-validates the changed field and every cross-field check that
    /// reads it, and refreshes whole-form validity -- all before
    /// returning.
    pub fn set_value(&mut self, field: &str, value: Value) {
        if self.schema.field_by_name(field).is_none() {
            log::warn!("ignoring value for undeclared field '{}'", field);
            return;
        }
        self.values.insert(field.to_string(), value);

        // Only fields whose visibility rule reads the changed field can
        // change visibility; their dependency sets were compiled up front.
        let affected: Vec<(String, bool)> = self
            .descriptors
            .iter()
            .filter(|d| d.deps.contains(field))
            .map(|d| {
                (
                    d.name.clone(),
                    visibility::is_visible(&d.visibility_rule, &self.values),
                )
            })
            .collect();
        for (name, now_visible) in affected {
            let was_visible = self.visible.contains(&name);
            if now_visible && !was_visible {
                self.visible.insert(name.clone());
                self.revalidate_field(&name);
            } else if !now_visible && was_visible {
                self.visible.remove(&name);
                self.errors.remove(&name);
            }
        }

        self.revalidate_field(field);

        let touched: Vec<CrossFieldCheck> = self
            .checks
            .iter()
            .filter(|c| c.touches().contains(field))
            .cloned()
            .collect();
        for check in &touched {
            self.apply_check(check);
        }

        self.refresh_validity();
    }

    /// Swap in a translator for another locale. Labels, option labels,
    /// placeholders, and error messages are locale-dependent, so the
    /// descriptors are recompiled and the whole form re-validated;
    /// existing errors switch language without the user re-editing.
    /// Values survive the recompile untouched.
    pub fn set_translator(&mut self, translator: Box<dyn Translator>) {
        self.translator = translator;
        self.descriptors = compile(&self.schema, self.translator.as_ref());
        self.visible = visibility::visible_set(&self.descriptors, &self.values);
        self.revalidate_all();
    }

    /// Restore the original defaults, clear all errors, recompute
    /// visibility. Errors stay cleared until the next edit or submit
    /// gating consults `is_valid`, which is recomputed here.
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.errors.clear();
        self.visible = visibility::visible_set(&self.descriptors, &self.values);
        self.refresh_validity();
    }

    /// Gated submit: invokes the callback exactly once with the full
    /// value snapshot (hidden fields included) when the form is valid,
    /// otherwise rejects without invoking it.
    pub fn submit<F: FnOnce(&ValueMap)>(&self, callback: F) -> Result<(), SubmitError> {
        if !self.is_valid {
            return Err(SubmitError::Invalid);
        }
        callback(&self.values);
        Ok(())
    }

    // ── Internal recompute steps ─────────────────────────────────────

    /// Bring one field's error slot in line with its current value and
    /// visibility. Hidden fields carry no error.
    fn revalidate_field(&mut self, name: &str) {
        if !self.visible.contains(name) {
            self.errors.remove(name);
            return;
        }
        let none = Constraints::default();
        let constraints = self
            .schema
            .field_by_name(name)
            .map(|f| &f.constraints)
            .unwrap_or(&none);
        let message = self
            .descriptors
            .iter()
            .find(|d| d.name == name)
            .and_then(|d| {
                validate::validate_field(
                    d,
                    constraints,
                    self.values.get(name),
                    self.translator.as_ref(),
                )
            });
        match message {
            Some(msg) => {
                self.errors.insert(name.to_string(), msg);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    /// Re-run one cross-field check and sync its target field's error.
    /// The dependent field is re-validated first: its requiredness can
    /// change with the trigger value even when its own value did not.
    /// Field-local errors take precedence over the check's message.
    fn apply_check(&mut self, check: &CrossFieldCheck) {
        if let Some(dependent) = check.revalidates() {
            let dependent = dependent.to_string();
            self.revalidate_field(&dependent);
        }
        let target = check.target().to_string();
        self.revalidate_field(&target);
        if !check.evaluate(&self.values)
            && self.visible.contains(&target)
            && !self.errors.contains_key(&target)
        {
            let message = check.message(self.translator.as_ref());
            self.errors.insert(target, message);
        }
    }

    /// Full pass: rebuild every error slot, then refresh validity.
    fn revalidate_all(&mut self) {
        self.errors.clear();
        let names: Vec<String> = self.descriptors.iter().map(|d| d.name.clone()).collect();
        for name in &names {
            self.revalidate_field(name);
        }
        let checks = self.checks.clone();
        for check in &checks {
            self.apply_check(check);
        }
        self.refresh_validity();
    }

    fn refresh_validity(&mut self) {
        self.is_valid = validate::form_is_valid(
            &self.descriptors,
            &self.schema,
            &self.checks,
            &self.values,
            &self.visible,
        );
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
