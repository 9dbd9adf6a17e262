//! Schema IR: the authored form definition.
//!
//! The IR is a tagged-variant representation built once when the schema is
//! authored or parsed. Nothing downstream re-derives type information by
//! structural probing -- the compiler and the session both match on these
//! variants directly.
//!
//! Only direct top-level entries of a definition become fields. Nested
//! composite fields are unsupported; schema authors flatten them.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::condition::Condition;
use crate::error::SchemaError;

/// Declared type of a field. `Optional` wraps the underlying type exactly
/// one level; the compiler unwraps it to find the render kind and marks the
/// field not required.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    /// Enumerated literal set, in declaration order.
    Choice(Vec<String>),
    Optional(Box<FieldType>),
}

/// Per-field validation constraints. All optional; the session checks only
/// what is declared. `pattern` is a regex source string; `digits` demands
/// exactly that many ASCII digits and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub digits: Option<usize>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        *self == Constraints::default()
    }
}

/// One declared field of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub field_type: FieldType,
    pub constraints: Constraints,
    /// Conjunction of visibility conditions; empty = always visible.
    pub show_conditions: Vec<Condition>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> FieldDecl {
        FieldDecl {
            name: name.into(),
            field_type,
            constraints: Constraints::default(),
            show_conditions: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> FieldDecl {
        FieldDecl::new(name, FieldType::Text)
    }

    pub fn number(name: impl Into<String>) -> FieldDecl {
        FieldDecl::new(name, FieldType::Number)
    }

    pub fn boolean(name: impl Into<String>) -> FieldDecl {
        FieldDecl::new(name, FieldType::Boolean)
    }

    pub fn choice<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> FieldDecl {
        FieldDecl::new(
            name,
            FieldType::Choice(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Wrap the declared type in one `Optional` level.
    pub fn optional(mut self) -> FieldDecl {
        self.field_type = FieldType::Optional(Box::new(self.field_type));
        self
    }

    pub fn min_length(mut self, min: usize) -> FieldDecl {
        self.constraints.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> FieldDecl {
        self.constraints.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> FieldDecl {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    pub fn digits(mut self, count: usize) -> FieldDecl {
        self.constraints.digits = Some(count);
        self
    }

    pub fn range(mut self, min: Option<i64>, max: Option<i64>) -> FieldDecl {
        self.constraints.min = min;
        self.constraints.max = max;
        self
    }

    pub fn show_when(mut self, condition: Condition) -> FieldDecl {
        self.show_conditions.push(condition);
        self
    }
}

/// A whole-schema cross-field rule declaration. Each rule carries an
/// explicit error target so the session can attach the failure message to
/// the field the user is expected to fix.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDecl {
    /// The confirm field must repeat the password field, and the password
    /// itself must meet the minimum length. Error targets the confirm
    /// field.
    PasswordConfirmation {
        password: String,
        confirm: String,
        min_length: usize,
    },
    /// When the trigger field currently holds `equals`, the dependent
    /// field must be filled in (and then satisfies its own constraints).
    /// Error targets the dependent field.
    RequiredWhen {
        trigger: String,
        equals: Json,
        field: String,
    },
}

/// The authored schema: field declarations in order, plus cross-field
/// rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDef {
    pub fields: Vec<FieldDecl>,
    pub rules: Vec<RuleDecl>,
}

impl SchemaDef {
    pub fn new() -> SchemaDef {
        SchemaDef::default()
    }

    pub fn field(mut self, decl: FieldDecl) -> SchemaDef {
        self.fields.push(decl);
        self
    }

    pub fn rule(mut self, decl: RuleDecl) -> SchemaDef {
        self.rules.push(decl);
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Parse a schema definition from its JSON form.
    ///
    /// Structural mistakes (missing name or type, duplicate names, unknown
    /// base kinds, malformed rules) are hard errors. Malformed
    /// `showConditions` entries are skipped with a warning -- a broken
    /// visibility bag degrades to "field always shown", never to a parse
    /// failure.
    pub fn from_json(v: &Json) -> Result<SchemaDef, SchemaError> {
        let obj = v.as_object().ok_or(SchemaError::NotAnObject)?;

        let mut fields: Vec<FieldDecl> = Vec::new();
        if let Some(entries) = obj.get("fields").and_then(|f| f.as_array()) {
            for (index, entry) in entries.iter().enumerate() {
                let field = parse_field(entry, index)?;
                if let Some(first) = fields.iter().position(|f| f.name == field.name) {
                    return Err(SchemaError::DuplicateField {
                        name: field.name,
                        first,
                    });
                }
                fields.push(field);
            }
        }

        let mut rules = Vec::new();
        if let Some(entries) = obj.get("rules").and_then(|r| r.as_array()) {
            for entry in entries {
                rules.push(parse_rule(entry)?);
            }
        }

        Ok(SchemaDef { fields, rules })
    }
}

fn parse_field(entry: &Json, index: usize) -> Result<FieldDecl, SchemaError> {
    let obj = entry
        .as_object()
        .ok_or(SchemaError::UnnamedField { index })?;
    let name = obj
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or(SchemaError::UnnamedField { index })?
        .to_string();

    let type_node = obj.get("type").ok_or_else(|| SchemaError::MissingType {
        name: name.clone(),
    })?;
    let field_type = parse_type(type_node, &name)?;

    let constraints = match obj.get("constraints") {
        Some(c) => serde_json::from_value(c.clone()).unwrap_or_else(|e| {
            log::warn!("field '{}': unreadable constraints ({}), ignoring", name, e);
            Constraints::default()
        }),
        None => Constraints::default(),
    };

    let show_conditions = parse_show_conditions(obj.get("showConditions"), &name);

    Ok(FieldDecl {
        name,
        field_type,
        constraints,
        show_conditions,
    })
}

fn parse_type(node: &Json, name: &str) -> Result<FieldType, SchemaError> {
    let obj = node.as_object().ok_or_else(|| SchemaError::MissingType {
        name: name.to_string(),
    })?;
    let base = obj
        .get("base")
        .and_then(|b| b.as_str())
        .ok_or_else(|| SchemaError::MissingType {
            name: name.to_string(),
        })?;

    let inner = match base {
        "text" => FieldType::Text,
        "number" => FieldType::Number,
        "boolean" => FieldType::Boolean,
        "choice" => {
            let values: Vec<String> = obj
                .get("values")
                .and_then(|v| v.as_array())
                .map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(str::to_owned))
                        .collect()
                })
                .unwrap_or_default();
            if values.is_empty() {
                return Err(SchemaError::EmptyChoice {
                    name: name.to_string(),
                });
            }
            FieldType::Choice(values)
        }
        other => {
            return Err(SchemaError::UnknownKind {
                name: name.to_string(),
                base: other.to_string(),
            });
        }
    };

    if obj.get("optional").and_then(|o| o.as_bool()).unwrap_or(false) {
        Ok(FieldType::Optional(Box::new(inner)))
    } else {
        Ok(inner)
    }
}

/// Extract `showConditions` from a field's metadata. Must not raise:
/// absence, a non-array value, or unusable entries all degrade to fewer
/// (or no) conditions, with a diagnostic for the schema author.
fn parse_show_conditions(node: Option<&Json>, name: &str) -> Vec<Condition> {
    let node = match node {
        Some(n) => n,
        None => return Vec::new(),
    };
    let entries = match node.as_array() {
        Some(a) => a,
        None => {
            log::warn!(
                "field '{}': showConditions is not an array, treating as always visible",
                name
            );
            return Vec::new();
        }
    };
    let mut conditions = Vec::new();
    for entry in entries {
        match Condition::from_json(entry) {
            Some(c) => conditions.push(c),
            None => {
                log::warn!("field '{}': skipping malformed show condition {}", name, entry);
            }
        }
    }
    conditions
}

fn parse_rule(entry: &Json) -> Result<RuleDecl, SchemaError> {
    let obj = entry.as_object().ok_or_else(|| SchemaError::MalformedRule {
        message: "rule entry is not an object".to_string(),
    })?;
    let kind = obj
        .get("kind")
        .and_then(|k| k.as_str())
        .ok_or_else(|| SchemaError::MalformedRule {
            message: "rule entry is missing a kind".to_string(),
        })?;

    let get_str = |key: &str| -> Result<String, SchemaError> {
        obj.get(key)
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .ok_or_else(|| SchemaError::MalformedRule {
                message: format!("{} rule is missing '{}'", kind, key),
            })
    };

    match kind {
        "passwordConfirmation" => Ok(RuleDecl::PasswordConfirmation {
            password: get_str("password")?,
            confirm: get_str("confirm")?,
            min_length: obj
                .get("minLength")
                .and_then(|v| v.as_u64())
                .unwrap_or(8) as usize,
        }),
        "requiredWhen" => Ok(RuleDecl::RequiredWhen {
            trigger: get_str("trigger")?,
            equals: obj
                .get("equals")
                .cloned()
                .ok_or_else(|| SchemaError::MalformedRule {
                    message: "requiredWhen rule is missing 'equals'".to_string(),
                })?,
            field: get_str("field")?,
        }),
        other => Err(SchemaError::MalformedRule {
            message: format!("unknown rule kind '{}'", other),
        }),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Operator;

    #[test]
    fn parse_minimal_definition() {
        let schema = SchemaDef::from_json(&serde_json::json!({
            "fields": [
                { "name": "name", "type": { "base": "text" } },
                { "name": "age", "type": { "base": "number", "optional": true } },
                { "name": "newsletter", "type": { "base": "boolean" } },
                { "name": "country", "type": { "base": "choice", "values": ["us", "fr"] } }
            ]
        }))
        .unwrap();

        assert_eq!(schema.fields.len(), 4);
        assert_eq!(schema.fields[0].field_type, FieldType::Text);
        assert_eq!(
            schema.fields[1].field_type,
            FieldType::Optional(Box::new(FieldType::Number))
        );
        assert_eq!(schema.fields[2].field_type, FieldType::Boolean);
        assert_eq!(
            schema.fields[3].field_type,
            FieldType::Choice(vec!["us".to_string(), "fr".to_string()])
        );
    }

    #[test]
    fn parse_constraints_and_conditions() {
        let schema = SchemaDef::from_json(&serde_json::json!({
            "fields": [
                { "name": "country", "type": { "base": "choice", "values": ["us", "fr"] } },
                {
                    "name": "phoneNumber",
                    "type": { "base": "text", "optional": true },
                    "constraints": { "digits": 10 },
                    "showConditions": [
                        { "field": "country", "operator": "equals", "value": "us" }
                    ]
                }
            ]
        }))
        .unwrap();

        let phone = schema.field_by_name("phoneNumber").unwrap();
        assert_eq!(phone.constraints.digits, Some(10));
        assert_eq!(phone.show_conditions.len(), 1);
        assert_eq!(phone.show_conditions[0].operator, Operator::Equals);
    }

    #[test]
    fn malformed_show_conditions_degrade_to_none() {
        let schema = SchemaDef::from_json(&serde_json::json!({
            "fields": [
                {
                    "name": "a",
                    "type": { "base": "text" },
                    "showConditions": "not an array"
                },
                {
                    "name": "b",
                    "type": { "base": "text" },
                    "showConditions": [ { "field": "a" }, 42 ]
                }
            ]
        }))
        .unwrap();

        assert!(schema.fields[0].show_conditions.is_empty());
        assert!(schema.fields[1].show_conditions.is_empty());
    }

    #[test]
    fn unreadable_constraints_degrade_to_default() {
        let schema = SchemaDef::from_json(&serde_json::json!({
            "fields": [
                {
                    "name": "a",
                    "type": { "base": "text" },
                    "constraints": { "minLength": "six" }
                }
            ]
        }))
        .unwrap();
        assert!(schema.fields[0].constraints.is_empty());
    }

    #[test]
    fn duplicate_field_name_rejected() {
        let err = SchemaDef::from_json(&serde_json::json!({
            "fields": [
                { "name": "a", "type": { "base": "text" } },
                { "name": "a", "type": { "base": "number" } }
            ]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn unknown_base_kind_rejected() {
        let err = SchemaDef::from_json(&serde_json::json!({
            "fields": [ { "name": "a", "type": { "base": "matrix" } } ]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownKind { .. }));
    }

    #[test]
    fn empty_choice_rejected() {
        let err = SchemaDef::from_json(&serde_json::json!({
            "fields": [ { "name": "a", "type": { "base": "choice", "values": [] } } ]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::EmptyChoice { .. }));
    }

    #[test]
    fn parse_rules() {
        let schema = SchemaDef::from_json(&serde_json::json!({
            "fields": [
                { "name": "password", "type": { "base": "text" } },
                { "name": "repeatPassword", "type": { "base": "text" } }
            ],
            "rules": [
                {
                    "kind": "passwordConfirmation",
                    "password": "password",
                    "confirm": "repeatPassword",
                    "minLength": 6
                },
                {
                    "kind": "requiredWhen",
                    "trigger": "country",
                    "equals": "us",
                    "field": "phoneNumber"
                }
            ]
        }))
        .unwrap();

        assert_eq!(schema.rules.len(), 2);
        assert_eq!(
            schema.rules[0],
            RuleDecl::PasswordConfirmation {
                password: "password".to_string(),
                confirm: "repeatPassword".to_string(),
                min_length: 6,
            }
        );
    }

    #[test]
    fn unknown_rule_kind_rejected() {
        let err = SchemaDef::from_json(&serde_json::json!({
            "fields": [],
            "rules": [ { "kind": "sumsToOneHundred" } ]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::MalformedRule { .. }));
    }

    #[test]
    fn builder_matches_parsed_form() {
        let built = SchemaDef::new()
            .field(FieldDecl::choice("country", ["us", "fr"]))
            .field(
                FieldDecl::text("phoneNumber")
                    .optional()
                    .pattern("^[0-9]{10}$")
                    .show_when(Condition::equals("country", serde_json::json!("us"))),
            );

        let parsed = SchemaDef::from_json(&serde_json::json!({
            "fields": [
                { "name": "country", "type": { "base": "choice", "values": ["us", "fr"] } },
                {
                    "name": "phoneNumber",
                    "type": { "base": "text", "optional": true },
                    "constraints": { "pattern": "^[0-9]{10}$" },
                    "showConditions": [
                        { "field": "country", "operator": "equals", "value": "us" }
                    ]
                }
            ]
        }))
        .unwrap();

        assert_eq!(built, parsed);
    }
}
