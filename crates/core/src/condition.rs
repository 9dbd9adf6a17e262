//! Declarative visibility conditions.
//!
//! A condition compares another field's current value against a literal.
//! Conditions are authored in the schema definition (`showConditions`) and
//! evaluated at runtime by the session's visibility evaluator. The full
//! rule attached to a field is a conjunction of conditions.

use serde_json::Value as Json;

/// Comparison operator of a visibility condition.
///
/// Operators this compiler does not recognize are preserved as `Other` and
/// evaluate as satisfied (fail open) so a schema authored against a newer
/// operator set degrades to "field always shown" instead of blocking
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    IsTrue,
    IsFalse,
    Other(String),
}

impl Operator {
    /// Parse an operator from its schema definition spelling.
    pub fn parse(s: &str) -> Operator {
        match s {
            "equals" => Operator::Equals,
            "notEquals" => Operator::NotEquals,
            "contains" => Operator::Contains,
            "notContains" => Operator::NotContains,
            "isTrue" => Operator::IsTrue,
            "isFalse" => Operator::IsFalse,
            other => Operator::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::Contains => "contains",
            Operator::NotContains => "notContains",
            Operator::IsTrue => "isTrue",
            Operator::IsFalse => "isFalse",
            Operator::Other(s) => s,
        }
    }
}

/// A single visibility test: compare the named field's value against
/// `value` using `operator`. Unary operators (isTrue, isFalse) carry no
/// literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: Option<Json>,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: Option<Json>) -> Condition {
        Condition {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Shorthand for an equality condition.
    pub fn equals(field: impl Into<String>, value: Json) -> Condition {
        Condition::new(field, Operator::Equals, Some(value))
    }

    /// Shorthand for a boolean-true condition.
    pub fn is_true(field: impl Into<String>) -> Condition {
        Condition::new(field, Operator::IsTrue, None)
    }

    /// Parse a condition from its schema definition JSON object.
    ///
    /// Returns `None` when the entry is structurally unusable (not an
    /// object, or missing `field`/`operator`). Callers treat a `None` as
    /// "skip this condition" -- metadata extraction must not raise.
    pub fn from_json(v: &Json) -> Option<Condition> {
        let obj = v.as_object()?;
        let field = obj.get("field")?.as_str()?;
        let operator = Operator::parse(obj.get("operator")?.as_str()?);
        let value = obj.get("value").cloned();
        Some(Condition::new(field, operator, value))
    }

    /// Serialize to the schema definition JSON shape.
    pub fn to_json(&self) -> Json {
        let mut obj = serde_json::Map::new();
        obj.insert("field".to_string(), Json::String(self.field.clone()));
        obj.insert(
            "operator".to_string(),
            Json::String(self.operator.as_str().to_string()),
        );
        if let Some(v) = &self.value {
            obj.insert("value".to_string(), v.clone());
        }
        Json::Object(obj)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
