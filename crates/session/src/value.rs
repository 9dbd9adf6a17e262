//! Runtime field values.
//!
//! Values are what the user has typed or picked, keyed by field name.
//! Numbers use `rust_decimal::Decimal` -- never `f64`.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::Value as Json;

/// Current value of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Number(Decimal),
    Bool(bool),
    /// Selected literal of a single-choice field.
    Choice(String),
}

/// Mapping from field name to its current value. Fields the user has not
/// touched are simply absent.
pub type ValueMap = BTreeMap<String, Value>;

impl Value {
    pub fn text(s: impl Into<String>) -> Value {
        Value::Text(s.into())
    }

    pub fn choice(s: impl Into<String>) -> Value {
        Value::Choice(s.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "Text",
            Value::Number(_) => "Number",
            Value::Bool(_) => "Bool",
            Value::Choice(_) => "Choice",
        }
    }

    /// The textual content, for values that are text-shaped. A selected
    /// choice literal counts as text for substring conditions.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value counts as "filled in" for requiredness. Booleans
    /// and numbers are always filled; text and choice are filled when
    /// non-blank.
    pub fn is_filled(&self) -> bool {
        match self {
            Value::Text(s) | Value::Choice(s) => !s.trim().is_empty(),
            Value::Number(_) | Value::Bool(_) => true,
        }
    }

    /// Compare against a condition literal from the schema definition.
    pub fn matches_json(&self, literal: &Json) -> bool {
        match (self, literal) {
            (Value::Text(s), Json::String(l)) | (Value::Choice(s), Json::String(l)) => s == l,
            (Value::Bool(b), Json::Bool(l)) => b == l,
            (Value::Number(n), Json::Number(l)) => {
                Decimal::from_str(&l.to_string()).map_or(false, |d| *n == d)
            }
            (Value::Number(n), Json::String(l)) => {
                Decimal::from_str(l).map_or(false, |d| *n == d)
            }
            _ => false,
        }
    }

    /// Parse a value from JSON, e.g. when seeding defaults. `None` for
    /// shapes no field kind produces (arrays, objects, null).
    pub fn from_json(v: &Json) -> Option<Value> {
        match v {
            Json::String(s) => Some(Value::Text(s.clone())),
            Json::Bool(b) => Some(Value::Bool(*b)),
            Json::Number(n) => Decimal::from_str(&n.to_string()).ok().map(Value::Number),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Json {
        match self {
            Value::Text(s) | Value::Choice(s) => Json::String(s.clone()),
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => Json::String(n.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Number(Decimal::from(n))
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
