//! End-to-end form flows: JSON definition -> compiled descriptors ->
//! live session transitions.

use formwork_core::{SchemaDef, StaticCatalog};
use formwork_session::{FormSession, SubmitError, Value, ValueMap};

fn signup_definition() -> SchemaDef {
    SchemaDef::from_json(&serde_json::json!({
        "fields": [
            {
                "name": "name",
                "type": { "base": "text" },
                "constraints": { "minLength": 3 }
            },
            {
                "name": "country",
                "type": { "base": "choice", "values": ["us", "fr"] }
            },
            {
                "name": "phoneNumber",
                "type": { "base": "text", "optional": true },
                "constraints": { "digits": 10 },
                "showConditions": [
                    { "field": "country", "operator": "equals", "value": "us" }
                ]
            },
            { "name": "password", "type": { "base": "text" } },
            { "name": "repeatPassword", "type": { "base": "text" } }
        ],
        "rules": [
            {
                "kind": "requiredWhen",
                "trigger": "country",
                "equals": "us",
                "field": "phoneNumber"
            },
            {
                "kind": "passwordConfirmation",
                "password": "password",
                "confirm": "repeatPassword",
                "minLength": 6
            }
        ]
    }))
    .expect("definition parses")
}

fn catalog() -> StaticCatalog {
    StaticCatalog::new("en")
        .insert("en", "field.name", "Name")
        .insert("en", "error.minLength", "Must be at least {min} characters")
        .insert("fr", "field.name", "Nom")
        .insert("fr", "error.minLength", "Au moins {min} caract\u{e8}res")
        .insert("fr", "error.required", "Ce champ est obligatoire")
}

fn filled_session() -> FormSession {
    let mut s = FormSession::new(signup_definition(), Box::new(catalog()), ValueMap::new());
    s.set_value("name", Value::text("Ada"));
    s.set_value("country", Value::choice("fr"));
    s.set_value("password", Value::text("123456"));
    s.set_value("repeatPassword", Value::text("123456"));
    s
}

#[test]
fn conditional_phone_field_gates_validity() {
    let mut s = filled_session();

    // country = fr: phone hidden, form valid without it.
    assert!(!s.is_visible("phoneNumber"));
    assert!(s.is_valid());

    // country = us, phone left empty: invalid, error targets the phone.
    s.set_value("country", Value::choice("us"));
    assert!(s.is_visible("phoneNumber"));
    assert!(!s.is_valid());
    assert!(s.error("phoneNumber").is_some());
    assert!(s.error("country").is_none());

    // A filled-in phone still has to be exactly ten digits.
    s.set_value("phoneNumber", Value::text("555-0100"));
    assert!(!s.is_valid());
    assert!(s.error("phoneNumber").is_some());

    s.set_value("phoneNumber", Value::text("5550100999"));
    assert!(s.is_valid());
}

#[test]
fn password_mismatch_targets_confirmation_field() {
    let mut s = filled_session();
    s.set_value("repeatPassword", Value::text("1234"));

    assert!(!s.is_valid());
    assert!(s.error("repeatPassword").is_some());
    assert!(s.error("password").is_none());

    s.set_value("repeatPassword", Value::text("123456"));
    assert!(s.is_valid());
    assert!(s.error("repeatPassword").is_none());
}

#[test]
fn editing_password_resyncs_confirmation_error() {
    let mut s = filled_session();
    assert!(s.is_valid());

    // The confirmation field itself never changes; editing the password
    // alone must raise and then clear the error on the confirmation.
    s.set_value("password", Value::text("different1"));
    assert!(s.error("repeatPassword").is_some());

    s.set_value("password", Value::text("123456"));
    assert!(s.error("repeatPassword").is_none());
    assert!(s.is_valid());
}

#[test]
fn choice_descriptor_carries_all_options_in_order() {
    let schema = SchemaDef::from_json(&serde_json::json!({
        "fields": [
            {
                "name": "plan",
                "type": {
                    "base": "choice",
                    "values": ["free", "starter", "pro", "team", "enterprise"]
                }
            }
        ]
    }))
    .unwrap();

    let translated = StaticCatalog::new("en")
        .insert("en", "plan.free", "Free forever")
        .insert("en", "plan.pro", "Professional");
    let s = FormSession::new(schema, Box::new(translated), ValueMap::new());

    let plan = &s.descriptors()[0];
    let values: Vec<_> = plan.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["free", "starter", "pro", "team", "enterprise"]);
    assert_eq!(plan.options[0].label, "Free forever");
    assert_eq!(plan.options[2].label, "Professional");
    // Untranslated literals fall back to their capitalized form.
    assert_eq!(plan.options[1].label, "Starter");
}

#[test]
fn locale_switch_retranslates_live_error() {
    let mut s = filled_session();
    s.set_value("name", Value::text("Al"));
    assert_eq!(s.error("name"), Some("Must be at least 3 characters"));
    let was_valid = s.is_valid();

    s.set_translator(Box::new(catalog().for_locale("fr")));
    assert_eq!(s.error("name"), Some("Au moins 3 caract\u{e8}res"));
    assert_eq!(s.is_valid(), was_valid);

    // Round trip back to English restores the original text.
    s.set_translator(Box::new(catalog().for_locale("en")));
    assert_eq!(s.error("name"), Some("Must be at least 3 characters"));
}

#[test]
fn submit_gating_and_snapshot() {
    let mut s = filled_session();
    s.set_value("name", Value::text(""));

    let mut calls = 0;
    assert!(matches!(
        s.submit(|_| calls += 1),
        Err(SubmitError::Invalid)
    ));
    assert_eq!(calls, 0);

    s.set_value("name", Value::text("Ada"));
    s.submit(|values| {
        calls += 1;
        assert_eq!(values.get("name"), Some(&Value::text("Ada")));
        assert_eq!(values.get("country"), Some(&Value::choice("fr")));
    })
    .unwrap();
    assert_eq!(calls, 1);
}

#[test]
fn dangling_condition_reference_leaves_field_visible() {
    let schema = SchemaDef::from_json(&serde_json::json!({
        "fields": [
            {
                "name": "notes",
                "type": { "base": "text", "optional": true },
                "showConditions": [
                    { "field": "deletedField", "operator": "equals", "value": "x" }
                ]
            }
        ]
    }))
    .unwrap();

    let s = FormSession::new(schema, Box::new(catalog()), ValueMap::new());
    assert!(s.is_visible("notes"));
    assert!(s.is_valid());
}
