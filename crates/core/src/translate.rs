//! Translator trait and a static catalog implementation.
//!
//! A `Translator` supplies localized strings for field labels, option
//! labels, and validation messages. The compiler and the session consume
//! it as a pure lookup -- implementations front whatever localization
//! system the embedder uses. A translator is bound to one locale; locale
//! switching hands the session a new translator.

use std::collections::BTreeMap;

/// Locale-bound supplier of localized strings.
///
/// `lookup` is the only required method. `translate` never fails: a
/// missing key falls back to `default`, then to the raw key, and `{name}`
/// placeholders are substituted from `vars` either way.
pub trait Translator {
    /// Raw catalog lookup. `None` when the key has no translation.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Identifier of the locale this translator serves (e.g. "en").
    fn locale(&self) -> &str;

    fn translate(&self, key: &str, default: Option<&str>, vars: &[(&str, &str)]) -> String {
        let text = match self.lookup(key) {
            Some(t) => t,
            None => {
                log::debug!("no '{}' translation for key '{}'", self.locale(), key);
                match default {
                    Some(d) => d.to_string(),
                    None => key.to_string(),
                }
            }
        };
        substitute(&text, vars)
    }
}

/// Replace `{name}`-style placeholders with values from `vars`.
/// Placeholders without a matching var are left as-is.
fn substitute(text: &str, vars: &[(&str, &str)]) -> String {
    let mut out = text.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}

// ──────────────────────────────────────────────
// StaticCatalog
// ──────────────────────────────────────────────

/// A translator backed by fixed in-memory tables, one per locale.
///
/// Useful for testing and for embedders whose string tables are known
/// ahead of time. `for_locale` produces a sibling catalog bound to a
/// different locale over the same tables.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: BTreeMap<String, BTreeMap<String, String>>,
    active: String,
}

impl StaticCatalog {
    /// Create an empty catalog bound to the given locale.
    pub fn new(locale: impl Into<String>) -> StaticCatalog {
        StaticCatalog {
            tables: BTreeMap::new(),
            active: locale.into(),
        }
    }

    pub fn insert(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> StaticCatalog {
        self.tables
            .entry(locale.into())
            .or_default()
            .insert(key.into(), text.into());
        self
    }

    /// The same tables, bound to another locale.
    pub fn for_locale(&self, locale: impl Into<String>) -> StaticCatalog {
        StaticCatalog {
            tables: self.tables.clone(),
            active: locale.into(),
        }
    }
}

impl Translator for StaticCatalog {
    fn lookup(&self, key: &str) -> Option<String> {
        self.tables.get(&self.active)?.get(key).cloned()
    }

    fn locale(&self) -> &str {
        &self.active
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new("en")
            .insert("en", "field.name", "Name")
            .insert("en", "error.minLength", "Must be at least {min} characters")
            .insert("fr", "field.name", "Nom")
    }

    #[test]
    fn lookup_hits_active_locale() {
        let c = catalog();
        assert_eq!(c.lookup("field.name").as_deref(), Some("Name"));
        assert_eq!(c.for_locale("fr").lookup("field.name").as_deref(), Some("Nom"));
    }

    #[test]
    fn translate_substitutes_vars() {
        let c = catalog();
        assert_eq!(
            c.translate("error.minLength", None, &[("min", "6")]),
            "Must be at least 6 characters"
        );
    }

    #[test]
    fn translate_missing_key_uses_default_then_key() {
        let c = catalog();
        assert_eq!(c.translate("nope", Some("fallback"), &[]), "fallback");
        assert_eq!(c.translate("nope", None, &[]), "nope");
    }

    #[test]
    fn translate_substitutes_into_default() {
        let c = catalog();
        assert_eq!(
            c.translate("error.maxLength", Some("At most {max} characters"), &[("max", "20")]),
            "At most 20 characters"
        );
    }

    #[test]
    fn unknown_locale_falls_back_to_default_text() {
        let c = catalog().for_locale("de");
        assert_eq!(c.translate("field.name", Some("Name"), &[]), "Name");
    }
}
