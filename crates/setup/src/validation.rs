//! Field validation rules shared by every form in the client.
//!
//! A [`Rule`] is a pure check over one field value, with access to the whole
//! form for cross-field rules. Rules are grouped per field into [`FieldRules`];
//! the first failing rule of a field decides its message.

use std::collections::BTreeMap;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const GITHUB_TOKEN_PREFIXES: [&str; 2] = ["ghp_", "github_pat_"];

/// Field name to error message. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub struct Rule<V> {
    check: fn(&str, &V) -> bool,
    message: &'static str,
}

impl<V> Rule<V> {
    /// `check` returns `true` when the value passes.
    pub fn new(check: fn(&str, &V) -> bool, message: &'static str) -> Self {
        Self { check, message }
    }

    pub fn apply(&self, value: &str, all: &V) -> Option<&'static str> {
        if (self.check)(value, all) {
            None
        } else {
            Some(self.message)
        }
    }
}

pub struct FieldRules<V> {
    pub field: &'static str,
    pub value: fn(&V) -> &str,
    pub rules: Vec<Rule<V>>,
}

impl<V> FieldRules<V> {
    pub fn new(field: &'static str, value: fn(&V) -> &str, rules: Vec<Rule<V>>) -> Self {
        Self {
            field,
            value,
            rules,
        }
    }

    pub fn first_failure(&self, all: &V) -> Option<&'static str> {
        let value = (self.value)(all);
        self.rules.iter().find_map(|rule| rule.apply(value, all))
    }
}

pub fn validate<V>(all: &V, fields: &[FieldRules<V>]) -> ValidationResult {
    let mut result = ValidationResult::new();
    for field in fields {
        if let Some(message) = field.first_failure(all) {
            result.insert(field.field, message);
        }
    }
    result
}

pub fn is_present(value: &str) -> bool {
    !value.is_empty()
}

pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

pub fn is_github_token(value: &str) -> bool {
    GITHUB_TOKEN_PREFIXES
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

pub fn is_repository_key(value: &str) -> bool {
    value.contains('/')
}
