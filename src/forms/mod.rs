//! Declarative forms: a field list, per-field rules, and the state needed to show
//! inline errors only for fields the user has touched.

pub mod definitions;

use std::collections::{BTreeMap, BTreeSet};

use url::Url;
use validator::{ValidateEmail, ValidateLength};

use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Password,
    Url,
    Select,
    RichText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required(&'static str),
    Email(&'static str),
    MinLength(usize, &'static str),
    Url(&'static str),
    /// Must equal the value of another field.
    Matches(&'static str, &'static str),
}

impl Rule {
    fn check(&self, value: &str, values: &FormValues) -> Option<&'static str> {
        match self {
            Rule::Required(msg) => value.trim().is_empty().then_some(*msg),
            // Format rules only apply once something was entered; Required covers emptiness.
            Rule::Email(msg) => (!value.is_empty() && !value.validate_email()).then_some(*msg),
            Rule::MinLength(min, msg) => (!value.is_empty()
                && !value.validate_length(Some(*min as u64), None, None))
            .then_some(*msg),
            Rule::Url(msg) => (!value.is_empty() && !is_web_url(value)).then_some(*msg),
            Rule::Matches(other, msg) => (value != values.get(other)).then_some(*msg),
        }
    }
}

fn is_web_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub placeholder: Option<&'static str>,
    pub rules: Vec<Rule>,
}

impl Field {
    pub fn new(name: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            label,
            kind,
            placeholder: None,
            rules: Vec::new(),
        }
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Optional line under the submit button, e.g. "Already have an account? Sign In".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFooter {
    pub text: &'static str,
    pub link_text: &'static str,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    pub title: &'static str,
    pub button_text: &'static str,
    pub fields: Vec<Field>,
    pub footer: Option<FormFooter>,
}

impl FormSpec {
    /// Validate a full set of values, returning the first message per failing field.
    pub fn validate(&self, values: &FormValues) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in &self.fields {
            if let Some(msg) = self.validate_field(field, values) {
                errors.0.insert(field.name.to_string(), msg.to_string());
            }
        }
        errors
    }

    fn validate_field(&self, field: &Field, values: &FormValues) -> Option<&'static str> {
        let value = values.get(field.name);
        field.rules.iter().find_map(|rule| rule.check(value, values))
    }
}

/// Current field values, keyed by field name. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn owned(&self, name: &str) -> String {
        self.get(name).to_string()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A form being filled in.
///
/// Errors are recomputed on every change but only become visible for a field
/// after it was touched, or for every field after a submit attempt.
#[derive(Debug, Clone)]
pub struct FormState {
    spec: FormSpec,
    values: FormValues,
    touched: BTreeSet<String>,
    errors: FieldErrors,
}

impl FormState {
    pub fn new(spec: FormSpec, initial: FormValues) -> Self {
        let errors = spec.validate(&initial);
        Self {
            spec,
            values: initial,
            touched: BTreeSet::new(),
            errors,
        }
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Change a field; marks it touched.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.set(name, value);
        self.touch(name);
    }

    pub fn touch(&mut self, name: &str) {
        self.touched.insert(name.to_string());
        self.errors = self.spec.validate(&self.values);
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Inline error for `name`, if the field has been touched.
    pub fn error(&self, name: &str) -> Option<&str> {
        if self.is_touched(name) {
            self.errors.get(name)
        } else {
            None
        }
    }

    /// Errors in field order, for inline display.
    pub fn visible_errors(&self) -> Vec<(&Field, &str)> {
        self.spec
            .fields
            .iter()
            .filter_map(|f| self.error(f.name).map(|e| (f, e)))
            .collect()
    }

    /// Touch every field and validate. Returns the values only when all rules pass.
    pub fn submit(&mut self) -> Result<FormValues, FieldErrors> {
        for field in &self.spec.fields {
            self.touched.insert(field.name.to_string());
        }
        self.errors = self.spec.validate(&self.values);
        if self.errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(self.errors.clone())
        }
    }
}
