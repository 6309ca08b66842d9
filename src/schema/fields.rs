//! Field coercion helpers shared by all schemas.
//!
//! [`Fields`] walks one YAML mapping and collects every issue it meets instead
//! of stopping at the first. Accessors always return a value (a placeholder on
//! failure) so a schema can read all of its fields before [`Fields::finish`]
//! decides whether the record is valid.

use super::{ValidationFailed, ValidationIssue};
use crate::utils::date::Timestamp;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;
use url::Url;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Name of a YAML value's type, for "expected X, received Y" messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "object",
        Value::Tagged(_) => "tagged value",
    }
}

pub(crate) struct Fields<'a> {
    map: &'a Mapping,
    prefix: String,
    issues: Vec<ValidationIssue>,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Mapping) -> Self {
        Self {
            map,
            prefix: String::new(),
            issues: Vec::new(),
        }
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }

    fn issue(&mut self, key: &str, message: impl Into<String>) {
        let path = self.path(key);
        self.issues.push(ValidationIssue::new(path, message));
    }

    /// Present and not null.
    fn value(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn expected(&mut self, key: &str, expected: &str, value: &Value) {
        let received = type_name(value);
        self.issue(key, format!("Expected {expected}, received {received}"));
    }

    // ------------------------------------------------------------------------
    // Scalars
    // ------------------------------------------------------------------------

    /// A non-blank string. `missing` is reported when absent or blank.
    pub fn required_str(&mut self, key: &str, missing: &str) -> String {
        match self.value(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::String(_)) | None => {
                self.issue(key, missing);
                String::new()
            }
            Some(other) => {
                self.expected(key, "string", other);
                String::new()
            }
        }
    }

    pub fn optional_str(&mut self, key: &str) -> Option<String> {
        match self.value(key)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.expected(key, "string", other);
                None
            }
        }
    }

    pub fn bool_or(&mut self, key: &str, default: bool) -> bool {
        match self.value(key) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.expected(key, "boolean", other);
                default
            }
        }
    }

    pub fn number_or(&mut self, key: &str, default: f64) -> f64 {
        match self.value(key) {
            None => default,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(n) if n.is_finite() => n,
                _ => {
                    self.issue(key, "Expected a finite number");
                    default
                }
            },
            Some(other) => {
                self.expected(key, "number", other);
                default
            }
        }
    }

    // ------------------------------------------------------------------------
    // Dates, URLs, emails
    // ------------------------------------------------------------------------

    /// A required date-like string.
    pub fn date(&mut self, key: &str) -> Option<Timestamp> {
        if self.value(key).is_none() {
            self.issue(key, "Required");
            return None;
        }
        self.optional_date(key)
    }

    pub fn optional_date(&mut self, key: &str) -> Option<Timestamp> {
        match self.value(key)? {
            Value::String(s) => {
                let parsed = Timestamp::parse(s);
                if parsed.is_none() {
                    self.issue(key, format!("Invalid date `{s}`"));
                }
                parsed
            }
            other => {
                self.expected(key, "date string", other);
                None
            }
        }
    }

    /// An optional absolute URL.
    pub fn url(&mut self, key: &str) -> Option<String> {
        let raw = self.optional_str(key)?;
        match Url::parse(&raw) {
            Ok(_) => Some(raw),
            Err(_) => {
                self.issue(key, "Invalid url");
                None
            }
        }
    }

    /// A required absolute URL.
    pub fn required_url(&mut self, key: &str) -> String {
        if self.value(key).is_none() {
            self.issue(key, "Required");
            return String::new();
        }
        self.url(key).unwrap_or_default()
    }

    pub fn email(&mut self, key: &str) -> Option<String> {
        let raw = self.optional_str(key)?;
        if RE_EMAIL.is_match(&raw) {
            Some(raw)
        } else {
            self.issue(key, "Invalid email");
            None
        }
    }

    /// One of `allowed`, or `default` when absent.
    pub fn one_of(&mut self, key: &str, allowed: &[&'static str], default: &'static str) -> &'static str {
        match self.value(key) {
            None => default,
            Some(Value::String(s)) => match allowed.iter().find(|a| **a == s.as_str()) {
                Some(found) => *found,
                None => {
                    let expected = allowed
                        .iter()
                        .map(|a| format!("'{a}'"))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    self.issue(
                        key,
                        format!("Invalid enum value. Expected {expected}, received '{s}'"),
                    );
                    default
                }
            },
            Some(other) => {
                self.expected(key, "string", other);
                default
            }
        }
    }

    // ------------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------------

    /// `tags`: a list of strings, empty when absent.
    pub fn tags(&mut self) -> Vec<String> {
        self.string_list("tags")
    }

    /// A list of strings, empty when absent. Non-string entries are reported.
    pub fn string_list(&mut self, key: &str) -> Vec<String> {
        match self.value(key) {
            None => Vec::new(),
            Some(Value::Sequence(seq)) => {
                let mut out = Vec::with_capacity(seq.len());
                for (i, item) in seq.iter().enumerate() {
                    match item {
                        Value::String(s) => out.push(s.clone()),
                        other => self.expected(&format!("{key}.{i}"), "string", other),
                    }
                }
                out
            }
            Some(other) => {
                self.expected(key, "array", other);
                Vec::new()
            }
        }
    }

    /// A list of mappings, each read through `item`. Empty when absent.
    pub fn list_of<T>(&mut self, key: &str, mut item: impl FnMut(&mut Fields<'a>) -> T) -> Vec<T> {
        let seq = match self.value(key) {
            None => return Vec::new(),
            Some(Value::Sequence(seq)) => seq,
            Some(other) => {
                self.expected(key, "array", other);
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(seq.len());
        for (i, entry) in seq.iter().enumerate() {
            let index_key = format!("{key}.{i}");
            match entry {
                Value::Mapping(map) => {
                    let mut nested = Fields {
                        map,
                        prefix: self.path(&index_key),
                        issues: Vec::new(),
                    };
                    out.push(item(&mut nested));
                    self.issues.append(&mut nested.issues);
                }
                other => self.expected(&index_key, "object", other),
            }
        }
        out
    }

    /// Record an issue found by schema-specific checks.
    pub fn reject(&mut self, key: &str, message: impl Into<String>) {
        self.issue(key, message);
    }

    /// `Ok(value)` when no issue was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationFailed> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(ValidationFailed::from(self.issues))
        }
    }
}
