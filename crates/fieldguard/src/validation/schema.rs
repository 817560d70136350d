// File: src/validation/schema.rs
// Purpose: Static field declarations that drive record validation

use super::validators::{self, RuleResult};
use crate::value::Value;

/// Expected shape of a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    /// One of a fixed set of string constants
    Choice(&'static [&'static str]),
    /// Any value; the field rule decides
    Any,
}

impl FieldKind {
    /// Check a non-null value against this kind
    pub fn check(&self, value: &Value) -> Result<(), String> {
        let ok = match (self, value) {
            (FieldKind::Any, _) => true,
            (FieldKind::Text, Value::String(_)) => true,
            (FieldKind::Integer, Value::Integer(_)) => true,
            (FieldKind::Integer, Value::Number(n)) => n.fract() == 0.0,
            (FieldKind::Boolean, Value::Bool(_)) => true,
            (FieldKind::Choice(members), Value::String(s)) => members.contains(&s.as_str()),
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(self.expectation())
        }
    }

    fn expectation(&self) -> String {
        match self {
            FieldKind::Text => "Input should be a valid string".to_string(),
            FieldKind::Integer => "Input should be a valid integer".to_string(),
            FieldKind::Boolean => "Input should be a valid boolean".to_string(),
            FieldKind::Choice(members) => format!("Input should be {}", quote_members(members)),
            FieldKind::Any => String::new(),
        }
    }
}

// 'A', 'B' or 'C'
fn quote_members(members: &[&str]) -> String {
    let quoted: Vec<String> = members.iter().map(|m| format!("'{}'", m)).collect();
    match quoted.split_last() {
        None => "one of no values".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Field rules a declaration can attach
///
/// Dispatch is a plain `match`, so the set is closed and each rule stays a free function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    PhoneNumber,
    EmailAddress,
    PostalCode,
}

impl Rule {
    pub fn apply(self, value: &Value, field_name: &str) -> RuleResult {
        match self {
            Rule::PhoneNumber => validators::phone_number(value, field_name),
            Rule::EmailAddress => validators::email_address(value, field_name),
            Rule::PostalCode => validators::postal_code(value, field_name),
        }
    }
}

/// Declaration of one record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Name used in rule messages; defaults to `name`
    pub label: Option<&'static str>,
    pub rule: Option<Rule>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            label: None,
            rule: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            label: None,
            rule: None,
        }
    }

    pub const fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    pub const fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn display_name(&self) -> &'static str {
        self.label.unwrap_or(self.name)
    }
}

/// A record layout: its declared fields, in declaration order
pub type Schema = &'static [FieldSpec];

/// Look up a declaration by field name
pub fn find_field(schema: Schema, name: &str) -> Option<&'static FieldSpec> {
    schema.iter().find(|spec| spec.name == name)
}
