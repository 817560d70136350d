//! Validated records.
//!
//! A [`Record`] pairs field values with a static [`Schema`]. Values are trimmed on the
//! way in and undeclared keys are dropped. Validation runs only when asked for via
//! [`Record::is_valid`], which caches the per-field messages for
//! [`Record::get_validation_errors`].
//!
//! ```ignore
//! const CONTACT: Schema = &[
//!     FieldSpec::required("email", FieldKind::Text).with_rule(Rule::EmailAddress),
//!     FieldSpec::optional("phone", FieldKind::Any).with_rule(Rule::PhoneNumber),
//! ];
//!
//! let mut record = Record::new(CONTACT, [("email", "me@mailinator.com")]);
//! assert!(!record.is_valid()?);
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::{RecordError, Result};
use crate::validation::{find_field, FieldSpec, RuleError, Schema, Validate, ValidationErrors};
use crate::value::Value;

const FIELD_REQUIRED: &str = "Field required";

static NULL: Value = Value::Null;

#[derive(Debug, Clone)]
pub struct Record {
    schema: Schema,
    fields: HashMap<String, Value>,
    validation_errors: Option<ValidationErrors>,
}

impl Record {
    /// Build a record from raw values, keeping only declared fields
    pub fn new<I, K, V>(schema: Schema, input: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let fields = input
            .into_iter()
            .filter_map(|(key, value)| {
                let spec = find_field(schema, key.as_ref())?;
                let value: Value = value.into();
                Some((spec.name.to_string(), value.normalized()))
            })
            .collect();

        Self {
            schema,
            fields,
            validation_errors: None,
        }
    }

    /// Build a record from a JSON object
    pub fn from_json(schema: Schema, json: &str) -> Result<Self> {
        let parsed: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(schema, parsed)
    }

    pub fn from_json_value(schema: Schema, json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Object(map) => {
                Ok(Self::new(schema, map.into_iter().map(|(k, v)| (k, Value::from(v)))))
            }
            other => Err(RecordError::NotAnObject(json_type_name(&other))),
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Current value of a field; `None` when unset or undeclared
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Assign a declared field. Does not touch cached validation errors.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let spec = self.declared(name)?;
        let value: Value = value.into();
        self.fields.insert(spec.name.to_string(), value.normalized());
        Ok(())
    }

    /// Clear a declared field, returning its previous value
    pub fn unset(&mut self, name: &str) -> Result<Option<Value>> {
        self.declared(name)?;
        Ok(self.fields.remove(name))
    }

    /// Re-check the current values
    ///
    /// Returns `Ok(false)` and caches one message per failing field when any field
    /// is invalid; `Ok(true)` clears the cache. `Err` is reserved for faults such as
    /// an email value with no `@`, in which case the cache is left as it was.
    pub fn is_valid(&mut self) -> Result<bool> {
        let errors = self.validate()?;

        if errors.is_empty() {
            debug!(fields = self.fields.len(), "record is valid");
            self.validation_errors = None;
            Ok(true)
        } else {
            debug!(invalid_fields = errors.len(), "record failed validation");
            self.validation_errors = Some(errors);
            Ok(false)
        }
    }

    /// Messages from the last [`Record::is_valid`] call, if it failed
    pub fn get_validation_errors(&self) -> Option<&ValidationErrors> {
        self.validation_errors.as_ref()
    }

    /// Declared fields that currently hold a value, as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .schema
            .iter()
            .filter_map(|spec| {
                self.fields
                    .get(spec.name)
                    .map(|value| (spec.name.to_string(), serde_json::Value::from(value)))
            })
            .collect();
        serde_json::Value::Object(map)
    }

    fn declared(&self, name: &str) -> Result<&'static FieldSpec> {
        find_field(self.schema, name).ok_or_else(|| RecordError::UnknownField(name.to_string()))
    }

    /// Check one field; `Ok(Some(message))` when it is invalid
    fn check_field(&self, spec: &FieldSpec) -> Result<Option<String>> {
        let value = self.fields.get(spec.name).unwrap_or(&NULL);

        if value.is_null() {
            return Ok(spec.required.then(|| FIELD_REQUIRED.to_string()));
        }

        if let Err(message) = spec.kind.check(value) {
            return Ok(Some(message));
        }

        let Some(rule) = spec.rule else {
            return Ok(None);
        };

        match rule.apply(value, spec.display_name()) {
            Ok(_) => Ok(None),
            Err(RuleError::Invalid(message)) => Ok(Some(message)),
            Err(RuleError::Malformed(reason)) => Err(RecordError::MalformedValue {
                field: spec.name.to_string(),
                reason,
            }),
        }
    }
}

impl Validate for Record {
    fn validate(&self) -> Result<ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for spec in self.schema {
            if let Some(message) = self.check_field(spec)? {
                errors.insert(spec.name.to_string(), message);
            }
        }

        Ok(errors)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
