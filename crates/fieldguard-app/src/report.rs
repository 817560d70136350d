// File: src/report.rs
// Purpose: Outcome of checking one record, with the submitted values for display

use colored::Colorize;
use fieldguard::{Record, ValidationErrors};
use std::collections::HashMap;

/// Validation errors alongside the values that produced them
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Field names to error messages
    pub errors: ValidationErrors,
    /// Declared field values as stored on the record
    pub values: HashMap<String, String>,
}

impl CheckReport {
    /// Snapshot a record after `is_valid` has run
    pub fn from_record(record: &Record) -> Self {
        let errors = record.get_validation_errors().cloned().unwrap_or_default();
        let values = record
            .schema()
            .iter()
            .filter_map(|spec| {
                record
                    .get(spec.name)
                    .filter(|value| !value.is_null())
                    .map(|value| (spec.name.to_string(), value.to_string()))
            })
            .collect();

        Self { errors, values }
    }

    /// Get error message for a field
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }

    /// Get original value for a field
    pub fn get_value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(|s| s.as_str())
    }

    /// One line per field in schema order, marking failures with their message
    pub fn render(&self, record: &Record) -> String {
        record
            .schema()
            .iter()
            .map(|spec| {
                let value = self.get_value(spec.name).unwrap_or("-");
                match self.get_error(spec.name) {
                    Some(message) => format!(
                        "{} {} = {}: {}",
                        "✗".red(),
                        spec.name,
                        value,
                        message
                    ),
                    None => format!("{} {} = {}", "✓".green(), spec.name, value),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Errors as a JSON object, for machine-readable output
    pub fn errors_json(&self) -> serde_json::Value {
        let map = self
            .errors
            .iter()
            .map(|(field, message)| (field.clone(), serde_json::Value::from(message.as_str())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::CONTACT_SCHEMA;
    use fieldguard::Value;

    fn checked(entries: &[(&str, Value)]) -> (Record, CheckReport) {
        let mut record = Record::new(CONTACT_SCHEMA, entries.iter().cloned());
        record.is_valid().unwrap();
        let report = CheckReport::from_record(&record);
        (record, report)
    }

    #[test]
    fn test_report_errors() {
        let (_, report) = checked(&[
            ("first_name", Value::from("Ada")),
            ("last_name", Value::from("Lovelace")),
            ("email", Value::from("ada@mailinator.com")),
        ]);

        assert!(!report.errors.is_empty());
        assert!(report.get_error("email").is_some());
        assert_eq!(
            report.get_error("email"),
            Some("Email cannot be a disposable email address.")
        );
        assert!(report.get_error("phone").is_none());
    }

    #[test]
    fn test_report_values_skip_unset_fields() {
        let (_, report) = checked(&[
            ("first_name", Value::from("Ada")),
            ("phone", Value::Null),
        ]);

        assert_eq!(report.get_value("first_name"), Some("Ada"));
        assert_eq!(report.get_value("phone"), None);
        assert_eq!(report.get_error("last_name"), Some("Field required"));
    }

    #[test]
    fn test_valid_record_has_empty_report() {
        let (record, report) = checked(&[
            ("first_name", Value::from("Ada")),
            ("last_name", Value::from("Lovelace")),
            ("email", Value::from("ada@example.com")),
        ]);

        assert!(report.errors.is_empty());
        assert_eq!(report.errors_json(), serde_json::json!({}));
        colored::control::set_override(false);
        let rendered = report.render(&record);
        assert!(rendered.starts_with("✓ first_name = Ada"));
        assert_eq!(rendered.lines().count(), CONTACT_SCHEMA.len());
    }

    #[test]
    fn test_errors_json() {
        let (_, report) = checked(&[
            ("first_name", Value::from("Ada")),
            ("last_name", Value::from("Lovelace")),
            ("email", Value::from("ada@example.com")),
            ("postal_code", Value::from("SW1A1AA")),
        ]);

        assert_eq!(
            report.errors_json(),
            serde_json::json!({
                "postal_code": "PostalCode must be a valid UK postal code (e.g., SW1A 1AA)."
            })
        );
    }
}
