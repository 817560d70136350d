// File: src/validation/validators.rs
// Purpose: UK phone, disposable email and UK postal code field rules

use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// 9 or 10 bare digits: a local number whose leading 0 was dropped
static TRUNK_STRIPPED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{9,10}$").expect("trunk regex is valid"));

static UK_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[37][0-9]{9}$").expect("phone regex is valid"));

static UK_POSTAL_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]? [0-9][A-Z]{2}$").expect("postal code regex is valid")
});

/// Placeholder numbers that match the format but are never real
pub static DUMMY_PHONE_NUMBERS: &[&str] = &["07123456789", "03123456789"];

/// Throwaway mailbox providers, matched exactly against the domain
pub static DISPOSABLE_DOMAINS: &[&str] = &["mailinator.com", "tempmail.com", "10minutemail.com"];

pub const POSTAL_CODE_MESSAGE: &str =
    "PostalCode must be a valid UK postal code (e.g., SW1A 1AA).";

/// Why a rule refused a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The value is well-formed but breaks the rule; the message is user-facing
    #[error("{0}")]
    Invalid(String),

    /// The value cannot be checked at all
    #[error("{0}")]
    Malformed(String),
}

pub type RuleResult = Result<Value, RuleError>;

/// Validate a UK local phone number (07XXXXXXXXX or 03XXXXXXXXX)
///
/// Returns the normalized number. Nine or ten bare digits get a leading `0`.
pub fn phone_number(value: &Value, field_name: &str) -> RuleResult {
    if value.is_null() {
        return Ok(Value::Null);
    }

    let mut number = phone_text(value);
    if TRUNK_STRIPPED_REGEX.is_match(&number) && !number.starts_with('0') {
        number.insert(0, '0');
    }

    if !UK_PHONE_REGEX.is_match(&number) {
        return Err(RuleError::Invalid(format!(
            "{} must be in UK local format (07XXXXXXXXX) or (03XXXXXXXX).",
            field_name
        )));
    }

    if DUMMY_PHONE_NUMBERS.contains(&number.as_str()) {
        return Err(RuleError::Invalid(format!(
            "{} cannot be a dummy phone number.",
            field_name
        )));
    }

    Ok(Value::String(number))
}

// Floats keep their fraction so `7700900123.0` never passes as a number
fn phone_text(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("{:?}", n),
        other => other.to_string(),
    }
}

/// Reject addresses whose domain belongs to a disposable mail provider
///
/// The value must contain an `@`; anything else is reported as malformed.
pub fn email_address(value: &Value, field_name: &str) -> RuleResult {
    if value.is_null() {
        return Ok(Value::Null);
    }

    let email = value
        .as_str()
        .ok_or_else(|| RuleError::Malformed(format!("expected a string, got {}", value.type_name())))?;

    let domain = email
        .split('@')
        .nth(1)
        .ok_or_else(|| RuleError::Malformed("email address has no '@'".to_string()))?;

    if DISPOSABLE_DOMAINS.contains(&domain) {
        return Err(RuleError::Invalid(format!(
            "{} cannot be a disposable email address.",
            field_name
        )));
    }

    Ok(value.clone())
}

/// Validate a UK postal code such as `SW1A 1AA` (case-insensitive)
pub fn postal_code(value: &Value, _field_name: &str) -> RuleResult {
    if value.is_null() {
        return Ok(Value::Null);
    }

    let code = value
        .as_str()
        .ok_or_else(|| RuleError::Malformed(format!("expected a string, got {}", value.type_name())))?;

    if !UK_POSTAL_CODE_REGEX.is_match(code) {
        return Err(RuleError::Invalid(POSTAL_CODE_MESSAGE.to_string()));
    }

    Ok(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn invalid(message: &str) -> RuleResult {
        Err(RuleError::Invalid(message.to_string()))
    }

    #[rstest]
    #[case("07700900123")]
    #[case("03001234567")]
    #[case("07123456780")]
    fn test_phone_accepts_uk_local_numbers(#[case] number: &str) {
        assert_eq!(phone_number(&Value::from(number), "Phone"), Ok(Value::from(number)));
    }

    #[test]
    fn test_phone_restores_stripped_leading_zero() {
        assert_eq!(
            phone_number(&Value::from("7123456780"), "Phone"),
            Ok(Value::from("07123456780"))
        );
        assert_eq!(
            phone_number(&Value::Integer(7700900123), "Phone"),
            Ok(Value::from("07700900123"))
        );
    }

    #[test]
    fn test_phone_nine_digits_gains_zero_but_fails_length() {
        assert_eq!(
            phone_number(&Value::from("770090012"), "Phone"),
            invalid("Phone must be in UK local format (07XXXXXXXXX) or (03XXXXXXXX).")
        );
    }

    #[rstest]
    #[case("01234567890")]
    #[case("0770090012")]
    #[case("+447700900123")]
    #[case("077009001234")]
    #[case("not a number")]
    fn test_phone_rejects_bad_format(#[case] number: &str) {
        assert_eq!(
            phone_number(&Value::from(number), "Mobile"),
            invalid("Mobile must be in UK local format (07XXXXXXXXX) or (03XXXXXXXX).")
        );
    }

    #[rstest]
    #[case(7700900123.0)]
    #[case(7.7009e9)]
    fn test_phone_rejects_float_values(#[case] number: f64) {
        assert_eq!(
            phone_number(&Value::Number(number), "Phone"),
            invalid("Phone must be in UK local format (07XXXXXXXXX) or (03XXXXXXXX).")
        );
    }

    #[rstest]
    #[case("07123456789")]
    #[case("03123456789")]
    #[case("3123456789")]
    fn test_phone_rejects_dummy_numbers(#[case] number: &str) {
        assert_eq!(
            phone_number(&Value::from(number), "Phone"),
            invalid("Phone cannot be a dummy phone number.")
        );
    }

    #[test]
    fn test_phone_null_passes_through() {
        assert_eq!(phone_number(&Value::Null, "Phone"), Ok(Value::Null));
    }

    #[rstest]
    #[case("user@mailinator.com")]
    #[case("user@tempmail.com")]
    #[case("user@10minutemail.com")]
    fn test_email_rejects_disposable_domains(#[case] email: &str) {
        assert_eq!(
            email_address(&Value::from(email), "Email"),
            invalid("Email cannot be a disposable email address.")
        );
    }

    #[rstest]
    #[case("user@example.com")]
    #[case("user@MAILINATOR.COM")]
    #[case("user@eu.mailinator.com")]
    fn test_email_accepts_other_domains(#[case] email: &str) {
        assert_eq!(email_address(&Value::from(email), "Email"), Ok(Value::from(email)));
    }

    #[test]
    fn test_email_without_at_is_malformed() {
        assert!(matches!(
            email_address(&Value::from("user.example.com"), "Email"),
            Err(RuleError::Malformed(_))
        ));
    }

    #[test]
    fn test_email_domain_stops_at_second_at() {
        assert_eq!(
            email_address(&Value::from("a@mailinator.com@example.com"), "Email"),
            invalid("Email cannot be a disposable email address.")
        );
    }

    #[rstest]
    #[case("SW1A 1AA")]
    #[case("sw1a 1aa")]
    #[case("M1 1AE")]
    #[case("B33 8TH")]
    #[case("CR2 6XH")]
    fn test_postal_code_accepts_uk_codes(#[case] code: &str) {
        assert_eq!(postal_code(&Value::from(code), "postal_code"), Ok(Value::from(code)));
    }

    #[rstest]
    #[case("SW1A1AA")]
    #[case("12345")]
    #[case("SW1A  1AA")]
    #[case("")]
    fn test_postal_code_rejects_other_shapes(#[case] code: &str) {
        assert_eq!(postal_code(&Value::from(code), "postal_code"), invalid(POSTAL_CODE_MESSAGE));
    }

    #[test]
    fn test_postal_code_null_passes_through() {
        assert_eq!(postal_code(&Value::Null, "postal_code"), Ok(Value::Null));
    }
}
