// File: src/contact.rs
// Purpose: Built-in contact record layout checked by `--check`

use fieldguard::{FieldKind, FieldSpec, Rule, Schema, YesNo};

pub const CONTACT_SCHEMA: Schema = &[
    FieldSpec::required("first_name", FieldKind::Text),
    FieldSpec::required("last_name", FieldKind::Text),
    FieldSpec::required("email", FieldKind::Text)
        .with_rule(Rule::EmailAddress)
        .labelled("Email"),
    FieldSpec::optional("phone", FieldKind::Any)
        .with_rule(Rule::PhoneNumber)
        .labelled("Phone"),
    FieldSpec::optional("postal_code", FieldKind::Text).with_rule(Rule::PostalCode),
    FieldSpec::optional("marketing_opt_in", FieldKind::Choice(YesNo::VALUES)),
];
