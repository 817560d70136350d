// File: src/validation/mod.rs
// Purpose: Validation runtime and validator trait

use std::collections::HashMap;

use crate::error::RecordError;

pub mod schema;
pub mod validators;

pub use schema::{find_field, FieldKind, FieldSpec, Rule, Schema};
pub use validators::{RuleError, RuleResult};

/// Field name -> human-readable message, one entry per failing field
pub type ValidationErrors = HashMap<String, String>;

/// Trait for types that can check their current values
pub trait Validate {
    /// Validates the current state
    ///
    /// Returns an empty map when every field passes. Invalid values are never
    /// an `Err`; only faults that prevent checking are.
    fn validate(&self) -> Result<ValidationErrors, RecordError>;
}
