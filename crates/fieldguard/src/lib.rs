// fieldguard - validated records with UK contact-field rules
// Environment-selected configuration and named, rotating loggers

pub mod config;
pub mod enums;
pub mod error;
pub mod logging;
pub mod record;
pub mod validation;
pub mod value;

// Re-export core types
pub use config::{Config, Environment, LogConfig};
pub use enums::YesNo;
pub use error::RecordError;
pub use logging::{get_logger, Logger};
pub use record::Record;
pub use validation::{FieldKind, FieldSpec, Rule, Schema, Validate, ValidationErrors};
pub use value::Value;
