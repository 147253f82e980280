//! Error types for template resolution.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("found no instance of type {type_name}")]
    Missing { type_name: &'static str },

    #[error("expected no more than one instance of type {type_name}")]
    NotUnique { type_name: &'static str },

    #[error("found no object named '{name}'")]
    MissingNamed { name: String },

    #[error("object named '{name}' is not of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("no value for placeholder '{placeholder}' in template '{template}'")]
    Unresolved {
        template:    String,
        placeholder: String,
    },

    #[error("value '{value}' for placeholder '{placeholder}' in template '{template}' does not match '{pattern}'")]
    Mismatch {
        template:    String,
        placeholder: String,
        value:       String,
        pattern:     String,
    },

    #[error("malformed path template '{template}': {reason}")]
    Malformed { template: String, reason: String },

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("resolver '{resolver}' failed: {message}")]
    Failed { resolver: String, message: String },
}
