//! Errors raised while interpreting binding attributes.

use thiserror::Error;

/// Error produced by the binding syntax compiler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// `for` value did not have the `$local of $items` shape.
    #[error("Incorrect syntax for \"for\". The form is: \"$local of $items\".")]
    InvalidForSyntax,

    /// The expression parser rejected an attribute value.
    #[error("Parser Error: {message} in [{input}]")]
    Parse { message: String, input: String },

    /// A binding command keyword with no handler, under a rejecting policy.
    #[error("Unknown binding command '{0}'")]
    UnknownCommand(String),
}

impl BindingError {
    pub fn parse(message: impl Into<String>, input: impl Into<String>) -> Self {
        BindingError::Parse {
            message: message.into(),
            input: input.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BindingError>;
