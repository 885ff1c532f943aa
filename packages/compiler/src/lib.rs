#![deny(clippy::all)]

/**
 * Binding Syntax Compiler
 *
 * Interprets `name.command="value"` template attributes into binding
 * instructions
 */

pub mod binding;
pub mod binding_language;
pub mod chars;
pub mod config;
pub mod error;
pub mod expression_parser;
pub mod logging;
pub mod syntax_interpreter;

// Re-exports
pub use binding::{
    BindingExpression, BindingInstruction, BindingMode, Element, InstructionAttribute,
    Interpretation, ListenerExpression, NameExpression, ResourceRegistry,
};
pub use binding_language::{AttributeExpression, AttributeInfo, BindingLanguage};
pub use config::InterpreterConfig;
pub use error::{BindingError, Result};
pub use syntax_interpreter::{
    AttributeParser, BindingCommand, InterpretContext, SyntaxInterpreter,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
