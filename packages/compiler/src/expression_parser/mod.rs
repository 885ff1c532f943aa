pub mod ast;
/**
 * Expression Parser Module
 *
 * Lexer, parser and serializer for the binding expression language
 */
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::{ExpressionParser, Parser};
pub use serializer::serialize;
