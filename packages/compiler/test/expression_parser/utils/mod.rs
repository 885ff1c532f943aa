/**
 * Test Utilities
 *
 * Helper functions for expression parser tests
 */
use binding_syntax::error::BindingError;
use binding_syntax::expression_parser::{serialize, Parser, AST};

pub fn parse(source: &str) -> AST {
    Parser::new()
        .parse(source)
        .unwrap_or_else(|err| panic!("failed to parse [{}]: {}", source, err))
}

/// Parses `source` and prints it back in canonical form.
pub fn unparse(source: &str) -> String {
    serialize(&parse(source))
}

pub fn parse_error(source: &str) -> String {
    match Parser::new().parse(source) {
        Ok(ast) => panic!("expected [{}] to fail, got {:?}", source, ast),
        Err(BindingError::Parse { message, .. }) => message,
        Err(other) => panic!("expected a parse error for [{}], got {}", source, other),
    }
}
