/**
 * Binding Expression Parser
 *
 * Recursive descent parser for attribute value expressions
 */
use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::error::{BindingError, Result};

/// Anything that can turn an attribute value into an expression tree.
///
/// The syntax interpreter only depends on this trait; `Parser` is the
/// implementation used by default.
pub trait ExpressionParser {
    fn parse(&self, source: &str) -> Result<AST>;
}

/// Parser for binding expressions
#[derive(Debug, Default, Clone)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            lexer: Lexer::new(),
        }
    }

    /// Parse an expression, or a `;` separated chain of them
    pub fn parse(&self, input: &str) -> Result<AST> {
        let tokens = self.lexer.tokenize(input);
        if let Some(error) = tokens.iter().find(|t| t.is_error()) {
            return Err(BindingError::parse(error.str_value.clone(), input));
        }
        ParseAST::new(input, tokens).parse_chain()
    }
}

impl ExpressionParser for Parser {
    fn parse(&self, source: &str) -> Result<AST> {
        Parser::parse(self, source)
    }
}

/// Internal parser state
struct ParseAST<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    index: usize,
}

impl<'a> ParseAST<'a> {
    fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        ParseAST {
            input,
            tokens,
            index: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> BindingError {
        BindingError::parse(
            format!("{} at column {}", message.into(), self.input_index()),
            self.input,
        )
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if self.current().map_or(false, |t| t.is_character(code)) {
            self.advance();
            return true;
        }
        false
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.current().map_or(false, |t| t.is_operator(op)) {
            self.advance();
            return true;
        }
        false
    }

    fn expect_character(&mut self, code: char) -> Result<()> {
        if self.consume_optional_character(code) {
            Ok(())
        } else {
            Err(self.error(format!("Missing expected {}", code)))
        }
    }

    fn expect_identifier_or_keyword(&mut self) -> Result<String> {
        match self.current() {
            Some(token) if token.is_identifier() || token.is_keyword() => {
                let name = token.str_value.clone();
                self.advance();
                Ok(name)
            }
            Some(token) => {
                let found = token.str_value.clone();
                Err(self.error(format!("Unexpected token {}, expected identifier or keyword", found)))
            }
            None => Err(self.error("Unexpected end of expression, expected identifier or keyword")),
        }
    }

    /// Parse `a; b; c`. Filters may not appear in a chain.
    fn parse_chain(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut expressions = Vec::new();
        let mut is_chain = false;

        while self.consume_optional_character(';') {
            is_chain = true;
        }

        while !self.at_end() {
            if let Some(token) = self.current() {
                if token.is_character(')') || token.is_character('}') || token.is_character(']') {
                    let found = token.str_value.clone();
                    return Err(self.error(format!("Unconsumed token {}", found)));
                }
            }

            let expr = self.parse_filter()?;
            let is_filter = matches!(expr, AST::Filter(_));
            expressions.push(expr);

            let mut separated = false;
            while self.consume_optional_character(';') {
                is_chain = true;
                separated = true;
            }

            if is_chain && is_filter {
                return Err(self.error("Cannot have a filter in a chain"));
            }

            if !separated && !self.at_end() {
                let found = self.current().map(|t| t.str_value.clone()).unwrap_or_default();
                return Err(self.error(format!("Unexpected token '{}'", found)));
            }
        }

        match expressions.len() {
            0 => Ok(AST::EmptyExpr(EmptyExpr {
                span: ParseSpan::new(0, self.input.len()),
            })),
            1 => Ok(expressions.remove(0)),
            _ => Ok(AST::Chain(Chain {
                span: self.span(start),
                expressions,
            })),
        }
    }

    /// Parse filter application (e.g., `value | filterName:arg`)
    fn parse_filter(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_expression()?;

        while self.consume_optional_operator("|") {
            let name = match self.current() {
                Some(token) if token.is_identifier() => token.str_value.clone(),
                _ => return Err(self.error("Expected filter name")),
            };
            self.advance();

            let mut args = Vec::new();
            while self.consume_optional_character(':') {
                args.push(self.parse_expression()?);
            }

            result = AST::Filter(Filter {
                span: self.span(start),
                exp: Box::new(result),
                name,
                args,
            });
        }

        Ok(result)
    }

    /// Parse assignment (e.g., `a = b`)
    fn parse_expression(&mut self) -> Result<AST> {
        let start = self.input_index();
        let result = self.parse_conditional()?;

        if !self.current().map_or(false, |t| t.is_operator("=")) {
            return Ok(result);
        }

        if !result.is_assignable() {
            let text = &self.input[result.span().start..result.span().end];
            return Err(self.error(format!("Expression {} is not assignable", text)));
        }
        self.advance();
        let value = Box::new(self.parse_expression()?);

        Ok(match result {
            AST::PropertyRead(read) => AST::PropertyWrite(PropertyWrite {
                span: self.span(start),
                receiver: read.receiver,
                name: read.name,
                value,
            }),
            AST::KeyedRead(read) => AST::KeyedWrite(KeyedWrite {
                span: self.span(start),
                receiver: read.receiver,
                key: read.key,
                value,
            }),
            other => other,
        })
    }

    /// Parse conditional/ternary expression (e.g., `a ? b : c`)
    fn parse_conditional(&mut self) -> Result<AST> {
        let start = self.input_index();
        let result = self.parse_logical_or()?;

        if self.consume_optional_operator("?") {
            let true_exp = self.parse_expression()?;
            if !self.consume_optional_character(':') {
                let expression = &self.input[start..self.input_index()];
                return Err(self.error(format!(
                    "Conditional expression {} requires all 3 expressions",
                    expression.trim_end()
                )));
            }
            let false_exp = self.parse_expression()?;

            return Ok(AST::Conditional(Conditional {
                span: self.span(start),
                condition: Box::new(result),
                true_exp: Box::new(true_exp),
                false_exp: Box::new(false_exp),
            }));
        }

        Ok(result)
    }

    fn parse_logical_or(&mut self) -> Result<AST> {
        self.parse_binary_level(&["||"], Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> Result<AST> {
        self.parse_binary_level(&["&&"], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<AST> {
        self.parse_binary_level(&["==", "!=", "===", "!=="], Self::parse_relational)
    }

    /// Parse relational operators (<, >, <=, >=, in)
    fn parse_relational(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_additive()?;

        while let Some(token) = self.current() {
            let is_relational = (token.token_type == TokenType::Operator
                && matches!(token.str_value.as_str(), "<" | ">" | "<=" | ">="))
                || token.is_keyword_named("in");
            if !is_relational {
                break;
            }
            let operation = token.str_value.clone();
            self.advance();
            let right = self.parse_additive()?;
            result = AST::Binary(Binary {
                span: self.span(start),
                operation,
                left: Box::new(result),
                right: Box::new(right),
            });
        }

        Ok(result)
    }

    fn parse_additive(&mut self) -> Result<AST> {
        self.parse_binary_level(&["+", "-"], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<AST> {
        self.parse_binary_level(&["*", "/", "%"], Self::parse_prefix)
    }

    /// Left-associative binary operators sharing one precedence level
    fn parse_binary_level(
        &mut self,
        operators: &[&str],
        next: fn(&mut Self) -> Result<AST>,
    ) -> Result<AST> {
        let start = self.input_index();
        let mut result = next(self)?;

        while let Some(token) = self.current() {
            if token.token_type != TokenType::Operator || !operators.contains(&token.str_value.as_str()) {
                break;
            }
            let operation = token.str_value.clone();
            self.advance();
            let right = next(self)?;
            result = AST::Binary(Binary {
                span: self.span(start),
                operation,
                left: Box::new(result),
                right: Box::new(right),
            });
        }

        Ok(result)
    }

    /// Parse prefix operators (!, -, +)
    fn parse_prefix(&mut self) -> Result<AST> {
        let start = self.input_index();

        if self.consume_optional_operator("!") {
            let expression = self.parse_prefix()?;
            return Ok(AST::PrefixNot(PrefixNot {
                span: self.span(start),
                expression: Box::new(expression),
            }));
        }

        for operator in ["+", "-"] {
            if self.consume_optional_operator(operator) {
                let expr = self.parse_prefix()?;
                return Ok(AST::Unary(Unary {
                    span: self.span(start),
                    operator: operator.to_string(),
                    expr: Box::new(expr),
                }));
            }
        }

        self.parse_call_chain()
    }

    /// Parse member access, keyed access and calls
    fn parse_call_chain(&mut self) -> Result<AST> {
        let start = self.input_index();
        let mut result = self.parse_primary()?;

        loop {
            if self.consume_optional_character('.') {
                let name = self.expect_identifier_or_keyword()?;
                result = AST::PropertyRead(PropertyRead {
                    span: self.span(start),
                    receiver: Box::new(result),
                    name,
                });
            } else if self.consume_optional_character('[') {
                let key = self.parse_expression()?;
                self.expect_character(']')?;
                result = AST::KeyedRead(KeyedRead {
                    span: self.span(start),
                    receiver: Box::new(result),
                    key: Box::new(key),
                });
            } else if self.consume_optional_character('(') {
                let args = self.parse_call_arguments()?;
                self.expect_character(')')?;
                result = AST::Call(Call {
                    span: self.span(start),
                    receiver: Box::new(result),
                    args,
                });
            } else {
                return Ok(result);
            }
        }
    }

    /// Parse primary expression (literals, identifiers, parentheses, arrays, objects)
    fn parse_primary(&mut self) -> Result<AST> {
        let start = self.input_index();

        let token = match self.current() {
            Some(token) => token.clone(),
            None => return Err(self.error("Unexpected end of expression")),
        };

        if token.is_character('(') {
            self.advance();
            let expression = self.parse_filter()?;
            self.expect_character(')')?;
            return Ok(AST::ParenthesizedExpression(ParenthesizedExpression {
                span: self.span(start),
                expression: Box::new(expression),
            }));
        }

        if token.is_character('[') {
            return self.parse_literal_array();
        }

        if token.is_character('{') {
            return self.parse_literal_map();
        }

        if token.is_keyword() {
            let value = match token.str_value.as_str() {
                "null" => LiteralValue::Null,
                "undefined" => LiteralValue::Undefined,
                "true" => LiteralValue::Boolean(true),
                "false" => LiteralValue::Boolean(false),
                "this" => {
                    self.advance();
                    return Ok(AST::ThisReceiver(ThisReceiver {
                        span: self.span(start),
                    }));
                }
                other => return Err(self.error(format!("Unexpected keyword {}", other))),
            };
            self.advance();
            return Ok(AST::LiteralPrimitive(LiteralPrimitive::new(self.span(start), value)));
        }

        if token.is_identifier() {
            self.advance();
            return Ok(AST::PropertyRead(PropertyRead {
                span: self.span(start),
                receiver: Box::new(AST::ImplicitReceiver(ImplicitReceiver {
                    span: ParseSpan::new(start, start),
                })),
                name: token.str_value,
            }));
        }

        if token.is_number() {
            self.advance();
            return Ok(AST::LiteralPrimitive(LiteralPrimitive::new(
                self.span(start),
                LiteralValue::Number(token.num_value),
            )));
        }

        if token.is_string() {
            self.advance();
            return Ok(AST::LiteralPrimitive(LiteralPrimitive::new(
                self.span(start),
                LiteralValue::String(token.str_value),
            )));
        }

        Err(self.error(format!("Unexpected token {}", token.str_value)))
    }

    /// Parse array literal [1, 2, 3]
    fn parse_literal_array(&mut self) -> Result<AST> {
        let start = self.input_index();
        self.expect_character('[')?;

        let mut expressions = Vec::new();
        if !self.consume_optional_character(']') {
            loop {
                expressions.push(self.parse_expression()?);
                if !self.consume_optional_character(',') {
                    break;
                }
            }
            self.expect_character(']')?;
        }

        Ok(AST::LiteralArray(LiteralArray {
            span: self.span(start),
            expressions,
        }))
    }

    /// Parse object literal {a: 1, 'b': 2}
    fn parse_literal_map(&mut self) -> Result<AST> {
        let start = self.input_index();
        self.expect_character('{')?;

        let mut keys = Vec::new();
        let mut values = Vec::new();

        if !self.consume_optional_character('}') {
            loop {
                let (key, quoted) = match self.current() {
                    Some(token) if token.is_identifier() || token.is_keyword() => {
                        (token.str_value.clone(), false)
                    }
                    Some(token) if token.is_string() => (token.str_value.clone(), true),
                    _ => return Err(self.error("Expected property name")),
                };
                self.advance();
                self.expect_character(':')?;

                keys.push(LiteralMapKey { key, quoted });
                values.push(self.parse_expression()?);

                if !self.consume_optional_character(',') {
                    break;
                }
            }
            self.expect_character('}')?;
        }

        Ok(AST::LiteralMap(LiteralMap {
            span: self.span(start),
            keys,
            values,
        }))
    }

    /// Parse call arguments (arg1, arg2, ...)
    fn parse_call_arguments(&mut self) -> Result<Vec<AST>> {
        let mut args = Vec::new();

        if self.current().map_or(false, |t| t.is_character(')')) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_filter()?);
            if !self.consume_optional_character(',') {
                return Ok(args);
            }
        }
    }

    // Helper methods
    fn input_index(&self) -> usize {
        self.current().map(|t| t.index).unwrap_or(self.input.len())
    }

    fn span(&self, start: usize) -> ParseSpan {
        // End at the last consumed token so trailing whitespace is excluded.
        let end = if self.index > 0 {
            self.tokens[self.index - 1].end
        } else {
            self.input_index()
        };
        ParseSpan::new(start, end)
    }
}
