/**
 * Binding Expression Lexer
 *
 * Tokenizes attribute values into tokens for the expression parser
 */
use serde::Serialize;

use crate::chars;

/// Token types in binding expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenType {
    Character,
    Identifier,
    Keyword,
    String,
    Operator,
    Number,
    Error,
}

/// Token representation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(
        index: usize,
        end: usize,
        token_type: TokenType,
        num_value: f64,
        str_value: String,
    ) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn operator(index: usize, end: usize, str_value: &str) -> Self {
        Token::new(index, end, TokenType::Operator, 0.0, str_value.to_string())
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.starts_with(code)
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_keyword_named(&self, name: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == name
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

// Keywords of the binding expression language
const KEYWORDS: &[&str] = &["null", "undefined", "true", "false", "this", "in"];

/// Binding expression lexer
#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Scanner::new(text).scan()
    }
}

/// Scanner for tokenizing input
struct Scanner<'a> {
    input: &'a str,
    index: usize,
    peek: char,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let peek = input.chars().next().unwrap_or(chars::EOF);
        Scanner {
            input,
            index: 0,
            peek,
        }
    }

    fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.scan_token() {
            tokens.push(token);
        }
        tokens
    }

    fn advance(&mut self) {
        self.index += self.peek.len_utf8();
        self.peek = self.input[self.index..].chars().next().unwrap_or(chars::EOF);
    }

    fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    fn scan_token(&mut self) -> Option<Token> {
        while !self.at_end() && chars::is_whitespace(self.peek) {
            self.advance();
        }

        if self.at_end() {
            return None;
        }

        let start = self.index;
        let ch = self.peek;

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier());
        }

        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        let token = match ch {
            chars::PERIOD => {
                self.advance();
                if chars::is_digit(self.peek) {
                    return Some(self.scan_number(start));
                }
                Token::new(start, self.index, TokenType::Character, 0.0, ch.to_string())
            }
            chars::LPAREN
            | chars::RPAREN
            | chars::LBRACKET
            | chars::RBRACKET
            | chars::LBRACE
            | chars::RBRACE
            | chars::COMMA
            | chars::COLON
            | chars::SEMICOLON => self.scan_character(start, ch),
            _ if chars::is_quote(ch) => self.scan_string(ch),
            chars::PLUS | chars::MINUS | chars::STAR | chars::SLASH | chars::PERCENT | chars::QUESTION => {
                self.scan_operator(start, &ch.to_string())
            }
            chars::LT | chars::GT => self.scan_complex_operator(start, ch, chars::EQ),
            chars::BANG | chars::EQ => self.scan_equality_operator(start, ch),
            chars::AMPERSAND => self.scan_doubled_operator(start, chars::AMPERSAND),
            chars::BAR => self.scan_doubled_operator(start, chars::BAR),
            _ => {
                self.advance();
                Token::new(
                    start,
                    self.index,
                    TokenType::Error,
                    0.0,
                    format!(
                        "Lexer Error: Unexpected character [{}] at column {} in expression [{}]",
                        ch, start, self.input
                    ),
                )
            }
        };

        Some(token)
    }

    fn scan_character(&mut self, start: usize, ch: char) -> Token {
        self.advance();
        Token::new(start, self.index, TokenType::Character, 0.0, ch.to_string())
    }

    fn scan_operator(&mut self, start: usize, op: &str) -> Token {
        self.advance();
        Token::operator(start, self.index, op)
    }

    /// `<` / `<=`, `>` / `>=`
    fn scan_complex_operator(&mut self, start: usize, first: char, second: char) -> Token {
        self.advance();
        if self.peek == second {
            self.advance();
            return Token::operator(start, self.index, &format!("{}{}", first, second));
        }
        Token::operator(start, self.index, &first.to_string())
    }

    /// `!`, `!=`, `!==`, `=`, `==`, `===`
    fn scan_equality_operator(&mut self, start: usize, first: char) -> Token {
        let mut op = first.to_string();
        self.advance();
        if self.peek == chars::EQ {
            op.push(chars::EQ);
            self.advance();
            if self.peek == chars::EQ {
                op.push(chars::EQ);
                self.advance();
            }
        }
        Token::operator(start, self.index, &op)
    }

    /// `&&` and `|` / `||`; a lone `&` is not part of the language
    fn scan_doubled_operator(&mut self, start: usize, ch: char) -> Token {
        self.advance();
        if self.peek == ch {
            self.advance();
            return Token::operator(start, self.index, &format!("{}{}", ch, ch));
        }
        if ch == chars::AMPERSAND {
            return Token::new(
                start,
                self.index,
                TokenType::Error,
                0.0,
                format!(
                    "Lexer Error: Unexpected character [&] at column {} in expression [{}]",
                    start, self.input
                ),
            );
        }
        Token::operator(start, self.index, &ch.to_string())
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.index;
        self.advance();

        while !self.at_end() && chars::is_identifier_part(self.peek) {
            self.advance();
        }

        let str_value = self.input[start..self.index].to_string();
        let token_type = if KEYWORDS.contains(&str_value.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };

        Token::new(start, self.index, token_type, 0.0, str_value)
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while !self.at_end() {
            if chars::is_digit(self.peek) || self.peek == chars::PERIOD {
                self.advance();
            } else if self.peek == 'e' || self.peek == 'E' {
                self.advance();
                if self.peek == chars::PLUS || self.peek == chars::MINUS {
                    self.advance();
                }
            } else {
                break;
            }
        }

        let str_value = &self.input[start..self.index];
        match str_value.parse::<f64>() {
            Ok(num_value) => Token::new(start, self.index, TokenType::Number, num_value, str_value.to_string()),
            Err(_) => Token::new(
                start,
                self.index,
                TokenType::Error,
                0.0,
                format!(
                    "Lexer Error: Invalid number [{}] at column {} in expression [{}]",
                    str_value, start, self.input
                ),
            ),
        }
    }

    fn scan_string(&mut self, quote: char) -> Token {
        let start = self.index;
        self.advance();

        let mut buffer = String::new();

        while !self.at_end() {
            let ch = self.peek;
            if ch == chars::BACKSLASH {
                self.advance();
                if self.at_end() {
                    break;
                }
                buffer.push(match self.peek {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    other => other,
                });
                self.advance();
            } else if ch == quote {
                self.advance();
                return Token::new(start, self.index, TokenType::String, 0.0, buffer);
            } else {
                buffer.push(ch);
                self.advance();
            }
        }

        Token::new(
            start,
            self.index,
            TokenType::Error,
            0.0,
            format!(
                "Lexer Error: Unterminated quote at column {} in expression [{}]",
                start, self.input
            ),
        )
    }
}
