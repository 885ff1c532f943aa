/*
 * Character Codes
 *
 * Shared by the expression lexer and the attribute scanners.
 */

//! Character constants and classification helpers

pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n';
pub const VTAB: char = '\x0B';
pub const FF: char = '\x0C';
pub const CR: char = '\r';
pub const SPACE: char = ' ';
pub const NBSP: char = '\u{00A0}';

pub const BANG: char = '!';
pub const DQ: char = '"';
pub const DOLLAR: char = '$';
pub const PERCENT: char = '%';
pub const AMPERSAND: char = '&';
pub const SQ: char = '\'';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const STAR: char = '*';
pub const PLUS: char = '+';
pub const COMMA: char = ',';
pub const MINUS: char = '-';
pub const PERIOD: char = '.';
pub const SLASH: char = '/';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';
pub const LBRACKET: char = '[';
pub const BACKSLASH: char = '\\';
pub const RBRACKET: char = ']';
pub const UNDERSCORE: char = '_';
pub const LBRACE: char = '{';
pub const BAR: char = '|';
pub const RBRACE: char = '}';

/// Check if character is whitespace
pub fn is_whitespace(ch: char) -> bool {
    ch == SPACE || ch == TAB || ch == LF || ch == CR || ch == VTAB || ch == FF || ch == NBSP
}

/// Check if character is a digit
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if character can start an identifier
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == UNDERSCORE || ch == DOLLAR
}

/// Check if character can be part of an identifier
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch)
}

/// Check if character is a quote
pub fn is_quote(ch: char) -> bool {
    ch == SQ || ch == DQ
}
