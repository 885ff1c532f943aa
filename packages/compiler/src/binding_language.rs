/**
 * Binding Language
 *
 * Splits `name.command` attribute names, handles bare `ref` attributes and
 * `${...}` interpolation in plain values
 */
use serde_json::{json, Value};

use crate::binding::{
    BindingInstruction, InstructionAttribute, InterpolationExpression, InterpolationPart,
    Interpretation, NameExpression, NameMode, TemplateElement, ViewResources,
};
use crate::chars;
use crate::error::Result;
use crate::logging::LogLevel;
use crate::syntax_interpreter::{AttributeParser, InterpretContext, SyntaxInterpreter};

/// What an attribute turned into.
#[derive(Debug, Clone)]
pub enum AttributeExpression {
    Interpreted(Interpretation),
    Interpolation(InterpolationExpression),
}

impl AttributeExpression {
    pub fn as_interpretation(&self) -> Option<&Interpretation> {
        match self {
            AttributeExpression::Interpreted(interpretation) => Some(interpretation),
            AttributeExpression::Interpolation(_) => None,
        }
    }

    pub fn as_interpolation(&self) -> Option<&InterpolationExpression> {
        match self {
            AttributeExpression::Interpolation(interpolation) => Some(interpolation),
            AttributeExpression::Interpreted(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            AttributeExpression::Interpreted(interpretation) => interpretation.to_json(),
            AttributeExpression::Interpolation(interpolation) => interpolation.to_json(),
        }
    }
}

/// The parsed form of one attribute.
#[derive(Debug, Clone)]
pub struct AttributeInfo {
    /// Target name, with the command suffix removed.
    pub attr_name: String,
    pub attr_value: String,
    pub command: Option<String>,
    /// `None` for plain text values and ignored commands.
    pub expression: Option<AttributeExpression>,
}

impl AttributeInfo {
    pub fn to_json(&self) -> Value {
        json!({
            "attrName": self.attr_name,
            "attrValue": self.attr_value,
            "command": self.command,
            "expression": self.expression.as_ref().map(AttributeExpression::to_json),
        })
    }
}

pub struct BindingLanguage {
    interpreter: SyntaxInterpreter,
}

impl BindingLanguage {
    pub fn new(interpreter: SyntaxInterpreter) -> Self {
        BindingLanguage { interpreter }
    }

    pub fn interpreter(&self) -> &SyntaxInterpreter {
        &self.interpreter
    }

    pub fn parse_attribute_info(
        &self,
        resources: &dyn ViewResources,
        element: &dyn TemplateElement,
        attr_name: &str,
        attr_value: &str,
        existing: Option<BindingInstruction>,
    ) -> Result<AttributeInfo> {
        if let Some((name, command)) = split_command(attr_name) {
            let context = InterpretContext::new(self, resources, element);
            let expression = self
                .interpreter
                .interpret(context, command, name, attr_value, existing)?
                .map(AttributeExpression::Interpreted);
            return Ok(AttributeInfo {
                attr_name: name.to_string(),
                attr_value: attr_value.to_string(),
                command: Some(command.to_string()),
                expression,
            });
        }

        let expression = if attr_name == "ref" {
            let name = NameExpression::with_mode(attr_value, NameMode::Element);
            Some(AttributeExpression::Interpreted(Interpretation::Name(name)))
        } else {
            self.parse_content(resources, attr_name, attr_value)?
                .map(AttributeExpression::Interpolation)
        };

        Ok(AttributeInfo {
            attr_name: attr_name.to_string(),
            attr_value: attr_value.to_string(),
            command: None,
            expression,
        })
    }

    /// Parses `${...}` interpolation in a plain attribute value.
    ///
    /// Returns `None` when the value holds no complete interpolation.
    pub fn parse_content(
        &self,
        resources: &dyn ViewResources,
        attr_name: &str,
        attr_value: &str,
    ) -> Result<Option<InterpolationExpression>> {
        let pieces = split_interpolation(attr_value);
        if !pieces.iter().any(|piece| matches!(piece, Piece::Expression(_))) {
            return Ok(None);
        }

        let mut parts = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                Piece::Literal(text) => parts.push(InterpolationPart::Literal(text.to_string())),
                Piece::Expression(source) => {
                    let ast = self.interpreter.parser().parse(source)?;
                    parts.push(InterpolationPart::Expression(ast));
                }
            }
        }

        let logger = self.interpreter.logger();
        if logger.is_enabled(LogLevel::Debug) {
            logger.debug(&format!("{}: interpolation with {} parts", attr_name, parts.len()));
        }

        Ok(Some(InterpolationExpression::new(
            self.interpreter.observer_locator().clone(),
            attr_name,
            parts,
            resources.filter_lookup(),
        )))
    }
}

impl AttributeParser for BindingLanguage {
    fn parse_attribute(
        &self,
        resources: &dyn ViewResources,
        element: &dyn TemplateElement,
        attr_name: &str,
        attr_value: &str,
        instruction: &mut BindingInstruction,
    ) -> Result<()> {
        if let Some((name, command)) = split_command(attr_name) {
            let context = InterpretContext::new(self, resources, element);
            return self
                .interpreter
                .interpret_into(context, command, name, attr_value, instruction);
        }

        if attr_name == "ref" {
            let name = NameExpression::with_mode(attr_value, NameMode::Element);
            instruction.insert(attr_name, InstructionAttribute::Name(name));
            return Ok(());
        }

        let attribute = match self.parse_content(resources, attr_name, attr_value)? {
            Some(interpolation) => InstructionAttribute::Interpolation(interpolation),
            None => InstructionAttribute::Literal(attr_value.to_string()),
        };
        instruction.insert(attr_name, attribute);
        Ok(())
    }
}

/// `value.bind` -> `("value", "bind")`. Anything but exactly one `.` is not
/// a command.
fn split_command(attr_name: &str) -> Option<(&str, &str)> {
    let mut parts = attr_name.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(command), None) => Some((name.trim(), command.trim())),
        _ => None,
    }
}

#[derive(Debug, PartialEq)]
enum Piece<'a> {
    Literal(&'a str),
    Expression(&'a str),
}

/// Splits text around `${...}`. Braces inside quoted strings do not count,
/// and an unterminated `${` stays in the literal text.
fn split_interpolation(input: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut literal_start = 0;
    let mut search_from = 0;

    while let Some(offset) = input[search_from..].find("${") {
        let open = search_from + offset;
        let expr_start = open + 2;
        let Some(close) = find_closing_brace(input, expr_start) else {
            break;
        };

        pieces.push(Piece::Literal(&input[literal_start..open]));
        pieces.push(Piece::Expression(&input[expr_start..close]));
        literal_start = close + 1;
        search_from = literal_start;
    }

    if literal_start < input.len() || pieces.is_empty() {
        pieces.push(Piece::Literal(&input[literal_start..]));
    }
    pieces
}

fn find_closing_brace(input: &str, from: usize) -> Option<usize> {
    let mut depth = 1;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (index, ch) in input[from..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == chars::BACKSLASH {
            escaped = true;
            continue;
        }
        if let Some(open_quote) = quote {
            if ch == open_quote {
                quote = None;
            }
            continue;
        }
        if chars::is_quote(ch) {
            quote = Some(ch);
        } else if ch == chars::LBRACE {
            depth += 1;
        } else if ch == chars::RBRACE {
            depth -= 1;
            if depth == 0 {
                return Some(from + index);
            }
        }
    }
    None
}
