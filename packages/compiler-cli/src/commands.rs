// Commands
//
// The work behind each `bindc` subcommand. Every command returns the JSON
// document the binary prints.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};

use binding_syntax::binding::{
    Element, FilterLookup, FilterRegistry, InstructionAttribute, ResourceRegistry,
};
use binding_syntax::binding_language::{AttributeExpression, AttributeInfo, BindingLanguage};
use binding_syntax::config::InterpreterConfig;
use binding_syntax::expression_parser::{serialize, Parser, AST};
use binding_syntax::logging::{ConsoleLogger, LogLevel};
use binding_syntax::syntax_interpreter::{InterpretContext, SyntaxInterpreter};
use binding_syntax::Interpretation;

/// Options shared by the `attr` and `interpret` subcommands.
#[derive(Debug, Clone)]
pub struct Session {
    pub tag: String,
    pub filters: Vec<String>,
    pub config: InterpreterConfig,
    pub verbose: bool,
}

impl Session {
    pub fn new(tag: impl Into<String>) -> Self {
        Session {
            tag: tag.into(),
            filters: Vec::new(),
            config: InterpreterConfig::default(),
            verbose: false,
        }
    }

    fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            self.config.log_level
        }
    }

    pub fn language(&self) -> BindingLanguage {
        let interpreter = SyntaxInterpreter::default()
            .with_config(self.config.clone())
            .with_logger(Box::new(ConsoleLogger::new(self.log_level())));
        BindingLanguage::new(interpreter)
    }

    fn resources(&self) -> ResourceRegistry {
        ResourceRegistry::new(self.filters.iter().cloned().collect::<FilterRegistry>())
    }
}

/// Reads an interpreter config file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<InterpreterConfig> {
    match path {
        Some(path) => InterpreterConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(InterpreterConfig::default()),
    }
}

/// Splits `NAME=VALUE` at the first `=`.
pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got '{}'", arg))?;
    if name.is_empty() {
        return Err(anyhow!("attribute name is empty in '{}'", arg));
    }
    Ok((name.to_string(), value.to_string()))
}

/// `bindc attr`: every attribute of one element, in order.
pub fn run_attr(session: &Session, attributes: &[(String, String)]) -> Result<Value> {
    let language = session.language();
    let resources = session.resources();
    let element = Element::new(session.tag.as_str());
    let logger = language.interpreter().logger();

    let mut results = Vec::with_capacity(attributes.len());
    for (name, value) in attributes {
        let info = language
            .parse_attribute_info(&resources, &element, name, value, None)
            .with_context(|| format!("failed to interpret {}=\"{}\"", name, value))?;
        for warning in missing_filter_warnings(resources.filters(), &info) {
            logger.warn(&warning);
        }
        results.push(info.to_json());
    }

    Ok(json!({
        "tag": session.tag,
        "attributes": results,
    }))
}

/// `bindc interpret`: one command, bypassing attribute name splitting.
pub fn run_interpret(session: &Session, command: &str, name: &str, value: &str) -> Result<Value> {
    let language = session.language();
    let resources = session.resources();
    let element = Element::new(session.tag.as_str());
    let context = InterpretContext::new(&language, &resources, &element);

    let interpretation = language
        .interpreter()
        .interpret(context, command, name, value, None)
        .with_context(|| format!("failed to interpret {}.{}=\"{}\"", name, command, value))?;

    Ok(interpretation.map_or(Value::Null, |result| result.to_json()))
}

/// `bindc expr`: canonical form and tree of one expression.
pub fn run_expr(source: &str) -> Result<Value> {
    let ast = Parser::new()
        .parse(source)
        .with_context(|| format!("failed to parse expression [{}]", source))?;
    Ok(json!({
        "expression": serialize(&ast),
        "ast": serde_json::to_value(&ast)?,
    }))
}

/// One warning per filter that `info` uses but `filters` does not know.
pub fn missing_filter_warnings(filters: &dyn FilterLookup, info: &AttributeInfo) -> Vec<String> {
    let mut sources: Vec<(&str, &AST)> = Vec::new();
    match &info.expression {
        Some(AttributeExpression::Interpreted(Interpretation::Instruction(instruction))) => {
            for attribute in instruction.attributes().values() {
                match attribute {
                    InstructionAttribute::Binding(binding) => {
                        sources.push((binding.target_property(), binding.source_expression()));
                    }
                    InstructionAttribute::Interpolation(interpolation) => {
                        let target = interpolation.target_property();
                        sources.extend(interpolation.expressions().map(|ast| (target, ast)));
                    }
                    InstructionAttribute::Literal(_) | InstructionAttribute::Name(_) => {}
                }
            }
        }
        Some(AttributeExpression::Interpreted(Interpretation::Listener(listener))) => {
            sources.push((listener.target_event(), listener.source_expression()));
        }
        Some(AttributeExpression::Interpolation(interpolation)) => {
            let target = interpolation.target_property();
            sources.extend(interpolation.expressions().map(|ast| (target, ast)));
        }
        Some(AttributeExpression::Interpreted(Interpretation::Name(_))) | None => {}
    }

    sources
        .into_iter()
        .flat_map(|(target, ast)| {
            ast.filter_names()
                .into_iter()
                .filter(|name| !filters.has_filter(name))
                .map(move |name| format!("{}: filter '{}' is not registered", target, name))
        })
        .collect()
}
