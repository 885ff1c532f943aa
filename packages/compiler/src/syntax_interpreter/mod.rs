/**
 * Syntax Interpreter
 *
 * Turns a `name.command="value"` attribute into a binding instruction,
 * listener or named reference
 */
mod command;
mod options;

pub use command::{BindingCommand, PropertyCommand, UnknownCommand};
pub use options::scan_options;

use std::rc::Rc;

use crate::binding::{
    determine_default_binding_mode, BindingExpression, BindingInstruction, BindingMode,
    EventManager, InstructionAttribute, Interpretation, ListenerExpression, NameExpression,
    NoopEventManager, NoopObserverLocator, ObserverLocator, TemplateElement, ViewResources,
};
use crate::config::{InterpreterConfig, UnknownCommandPolicy};
use crate::error::{BindingError, Result};
use crate::expression_parser::{ExpressionParser, Parser, AST};
use crate::logging::{LogLevel, Logger, NullLogger};

/// Parses one attribute into an instruction that is being built.
///
/// `options` hands every `key: value` segment of its value back through this
/// callback, so a segment may itself carry a binding command.
pub trait AttributeParser {
    fn parse_attribute(
        &self,
        resources: &dyn ViewResources,
        element: &dyn TemplateElement,
        attr_name: &str,
        attr_value: &str,
        instruction: &mut BindingInstruction,
    ) -> Result<()>;
}

/// What surrounds the attribute being interpreted.
#[derive(Clone, Copy)]
pub struct InterpretContext<'a> {
    pub language: &'a dyn AttributeParser,
    pub resources: &'a dyn ViewResources,
    pub element: &'a dyn TemplateElement,
}

impl<'a> InterpretContext<'a> {
    pub fn new(
        language: &'a dyn AttributeParser,
        resources: &'a dyn ViewResources,
        element: &'a dyn TemplateElement,
    ) -> Self {
        InterpretContext {
            language,
            resources,
            element,
        }
    }
}

pub struct SyntaxInterpreter {
    parser: Box<dyn ExpressionParser>,
    observer_locator: Rc<dyn ObserverLocator>,
    event_manager: Rc<dyn EventManager>,
    config: InterpreterConfig,
    logger: Box<dyn Logger>,
}

impl SyntaxInterpreter {
    pub fn new(
        parser: Box<dyn ExpressionParser>,
        observer_locator: Rc<dyn ObserverLocator>,
        event_manager: Rc<dyn EventManager>,
    ) -> Self {
        SyntaxInterpreter {
            parser,
            observer_locator,
            event_manager,
            config: InterpreterConfig::default(),
            logger: Box::new(NullLogger::new()),
        }
    }

    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Box<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn parser(&self) -> &dyn ExpressionParser {
        self.parser.as_ref()
    }

    pub fn observer_locator(&self) -> &Rc<dyn ObserverLocator> {
        &self.observer_locator
    }

    pub fn event_manager(&self) -> &Rc<dyn EventManager> {
        &self.event_manager
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    pub fn determine_default_binding_mode(
        &self,
        element: &dyn TemplateElement,
        attr_name: &str,
    ) -> BindingMode {
        determine_default_binding_mode(element.tag_name(), attr_name)
    }

    /// Resolves a command keyword, applying the unknown-command policy.
    ///
    /// `Ok(None)` means the keyword is unknown and should be ignored.
    pub fn resolve_command(&self, keyword: &str) -> Result<Option<BindingCommand>> {
        match keyword.parse::<BindingCommand>() {
            Ok(command) => Ok(Some(command)),
            Err(UnknownCommand) => {
                if self.logger.is_enabled(LogLevel::Debug) {
                    self.logger
                        .debug(&format!("unknown binding command '{}'", keyword));
                }
                match self.config.unknown_commands {
                    UnknownCommandPolicy::Ignore => Ok(None),
                    UnknownCommandPolicy::Reject => {
                        Err(BindingError::UnknownCommand(keyword.to_string()))
                    }
                }
            }
        }
    }

    /// Interprets `attr_name.command="attr_value"`.
    ///
    /// Property commands extend `existing` when one is given. Listener, `ref`
    /// and `options` results never merge into it.
    pub fn interpret(
        &self,
        context: InterpretContext<'_>,
        command: &str,
        attr_name: &str,
        attr_value: &str,
        existing: Option<BindingInstruction>,
    ) -> Result<Option<Interpretation>> {
        let Some(command) = self.resolve_command(command)? else {
            return Ok(None);
        };
        self.log_dispatch(command, attr_name);

        let interpretation = match command {
            BindingCommand::Property(property) => {
                let mut instruction =
                    existing.unwrap_or_else(|| BindingInstruction::new(attr_name));
                self.bind_property(context, property, attr_name, attr_value, &mut instruction)?;
                Interpretation::Instruction(instruction)
            }
            BindingCommand::Trigger => {
                Interpretation::Listener(self.listener(attr_name, attr_value, false)?)
            }
            BindingCommand::Delegate => {
                Interpretation::Listener(self.listener(attr_name, attr_value, true)?)
            }
            BindingCommand::Ref => Interpretation::Name(NameExpression::new(attr_name)),
            BindingCommand::Options => {
                Interpretation::Instruction(self.options(context, attr_name, attr_value)?)
            }
        };
        Ok(Some(interpretation))
    }

    /// Like `interpret`, but writes property bindings into `instruction`.
    ///
    /// Other commands are still evaluated, so their errors surface, and their
    /// results are dropped.
    pub fn interpret_into(
        &self,
        context: InterpretContext<'_>,
        command: &str,
        attr_name: &str,
        attr_value: &str,
        instruction: &mut BindingInstruction,
    ) -> Result<()> {
        let Some(command) = self.resolve_command(command)? else {
            return Ok(());
        };
        self.log_dispatch(command, attr_name);

        match command {
            BindingCommand::Property(property) => {
                self.bind_property(context, property, attr_name, attr_value, instruction)
            }
            BindingCommand::Trigger => self.listener(attr_name, attr_value, false).map(drop),
            BindingCommand::Delegate => self.listener(attr_name, attr_value, true).map(drop),
            BindingCommand::Ref => Ok(()),
            BindingCommand::Options => self.options(context, attr_name, attr_value).map(drop),
        }
    }

    fn log_dispatch(&self, command: BindingCommand, attr_name: &str) {
        if self.logger.is_enabled(LogLevel::Debug) {
            self.logger
                .debug(&format!("{}.{}: dispatching", attr_name, command));
        }
    }

    fn bind_property(
        &self,
        context: InterpretContext<'_>,
        command: PropertyCommand,
        attr_name: &str,
        attr_value: &str,
        instruction: &mut BindingInstruction,
    ) -> Result<()> {
        let unify = self.config.unify_class_alias;
        let (target, mode) = match command {
            PropertyCommand::For => return self.for_loop(context, attr_name, attr_value, instruction),
            PropertyCommand::OneWay => (class_alias(attr_name), BindingMode::OneWay),
            PropertyCommand::OneTime => (class_alias(attr_name), BindingMode::OneTime),
            PropertyCommand::TwoWay => {
                let target = if unify { class_alias(attr_name) } else { attr_name };
                (target, BindingMode::TwoWay)
            }
            PropertyCommand::Bind => {
                let target = if unify { class_alias(attr_name) } else { attr_name };
                (target, self.determine_default_binding_mode(context.element, attr_name))
            }
        };

        let expression = self.parser.parse(attr_value)?;
        instruction.insert(
            attr_name,
            InstructionAttribute::Binding(self.binding(context, target, expression, mode)),
        );
        Ok(())
    }

    fn for_loop(
        &self,
        context: InterpretContext<'_>,
        attr_name: &str,
        attr_value: &str,
        instruction: &mut BindingInstruction,
    ) -> Result<()> {
        let parts: Vec<&str> = attr_value.split(" of ").collect();
        let [local, items] = parts.as_slice() else {
            return Err(BindingError::InvalidForSyntax);
        };
        if local.trim().is_empty() || items.trim().is_empty() {
            return Err(BindingError::InvalidForSyntax);
        }

        let expression = self.parser.parse(items)?;
        instruction.insert("local", InstructionAttribute::Literal(local.to_string()));
        instruction.insert(
            attr_name,
            InstructionAttribute::Binding(self.binding(
                context,
                attr_name,
                expression,
                BindingMode::OneWay,
            )),
        );
        Ok(())
    }

    fn binding(
        &self,
        context: InterpretContext<'_>,
        target: &str,
        expression: AST,
        mode: BindingMode,
    ) -> BindingExpression {
        BindingExpression::new(
            self.observer_locator.clone(),
            target,
            expression,
            mode,
            context.resources.filter_lookup(),
        )
    }

    fn listener(
        &self,
        attr_name: &str,
        attr_value: &str,
        delegate: bool,
    ) -> Result<ListenerExpression> {
        let expression = self.parser.parse(attr_value)?;
        Ok(ListenerExpression::new(
            self.event_manager.clone(),
            attr_name,
            expression,
            delegate,
        ))
    }

    fn options(
        &self,
        context: InterpretContext<'_>,
        attr_name: &str,
        attr_value: &str,
    ) -> Result<BindingInstruction> {
        let mut instruction = BindingInstruction::new(attr_name);
        scan_options(attr_value, |name, value| {
            context.language.parse_attribute(
                context.resources,
                context.element,
                name,
                value,
                &mut instruction,
            )
        })?;
        Ok(instruction)
    }
}

impl Default for SyntaxInterpreter {
    /// Standard expression parser with compile-only runtime handles.
    fn default() -> Self {
        SyntaxInterpreter::new(
            Box::new(Parser::new()),
            Rc::new(NoopObserverLocator),
            Rc::new(NoopEventManager),
        )
    }
}

fn class_alias(attr_name: &str) -> &str {
    if attr_name == "class" {
        "className"
    } else {
        attr_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Element, ResourceRegistry};
    use std::cell::RefCell;

    /// Records every callback and writes the value back as a literal.
    #[derive(Default)]
    struct RecordingLanguage {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl AttributeParser for RecordingLanguage {
        fn parse_attribute(
            &self,
            _resources: &dyn ViewResources,
            _element: &dyn TemplateElement,
            attr_name: &str,
            attr_value: &str,
            instruction: &mut BindingInstruction,
        ) -> Result<()> {
            self.calls
                .borrow_mut()
                .push((attr_name.to_string(), attr_value.to_string()));
            instruction.insert(attr_name, InstructionAttribute::Literal(attr_value.to_string()));
            Ok(())
        }
    }

    fn interpreter() -> SyntaxInterpreter {
        SyntaxInterpreter::default()
    }

    fn run(
        interpreter: &SyntaxInterpreter,
        tag: &str,
        command: &str,
        attr_name: &str,
        attr_value: &str,
    ) -> Result<Option<Interpretation>> {
        let language = RecordingLanguage::default();
        let resources = ResourceRegistry::default();
        let element = Element::new(tag);
        let context = InterpretContext::new(&language, &resources, &element);
        interpreter.interpret(context, command, attr_name, attr_value, None)
    }

    #[test]
    fn one_way_aliases_class_but_two_way_does_not() {
        let interpreter = interpreter();

        let one_way = run(&interpreter, "div", "one-way", "class", "cls").unwrap().unwrap();
        let one_way = one_way.as_instruction().unwrap();
        assert_eq!(one_way.binding("class").unwrap().target_property(), "className");
        assert!(one_way.get("className").is_none());

        let two_way = run(&interpreter, "div", "two-way", "class", "cls").unwrap().unwrap();
        let two_way = two_way.as_instruction().unwrap();
        assert_eq!(two_way.binding("class").unwrap().target_property(), "class");
        assert!(two_way.get("className").is_none());
    }

    #[test]
    fn unified_alias_applies_to_bind() {
        let config = InterpreterConfig {
            unify_class_alias: true,
            ..InterpreterConfig::default()
        };
        let interpreter = interpreter().with_config(config);

        let bound = run(&interpreter, "div", "bind", "class", "cls").unwrap().unwrap();
        let binding = bound.as_instruction().unwrap().binding("class").unwrap();
        assert_eq!(binding.target_property(), "className");
        assert_eq!(binding.mode(), BindingMode::OneWay);
    }

    #[test]
    fn unknown_command_follows_policy() {
        assert!(run(&interpreter(), "div", "frobnicate", "x", "y").unwrap().is_none());

        let config = InterpreterConfig {
            unknown_commands: UnknownCommandPolicy::Reject,
            ..InterpreterConfig::default()
        };
        let rejecting = interpreter().with_config(config);
        assert_eq!(
            run(&rejecting, "div", "frobnicate", "x", "y").unwrap_err(),
            BindingError::UnknownCommand("frobnicate".into())
        );
    }

    #[derive(Default)]
    struct RecordingLogger {
        messages: Rc<RefCell<Vec<String>>>,
    }

    impl Logger for RecordingLogger {
        fn level(&self) -> LogLevel {
            LogLevel::Debug
        }
        fn debug(&self, msg: &str) {
            self.messages.borrow_mut().push(msg.to_string());
        }
        fn info(&self, _msg: &str) {}
        fn warn(&self, _msg: &str) {}
        fn error(&self, _msg: &str) {}
    }

    #[test]
    fn dispatch_and_unknown_commands_are_logged() {
        let logger = RecordingLogger::default();
        let messages = logger.messages.clone();
        let interpreter = interpreter().with_logger(Box::new(logger));

        run(&interpreter, "div", "bind", "title", "t").unwrap();
        run(&interpreter, "div", "frobnicate", "x", "y").unwrap();

        assert_eq!(
            *messages.borrow(),
            vec![
                "title.bind: dispatching".to_string(),
                "unknown binding command 'frobnicate'".to_string(),
            ]
        );
    }

    #[test]
    fn interpret_into_drops_listener_results() {
        let interpreter = interpreter();
        let language = RecordingLanguage::default();
        let resources = ResourceRegistry::default();
        let element = Element::new("button");
        let context = InterpretContext::new(&language, &resources, &element);
        let mut instruction = BindingInstruction::new("button");

        interpreter
            .interpret_into(context, "trigger", "click", "go()", &mut instruction)
            .unwrap();
        interpreter
            .interpret_into(context, "one-time", "title", "label", &mut instruction)
            .unwrap();

        assert_eq!(instruction.len(), 1);
        assert_eq!(
            instruction.binding("title").map(BindingExpression::mode),
            Some(BindingMode::OneTime)
        );
    }

    #[test]
    fn interpret_into_still_reports_parse_errors() {
        let interpreter = interpreter();
        let language = RecordingLanguage::default();
        let resources = ResourceRegistry::default();
        let element = Element::new("button");
        let context = InterpretContext::new(&language, &resources, &element);
        let mut instruction = BindingInstruction::new("button");

        let result = interpreter.interpret_into(context, "delegate", "click", "go(", &mut instruction);
        assert!(matches!(result, Err(BindingError::Parse { .. })));
    }

    #[test]
    fn options_hands_each_segment_to_the_language() {
        let interpreter = interpreter();
        let language = RecordingLanguage::default();
        let resources = ResourceRegistry::default();
        let element = Element::new("div");
        let context = InterpretContext::new(&language, &resources, &element);

        let existing = BindingInstruction::new("ignored");
        let result = interpreter
            .interpret(context, "options", "my-attr", "a: 1; b: 2", Some(existing))
            .unwrap()
            .unwrap()
            .into_instruction()
            .unwrap();

        assert_eq!(
            *language.calls.borrow(),
            vec![("a".to_string(), " 1".to_string()), ("b".to_string(), " 2".to_string())]
        );
        assert_eq!(result.attr_name(), "my-attr");
        assert_eq!(result.len(), 2);
    }
}
