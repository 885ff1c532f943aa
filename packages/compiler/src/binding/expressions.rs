//! Binding descriptions produced by the interpreter.

use serde::Serialize;
use serde_json::{json, Value};
use std::rc::Rc;

use super::mode::BindingMode;
use super::resources::{EventManager, FilterLookup, ObserverLocator};
use crate::expression_parser::{serialize, AST};

/// A property binding: `target_property` kept in sync with `source_expression`.
#[derive(Debug, Clone)]
pub struct BindingExpression {
    observer_locator: Rc<dyn ObserverLocator>,
    target_property: String,
    source_expression: AST,
    mode: BindingMode,
    filter_lookup: Rc<dyn FilterLookup>,
}

impl BindingExpression {
    pub fn new(
        observer_locator: Rc<dyn ObserverLocator>,
        target_property: impl Into<String>,
        source_expression: AST,
        mode: BindingMode,
        filter_lookup: Rc<dyn FilterLookup>,
    ) -> Self {
        BindingExpression {
            observer_locator,
            target_property: target_property.into(),
            source_expression,
            mode,
            filter_lookup,
        }
    }

    pub fn target_property(&self) -> &str {
        &self.target_property
    }

    pub fn source_expression(&self) -> &AST {
        &self.source_expression
    }

    pub fn mode(&self) -> BindingMode {
        self.mode
    }

    pub fn observer_locator(&self) -> &Rc<dyn ObserverLocator> {
        &self.observer_locator
    }

    pub fn filter_lookup(&self) -> &Rc<dyn FilterLookup> {
        &self.filter_lookup
    }

    /// Filters used by the expression that the lookup does not know about.
    pub fn missing_filters(&self) -> Vec<&str> {
        self.source_expression
            .filter_names()
            .into_iter()
            .filter(|name| !self.filter_lookup.has_filter(name))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "kind": "binding",
            "targetProperty": self.target_property,
            "mode": self.mode,
            "expression": serialize(&self.source_expression),
        })
    }
}

/// An event listener: evaluates `source_expression` when `target_event` fires.
#[derive(Debug, Clone)]
pub struct ListenerExpression {
    event_manager: Rc<dyn EventManager>,
    target_event: String,
    source_expression: AST,
    delegate: bool,
}

impl ListenerExpression {
    pub fn new(
        event_manager: Rc<dyn EventManager>,
        target_event: impl Into<String>,
        source_expression: AST,
        delegate: bool,
    ) -> Self {
        ListenerExpression {
            event_manager,
            target_event: target_event.into(),
            source_expression,
            delegate,
        }
    }

    pub fn target_event(&self) -> &str {
        &self.target_event
    }

    pub fn source_expression(&self) -> &AST {
        &self.source_expression
    }

    /// `true` when the listener is attached through event delegation
    /// rather than directly on the element.
    pub fn delegate(&self) -> bool {
        self.delegate
    }

    pub fn event_manager(&self) -> &Rc<dyn EventManager> {
        &self.event_manager
    }

    pub fn to_json(&self) -> Value {
        json!({
            "kind": "listener",
            "targetEvent": self.target_event,
            "delegate": self.delegate,
            "expression": serialize(&self.source_expression),
        })
    }
}

/// Where a named reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameMode {
    /// Created by the `ref` command.
    Default,
    /// Created by a bare `ref="name"` attribute; refers to the element itself.
    Element,
}

/// A named reference, stored on the binding context under `property`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameExpression {
    property: String,
    mode: NameMode,
}

impl NameExpression {
    pub fn new(property: impl Into<String>) -> Self {
        Self::with_mode(property, NameMode::Default)
    }

    pub fn with_mode(property: impl Into<String>, mode: NameMode) -> Self {
        NameExpression {
            property: property.into(),
            mode,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn mode(&self) -> NameMode {
        self.mode
    }

    pub fn to_json(&self) -> Value {
        json!({
            "kind": "name",
            "property": self.property,
            "mode": self.mode,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationPart {
    Literal(String),
    Expression(AST),
}

/// `${...}` interpolation in a plain attribute value; always one-way.
#[derive(Debug, Clone)]
pub struct InterpolationExpression {
    observer_locator: Rc<dyn ObserverLocator>,
    target_property: String,
    parts: Vec<InterpolationPart>,
    filter_lookup: Rc<dyn FilterLookup>,
}

impl InterpolationExpression {
    pub fn new(
        observer_locator: Rc<dyn ObserverLocator>,
        target_property: impl Into<String>,
        parts: Vec<InterpolationPart>,
        filter_lookup: Rc<dyn FilterLookup>,
    ) -> Self {
        InterpolationExpression {
            observer_locator,
            target_property: target_property.into(),
            parts,
            filter_lookup,
        }
    }

    pub fn target_property(&self) -> &str {
        &self.target_property
    }

    pub fn parts(&self) -> &[InterpolationPart] {
        &self.parts
    }

    pub fn mode(&self) -> BindingMode {
        BindingMode::OneWay
    }

    pub fn observer_locator(&self) -> &Rc<dyn ObserverLocator> {
        &self.observer_locator
    }

    pub fn filter_lookup(&self) -> &Rc<dyn FilterLookup> {
        &self.filter_lookup
    }

    pub fn expressions(&self) -> impl Iterator<Item = &AST> {
        self.parts.iter().filter_map(|part| match part {
            InterpolationPart::Expression(ast) => Some(ast),
            InterpolationPart::Literal(_) => None,
        })
    }

    pub fn to_json(&self) -> Value {
        let parts: Vec<Value> = self
            .parts
            .iter()
            .map(|part| match part {
                InterpolationPart::Literal(text) => json!({ "literal": text }),
                InterpolationPart::Expression(ast) => json!({ "expression": serialize(ast) }),
            })
            .collect();
        json!({
            "kind": "interpolation",
            "targetProperty": self.target_property,
            "mode": self.mode(),
            "parts": parts,
        })
    }
}
