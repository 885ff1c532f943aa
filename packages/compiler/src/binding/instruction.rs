//! The per-attribute instruction accumulator and the interpreter's result type.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use super::expressions::{
    BindingExpression, InterpolationExpression, ListenerExpression, NameExpression,
};

/// One entry of `BindingInstruction::attributes`.
#[derive(Debug, Clone)]
pub enum InstructionAttribute {
    /// Raw text, e.g. the loop variable written by `for`.
    Literal(String),
    Binding(BindingExpression),
    Name(NameExpression),
    /// An `options` segment whose value contains `${...}`.
    Interpolation(InterpolationExpression),
}

impl InstructionAttribute {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            InstructionAttribute::Literal(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_binding(&self) -> Option<&BindingExpression> {
        match self {
            InstructionAttribute::Binding(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&NameExpression> {
        match self {
            InstructionAttribute::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_interpolation(&self) -> Option<&InterpolationExpression> {
        match self {
            InstructionAttribute::Interpolation(interpolation) => Some(interpolation),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            InstructionAttribute::Literal(text) => Value::String(text.clone()),
            InstructionAttribute::Binding(binding) => binding.to_json(),
            InstructionAttribute::Name(name) => name.to_json(),
            InstructionAttribute::Interpolation(interpolation) => interpolation.to_json(),
        }
    }
}

/// Bindings collected for one template attribute.
///
/// Keys are unique; inserting an existing key replaces its value and keeps
/// its position.
#[derive(Debug, Clone)]
pub struct BindingInstruction {
    attr_name: String,
    attributes: IndexMap<String, InstructionAttribute>,
}

impl BindingInstruction {
    pub fn new(attr_name: impl Into<String>) -> Self {
        BindingInstruction {
            attr_name: attr_name.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn attr_name(&self) -> &str {
        &self.attr_name
    }

    pub fn attributes(&self) -> &IndexMap<String, InstructionAttribute> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&InstructionAttribute> {
        self.attributes.get(key)
    }

    pub fn binding(&self, key: &str) -> Option<&BindingExpression> {
        self.get(key).and_then(InstructionAttribute::as_binding)
    }

    /// Insert-or-overwrite; returns the replaced value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: InstructionAttribute,
    ) -> Option<InstructionAttribute> {
        self.attributes.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn to_json(&self) -> Value {
        let attributes: Map<String, Value> = self
            .attributes
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        json!({
            "attrName": self.attr_name,
            "attributes": attributes,
        })
    }
}

/// What a binding command turned an attribute into.
#[derive(Debug, Clone)]
pub enum Interpretation {
    Instruction(BindingInstruction),
    Listener(ListenerExpression),
    Name(NameExpression),
}

impl Interpretation {
    pub fn as_instruction(&self) -> Option<&BindingInstruction> {
        match self {
            Interpretation::Instruction(instruction) => Some(instruction),
            _ => None,
        }
    }

    pub fn into_instruction(self) -> Option<BindingInstruction> {
        match self {
            Interpretation::Instruction(instruction) => Some(instruction),
            _ => None,
        }
    }

    pub fn as_listener(&self) -> Option<&ListenerExpression> {
        match self {
            Interpretation::Listener(listener) => Some(listener),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&NameExpression> {
        match self {
            Interpretation::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Interpretation::Instruction(instruction) => instruction.to_json(),
            Interpretation::Listener(listener) => listener.to_json(),
            Interpretation::Name(name) => name.to_json(),
        }
    }
}
