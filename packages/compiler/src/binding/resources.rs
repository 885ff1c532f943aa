//! Collaborators the interpreter hands through to the bindings it creates.
//!
//! Observer locator and event manager belong to the runtime; this crate only
//! carries them. Filter lookup is consulted for diagnostics, never to run a
//! filter.

use indexmap::IndexSet;
use std::fmt;
use std::rc::Rc;

/// Runtime service that resolves property observers for a binding.
pub trait ObserverLocator: fmt::Debug {}

/// Runtime service that attaches event listeners for a listener binding.
pub trait EventManager: fmt::Debug {}

/// Resolves filter (value converter) names used in expressions.
pub trait FilterLookup: fmt::Debug {
    fn has_filter(&self, name: &str) -> bool;
}

/// Resources visible to the template being compiled.
pub trait ViewResources {
    fn filter_lookup(&self) -> Rc<dyn FilterLookup>;
}

/// The element that carries the attribute.
pub trait TemplateElement {
    fn tag_name(&self) -> &str;
}

/// Observer locator for compile-only use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserverLocator;

impl ObserverLocator for NoopObserverLocator {}

/// Event manager for compile-only use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventManager;

impl EventManager for NoopEventManager {}

/// A bare element description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag_name: String,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Element {
            tag_name: tag_name.into(),
        }
    }
}

impl TemplateElement for Element {
    fn tag_name(&self) -> &str {
        &self.tag_name
    }
}

/// Set of registered filter names.
#[derive(Debug, Default, Clone)]
pub struct FilterRegistry {
    names: IndexSet<String>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl FilterLookup for FilterRegistry {
    fn has_filter(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl<S: Into<String>> FromIterator<S> for FilterRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FilterRegistry {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// `ViewResources` backed by a shared `FilterRegistry`.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    filters: Rc<FilterRegistry>,
}

impl ResourceRegistry {
    pub fn new(filters: FilterRegistry) -> Self {
        ResourceRegistry {
            filters: Rc::new(filters),
        }
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }
}

impl ViewResources for ResourceRegistry {
    fn filter_lookup(&self) -> Rc<dyn FilterLookup> {
        self.filters.clone()
    }
}
