/**
 * Binding Model
 *
 * Instructions, binding expressions, modes, and the collaborator handles
 * they carry
 */
mod expressions;
mod instruction;
mod mode;
mod resources;

pub use expressions::{
    BindingExpression, InterpolationExpression, InterpolationPart, ListenerExpression,
    NameExpression, NameMode,
};
pub use instruction::{BindingInstruction, InstructionAttribute, Interpretation};
pub use mode::{determine_default_binding_mode, BindingMode};
pub use resources::{
    Element, EventManager, FilterLookup, FilterRegistry, NoopEventManager, NoopObserverLocator,
    ObserverLocator, ResourceRegistry, TemplateElement, ViewResources,
};
