#![deny(clippy::all)]

/**
 * Binding Syntax CLI
 *
 * Runs template attributes through the binding language and reports the
 * resulting instructions as JSON
 */
pub use binding_syntax as compiler;

pub mod commands;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
