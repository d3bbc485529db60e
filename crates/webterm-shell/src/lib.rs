//! Session interpreter for the webterm terminal.
//!
//! Commands implement the `Command` trait and are registered by name. The
//! `Interpreter` classifies each input line (statement chain, pipeline, or
//! single command), dispatches through the registry, and records the result
//! in the session transcript. Rendering surfaces observe the transcript
//! through the session's event bus.

mod commands;
mod interpreter;
pub mod markup;
mod network_commands;
mod registry;
mod services;
mod session;
pub mod text_commands;

/// Register all built-in commands into a registry.
pub use commands::register_builtins;
/// The session executor.
pub use interpreter::Interpreter;
/// A single executable command trait.
pub use registry::Command;
/// Registry of available commands with name resolution.
pub use registry::CommandRegistry;
/// Shared mutable environment passed to every command.
pub use registry::Environment;
/// Classification of a name in a non-first pipeline position.
pub use registry::{PipeStage, Stage};
/// Wall-clock source for `date`.
pub use services::{Clock, FixedClock, SystemClock, format_local};
/// Session state and its observers.
pub use session::{Direction, EventBus, SessionEvent, SessionListener, SessionState};
