//! Command interpreter and terminal session.
//!
//! Commands implement the `Command` trait and are registered by name. The
//! `InputController` owns the registry, the history and the line being
//! edited; it turns input events into submissions and records what each one
//! printed. The background grid and the secret message live here too since
//! both are part of the session.

pub mod background;
pub mod cipher;
mod commands;
pub mod controller;
pub mod display;
mod fun_commands;
pub mod history;
mod interpreter;
pub mod secret;

/// Register all portfolio commands (about, projects, echo, ...) into a registry.
pub use commands::register_builtins;
/// Shown by `echo` when the decoded secret is typed back.
pub use commands::CONGRATULATIONS;
/// Register cowsay and cowthink into a registry.
pub use fun_commands::register_fun_commands;
/// Cow art and the bubble helpers behind cowsay.
pub use fun_commands::{BUBBLE_WIDTH, COW, wrap_text};
/// Wall clock abstraction used by `date`.
pub use interpreter::{Clock, SystemClock};
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (display value, deferred value, clear signal).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Shared environment passed to every command.
pub use interpreter::Environment;
