//! Command trait, registry, and dispatch logic.
//!
//! The registry is an ordered table built once at startup. A submitted line is
//! split on whitespace; the first token, lowercased, selects the command and
//! the rest are its arguments. There is no quoting, piping or expansion.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};
use futures::future::LocalBoxFuture;
use termfolio_types::error::{Result, TermfolioError};

use crate::display::{DisplayValue, Node, Tone};

/// Output produced by a command.
pub enum CommandOutput {
    /// Ready to show.
    Display(DisplayValue),
    /// Produced later; the controller awaits it before appending to history.
    Deferred(LocalBoxFuture<'static, Result<DisplayValue>>),
    /// Signal to empty the history.
    Clear,
}

impl CommandOutput {
    pub fn text(s: impl Into<String>) -> Self {
        CommandOutput::Display(DisplayValue::Text(s.into()))
    }
}

impl From<Node> for CommandOutput {
    fn from(node: Node) -> Self {
        CommandOutput::Display(DisplayValue::Structured(node))
    }
}

impl fmt::Debug for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Display(v) => f.debug_tuple("Display").field(v).finish(),
            CommandOutput::Deferred(_) => f.write_str("Deferred(..)"),
            CommandOutput::Clear => f.write_str("Clear"),
        }
    }
}

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Shared services passed to every command.
pub struct Environment<'a> {
    /// Clock for time queries.
    pub clock: &'a dyn Clock,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types). Lowercase.
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Minimum width of the name column in `help`.
const HELP_NAME_WIDTH: usize = 12;

/// Ordered registry of available commands with dispatch.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command. A command with the same name is replaced in place,
    /// keeping its original position.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        match self.commands.iter().position(|c| c.name() == cmd.name()) {
            Some(idx) => self.commands[idx] = cmd,
            None => self.commands.push(cmd),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Look up a command by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        let name_lower = name.to_ascii_lowercase();
        self.commands
            .iter()
            .find(|c| c.name() == name_lower)
            .map(|c| &**c)
    }

    /// Names starting with `partial` (ignoring case), in registration order.
    pub fn completions(&self, partial: &str) -> Vec<&str> {
        let partial_lower = partial.to_ascii_lowercase();
        self.commands
            .iter()
            .map(|c| c.name())
            .filter(|name| name.to_ascii_lowercase().starts_with(&partial_lower))
            .collect()
    }

    /// Parse and execute a command line.
    ///
    /// Blank input produces empty output. An unregistered name produces
    /// [`TermfolioError::UnknownCommand`].
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Ok(CommandOutput::text(""));
        };
        let name_lower = first.to_ascii_lowercase();
        let args: Vec<&str> = tokens.collect();

        // `help` needs the registry itself.
        if name_lower == "help" && self.find("help").is_some() {
            return Ok(self.execute_help());
        }

        match self.find(&name_lower) {
            Some(cmd) => {
                log::debug!("Dispatching '{name_lower}' with {} args", args.len());
                cmd.execute(&args, env)
            },
            None => Err(TermfolioError::UnknownCommand(name_lower)),
        }
    }

    /// Every registered command with its description, in registration order.
    fn execute_help(&self) -> CommandOutput {
        let key_width = self
            .commands
            .iter()
            .map(|c| c.name().len() + 2)
            .max()
            .unwrap_or(0)
            .max(HELP_NAME_WIDTH);
        let rows = self
            .commands
            .iter()
            .map(|c| (c.name().to_string(), c.description().to_string()))
            .collect();
        Node::Group(vec![
            Node::Line(Tone::Accent, "Available commands:".to_string()),
            Node::Pairs { key_width, rows },
        ])
        .into()
    }
}
