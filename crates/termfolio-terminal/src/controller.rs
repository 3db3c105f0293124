//! The input line state machine.
//!
//! The controller owns everything mutable about a terminal session: the
//! current input text, the history-browsing cursor, and the history itself.
//! Each [`InputEvent`] is one transition:
//!
//! | event            | effect                                               |
//! |------------------|------------------------------------------------------|
//! | `TextInput(c)`   | append `c`                                           |
//! | `Backspace`      | drop the last character                              |
//! | `SetText(s)`     | replace the text                                     |
//! | `KeyPress(Enter)`| run the line, append the result, reset input         |
//! | `KeyPress(Up)`   | step one command further back in history             |
//! | `KeyPress(Down)` | step one command forward; past the newest clears     |
//! | `KeyPress(Tab)`  | complete a command name or list the candidates       |
//! | `Quit`           | report [`InputResult::Quit`]                         |
//!
//! Submission is `async` and takes `&mut self`, so a pending deferred command
//! blocks any further input until its output is in the history.

use termfolio_types::config::TermfolioConfig;
use termfolio_types::error::TermfolioError;
use termfolio_types::input::{InputEvent, Key};

use crate::commands::register_builtins;
use crate::display::{DisplayValue, Node, Tone};
use crate::history::HistoryStore;
use crate::interpreter::{Clock, CommandOutput, CommandRegistry, Environment, SystemClock};
use crate::secret::Secret;

/// Shown in place of the output of a command that failed.
pub const ACTION_FAILED: &str = "An error occurred while executing the command.";

/// Result of handling a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Current input line and history position.
///
/// `history_cursor` counts command-bearing entries back from the newest:
/// 0 means not browsing, 1 the most recent command, and so on. It never
/// exceeds the number of command-bearing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub text: String,
    pub history_cursor: usize,
}

/// Owns the registry, history and input state of one session.
pub struct InputController {
    registry: CommandRegistry,
    history: HistoryStore,
    input: InputState,
    clock: Box<dyn Clock>,
}

impl InputController {
    pub fn new(registry: CommandRegistry, history: HistoryStore, clock: Box<dyn Clock>) -> Self {
        Self {
            registry,
            history,
            input: InputState::default(),
            clock,
        }
    }

    /// A session with the built-in commands and the configured welcome banner.
    pub fn from_config(config: &TermfolioConfig, secret: &Secret) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry, &config.profile, secret);
        log::debug!("Registered {} commands", registry.len());
        Self::new(
            registry,
            HistoryStore::with_welcome(&config.welcome),
            Box::new(SystemClock),
        )
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn text(&self) -> &str {
        &self.input.text
    }

    /// Apply one input event.
    pub async fn handle_event(&mut self, event: &InputEvent) -> InputResult {
        match event {
            InputEvent::TextInput(ch) => self.input.text.push(*ch),
            InputEvent::Backspace => {
                self.input.text.pop();
            },
            InputEvent::SetText(text) => self.input.text = text.clone(),
            InputEvent::KeyPress(Key::Enter) => self.submit().await,
            InputEvent::KeyPress(Key::Up) => self.history_up(),
            InputEvent::KeyPress(Key::Down) => self.history_down(),
            InputEvent::KeyPress(Key::Tab) => self.complete(),
            InputEvent::Quit => return InputResult::Quit,
            InputEvent::PointerMove { .. } | InputEvent::Resize { .. } => {},
        }
        InputResult::Continue
    }

    /// Run the current line and append its output to the history.
    ///
    /// Blank input is ignored. `clear` empties the history instead of
    /// appending to it.
    pub async fn submit(&mut self) {
        let line = self.input.text.trim().to_string();
        if line.is_empty() {
            return;
        }

        let result = {
            let mut env = Environment {
                clock: &*self.clock,
            };
            self.registry.execute(&line, &mut env)
        };

        let output = match result {
            Ok(CommandOutput::Display(value)) => Some(value),
            Ok(CommandOutput::Deferred(pending)) => match pending.await {
                Ok(value) => Some(value),
                Err(e) => Some(failure_output(&line, e)),
            },
            Ok(CommandOutput::Clear) => {
                log::debug!("Clearing {} history entries", self.history.len());
                self.history.clear();
                None
            },
            Err(e) => Some(failure_output(&line, e)),
        };

        if let Some(output) = output {
            self.history.push(line, output);
        }
        self.input = InputState::default();
    }

    /// Step one command further back, if there is one.
    pub fn history_up(&mut self) {
        let next = self.input.history_cursor + 1;
        if let Some(cmd) = self.history.command_back(next) {
            self.input.text = cmd.to_string();
            self.input.history_cursor = next;
        }
    }

    /// Step one command forward; stepping past the newest clears the line.
    pub fn history_down(&mut self) {
        match self.input.history_cursor {
            0 => {},
            1 => {
                self.input.history_cursor = 0;
                self.input.text.clear();
            },
            n => {
                let next = n - 1;
                if let Some(cmd) = self.history.command_back(next) {
                    self.input.text = cmd.to_string();
                }
                self.input.history_cursor = next;
            },
        }
    }

    /// Complete the input to a command name.
    ///
    /// One candidate replaces the text. Several candidates, for non-empty
    /// text, are listed in a history entry labelled with the text as typed.
    pub fn complete(&mut self) {
        let matches: Vec<String> = self
            .registry
            .completions(&self.input.text)
            .into_iter()
            .map(str::to_string)
            .collect();
        match matches.as_slice() {
            [] => {},
            [only] => self.input.text = only.clone(),
            _ if self.input.text.is_empty() => {},
            many => {
                let listing = Node::Group(vec![
                    Node::Line(Tone::Muted, "Available completions:".to_string()),
                    Node::Line(Tone::Highlight, many.join("    ")),
                ]);
                self.history
                    .push(self.input.text.clone(), DisplayValue::Structured(listing));
                // The listing is command-bearing, so offsets counted from the
                // newest entry have moved.
                self.input.history_cursor = 0;
            },
        }
    }
}

/// Turn a failed dispatch into the line shown in the history.
fn failure_output(line: &str, err: TermfolioError) -> DisplayValue {
    match err {
        TermfolioError::UnknownCommand(name) => {
            log::info!("Unknown command: {name}");
            DisplayValue::error(format!(
                "Command not found: {name}. Type 'help' to see available commands."
            ))
        },
        other => {
            log::error!("Command '{line}' failed: {other}");
            DisplayValue::error(ACTION_FAILED)
        },
    }
}
