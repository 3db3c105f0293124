//! Session history: what was typed and what came back.

use crate::display::{DisplayValue, Node, Tone};

/// One submitted line and its output. `input` is empty for entries the
/// session itself produced, such as the welcome banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub input: String,
    pub output: DisplayValue,
}

impl HistoryEntry {
    /// Whether this entry carries something the user typed.
    pub fn is_command(&self) -> bool {
        !self.input.is_empty()
    }
}

/// Append-only log of entries; only [`HistoryStore::clear`] removes anything.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A store holding a single system entry with the welcome banner.
    pub fn with_welcome(lines: &[String]) -> Self {
        let mut store = Self::new();
        if !lines.is_empty() {
            let banner = lines
                .iter()
                .map(|l| Node::Line(Tone::Muted, l.clone()))
                .collect();
            store.push(String::new(), DisplayValue::Structured(Node::Group(banner)));
        }
        store
    }

    pub fn push(&mut self, input: impl Into<String>, output: DisplayValue) {
        self.entries.push(HistoryEntry {
            input: input.into(),
            output,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inputs of command-bearing entries, oldest first.
    pub fn commands(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.is_command())
            .map(|e| e.input.as_str())
            .collect()
    }

    /// The command `steps` back from the most recent one (1 = most recent).
    pub fn command_back(&self, steps: usize) -> Option<&str> {
        if steps == 0 {
            return None;
        }
        self.entries
            .iter()
            .rev()
            .filter(|e| e.is_command())
            .nth(steps - 1)
            .map(|e| e.input.as_str())
    }

    pub fn command_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_command()).count()
    }
}
