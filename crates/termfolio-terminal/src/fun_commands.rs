//! Fun commands: cowsay, cowthink.

use termfolio_types::error::Result;

use crate::display::{Node, Tone};
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Widest a speech bubble line may wrap to.
pub const BUBBLE_WIDTH: usize = 40;

/// The cow, appended verbatim below every bubble.
pub const COW: &str = r"        \   ^__^
         \  (oo)\_______
            (__)\       )\/\
                ||----w |
                ||     ||";

/// Greedy word wrap. Words are never split; a word wider than `max_width`
/// gets a line of its own.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.chars().count() <= max_width {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Clone, Copy)]
enum BubbleStyle {
    Say,
    Think,
}

impl BubbleStyle {
    /// Left and right border for line `i` of `n`.
    fn borders(self, i: usize, n: usize) -> (char, char) {
        match self {
            BubbleStyle::Think => ('(', ')'),
            BubbleStyle::Say if n == 1 => ('<', '>'),
            BubbleStyle::Say if i == 0 => ('/', '\\'),
            BubbleStyle::Say if i == n - 1 => ('\\', '/'),
            BubbleStyle::Say => ('|', '|'),
        }
    }
}

fn render_cow(message: &str, style: BubbleStyle) -> String {
    let lines = wrap_text(message, BUBBLE_WIDTH);
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .min(BUBBLE_WIDTH);

    let mut out = Vec::with_capacity(lines.len() + 8);
    out.push(format!(" {} ", "_".repeat(width + 2)));
    for (i, line) in lines.iter().enumerate() {
        let (left, right) = style.borders(i, lines.len());
        out.push(format!("{left} {line:<width$} {right}"));
    }
    out.push(format!(" {} ", "-".repeat(width + 2)));
    if let BubbleStyle::Think = style {
        out.push("     o".to_string());
        out.push("      o".to_string());
    }
    out.push(COW.to_string());
    out.join("\n")
}

// ---------------------------------------------------------------------------
// cowsay
// ---------------------------------------------------------------------------

struct CowsayCmd;
impl Command for CowsayCmd {
    fn name(&self) -> &str {
        "cowsay"
    }
    fn description(&self) -> &str {
        "Make a cow say something"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let message = if args.is_empty() {
            "Moo!".to_string()
        } else {
            args.join(" ")
        };
        Ok(Node::Pre(Tone::Highlight, render_cow(&message, BubbleStyle::Say)).into())
    }
}

// ---------------------------------------------------------------------------
// cowthink
// ---------------------------------------------------------------------------

struct CowthinkCmd;
impl Command for CowthinkCmd {
    fn name(&self) -> &str {
        "cowthink"
    }
    fn description(&self) -> &str {
        "Make a cow think something"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let message = if args.is_empty() {
            "Hmm...".to_string()
        } else {
            args.join(" ")
        };
        Ok(Node::Pre(Tone::Info, render_cow(&message, BubbleStyle::Think)).into())
    }
}

/// Register fun commands.
pub fn register_fun_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(CowsayCmd));
    reg.register(Box::new(CowthinkCmd));
}
