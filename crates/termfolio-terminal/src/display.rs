//! What a command hands back for display.
//!
//! Commands return either plain text or a small presentation tree. The
//! front-end never inspects the tree directly; it asks for [`StyledLine`]s and
//! maps each [`Tone`] to whatever colours it has.

/// Colour role of a piece of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Plain,
    /// Headings.
    Accent,
    /// Names and labels.
    Highlight,
    /// Secondary details (tech stacks, dates).
    Info,
    /// Hints and descriptions.
    Muted,
    Error,
}

/// A presentation tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// One line in a single tone.
    Line(Tone, String),
    /// One line made of differently toned pieces.
    Spans(Vec<(Tone, String)>),
    /// Two-column grid; keys are padded to `key_width`.
    Pairs {
        key_width: usize,
        rows: Vec<(String, String)>,
    },
    /// Preformatted block; every line is kept verbatim.
    Pre(Tone, String),
    Blank,
    Group(Vec<Node>),
}

/// Output stored in a history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    Text(String),
    Structured(Node),
}

/// A single rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<(Tone, String)>,
}

impl StyledLine {
    fn single(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            spans: vec![(tone, text.into())],
        }
    }

    /// The line's text with styling dropped.
    pub fn text(&self) -> String {
        self.spans.iter().map(|(_, s)| s.as_str()).collect()
    }
}

impl DisplayValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// An error-toned single line.
    pub fn error(s: impl Into<String>) -> Self {
        Self::Structured(Node::Line(Tone::Error, s.into()))
    }

    /// Flatten into display lines. An empty text value has no lines.
    pub fn lines(&self) -> Vec<StyledLine> {
        let mut out = Vec::new();
        match self {
            DisplayValue::Text(text) => {
                out.extend(text.lines().map(|l| StyledLine::single(Tone::Plain, l)));
            },
            DisplayValue::Structured(node) => flatten(node, &mut out),
        }
        out
    }

    /// All lines joined with `\n`, styling dropped.
    pub fn to_plain(&self) -> String {
        self.lines()
            .iter()
            .map(StyledLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Node> for DisplayValue {
    fn from(node: Node) -> Self {
        DisplayValue::Structured(node)
    }
}

fn flatten(node: &Node, out: &mut Vec<StyledLine>) {
    match node {
        Node::Line(tone, text) => out.push(StyledLine::single(*tone, text.clone())),
        Node::Spans(spans) => out.push(StyledLine {
            spans: spans.clone(),
        }),
        Node::Pairs { key_width, rows } => {
            let width = *key_width;
            for (key, value) in rows {
                out.push(StyledLine {
                    spans: vec![
                        (Tone::Highlight, format!("{key:<width$}")),
                        (Tone::Muted, value.clone()),
                    ],
                });
            }
        },
        Node::Pre(tone, text) => {
            out.extend(text.split('\n').map(|l| StyledLine::single(*tone, l)));
        },
        Node::Blank => out.push(StyledLine::single(Tone::Plain, "")),
        Node::Group(children) => {
            for child in children {
                flatten(child, out);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_lines() {
        assert!(DisplayValue::text("").lines().is_empty());
    }

    #[test]
    fn text_splits_lines() {
        let v = DisplayValue::text("a\nb");
        assert_eq!(v.lines().len(), 2);
        assert_eq!(v.to_plain(), "a\nb");
    }

    #[test]
    fn pairs_pad_keys() {
        let v: DisplayValue = Node::Pairs {
            key_width: 6,
            rows: vec![("ab".into(), "x".into()), ("cdef".into(), "y".into())],
        }
        .into();
        assert_eq!(v.to_plain(), "ab    x\ncdef  y");
        let first = &v.lines()[0];
        assert_eq!(first.spans[0].0, Tone::Highlight);
        assert_eq!(first.spans[1].0, Tone::Muted);
    }

    #[test]
    fn pre_keeps_blank_and_trailing_space() {
        let v: DisplayValue = Node::Pre(Tone::Plain, "  a  \n\nb".into()).into();
        let lines: Vec<String> = v.lines().iter().map(StyledLine::text).collect();
        assert_eq!(lines, vec!["  a  ", "", "b"]);
    }

    #[test]
    fn group_flattens_in_order() {
        let v: DisplayValue = Node::Group(vec![
            Node::Line(Tone::Accent, "head".into()),
            Node::Blank,
            Node::Spans(vec![(Tone::Highlight, "x".into()), (Tone::Info, " y".into())]),
        ])
        .into();
        assert_eq!(v.to_plain(), "head\n\nx y");
        assert_eq!(v.lines()[0].spans[0].0, Tone::Accent);
    }

    #[test]
    fn error_tone() {
        let v = DisplayValue::error("bad");
        assert_eq!(v.lines()[0].spans[0], (Tone::Error, "bad".to_string()));
    }
}
