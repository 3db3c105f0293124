//! Frame drawing.
//!
//! Layout and line building are pure so they can be tested; [`draw`] only
//! queues crossterm commands for what they produce.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};
use crossterm::queue;
use termfolio_terminal::background::{BackgroundGrid, Shade};
use termfolio_terminal::controller::InputController;
use termfolio_terminal::display::{StyledLine, Tone};

/// Cursor blink half-period.
pub const BLINK_MS: u64 = 500;
const CURSOR: char = '\u{2588}';
const MAX_WINDOW_COLS: u16 = 100;
const MAX_WINDOW_ROWS: u16 = 32;
/// Title text never starts left of this column; the dots sit before it.
const TITLE_LEFT: usize = 7;
const WINDOW_BG: Color = Color::Rgb { r: 24, g: 24, b: 28 };
const TITLE_BG: Color = Color::Rgb { r: 44, g: 44, b: 50 };

/// Screen area of the terminal window, borders included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl WindowRect {
    /// Rows available for history and the input line.
    pub fn body_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(2))
    }

    /// Columns available inside the side borders.
    pub fn body_cols(&self) -> usize {
        usize::from(self.width.saturating_sub(4))
    }
}

/// A window centred on a `cols` x `rows` screen, leaving a margin of
/// background around it when the screen is large enough.
pub fn window_rect(cols: u16, rows: u16) -> WindowRect {
    let width = cols.saturating_sub(8).clamp(cols.min(20), MAX_WINDOW_COLS);
    let height = rows.saturating_sub(4).clamp(rows.min(6), MAX_WINDOW_ROWS);
    WindowRect {
        x: (cols - width) / 2,
        y: (rows - height) / 2,
        width,
        height,
    }
}

/// Whether the cursor is shown at `now_ms`.
pub fn cursor_visible(now_ms: u64) -> bool {
    (now_ms / BLINK_MS) % 2 == 0
}

/// History lines followed by the live input line, keeping only the last
/// `max_rows` so the newest output is always in view.
pub fn body_lines(
    controller: &InputController,
    prompt: &str,
    cursor_on: bool,
    max_rows: usize,
) -> Vec<StyledLine> {
    let mut lines = Vec::new();
    for entry in controller.history().entries() {
        if entry.is_command() {
            lines.push(prompt_line(prompt, &entry.input));
        }
        lines.extend(entry.output.lines());
    }

    let mut input = prompt_line(prompt, controller.text());
    if cursor_on {
        input.spans.push((Tone::Plain, CURSOR.to_string()));
    }
    lines.push(input);

    let skip = lines.len().saturating_sub(max_rows);
    lines.split_off(skip)
}

fn prompt_line(prompt: &str, text: &str) -> StyledLine {
    StyledLine {
        spans: vec![
            (Tone::Accent, prompt.to_string()),
            (Tone::Plain, format!(" {text}")),
        ],
    }
}

/// Spans cut to at most `width` characters.
pub fn clip(line: &StyledLine, width: usize) -> Vec<(Tone, String)> {
    let mut left = width;
    let mut out = Vec::new();
    for (tone, text) in &line.spans {
        if left == 0 {
            break;
        }
        let piece: String = text.chars().take(left).collect();
        left -= piece.chars().count();
        out.push((*tone, piece));
    }
    out
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Plain => Color::Grey,
        Tone::Accent => Color::Green,
        Tone::Highlight => Color::Yellow,
        Tone::Info => Color::Cyan,
        Tone::Muted => Color::DarkGrey,
        Tone::Error => Color::Red,
    }
}

pub fn shade_color(shade: Shade) -> Color {
    match shade {
        Shade::Bright => Color::White,
        Shade::Normal => Color::Rgb { r: 0, g: 170, b: 80 },
        Shade::Dim => Color::Rgb { r: 60, g: 60, b: 60 },
    }
}

/// Everything one frame shows.
pub struct View<'a> {
    pub cols: u16,
    pub rows: u16,
    pub background: Option<&'a BackgroundGrid>,
    pub controller: &'a InputController,
    pub prompt: &'a str,
    pub title: &'a str,
    pub now_ms: u64,
}

/// Queue one full frame and flush it.
pub fn draw(out: &mut impl Write, view: &View<'_>) -> std::io::Result<()> {
    queue!(out, BeginSynchronizedUpdate)?;
    draw_background(out, view)?;
    draw_window(out, view)?;
    queue!(out, ResetColor, EndSynchronizedUpdate)?;
    out.flush()
}

fn draw_background(out: &mut impl Write, view: &View<'_>) -> std::io::Result<()> {
    queue!(out, SetBackgroundColor(Color::Black))?;
    for row in 0..view.rows {
        queue!(out, MoveTo(0, row))?;
        let mut current: Option<Color> = None;
        for col in 0..view.cols {
            let cell = view
                .background
                .and_then(|grid| grid.cell(usize::from(col), usize::from(row)));
            match cell {
                Some((ch, shade)) => {
                    let color = shade_color(shade);
                    if current != Some(color) {
                        queue!(out, SetForegroundColor(color))?;
                        current = Some(color);
                    }
                    queue!(out, Print(ch))?;
                },
                None => queue!(out, Print(' '))?,
            }
        }
    }
    Ok(())
}

fn draw_window(out: &mut impl Write, view: &View<'_>) -> std::io::Result<()> {
    let rect = window_rect(view.cols, view.rows);
    if rect.width < 8 || rect.height < 3 {
        return Ok(());
    }
    let inner = usize::from(rect.width);

    // title bar
    queue!(
        out,
        MoveTo(rect.x, rect.y),
        SetBackgroundColor(TITLE_BG),
        Print(" ".repeat(inner))
    )?;
    for (i, color) in [Color::Red, Color::Yellow, Color::Green].into_iter().enumerate() {
        queue!(
            out,
            MoveTo(rect.x + 1 + 2 * i as u16, rect.y),
            SetForegroundColor(color),
            Print('\u{25cf}')
        )?;
    }
    let title: String = view.title.chars().take(inner.saturating_sub(TITLE_LEFT + 1)).collect();
    let offset = (inner.saturating_sub(title.chars().count()) / 2).max(TITLE_LEFT);
    queue!(
        out,
        MoveTo(rect.x + offset as u16, rect.y),
        SetForegroundColor(Color::Grey),
        Print(&title)
    )?;

    // body
    let body = body_lines(
        view.controller,
        view.prompt,
        cursor_visible(view.now_ms),
        rect.body_rows(),
    );
    queue!(out, SetBackgroundColor(WINDOW_BG))?;
    for i in 0..rect.body_rows() {
        let y = rect.y + 1 + i as u16;
        queue!(out, MoveTo(rect.x, y), Print(" ".repeat(inner)), MoveTo(rect.x + 2, y))?;
        if let Some(line) = body.get(i) {
            for (tone, text) in clip(line, rect.body_cols()) {
                queue!(out, SetForegroundColor(tone_color(tone)), Print(text))?;
            }
        }
    }
    queue!(
        out,
        MoveTo(rect.x, rect.y + rect.height - 1),
        Print(" ".repeat(inner))
    )?;
    Ok(())
}
