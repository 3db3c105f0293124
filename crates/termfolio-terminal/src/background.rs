//! The animated character grid behind the terminal window.
//!
//! Most cells are blank. Moving the pointer sprinkles random glyphs around it
//! that decay to dots and vanish. A few cells hide characters of fixed
//! messages (build metadata, the ciphered secret); those light up when the
//! pointer passes and stay visible, dimmed, afterwards.
//!
//! Time is passed in as milliseconds and randomness as an `Rng`, so the grid
//! has no clock or thread of its own.

use rand::Rng;
use rand::seq::SliceRandom;
use termfolio_types::build_info::BuildInfo;
use termfolio_types::config::Profile;

use crate::secret::Secret;

/// Glyphs a flashing cell picks from.
pub const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()=[]{}|;:<>?/";

/// Half extent of the activation area around the pointer.
const AREA_HALF_COLS: usize = 8;
const AREA_HALF_ROWS: usize = 6;
/// Share of the area activated per frame.
const ACTIVATION_SHARE: f64 = 0.01;
/// A pointer counts as moving for this long after its last move.
const MOVING_MS: u64 = 100;
/// A plain cell is not re-flashed within this long.
const COOLDOWN_MS: u64 = 100;
/// How long a flashed glyph shows before turning into a dot.
const FLASH_MS: u64 = 100;
/// How long an activated cell stays visible (plain) or bright (hidden).
const FADE_MS: u64 = 10_000;

/// Vertical anchor of a hidden message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAnchor {
    /// `n` rows from the top.
    Top(usize),
    /// `n` rows from the bottom.
    Bottom(usize),
    /// A random row in `[rows - above, rows - above + spread)`.
    NearBottom { above: usize, spread: usize },
}

/// Horizontal anchor of a hidden message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColAnchor {
    /// `n` columns from the left.
    Left(usize),
    /// Right-aligned `n` columns from the right edge.
    Right(usize),
    /// A random column where the message still fits.
    Anywhere,
}

/// Text hidden in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenMessage {
    pub text: String,
    /// Width used for right alignment; defaults to the text length. Sharing a
    /// length lets several right-anchored messages start in the same column.
    pub length: Option<usize>,
    pub row: RowAnchor,
    pub col: ColAnchor,
}

impl HiddenMessage {
    pub fn new(text: impl Into<String>, row: RowAnchor, col: ColAnchor) -> Self {
        Self {
            text: text.into(),
            length: None,
            row,
            col,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    fn len(&self) -> usize {
        self.length.unwrap_or_else(|| self.text.chars().count())
    }

    /// Top-left cell of the message, or `None` when it starts off-grid.
    fn origin<R: Rng + ?Sized>(&self, cols: usize, rows: usize, rng: &mut R) -> Option<(usize, usize)> {
        let row = match self.row {
            RowAnchor::Top(n) => Some(n),
            RowAnchor::Bottom(n) => rows.checked_sub(1 + n),
            RowAnchor::NearBottom { above, spread } => rows
                .checked_sub(above)
                .map(|base| base + rng.gen_range(0..spread.max(1))),
        }?;
        let len = self.len();
        let col = match self.col {
            ColAnchor::Left(n) => Some(n),
            ColAnchor::Right(n) => cols.checked_sub(len + n),
            ColAnchor::Anywhere => Some(rng.gen_range(0..cols.saturating_sub(len).max(1))),
        }?;
        Some((col, row))
    }
}

/// The messages hidden on every page: a greeting, the ciphered secret, and
/// a block of build metadata in the top-right corner.
pub fn standard_messages(profile: &Profile, build: &BuildInfo, secret: &Secret) -> Vec<HiddenMessage> {
    let metadata = [
        (2, format!("version:   {}", build.version)),
        (3, format!("env:       {}", build.env)),
        (4, format!("build:     {}", build.build_time)),
        (5, format!("developer: {}", profile.name)),
    ];
    let width = metadata
        .iter()
        .map(|(_, text)| text.chars().count())
        .max()
        .unwrap_or(0);

    let mut messages = vec![
        HiddenMessage::new("hello world", RowAnchor::Top(2), ColAnchor::Left(5)),
        HiddenMessage::new(
            secret.banner(),
            RowAnchor::NearBottom {
                above: 6,
                spread: 4,
            },
            ColAnchor::Anywhere,
        ),
    ];
    messages.extend(metadata.into_iter().map(|(row, text)| {
        HiddenMessage::new(text, RowAnchor::Top(row), ColAnchor::Right(4)).with_length(width)
    }));
    messages
}

/// How bright a visible cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Bright,
    Normal,
    Dim,
}

/// A cell that currently shows something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleCell {
    pub col: usize,
    pub row: usize,
    pub ch: char,
    pub shade: Shade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellState {
    Empty,
    /// Random glyph, shown since `at`.
    Flash { glyph: char, at: u64 },
    /// Decayed flash; still counts from the original activation.
    Dot { at: u64 },
    /// Hidden character lit by the pointer.
    Lit { at: u64 },
    /// Hidden character, uncovered earlier.
    Dimmed,
}

#[derive(Debug, Clone)]
struct Cell {
    hidden: Option<char>,
    state: CellState,
    last_activated: Option<u64>,
}

/// The background grid.
#[derive(Debug, Clone)]
pub struct BackgroundGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    messages: Vec<HiddenMessage>,
    reveal: bool,
    pointer: Option<(usize, usize)>,
    moving_until: u64,
}

impl BackgroundGrid {
    /// Build a grid and place `messages` in it. With `reveal`, hidden
    /// characters are visible (dimmed) from the start.
    pub fn new<R: Rng + ?Sized>(
        cols: usize,
        rows: usize,
        messages: Vec<HiddenMessage>,
        reveal: bool,
        rng: &mut R,
    ) -> Self {
        let mut grid = Self {
            cols,
            rows,
            cells: Vec::new(),
            messages,
            reveal,
            pointer: None,
            moving_until: 0,
        };
        grid.rebuild(rng);
        grid
    }

    /// Rebuild for a new size. All animation state is dropped and messages
    /// with random anchors land somewhere new.
    pub fn resize<R: Rng + ?Sized>(&mut self, cols: usize, rows: usize, rng: &mut R) {
        self.cols = cols;
        self.rows = rows;
        self.pointer = None;
        self.rebuild(rng);
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn rebuild<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells = vec![
            Cell {
                hidden: None,
                state: CellState::Empty,
                last_activated: None,
            };
            self.cols * self.rows
        ];
        for message in &self.messages {
            let Some((col, row)) = message.origin(self.cols, self.rows, rng) else {
                log::debug!("Hidden message does not fit a {}x{} grid", self.cols, self.rows);
                continue;
            };
            if row >= self.rows {
                continue;
            }
            for (i, ch) in message.text.chars().enumerate() {
                let c = col + i;
                if c >= self.cols {
                    break;
                }
                if ch != ' ' {
                    let cell = &mut self.cells[row * self.cols + c];
                    cell.hidden = Some(ch);
                    if self.reveal {
                        cell.state = CellState::Dimmed;
                    }
                }
            }
        }
    }

    /// Record a pointer move. The grid reacts on the following frames.
    pub fn pointer_moved(&mut self, col: usize, row: usize, now_ms: u64) {
        self.pointer = Some((col, row));
        self.moving_until = now_ms + MOVING_MS;
    }

    /// Advance one animation frame.
    pub fn frame<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) {
        if let Some((col, row)) = self.pointer
            && now_ms < self.moving_until
        {
            self.activate_around(col, row, now_ms, rng);
        }
        for cell in &mut self.cells {
            cell.state = match cell.state {
                CellState::Flash { at, .. } if now_ms >= at + FADE_MS => CellState::Empty,
                CellState::Flash { at, .. } if now_ms >= at + FLASH_MS => CellState::Dot { at },
                CellState::Dot { at } if now_ms >= at + FADE_MS => CellState::Empty,
                CellState::Lit { at } if now_ms >= at + FADE_MS => CellState::Dimmed,
                other => other,
            };
        }
    }

    fn activate_around<R: Rng + ?Sized>(&mut self, col: usize, row: usize, now_ms: u64, rng: &mut R) {
        let row_range = row.saturating_sub(AREA_HALF_ROWS)..(row + AREA_HALF_ROWS).min(self.rows);
        let col_range = col.saturating_sub(AREA_HALF_COLS)..(col + AREA_HALF_COLS).min(self.cols);

        let cols = self.cols;
        let mut area: Vec<usize> = row_range
            .flat_map(|r| col_range.clone().map(move |c| r * cols + c))
            .collect();
        area.shuffle(rng);
        let take = ((area.len() as f64 * ACTIVATION_SHARE) as usize).max(1);
        area.truncate(take);

        if row < self.rows && col < self.cols {
            let under = row * self.cols + col;
            if self.cells[under].hidden.is_some() {
                area.push(under);
            }
        }

        for idx in area {
            let cell = &mut self.cells[idx];
            if cell.hidden.is_some() {
                cell.state = CellState::Lit { at: now_ms };
                continue;
            }
            let cooled = cell
                .last_activated
                .is_none_or(|t| now_ms.saturating_sub(t) > COOLDOWN_MS);
            if cooled {
                let glyph = char::from(GLYPHS[rng.gen_range(0..GLYPHS.len())]);
                cell.state = CellState::Flash { glyph, at: now_ms };
                cell.last_activated = Some(now_ms);
            }
        }
    }

    /// What a single cell shows, if anything.
    pub fn cell(&self, col: usize, row: usize) -> Option<(char, Shade)> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let cell = &self.cells[row * self.cols + col];
        match cell.state {
            CellState::Empty => None,
            CellState::Flash { glyph, .. } => Some((glyph, Shade::Normal)),
            CellState::Dot { .. } => Some(('.', Shade::Dim)),
            CellState::Lit { .. } => cell.hidden.map(|ch| (ch, Shade::Bright)),
            CellState::Dimmed => cell.hidden.map(|ch| (ch, Shade::Dim)),
        }
    }

    /// Every cell currently showing something, row by row.
    pub fn visible_cells(&self) -> Vec<VisibleCell> {
        let mut out = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some((ch, shade)) = self.cell(col, row) {
                    out.push(VisibleCell {
                        col,
                        row,
                        ch,
                        shade,
                    });
                }
            }
        }
        out
    }

    /// The hidden text of one row, spaces where nothing is hidden.
    pub fn hidden_row(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        self.cells[row * self.cols..(row + 1) * self.cols]
            .iter()
            .map(|c| c.hidden.unwrap_or(' '))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn build() -> BuildInfo {
        BuildInfo {
            version: "1.2.3".to_string(),
            env: "production".to_string(),
            build_time: "10/04/2025, 12:00:00".to_string(),
        }
    }

    #[test]
    fn top_left_message_is_placed() {
        let msgs = vec![HiddenMessage::new("hello world", RowAnchor::Top(2), ColAnchor::Left(5))];
        let grid = BackgroundGrid::new(40, 10, msgs, false, &mut rng());
        assert_eq!(grid.hidden_row(2).trim_end(), "     hello world");
        assert!(grid.hidden_row(1).trim().is_empty());
    }

    #[test]
    fn right_anchor_with_shared_length() {
        let msgs = vec![
            HiddenMessage::new("ab", RowAnchor::Top(0), ColAnchor::Right(1)).with_length(4),
            HiddenMessage::new("abcd", RowAnchor::Top(1), ColAnchor::Right(1)).with_length(4),
        ];
        let grid = BackgroundGrid::new(10, 3, msgs, false, &mut rng());
        // Both start at column 10 - 4 - 1 = 5.
        assert_eq!(grid.hidden_row(0), "     ab   ");
        assert_eq!(grid.hidden_row(1), "     abcd ");
    }

    #[test]
    fn bottom_anchor() {
        let msgs = vec![HiddenMessage::new("x", RowAnchor::Bottom(0), ColAnchor::Left(0))];
        let grid = BackgroundGrid::new(5, 4, msgs, false, &mut rng());
        assert_eq!(grid.hidden_row(3), "x    ");
    }

    #[test]
    fn near_bottom_lands_in_band() {
        for seed in 0..20 {
            let msgs = vec![HiddenMessage::new(
                "secret",
                RowAnchor::NearBottom {
                    above: 6,
                    spread: 4,
                },
                ColAnchor::Anywhere,
            )];
            let grid = BackgroundGrid::new(30, 20, msgs, false, &mut StdRng::seed_from_u64(seed));
            let row = (0..20)
                .find(|r| grid.hidden_row(*r).contains("secret"))
                .expect("message placed");
            assert!((14..18).contains(&row));
        }
    }

    #[test]
    fn spaces_do_not_claim_cells() {
        let msgs = vec![HiddenMessage::new("a b", RowAnchor::Top(0), ColAnchor::Left(0))];
        let grid = BackgroundGrid::new(5, 1, msgs, true, &mut rng());
        assert_eq!(grid.cell(0, 0), Some(('a', Shade::Dim)));
        assert_eq!(grid.cell(1, 0), None);
        assert_eq!(grid.cell(2, 0), Some(('b', Shade::Dim)));
    }

    #[test]
    fn oversized_grid_edges_are_clipped() {
        let msgs = vec![
            HiddenMessage::new("toolong", RowAnchor::Top(0), ColAnchor::Left(3)),
            HiddenMessage::new("wide", RowAnchor::Top(0), ColAnchor::Right(9)),
            HiddenMessage::new("low", RowAnchor::Top(9), ColAnchor::Left(0)),
        ];
        let grid = BackgroundGrid::new(5, 2, msgs, false, &mut rng());
        assert_eq!(grid.hidden_row(0), "   to");
        assert!(grid.hidden_row(1).trim().is_empty());
    }

    #[test]
    fn hidden_until_revealed() {
        let msgs = vec![HiddenMessage::new("hi", RowAnchor::Top(0), ColAnchor::Left(0))];
        let grid = BackgroundGrid::new(4, 1, msgs.clone(), false, &mut rng());
        assert!(grid.visible_cells().is_empty());
        let shown = BackgroundGrid::new(4, 1, msgs, true, &mut rng());
        assert_eq!(shown.visible_cells().len(), 2);
    }

    #[test]
    fn pointer_over_hidden_char_lights_then_dims() {
        let msgs = vec![HiddenMessage::new("q", RowAnchor::Top(5), ColAnchor::Left(5))];
        let mut r = rng();
        let mut grid = BackgroundGrid::new(20, 10, msgs, false, &mut r);
        grid.pointer_moved(5, 5, 1_000);
        grid.frame(1_010, &mut r);
        assert_eq!(grid.cell(5, 5), Some(('q', Shade::Bright)));
        grid.frame(1_010 + FADE_MS, &mut r);
        assert_eq!(grid.cell(5, 5), Some(('q', Shade::Dim)));
    }

    #[test]
    fn flashes_decay_to_dots_then_vanish() {
        let mut r = rng();
        let mut grid = BackgroundGrid::new(30, 20, Vec::new(), false, &mut r);
        grid.pointer_moved(10, 10, 0);
        grid.frame(10, &mut r);
        let lit = grid.visible_cells();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|c| c.shade == Shade::Normal));
        assert!(lit.iter().all(|c| GLYPHS.contains(&(c.ch as u8))));
        // Pointer stopped: no new activations, flashes become dots.
        grid.frame(10 + FLASH_MS + MOVING_MS, &mut r);
        let dots = grid.visible_cells();
        assert_eq!(dots.len(), lit.len());
        assert!(dots.iter().all(|c| c.ch == '.' && c.shade == Shade::Dim));
        grid.frame(10 + FADE_MS, &mut r);
        assert!(grid.visible_cells().is_empty());
    }

    #[test]
    fn activations_stay_near_pointer() {
        let mut r = rng();
        let mut grid = BackgroundGrid::new(80, 40, Vec::new(), false, &mut r);
        for t in 0..50 {
            grid.pointer_moved(40, 20, t * 10);
            grid.frame(t * 10 + 1, &mut r);
        }
        for cell in grid.visible_cells() {
            assert!((32..48).contains(&cell.col));
            assert!((14..26).contains(&cell.row));
        }
    }

    #[test]
    fn still_pointer_does_nothing() {
        let mut r = rng();
        let mut grid = BackgroundGrid::new(30, 20, Vec::new(), false, &mut r);
        grid.pointer_moved(10, 10, 0);
        grid.frame(MOVING_MS + 1, &mut r);
        assert!(grid.visible_cells().is_empty());
    }

    #[test]
    fn resize_replaces_messages() {
        let msgs = vec![HiddenMessage::new("x", RowAnchor::Bottom(0), ColAnchor::Left(0))];
        let mut r = rng();
        let mut grid = BackgroundGrid::new(5, 4, msgs, false, &mut r);
        grid.resize(8, 6, &mut r);
        assert_eq!((grid.cols(), grid.rows()), (8, 6));
        assert_eq!(grid.hidden_row(5), "x       ");
        assert!(grid.hidden_row(3).trim().is_empty());
    }

    #[test]
    fn standard_messages_layout() {
        let secret = Secret::new("hello", 3);
        let msgs = standard_messages(&Profile::default(), &build(), &secret);
        assert_eq!(msgs.len(), 6);
        let grid = BackgroundGrid::new(120, 40, msgs, false, &mut rng());
        assert!(grid.hidden_row(2).contains("hello world"));
        assert!(grid.hidden_row(2).contains("version:   1.2.3"));
        assert!(grid.hidden_row(3).contains("env:       production"));
        assert!(grid.hidden_row(5).contains("developer: Alex Example"));
        // Metadata block shares a left edge.
        let version_col = grid.hidden_row(2).find("version:").unwrap();
        assert_eq!(grid.hidden_row(3).find("env:"), Some(version_col));
        assert_eq!(grid.hidden_row(4).find("build:"), Some(version_col));
        assert_eq!(grid.hidden_row(5).find("developer:"), Some(version_col));
        let banner_row = (0..40)
            .find(|r| grid.hidden_row(*r).contains(r#""secret_message":"#))
            .expect("banner placed");
        assert!(grid.hidden_row(banner_row).contains(r#""khoor","#));
    }
}
