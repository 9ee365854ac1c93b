//! Fixed-width, box-drawn table layout.
//!
//! Cells are built from styled spans. Padding is computed from the unstyled
//! text so escape codes never shift the columns.

use crate::core::theme::{Theme, Tone};

pub const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    /// Characters between the two separators, including the one space of
    /// padding on each side.
    pub width: usize,
    pub align: Align,
}

impl Column {
    pub const fn left(name: &'static str, width: usize) -> Self {
        Self {
            name,
            width,
            align: Align::Left,
        }
    }

    /// Widest content that still leaves padding on both sides.
    pub const fn content_width(&self) -> usize {
        self.width.saturating_sub(2)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Span {
    text: String,
    tone: Tone,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    spans: Vec<Span>,
}

impl Cell {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>, tone: Tone) -> Self {
        Self::blank().push(text, tone)
    }

    pub fn push(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.spans.push(Span {
            text: text.into(),
            tone,
        });
        self
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| display_width(&s.text)).sum()
    }

    fn styled(&self, theme: &Theme) -> String {
        self.spans
            .iter()
            .map(|s| theme.paint(&s.text, s.tone))
            .collect()
    }
}

pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in an ellipsis when
/// anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Pads `text` with spaces to `width` characters on the side `align` leaves
/// open. Text already at least `width` wide is returned as is.
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(text)));
    match align {
        Align::Left => format!("{text}{fill}"),
        Align::Right => format!("{fill}{text}"),
    }
}

pub struct TableLayout<'a> {
    columns: &'a [Column],
    theme: &'a Theme,
}

impl<'a> TableLayout<'a> {
    pub fn new(columns: &'a [Column], theme: &'a Theme) -> Self {
        Self { columns, theme }
    }

    pub fn top(&self) -> String {
        self.rule('┌', '┬', '┐')
    }

    pub fn divider(&self) -> String {
        self.rule('├', '┼', '┤')
    }

    pub fn bottom(&self) -> String {
        self.rule('└', '┴', '┘')
    }

    pub fn header(&self) -> String {
        let cells: Vec<Cell> = self
            .columns
            .iter()
            .map(|c| Cell::text(c.name, Tone::Base))
            .collect();
        self.row(&cells)
    }

    /// Renders one row. Missing trailing cells render blank.
    pub fn row(&self, cells: &[Cell]) -> String {
        let bar = self.theme.paint("│", Tone::Neutral);
        let mut line = bar.clone();
        for (index, column) in self.columns.iter().enumerate() {
            let blank = Cell::blank();
            let cell = cells.get(index).unwrap_or(&blank);
            let fill = " ".repeat(column.content_width().saturating_sub(cell.width()));
            let content = cell.styled(self.theme);
            line.push(' ');
            match column.align {
                Align::Left => {
                    line.push_str(&content);
                    line.push_str(&fill);
                }
                Align::Right => {
                    line.push_str(&fill);
                    line.push_str(&content);
                }
            }
            line.push(' ');
            line.push_str(&bar);
        }
        line
    }

    fn rule(&self, left: char, join: char, right: char) -> String {
        let mut line = String::new();
        line.push(left);
        for (index, column) in self.columns.iter().enumerate() {
            if index > 0 {
                line.push(join);
            }
            line.push_str(&"─".repeat(column.width));
        }
        line.push(right);
        self.theme.paint(&line, Tone::Neutral)
    }
}
