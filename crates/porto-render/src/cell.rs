#![forbid(unsafe_code)]

//! The unit of the terminal grid.
//!
//! A cell holds one displayed character and its style. Characters wider
//! than one column occupy a leading cell plus [`CellContent::Continuation`]
//! placeholders; the presenter emits nothing for continuations, the lead
//! character already advanced the terminal cursor across them.
//!
//! Multi-codepoint grapheme clusters are represented by their first
//! scalar. The page's content is Latin text, so the compact `char`
//! representation trades exotic emoji fidelity for cheap copies and
//! cheap diff equality.

use crate::style::Style;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellContent {
    Char(char),
    Continuation,
}

impl Default for CellContent {
    fn default() -> Self {
        CellContent::Char(' ')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub content: CellContent,
    pub style: Style,
}

impl Cell {
    /// A space with the default style.
    pub const EMPTY: Cell = Cell {
        content: CellContent::Char(' '),
        style: Style::new(),
    };

    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            content: CellContent::Char(ch),
            style: Style::new(),
        }
    }

    #[must_use]
    pub const fn styled(ch: char, style: Style) -> Self {
        Self {
            content: CellContent::Char(ch),
            style,
        }
    }

    /// Placeholder behind a wide character.
    #[must_use]
    pub const fn continuation(style: Style) -> Self {
        Self {
            content: CellContent::Continuation,
            style,
        }
    }

    /// A styled space, for background fills.
    #[must_use]
    pub const fn blank(style: Style) -> Self {
        Self::styled(' ', style)
    }

    #[inline]
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }

    /// Columns this cell's character occupies: 0 for continuations,
    /// otherwise the character's display width (control chars count 1).
    #[must_use]
    pub fn display_width(&self) -> u16 {
        match self.content {
            CellContent::Continuation => 0,
            CellContent::Char(c) => c.width().unwrap_or(1) as u16,
        }
    }
}
