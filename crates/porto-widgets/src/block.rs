#![forbid(unsafe_code)]

//! Bordered container with an optional title.

use crate::{Alignment, Widget, draw_line};
use bitflags::bitflags;
use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::cell::Cell;
use porto_render::style::Style;
use porto_render::text::Line;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Borders: u8 {
        const NONE   = 0b0000;
        const TOP    = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT   = 0b1000;
        const ALL    = 0b1111;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    #[default]
    Plain,
    Rounded,
    Thick,
    Double,
}

impl BorderType {
    /// `(horizontal, vertical, top_left, top_right, bottom_left, bottom_right)`
    const fn glyphs(self) -> (char, char, char, char, char, char) {
        match self {
            BorderType::Plain => ('─', '│', '┌', '┐', '└', '┘'),
            BorderType::Rounded => ('─', '│', '╭', '╮', '╰', '╯'),
            BorderType::Thick => ('━', '┃', '┏', '┓', '┗', '┛'),
            BorderType::Double => ('═', '║', '╔', '╗', '╚', '╝'),
        }
    }
}

/// A box drawn around content. The block renders its frame and
/// background; content renders separately into [`Block::inner`].
#[derive(Debug, Clone, Default)]
pub struct Block {
    borders: Borders,
    border_type: BorderType,
    border_style: Style,
    title: Option<Line>,
    title_alignment: Alignment,
    style: Style,
}

impl Block {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A rounded box on all sides, the page's house style for cards.
    #[must_use]
    pub fn card() -> Self {
        Self::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
    }

    #[must_use]
    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    #[must_use]
    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<Line>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The content region remaining inside the borders.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;
        if self.borders.contains(Borders::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.borders.contains(Borders::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }
        inner
    }
}

impl Widget for Block {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area());
        if area.is_empty() {
            return;
        }
        buf.fill(area, Cell::blank(self.style));

        let (h, v, tl, tr, bl, br) = self.border_type.glyphs();
        let style = self.style.patch(self.border_style);
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        if self.borders.contains(Borders::TOP) {
            for x in area.left()..area.right() {
                buf.set(x, area.top(), Cell::styled(h, style));
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            for x in area.left()..area.right() {
                buf.set(x, bottom, Cell::styled(h, style));
            }
        }
        if self.borders.contains(Borders::LEFT) {
            for y in area.top()..area.bottom() {
                buf.set(area.left(), y, Cell::styled(v, style));
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            for y in area.top()..area.bottom() {
                buf.set(right, y, Cell::styled(v, style));
            }
        }
        if self.borders.contains(Borders::TOP | Borders::LEFT) {
            buf.set(area.left(), area.top(), Cell::styled(tl, style));
        }
        if self.borders.contains(Borders::TOP | Borders::RIGHT) {
            buf.set(right, area.top(), Cell::styled(tr, style));
        }
        if self.borders.contains(Borders::BOTTOM | Borders::LEFT) {
            buf.set(area.left(), bottom, Cell::styled(bl, style));
        }
        if self.borders.contains(Borders::BOTTOM | Borders::RIGHT) {
            buf.set(right, bottom, Cell::styled(br, style));
        }

        if let Some(title) = &self.title
            && self.borders.contains(Borders::TOP)
            && area.width > 2
        {
            let avail = area.width - 2;
            let width = title.width().min(avail);
            let x = self
                .title_alignment
                .offset(area.left() + 1, avail, width);
            draw_line(buf, x, area.top(), title, x + width);
        }
    }
}
