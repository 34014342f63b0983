#![forbid(unsafe_code)]

//! Widgets: composable renderers over cell buffers.
//!
//! A widget is configured by value and draws itself into a rectangle of
//! a [`Buffer`]. Widgets hold no references to the model; everything
//! they show arrives through their builders.

pub mod block;
pub mod effects;
pub mod forms;
pub mod paragraph;

use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::style::Style;
use porto_render::text::Line;

/// Anything that can draw itself into a buffer region.
pub trait Widget {
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// Horizontal placement of text within a width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Starting column for `content_width` within `[x, x + width)`.
    #[must_use]
    pub fn offset(self, x: u16, width: u16, content_width: u16) -> u16 {
        let slack = width.saturating_sub(content_width);
        match self {
            Alignment::Left => x,
            Alignment::Center => x + slack / 2,
            Alignment::Right => x + slack,
        }
    }
}

/// Overlay `style` onto every cell of `area` (existing glyphs keep their
/// characters; colors and attributes merge).
pub fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    let area = area.intersection(buf.area());
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.style = cell.style.patch(style);
            }
        }
    }
}

/// Draw a styled line starting at `(x, y)`, clipped at `max_x`
/// (exclusive). Returns the column after the last written cell.
pub fn draw_line(buf: &mut Buffer, x: u16, y: u16, line: &Line, max_x: u16) -> u16 {
    let mut x = x;
    for span in &line.spans {
        if x >= max_x {
            break;
        }
        x = buf.set_line(x, y, &span.content, span.style, max_x);
    }
    x
}
