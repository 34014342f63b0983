#![forbid(unsafe_code)]

//! Multi-line text with optional wrapping, alignment, and a surrounding
//! block.
//!
//! Wrapping applies to single-span lines (body copy); lines composed of
//! multiple styled spans pass through unwrapped, since their spacing is
//! deliberate.

use crate::block::Block;
use crate::{Alignment, Widget, draw_line};
use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::cell::Cell;
use porto_render::style::Style;
use porto_render::text::{Line, Span, wrap_text};

#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    lines: Vec<Line>,
    block: Option<Block>,
    style: Style,
    alignment: Alignment,
    wrap: bool,
}

impl Paragraph {
    #[must_use]
    pub fn new(lines: impl Into<Vec<Line>>) -> Self {
        Self {
            lines: lines.into(),
            ..Self::default()
        }
    }

    /// Body copy: one string, wrapped to the render width.
    #[must_use]
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            lines: vec![Line::raw(text)],
            wrap: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Rows needed at `width`, including any block borders.
    #[must_use]
    pub fn height_for_width(&self, width: u16) -> u16 {
        let chrome = match &self.block {
            Some(block) => {
                let probe = Rect::from_size(width.max(3), 3);
                let inner = block.inner(probe);
                (probe.width - inner.width, probe.height - inner.height)
            }
            None => (0, 0),
        };
        let inner_width = width.saturating_sub(chrome.0).max(1);
        let rows = self.visual_lines(inner_width).len() as u16;
        rows + chrome.1
    }

    fn visual_lines(&self, width: u16) -> Vec<Line> {
        let mut out = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if self.wrap && line.spans.len() == 1 {
                let span = &line.spans[0];
                for row in wrap_text(&span.content, width) {
                    out.push(Line::from(Span::styled(row, span.style)));
                }
            } else {
                out.push(line.clone());
            }
        }
        out
    }
}

impl Widget for Paragraph {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area());
        if area.is_empty() {
            return;
        }
        let inner = match &self.block {
            Some(block) => {
                let styled = block.clone().style(self.style);
                styled.render(area, buf);
                styled.inner(area)
            }
            None => {
                buf.fill(area, Cell::blank(self.style));
                area
            }
        };
        if inner.is_empty() {
            return;
        }
        for (row, line) in self.visual_lines(inner.width).iter().enumerate() {
            let y = inner.top() + row as u16;
            if y >= inner.bottom() {
                break;
            }
            let styled_line = Line {
                spans: line
                    .spans
                    .iter()
                    .map(|s| Span::styled(s.content.clone(), self.style.patch(s.style)))
                    .collect(),
            };
            let width = styled_line.width().min(inner.width);
            let x = self.alignment.offset(inner.left(), inner.width, width);
            draw_line(buf, x, y, &styled_line, inner.right());
        }
    }
}
