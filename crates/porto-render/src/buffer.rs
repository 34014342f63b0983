#![forbid(unsafe_code)]

//! Row-major grid of styled cells.
//!
//! The page renders into one tall virtual buffer; the visible window of
//! it is copied into the frame buffer each time. All writes clip to the
//! grid, so widget code never bounds-checks.

use crate::cell::{Cell, CellContent};
use crate::style::Style;
use porto_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Allocate a buffer of empty cells.
    ///
    /// # Panics
    ///
    /// Panics when either dimension is zero. Callers own clamping odd
    /// terminal sizes before allocating.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "buffer dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[must_use]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write one cell; out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill a region with copies of `cell`, clipped to the grid.
    pub fn fill(&mut self, area: Rect, cell: Cell) {
        let area = area.intersection(self.area());
        for y in area.top()..area.bottom() {
            let row_start = y as usize * self.width as usize;
            let from = row_start + area.left() as usize;
            let to = row_start + area.right() as usize;
            self.cells[from..to].fill(cell);
        }
    }

    /// Reset every cell to a styled blank.
    pub fn clear(&mut self, style: Style) {
        self.cells.fill(Cell::blank(style));
    }

    #[must_use]
    pub fn row(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Write a run of text starting at `(x, y)`, stopping at `max_x`
    /// (exclusive) or the right edge. Returns the column after the last
    /// cell written.
    ///
    /// Text is laid out by grapheme cluster; wide clusters get a
    /// continuation placeholder. A wide cluster that would straddle the
    /// limit is dropped entirely.
    pub fn set_line(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let limit = max_x.min(self.width);
        let mut x = x;
        if y >= self.height {
            return x;
        }
        for cluster in text.graphemes(true) {
            let w = cluster.width() as u16;
            if w == 0 {
                continue;
            }
            if x >= limit || w > limit - x {
                break;
            }
            let Some(ch) = cluster.chars().next() else {
                continue;
            };
            self.set(x, y, Cell::styled(ch, style));
            if w == 2 {
                self.set(x + 1, y, Cell::continuation(style));
            }
            x += w;
        }
        x
    }

    /// Copy `count` full rows starting at `src_y` into `dest` at
    /// `dest_y`. Width and row ranges clip to whichever buffer is
    /// smaller.
    pub fn blit_rows(&self, src_y: u16, count: u16, dest: &mut Buffer, dest_y: u16) {
        let cols = self.width.min(dest.width) as usize;
        for offset in 0..count {
            let sy = src_y.saturating_add(offset);
            let dy = dest_y.saturating_add(offset);
            if sy >= self.height || dy >= dest.height {
                break;
            }
            let src_start = sy as usize * self.width as usize;
            let dst_start = dy as usize * dest.width as usize;
            dest.cells[dst_start..dst_start + cols]
                .copy_from_slice(&self.cells[src_start..src_start + cols]);
        }
    }

    /// Repair a wide character split at the buffer's left/right clip
    /// edges after a blit: an orphaned continuation in column zero or an
    /// orphaned lead in the last column becomes a blank.
    pub fn mend_edges(&mut self) {
        for y in 0..self.height {
            if let Some(cell) = self.get(0, y)
                && cell.is_continuation()
            {
                let style = cell.style;
                self.set(0, y, Cell::blank(style));
            }
            let last = self.width - 1;
            if let Some(cell) = self.get(last, y)
                && cell.display_width() == 2
            {
                let style = cell.style;
                self.set(last, y, Cell::blank(style));
            }
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Content of a row as a plain string, continuations elided. Test and
/// diagnostic helper.
#[must_use]
pub fn row_text(buffer: &Buffer, y: u16) -> String {
    buffer
        .row(y)
        .iter()
        .filter_map(|cell| match cell.content {
            CellContent::Char(c) => Some(c),
            CellContent::Continuation => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    // --- construction ---

    #[test]
    #[should_panic(expected = "non-zero")]
    fn zero_width_panics() {
        let _ = Buffer::new(0, 5);
    }

    #[test]
    fn new_buffer_is_blank() {
        let b = Buffer::new(4, 3);
        assert_eq!(b.cells().len(), 12);
        assert!(b.cells().iter().all(|c| *c == Cell::EMPTY));
    }

    // --- set / get / fill ---

    #[test]
    fn out_of_bounds_access_is_safe() {
        let mut b = Buffer::new(4, 3);
        b.set(10, 10, Cell::new('x'));
        assert_eq!(b.get(10, 10), None);
        assert_eq!(b.get(3, 2).map(|c| c.content), Some(CellContent::Char(' ')));
    }

    #[test]
    fn fill_clips_to_grid() {
        let mut b = Buffer::new(4, 3);
        b.fill(Rect::new(2, 1, 10, 10), Cell::new('#'));
        assert_eq!(row_text(&b, 0), "    ");
        assert_eq!(row_text(&b, 1), "  ##");
        assert_eq!(row_text(&b, 2), "  ##");
    }

    // --- set_line ---

    #[test]
    fn set_line_writes_and_returns_next_column() {
        let mut b = Buffer::new(10, 1);
        let end = b.set_line(1, 0, "halo", Style::new(), 10);
        assert_eq!(end, 5);
        assert_eq!(row_text(&b, 0), " halo     ");
    }

    #[test]
    fn set_line_stops_at_limit() {
        let mut b = Buffer::new(10, 1);
        let end = b.set_line(0, 0, "selamat datang", Style::new(), 7);
        assert_eq!(end, 7);
        assert_eq!(row_text(&b, 0), "selamat   ");
    }

    #[test]
    fn wide_cluster_gets_continuation() {
        let mut b = Buffer::new(6, 1);
        let end = b.set_line(0, 0, "a世b", Style::new(), 6);
        assert_eq!(end, 4);
        assert_eq!(b.get(1, 0).map(Cell::display_width), Some(2));
        assert!(b.get(2, 0).is_some_and(Cell::is_continuation));
        assert_eq!(b.get(3, 0).map(|c| c.content), Some(CellContent::Char('b')));
    }

    #[test]
    fn wide_cluster_straddling_limit_is_dropped() {
        let mut b = Buffer::new(6, 1);
        let end = b.set_line(0, 0, "ab世", Style::new(), 3);
        assert_eq!(end, 2);
        assert_eq!(row_text(&b, 0), "ab    ");
    }

    #[test]
    fn set_line_off_grid_row_is_a_no_op() {
        let mut b = Buffer::new(4, 2);
        let end = b.set_line(0, 9, "x", Style::new(), 4);
        assert_eq!(end, 0);
    }

    // --- blit_rows ---

    #[test]
    fn blit_copies_a_window_of_rows() {
        let mut page = Buffer::new(5, 4);
        for y in 0..4 {
            page.set_line(0, y, &format!("row{y} "), Style::new(), 5);
        }
        let mut view = Buffer::new(5, 2);
        page.blit_rows(1, 2, &mut view, 0);
        assert_eq!(row_text(&view, 0), "row1 ");
        assert_eq!(row_text(&view, 1), "row2 ");
    }

    #[test]
    fn blit_clips_at_both_ends() {
        let page = Buffer::new(5, 3);
        let mut view = Buffer::new(5, 2);
        // Source range extends past the page bottom; only the valid row
        // lands.
        let mut marked = page.clone();
        marked.set_line(0, 2, "last!", Style::new(), 5);
        marked.blit_rows(2, 5, &mut view, 1);
        assert_eq!(row_text(&view, 0), "     ");
        assert_eq!(row_text(&view, 1), "last!");
    }

    #[test]
    fn blit_respects_narrower_destination() {
        let mut page = Buffer::new(8, 1);
        page.set_line(0, 0, "abcdefgh", Style::new(), 8);
        let mut view = Buffer::new(4, 1);
        page.blit_rows(0, 1, &mut view, 0);
        assert_eq!(row_text(&view, 0), "abcd");
    }

    // --- mend_edges ---

    #[test]
    fn mend_edges_clears_orphaned_halves() {
        let mut b = Buffer::new(3, 1);
        b.set(0, 0, Cell::continuation(Style::new()));
        b.set(2, 0, Cell::new('世'));
        b.mend_edges();
        assert_eq!(b.get(0, 0).map(|c| c.content), Some(CellContent::Char(' ')));
        assert_eq!(b.get(2, 0).map(|c| c.content), Some(CellContent::Char(' ')));
    }

    // --- clear ---

    #[test]
    fn clear_applies_background_style() {
        let mut b = Buffer::new(2, 2);
        let style = Style::new().bg(Color::rgb(9, 9, 9));
        b.set(0, 0, Cell::new('x'));
        b.clear(style);
        assert!(b.cells().iter().all(|c| c.style == style));
        assert_eq!(row_text(&b, 0), "  ");
    }
}
