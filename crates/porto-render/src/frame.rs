#![forbid(unsafe_code)]

//! One frame of output: a buffer, a mouse hit grid, and the cursor.
//!
//! Widgets that want mouse interaction register a [`HitId`] over their
//! screen rectangle while rendering; the event loop resolves pointer
//! coordinates against the most recent frame's grid. Later registrations
//! win, matching paint order.

use crate::buffer::Buffer;
use porto_core::geometry::Rect;

/// Opaque identity for a clickable region. Applications define their own
/// id ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitId(pub u32);

impl HitId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Dense per-cell map of clickable regions.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<HitId>>,
}

impl HitGrid {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Claim a rectangle for `id`, clipped to the grid.
    pub fn register(&mut self, area: Rect, id: HitId) {
        let area = area.intersection(Rect::from_size(self.width, self.height));
        for y in area.top()..area.bottom() {
            let row = y as usize * self.width as usize;
            self.cells[row + area.left() as usize..row + area.right() as usize]
                .fill(Some(id));
        }
    }

    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitId> {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize]
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

/// A frame under construction.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    hits: HitGrid,
    /// Where the hardware cursor lands after presentation; `None` keeps
    /// it hidden.
    pub cursor_position: Option<(u16, u16)>,
}

impl Frame {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hits: HitGrid::new(width, height),
            cursor_position: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[must_use]
    pub const fn area(&self) -> Rect {
        self.buffer.area()
    }

    pub fn register_hit_region(&mut self, area: Rect, id: HitId) {
        self.hits.register(area, id);
    }

    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitId> {
        self.hits.hit_test(x, y)
    }

    /// Take the hit grid out of a finished frame; the event loop keeps
    /// it for pointer routing while the buffer moves on to diffing.
    #[must_use]
    pub fn into_parts(self) -> (Buffer, HitGrid, Option<(u16, u16)>) {
        (self.buffer, self.hits, self.cursor_position)
    }
}
