#![forbid(unsafe_code)]

//! Rectangles and edge insets in terminal cell space.
//!
//! Coordinates are `u16` cell offsets with the origin at the top-left.
//! Arithmetic saturates: a rectangle pushed past the `u16` range clamps at
//! the boundary instead of wrapping, so layout math never panics on odd
//! terminal sizes.

/// An axis-aligned rectangle of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// A zero-sized rectangle at the origin.
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[must_use]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    #[must_use]
    pub const fn left(self) -> u16 {
        self.x
    }

    #[inline]
    #[must_use]
    pub const fn top(self) -> u16 {
        self.y
    }

    /// One past the right-most column, saturating at `u16::MAX`.
    #[inline]
    #[must_use]
    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the bottom-most row, saturating at `u16::MAX`.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.width as u32 * self.height as u32
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the cell at `(x, y)` lies inside this rectangle.
    #[must_use]
    pub const fn contains(self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The overlapping region of two rectangles.
    ///
    /// Disjoint rectangles produce an empty `Rect` positioned at the
    /// clamped intersection origin.
    #[must_use]
    pub fn intersection(self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }

    /// The smallest rectangle covering both inputs.
    ///
    /// An empty operand contributes nothing; two empty operands yield an
    /// empty result.
    #[must_use]
    pub fn union(self, other: Rect) -> Rect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }

    /// Shrink by the given insets, collapsing to empty when the insets
    /// meet or cross.
    #[must_use]
    pub fn inner(self, sides: Sides) -> Rect {
        let horizontal = sides.horizontal();
        let vertical = sides.vertical();
        if horizontal >= self.width || vertical >= self.height {
            return Rect::new(self.x.saturating_add(sides.left), self.y.saturating_add(sides.top), 0, 0);
        }
        Rect {
            x: self.x.saturating_add(sides.left),
            y: self.y.saturating_add(sides.top),
            width: self.width - horizontal,
            height: self.height - vertical,
        }
    }
}

/// Per-edge cell insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    #[must_use]
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same inset on every edge.
    #[must_use]
    pub const fn all(inset: u16) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Total horizontal inset (left + right), saturating.
    #[inline]
    #[must_use]
    pub const fn horizontal(self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical inset (top + bottom), saturating.
    #[inline]
    #[must_use]
    pub const fn vertical(self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<u16> for Sides {
    fn from(inset: u16) -> Self {
        Sides::all(inset)
    }
}

impl From<(u16, u16)> for Sides {
    /// `(vertical, horizontal)` insets, CSS shorthand order.
    fn from((vertical, horizontal): (u16, u16)) -> Self {
        Sides::new(vertical, horizontal, vertical, horizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Rect constructors and edges ---

    #[test]
    fn new_and_from_size() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!((r.x, r.y, r.width, r.height), (2, 3, 10, 4));
        assert_eq!(Rect::from_size(80, 24), Rect::new(0, 0, 80, 24));
        assert_eq!(Rect::ZERO.area(), 0);
    }

    #[test]
    fn edges_saturate() {
        let r = Rect::new(u16::MAX - 1, u16::MAX - 1, 10, 10);
        assert_eq!(r.right(), u16::MAX);
        assert_eq!(r.bottom(), u16::MAX);
    }

    #[test]
    fn area_uses_wide_arithmetic() {
        let r = Rect::from_size(u16::MAX, u16::MAX);
        assert_eq!(r.area(), u16::MAX as u32 * u16::MAX as u32);
    }

    #[test]
    fn empty_when_either_dimension_is_zero() {
        assert!(Rect::new(5, 5, 0, 3).is_empty());
        assert!(Rect::new(5, 5, 3, 0).is_empty());
        assert!(!Rect::new(5, 5, 1, 1).is_empty());
    }

    // --- contains ---

    #[test]
    fn contains_is_inclusive_exclusive() {
        let r = Rect::new(10, 20, 5, 2);
        assert!(r.contains(10, 20));
        assert!(r.contains(14, 21));
        assert!(!r.contains(15, 20));
        assert!(!r.contains(10, 22));
        assert!(!r.contains(9, 20));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        assert!(!Rect::ZERO.contains(0, 0));
    }

    // --- intersection / union ---

    #[test]
    fn intersection_of_overlapping_rects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(b), Rect::new(5, 5, 5, 5));
        assert_eq!(b.intersection(a), Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn intersection_of_disjoint_rects_is_empty() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(10, 10, 4, 4);
        assert!(a.intersection(b).is_empty());
    }

    #[test]
    fn intersection_with_contained_rect() {
        let outer = Rect::new(0, 0, 20, 20);
        let inner = Rect::new(3, 4, 5, 6);
        assert_eq!(outer.intersection(inner), inner);
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(10, 10, 4, 4);
        assert_eq!(a.union(b), Rect::new(0, 0, 14, 14));
    }

    #[test]
    fn union_ignores_empty_operands() {
        let a = Rect::new(3, 3, 4, 4);
        assert_eq!(a.union(Rect::ZERO), a);
        assert_eq!(Rect::ZERO.union(a), a);
        assert!(Rect::ZERO.union(Rect::ZERO).is_empty());
    }

    // --- inner + Sides ---

    #[test]
    fn inner_shrinks_by_sides() {
        let r = Rect::new(0, 0, 10, 6);
        assert_eq!(r.inner(Sides::all(1)), Rect::new(1, 1, 8, 4));
        assert_eq!(r.inner(Sides::from((1, 2))), Rect::new(2, 1, 6, 4));
    }

    #[test]
    fn inner_collapses_when_insets_exceed_size() {
        let r = Rect::new(2, 2, 4, 4);
        assert!(r.inner(Sides::all(2)).is_empty());
        assert!(r.inner(Sides::all(10)).is_empty());
    }

    #[test]
    fn sides_totals() {
        let s = Sides::new(1, 2, 3, 4);
        assert_eq!(s.horizontal(), 6);
        assert_eq!(s.vertical(), 4);
        assert_eq!(Sides::from(2u16), Sides::all(2));
    }
}
