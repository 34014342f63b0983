#![forbid(unsafe_code)]

//! Change detection between presented frames.
//!
//! The presenter repositions the terminal cursor once per run, so fewer,
//! slightly longer runs beat many exact ones. Runs separated by a small
//! gap of unchanged cells coalesce; a run never starts on a wide
//! character's continuation cell (the lead cell is pulled in instead, so
//! re-emission starts at the character).

use crate::buffer::Buffer;
use smallvec::SmallVec;

/// Unchanged-cell gap small enough to absorb into one run.
const COALESCE_GAP: u16 = 2;

/// A horizontal span of cells to re-emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRun {
    pub y: u16,
    pub x: u16,
    pub len: u16,
}

/// The set of runs that turns the previously presented buffer into the
/// new one.
#[derive(Debug, Clone, Default)]
pub struct BufferDiff {
    runs: SmallVec<[DiffRun; 64]>,
}

impl BufferDiff {
    /// Compare two buffers. A dimension change degrades to a full
    /// repaint.
    #[must_use]
    pub fn compute(old: &Buffer, new: &Buffer) -> Self {
        if old.width() != new.width() || old.height() != new.height() {
            return Self::full(new);
        }
        let mut runs = SmallVec::new();
        for y in 0..new.height() {
            diff_row(old.row(y), new.row(y), y, &mut runs);
        }
        Self { runs }
    }

    /// Every cell, row by row.
    #[must_use]
    pub fn full(buffer: &Buffer) -> Self {
        let mut runs = SmallVec::with_capacity(buffer.height() as usize);
        for y in 0..buffer.height() {
            runs.push(DiffRun {
                y,
                x: 0,
                len: buffer.width(),
            });
        }
        Self { runs }
    }

    #[must_use]
    pub fn runs(&self) -> &[DiffRun] {
        &self.runs
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Total cells covered.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.runs.iter().map(|r| r.len as usize).sum()
    }
}

fn diff_row(
    old: &[crate::cell::Cell],
    new: &[crate::cell::Cell],
    y: u16,
    runs: &mut SmallVec<[DiffRun; 64]>,
) {
    let width = new.len();
    let mut x = 0usize;
    while x < width {
        if old[x] == new[x] {
            x += 1;
            continue;
        }
        let mut start = x;
        // Never start emission mid-character.
        while start > 0 && new[start].is_continuation() {
            start -= 1;
        }
        let mut end = x + 1;
        let mut gap = 0usize;
        while end < width {
            if old[end] == new[end] {
                gap += 1;
                end += 1;
                if gap > COALESCE_GAP as usize {
                    break;
                }
            } else {
                gap = 0;
                end += 1;
            }
        }
        let run_end = end - gap;
        runs.push(DiffRun {
            y,
            x: start as u16,
            len: (run_end - start) as u16,
        });
        x = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::style::Style;

    fn buf_from(rows: &[&str]) -> Buffer {
        let width = rows[0].chars().count() as u16;
        let mut b = Buffer::new(width, rows.len() as u16);
        for (y, row) in rows.iter().enumerate() {
            b.set_line(0, y as u16, row, Style::new(), width);
        }
        b
    }

    // --- basic runs ---

    #[test]
    fn identical_buffers_produce_no_runs() {
        let a = buf_from(&["halo ", "dunia"]);
        let diff = BufferDiff::compute(&a, &a.clone());
        assert!(diff.is_empty());
    }

    #[test]
    fn single_changed_cell_is_one_run() {
        let a = buf_from(&["aaaaa"]);
        let b = buf_from(&["aaxaa"]);
        let diff = BufferDiff::compute(&a, &b);
        assert_eq!(diff.runs(), &[DiffRun { y: 0, x: 2, len: 1 }]);
    }

    #[test]
    fn nearby_changes_coalesce() {
        let a = buf_from(&["aaaaaaaa"]);
        let b = buf_from(&["axaxaaaa"]);
        let diff = BufferDiff::compute(&a, &b);
        assert_eq!(diff.runs(), &[DiffRun { y: 0, x: 1, len: 3 }]);
    }

    #[test]
    fn distant_changes_stay_separate() {
        let a = buf_from(&["aaaaaaaaaa"]);
        let b = buf_from(&["xaaaaaaaax"]);
        let diff = BufferDiff::compute(&a, &b);
        assert_eq!(
            diff.runs(),
            &[
                DiffRun { y: 0, x: 0, len: 1 },
                DiffRun { y: 0, x: 9, len: 1 },
            ]
        );
    }

    #[test]
    fn changes_on_multiple_rows_get_row_local_runs() {
        let a = buf_from(&["aaa", "bbb"]);
        let b = buf_from(&["axa", "bbx"]);
        let diff = BufferDiff::compute(&a, &b);
        assert_eq!(
            diff.runs(),
            &[
                DiffRun { y: 0, x: 1, len: 1 },
                DiffRun { y: 1, x: 2, len: 1 },
            ]
        );
    }

    // --- degraded cases ---

    #[test]
    fn dimension_change_is_full_repaint() {
        let a = buf_from(&["aaa"]);
        let b = buf_from(&["aaaa"]);
        let diff = BufferDiff::compute(&a, &b);
        assert_eq!(diff.runs(), &[DiffRun { y: 0, x: 0, len: 4 }]);
        assert_eq!(diff.cell_count(), 4);
    }

    #[test]
    fn run_never_starts_on_a_continuation() {
        let mut a = Buffer::new(4, 1);
        a.set_line(0, 0, "a世b", Style::new(), 4);
        let mut b = a.clone();
        // Restyle only the continuation cell.
        b.set(2, 0, Cell::continuation(Style::new().bold()));
        let diff = BufferDiff::compute(&a, &b);
        assert_eq!(diff.runs().len(), 1);
        assert_eq!(diff.runs()[0].x, 1);
    }

    // --- properties ---

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_buffer(width: u16, height: u16) -> impl Strategy<Value = Buffer> {
            proptest::collection::vec(
                proptest::char::range('a', 'f'),
                (width as usize * height as usize)..=(width as usize * height as usize),
            )
            .prop_map(move |chars| {
                let mut b = Buffer::new(width, height);
                for (i, c) in chars.into_iter().enumerate() {
                    b.set(
                        (i % width as usize) as u16,
                        (i / width as usize) as u16,
                        Cell::new(c),
                    );
                }
                b
            })
        }

        proptest! {
            #[test]
            fn runs_cover_every_difference(
                old in arb_buffer(12, 4),
                new in arb_buffer(12, 4),
            ) {
                let diff = BufferDiff::compute(&old, &new);
                let mut patched = old.clone();
                for run in diff.runs() {
                    for dx in 0..run.len {
                        let x = run.x + dx;
                        if let Some(cell) = new.get(x, run.y) {
                            patched.set(x, run.y, *cell);
                        }
                    }
                }
                prop_assert_eq!(patched, new);
            }

            #[test]
            fn no_runs_on_equal_buffers(buffer in arb_buffer(8, 3)) {
                let diff = BufferDiff::compute(&buffer, &buffer.clone());
                prop_assert!(diff.is_empty());
            }
        }
    }
}
