#![forbid(unsafe_code)]

//! Terminal command emission for diffed frames.
//!
//! One cursor move per run, style commands only on transitions, the
//! whole frame inside a synchronized-update bracket, one flush at the
//! end. The presenter owns the only `Write` handle to the terminal
//! during a session.

use std::io::{self, BufWriter, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate,
};

use crate::buffer::Buffer;
use crate::cell::CellContent;
use crate::diff::BufferDiff;
use crate::style::{Attrs, Color, ColorProfile, Style};

pub struct Presenter<W: Write> {
    out: BufWriter<W>,
    profile: ColorProfile,
    current_style: Option<Style>,
    needs_clear: bool,
}

impl<W: Write> Presenter<W> {
    #[must_use]
    pub fn new(writer: W, profile: ColorProfile) -> Self {
        Self {
            out: BufWriter::with_capacity(64 * 1024, writer),
            profile,
            current_style: None,
            needs_clear: false,
        }
    }

    #[must_use]
    pub const fn profile(&self) -> ColorProfile {
        self.profile
    }

    /// Wipe the screen before the next present. Used after resizes,
    /// where stale cells may sit outside the new buffer's extent.
    pub fn schedule_clear(&mut self) {
        self.needs_clear = true;
        self.current_style = None;
    }

    /// Emit the changed runs of `buffer`, then park or hide the cursor.
    pub fn present(
        &mut self,
        buffer: &Buffer,
        diff: &BufferDiff,
        cursor: Option<(u16, u16)>,
    ) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        tracing::trace!(runs = diff.runs().len(), cells = diff.cell_count(), "present");

        queue!(self.out, BeginSynchronizedUpdate)?;
        if self.needs_clear {
            self.needs_clear = false;
            queue!(self.out, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
            self.current_style = None;
        }

        for run in diff.runs() {
            queue!(self.out, MoveTo(run.x, run.y))?;
            let mut x = run.x;
            let end = run.x.saturating_add(run.len);
            while x < end {
                let Some(cell) = buffer.get(x, run.y) else {
                    break;
                };
                match cell.content {
                    CellContent::Continuation => {
                        x += 1;
                    }
                    CellContent::Char(c) => {
                        if self.current_style != Some(cell.style) {
                            self.emit_style(cell.style)?;
                        }
                        queue!(self.out, Print(c))?;
                        x += cell.display_width().max(1);
                    }
                }
            }
        }

        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.current_style = None;

        match cursor {
            Some((x, y)) => queue!(self.out, MoveTo(x, y), Show)?,
            None => queue!(self.out, Hide)?,
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()
    }

    fn emit_style(&mut self, style: Style) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        if let Some(fg) = style.fg.and_then(|c| c.downgrade(self.profile)) {
            queue!(self.out, SetForegroundColor(to_crossterm(fg)))?;
        }
        if let Some(bg) = style.bg.and_then(|c| c.downgrade(self.profile)) {
            queue!(self.out, SetBackgroundColor(to_crossterm(bg)))?;
        }
        for (flag, attr) in [
            (Attrs::BOLD, Attribute::Bold),
            (Attrs::DIM, Attribute::Dim),
            (Attrs::ITALIC, Attribute::Italic),
            (Attrs::UNDERLINE, Attribute::Underlined),
            (Attrs::REVERSE, Attribute::Reverse),
            (Attrs::STRIKETHROUGH, Attribute::CrossedOut),
        ] {
            if style.attrs.contains(flag) {
                queue!(self.out, SetAttribute(attr))?;
            }
        }
        self.current_style = Some(style);
        Ok(())
    }

    /// Unwrap the underlying writer, flushing buffered output.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(io::IntoInnerError::into_error)
    }
}

fn to_crossterm(color: Color) -> CtColor {
    match color {
        Color::Rgb(rgb) => CtColor::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        },
        Color::Ansi256(idx) | Color::Ansi16(idx) => CtColor::AnsiValue(idx),
    }
}
