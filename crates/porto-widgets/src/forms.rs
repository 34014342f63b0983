#![forbid(unsafe_code)]

//! Keyboard-driven form: labeled fields, a focus ring, and a submit
//! button.
//!
//! The form owns editing state only. Key handling returns a
//! [`FormSignal`] describing what just happened (a field was edited,
//! blurred, changed, the form asked to submit) and the caller decides
//! what validation or submission means. Error messages are pushed back
//! in via [`Form::set_error`] and rendered under their fields.

use crate::{Widget, draw_line};
use porto_core::event::{KeyCode, KeyEvent};
use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::cell::Cell;
use porto_render::style::Style;
use porto_render::text::{Line, Span};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text {
        label: String,
        value: String,
        placeholder: String,
    },
    TextArea {
        label: String,
        value: String,
        placeholder: String,
        rows: u16,
    },
    Radio {
        label: String,
        options: Vec<String>,
        selected: Option<usize>,
    },
}

impl FormField {
    #[must_use]
    pub fn text(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        FormField::Text {
            label: label.into(),
            value: String::new(),
            placeholder: placeholder.into(),
        }
    }

    #[must_use]
    pub fn text_area(label: impl Into<String>, placeholder: impl Into<String>, rows: u16) -> Self {
        FormField::TextArea {
            label: label.into(),
            value: String::new(),
            placeholder: placeholder.into(),
            rows: rows.max(1),
        }
    }

    #[must_use]
    pub fn radio(label: impl Into<String>, options: impl Into<Vec<String>>) -> Self {
        FormField::Radio {
            label: label.into(),
            options: options.into(),
            selected: None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            FormField::Text { label, .. }
            | FormField::TextArea { label, .. }
            | FormField::Radio { label, .. } => label,
        }
    }

    /// The current textual value; for radio groups, the selected option's
    /// text or the empty string.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            FormField::Text { value, .. } | FormField::TextArea { value, .. } => value,
            FormField::Radio {
                options, selected, ..
            } => selected
                .and_then(|i| options.get(i))
                .map_or("", String::as_str),
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, FormField::Text { .. } | FormField::TextArea { .. })
    }

    /// Back to the initial empty state.
    pub fn clear(&mut self) {
        match self {
            FormField::Text { value, .. } | FormField::TextArea { value, .. } => value.clear(),
            FormField::Radio { selected, .. } => *selected = None,
        }
    }

    fn value_mut(&mut self) -> Option<&mut String> {
        match self {
            FormField::Text { value, .. } | FormField::TextArea { value, .. } => Some(value),
            FormField::Radio { .. } => None,
        }
    }

    const fn input_rows(&self) -> u16 {
        match self {
            FormField::TextArea { rows, .. } => *rows,
            _ => 1,
        }
    }
}

/// What a handled key meant, in the caller's terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSignal {
    /// Nothing the caller needs to react to.
    None,
    /// The field's value changed by typing; its error should clear.
    Edited(usize),
    /// Focus left the field; it should be validated.
    Blurred(usize),
    /// A selection changed; the field should be validated.
    Changed(usize),
    /// The form wants to submit.
    Submit,
    /// The user asked to leave the form.
    Cancel,
}

/// Row offsets of one field within the form area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub label_row: u16,
    pub input_row: u16,
    pub input_rows: u16,
    pub footer_row: u16,
}

/// Styles the host application themes the form with.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormStyles {
    pub label: Style,
    pub label_focused: Style,
    pub input: Style,
    pub input_focused: Style,
    pub placeholder: Style,
    pub error: Style,
    pub button: Style,
    pub button_focused: Style,
    pub button_busy: Style,
}

const INPUT_PREFIX: &str = "❯ ";
const INPUT_PAD: u16 = 2;

#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    errors: Vec<Option<String>>,
    focused: usize,
    text_cursor: usize,
    submit_label: String,
    busy_label: Option<String>,
    styles: FormStyles,
}

impl Form {
    #[must_use]
    pub fn new(fields: Vec<FormField>, submit_label: impl Into<String>) -> Self {
        let count = fields.len();
        Self {
            fields,
            errors: vec![None; count],
            focused: 0,
            text_cursor: 0,
            submit_label: submit_label.into(),
            busy_label: None,
            styles: FormStyles::default(),
        }
    }

    #[must_use]
    pub fn styles(mut self, styles: FormStyles) -> Self {
        self.styles = styles;
        self
    }

    #[inline]
    #[must_use]
    pub const fn focused(&self) -> usize {
        self.focused
    }

    /// Focus index one past the last field is the submit button.
    #[must_use]
    pub fn is_button_focused(&self) -> bool {
        self.focused == self.fields.len()
    }

    #[must_use]
    pub fn error(&self, index: usize) -> Option<&str> {
        self.errors.get(index).and_then(|e| e.as_deref())
    }

    pub fn set_error(&mut self, index: usize, message: Option<String>) {
        if let Some(slot) = self.errors.get_mut(index) {
            *slot = message;
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Option::is_some)
    }

    /// While set, the button renders this label and submits are the
    /// caller's job to suppress.
    pub fn set_busy_label(&mut self, label: Option<String>) {
        self.busy_label = label;
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy_label.is_some()
    }

    /// Clear every field, error, and the focus ring.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        for error in &mut self.errors {
            *error = None;
        }
        self.focused = 0;
        self.text_cursor = 0;
    }

    pub fn focus_field(&mut self, index: usize) {
        self.focused = index.min(self.fields.len());
        self.sync_cursor();
    }

    fn sync_cursor(&mut self) {
        self.text_cursor = self
            .fields
            .get(self.focused)
            .map_or(0, |f| f.value().graphemes(true).count());
    }

    fn move_focus(&mut self, forward: bool) -> FormSignal {
        let old = self.focused;
        let stops = self.fields.len() + 1;
        self.focused = if forward {
            (self.focused + 1) % stops
        } else {
            (self.focused + stops - 1) % stops
        };
        self.sync_cursor();
        #[cfg(feature = "tracing")]
        tracing::trace!(from = old, to = self.focused, "form focus moved");
        if old < self.fields.len() {
            FormSignal::Blurred(old)
        } else {
            FormSignal::None
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormSignal {
        if !key.is_active() {
            return FormSignal::None;
        }
        if key.code == KeyCode::Enter && key.ctrl() {
            return FormSignal::Submit;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Escape => FormSignal::Cancel,
            KeyCode::Enter => {
                let in_textarea =
                    matches!(self.fields.get(self.focused), Some(FormField::TextArea { .. }));
                if in_textarea {
                    self.insert_char('\n')
                } else {
                    FormSignal::Submit
                }
            }
            KeyCode::Left => self.cursor_or_select(false),
            KeyCode::Right => self.cursor_or_select(true),
            KeyCode::Home => {
                self.text_cursor = 0;
                FormSignal::None
            }
            KeyCode::End => {
                self.sync_cursor();
                FormSignal::None
            }
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                let on_radio =
                    matches!(self.fields.get(self.focused), Some(FormField::Radio { .. }));
                if on_radio && c == ' ' {
                    if let Some(FormField::Radio { selected, .. }) =
                        self.fields.get_mut(self.focused)
                    {
                        *selected = Some(selected.unwrap_or(0));
                    }
                    FormSignal::Changed(self.focused)
                } else {
                    self.insert_char(c)
                }
            }
            KeyCode::Backspace => self.delete_before_cursor(),
            KeyCode::Delete => self.delete_at_cursor(),
            _ => FormSignal::None,
        }
    }

    fn cursor_or_select(&mut self, forward: bool) -> FormSignal {
        match self.fields.get_mut(self.focused) {
            Some(FormField::Radio {
                options, selected, ..
            }) if !options.is_empty() => {
                let len = options.len();
                *selected = Some(match (*selected, forward) {
                    (None, _) => 0,
                    (Some(i), true) => (i + 1) % len,
                    (Some(i), false) => (i + len - 1) % len,
                });
                FormSignal::Changed(self.focused)
            }
            Some(field) if field.is_text() => {
                if forward {
                    let count = field.value().graphemes(true).count();
                    self.text_cursor = (self.text_cursor + 1).min(count);
                } else {
                    self.text_cursor = self.text_cursor.saturating_sub(1);
                }
                FormSignal::None
            }
            _ => FormSignal::None,
        }
    }

    fn insert_char(&mut self, c: char) -> FormSignal {
        let cursor = self.text_cursor;
        let Some(value) = self.fields.get_mut(self.focused).and_then(FormField::value_mut)
        else {
            return FormSignal::None;
        };
        let at = byte_offset(value, cursor);
        value.insert(at, c);
        self.text_cursor += 1;
        FormSignal::Edited(self.focused)
    }

    fn delete_before_cursor(&mut self) -> FormSignal {
        if self.text_cursor == 0 {
            return FormSignal::None;
        }
        let cursor = self.text_cursor;
        let Some(value) = self.fields.get_mut(self.focused).and_then(FormField::value_mut)
        else {
            return FormSignal::None;
        };
        let start = byte_offset(value, cursor - 1);
        let end = byte_offset(value, cursor);
        value.replace_range(start..end, "");
        self.text_cursor -= 1;
        FormSignal::Edited(self.focused)
    }

    fn delete_at_cursor(&mut self) -> FormSignal {
        let cursor = self.text_cursor;
        let Some(value) = self.fields.get_mut(self.focused).and_then(FormField::value_mut)
        else {
            return FormSignal::None;
        };
        let start = byte_offset(value, cursor);
        if start >= value.len() {
            return FormSignal::None;
        }
        let end = byte_offset(value, cursor + 1);
        value.replace_range(start..end, "");
        FormSignal::Edited(self.focused)
    }

    // --- layout ---

    /// Per-field row offsets: label, input block, footer (error line),
    /// then one spacing row.
    #[must_use]
    pub fn layout(&self) -> Vec<FieldLayout> {
        let mut rows = 0u16;
        self.fields
            .iter()
            .map(|field| {
                let label_row = rows;
                let input_row = rows + 1;
                let input_rows = field.input_rows();
                let footer_row = input_row + input_rows;
                rows = footer_row + 2;
                FieldLayout {
                    label_row,
                    input_row,
                    input_rows,
                    footer_row,
                }
            })
            .collect()
    }

    /// Row of the submit button within the form area.
    #[must_use]
    pub fn button_row(&self) -> u16 {
        self.layout()
            .last()
            .map_or(0, |l| l.footer_row + 2)
    }

    /// Total rows the form occupies.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.button_row() + 1
    }

    /// Terminal cursor position for the focused text field, relative to
    /// the given form area. `None` when focus is on a radio group or the
    /// button.
    #[must_use]
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        let field = self.fields.get(self.focused)?;
        if !field.is_text() {
            return None;
        }
        let layout = self.layout().get(self.focused).copied()?;
        let upto = byte_offset(field.value(), self.text_cursor);
        let before = &field.value()[..upto];
        let (line_idx, line_start) = match before.rfind('\n') {
            Some(pos) => (before.matches('\n').count() as u16, pos + 1),
            None => (0, 0),
        };
        let col = before[line_start..].width() as u16;
        let max_x = area.right().saturating_sub(1);
        let x = (area.x + INPUT_PAD + col).min(max_x);
        let y = area.y + layout.input_row + line_idx.min(layout.input_rows.saturating_sub(1));
        Some((x, y))
    }
}

fn byte_offset(value: &str, grapheme_index: usize) -> usize {
    value
        .grapheme_indices(true)
        .nth(grapheme_index)
        .map_or(value.len(), |(i, _)| i)
}

impl Widget for Form {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area());
        if area.is_empty() {
            return;
        }
        let layouts = self.layout();
        for (index, (field, layout)) in self.fields.iter().zip(&layouts).enumerate() {
            self.render_field(index, field, *layout, area, buf);
        }
        self.render_button(area, buf);
    }
}

impl Form {
    fn render_field(
        &self,
        index: usize,
        field: &FormField,
        layout: FieldLayout,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let focused = index == self.focused;
        let label_style = if focused {
            self.styles.label_focused
        } else {
            self.styles.label
        };
        let label_y = area.y + layout.label_row;
        buf.set_line(area.x, label_y, field.label(), label_style, area.right());

        let input_style = if focused {
            self.styles.input_focused
        } else {
            self.styles.input
        };
        match field {
            FormField::Text { value, placeholder, .. } => {
                self.render_text_rows(
                    value,
                    placeholder,
                    1,
                    layout,
                    input_style,
                    focused,
                    area,
                    buf,
                );
            }
            FormField::TextArea { value, placeholder, rows, .. } => {
                self.render_text_rows(
                    value,
                    placeholder,
                    *rows,
                    layout,
                    input_style,
                    focused,
                    area,
                    buf,
                );
            }
            FormField::Radio { options, selected, .. } => {
                let y = area.y + layout.input_row;
                buf.fill(
                    Rect::new(area.x, y, area.width, 1),
                    Cell::blank(input_style),
                );
                let mut line = Line::default();
                for (i, option) in options.iter().enumerate() {
                    let mark = if *selected == Some(i) { "(•) " } else { "( ) " };
                    line.push_span(Span::styled(mark, input_style));
                    line.push_span(Span::styled(option.clone(), input_style));
                    line.push_span(Span::raw("   "));
                }
                draw_line(buf, area.x + INPUT_PAD, y, &line, area.right());
            }
        }

        if let Some(message) = self.error(index) {
            let y = area.y + layout.footer_row;
            let line = Line::from(Span::styled(format!("✖ {message}"), self.styles.error));
            draw_line(buf, area.x + INPUT_PAD, y, &line, area.right());
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_text_rows(
        &self,
        value: &str,
        placeholder: &str,
        rows: u16,
        layout: FieldLayout,
        input_style: Style,
        focused: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        for row in 0..rows {
            let y = area.y + layout.input_row + row;
            buf.fill(Rect::new(area.x, y, area.width, 1), Cell::blank(input_style));
        }
        let first_y = area.y + layout.input_row;
        let prefix = if focused { INPUT_PREFIX } else { "  " };
        buf.set_line(area.x, first_y, prefix, input_style, area.right());

        if value.is_empty() {
            buf.set_line(
                area.x + INPUT_PAD,
                first_y,
                placeholder,
                self.styles.placeholder,
                area.right(),
            );
            return;
        }
        for (row, line) in value.split('\n').take(rows as usize).enumerate() {
            buf.set_line(
                area.x + INPUT_PAD,
                first_y + row as u16,
                line,
                input_style,
                area.right(),
            );
        }
    }

    fn render_button(&self, area: Rect, buf: &mut Buffer) {
        let y = area.y + self.button_row();
        let (label, style) = match &self.busy_label {
            Some(busy) => (busy.as_str(), self.styles.button_busy),
            None if self.is_button_focused() => (self.submit_label.as_str(), self.styles.button_focused),
            None => (self.submit_label.as_str(), self.styles.button),
        };
        let text = format!("  {label}  ");
        buf.set_line(area.x, y, &text, style, area.right());
    }
}
