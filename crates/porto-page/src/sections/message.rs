#![forbid(unsafe_code)]

//! Contact form section: field validation, shake on bad submits, busy
//! button while the fake send runs, and the submitted receipt card.

use chrono::{NaiveDate, NaiveDateTime};
use porto_core::event::KeyEvent;
use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::text::{Line, Span};
use porto_widgets::Widget;
use porto_widgets::block::Block;
use porto_widgets::effects::{Shake, spinner_frame};
use porto_widgets::forms::{Form, FormField, FormSignal};
use porto_widgets::paragraph::Paragraph;

use crate::locale::{calculate_age, format_date_id, format_timestamp_id};
use crate::theme;
use crate::validate::{
    ContactInput, ContactSubmission, GENDER_LABELS, Gender, MESSAGE_MAX_CHARS, validate_all,
    validate_birth_date, validate_gender, validate_message, validate_name,
};

use super::{SECTION_MARGIN_COLS, Section, SectionId, content_width, draw_heading, place};

pub const NAME_FIELD: usize = 0;
pub const DATE_FIELD: usize = 1;
pub const GENDER_FIELD: usize = 2;
pub const MESSAGE_FIELD: usize = 3;

/// The character counter turns red once fewer than 50 characters remain.
pub const COUNTER_WARN_AT: usize = 450;

const SUBMIT_LABEL: &str = "Kirim Pesan";
const BUSY_LABEL: &str = "Mengirim";
const RECEIPT_TITLE: &str = "Pesan Terkirim ✓";

/// Everything shown in the receipt card, fixed at completion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub name: String,
    pub birth_date: NaiveDate,
    pub age: i32,
    pub gender: Gender,
    pub message: String,
    pub submitted_at: NaiveDateTime,
}

impl Receipt {
    /// Age is computed against the completion date, not the submit date.
    pub fn compute(submission: ContactSubmission, at: NaiveDateTime) -> Self {
        Self {
            age: calculate_age(submission.birth_date, at.date()),
            name: submission.name,
            birth_date: submission.birth_date,
            gender: submission.gender,
            message: submission.message,
            submitted_at: at,
        }
    }

    /// Label/value pairs in display order.
    pub fn rows(&self) -> [(&'static str, String); 6] {
        [
            ("Nama:", self.name.clone()),
            ("Tanggal Lahir:", format_date_id(self.birth_date)),
            ("Umur:", format!("{} tahun", self.age)),
            ("Jenis Kelamin:", self.gender.label().to_string()),
            ("Pesan:", self.message.clone()),
            ("Waktu Submit:", format_timestamp_id(self.submitted_at)),
        ]
    }
}

/// Rows of the receipt card including its borders.
const RECEIPT_ROWS: u16 = 8;

struct MessageLayout {
    title: Rect,
    form: Rect,
    receipt: Option<Rect>,
    height: u16,
}

pub struct MessageSection {
    form: Form,
    shake: Shake,
    receipt: Option<Receipt>,
}

impl MessageSection {
    pub fn new() -> Self {
        let fields = vec![
            FormField::text("Nama", "Nama lengkap Anda"),
            FormField::text("Tanggal Lahir", "YYYY-MM-DD"),
            FormField::radio("Jenis Kelamin", GENDER_LABELS.map(|label| label.to_string())),
            FormField::text_area("Pesan", "Tulis pesan Anda di sini (min. 10 karakter)", 4),
        ];
        Self {
            form: Form::new(fields, SUBMIT_LABEL).styles(theme::form_styles()),
            shake: Shake::default(),
            receipt: None,
        }
    }

    fn layout(&self, width: u16) -> MessageLayout {
        let x = SECTION_MARGIN_COLS;
        let cw = content_width(width);
        let title = Rect::new(x, 1, cw, 1);
        let form = Rect::new(x, 3, cw, self.form.height());
        let mut y = form.bottom() + 1;
        let receipt = self.receipt.as_ref().map(|_| {
            let rect = Rect::new(x, y, cw, RECEIPT_ROWS);
            y += RECEIPT_ROWS + 1;
            rect
        });
        MessageLayout {
            title,
            form,
            receipt,
            height: y + 1,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormSignal {
        self.form.handle_key(key)
    }

    /// A submission is in flight; further submits are ignored.
    pub fn is_pending(&self) -> bool {
        self.form.is_busy()
    }

    pub fn begin_pending(&mut self) {
        self.form
            .set_busy_label(Some(format!("{BUSY_LABEL} {}", spinner_frame(0))));
    }

    /// Validate one field after focus left it (or its selection changed).
    pub fn validate_field(&mut self, index: usize, today: NaiveDate) {
        let error = match index {
            NAME_FIELD => validate_name(self.form.fields[NAME_FIELD].value()).err(),
            DATE_FIELD => validate_birth_date(self.form.fields[DATE_FIELD].value(), today).err(),
            GENDER_FIELD => {
                validate_gender(Gender::from_label(self.form.fields[GENDER_FIELD].value())).err()
            }
            MESSAGE_FIELD => validate_message(self.form.fields[MESSAGE_FIELD].value()).err(),
            _ => None,
        };
        self.form.set_error(index, error.map(String::from));
    }

    /// Editing clears the field's error without re-checking it.
    pub fn clear_error(&mut self, index: usize) {
        self.form.set_error(index, None);
    }

    fn input(&self) -> ContactInput {
        ContactInput {
            name: self.form.fields[NAME_FIELD].value().to_string(),
            birth_date: self.form.fields[DATE_FIELD].value().to_string(),
            gender: Gender::from_label(self.form.fields[GENDER_FIELD].value()),
            message: self.form.fields[MESSAGE_FIELD].value().to_string(),
        }
    }

    /// Validate the whole form. On failure every error is shown, focus
    /// jumps to the first invalid field, and the form shakes.
    pub fn try_submit(&mut self, today: NaiveDate) -> Option<ContactSubmission> {
        match validate_all(&self.input(), today) {
            Ok(submission) => {
                for index in NAME_FIELD..=MESSAGE_FIELD {
                    self.form.set_error(index, None);
                }
                Some(submission)
            }
            Err(errors) => {
                let per_field = [
                    (NAME_FIELD, errors.name),
                    (DATE_FIELD, errors.birth_date),
                    (GENDER_FIELD, errors.gender),
                    (MESSAGE_FIELD, errors.message),
                ];
                for (index, error) in per_field {
                    self.form.set_error(index, error.map(String::from));
                }
                if let Some((index, _)) = per_field.iter().find(|(_, e)| e.is_some()) {
                    self.form.focus_field(*index);
                }
                self.shake.trigger();
                tracing::debug!("form submit rejected by validation");
                None
            }
        }
    }

    /// Show the receipt and put the form back in its initial state.
    pub fn apply_receipt(&mut self, receipt: Receipt) {
        self.receipt = Some(receipt);
        self.form.reset();
        self.form.set_busy_label(None);
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    /// Section-local row range of the receipt card, for scrolling it
    /// into view.
    pub fn receipt_rows(&self, width: u16) -> Option<(u16, u16)> {
        self.layout(width)
            .receipt
            .map(|rect| (rect.y, rect.bottom()))
    }

    /// Terminal cursor for the focused text input, in page coordinates.
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        self.form.cursor_position(place(self.layout(area.width).form, area))
    }

    #[cfg(test)]
    pub(crate) fn field_text(&self, index: usize) -> Option<String> {
        self.form.fields.get(index).map(|field| field.value().to_string())
    }

    #[cfg(test)]
    pub(crate) fn set_field_text(&mut self, index: usize, text: &str) {
        if let Some(FormField::Text { value, .. } | FormField::TextArea { value, .. }) =
            self.form.fields.get_mut(index)
        {
            *value = text.to_string();
        }
    }

    #[cfg(test)]
    pub(crate) fn select_gender(&mut self, gender: Gender) {
        if let Some(FormField::Radio {
            options, selected, ..
        }) = self.form.fields.get_mut(GENDER_FIELD)
        {
            *selected = options.iter().position(|o| o == gender.label());
        }
    }

    fn counter(&self) -> (String, porto_render::style::Style) {
        let count = self.form.fields[MESSAGE_FIELD].value().chars().count();
        let style = if count > COUNTER_WARN_AT {
            theme::error_text()
        } else {
            theme::muted()
        };
        (format!("{count}/{MESSAGE_MAX_CHARS} karakter"), style)
    }

    fn shaken(&self, rect: Rect) -> Rect {
        let x = i32::from(rect.x) + i32::from(self.shake.offset());
        Rect::new(x.max(0) as u16, rect.y, rect.width, rect.height)
    }
}

impl Default for MessageSection {
    fn default() -> Self {
        Self::new()
    }
}

impl Section for MessageSection {
    fn id(&self) -> SectionId {
        SectionId::Message
    }

    fn height(&self, width: u16) -> u16 {
        self.layout(width).height
    }

    fn tick(&mut self, tick: u64, _width: u16, _visible: Option<(u16, u16)>) {
        self.shake.tick();
        if self.form.is_busy() {
            self.form
                .set_busy_label(Some(format!("{BUSY_LABEL} {}", spinner_frame(tick))));
        }
    }

    fn view(&self, buf: &mut Buffer, area: Rect) {
        let layout = self.layout(area.width);
        draw_heading(buf, layout.title, area, self.id());

        let form_area = self.shaken(place(layout.form, area));
        self.form.render(form_area, buf);

        // Character counter under the pesan field, right aligned on its
        // error row.
        if let Some(field) = self.form.layout().get(MESSAGE_FIELD) {
            let (text, style) = self.counter();
            let width = text.chars().count() as u16;
            let y = form_area.y + field.footer_row;
            let x = form_area.right().saturating_sub(width);
            buf.set_line(x, y, &text, style, form_area.right());
        }

        if let (Some(receipt), Some(rect)) = (&self.receipt, layout.receipt) {
            let lines: Vec<Line> = receipt
                .rows()
                .into_iter()
                .map(|(label, value)| {
                    Line::from_spans(vec![
                        Span::styled(format!("{label} "), theme::success_text().bold()),
                        Span::styled(value, theme::body()),
                    ])
                })
                .collect();
            Paragraph::new(lines)
                .block(
                    Block::card()
                        .border_style(theme::success_text())
                        .title(Line::from(Span::styled(
                            format!(" {RECEIPT_TITLE} "),
                            theme::success_text().bold(),
                        ))),
                )
                .render(place(rect, area), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use porto_core::event::{KeyCode, KeyEvent, Modifiers};
    use porto_render::buffer::row_text;
    use crate::validate::{MSG_DATE_REQUIRED, MSG_NAME_REQUIRED};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 8, 22)
    }

    fn filled_section() -> MessageSection {
        let mut section = MessageSection::new();
        section.set_field_text(NAME_FIELD, "Jane Doe");
        section.set_field_text(DATE_FIELD, "2000-01-01");
        section.select_gender(Gender::Female);
        section.set_field_text(MESSAGE_FIELD, "Halo, saya ingin bertanya tentang layanan web.");
        section
    }

    fn render_text(section: &MessageSection, width: u16) -> String {
        let mut buf = Buffer::new(width, section.height(width));
        let area = buf.area();
        section.view(&mut buf, area);
        (0..buf.height()).map(|y| row_text(&buf, y)).collect()
    }

    // --- submit ---

    #[test]
    fn empty_submit_shakes_and_reports_every_error() {
        let mut section = MessageSection::new();
        assert!(section.try_submit(today()).is_none());
        assert!(section.shake.is_active());
        assert_eq!(section.form.error(NAME_FIELD), Some(MSG_NAME_REQUIRED));
        assert_eq!(section.form.error(DATE_FIELD), Some(MSG_DATE_REQUIRED));
        assert_eq!(section.form.focused(), NAME_FIELD);
    }

    #[test]
    fn focus_jumps_to_the_first_invalid_field() {
        let mut section = filled_section();
        section.set_field_text(DATE_FIELD, "besok");
        assert!(section.try_submit(today()).is_none());
        assert_eq!(section.form.focused(), DATE_FIELD);
        assert!(section.form.error(NAME_FIELD).is_none());
    }

    #[test]
    fn jane_doe_submits_end_to_end() {
        let mut section = filled_section();
        let submission = section.try_submit(today()).unwrap();
        assert_eq!(submission.name, "Jane Doe");

        section.begin_pending();
        assert!(section.is_pending());

        let at = date(2026, 8, 22).and_time(NaiveTime::from_hms_opt(13, 5, 9).unwrap());
        section.apply_receipt(Receipt::compute(submission, at));
        assert!(!section.is_pending());
        assert_eq!(section.form.fields[NAME_FIELD].value(), "");
        assert_eq!(section.form.fields[GENDER_FIELD].value(), "");

        let rows = section.receipt().unwrap().rows();
        assert_eq!(rows[0], ("Nama:", "Jane Doe".to_string()));
        assert_eq!(rows[1], ("Tanggal Lahir:", "01/01/2000".to_string()));
        assert_eq!(rows[2], ("Umur:", "26 tahun".to_string()));
        assert_eq!(rows[3], ("Jenis Kelamin:", "Perempuan".to_string()));
        assert_eq!(rows[5], ("Waktu Submit:", "22/08/2026, 13.05.09".to_string()));

        let text = render_text(&section, 80);
        assert!(text.contains("Pesan Terkirim"));
        assert!(text.contains("Umur: 26 tahun"));
    }

    #[test]
    fn receipt_grows_the_section() {
        let mut section = filled_section();
        let before = section.height(80);
        let submission = section.try_submit(today()).unwrap();
        let at = date(2026, 8, 22).and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        section.apply_receipt(Receipt::compute(submission, at));
        assert!(section.height(80) > before);
        assert!(section.receipt_rows(80).is_some());
    }

    // --- field validation ---

    #[test]
    fn blur_validation_and_edit_clear() {
        let mut section = MessageSection::new();
        section.validate_field(NAME_FIELD, today());
        assert_eq!(section.form.error(NAME_FIELD), Some(MSG_NAME_REQUIRED));
        section.clear_error(NAME_FIELD);
        assert!(section.form.error(NAME_FIELD).is_none());
    }

    #[test]
    fn gender_change_validates_immediately() {
        let mut section = MessageSection::new();
        section.validate_field(GENDER_FIELD, today());
        assert!(section.form.error(GENDER_FIELD).is_some());
        section.select_gender(Gender::Male);
        section.validate_field(GENDER_FIELD, today());
        assert!(section.form.error(GENDER_FIELD).is_none());
    }

    // --- counter ---

    #[test]
    fn counter_counts_raw_characters() {
        let mut section = MessageSection::new();
        section.set_field_text(MESSAGE_FIELD, "  halo  ");
        assert_eq!(section.counter().0, "8/500 karakter");
        let text = render_text(&section, 80);
        assert!(text.contains("8/500 karakter"));
    }

    #[test]
    fn counter_warns_near_the_limit() {
        let mut section = MessageSection::new();
        section.set_field_text(MESSAGE_FIELD, &"x".repeat(451));
        let (text, style) = section.counter();
        assert_eq!(text, "451/500 karakter");
        assert_eq!(style, theme::error_text());

        section.set_field_text(MESSAGE_FIELD, &"x".repeat(450));
        assert_eq!(section.counter().1, theme::muted());
    }

    // --- keys ---

    #[test]
    fn enter_in_textarea_inserts_a_newline() {
        let mut section = MessageSection::new();
        section.form.focus_field(MESSAGE_FIELD);
        let signal = section.handle_key(KeyEvent::new(KeyCode::Enter, Modifiers::NONE));
        assert_eq!(signal, FormSignal::Edited(MESSAGE_FIELD));
        assert_eq!(section.form.fields[MESSAGE_FIELD].value(), "\n");
    }

    #[test]
    fn ctrl_enter_submits_from_anywhere() {
        let mut section = MessageSection::new();
        section.form.focus_field(MESSAGE_FIELD);
        let signal = section.handle_key(KeyEvent::new(KeyCode::Enter, Modifiers::CTRL));
        assert_eq!(signal, FormSignal::Submit);
    }
}
