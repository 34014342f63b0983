#![forbid(unsafe_code)]

//! Contact-form validation rules.
//!
//! Every rule is a pure function over the raw field text plus, for the
//! birth date, an explicit `today`. Error messages are the exact strings
//! shown under the fields, so they live here as constants.

use chrono::{Datelike, NaiveDate};

pub const MSG_NAME_REQUIRED: &str = "Nama harus diisi";
pub const MSG_NAME_FORMAT: &str = "Nama hanya boleh berisi huruf dan spasi (2-50 karakter)";
pub const MSG_DATE_REQUIRED: &str = "Tanggal lahir harus diisi";
pub const MSG_DATE_FUTURE: &str = "Tanggal lahir tidak boleh hari ini atau masa depan";
pub const MSG_DATE_INVALID: &str = "Tanggal lahir tidak valid";
pub const MSG_GENDER_REQUIRED: &str = "Jenis kelamin harus dipilih";
pub const MSG_MESSAGE_REQUIRED: &str = "Pesan harus diisi";
pub const MSG_MESSAGE_TOO_SHORT: &str = "Pesan minimal 10 karakter";
pub const MSG_MESSAGE_TOO_LONG: &str = "Pesan maksimal 500 karakter";

/// Birth dates are typed as `YYYY-MM-DD`.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Laki-laki",
            Gender::Female => "Perempuan",
        }
    }

    pub fn from_label(label: &str) -> Option<Gender> {
        match label {
            "Laki-laki" => Some(Gender::Male),
            "Perempuan" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Labels in the order the radio group presents them.
pub const GENDER_LABELS: [&str; 2] = [Gender::Male.label(), Gender::Female.label()];

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Trimmed name of 2 to 50 characters, ASCII letters and spaces only.
pub fn validate_name(raw: &str) -> Result<String, &'static str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(MSG_NAME_REQUIRED);
    }
    let count = name.chars().count();
    let charset_ok = name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace());
    if !(2..=50).contains(&count) || !charset_ok {
        return Err(MSG_NAME_FORMAT);
    }
    Ok(name.to_string())
}

/// A parseable date strictly before `today` and no more than a century
/// back. Exactly one hundred years ago is still accepted.
pub fn validate_birth_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MSG_DATE_REQUIRED);
    }
    let Ok(birth) = NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT) else {
        return Err(MSG_DATE_INVALID);
    };
    if birth >= today {
        return Err(MSG_DATE_FUTURE);
    }
    if birth < century_floor(today) {
        return Err(MSG_DATE_INVALID);
    }
    Ok(birth)
}

/// Same month and day one hundred years back. A Feb 29 with no leap
/// counterpart rolls forward to Mar 1.
fn century_floor(today: NaiveDate) -> NaiveDate {
    let year = today.year() - 100;
    NaiveDate::from_ymd_opt(year, today.month(), today.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(today)
}

pub fn validate_gender(selected: Option<Gender>) -> Result<Gender, &'static str> {
    selected.ok_or(MSG_GENDER_REQUIRED)
}

/// Trimmed message of 10 to 500 characters.
pub fn validate_message(raw: &str) -> Result<String, &'static str> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(MSG_MESSAGE_REQUIRED);
    }
    let count = message.chars().count();
    if count < MESSAGE_MIN_CHARS {
        return Err(MSG_MESSAGE_TOO_SHORT);
    }
    if count > MESSAGE_MAX_CHARS {
        return Err(MSG_MESSAGE_TOO_LONG);
    }
    Ok(message.to_string())
}

// ---------------------------------------------------------------------------
// Whole-form pass
// ---------------------------------------------------------------------------

/// Raw field contents as the visitor typed them.
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    pub name: String,
    pub birth_date: String,
    pub gender: Option<Gender>,
    pub message: String,
}

/// A fully validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub message: String,
}

/// One message per failed field; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub birth_date: Option<&'static str>,
    pub gender: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_clean(&self) -> bool {
        self.name.is_none()
            && self.birth_date.is_none()
            && self.gender.is_none()
            && self.message.is_none()
    }
}

/// Run every field rule so the form can show all failures at once.
pub fn validate_all(input: &ContactInput, today: NaiveDate) -> Result<ContactSubmission, FieldErrors> {
    let name = validate_name(&input.name);
    let birth_date = validate_birth_date(&input.birth_date, today);
    let gender = validate_gender(input.gender);
    let message = validate_message(&input.message);

    match (name, birth_date, gender, message) {
        (Ok(name), Ok(birth_date), Ok(gender), Ok(message)) => Ok(ContactSubmission {
            name,
            birth_date,
            gender,
            message,
        }),
        (name, birth_date, gender, message) => Err(FieldErrors {
            name: name.err(),
            birth_date: birth_date.err(),
            gender: gender.err(),
            message: message.err(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 8, 22)
    }

    // --- name ---

    #[test]
    fn name_accepts_letters_and_spaces() {
        assert_eq!(validate_name("  Jane Doe  "), Ok("Jane Doe".to_string()));
    }

    #[test]
    fn name_rejects_empty_short_long_and_symbols() {
        assert_eq!(validate_name("   "), Err(MSG_NAME_REQUIRED));
        assert_eq!(validate_name("J"), Err(MSG_NAME_FORMAT));
        assert_eq!(validate_name(&"a".repeat(51)), Err(MSG_NAME_FORMAT));
        assert_eq!(validate_name("Jane99"), Err(MSG_NAME_FORMAT));
        assert_eq!(validate_name("José"), Err(MSG_NAME_FORMAT));
    }

    proptest! {
        #[test]
        fn name_of_letters_within_bounds_always_passes(
            raw in "[a-zA-Z][a-zA-Z ]{0,48}[a-zA-Z]"
        ) {
            prop_assert!(validate_name(&raw).is_ok());
        }

        #[test]
        fn name_with_a_digit_never_passes(
            prefix in "[a-zA-Z]{1,10}", digit in "[0-9]", suffix in "[a-zA-Z]{1,10}"
        ) {
            let raw = format!("{prefix}{digit}{suffix}");
            prop_assert_eq!(validate_name(&raw), Err(MSG_NAME_FORMAT));
        }
    }

    // --- birth date ---

    #[test]
    fn yesterday_passes_but_today_and_tomorrow_do_not() {
        let today = today();
        assert_eq!(
            validate_birth_date("2026-08-21", today),
            Ok(date(2026, 8, 21))
        );
        assert_eq!(validate_birth_date("2026-08-22", today), Err(MSG_DATE_FUTURE));
        assert_eq!(validate_birth_date("2026-08-23", today), Err(MSG_DATE_FUTURE));
    }

    #[test]
    fn exactly_one_century_back_is_the_oldest_allowed() {
        let today = today();
        assert_eq!(
            validate_birth_date("1926-08-22", today),
            Ok(date(1926, 8, 22))
        );
        assert_eq!(validate_birth_date("1926-08-21", today), Err(MSG_DATE_INVALID));
    }

    #[test]
    fn century_floor_rolls_feb_29_forward() {
        // 1900 was not a leap year, so the floor from Feb 29 2000 is Mar 1 1900.
        assert_eq!(
            validate_birth_date("1900-03-01", date(2000, 2, 29)),
            Ok(date(1900, 3, 1))
        );
        assert_eq!(
            validate_birth_date("1900-02-28", date(2000, 2, 29)),
            Err(MSG_DATE_INVALID)
        );
    }

    #[test]
    fn unparseable_dates_are_invalid() {
        let today = today();
        assert_eq!(validate_birth_date("", today), Err(MSG_DATE_REQUIRED));
        assert_eq!(validate_birth_date("15-06-2000", today), Err(MSG_DATE_INVALID));
        assert_eq!(validate_birth_date("2000-02-30", today), Err(MSG_DATE_INVALID));
        assert_eq!(validate_birth_date("soon", today), Err(MSG_DATE_INVALID));
    }

    // --- gender ---

    #[test]
    fn gender_must_be_picked() {
        assert_eq!(validate_gender(None), Err(MSG_GENDER_REQUIRED));
        assert_eq!(validate_gender(Some(Gender::Female)), Ok(Gender::Female));
    }

    #[test]
    fn labels_round_trip() {
        for label in GENDER_LABELS {
            assert_eq!(Gender::from_label(label).map(Gender::label), Some(label));
        }
        assert_eq!(Gender::from_label("other"), None);
    }

    // --- message ---

    #[test]
    fn message_length_bounds_are_inclusive() {
        assert_eq!(validate_message("123456789"), Err(MSG_MESSAGE_TOO_SHORT));
        assert!(validate_message("1234567890").is_ok());
        assert!(validate_message(&"x".repeat(500)).is_ok());
        assert_eq!(
            validate_message(&"x".repeat(501)),
            Err(MSG_MESSAGE_TOO_LONG)
        );
        assert_eq!(validate_message("  \n "), Err(MSG_MESSAGE_REQUIRED));
    }

    #[test]
    fn message_length_counts_characters_after_trimming() {
        // Nine characters once trimmed, so still short of ten.
        assert_eq!(
            validate_message("  halo duni  "),
            Err(MSG_MESSAGE_TOO_SHORT)
        );
    }

    // --- whole form ---

    #[test]
    fn a_clean_form_yields_a_submission() {
        let input = ContactInput {
            name: "Jane Doe".to_string(),
            birth_date: "2000-01-01".to_string(),
            gender: Some(Gender::Female),
            message: "Halo, salam kenal semuanya!".to_string(),
        };
        let submission = validate_all(&input, today()).unwrap();
        assert_eq!(submission.name, "Jane Doe");
        assert_eq!(submission.birth_date, date(2000, 1, 1));
        assert_eq!(submission.gender, Gender::Female);
    }

    #[test]
    fn every_failed_field_reports_at_once() {
        let errors = validate_all(&ContactInput::default(), today()).unwrap_err();
        assert_eq!(errors.name, Some(MSG_NAME_REQUIRED));
        assert_eq!(errors.birth_date, Some(MSG_DATE_REQUIRED));
        assert_eq!(errors.gender, Some(MSG_GENDER_REQUIRED));
        assert_eq!(errors.message, Some(MSG_MESSAGE_REQUIRED));
        assert!(!errors.is_clean());
        assert!(FieldErrors::default().is_clean());
    }
}
