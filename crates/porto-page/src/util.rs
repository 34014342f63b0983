#![forbid(unsafe_code)]

//! Small helpers shared across the page: a trailing-edge debounce and
//! the contact-detail formatters shown on the profile card.

use std::time::{Duration, Instant};

/// Trailing-edge debounce. [`trip`](Debounce::trip) restarts the quiet
/// period; [`fire`](Debounce::fire) reports true exactly once after a
/// full quiet period with no further trips.
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn trip(&mut self) {
        self.trip_at(Instant::now());
    }

    pub fn trip_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn fire(&mut self) -> bool {
        self.fire_at(Instant::now())
    }

    pub fn fire_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Format an Indonesian mobile number as `XXXX-XXXX-XXXX` when it has
/// exactly twelve digits; anything else is returned untouched.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 12 {
        format!("{}-{}-{}", &digits[0..4], &digits[4..8], &digits[8..12])
    } else {
        phone.to_string()
    }
}

/// Structural email check: one `@`, no whitespace, and a dot strictly
/// inside the domain part.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- debounce ---

    #[test]
    fn fires_once_after_the_quiet_period() {
        let mut debounce = Debounce::new(Duration::from_millis(250));
        let start = Instant::now();
        debounce.trip_at(start);
        assert!(!debounce.fire_at(start + Duration::from_millis(100)));
        assert!(debounce.fire_at(start + Duration::from_millis(250)));
        assert!(!debounce.fire_at(start + Duration::from_millis(300)));
    }

    #[test]
    fn retrip_pushes_the_deadline_back() {
        let mut debounce = Debounce::new(Duration::from_millis(250));
        let start = Instant::now();
        debounce.trip_at(start);
        debounce.trip_at(start + Duration::from_millis(200));
        assert!(!debounce.fire_at(start + Duration::from_millis(300)));
        assert!(debounce.fire_at(start + Duration::from_millis(450)));
    }

    #[test]
    fn untripped_debounce_never_fires() {
        let mut debounce = Debounce::new(Duration::from_millis(250));
        assert!(!debounce.is_pending());
        assert!(!debounce.fire_at(Instant::now() + Duration::from_secs(60)));
    }

    // --- phone ---

    #[test]
    fn twelve_digits_get_grouped() {
        assert_eq!(format_phone_number("081234567890"), "0812-3456-7890");
        assert_eq!(format_phone_number("0812 3456 7890"), "0812-3456-7890");
    }

    #[test]
    fn other_lengths_pass_through() {
        assert_eq!(format_phone_number("0812345678"), "0812345678");
        assert_eq!(format_phone_number("call me"), "call me");
        assert_eq!(format_phone_number(""), "");
    }

    proptest! {
        #[test]
        fn grouping_never_loses_digits(raw in "[0-9 ()+-]{0,20}") {
            let formatted = format_phone_number(&raw);
            let before: String = raw.chars().filter(char::is_ascii_digit).collect();
            let after: String = formatted.chars().filter(char::is_ascii_digit).collect();
            prop_assert_eq!(before, after);
        }
    }

    // --- email ---

    #[test]
    fn plain_addresses_are_accepted() {
        assert!(is_valid_email("budi@contoh.co.id"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn missing_pieces_are_rejected() {
        assert!(!is_valid_email("budi"));
        assert!(!is_valid_email("budi@contoh"));
        assert!(!is_valid_email("@contoh.id"));
        assert!(!is_valid_email("budi@.id"));
        assert!(!is_valid_email("budi@contoh."));
        assert!(!is_valid_email("bu di@contoh.id"));
        assert!(!is_valid_email("budi@@contoh.id"));
    }
}
