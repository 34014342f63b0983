#![forbid(unsafe_code)]

//! Time-of-day greeting for the welcome banner.

use chrono::Timelike;

/// Daypart bucket for the banner greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// Bucket for an hour of day: morning before 12, afternoon before 18,
    /// evening otherwise.
    pub fn for_hour(hour: u32) -> Self {
        if hour < 12 {
            Greeting::Morning
        } else if hour < 18 {
            Greeting::Afternoon
        } else {
            Greeting::Evening
        }
    }

    pub fn now() -> Self {
        Self::for_hour(chrono::Local::now().hour())
    }

    pub fn label(self) -> &'static str {
        match self {
            Greeting::Morning => "Good Morning",
            Greeting::Afternoon => "Good Afternoon",
            Greeting::Evening => "Good Evening",
        }
    }
}

/// Full banner line for a visitor.
pub fn welcome_line(greeting: Greeting, name: &str) -> String {
    format!("{} {}, Welcome To Website", greeting.label(), name)
}
