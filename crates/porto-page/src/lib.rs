#![forbid(unsafe_code)]

//! A company portfolio page rendered as a full-screen terminal application.
//!
//! The page is laid out as one tall virtual canvas of stacked sections
//! (home, profile, services, portfolio, message) with a sticky header and
//! status bar. Scrolling, section reveals, the greeting banner, and the
//! contact form all live in [`app::PageModel`].

pub mod app;
pub mod chrome;
pub mod cli;
pub mod greeting;
pub mod locale;
pub mod sections;
pub mod session;
pub mod theme;
pub mod util;
pub mod validate;
