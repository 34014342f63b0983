#![forbid(unsafe_code)]

//! Hero section: brand line, typewriter welcome banner, live clock.

use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::text::{Line, Span};
use porto_widgets::Alignment;
use porto_widgets::Widget;
use porto_widgets::effects::Typewriter;
use porto_widgets::paragraph::Paragraph;

use crate::theme;

use super::{Section, SectionId};

const BRAND_LINE: &str = "P O R T O  K R E A T I F";
const TAGLINE: &str = "Digital craft from Jakarta, since 2019";
const HINT_LINE: &str = "Scroll with the wheel, or press 1-5 to jump between sections";

/// Block cursor shown at the end of a welcome line still being typed.
const CARET: char = '▌';

pub struct HomeSection {
    welcome: String,
    typewriter: Typewriter,
    clock_line: String,
}

impl HomeSection {
    pub fn new() -> Self {
        Self {
            welcome: String::new(),
            typewriter: Typewriter::default(),
            clock_line: String::new(),
        }
    }

    /// Start typing out a fresh welcome line, one character per tick.
    pub fn begin_welcome(&mut self, text: String) {
        self.typewriter.start(text.chars().count());
        self.welcome = text;
    }

    /// Swap the welcome line in fully revealed, with no typing animation.
    pub fn show_welcome(&mut self, text: String) {
        self.typewriter.set_complete(text.chars().count());
        self.welcome = text;
    }

    pub fn set_clock_line(&mut self, line: String) {
        self.clock_line = line;
    }

    pub fn welcome_text(&self) -> &str {
        &self.welcome
    }

    pub fn welcome_is_complete(&self) -> bool {
        self.typewriter.is_complete()
    }

    fn typed_line(&self) -> Line {
        let mut shown: String = self.welcome.chars().take(self.typewriter.visible()).collect();
        if !self.typewriter.is_complete() {
            shown.push(CARET);
        }
        Line::from(Span::styled(shown, theme::heading(theme::accent::PRIMARY)))
    }
}

impl Default for HomeSection {
    fn default() -> Self {
        Self::new()
    }
}

impl Section for HomeSection {
    fn id(&self) -> SectionId {
        SectionId::Home
    }

    fn height(&self, _width: u16) -> u16 {
        12
    }

    fn tick(&mut self, _tick: u64, _width: u16, _visible: Option<(u16, u16)>) {
        // The banner types from startup whether or not it is on screen.
        self.typewriter.tick();
    }

    fn view(&self, buf: &mut Buffer, area: Rect) {
        let lines = vec![
            Line::default(),
            Line::from(Span::styled(BRAND_LINE, theme::brand())),
            Line::from(Span::styled(TAGLINE, theme::body())),
            Line::default(),
            self.typed_line(),
            Line::default(),
            Line::from(Span::styled(self.clock_line.clone(), theme::muted())),
            Line::default(),
            Line::from(Span::styled(HINT_LINE, theme::muted())),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porto_render::buffer::row_text;

    fn render(section: &HomeSection, width: u16) -> Buffer {
        let mut buf = Buffer::new(width, section.height(width));
        let area = buf.area();
        section.view(&mut buf, area);
        buf
    }

    #[test]
    fn welcome_types_one_character_per_tick() {
        let mut home = HomeSection::new();
        home.begin_welcome("Good Morning Sari, Welcome To Website".to_string());
        assert!(!home.welcome_is_complete());

        home.tick(1, 80, None);
        home.tick(2, 80, None);
        let buf = render(&home, 60);
        let banner = row_text(&buf, 4);
        assert!(banner.contains("Go▌"), "expected partial reveal, got {banner:?}");
    }

    #[test]
    fn show_welcome_skips_the_animation() {
        let mut home = HomeSection::new();
        home.show_welcome("Good Evening Budi, Welcome To Website".to_string());
        assert!(home.welcome_is_complete());
        let buf = render(&home, 60);
        assert!(row_text(&buf, 4).contains("Good Evening Budi, Welcome To Website"));
    }

    #[test]
    fn finished_banner_drops_the_caret() {
        let mut home = HomeSection::new();
        home.begin_welcome("Hi".to_string());
        home.tick(1, 80, None);
        home.tick(2, 80, None);
        assert!(home.welcome_is_complete());
        let buf = render(&home, 40);
        assert!(!row_text(&buf, 4).contains(CARET));
    }

    #[test]
    fn clock_line_renders_where_set() {
        let mut home = HomeSection::new();
        home.set_clock_line("Sat, 08/22/2026, 01:23:45 PM GMT+7".to_string());
        let buf = render(&home, 60);
        assert!(row_text(&buf, 6).contains("GMT+7"));
    }
}
