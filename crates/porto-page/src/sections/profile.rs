#![forbid(unsafe_code)]

//! Company profile: about card, vision/mission pair, office address list.

use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::text::{Line, Span};
use porto_widgets::effects::Reveal;
use porto_widgets::paragraph::Paragraph;

use crate::theme;
use crate::util::{format_phone_number, is_valid_email};

use super::{
    SECTION_MARGIN_COLS, Section, SectionId, content_width, draw_heading, draw_reveal_card,
    draw_reveal_line, place, tick_reveal,
};

const ABOUT_TEXT: &str = "PT Porto Kreatif is a five person web studio in Jakarta. Since \
2019 we have designed and built company profiles, campaign pages, and small shops for \
brands across Indonesia.";
const VISION_TEXT: &str = "To be the most trusted digital partner for growing local brands.";
const MISSION_TEXT: &str = "Ship honest, maintainable work and teach every client to own it.";

const HQ_ADDRESS: &str = "Jl. Jend. Sudirman Kav. 52, Jakarta Selatan 12190";
const HQ_PHONE_RAW: &str = "081234567890";
const HQ_EMAIL: &str = "halo@portokreatif.id";

/// Two-column vision/mission needs this much content width.
const TWO_COLUMN_MIN_COLS: u16 = 56;

struct ProfileLayout {
    title: Rect,
    about: Rect,
    vision: Rect,
    mission: Rect,
    hq_title: Rect,
    hq: [Rect; 3],
    height: u16,
}

fn layout(width: u16) -> ProfileLayout {
    let x = SECTION_MARGIN_COLS;
    let cw = content_width(width);
    let title = Rect::new(x, 1, cw, 1);
    let about = Rect::new(x, 3, cw, 6);

    let mut y = about.bottom() + 1;
    let (vision, mission);
    if cw >= TWO_COLUMN_MIN_COLS {
        let half = (cw - 2) / 2;
        vision = Rect::new(x, y, half, 5);
        mission = Rect::new(x + half + 2, y, cw - half - 2, 5);
        y += 6;
    } else {
        vision = Rect::new(x, y, cw, 5);
        mission = Rect::new(x, y + 6, cw, 5);
        y += 12;
    }

    let hq_title = Rect::new(x, y, cw, 1);
    let hq = [
        Rect::new(x, y + 2, cw, 1),
        Rect::new(x, y + 4, cw, 1),
        Rect::new(x, y + 6, cw, 1),
    ];
    ProfileLayout {
        title,
        about,
        vision,
        mission,
        hq_title,
        hq,
        height: y + 9,
    }
}

pub struct ProfileSection {
    about_card: Reveal,
    vision_card: Reveal,
    mission_card: Reveal,
    hq_items: [Reveal; 3],
    phone: String,
    email_ok: bool,
}

impl ProfileSection {
    pub fn new() -> Self {
        Self {
            about_card: Reveal::default(),
            vision_card: Reveal::default(),
            mission_card: Reveal::default(),
            hq_items: [Reveal::default(); 3],
            phone: format_phone_number(HQ_PHONE_RAW),
            email_ok: is_valid_email(HQ_EMAIL),
        }
    }

    fn hq_lines(&self) -> [Line; 3] {
        let marker = |text: String| {
            Line::from_spans(vec![
                Span::styled("• ", theme::heading(theme::accent::SECONDARY)),
                Span::styled(text, theme::body()),
            ])
        };
        let mut email = marker(format!("Email: {HQ_EMAIL}"));
        if self.email_ok {
            email.push_span(Span::styled(" ✓", theme::success_text()));
        }
        [
            marker(HQ_ADDRESS.to_string()),
            marker(format!("Telepon: {}", self.phone)),
            email,
        ]
    }
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self::new()
    }
}

impl Section for ProfileSection {
    fn id(&self) -> SectionId {
        SectionId::Profile
    }

    fn height(&self, width: u16) -> u16 {
        layout(width).height
    }

    fn tick(&mut self, _tick: u64, width: u16, visible: Option<(u16, u16)>) {
        let layout = layout(width);
        tick_reveal(&mut self.about_card, layout.about, visible);
        tick_reveal(&mut self.vision_card, layout.vision, visible);
        tick_reveal(&mut self.mission_card, layout.mission, visible);
        for (reveal, rect) in self.hq_items.iter_mut().zip(layout.hq) {
            tick_reveal(reveal, rect, visible);
        }
    }

    fn view(&self, buf: &mut Buffer, area: Rect) {
        let layout = layout(area.width);
        draw_heading(buf, layout.title, area, self.id());

        let accent = super::section_meta(self.id()).accent;
        draw_reveal_card(
            buf,
            layout.about,
            area,
            &self.about_card,
            accent,
            "Tentang Kami",
            Paragraph::body(ABOUT_TEXT),
        );
        draw_reveal_card(
            buf,
            layout.vision,
            area,
            &self.vision_card,
            accent,
            "Visi",
            Paragraph::body(VISION_TEXT),
        );
        draw_reveal_card(
            buf,
            layout.mission,
            area,
            &self.mission_card,
            accent,
            "Misi",
            Paragraph::body(MISSION_TEXT),
        );

        let hq_style = theme::heading(theme::accent::SECONDARY);
        let hq_title = place(layout.hq_title, area);
        buf.set_line(hq_title.x, hq_title.y, "Alamat Kantor", hq_style, hq_title.right());

        for ((reveal, rect), line) in self.hq_items.iter().zip(layout.hq).zip(self.hq_lines()) {
            draw_reveal_line(buf, rect, area, reveal, line);
        }
    }
}
