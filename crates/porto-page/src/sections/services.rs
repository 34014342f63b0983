#![forbid(unsafe_code)]

//! Services grid: four offer cards, two columns when the page is wide.

use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_widgets::effects::Reveal;
use porto_widgets::paragraph::Paragraph;

use super::{
    SECTION_MARGIN_COLS, Section, SectionId, content_width, draw_heading, draw_reveal_card,
    section_meta, tick_reveal,
};

const SERVICES: [(&str, &str); 4] = [
    (
        "Web Design",
        "Landing pages and company profiles that read well on any screen.",
    ),
    (
        "Frontend Build",
        "Hand tuned pages with no framework weight, fast on any connection.",
    ),
    (
        "SEO Audit",
        "Technical reviews covering markup, speed, and discoverability.",
    ),
    (
        "Site Care",
        "Monthly care plans with monitoring, backups, and small fixes.",
    ),
];

const CARD_ROWS: u16 = 5;
const GRID_MIN_COLS: u16 = 64;

struct ServicesLayout {
    title: Rect,
    cards: [Rect; 4],
    height: u16,
}

fn layout(width: u16) -> ServicesLayout {
    let x = SECTION_MARGIN_COLS;
    let cw = content_width(width);
    let title = Rect::new(x, 1, cw, 1);
    let mut cards = [Rect::new(0, 0, 0, 0); 4];

    let height = if cw >= GRID_MIN_COLS {
        let left_width = (cw - 2) / 2;
        let right_width = cw - left_width - 2;
        for (i, card) in cards.iter_mut().enumerate() {
            let row = (i / 2) as u16;
            let (cx, cwidth) = if i % 2 == 0 {
                (x, left_width)
            } else {
                (x + left_width + 2, right_width)
            };
            *card = Rect::new(cx, 3 + row * (CARD_ROWS + 1), cwidth, CARD_ROWS);
        }
        3 + 2 * (CARD_ROWS + 1) + 1
    } else {
        for (i, card) in cards.iter_mut().enumerate() {
            *card = Rect::new(x, 3 + i as u16 * (CARD_ROWS + 1), cw, CARD_ROWS);
        }
        3 + 4 * (CARD_ROWS + 1) + 1
    };

    ServicesLayout {
        title,
        cards,
        height,
    }
}

pub struct ServicesSection {
    cards: [Reveal; 4],
}

impl ServicesSection {
    pub fn new() -> Self {
        Self {
            cards: [Reveal::default(); 4],
        }
    }
}

impl Default for ServicesSection {
    fn default() -> Self {
        Self::new()
    }
}

impl Section for ServicesSection {
    fn id(&self) -> SectionId {
        SectionId::Services
    }

    fn height(&self, width: u16) -> u16 {
        layout(width).height
    }

    fn tick(&mut self, _tick: u64, width: u16, visible: Option<(u16, u16)>) {
        let layout = layout(width);
        for (reveal, rect) in self.cards.iter_mut().zip(layout.cards) {
            tick_reveal(reveal, rect, visible);
        }
    }

    fn view(&self, buf: &mut Buffer, area: Rect) {
        let layout = layout(area.width);
        draw_heading(buf, layout.title, area, self.id());
        let accent = section_meta(self.id()).accent;
        for ((reveal, rect), (name, blurb)) in
            self.cards.iter().zip(layout.cards).zip(SERVICES)
        {
            draw_reveal_card(buf, rect, area, reveal, accent, name, Paragraph::body(blurb));
        }
    }
}
