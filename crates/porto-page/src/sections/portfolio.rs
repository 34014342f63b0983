#![forbid(unsafe_code)]

//! Portfolio: three project cards and a row of running-total stats.

use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::text::{Line, Span};
use porto_widgets::Alignment;
use porto_widgets::effects::Reveal;
use porto_widgets::paragraph::Paragraph;

use crate::theme;

use super::{
    SECTION_MARGIN_COLS, Section, SectionId, content_width, draw_heading, draw_reveal_card,
    section_meta, tick_reveal,
};

const PROJECTS: [(&str, &str); 3] = [
    (
        "Warung Nusantara",
        "Menu and ordering site for a family restaurant group.",
    ),
    (
        "Batik Lestari",
        "Catalogue and story pages for a heritage batik maker.",
    ),
    (
        "Kopi Senja",
        "Booking and loyalty pages for a Bandung coffee bar.",
    ),
];

const STATS: [(&str, &str); 3] = [
    ("50+", "Projects Completed"),
    ("30+", "Happy Clients"),
    ("5+", "Years Running"),
];

const ITEM_ROWS: u16 = 4;
const STAT_ROWS: u16 = 4;
const STAT_ROW_MIN_COLS: u16 = 54;

struct PortfolioLayout {
    title: Rect,
    items: [Rect; 3],
    stats: [Rect; 3],
    height: u16,
}

fn layout(width: u16) -> PortfolioLayout {
    let x = SECTION_MARGIN_COLS;
    let cw = content_width(width);
    let title = Rect::new(x, 1, cw, 1);

    let mut items = [Rect::new(0, 0, 0, 0); 3];
    for (i, item) in items.iter_mut().enumerate() {
        *item = Rect::new(x, 3 + i as u16 * (ITEM_ROWS + 1), cw, ITEM_ROWS);
    }
    let mut y = items[2].bottom() + 1;

    let mut stats = [Rect::new(0, 0, 0, 0); 3];
    if cw >= STAT_ROW_MIN_COLS {
        let column = (cw - 4) / 3;
        for (i, stat) in stats.iter_mut().enumerate() {
            let sx = x + i as u16 * (column + 2);
            let width = if i == 2 { cw - 2 * (column + 2) } else { column };
            *stat = Rect::new(sx, y, width, STAT_ROWS);
        }
        y += STAT_ROWS;
    } else {
        for (i, stat) in stats.iter_mut().enumerate() {
            *stat = Rect::new(x, y + i as u16 * (STAT_ROWS + 1), cw, STAT_ROWS);
        }
        y += 3 * (STAT_ROWS + 1) - 1;
    }

    PortfolioLayout {
        title,
        items,
        stats,
        height: y + 2,
    }
}

pub struct PortfolioSection {
    items: [Reveal; 3],
    stats: [Reveal; 3],
}

impl PortfolioSection {
    pub fn new() -> Self {
        Self {
            items: [Reveal::default(); 3],
            stats: [Reveal::default(); 3],
        }
    }
}

impl Default for PortfolioSection {
    fn default() -> Self {
        Self::new()
    }
}

impl Section for PortfolioSection {
    fn id(&self) -> SectionId {
        SectionId::Portfolio
    }

    fn height(&self, width: u16) -> u16 {
        layout(width).height
    }

    fn tick(&mut self, _tick: u64, width: u16, visible: Option<(u16, u16)>) {
        let layout = layout(width);
        for (reveal, rect) in self.items.iter_mut().zip(layout.items) {
            tick_reveal(reveal, rect, visible);
        }
        for (reveal, rect) in self.stats.iter_mut().zip(layout.stats) {
            tick_reveal(reveal, rect, visible);
        }
    }

    fn view(&self, buf: &mut Buffer, area: Rect) {
        let layout = layout(area.width);
        draw_heading(buf, layout.title, area, self.id());
        let accent = section_meta(self.id()).accent;

        for ((reveal, rect), (name, blurb)) in
            self.items.iter().zip(layout.items).zip(PROJECTS)
        {
            draw_reveal_card(buf, rect, area, reveal, accent, name, Paragraph::body(blurb));
        }

        for ((reveal, rect), (number, label)) in
            self.stats.iter().zip(layout.stats).zip(STATS)
        {
            let body = Paragraph::new(vec![
                Line::from(Span::styled(number, theme::heading(accent))),
                Line::from(Span::styled(label, theme::body())),
            ])
            .alignment(Alignment::Center);
            draw_reveal_card(buf, rect, area, reveal, accent, "", body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porto_render::buffer::row_text;

    #[test]
    fn stats_sit_side_by_side_when_wide() {
        let wide = layout(100);
        assert_eq!(wide.stats[0].y, wide.stats[2].y);
        assert!(wide.stats[1].x > wide.stats[0].right());

        let narrow = layout(40);
        assert!(narrow.stats[1].y > narrow.stats[0].bottom());
    }

    #[test]
    fn revealed_section_shows_projects_and_stats() {
        let mut section = PortfolioSection::new();
        let width = 100;
        let height = section.height(width);
        for tick in 0..12 {
            section.tick(tick, width, Some((0, height)));
        }
        let mut buf = Buffer::new(width, height);
        let area = buf.area();
        section.view(&mut buf, area);
        let all: String = (0..buf.height()).map(|y| row_text(&buf, y)).collect();
        for (name, _) in PROJECTS {
            assert!(all.contains(name), "missing project {name}");
        }
        for (number, label) in STATS {
            assert!(all.contains(number), "missing stat {number}");
            assert!(all.contains(label), "missing label {label}");
        }
    }

    #[test]
    fn stats_trigger_independently_of_projects() {
        let mut section = PortfolioSection::new();
        let width = 100;
        let stats_top = layout(width).stats[0].y;
        section.tick(0, width, Some((stats_top, stats_top + STAT_ROWS)));
        let mut buf = Buffer::new(width, section.height(width));
        let area = buf.area();
        section.view(&mut buf, area);
        let all: String = (0..buf.height()).map(|y| row_text(&buf, y)).collect();
        assert!(all.contains("Projects Completed"));
        assert!(!all.contains("Warung Nusantara"));
    }
}
