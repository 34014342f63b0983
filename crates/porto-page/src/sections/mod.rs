#![forbid(unsafe_code)]

//! Page sections in document order.
//!
//! Each section implements the [`Section`] trait and renders into its own
//! window of the tall page buffer. The registry is the single source of
//! truth for ordering, labels, hotkeys, and accents.

pub mod home;
pub mod message;
pub mod portfolio;
pub mod profile;
pub mod services;

use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::style::Color;
use porto_render::text::{Line, Span};
use porto_widgets::Widget;
use porto_widgets::block::Block;
use porto_widgets::effects::Reveal;
use porto_widgets::paragraph::Paragraph;

use crate::theme;
use crate::theme::accent;

pub use home::HomeSection;
pub use message::MessageSection;
pub use portfolio::PortfolioSection;
pub use profile::ProfileSection;
pub use services::ServicesSection;

/// Section identity, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    Profile,
    Services,
    Portfolio,
    Message,
}

impl SectionId {
    pub const ALL: &'static [SectionId] = &[
        SectionId::Home,
        SectionId::Profile,
        SectionId::Services,
        SectionId::Portfolio,
        SectionId::Message,
    ];
}

/// Registry metadata describing one page section.
#[derive(Debug, Clone, Copy)]
pub struct SectionMeta {
    pub id: SectionId,
    pub title: &'static str,
    pub nav_label: &'static str,
    pub hotkey: char,
    pub accent: Color,
}

/// Section registry: single source of truth for ordering + metadata.
pub const SECTION_REGISTRY: &[SectionMeta] = &[
    SectionMeta {
        id: SectionId::Home,
        title: "Welcome",
        nav_label: "Home",
        hotkey: '1',
        accent: accent::PRIMARY,
    },
    SectionMeta {
        id: SectionId::Profile,
        title: "Company Profile",
        nav_label: "Profile",
        hotkey: '2',
        accent: accent::SECONDARY,
    },
    SectionMeta {
        id: SectionId::Services,
        title: "Our Services",
        nav_label: "Services",
        hotkey: '3',
        accent: accent::SUCCESS,
    },
    SectionMeta {
        id: SectionId::Portfolio,
        title: "Our Portfolio",
        nav_label: "Portfolio",
        hotkey: '4',
        accent: accent::WARNING,
    },
    SectionMeta {
        id: SectionId::Message,
        title: "Send Us a Message",
        nav_label: "Message",
        hotkey: '5',
        accent: accent::ERROR,
    },
];

/// Lookup a section in the registry.
pub fn section_meta(id: SectionId) -> &'static SectionMeta {
    SECTION_REGISTRY
        .iter()
        .find(|meta| meta.id == id)
        .unwrap_or(&SECTION_REGISTRY[0])
}

/// Index of a section in document order.
pub fn section_index(id: SectionId) -> usize {
    SECTION_REGISTRY
        .iter()
        .position(|meta| meta.id == id)
        .unwrap_or(0)
}

pub fn section_title(id: SectionId) -> &'static str {
    section_meta(id).title
}

/// Next section in document order (wraps).
pub fn next_section(current: SectionId) -> SectionId {
    let idx = section_index(current);
    SECTION_REGISTRY[(idx + 1) % SECTION_REGISTRY.len()].id
}

/// Previous section in document order (wraps).
pub fn prev_section(current: SectionId) -> SectionId {
    let idx = section_index(current);
    let prev = (idx + SECTION_REGISTRY.len() - 1) % SECTION_REGISTRY.len();
    SECTION_REGISTRY[prev].id
}

/// Section bound to a digit key, if any.
pub fn section_from_hotkey(key: char) -> Option<SectionId> {
    SECTION_REGISTRY
        .iter()
        .find(|meta| meta.hotkey == key)
        .map(|meta| meta.id)
}

/// One page section: a fixed-width window of the tall page buffer.
pub trait Section {
    fn id(&self) -> SectionId;

    /// Rows this section occupies at the given width.
    fn height(&self, width: u16) -> u16;

    /// Advance animations. `visible` is the on-screen row window in
    /// section-local coordinates (half-open), already trimmed by the
    /// reveal margin at its bottom edge; `None` while fully off screen.
    fn tick(&mut self, tick: u64, width: u16, visible: Option<(u16, u16)>);

    /// Draw into the window `area` of the page buffer.
    fn view(&self, buf: &mut Buffer, area: Rect);
}

/// Left/right page margin inside a section.
pub(crate) const SECTION_MARGIN_COLS: u16 = 2;

/// Columns left for content once the margins are taken.
pub(crate) fn content_width(width: u16) -> u16 {
    width.saturating_sub(SECTION_MARGIN_COLS * 2).max(1)
}

/// Shift a section-local rect into the page buffer.
pub(crate) fn place(local: Rect, origin: Rect) -> Rect {
    Rect::new(
        origin.x.saturating_add(local.x),
        origin.y.saturating_add(local.y),
        local.width,
        local.height,
    )
}

/// Draw a section's registry title at `local` (its heading row).
pub(crate) fn draw_heading(buf: &mut Buffer, local: Rect, origin: Rect, id: SectionId) {
    let meta = section_meta(id);
    let style = theme::heading(meta.accent);
    let area = place(local, origin);
    buf.set_line(area.x, area.y, meta.title, style, area.right());
}

/// Draw a bordered card honoring its entrance state: hidden until
/// triggered, risen one row and dimmed early in the entrance.
pub(crate) fn draw_reveal_card(
    buf: &mut Buffer,
    local: Rect,
    origin: Rect,
    reveal: &Reveal,
    accent: Color,
    title: &str,
    body: Paragraph,
) {
    if !reveal.is_triggered() {
        return;
    }
    let mut area = place(local, origin);
    area.y = area.y.saturating_add(reveal.rise_offset());
    let dimmed = reveal.is_dimmed();
    let mut block = Block::card().border_style(theme::card_border(accent, dimmed));
    if !title.is_empty() {
        block = block.title(Line::from(Span::styled(
            format!(" {title} "),
            theme::card_title(accent, dimmed),
        )));
    }
    let text = if dimmed {
        theme::body().dim()
    } else {
        theme::body()
    };
    body.style(text).block(block).render(area, buf);
}

/// Single-row counterpart of [`draw_reveal_card`] for borderless items.
pub(crate) fn draw_reveal_line(
    buf: &mut Buffer,
    local: Rect,
    origin: Rect,
    reveal: &Reveal,
    line: Line,
) {
    if !reveal.is_triggered() {
        return;
    }
    let mut area = place(local, origin);
    area.y = area.y.saturating_add(reveal.rise_offset());
    let line = if reveal.is_dimmed() {
        Line {
            spans: line
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content, span.style.dim()))
                .collect(),
        }
    } else {
        line
    };
    porto_widgets::draw_line(buf, area.x, area.y, &line, area.right());
}

/// Advance a card's entrance and fire its trigger once enough of it is
/// inside the (margin-extended) visible window.
pub(crate) fn tick_reveal(reveal: &mut Reveal, card: Rect, visible: Option<(u16, u16)>) {
    reveal.tick();
    if !reveal.is_triggered()
        && porto_widgets::effects::reveal_threshold_met(visible_rows(card, visible), card.height)
    {
        reveal.trigger();
    }
}

/// Rows of `card` (section-local) covered by the visible window.
pub(crate) fn visible_rows(card: Rect, visible: Option<(u16, u16)>) -> u16 {
    let Some((start, end)) = visible else {
        return 0;
    };
    let top = card.y.max(start);
    let bottom = card.bottom().min(end);
    bottom.saturating_sub(top)
}

// ---------------------------------------------------------------------------
// The five sections as one value
// ---------------------------------------------------------------------------

/// All page sections, stored concretely so the model can reach into the
/// form and banner, iterated as trait objects for layout and drawing.
pub struct PageSections {
    pub home: HomeSection,
    pub profile: ProfileSection,
    pub services: ServicesSection,
    pub portfolio: PortfolioSection,
    pub message: MessageSection,
}

impl PageSections {
    pub fn new() -> Self {
        Self {
            home: HomeSection::new(),
            profile: ProfileSection::new(),
            services: ServicesSection::new(),
            portfolio: PortfolioSection::new(),
            message: MessageSection::new(),
        }
    }

    /// Sections in document order.
    pub fn iter(&self) -> [&dyn Section; 5] {
        [
            &self.home,
            &self.profile,
            &self.services,
            &self.portfolio,
            &self.message,
        ]
    }

    pub fn iter_mut(&mut self) -> [&mut dyn Section; 5] {
        [
            &mut self.home,
            &mut self.profile,
            &mut self.services,
            &mut self.portfolio,
            &mut self.message,
        ]
    }

    /// Top row of every section at the given width, in document order.
    pub fn tops(&self, width: u16) -> [(SectionId, u16); 5] {
        let mut tops = [(SectionId::Home, 0u16); 5];
        let mut y = 0u16;
        for (slot, section) in tops.iter_mut().zip(self.iter()) {
            *slot = (section.id(), y);
            y = y.saturating_add(section.height(width));
        }
        tops
    }

    /// Total page height at the given width.
    pub fn page_height(&self, width: u16) -> u16 {
        self.iter()
            .iter()
            .map(|section| section.height(width))
            .fold(0u16, u16::saturating_add)
    }

    /// Top row of one section.
    pub fn top_of(&self, id: SectionId, width: u16) -> u16 {
        self.tops(width)
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, top)| *top)
            .unwrap_or(0)
    }
}

impl Default for PageSections {
    fn default() -> Self {
        Self::new()
    }
}
