#![forbid(unsafe_code)]

//! Fixed page chrome: the header bar with its nav links, the collapsed
//! menu overlay, the startup name prompt, and the status bar.
//!
//! Clickable parts register [`HitId`]s while drawing; the model maps
//! resolved hits back to actions with [`section_from_hit`] and
//! [`HAMBURGER_HIT`].

use porto_core::event::KeyEvent;
use porto_core::geometry::Rect;
use porto_render::cell::Cell;
use porto_render::frame::{Frame, HitId};
use porto_render::style::Style;
use porto_render::text::{Line, Span};
use porto_widgets::Widget;
use porto_widgets::block::Block;
use porto_widgets::draw_line;
use porto_widgets::forms::{Form, FormField, FormSignal, FormStyles};

use crate::sections::{SECTION_REGISTRY, SectionId};
use crate::theme;
use crate::theme::{accent, bg};

/// Below this width the nav links collapse behind the hamburger.
pub const NAV_BREAKPOINT_COLS: u16 = 80;

pub const BRAND_LABEL: &str = "◆ Porto Kreatif";
const MENU_CLOSED_LABEL: &str = "≡ Menu";
const MENU_OPEN_LABEL: &str = "✕ Menu";
const PROMPT_TITLE: &str = "Welcome! Please enter your name:";

// ---------------------------------------------------------------------------
// Hit id ranges
// ---------------------------------------------------------------------------

/// Header nav links, one id per section in registry order.
const NAV_HIT_BASE: u32 = 10;
/// The hamburger toggle.
pub const HAMBURGER_HIT: HitId = HitId::new(20);
/// Menu overlay entries, one id per section in registry order.
const MENU_HIT_BASE: u32 = 30;

const fn nav_hit(index: usize) -> HitId {
    HitId::new(NAV_HIT_BASE + index as u32)
}

const fn menu_hit(index: usize) -> HitId {
    HitId::new(MENU_HIT_BASE + index as u32)
}

/// Map a resolved hit back to the section it navigates to, whether it
/// came from a header link or a menu entry.
pub fn section_from_hit(id: HitId) -> Option<SectionId> {
    let index = match id.0 {
        n if (NAV_HIT_BASE..NAV_HIT_BASE + 5).contains(&n) => n - NAV_HIT_BASE,
        n if (MENU_HIT_BASE..MENU_HIT_BASE + 5).contains(&n) => n - MENU_HIT_BASE,
        _ => return None,
    };
    SECTION_REGISTRY.get(index as usize).map(|meta| meta.id)
}

pub fn is_narrow(width: u16) -> bool {
    width < NAV_BREAKPOINT_COLS
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Draw the one-row header and register its clickable regions.
pub fn draw_header(frame: &mut Frame, active: Option<SectionId>, menu_open: bool) {
    let width = frame.width();
    frame
        .buffer
        .fill(Rect::new(0, 0, width, 1), Cell::blank(theme::header_bar()));
    let mut x = frame.buffer.set_line(1, 0, BRAND_LABEL, theme::brand(), width);

    if is_narrow(width) {
        let label = if menu_open { MENU_OPEN_LABEL } else { MENU_CLOSED_LABEL };
        let label_width = label.chars().count() as u16;
        let x = width.saturating_sub(label_width + 1);
        frame
            .buffer
            .set_line(x, 0, label, theme::nav_link(menu_open), width);
        frame.register_hit_region(Rect::new(x, 0, label_width, 1), HAMBURGER_HIT);
        return;
    }

    x += 2;
    for (index, meta) in SECTION_REGISTRY.iter().enumerate() {
        let link = format!(" {} ", meta.nav_label);
        let start = x;
        x = frame
            .buffer
            .set_line(x, 0, &link, theme::nav_link(active == Some(meta.id)), width);
        frame.register_hit_region(Rect::new(start, 0, x - start, 1), nav_hit(index));
        x += 1;
    }
}

// ---------------------------------------------------------------------------
// Collapsed menu overlay
// ---------------------------------------------------------------------------

const MENU_INNER_WIDTH: u16 = 14;

/// Where the overlay sits: under the header, hugging the right edge.
pub fn menu_rect(width: u16) -> Rect {
    let w = (MENU_INNER_WIDTH + 2).min(width);
    Rect::new(width.saturating_sub(w + 1), 1, w, SECTION_REGISTRY.len() as u16 + 2)
}

/// Draw the collapsed-menu overlay and register one hit per entry.
pub fn draw_menu(frame: &mut Frame, active: Option<SectionId>) {
    let area = menu_rect(frame.width());
    Block::card()
        .style(theme::overlay())
        .border_style(Style::new().fg(accent::PRIMARY))
        .render(area, &mut frame.buffer);

    let inner = Block::card().inner(area);
    for (index, meta) in SECTION_REGISTRY.iter().enumerate() {
        let y = inner.y + index as u16;
        let style = if active == Some(meta.id) {
            theme::overlay().patch(theme::heading(accent::PRIMARY))
        } else {
            theme::overlay()
        };
        let entry = format!(" {} {}", meta.hotkey, meta.nav_label);
        frame.buffer.set_line(inner.x, y, &entry, style, inner.right());
        frame.register_hit_region(Rect::new(inner.x, y, inner.width, 1), menu_hit(index));
    }
}

// ---------------------------------------------------------------------------
// Name prompt
// ---------------------------------------------------------------------------

/// What a key did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSignal {
    Pending,
    /// Enter; carries the raw input (may be blank).
    Accept(String),
    /// Escape; the caller keeps the default name.
    Cancel,
}

/// The startup modal asking for the visitor's name.
pub struct NamePrompt {
    form: Form,
}

impl NamePrompt {
    pub fn new() -> Self {
        let field = FormField::text("Nama", "Visitor");
        Self {
            form: Form::new(vec![field], "OK").styles(prompt_styles()),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptSignal {
        match self.form.handle_key(key) {
            FormSignal::Submit => PromptSignal::Accept(self.form.fields[0].value().to_string()),
            FormSignal::Cancel => PromptSignal::Cancel,
            _ => PromptSignal::Pending,
        }
    }

    /// Centered modal rectangle for the given screen.
    pub fn rect(&self, screen: Rect) -> Rect {
        let width = 40.min(screen.width.saturating_sub(2)).max(20);
        let height = self.form.height() + 2;
        Rect::new(
            screen.width.saturating_sub(width) / 2,
            screen.height.saturating_sub(height) / 2,
            width,
            height,
        )
    }

    pub fn view(&self, frame: &mut Frame) {
        let area = self.rect(frame.area());
        Block::card()
            .style(theme::overlay())
            .border_style(Style::new().fg(accent::PRIMARY))
            .title(Line::from(Span::styled(
                format!(" {PROMPT_TITLE} "),
                theme::card_title(accent::PRIMARY, false),
            )))
            .render(area, &mut frame.buffer);
        let inner = Block::card().inner(area);
        self.form.render(inner, &mut frame.buffer);
        frame.cursor_position = self.form.cursor_position(inner);
    }
}

impl Default for NamePrompt {
    fn default() -> Self {
        Self::new()
    }
}

/// The standard form styles sit on the page background; the prompt
/// floats on the overlay layer, so its empty cells carry that bg.
fn prompt_styles() -> FormStyles {
    let mut styles = theme::form_styles();
    styles.label = styles.label.bg(bg::OVERLAY);
    styles.label_focused = styles.label_focused.bg(bg::OVERLAY);
    styles.input = styles.input.bg(bg::OVERLAY);
    styles.input_focused = styles.input_focused.bg(bg::SURFACE);
    styles.placeholder = styles.placeholder.bg(bg::OVERLAY);
    styles
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// Everything the status bar shows, gathered by the model per frame.
pub struct StatusBar {
    pub narrow: bool,
    pub visitor: String,
    pub scroll_percent: u8,
}

const WIDE_HINTS: &str = "1-5 jump · n/p sections · wheel scroll · q quit";
const NARROW_HINTS: &str = "m menu · 1-5 jump · q quit";

pub fn draw_status_bar(frame: &mut Frame, status: &StatusBar) {
    let width = frame.width();
    let y = frame.height().saturating_sub(1);
    frame
        .buffer
        .fill(Rect::new(0, y, width, 1), Cell::blank(theme::status_bar()));

    let hints = if status.narrow { NARROW_HINTS } else { WIDE_HINTS };
    frame.buffer.set_line(1, y, hints, theme::status_bar(), width);

    let right = Line::from_spans(vec![
        Span::styled(
            status.visitor.clone(),
            Style::new().fg(theme::fg::SECONDARY).bg(bg::SURFACE),
        ),
        Span::styled(
            format!(" · {:>3}%", status.scroll_percent),
            theme::status_bar(),
        ),
    ]);
    let x = width.saturating_sub(right.width() as u16 + 1);
    draw_line(&mut frame.buffer, x, y, &right, width);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
