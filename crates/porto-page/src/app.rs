#![forbid(unsafe_code)]

//! The page model: one scrolling document of five sections behind a
//! fixed header and status bar.
//!
//! Scrolling works on a virtual page buffer. Every frame the sections
//! render at their natural heights into that buffer and the viewport
//! window is blitted between the chrome rows. Smooth scrolling, the
//! scroll-spy, and the reveal windows all work in page-buffer rows.

use std::time::Duration;

use chrono::{Local, Utc};

use porto_core::event::{Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use porto_core::geometry::Rect;
use porto_render::buffer::Buffer;
use porto_render::frame::{Frame, HitId};
use porto_runtime::program::{Cmd, Model};
use porto_runtime::subscription::{Every, SubId, Subscription};
use porto_widgets::forms::FormSignal;

use crate::chrome::{self, NamePrompt, PromptSignal, StatusBar};
use crate::greeting::{Greeting, welcome_line};
use crate::locale::jakarta_clock_line;
use crate::sections::message::Receipt;
use crate::sections::{
    PageSections, Section, SectionId, next_section, prev_section, section_from_hotkey,
};
use crate::session::SessionState;
use crate::theme;
use crate::util::Debounce;

/// Jump targets land this far above a section's first row, standing in
/// for the fixed header the original page scrolled under.
const NAV_ANCHOR_ROWS: u16 = 3;
/// A section owns the nav highlight once its top is within this many
/// rows of the viewport top.
const SPY_THRESHOLD_ROWS: u16 = 5;
/// The reveal window stops this many rows short of the viewport bottom.
const REVEAL_MARGIN_ROWS: u16 = 2;
/// Trailing quiet period before a resize is considered finished.
const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);
/// Artificial network delay between a valid submit and its receipt.
const SUBMIT_DELAY: Duration = Duration::from_millis(1500);
/// Rows per wheel notch.
const WHEEL_STEP: u16 = 3;

const ANIM_SUB: SubId = 1;
const CLOCK_SUB: SubId = 2;

/// Everything the model reacts to.
#[derive(Debug)]
pub enum AppMsg {
    /// Raw terminal input.
    Term(Event),
    /// The animation heartbeat.
    AnimTick,
    /// The once-a-second clock refresh.
    ClockTick,
    /// Navigate to a section (hotkey, nav link, or menu entry).
    JumpTo(SectionId),
    /// The hamburger was activated.
    ToggleMenu,
    /// A background submit finished.
    SubmitFinished(Box<Receipt>),
}

impl From<Event> for AppMsg {
    fn from(event: Event) -> Self {
        Self::Term(event)
    }
}

pub struct PageModel {
    session: SessionState,
    sections: PageSections,
    scroll: u16,
    scroll_target: Option<u16>,
    active: Option<SectionId>,
    menu_open: bool,
    resize_debounce: Debounce,
    prompt: Option<NamePrompt>,
    tick: u64,
    anim_interval: Duration,
    width: u16,
    height: u16,
}

impl PageModel {
    /// `preseed` skips the startup name prompt; `fps` sets the animation
    /// tick rate.
    pub fn new(preseed: Option<&str>, fps: u64) -> Self {
        let mut session = SessionState::new();
        if let Some(name) = preseed {
            session.set_name(name);
        }
        let prompt = if session.has_name() {
            None
        } else {
            Some(NamePrompt::new())
        };
        Self {
            session,
            sections: PageSections::new(),
            scroll: 0,
            scroll_target: None,
            active: Some(SectionId::Home),
            menu_open: false,
            resize_debounce: Debounce::new(RESIZE_DEBOUNCE),
            prompt,
            tick: 0,
            anim_interval: Duration::from_millis((1000 / fps.max(1)).max(1)),
            width: 80,
            height: 24,
        }
    }

    pub fn visitor_name(&self) -> &str {
        self.session.display_name()
    }

    // -----------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------

    /// Content rows between the header and the status bar.
    fn viewport_rows(&self) -> u16 {
        self.height.saturating_sub(2).max(1)
    }

    fn max_scroll(&self) -> u16 {
        self.sections
            .page_height(self.width)
            .saturating_sub(self.viewport_rows())
    }

    /// Window a section sees for its reveal logic, in section-local rows.
    fn reveal_window(&self, top: u16, height: u16) -> Option<(u16, u16)> {
        let window_top = self.scroll;
        let window_bottom = self
            .scroll
            .saturating_add(self.viewport_rows().saturating_sub(REVEAL_MARGIN_ROWS));
        let start = window_top.max(top);
        let end = window_bottom.min(top.saturating_add(height));
        (start < end).then(|| (start - top, end - top))
    }

    // -----------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------

    fn set_scroll(&mut self, row: u16) {
        self.scroll = row.min(self.max_scroll());
        self.refresh_active();
    }

    /// Free scrolling; cancels any smooth scroll in flight.
    fn scroll_by(&mut self, delta: i32) {
        self.scroll_target = None;
        let row = (i32::from(self.scroll) + delta).clamp(0, i32::from(u16::MAX)) as u16;
        self.set_scroll(row);
    }

    fn jump_to(&mut self, id: SectionId) {
        self.menu_open = false;
        let top = self.sections.top_of(id, self.width);
        let target = top.saturating_sub(NAV_ANCHOR_ROWS).min(self.max_scroll());
        self.scroll_target = Some(target);
        tracing::debug!(section = ?id, target, "nav jump");
    }

    /// Latest section whose top edge sits at or above the spy threshold.
    fn refresh_active(&mut self) {
        let threshold = self.scroll.saturating_add(SPY_THRESHOLD_ROWS);
        self.active = self
            .sections
            .tops(self.width)
            .iter()
            .filter(|(_, top)| *top <= threshold)
            .map(|(id, _)| *id)
            .last();
    }

    /// One ease-out step toward the scroll target: a third of the
    /// remaining distance, at least one row.
    fn step_smooth_scroll(&mut self) {
        let Some(target) = self.scroll_target else {
            return;
        };
        let current = self.scroll;
        let distance = current.abs_diff(target);
        let step = (distance / 3).max(1).min(distance);
        let next = if target > current {
            current + step
        } else {
            current - step
        };
        self.scroll = next.min(self.max_scroll());
        if self.scroll == target || distance == 0 {
            self.scroll_target = None;
        }
        self.refresh_active();
    }

    /// Smooth-scroll just enough to bring a page row range into view.
    fn scroll_range_into_view(&mut self, top: u16, bottom: u16) {
        let view_top = self.scroll;
        let view_bottom = self.scroll.saturating_add(self.viewport_rows());
        if top < view_top {
            self.scroll_target = Some(top);
        } else if bottom > view_bottom {
            let overflow = bottom - view_bottom;
            self.scroll_target = Some(
                self.scroll
                    .saturating_add(overflow)
                    .min(self.max_scroll()),
            );
        }
    }

    // -----------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------

    fn on_event(&mut self, event: Event) -> Cmd<AppMsg> {
        match event {
            Event::Key(key) if key.is_active() => self.on_key(key),
            Event::Mouse(mouse) => self.on_mouse(&mouse),
            Event::Resize { width, height } => {
                self.on_resize(width, height);
                Cmd::none()
            }
            _ => Cmd::none(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Cmd<AppMsg> {
        if let Some(prompt) = &mut self.prompt {
            match prompt.handle_key(key) {
                PromptSignal::Accept(name) => self.resolve_prompt(Some(&name)),
                PromptSignal::Cancel => self.resolve_prompt(None),
                PromptSignal::Pending => {}
            }
            return Cmd::none();
        }

        if self.menu_open {
            return self.on_menu_key(key);
        }

        // The contact form owns the keyboard while its section is
        // current; whatever it does not consume falls through.
        if self.active == Some(SectionId::Message) {
            match self.sections.message.handle_key(key) {
                FormSignal::None => {}
                other => return self.on_form_signal(other),
            }
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Escape => Cmd::quit(),
            KeyCode::Char('m') if chrome::is_narrow(self.width) => {
                self.menu_open = true;
                Cmd::none()
            }
            KeyCode::Char(c) if section_from_hotkey(c).is_some() => {
                if let Some(id) = section_from_hotkey(c) {
                    self.jump_to(id);
                }
                Cmd::none()
            }
            KeyCode::Char('n') => {
                self.jump_to(next_section(self.active.unwrap_or(SectionId::Home)));
                Cmd::none()
            }
            KeyCode::Char('p') => {
                self.jump_to(prev_section(self.active.unwrap_or(SectionId::Home)));
                Cmd::none()
            }
            KeyCode::PageDown => {
                self.scroll_by(i32::from(self.viewport_rows()));
                Cmd::none()
            }
            KeyCode::PageUp => {
                self.scroll_by(-i32::from(self.viewport_rows()));
                Cmd::none()
            }
            KeyCode::Home => {
                self.scroll_by(-i32::from(u16::MAX));
                Cmd::none()
            }
            KeyCode::End => {
                self.scroll_by(i32::from(u16::MAX));
                Cmd::none()
            }
            _ => Cmd::none(),
        }
    }

    /// An open menu swallows everything except its own keys.
    fn on_menu_key(&mut self, key: KeyEvent) -> Cmd<AppMsg> {
        match key.code {
            KeyCode::Escape | KeyCode::Char('m') => self.menu_open = false,
            KeyCode::Char(c) => {
                if let Some(id) = section_from_hotkey(c) {
                    self.jump_to(id);
                }
            }
            _ => {}
        }
        Cmd::none()
    }

    fn on_mouse(&mut self, mouse: &MouseEvent) -> Cmd<AppMsg> {
        if self.prompt.is_some() {
            return Cmd::none();
        }
        match mouse.kind {
            MouseEventKind::ScrollDown if !self.menu_open => {
                self.scroll_by(i32::from(WHEEL_STEP));
            }
            MouseEventKind::ScrollUp if !self.menu_open => {
                self.scroll_by(-i32::from(WHEEL_STEP));
            }
            // A press that reached us missed every registered region;
            // with the menu open that means "clicked outside".
            MouseEventKind::Down(_) if self.menu_open => {
                self.menu_open = false;
            }
            _ => {}
        }
        Cmd::none()
    }

    fn on_resize(&mut self, width: u16, height: u16) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.resize_debounce.trip();
        self.scroll = self.scroll.min(self.max_scroll());
        self.refresh_active();
    }

    fn resolve_prompt(&mut self, answer: Option<&str>) {
        if let Some(name) = answer {
            self.session.set_name(name);
        }
        self.prompt = None;
        let text = welcome_line(Greeting::now(), self.session.display_name());
        self.sections.home.begin_welcome(text);
        tracing::debug!(visitor = self.session.display_name(), "name prompt resolved");
    }

    // -----------------------------------------------------------------
    // Form plumbing
    // -----------------------------------------------------------------

    fn on_form_signal(&mut self, signal: FormSignal) -> Cmd<AppMsg> {
        let today = Local::now().date_naive();
        match signal {
            FormSignal::Edited(index) => self.sections.message.clear_error(index),
            FormSignal::Blurred(index) | FormSignal::Changed(index) => {
                self.sections.message.validate_field(index, today);
            }
            FormSignal::Submit => return self.on_submit(),
            // Escape inside the form is a deliberate no-op; quitting from
            // the middle of a half-filled form is too easy to hit.
            FormSignal::Cancel | FormSignal::None => {}
        }
        Cmd::none()
    }

    fn on_submit(&mut self) -> Cmd<AppMsg> {
        if self.sections.message.is_pending() {
            return Cmd::none();
        }
        let today = Local::now().date_naive();
        let Some(submission) = self.sections.message.try_submit(today) else {
            return Cmd::none();
        };
        self.sections.message.begin_pending();
        tracing::info!(name = %submission.name, "contact form accepted");
        Cmd::task(move || {
            std::thread::sleep(SUBMIT_DELAY);
            AppMsg::SubmitFinished(Box::new(Receipt::compute(
                submission,
                Local::now().naive_local(),
            )))
        })
    }

    fn on_submit_finished(&mut self, receipt: Receipt) -> Cmd<AppMsg> {
        self.session.set_name(&receipt.name);
        // The banner swaps to the new name at once; no retype.
        let text = welcome_line(Greeting::now(), self.session.display_name());
        self.sections.home.show_welcome(text);
        self.sections.message.apply_receipt(receipt);

        if let Some((top, bottom)) = self.sections.message.receipt_rows(self.width) {
            let base = self.sections.top_of(SectionId::Message, self.width);
            self.scroll_range_into_view(base.saturating_add(top), base.saturating_add(bottom));
        }
        tracing::info!("submission receipt shown");
        Cmd::none()
    }

    // -----------------------------------------------------------------
    // Ticks
    // -----------------------------------------------------------------

    fn on_anim_tick(&mut self) -> Cmd<AppMsg> {
        self.tick = self.tick.wrapping_add(1);
        self.step_smooth_scroll();

        if self.resize_debounce.fire() && !chrome::is_narrow(self.width) {
            self.menu_open = false;
        }

        let tops = self.sections.tops(self.width);
        let tick = self.tick;
        let width = self.width;
        let windows: Vec<Option<(u16, u16)>> = tops
            .iter()
            .zip(self.sections.iter())
            .map(|((_, top), section)| self.reveal_window(*top, section.height(width)))
            .collect();
        for (section, window) in self.sections.iter_mut().into_iter().zip(windows) {
            section.tick(tick, width, window);
        }
        Cmd::none()
    }

    fn on_clock_tick(&mut self) -> Cmd<AppMsg> {
        self.sections
            .home
            .set_clock_line(jakarta_clock_line(Utc::now()));
        Cmd::none()
    }
}

impl Model for PageModel {
    type Message = AppMsg;

    fn init(&mut self) -> Cmd<AppMsg> {
        self.sections
            .home
            .set_clock_line(jakarta_clock_line(Utc::now()));
        if self.prompt.is_none() {
            let text = welcome_line(Greeting::now(), self.session.display_name());
            self.sections.home.begin_welcome(text);
        }
        tracing::debug!(visitor = self.session.display_name(), "page model ready");
        Cmd::none()
    }

    fn update(&mut self, message: AppMsg) -> Cmd<AppMsg> {
        match message {
            AppMsg::Term(event) => self.on_event(event),
            AppMsg::AnimTick => self.on_anim_tick(),
            AppMsg::ClockTick => self.on_clock_tick(),
            AppMsg::JumpTo(id) => {
                self.jump_to(id);
                Cmd::none()
            }
            AppMsg::ToggleMenu => {
                self.menu_open = !self.menu_open;
                Cmd::none()
            }
            AppMsg::SubmitFinished(receipt) => self.on_submit_finished(*receipt),
        }
    }

    fn view(&self, frame: &mut Frame) {
        frame.buffer.clear(theme::page());

        let width = frame.width();
        let page_height = self.sections.page_height(width).max(1);
        let mut page = Buffer::new(width, page_height);
        page.clear(theme::page());
        for ((_, top), section) in self.sections.tops(width).iter().zip(self.sections.iter()) {
            section.view(&mut page, Rect::new(0, *top, width, section.height(width)));
        }
        page.blit_rows(self.scroll, self.viewport_rows(), &mut frame.buffer, 1);
        frame.buffer.mend_edges();

        chrome::draw_header(frame, self.active, self.menu_open);
        let max = self.max_scroll();
        let percent = if max == 0 {
            100
        } else {
            (u32::from(self.scroll) * 100 / u32::from(max)) as u8
        };
        chrome::draw_status_bar(
            frame,
            &StatusBar {
                narrow: chrome::is_narrow(width),
                visitor: self.session.display_name().to_string(),
                scroll_percent: percent,
            },
        );

        if self.menu_open && chrome::is_narrow(width) {
            chrome::draw_menu(frame, self.active);
        }

        if self.prompt.is_none() && self.active == Some(SectionId::Message) {
            let top = self.sections.top_of(SectionId::Message, width);
            let height = self.sections.message.height(width);
            let area = Rect::new(0, top, width, height);
            if let Some((x, page_y)) = self.sections.message.cursor_position(area) {
                let on_screen = page_y
                    .checked_sub(self.scroll)
                    .map(|row| row.saturating_add(1));
                if let Some(row) = on_screen
                    && row >= 1
                    && row < frame.height().saturating_sub(1)
                {
                    frame.cursor_position = Some((x, row));
                }
            }
        }

        if let Some(prompt) = &self.prompt {
            prompt.view(frame);
        }
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<AppMsg>>> {
        vec![
            Box::new(Every::new(self.anim_interval, || AppMsg::AnimTick).with_id(ANIM_SUB)),
            Box::new(Every::new(Duration::from_secs(1), || AppMsg::ClockTick).with_id(CLOCK_SUB)),
        ]
    }

    fn hit_message(&self, hit: HitId, _mouse: &MouseEvent) -> Option<AppMsg> {
        if self.prompt.is_some() {
            return None;
        }
        if hit == chrome::HAMBURGER_HIT {
            return Some(AppMsg::ToggleMenu);
        }
        chrome::section_from_hit(hit).map(AppMsg::JumpTo)
    }
}
