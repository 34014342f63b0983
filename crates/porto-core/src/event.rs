#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Crossterm's event types leak backend details (kitty-only key codes,
//! synthetic modifier keys) into every consumer. This module defines the
//! closed event vocabulary the rest of porto programs against, plus the
//! one mapping function that translates from the backend. Events the
//! vocabulary does not cover are dropped at the boundary.

use bitflags::bitflags;
use crossterm::event as cte;

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

/// A decoded key press, repeat, or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Press or repeat of exactly this character, no modifiers beyond
    /// shift (shift is how uppercase arrives).
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c)
            && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
    }

    #[inline]
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[inline]
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    #[inline]
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Press and repeat both count as active input; release does not.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key identity, independent of modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    F(u8),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A pointer event in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Text delivered by a bracketed paste.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PasteEvent {
    pub text: String,
}

/// The canonical event union delivered to programs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    Paste(PasteEvent),
    Focus(bool),
}

impl Event {
    /// Translate a backend event. `None` means the event has no canonical
    /// form (media keys, kitty modifier reports) and is dropped.
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Event> {
        match event {
            cte::Event::Key(key) => map_key_event(key).map(Event::Key),
            cte::Event::Mouse(mouse) => Some(Event::Mouse(map_mouse_event(mouse))),
            cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            cte::Event::Paste(text) => Some(Event::Paste(PasteEvent { text })),
            cte::Event::FocusGained => Some(Event::Focus(true)),
            cte::Event::FocusLost => Some(Event::Focus(false)),
        }
    }
}

fn map_key_event(key: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(key.code)?;
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(key.modifiers),
        kind: map_key_kind(key.kind),
    })
}

fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    Some(match code {
        cte::KeyCode::Char(c) => KeyCode::Char(c),
        cte::KeyCode::Enter => KeyCode::Enter,
        cte::KeyCode::Esc => KeyCode::Escape,
        cte::KeyCode::Backspace => KeyCode::Backspace,
        cte::KeyCode::Tab => KeyCode::Tab,
        cte::KeyCode::BackTab => KeyCode::BackTab,
        cte::KeyCode::Delete => KeyCode::Delete,
        cte::KeyCode::Insert => KeyCode::Insert,
        cte::KeyCode::Home => KeyCode::Home,
        cte::KeyCode::End => KeyCode::End,
        cte::KeyCode::PageUp => KeyCode::PageUp,
        cte::KeyCode::PageDown => KeyCode::PageDown,
        cte::KeyCode::Up => KeyCode::Up,
        cte::KeyCode::Down => KeyCode::Down,
        cte::KeyCode::Left => KeyCode::Left,
        cte::KeyCode::Right => KeyCode::Right,
        cte::KeyCode::F(n) => KeyCode::F(n),
        cte::KeyCode::Null => KeyCode::Null,
        _ => return None,
    })
}

fn map_key_kind(kind: cte::KeyEventKind) -> KeyEventKind {
    match kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    }
}

fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER) {
        out |= Modifiers::SUPER;
    }
    out
}

fn map_mouse_event(mouse: cte::MouseEvent) -> MouseEvent {
    MouseEvent {
        kind: map_mouse_kind(mouse.kind),
        x: mouse.column,
        y: mouse.row,
        modifiers: map_modifiers(mouse.modifiers),
    }
}

fn map_mouse_kind(kind: cte::MouseEventKind) -> MouseEventKind {
    match kind {
        cte::MouseEventKind::Down(b) => MouseEventKind::Down(map_mouse_button(b)),
        cte::MouseEventKind::Up(b) => MouseEventKind::Up(map_mouse_button(b)),
        cte::MouseEventKind::Drag(b) => MouseEventKind::Drag(map_mouse_button(b)),
        cte::MouseEventKind::Moved => MouseEventKind::Moved,
        cte::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        cte::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        cte::MouseEventKind::ScrollLeft => MouseEventKind::ScrollLeft,
        cte::MouseEventKind::ScrollRight => MouseEventKind::ScrollRight,
    }
}

fn map_mouse_button(button: cte::MouseButton) -> MouseButton {
    match button {
        cte::MouseButton::Left => MouseButton::Left,
        cte::MouseButton::Right => MouseButton::Right,
        cte::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: cte::KeyCode, modifiers: cte::KeyModifiers) -> cte::Event {
        cte::Event::Key(cte::KeyEvent::new(code, modifiers))
    }

    // --- key mapping ---

    #[test]
    fn plain_character() {
        let mapped = Event::from_crossterm(key(cte::KeyCode::Char('a'), cte::KeyModifiers::NONE));
        let Some(Event::Key(k)) = mapped else {
            panic!("expected key event");
        };
        assert_eq!(k.code, KeyCode::Char('a'));
        assert_eq!(k.modifiers, Modifiers::NONE);
        assert_eq!(k.kind, KeyEventKind::Press);
        assert!(k.is_char('a'));
        assert!(!k.is_char('b'));
    }

    #[test]
    fn ctrl_modifier_carries_through() {
        let mapped = Event::from_crossterm(key(cte::KeyCode::Char('c'), cte::KeyModifiers::CONTROL));
        let Some(Event::Key(k)) = mapped else {
            panic!("expected key event");
        };
        assert!(k.ctrl());
        assert!(!k.is_char('c'));
    }

    #[test]
    fn shifted_char_still_matches_is_char() {
        let mapped = Event::from_crossterm(key(cte::KeyCode::Char('A'), cte::KeyModifiers::SHIFT));
        let Some(Event::Key(k)) = mapped else {
            panic!("expected key event");
        };
        assert!(k.shift());
        assert!(k.is_char('A'));
    }

    #[test]
    fn named_keys_map() {
        for (input, expected) in [
            (cte::KeyCode::Enter, KeyCode::Enter),
            (cte::KeyCode::Esc, KeyCode::Escape),
            (cte::KeyCode::BackTab, KeyCode::BackTab),
            (cte::KeyCode::PageDown, KeyCode::PageDown),
            (cte::KeyCode::F(5), KeyCode::F(5)),
        ] {
            let mapped = Event::from_crossterm(key(input, cte::KeyModifiers::NONE));
            assert_eq!(mapped, Some(Event::Key(KeyEvent::new(expected, Modifiers::NONE))));
        }
    }

    #[test]
    fn release_kind_is_preserved() {
        let raw = cte::KeyEvent {
            code: cte::KeyCode::Char('x'),
            modifiers: cte::KeyModifiers::NONE,
            kind: cte::KeyEventKind::Release,
            state: cte::KeyEventState::NONE,
        };
        let Some(Event::Key(k)) = Event::from_crossterm(cte::Event::Key(raw)) else {
            panic!("expected key event");
        };
        assert_eq!(k.kind, KeyEventKind::Release);
        assert!(!k.is_active());
    }

    #[test]
    fn media_keys_are_dropped() {
        let mapped = Event::from_crossterm(key(
            cte::KeyCode::Media(cte::MediaKeyCode::Play),
            cte::KeyModifiers::NONE,
        ));
        assert_eq!(mapped, None);
    }

    // --- non-key events ---

    #[test]
    fn resize_maps_dimensions() {
        let mapped = Event::from_crossterm(cte::Event::Resize(120, 40));
        assert_eq!(
            mapped,
            Some(Event::Resize {
                width: 120,
                height: 40
            })
        );
    }

    #[test]
    fn mouse_click_keeps_coordinates() {
        let raw = cte::MouseEvent {
            kind: cte::MouseEventKind::Down(cte::MouseButton::Left),
            column: 17,
            row: 3,
            modifiers: cte::KeyModifiers::NONE,
        };
        let Some(Event::Mouse(m)) = Event::from_crossterm(cte::Event::Mouse(raw)) else {
            panic!("expected mouse event");
        };
        assert_eq!(m.kind, MouseEventKind::Down(MouseButton::Left));
        assert_eq!((m.x, m.y), (17, 3));
    }

    #[test]
    fn scroll_and_focus_and_paste() {
        let raw = cte::MouseEvent {
            kind: cte::MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: cte::KeyModifiers::NONE,
        };
        let Some(Event::Mouse(m)) = Event::from_crossterm(cte::Event::Mouse(raw)) else {
            panic!("expected mouse event");
        };
        assert_eq!(m.kind, MouseEventKind::ScrollDown);

        assert_eq!(
            Event::from_crossterm(cte::Event::FocusGained),
            Some(Event::Focus(true))
        );
        assert_eq!(
            Event::from_crossterm(cte::Event::Paste("halo".into())),
            Some(Event::Paste(PasteEvent {
                text: "halo".into()
            }))
        );
    }

    // --- modifier translation ---

    #[test]
    fn modifier_bits_accumulate() {
        let mods = map_modifiers(
            cte::KeyModifiers::CONTROL | cte::KeyModifiers::SHIFT | cte::KeyModifiers::ALT,
        );
        assert_eq!(mods, Modifiers::CTRL | Modifiers::SHIFT | Modifiers::ALT);
    }

    #[test]
    fn hyper_and_meta_are_ignored() {
        let mods = map_modifiers(cte::KeyModifiers::HYPER | cte::KeyModifiers::META);
        assert_eq!(mods, Modifiers::NONE);
    }
}
