#![forbid(unsafe_code)]

//! Palette and shared styles for the portfolio page.
//!
//! Colors are named by role, not by hue. Sections pick one accent each
//! from [`accent`]; everything else composes the helpers below so the
//! page stays consistent when the palette shifts.

use porto_render::style::{Color, Style};
use porto_widgets::forms::FormStyles;

/// Background layers, darkest first.
pub mod bg {
    use porto_render::style::Color;

    pub const DEEP: Color = Color::rgb(16, 18, 28);
    pub const SURFACE: Color = Color::rgb(26, 29, 45);
    pub const OVERLAY: Color = Color::rgb(36, 39, 58);
}

/// Foreground / text colors.
pub mod fg {
    use porto_render::style::Color;

    pub const PRIMARY: Color = Color::rgb(235, 238, 245);
    pub const SECONDARY: Color = Color::rgb(180, 186, 205);
    pub const MUTED: Color = Color::rgb(120, 126, 145);
}

/// Accent colors. PRIMARY and SECONDARY are the brand gradient pair.
pub mod accent {
    use porto_render::style::Color;

    pub const PRIMARY: Color = Color::rgb(102, 126, 234);
    pub const SECONDARY: Color = Color::rgb(118, 75, 162);
    pub const SUCCESS: Color = Color::rgb(46, 204, 113);
    pub const WARNING: Color = Color::rgb(243, 156, 18);
    pub const ERROR: Color = Color::rgb(231, 76, 60);
}

// ---------------------------------------------------------------------------
// Composed styles
// ---------------------------------------------------------------------------

/// Base style for the page body.
pub fn page() -> Style {
    Style::new().fg(fg::PRIMARY).bg(bg::DEEP)
}

/// Regular copy inside cards and sections.
pub fn body() -> Style {
    Style::new().fg(fg::SECONDARY)
}

/// De-emphasized text (hints, separators, footer lines).
pub fn muted() -> Style {
    Style::new().fg(fg::MUTED)
}

/// Section heading in the section's own accent.
pub fn heading(accent: Color) -> Style {
    Style::new().fg(accent).bold()
}

/// Card border, dimmed while the card is still below the fold.
pub fn card_border(accent: Color, dimmed: bool) -> Style {
    let style = Style::new().fg(accent);
    if dimmed { style.dim() } else { style }
}

/// Card title riding the top border.
pub fn card_title(accent: Color, dimmed: bool) -> Style {
    let style = Style::new().fg(accent).bold();
    if dimmed { style.dim() } else { style }
}

pub fn header_bar() -> Style {
    Style::new().fg(fg::PRIMARY).bg(bg::SURFACE)
}

pub fn brand() -> Style {
    Style::new().fg(accent::PRIMARY).bg(bg::SURFACE).bold()
}

pub fn nav_link(active: bool) -> Style {
    if active {
        Style::new().fg(accent::PRIMARY).bg(bg::SURFACE).bold()
    } else {
        Style::new().fg(fg::SECONDARY).bg(bg::SURFACE)
    }
}

pub fn status_bar() -> Style {
    Style::new().fg(fg::MUTED).bg(bg::SURFACE)
}

/// Overlay panels (menu, name prompt) sit on the lightest layer.
pub fn overlay() -> Style {
    Style::new().fg(fg::PRIMARY).bg(bg::OVERLAY)
}

pub fn error_text() -> Style {
    Style::new().fg(accent::ERROR)
}

pub fn success_text() -> Style {
    Style::new().fg(accent::SUCCESS)
}

/// Styles for the contact form widget.
pub fn form_styles() -> FormStyles {
    FormStyles {
        label: Style::new().fg(fg::SECONDARY),
        label_focused: Style::new().fg(accent::PRIMARY).bold(),
        input: Style::new().fg(fg::PRIMARY),
        input_focused: Style::new().fg(fg::PRIMARY).bg(bg::OVERLAY),
        placeholder: Style::new().fg(fg::MUTED),
        error: error_text(),
        button: Style::new().fg(bg::DEEP).bg(accent::PRIMARY),
        button_focused: Style::new().fg(bg::DEEP).bg(accent::PRIMARY).bold(),
        button_busy: Style::new().fg(fg::MUTED).bg(bg::OVERLAY),
    }
}
