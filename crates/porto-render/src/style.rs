#![forbid(unsafe_code)]

//! Colors, attributes, and cell styles.
//!
//! Colors are authored as 24-bit RGB and downgraded at presentation time
//! to whatever the terminal supports. Nothing outside the presenter needs
//! to know the active [`ColorProfile`].

use bitflags::bitflags;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Relative luminance in `[0, 1]`, BT.709 weights.
    #[must_use]
    pub fn luminance(self) -> f32 {
        (0.2126 * f32::from(self.r) + 0.7152 * f32::from(self.g) + 0.0722 * f32::from(self.b))
            / 255.0
    }
}

/// What the output terminal can faithfully display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorProfile {
    #[default]
    TrueColor,
    Ansi256,
    Ansi16,
    Mono,
}

impl ColorProfile {
    /// Resolve a profile from capability flags. `no_color` wins.
    #[must_use]
    pub const fn from_flags(true_color: bool, colors_256: bool, no_color: bool) -> Self {
        if no_color {
            ColorProfile::Mono
        } else if true_color {
            ColorProfile::TrueColor
        } else if colors_256 {
            ColorProfile::Ansi256
        } else {
            ColorProfile::Ansi16
        }
    }
}

/// A displayable color in one of the supported encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Rgb(Rgb),
    Ansi256(u8),
    Ansi16(u8),
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(Rgb::new(r, g, b))
    }

    /// Reduce to the richest encoding the profile can show. `None` means
    /// the profile is monochrome and the color should not be emitted.
    #[must_use]
    pub fn downgrade(self, profile: ColorProfile) -> Option<Color> {
        match profile {
            ColorProfile::Mono => None,
            ColorProfile::TrueColor => Some(self),
            ColorProfile::Ansi256 => Some(match self {
                Color::Rgb(rgb) => Color::Ansi256(rgb_to_ansi256(rgb)),
                other => other,
            }),
            ColorProfile::Ansi16 => Some(match self {
                Color::Rgb(rgb) => Color::Ansi16(rgb_to_ansi16(rgb)),
                Color::Ansi256(idx) => Color::Ansi16(rgb_to_ansi16(ansi256_to_rgb(idx))),
                other => other,
            }),
        }
    }
}

/// Map RGB onto the 256-color palette: the 6x6x6 cube, or the grayscale
/// ramp when all channels agree.
fn rgb_to_ansi256(rgb: Rgb) -> u8 {
    if rgb.r == rgb.g && rgb.g == rgb.b {
        if rgb.r < 8 {
            return 16;
        }
        if rgb.r > 248 {
            return 231;
        }
        return 232 + (rgb.r - 8) / 10;
    }
    let scale = |c: u8| -> u8 { ((u16::from(c) * 5 + 127) / 255) as u8 };
    16 + 36 * scale(rgb.r) + 6 * scale(rgb.g) + scale(rgb.b)
}

/// Approximate palette entry back to RGB, for further downgrades.
fn ansi256_to_rgb(idx: u8) -> Rgb {
    match idx {
        0..=15 => {
            const BASE: [(u8, u8, u8); 16] = [
                (0, 0, 0),
                (128, 0, 0),
                (0, 128, 0),
                (128, 128, 0),
                (0, 0, 128),
                (128, 0, 128),
                (0, 128, 128),
                (192, 192, 192),
                (128, 128, 128),
                (255, 0, 0),
                (0, 255, 0),
                (255, 255, 0),
                (0, 0, 255),
                (255, 0, 255),
                (0, 255, 255),
                (255, 255, 255),
            ];
            let (r, g, b) = BASE[idx as usize];
            Rgb::new(r, g, b)
        }
        16..=231 => {
            let idx = idx - 16;
            let level = |c: u8| -> u8 {
                if c == 0 { 0 } else { 55 + c * 40 }
            };
            Rgb::new(level(idx / 36), level((idx / 6) % 6), level(idx % 6))
        }
        232..=255 => {
            let gray = 8 + (idx - 232) * 10;
            Rgb::new(gray, gray, gray)
        }
    }
}

fn rgb_to_ansi16(rgb: Rgb) -> u8 {
    let bright = rgb.r.max(rgb.g).max(rgb.b) > 192;
    let bit = |c: u8| u8::from(c > 127);
    let index = bit(rgb.r) | (bit(rgb.g) << 1) | (bit(rgb.b) << 2);
    if bright { index + 8 } else { index }
}

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attrs: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const REVERSE       = 0b0001_0000;
        const STRIKETHROUGH = 0b0010_0000;
    }
}

/// A cell style: optional foreground/background plus attributes. `None`
/// means "leave the terminal default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: Attrs,
}

impl Style {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: Attrs::empty(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub fn attr(mut self, attrs: Attrs) -> Self {
        self.attrs |= attrs;
        self
    }

    #[must_use]
    pub const fn bold(self) -> Self {
        Self {
            attrs: self.attrs.union(Attrs::BOLD),
            ..self
        }
    }

    #[must_use]
    pub const fn dim(self) -> Self {
        Self {
            attrs: self.attrs.union(Attrs::DIM),
            ..self
        }
    }

    /// Overlay `other`: its set fields win, attributes accumulate.
    #[must_use]
    pub fn patch(self, other: Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: self.attrs | other.attrs,
        }
    }
}
