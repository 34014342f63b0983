#![forbid(unsafe_code)]

//! Tick-driven motion: typewriter reveal, error shake, scroll-in
//! entrances, and a busy spinner.
//!
//! Everything here advances on the application's animation tick and is
//! pure state; rendering reads the current value and draws accordingly.

/// Character-by-character text reveal. One character becomes visible per
/// tick; the reveal cannot be cancelled, only replaced by [`Typewriter::start`]
/// or finished instantly by [`Typewriter::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Typewriter {
    total: usize,
    visible: usize,
}

impl Typewriter {
    /// Begin revealing `total` characters from zero.
    pub fn start(&mut self, total: usize) {
        self.total = total;
        self.visible = 0;
    }

    /// Show the whole text at once.
    pub fn complete(&mut self) {
        self.visible = self.total;
    }

    /// Reset the target without animating; the new text shows fully.
    pub fn set_complete(&mut self, total: usize) {
        self.total = total;
        self.visible = total;
    }

    pub fn tick(&mut self) {
        if self.visible < self.total {
            self.visible += 1;
        }
    }

    #[inline]
    #[must_use]
    pub const fn visible(&self) -> usize {
        self.visible
    }

    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.visible >= self.total
    }
}

/// Duration of a shake in animation ticks (600 ms at the 100 ms tick).
pub const SHAKE_TICKS: u16 = 6;

/// Horizontal jitter applied to an invalid form. The offset pattern
/// follows alternating keyframes: left on odd deciles, right on even,
/// level at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shake {
    remaining: u16,
}

impl Shake {
    pub fn trigger(&mut self) {
        self.remaining = SHAKE_TICKS;
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Column offset for the current tick.
    #[must_use]
    pub fn offset(&self) -> i16 {
        if self.remaining == 0 {
            return 0;
        }
        let elapsed = SHAKE_TICKS - self.remaining;
        shake_offset(f64::from(elapsed) / f64::from(SHAKE_TICKS))
    }
}

/// Offset at `progress` in `[0, 1]`: decile 0 and 10 rest at zero, odd
/// deciles push left, even deciles push right.
#[must_use]
pub fn shake_offset(progress: f64) -> i16 {
    if !(0.0..1.0).contains(&progress) {
        return 0;
    }
    let decile = (progress * 10.0).floor() as u32;
    match decile {
        0 | 10 => 0,
        d if d % 2 == 1 => -1,
        _ => 1,
    }
}

/// Length of a card's entrance animation in ticks.
pub const REVEAL_TICKS: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RevealState {
    #[default]
    Hidden,
    Entering(u16),
    Shown,
}

/// A card's scroll-triggered entrance. Hidden until triggered, then a
/// short rise-and-brighten, then permanently shown. Triggering is
/// one-way; scrolling a revealed card off screen does not hide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reveal {
    state: RevealState,
}

impl Reveal {
    pub fn trigger(&mut self) {
        if self.state == RevealState::Hidden {
            self.state = RevealState::Entering(0);
        }
    }

    pub fn tick(&mut self) {
        if let RevealState::Entering(elapsed) = self.state {
            let next = elapsed + 1;
            self.state = if next >= REVEAL_TICKS {
                RevealState::Shown
            } else {
                RevealState::Entering(next)
            };
        }
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.state != RevealState::Hidden
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.state == RevealState::Shown
    }

    /// Rows below the final position during the first half of the
    /// entrance.
    #[must_use]
    pub fn rise_offset(&self) -> u16 {
        match self.state {
            RevealState::Entering(elapsed) if elapsed < REVEAL_TICKS / 2 => 1,
            _ => 0,
        }
    }

    /// Whether the card still renders dimmed.
    #[must_use]
    pub fn is_dimmed(&self) -> bool {
        matches!(self.state, RevealState::Entering(elapsed) if elapsed < REVEAL_TICKS * 2 / 3)
    }
}

/// Fraction of a card's rows that must be visible to trigger its
/// entrance.
pub const REVEAL_FRACTION: f64 = 0.1;

/// Whether `visible_rows` of a `card_rows`-tall card is enough exposure
/// to trigger it.
#[must_use]
pub fn reveal_threshold_met(visible_rows: u16, card_rows: u16) -> bool {
    if card_rows == 0 {
        return false;
    }
    let needed = (f64::from(card_rows) * REVEAL_FRACTION).ceil().max(1.0) as u16;
    visible_rows >= needed
}

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Braille spinner frame for an animation tick.
#[must_use]
pub fn spinner_frame(tick: u64) -> char {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}
