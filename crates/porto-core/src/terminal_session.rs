#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII ownership of every terminal mode the application touches. A
//! [`TerminalSession`] enables raw mode plus the requested features in a
//! fixed order and restores them in reverse on [`close`](TerminalSession::close),
//! on drop, on panic (via an installed hook), and on SIGINT/SIGTERM.
//!
//! Lifecycle guarantees:
//!
//! 1. Every mode change is tracked by a flag on the session.
//! 2. Teardown runs in reverse order of setup; the cursor is always
//!    re-shown and raw mode is always the last thing disabled.
//! 3. The panic hook restores the terminal before the previous hook
//!    prints the panic, so the message lands on a usable screen.
//! 4. Teardown is idempotent: `close` then drop runs cleanup once.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

/// Which terminal features a session enables beyond raw mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub alternate_screen: bool,
    pub mouse_capture: bool,
    pub bracketed_paste: bool,
    pub focus_events: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: false,
            bracketed_paste: false,
            focus_events: false,
        }
    }
}

/// Active terminal session. Construct with [`TerminalSession::new`]; the
/// terminal is restored when the value is closed or dropped.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    alternate_screen: bool,
    mouse_capture: bool,
    bracketed_paste: bool,
    focus_events: bool,
    raw_mode: bool,
    cleaned: bool,
}

static PANIC_HOOK: OnceLock<()> = OnceLock::new();

/// Install the terminal-restoring panic hook. Idempotent; the first call
/// chains the previously installed hook.
pub fn install_panic_hook() {
    PANIC_HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

/// Disable every mode this crate can enable, ignoring errors. Safe to
/// call from panic hooks and signal handlers regardless of what was
/// actually enabled.
pub fn best_effort_cleanup() {
    let mut out = io::stdout();
    let _ = execute!(out, DisableFocusChange);
    let _ = execute!(out, DisableBracketedPaste);
    let _ = execute!(out, DisableMouseCapture);
    let _ = execute!(out, Show);
    let _ = execute!(out, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    let _ = out.flush();
}

impl TerminalSession {
    /// Enter raw mode and enable the requested features.
    ///
    /// On a partial failure the already-enabled modes are restored by the
    /// returned error path (the half-built session drops).
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();
        let mut session = Self {
            options,
            alternate_screen: false,
            mouse_capture: false,
            bracketed_paste: false,
            focus_events: false,
            raw_mode: false,
            cleaned: false,
        };
        session.enable()?;
        Ok(session)
    }

    #[must_use]
    pub const fn options(&self) -> SessionOptions {
        self.options
    }

    fn enable(&mut self) -> io::Result<()> {
        let mut out = io::stdout();

        enable_raw_mode()?;
        self.raw_mode = true;
        #[cfg(feature = "tracing")]
        tracing::info!("terminal raw mode enabled");

        if self.options.alternate_screen {
            execute!(out, EnterAlternateScreen)?;
            self.alternate_screen = true;
            #[cfg(feature = "tracing")]
            tracing::info!("alternate screen enabled");
        }
        if self.options.mouse_capture {
            execute!(out, EnableMouseCapture)?;
            self.mouse_capture = true;
            #[cfg(feature = "tracing")]
            tracing::info!("mouse capture enabled");
        }
        if self.options.bracketed_paste {
            execute!(out, EnableBracketedPaste)?;
            self.bracketed_paste = true;
            #[cfg(feature = "tracing")]
            tracing::info!("bracketed paste enabled");
        }
        if self.options.focus_events {
            execute!(out, EnableFocusChange)?;
            self.focus_events = true;
            #[cfg(feature = "tracing")]
            tracing::info!("focus events enabled");
        }

        execute!(out, Hide)?;
        Ok(())
    }

    /// Restore the terminal, reporting the first failure. Prefer this to
    /// relying on drop when an exit status matters.
    pub fn close(mut self) -> io::Result<()> {
        self.cleanup()
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if self.cleaned {
            return Ok(());
        }
        self.cleaned = true;

        let mut out = io::stdout();
        let mut first_err: Option<io::Error> = None;
        let mut note = |result: io::Result<()>| {
            if let Err(err) = result
                && first_err.is_none()
            {
                first_err = Some(err);
            }
        };

        if self.focus_events {
            note(execute!(out, DisableFocusChange));
            self.focus_events = false;
        }
        if self.bracketed_paste {
            note(execute!(out, DisableBracketedPaste));
            self.bracketed_paste = false;
        }
        if self.mouse_capture {
            note(execute!(out, DisableMouseCapture));
            self.mouse_capture = false;
        }
        // Cursor visibility is restored unconditionally; a wedged hidden
        // cursor outlives the process otherwise.
        note(execute!(out, Show));
        if self.alternate_screen {
            note(execute!(out, LeaveAlternateScreen));
            self.alternate_screen = false;
        }
        if self.raw_mode {
            note(disable_raw_mode());
            self.raw_mode = false;
        }
        note(out.flush());

        #[cfg(feature = "tracing")]
        tracing::info!("terminal session closed");

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(unix)]
pub use signals::SignalGuard;

#[cfg(unix)]
mod signals {
    use super::best_effort_cleanup;
    use std::io;
    use std::thread::JoinHandle;

    use signal_hook::consts::{SIGINT, SIGTERM, SIGWINCH};
    use signal_hook::iterator::{Handle, Signals};

    /// Background listener that restores the terminal on fatal signals.
    ///
    /// SIGINT and SIGTERM clean up and exit with the conventional
    /// `128 + signo` status. SIGWINCH is drained here only so the
    /// iterator owns it; resizes reach the program as input events.
    #[derive(Debug)]
    pub struct SignalGuard {
        handle: Handle,
        thread: Option<JoinHandle<()>>,
    }

    impl SignalGuard {
        pub fn install() -> io::Result<Self> {
            let mut signals = Signals::new([SIGINT, SIGTERM, SIGWINCH])?;
            let handle = signals.handle();
            let thread = std::thread::Builder::new()
                .name("porto-signals".into())
                .spawn(move || {
                    for signal in signals.forever() {
                        match signal {
                            SIGINT | SIGTERM => {
                                best_effort_cleanup();
                                std::process::exit(128 + signal);
                            }
                            _ => {}
                        }
                    }
                })?;
            Ok(Self {
                handle,
                thread: Some(thread),
            })
        }
    }

    impl Drop for SignalGuard {
        fn drop(&mut self) {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }
}
