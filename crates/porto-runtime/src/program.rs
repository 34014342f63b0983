#![forbid(unsafe_code)]

//! The program loop: model in, frames out.
//!
//! [`Program`] owns the terminal session and drives a [`Model`] through
//! the update cycle. Messages come from four places: terminal input,
//! subscription threads, finished background tasks, and commands
//! returned by `update` itself. Rendering is lazy: a frame is built and
//! diffed only after at least one update ran since the last present.
//!
//! Mouse clicks are routed through the previous frame's hit grid. A
//! press on a registered region is handed to [`Model::hit_message`] and
//! delivered as the returned message; everything else reaches the model
//! as a plain input event via `From<Event>`.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event as cte;
use crossterm::terminal;

use porto_core::event::{Event, KeyCode, MouseEvent, MouseEventKind};
use porto_core::terminal_session::{SessionOptions, TerminalSession};
use porto_render::buffer::Buffer;
use porto_render::diff::BufferDiff;
use porto_render::frame::{Frame, HitGrid, HitId};
use porto_render::presenter::Presenter;
use porto_render::style::ColorProfile;

use crate::subscription::{Subscription, SubscriptionManager};

/// Effect requested by an update.
pub enum Cmd<M> {
    /// Nothing to do.
    None,
    /// Stop the program loop.
    Quit,
    /// Feed another message through `update` this cycle.
    Msg(M),
    /// Several effects, applied in order.
    Batch(Vec<Cmd<M>>),
    /// Run a blocking job on a background thread; its return value comes
    /// back as a message.
    Task(Box<dyn FnOnce() -> M + Send + 'static>),
}

impl<M> Cmd<M> {
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    #[must_use]
    pub const fn quit() -> Self {
        Self::Quit
    }

    #[must_use]
    pub fn msg(message: M) -> Self {
        Self::Msg(message)
    }

    #[must_use]
    pub fn batch(cmds: impl IntoIterator<Item = Cmd<M>>) -> Self {
        Self::Batch(cmds.into_iter().collect())
    }

    #[must_use]
    pub fn task(job: impl FnOnce() -> M + Send + 'static) -> Self {
        Self::Task(Box::new(job))
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Application state machine driven by [`Program`].
pub trait Model {
    /// Anything the model reacts to. Terminal input arrives through the
    /// required `From<Event>` conversion.
    type Message: From<Event> + Send + 'static;

    /// Runs once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::None
    }

    fn update(&mut self, message: Self::Message) -> Cmd<Self::Message>;

    fn view(&self, frame: &mut Frame);

    /// Message sources that should be running right now. Called after
    /// every update batch; identity is by [`Subscription::id`].
    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Self::Message>>> {
        Vec::new()
    }

    /// Translate a mouse press on a registered hit region. Returning
    /// `None` delivers the raw mouse event instead.
    fn hit_message(&self, hit: HitId, mouse: &MouseEvent) -> Option<Self::Message> {
        let _ = (hit, mouse);
        None
    }
}

/// Loop and terminal settings.
#[derive(Debug, Clone, Copy)]
pub struct ProgramConfig {
    pub session: SessionOptions,
    pub profile: ColorProfile,
    /// How long one loop iteration blocks waiting for input. Bounds the
    /// latency of subscription and task messages.
    pub poll_timeout: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            session: SessionOptions::default(),
            profile: ColorProfile::default(),
            poll_timeout: Duration::from_millis(50),
        }
    }
}

/// Runs a [`Model`] against the real terminal until it quits.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
}

impl<M: Model> Program<M> {
    #[must_use]
    pub fn new(model: M) -> Self {
        Self::with_config(model, ProgramConfig::default())
    }

    #[must_use]
    pub fn with_config(model: M, config: ProgramConfig) -> Self {
        Self { model, config }
    }

    /// Take over the terminal and run to completion. Returns the final
    /// model so callers can inspect where the session ended.
    pub fn run(self) -> io::Result<M> {
        let Self { mut model, config } = self;

        #[cfg(unix)]
        let _signals = porto_core::terminal_session::SignalGuard::install()?;
        let session = TerminalSession::new(config.session)?;

        let loop_result = run_loop(&mut model, &config);
        let close_result = session.close();
        loop_result?;
        close_result?;
        Ok(model)
    }
}

fn run_loop<M: Model>(model: &mut M, config: &ProgramConfig) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut width = cols.max(1);
    let mut height = rows.max(1);
    tracing::info!(width, height, "program started");

    let mut presenter = Presenter::new(io::stdout(), config.profile);
    presenter.schedule_clear();
    let mut previous = Buffer::new(width, height);
    let mut hits = HitGrid::new(width, height);

    let mut subs: SubscriptionManager<M::Message> = SubscriptionManager::new();
    let (task_tx, task_rx) = mpsc::channel::<M::Message>();
    let mut queue: VecDeque<M::Message> = VecDeque::new();

    if !apply_cmd(model.init(), &mut queue, &task_tx) {
        return Ok(());
    }
    // The backend only reports size changes, so the starting size arrives as
    // a synthetic resize before the first frame.
    queue.push_back(M::Message::from(Event::Resize { width, height }));
    subs.reconcile(model.subscriptions());
    let mut dirty = true;

    loop {
        let mut updated = false;
        while let Some(message) = queue.pop_front() {
            if !apply_cmd(model.update(message), &mut queue, &task_tx) {
                tracing::debug!("quit command received");
                return Ok(());
            }
            updated = true;
        }
        if updated {
            subs.reconcile(model.subscriptions());
            dirty = true;
        }

        if dirty {
            dirty = false;
            let mut frame = Frame::new(width, height);
            model.view(&mut frame);
            let (buffer, frame_hits, cursor) = frame.into_parts();
            let diff = BufferDiff::compute(&previous, &buffer);
            tracing::trace!(cells = diff.cell_count(), "frame presented");
            presenter.present(&buffer, &diff, cursor)?;
            previous = buffer;
            hits = frame_hits;
        }

        if cte::poll(config.poll_timeout)? {
            let raw = cte::read()?;
            if let Some(event) = Event::from_crossterm(raw) {
                if is_quit_key(&event) {
                    tracing::debug!("ctrl-c received");
                    return Ok(());
                }
                if let Event::Resize {
                    width: new_width,
                    height: new_height,
                } = &event
                {
                    width = (*new_width).max(1);
                    height = (*new_height).max(1);
                    tracing::debug!(width, height, "terminal resized");
                    previous = Buffer::new(width, height);
                    hits = HitGrid::new(width, height);
                    presenter.schedule_clear();
                }
                queue.push_back(route_event(model, &hits, event));
            }
        }

        for message in subs.drain_messages() {
            queue.push_back(message);
        }
        while let Ok(message) = task_rx.try_recv() {
            queue.push_back(message);
        }
    }
}

/// Mouse presses on a registered region become the model's own message;
/// everything else passes through `From<Event>`.
fn route_event<M: Model>(model: &M, hits: &HitGrid, event: Event) -> M::Message {
    if let Event::Mouse(mouse) = &event
        && matches!(mouse.kind, MouseEventKind::Down(_))
        && let Some(id) = hits.hit_test(mouse.x, mouse.y)
        && let Some(message) = model.hit_message(id, mouse)
    {
        return message;
    }
    M::Message::from(event)
}

fn is_quit_key(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key)
            if key.ctrl() && matches!(key.code, KeyCode::Char('c')) && key.is_active()
    )
}

static TASK_SEQ: AtomicU64 = AtomicU64::new(0);

/// Apply one command. Returns `false` when the program should stop; a
/// batch is applied in full even when it contains a quit.
fn apply_cmd<M: Send + 'static>(
    cmd: Cmd<M>,
    queue: &mut VecDeque<M>,
    task_tx: &mpsc::Sender<M>,
) -> bool {
    match cmd {
        Cmd::None => true,
        Cmd::Quit => false,
        Cmd::Msg(message) => {
            queue.push_back(message);
            true
        }
        Cmd::Batch(cmds) => {
            let mut keep_running = true;
            for cmd in cmds {
                keep_running &= apply_cmd(cmd, queue, task_tx);
            }
            keep_running
        }
        Cmd::Task(job) => {
            let sender = task_tx.clone();
            let seq = TASK_SEQ.fetch_add(1, Ordering::Relaxed);
            let spawned = std::thread::Builder::new()
                .name(format!("porto-task-{seq}"))
                .spawn(move || {
                    // A closed channel means the loop already quit; the
                    // result is simply dropped.
                    let _ = sender.send(job());
                });
            if let Err(error) = spawned {
                tracing::error!(%error, "failed to spawn task thread");
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porto_core::event::{KeyEvent, Modifiers};

    // --- commands ---

    #[test]
    fn cmd_constructors_build_expected_variants() {
        assert!(Cmd::<u32>::none().is_none());
        assert!(matches!(Cmd::<u32>::quit(), Cmd::Quit));
        assert!(matches!(Cmd::msg(5u32), Cmd::Msg(5)));
        let batch = Cmd::batch([Cmd::msg(1u32), Cmd::none()]);
        assert!(matches!(batch, Cmd::Batch(ref cmds) if cmds.len() == 2));
    }

    #[test]
    fn apply_enqueues_messages_in_order() {
        let mut queue = VecDeque::new();
        let (tx, _rx) = mpsc::channel();
        assert!(apply_cmd(Cmd::msg(1u32), &mut queue, &tx));
        assert!(apply_cmd(
            Cmd::batch([Cmd::msg(2u32), Cmd::msg(3u32)]),
            &mut queue,
            &tx
        ));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn quit_inside_a_batch_still_applies_siblings() {
        let mut queue = VecDeque::new();
        let (tx, _rx) = mpsc::channel();
        let keep = apply_cmd(
            Cmd::batch([Cmd::msg(1u32), Cmd::quit(), Cmd::msg(2u32)]),
            &mut queue,
            &tx,
        );
        assert!(!keep);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn task_result_arrives_on_the_channel() {
        let mut queue = VecDeque::new();
        let (tx, rx) = mpsc::channel();
        assert!(apply_cmd(Cmd::task(|| 42u32), &mut queue, &tx));
        assert!(queue.is_empty());
        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result, 42);
    }

    // --- input routing ---

    #[test]
    fn ctrl_c_is_the_quit_key() {
        let quit = Event::Key(KeyEvent::new(KeyCode::Char('c'), Modifiers::CTRL));
        assert!(is_quit_key(&quit));
        let plain = Event::Key(KeyEvent::new(KeyCode::Char('c'), Modifiers::NONE));
        assert!(!is_quit_key(&plain));
        let other = Event::Key(KeyEvent::new(KeyCode::Char('d'), Modifiers::CTRL));
        assert!(!is_quit_key(&other));
    }

    #[test]
    fn default_config_uses_a_short_poll() {
        let config = ProgramConfig::default();
        assert!(config.poll_timeout <= Duration::from_millis(100));
        assert!(config.session.alternate_screen);
    }

    // --- hit routing ---

    struct Clicky;

    enum ClickyMsg {
        Raw,
        Region(u32),
    }

    impl From<Event> for ClickyMsg {
        fn from(_: Event) -> Self {
            Self::Raw
        }
    }

    impl Model for Clicky {
        type Message = ClickyMsg;

        fn update(&mut self, _message: Self::Message) -> Cmd<Self::Message> {
            Cmd::None
        }

        fn view(&self, _frame: &mut Frame) {}

        fn hit_message(&self, hit: HitId, _mouse: &MouseEvent) -> Option<Self::Message> {
            Some(ClickyMsg::Region(hit.0))
        }
    }

    fn press_at(x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(porto_core::event::MouseButton::Left),
            x,
            y,
            modifiers: Modifiers::NONE,
        })
    }

    #[test]
    fn press_on_registered_region_becomes_model_message() {
        let mut hits = HitGrid::new(10, 4);
        hits.register(porto_core::geometry::Rect::new(2, 1, 3, 1), HitId::new(9));
        let routed = route_event(&Clicky, &hits, press_at(3, 1));
        assert!(matches!(routed, ClickyMsg::Region(9)));
    }

    #[test]
    fn press_outside_regions_stays_a_raw_event() {
        let hits = HitGrid::new(10, 4);
        let routed = route_event(&Clicky, &hits, press_at(3, 1));
        assert!(matches!(routed, ClickyMsg::Raw));
    }

    #[test]
    fn scroll_is_never_hit_routed() {
        let mut hits = HitGrid::new(10, 4);
        hits.register(porto_core::geometry::Rect::new(0, 0, 10, 4), HitId::new(1));
        let scroll = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            x: 3,
            y: 1,
            modifiers: Modifiers::NONE,
        });
        let routed = route_event(&Clicky, &hits, scroll);
        assert!(matches!(routed, ClickyMsg::Raw));
    }
}
