#![forbid(unsafe_code)]

//! Long-lived message sources on background threads.
//!
//! A subscription runs on its own thread and feeds messages into the
//! program loop through a channel. The model declares the set it wants
//! after every update; the manager diffs that set by [`SubId`] and
//! starts or stops threads to match. Stopping is cooperative: a condvar
//! stop signal doubles as the timer wait, so an interval subscription
//! parks without busy-waiting and wakes immediately on shutdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Stable identity for a subscription. Equal ids across updates mean
/// "the same source; keep it running".
pub type SubId = u64;

/// Receiver half of a stop notification.
#[derive(Debug, Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Wait up to `timeout` for a stop. Returns `true` when stopping,
    /// `false` on an ordinary timeout. Spurious wakeups re-wait for the
    /// remaining time.
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, condvar) = &*self.inner;
        let deadline = Instant::now() + timeout;
        let mut stopped = match lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        while !*stopped {
            let now = Instant::now();
            let Some(remaining) = deadline.checked_duration_since(now).filter(|d| !d.is_zero())
            else {
                return *stopped;
            };
            let (guard, _timeout) = match condvar.wait_timeout(stopped, remaining) {
                Ok(pair) => pair,
                Err(poisoned) => poisoned.into_inner(),
            };
            stopped = guard;
        }
        true
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        match self.inner.0.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Sender half of a stop notification.
#[derive(Debug, Clone)]
pub struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    pub fn trigger(&self) {
        let (lock, condvar) = &*self.inner;
        let mut stopped = match lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *stopped = true;
        condvar.notify_all();
    }
}

#[must_use]
pub fn stop_pair() -> (StopTrigger, StopSignal) {
    let inner = Arc::new((Mutex::new(false), Condvar::new()));
    (
        StopTrigger {
            inner: Arc::clone(&inner),
        },
        StopSignal { inner },
    )
}

/// A message source the model subscribes to.
pub trait Subscription<M: Send>: Send {
    /// Stable identity; drives reconciliation.
    fn id(&self) -> SubId;

    /// Produce messages until `stop` fires or the receiver hangs up.
    /// Runs on a dedicated thread.
    fn run(self: Box<Self>, sender: mpsc::Sender<M>, stop: StopSignal);
}

/// Emit a message at a fixed interval.
pub struct Every<M> {
    interval: Duration,
    make_msg: Arc<dyn Fn() -> M + Send + Sync>,
    id: SubId,
}

/// Tag mixed into derived interval ids so two `Every` timers with
/// distinct intervals never collide with other id schemes.
const EVERY_ID_TAG: u64 = 0x5449_434B; // "TICK"

impl<M> Every<M> {
    pub fn new(interval: Duration, make_msg: impl Fn() -> M + Send + Sync + 'static) -> Self {
        let id = (interval.as_nanos() as u64) ^ EVERY_ID_TAG;
        Self {
            interval,
            make_msg: Arc::new(make_msg),
            id,
        }
    }

    /// Override the derived id, for two timers with equal intervals.
    #[must_use]
    pub fn with_id(mut self, id: SubId) -> Self {
        self.id = id;
        self
    }
}

impl<M: Send + 'static> Subscription<M> for Every<M> {
    fn id(&self) -> SubId {
        self.id
    }

    fn run(self: Box<Self>, sender: mpsc::Sender<M>, stop: StopSignal) {
        loop {
            if stop.wait_timeout(self.interval) {
                break;
            }
            if sender.send((self.make_msg)()).is_err() {
                break;
            }
        }
    }
}

/// Handle to one spawned subscription thread.
struct RunningSubscription {
    id: SubId,
    trigger: StopTrigger,
    handle: Option<JoinHandle<()>>,
}

impl RunningSubscription {
    fn stop(mut self) {
        self.trigger.trigger();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RunningSubscription {
    fn drop(&mut self) {
        // No join here: drop runs on the loop thread and must not block
        // on a subscription mid-wait.
        self.trigger.trigger();
    }
}

static SUB_THREAD_SEQ: AtomicU64 = AtomicU64::new(0);

/// Owns the running subscription set and the channel they feed.
pub struct SubscriptionManager<M: Send + 'static> {
    running: Vec<RunningSubscription>,
    sender: mpsc::Sender<M>,
    receiver: mpsc::Receiver<M>,
}

impl<M: Send + 'static> Default for SubscriptionManager<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send + 'static> SubscriptionManager<M> {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            running: Vec::new(),
            sender,
            receiver,
        }
    }

    /// Make the running set match `desired`: stop stale threads (joining
    /// them), start new ones, leave matching ids untouched.
    pub fn reconcile(&mut self, desired: Vec<Box<dyn Subscription<M>>>) {
        let desired_ids: Vec<SubId> = desired.iter().map(|s| s.id()).collect();

        let mut kept = Vec::with_capacity(self.running.len());
        for running in self.running.drain(..) {
            if desired_ids.contains(&running.id) {
                kept.push(running);
            } else {
                tracing::debug!(id = running.id, "subscription stopped");
                running.stop();
            }
        }
        self.running = kept;

        for subscription in desired {
            let id = subscription.id();
            if self.running.iter().any(|r| r.id == id) {
                continue;
            }
            self.start(subscription);
        }
    }

    fn start(&mut self, subscription: Box<dyn Subscription<M>>) {
        let id = subscription.id();
        let (trigger, signal) = stop_pair();
        let sender = self.sender.clone();
        let seq = SUB_THREAD_SEQ.fetch_add(1, Ordering::Relaxed);
        let spawned = std::thread::Builder::new()
            .name(format!("porto-sub-{seq}"))
            .spawn(move || subscription.run(sender, signal));
        match spawned {
            Ok(handle) => {
                tracing::debug!(id, "subscription started");
                self.running.push(RunningSubscription {
                    id,
                    trigger,
                    handle: Some(handle),
                });
            }
            Err(error) => {
                tracing::error!(id, %error, "failed to spawn subscription thread");
            }
        }
    }

    /// All messages queued since the last drain, without blocking.
    pub fn drain_messages(&mut self) -> Vec<M> {
        let mut messages = Vec::new();
        while let Ok(message) = self.receiver.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Stop and join every running subscription.
    pub fn stop_all(&mut self) {
        for running in self.running.drain(..) {
            running.stop();
        }
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.running.len()
    }
}

impl<M: Send + 'static> Drop for SubscriptionManager<M> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    // --- stop signal ---

    #[test]
    fn wait_times_out_when_not_stopped() {
        let (_trigger, signal) = stop_pair();
        assert!(!signal.wait_timeout(Duration::from_millis(5)));
        assert!(!signal.is_stopped());
    }

    #[test]
    fn trigger_wakes_a_waiter() {
        let (trigger, signal) = stop_pair();
        let waiter = std::thread::spawn(move || signal.wait_timeout(Duration::from_secs(5)));
        std::thread::sleep(Duration::from_millis(10));
        trigger.trigger();
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn stopped_signal_returns_immediately() {
        let (trigger, signal) = stop_pair();
        trigger.trigger();
        let start = Instant::now();
        assert!(signal.wait_timeout(Duration::from_secs(5)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    // --- every ---

    #[test]
    fn every_emits_until_stopped() {
        let (trigger, signal) = stop_pair();
        let (sender, receiver) = mpsc::channel();
        let every = Box::new(Every::new(Duration::from_millis(5), || 7u32));
        let handle = std::thread::spawn(move || every.run(sender, signal));
        std::thread::sleep(Duration::from_millis(40));
        trigger.trigger();
        handle.join().unwrap();
        let count = receiver.try_iter().count();
        assert!(count >= 2, "expected several ticks, got {count}");
    }

    #[test]
    fn every_ids_differ_by_interval_and_override() {
        let a: Every<u32> = Every::new(Duration::from_millis(100), || 0);
        let b: Every<u32> = Every::new(Duration::from_millis(1000), || 0);
        assert_ne!(a.id, b.id);
        let c: Every<u32> = Every::new(Duration::from_millis(100), || 0).with_id(42);
        assert_eq!(c.id, 42);
    }

    #[test]
    fn every_stops_when_receiver_hangs_up() {
        let (_trigger, signal) = stop_pair();
        let (sender, receiver) = mpsc::channel::<u32>();
        drop(receiver);
        let every = Box::new(Every::new(Duration::from_millis(1), || 1u32));
        let handle = std::thread::spawn(move || every.run(sender, signal));
        handle.join().unwrap();
    }

    // --- manager ---

    #[test]
    fn reconcile_starts_and_stops_by_id() {
        let mut manager: SubscriptionManager<u32> = SubscriptionManager::new();
        manager.reconcile(vec![
            Box::new(Every::new(Duration::from_millis(500), || 1).with_id(1)),
            Box::new(Every::new(Duration::from_millis(500), || 2).with_id(2)),
        ]);
        assert_eq!(manager.active_count(), 2);

        manager.reconcile(vec![Box::new(
            Every::new(Duration::from_millis(500), || 2).with_id(2),
        )]);
        assert_eq!(manager.active_count(), 1);

        manager.reconcile(Vec::new());
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn drain_collects_pending_messages() {
        let mut manager: SubscriptionManager<u32> = SubscriptionManager::new();
        manager.reconcile(vec![Box::new(
            Every::new(Duration::from_millis(5), || 9).with_id(1),
        )]);
        std::thread::sleep(Duration::from_millis(40));
        let drained = manager.drain_messages();
        assert!(!drained.is_empty());
        assert!(drained.iter().all(|m| *m == 9));
        manager.stop_all();
        manager.drain_messages();
        let after: Vec<u32> = {
            std::thread::sleep(Duration::from_millis(20));
            manager.drain_messages()
        };
        assert!(after.is_empty());
    }

    // --- properties ---

    proptest! {
        #[test]
        fn derived_every_ids_track_the_interval(a in 1u64..1_000_000, b in 1u64..1_000_000) {
            let first: Every<u32> = Every::new(Duration::from_micros(a), || 0);
            let again: Every<u32> = Every::new(Duration::from_micros(a), || 1);
            prop_assert_eq!(first.id, again.id);
            let other: Every<u32> = Every::new(Duration::from_micros(b), || 0);
            prop_assert_eq!(a == b, first.id == other.id);
        }

        #[test]
        fn with_id_always_wins(interval in 1u64..1_000_000, id in any::<u64>()) {
            let every: Every<u32> = Every::new(Duration::from_micros(interval), || 0).with_id(id);
            prop_assert_eq!(every.id, id);
        }
    }
}
