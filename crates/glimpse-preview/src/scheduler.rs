//! One-shot timers and the debounced update slot.
//!
//! Timers are plain deadlines compared against a caller-supplied `now`;
//! the embedding control loop drives them through
//! `PreviewController::tick`. No background threads, so tests control
//! time exactly.

use std::time::{Duration, Instant};

use glimpse_common::{ProviderId, TransitionType};
use tracing::debug;
use url::Url;

/// Duration of the commit fade animation, exported for hosts that
/// animate the auto-commit handoff.
pub const AUTO_COMMIT_FADE_MS: u64 = 300;

/// A cancellable one-shot deadline.
#[derive(Debug, Default)]
pub struct OneShotTimer {
    deadline: Option<Instant>,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer `delay` from `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm and return true when the deadline has passed.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// The destination update waiting out the debounce window.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpdate {
    pub url: Url,
    pub provider: ProviderId,
    pub transition: TransitionType,
    pub user_text: String,
    pub verbatim: bool,
}

/// Single-slot debounce: a new schedule overwrites the previous pending
/// update and restarts the timer. Never a queue; typing bursts collapse
/// to the final destination.
#[derive(Debug)]
pub struct UpdateScheduler {
    delay: Duration,
    pending: Option<PendingUpdate>,
    timer: OneShotTimer,
}

impl UpdateScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            timer: OneShotTimer::new(),
        }
    }

    /// Overwrite any pending update and restart the debounce window.
    pub fn schedule(&mut self, update: PendingUpdate, now: Instant) {
        if let Some(previous) = &self.pending {
            debug!(superseded = %previous.url, next = %update.url, "debounce slot overwritten");
        }
        self.pending = Some(update);
        self.timer.arm(now, self.delay);
    }

    /// Drop the pending update and stop the timer.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.timer.cancel();
    }

    /// Take the pending update if the debounce window has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingUpdate> {
        if self.timer.fire_due(now) {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn pending(&self) -> Option<&PendingUpdate> {
        self.pending.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(url: &str) -> PendingUpdate {
        PendingUpdate {
            url: Url::parse(url).unwrap(),
            provider: ProviderId(1),
            transition: TransitionType::Typed,
            user_text: String::new(),
            verbatim: false,
        }
    }

    #[test]
    fn one_shot_fires_once_after_deadline() {
        let start = Instant::now();
        let mut timer = OneShotTimer::new();
        timer.arm(start, Duration::from_millis(100));

        assert!(!timer.fire_due(start));
        assert!(!timer.fire_due(start + Duration::from_millis(99)));
        assert!(timer.fire_due(start + Duration::from_millis(100)));
        // Disarmed after firing
        assert!(!timer.fire_due(start + Duration::from_millis(200)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn one_shot_cancel_prevents_firing() {
        let start = Instant::now();
        let mut timer = OneShotTimer::new();
        timer.arm(start, Duration::from_millis(10));
        timer.cancel();
        assert!(!timer.fire_due(start + Duration::from_secs(1)));
    }

    #[test]
    fn schedule_is_last_write_wins() {
        let start = Instant::now();
        let mut scheduler = UpdateScheduler::new(Duration::from_millis(200));

        scheduler.schedule(pending("https://search.example/q?x=ab"), start);
        scheduler.schedule(
            pending("https://search.example/q?x=abc"),
            start + Duration::from_millis(50),
        );

        // The first deadline has passed but the slot was re-armed.
        assert!(scheduler
            .take_due(start + Duration::from_millis(210))
            .is_none());

        let fired = scheduler
            .take_due(start + Duration::from_millis(250))
            .unwrap();
        assert_eq!(fired.url.as_str(), "https://search.example/q?x=abc");
        assert!(scheduler.pending().is_none());
    }

    #[test]
    fn cancel_clears_slot_and_timer() {
        let start = Instant::now();
        let mut scheduler = UpdateScheduler::new(Duration::from_millis(100));
        scheduler.schedule(pending("https://search.example/"), start);
        scheduler.cancel();
        assert!(scheduler.pending().is_none());
        assert!(!scheduler.is_armed());
        assert!(scheduler.take_due(start + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn zero_delay_fires_immediately() {
        let start = Instant::now();
        let mut scheduler = UpdateScheduler::new(Duration::ZERO);
        scheduler.schedule(pending("https://search.example/"), start);
        assert!(scheduler.take_due(start).is_some());
    }
}
