//! Timers
//!
//! Controllers never sleep or spawn. They ask a [`Scheduler`] for one-shot
//! or repeating timers and receive the [`TimerHandle`] back through
//! `UiEvent::Timer` when it fires. A handle a controller no longer holds is
//! stale and gets ignored, so cancellation races are harmless.
//!
//! [`ManualScheduler`] is a virtual clock for tests and for hosts that drive
//! time themselves.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Host timer service
pub trait Scheduler {
    /// Fire once after `delay`
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;

    /// Fire every `period` until cancelled
    fn set_interval(&mut self, period: Duration) -> TimerHandle;

    /// Cancel a timer. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due: Duration,
    period: Option<Duration>,
}

/// Deterministic scheduler driven by explicit clock advances
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerHandle, PendingTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest timer due at or before `limit`, moving the clock to
    /// its due time. Repeating timers are re-armed. Ties fire in creation
    /// order. When nothing is due the clock moves to `limit`.
    pub fn advance_to_next(&mut self, limit: Duration) -> Option<TimerHandle> {
        let next = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= limit)
            .min_by_key(|(handle, timer)| (timer.due, **handle))
            .map(|(handle, timer)| (*handle, *timer));

        match next {
            Some((handle, timer)) => {
                self.now = self.now.max(timer.due);
                match timer.period {
                    Some(period) => {
                        if let Some(pending) = self.timers.get_mut(&handle) {
                            pending.due = timer.due + period;
                        }
                    }
                    None => {
                        self.timers.remove(&handle);
                    }
                }
                Some(handle)
            }
            None => {
                self.now = self.now.max(limit);
                None
            }
        }
    }

    /// Advance the clock by `by`, returning every firing in order.
    ///
    /// Handlers run after the whole batch is collected, so timers they
    /// create or cancel do not affect it. Step with
    /// [`advance_to_next`](Self::advance_to_next) when that matters.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        let limit = self.now + by;
        std::iter::from_fn(|| self.advance_to_next(limit)).collect()
    }

    fn schedule(&mut self, delay: Duration, period: Option<Duration>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.timers.insert(
            handle,
            PendingTimer {
                due: self.now + delay,
                period,
            },
        );
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        self.schedule(delay, None)
    }

    fn set_interval(&mut self, period: Duration) -> TimerHandle {
        // A zero period would fire forever within one advance
        self.schedule(period, Some(period.max(Duration::from_millis(1))))
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }
}

/// Trailing-edge debounce: only the last trigger within the delay fires
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Restart the delay, replacing any pending firing
    pub fn trigger<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
        self.pending = Some(scheduler.set_timeout(self.delay));
    }

    /// Whether `handle` is this debouncer's firing. Consumes it when it is.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Leading-edge throttle: at most one acquisition per window
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    cooldown: Option<TimerHandle>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            cooldown: None,
        }
    }

    /// True when the caller may run now; starts the window
    pub fn try_acquire<S: Scheduler>(&mut self, scheduler: &mut S) -> bool {
        if self.cooldown.is_some() {
            return false;
        }
        self.cooldown = Some(scheduler.set_timeout(self.window));
        true
    }

    /// Whether `handle` ends this throttle's window
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.cooldown == Some(handle) {
            self.cooldown = None;
            true
        } else {
            false
        }
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.cooldown.take() {
            scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_timeout_fires_once() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.set_timeout(100 * MS);

        assert!(scheduler.advance(99 * MS).is_empty());
        assert_eq!(scheduler.advance(MS), vec![handle]);
        assert!(!scheduler.is_active(handle));
        assert!(scheduler.advance(1000 * MS).is_empty());
    }

    #[test]
    fn test_interval_repeats() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.set_interval(100 * MS);

        assert_eq!(scheduler.advance(350 * MS), vec![handle, handle, handle]);
        assert_eq!(scheduler.now(), 350 * MS);
        assert!(scheduler.is_active(handle));

        scheduler.cancel(handle);
        assert!(scheduler.advance(1000 * MS).is_empty());
    }

    #[test]
    fn test_firing_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.set_timeout(200 * MS);
        let early = scheduler.set_timeout(100 * MS);
        let tie = scheduler.set_timeout(100 * MS);

        assert_eq!(scheduler.advance(300 * MS), vec![early, tie, late]);
    }

    #[test]
    fn test_advance_to_next_moves_clock() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.set_timeout(40 * MS);

        assert_eq!(scheduler.advance_to_next(100 * MS), Some(handle));
        assert_eq!(scheduler.now(), 40 * MS);
        assert_eq!(scheduler.advance_to_next(100 * MS), None);
        assert_eq!(scheduler.now(), 100 * MS);
    }

    #[test]
    fn test_debouncer_keeps_last_trigger() {
        let mut scheduler = ManualScheduler::new();
        let mut debouncer = Debouncer::new(300 * MS);

        debouncer.trigger(&mut scheduler);
        scheduler.advance(200 * MS);
        debouncer.trigger(&mut scheduler);

        let fired = scheduler.advance(200 * MS);
        assert!(fired.is_empty());

        let fired = scheduler.advance(100 * MS);
        assert_eq!(fired.len(), 1);
        assert!(debouncer.fire(fired[0]));
        assert!(!debouncer.is_pending());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_debouncer_ignores_foreign_handles() {
        let mut scheduler = ManualScheduler::new();
        let mut debouncer = Debouncer::new(300 * MS);
        let other = scheduler.set_timeout(MS);
        debouncer.trigger(&mut scheduler);

        assert!(!debouncer.fire(other));
        assert!(debouncer.is_pending());
    }

    #[test]
    fn test_throttle_leading_edge() {
        let mut scheduler = ManualScheduler::new();
        let mut throttle = Throttle::new(100 * MS);

        assert!(throttle.try_acquire(&mut scheduler));
        assert!(!throttle.try_acquire(&mut scheduler));

        for handle in scheduler.advance(100 * MS) {
            throttle.fire(handle);
        }
        assert!(throttle.try_acquire(&mut scheduler));
    }
}
