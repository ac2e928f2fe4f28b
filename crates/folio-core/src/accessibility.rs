//! Screen-reader announcements and modal focus trapping

use std::time::Duration;

use crate::scheduler::{Scheduler, TimerHandle};

pub trait AnnouncementView {
    /// Text of the polite, atomic live region
    fn set_live_region_text(&mut self, text: &str);
}

pub fn filter_announcement(label: &str) -> String {
    format!("Filtering by {}", label.trim())
}

/// Where focus should wrap on Tab at the edge of a modal with `count`
/// focusable elements, `None` to let Tab move normally
pub fn trap_focus(index: usize, count: usize, shift: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match (shift, index) {
        (true, 0) => Some(last),
        (false, i) if i == last => Some(0),
        _ => None,
    }
}

/// Live region writer. Each message clears itself after a delay; a newer
/// message replaces the pending clear.
#[derive(Debug, Clone)]
pub struct Announcer {
    clear_after: Duration,
    pending_clear: Option<TimerHandle>,
    message: Option<String>,
}

impl Announcer {
    pub fn new(clear_after: Duration) -> Self {
        Self {
            clear_after,
            pending_clear: None,
            message: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn announce<H>(&mut self, message: &str, host: &mut H)
    where
        H: AnnouncementView + Scheduler,
    {
        if let Some(handle) = self.pending_clear.take() {
            host.cancel(handle);
        }
        host.set_live_region_text(message);
        self.message = Some(message.to_string());
        self.pending_clear = Some(host.set_timeout(self.clear_after));
    }

    /// Returns whether the timer was this announcer's clear
    pub fn on_timer<V: AnnouncementView>(&mut self, handle: TimerHandle, view: &mut V) -> bool {
        if self.pending_clear != Some(handle) {
            return false;
        }
        self.pending_clear = None;
        self.message = None;
        view.set_live_region_text("");
        true
    }

    pub fn teardown<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending_clear.take() {
            scheduler.cancel(handle);
        }
    }
}
