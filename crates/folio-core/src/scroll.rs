//! Smooth anchor scrolling, hero parallax, and fade-in on scroll

use crate::config::TimingConfig;
use crate::page::{ElementId, PageSnapshot};
use crate::scheduler::{Scheduler, Throttle, TimerHandle};

/// Hero offset per scrolled pixel
pub const PARALLAX_RATE: f64 = -0.5;

pub trait ScrollView {
    /// Smoothly scroll to the element with this id. False when it does not
    /// exist.
    fn scroll_to_element(&mut self, id: &str) -> bool;
    /// Focus the element with this id and scroll it into view
    fn focus_element(&mut self, id: &str) -> bool;
    fn set_hero_offset(&mut self, px: f64);
    /// Start a card transparent and shifted down. Hosts observe it at a 0.1
    /// threshold with a `0px 0px -100px 0px` root margin.
    fn prepare_fade_in(&mut self, target: usize);
    fn reveal(&mut self, target: usize);
}

/// Element id referenced by a same-page link (`#about` → `about`)
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn parallax_offset(scroll_y: f64) -> f64 {
    scroll_y * PARALLAX_RATE
}

#[derive(Debug, Clone)]
pub struct ScrollEffects {
    anchors: Vec<String>,
    skip_link: Option<String>,
    has_hero: bool,
    revealed: Vec<bool>,
    throttle: Throttle,
}

impl ScrollEffects {
    /// Always active. Prepares fade-in cards when the platform can observe
    /// them.
    pub fn attach<V: ScrollView>(page: &PageSnapshot, timing: &TimingConfig, view: &mut V) -> Self {
        let targets = if page.supports_intersection_observer {
            page.fade_in_targets
        } else {
            0
        };
        for target in 0..targets {
            view.prepare_fade_in(target);
        }

        Self {
            anchors: page.anchor_links.clone(),
            skip_link: page.skip_link.clone(),
            has_hero: page.has(ElementId::Hero),
            revealed: vec![false; targets],
            throttle: Throttle::new(timing.scroll_throttle()),
        }
    }

    /// Scroll to an anchor link's target. The link's default jump is always
    /// suppressed.
    pub fn on_anchor_click<V: ScrollView>(&self, link: usize, view: &mut V) {
        if let Some(id) = self.anchors.get(link).and_then(|href| anchor_target(href)) {
            if !view.scroll_to_element(id) {
                tracing::debug!(id, "anchor target not found");
            }
        }
    }

    /// Focus the skip link's target. Returns false without a skip link.
    pub fn on_skip_link<V: ScrollView>(&self, view: &mut V) -> bool {
        match self.skip_link.as_deref().and_then(anchor_target) {
            Some(id) => {
                view.focus_element(id);
                true
            }
            None => false,
        }
    }

    /// Move the hero, at most once per throttle window
    pub fn on_scroll<H>(&mut self, offset_y: f64, host: &mut H) -> bool
    where
        H: ScrollView + Scheduler,
    {
        if !self.has_hero || !self.throttle.try_acquire(host) {
            return false;
        }
        host.set_hero_offset(parallax_offset(offset_y));
        true
    }

    pub fn on_fade_in<V: ScrollView>(&mut self, target: usize, intersecting: bool, view: &mut V) -> bool {
        match self.revealed.get_mut(target) {
            Some(revealed) if intersecting && !*revealed => {
                *revealed = true;
                view.reveal(target);
                true
            }
            _ => false,
        }
    }

    /// Returns whether the timer ended the scroll throttle window
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        self.throttle.fire(handle)
    }

    pub fn teardown<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.throttle.cancel(scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;
    use std::time::Duration;

    fn effects(host: &mut RecordingHost) -> ScrollEffects {
        let page = PageSnapshot::new("/index.html")
            .with_element(ElementId::Hero)
            .with_anchor_links(["#about", "#"])
            .with_skip_link("#main")
            .with_fade_in_targets(3);
        ScrollEffects::attach(&page, &TimingConfig::default(), host)
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#about"), Some("about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("page.html"), None);
    }

    #[test]
    fn test_anchor_click_scrolls() {
        let mut host = RecordingHost::new();
        let effects = effects(&mut host);

        effects.on_anchor_click(0, &mut host);
        effects.on_anchor_click(1, &mut host);
        assert_eq!(host.scrolled_to, vec!["about".to_string()]);
    }

    #[test]
    fn test_skip_link_focuses_target() {
        let mut host = RecordingHost::new();
        let effects = effects(&mut host);

        assert!(effects.on_skip_link(&mut host));
        assert_eq!(host.focused, vec!["main".to_string()]);
    }

    #[test]
    fn test_parallax_is_throttled() {
        let mut host = RecordingHost::new();
        let mut effects = effects(&mut host);

        assert!(effects.on_scroll(200.0, &mut host));
        assert_eq!(host.hero_offset, Some(-100.0));
        assert!(!effects.on_scroll(400.0, &mut host));
        assert_eq!(host.hero_offset, Some(-100.0));

        for handle in host.scheduler.advance(Duration::from_millis(100)) {
            assert!(effects.on_timer(handle));
        }
        assert!(effects.on_scroll(400.0, &mut host));
        assert_eq!(host.hero_offset, Some(-200.0));
    }

    #[test]
    fn test_fade_in_reveals_once() {
        let mut host = RecordingHost::new();
        let mut effects = effects(&mut host);
        assert_eq!(host.prepared, vec![0, 1, 2]);

        assert!(!effects.on_fade_in(1, false, &mut host));
        assert!(effects.on_fade_in(1, true, &mut host));
        assert!(!effects.on_fade_in(1, true, &mut host));
        assert!(!effects.on_fade_in(5, true, &mut host));
        assert_eq!(host.revealed, vec![1]);
    }
}
