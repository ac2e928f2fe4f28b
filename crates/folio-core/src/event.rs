//! Host events routed to controllers
//!
//! The host translates platform events into [`UiEvent`]s and passes them to
//! `Site::handle`, which answers with a [`Response`] telling the host what to
//! do with the platform event it came from.

use serde::{Deserialize, Serialize};

use crate::scheduler::TimerHandle;

/// Keys the site reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Tab,
    Enter,
    Space,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Tab" => Key::Tab,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }
}

/// Where keyboard focus was when a key was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Focus {
    #[default]
    Document,
    /// A publication entry, by index
    Publication(usize),
    /// The `index`th of `count` focusable elements inside the open modal
    ModalItem { index: usize, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    pub focus: Focus,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            focus: Focus::Document,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn on(mut self, focus: Focus) -> Self {
        self.focus = focus;
        self
    }
}

/// Clickable things
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    NavToggle,
    /// A navigation link, by index
    NavLink(usize),
    /// Anywhere else in the document
    Document { inside_nav: bool },
    ThemeToggle,
    /// A gallery category button: its filter value and visible label
    GalleryFilter { filter: String, label: String },
    /// A gallery tile's view button, by tile index
    GalleryTile(usize),
    LoadMore,
    LightboxClose,
    LightboxPrev,
    LightboxNext,
    /// The lightbox backdrop outside its content
    LightboxBackdrop,
    CarouselPrev,
    CarouselNext,
    CarouselPlayPause,
    CarouselIndicator(usize),
    CarouselSlide(usize),
    CarouselModalClose,
    /// The carousel modal backdrop outside its content
    CarouselModalBackdrop,
    /// A publication entry, by index
    Publication(usize),
    SearchButton,
    ClearFilters,
    CvFullscreen,
    /// A same-page anchor link, by index
    AnchorLink(usize),
    SkipLink,
}

/// Publication filter selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterControl {
    Year,
    Type,
    Sort,
}

/// Targets of intersection observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Observed {
    LazyImage(usize),
    FadeIn(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEvent {
    Click(ClickTarget),
    Key(KeyPress),
    SearchInput(String),
    FilterChanged { control: FilterControl, value: String },
    Scroll { offset_y: f64 },
    Resize,
    Timer(TimerHandle),
    Intersection { target: Observed, intersecting: bool },
    /// An image requested by the carousel finished loading
    ImageLoaded {
        src: String,
        natural_width: f64,
        natural_height: f64,
    },
    CvLoaded,
    CvFailed,
    /// The platform rejected a fullscreen request after the fact
    FullscreenRejected(String),
    /// Offline worker registration finished
    WorkerRegistered(Result<String, String>),
    /// An uncaught error anywhere on the page
    UncaughtError(String),
    Unload,
}

/// What the host should do with the platform event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Response {
    /// Nothing handled it
    #[default]
    Ignored,
    /// Handled; let the default action proceed
    Handled,
    /// Handled; suppress the default action
    PreventDefault,
    /// Suppress the default action and open this URL in a new context
    /// without opener or referrer
    OpenUrl(String),
    /// Suppress the default action and focus this modal item
    FocusModalItem(usize),
}

impl Response {
    pub fn is_handled(&self) -> bool {
        !matches!(self, Response::Ignored)
    }

    pub fn handled(handled: bool) -> Self {
        if handled {
            Response::Handled
        } else {
            Response::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_event_json() {
        let event = UiEvent::Timer(TimerHandle::from_raw(7));
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Timer":7}"#);
        assert_eq!(serde_json::from_str::<UiEvent>(&json).unwrap(), event);
    }

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom("a"), Key::Other);
    }

    #[test]
    fn test_key_press_builders() {
        let press = KeyPress::new(Key::Tab).with_shift().on(Focus::ModalItem { index: 0, count: 3 });
        assert!(press.shift);
        assert_eq!(press.focus, Focus::ModalItem { index: 0, count: 3 });
    }
}
