//! Folio Core - interactive behavior for a static academic site
//!
//! Every page controller is a small state machine that talks to the page
//! only through host traits, so the same logic runs in the browser and
//! under test:
//!
//! - **Theme**: light/dark toggle persisted in key-value storage
//! - **Navigation**: mobile menu and active-link highlighting
//! - **Gallery**: category filtering, photo count, load-more
//! - **Lightbox**: full-size viewer over the visible gallery photos
//! - **Carousel**: random auto-advancing slideshow with progress bar and modal
//! - **Publications**: search, year/type filters, sorting, link decoration
//! - **CV**: embedded document with fallback and fullscreen
//! - **Lazy loading**, **scroll effects**, and **accessibility** helpers
//! - **Scheduler**: timer abstraction with a deterministic manual clock
//!
//! # Architecture
//!
//! ```text
//! PageSnapshot ──► Site::initialize ──► controllers
//! UiEvent ───────► Site::handle ──────► host views ──► Response
//! ```

pub mod accessibility;
pub mod carousel;
pub mod config;
pub mod cv;
pub mod error;
pub mod event;
pub mod gallery;
pub mod host;
pub mod lazy_load;
pub mod lightbox;
pub mod navigation;
pub mod page;
pub mod publications;
pub mod scheduler;
pub mod scroll;
pub mod site;
pub mod storage;
pub mod testing;
pub mod theme;

#[cfg(feature = "wasm")]
pub mod web;

pub use accessibility::{filter_announcement, trap_focus, AnnouncementView, Announcer};
pub use carousel::{clamp_height, sample_photos, Carousel, CarouselState, CarouselView};
pub use config::{
    CarouselConfig, OfflineWorkerConfig, PublicationsConfig, SiteConfig, ThemeConfig, TimingConfig,
};
pub use cv::{CvEmbed, CvView};
pub use error::{ConfigError, FilterError, FolioError, HostError, Result, StorageError};
pub use event::{ClickTarget, FilterControl, Focus, Key, KeyPress, Observed, Response, UiEvent};
pub use gallery::{Gallery, GalleryView};
pub use host::{DocumentView, OfflineWorker, SiteHost};
pub use lazy_load::{LazyImageView, LazyLoader};
pub use lightbox::{Lightbox, LightboxView};
pub use navigation::{current_page, highlight_active_links, is_active_link, NavigationController, NavigationView};
pub use page::{ElementId, LazyImage, PageSnapshot};
pub use publications::{
    locale_compare, FilterState, PublicationList, PublicationView, SortOrder, YearFilter,
};
pub use scheduler::{Debouncer, ManualScheduler, Scheduler, Throttle, TimerHandle};
pub use scroll::{anchor_target, parallax_offset, ScrollEffects, ScrollView};
pub use site::Site;
pub use storage::{KeyValueStore, MemoryStore};
pub use testing::RecordingHost;
pub use theme::{load_theme, ThemeController, ThemeView};
