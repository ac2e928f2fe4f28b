//! A host that records every view call
//!
//! [`RecordingHost`] implements all host capabilities over a
//! [`ManualScheduler`] and a [`MemoryStore`], keeping the last value written
//! through each view method. It backs the crate's tests and works as a
//! headless host for driving a `Site` without a browser.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use folio_domain::{CarouselPhoto, GalleryImage, LinkResolution, PublicationStats, Theme};

use crate::accessibility::AnnouncementView;
use crate::carousel::CarouselView;
use crate::cv::CvView;
use crate::error::{HostError, StorageError};
use crate::gallery::GalleryView;
use crate::host::{DocumentView, OfflineWorker};
use crate::lazy_load::LazyImageView;
use crate::lightbox::LightboxView;
use crate::navigation::NavigationView;
use crate::publications::{FilterState, PublicationView};
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle};
use crate::scroll::ScrollView;
use crate::storage::{KeyValueStore, MemoryStore};

#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub scheduler: ManualScheduler,
    pub store: MemoryStore,
    pub scroll_locked: bool,

    pub theme: Option<Theme>,

    pub menu_open: bool,
    pub active_links: BTreeMap<usize, bool>,

    pub tile_visible: HashMap<usize, bool>,
    pub active_filter: Option<String>,
    pub photo_count: Option<String>,
    pub gallery_loading_hidden: bool,
    pub load_more: Option<(String, bool)>,

    pub lightbox_image: Option<GalleryImage>,
    pub lightbox_open: bool,

    pub slides: Vec<CarouselPhoto>,
    pub slide: Option<usize>,
    /// Every progress value written, in order
    pub progress: Vec<f64>,
    pub playing: bool,
    pub requested_sizes: Vec<String>,
    pub carousel_width: f64,
    pub viewport_height: f64,
    pub carousel_height: Option<f64>,
    pub modal: Option<CarouselPhoto>,

    pub entry_visible: HashMap<usize, bool>,
    pub sections: HashMap<i32, Vec<usize>>,
    pub results: Option<(String, bool)>,
    pub stats: Option<PublicationStats>,
    pub filter_controls: Option<FilterState>,
    pub decorations: HashMap<usize, LinkResolution>,

    pub cv_fallback_shown: usize,
    pub fullscreen: bool,
    /// Make fullscreen requests fail
    pub reject_fullscreen: bool,

    pub image_sources: HashMap<usize, String>,
    pub unobserved: Vec<usize>,

    pub scrolled_to: Vec<String>,
    pub focused: Vec<String>,
    pub hero_offset: Option<f64>,
    pub prepared: Vec<usize>,
    pub revealed: Vec<usize>,

    pub live_region: String,

    pub registered_workers: Vec<String>,
    /// Make worker registration fail
    pub reject_worker: bool,
}

impl RecordingHost {
    /// A host with a 1000px wide carousel in a 1000px tall viewport
    pub fn new() -> Self {
        Self {
            carousel_width: 1000.0,
            viewport_height: 1000.0,
            ..Default::default()
        }
    }

    pub fn with_store(mut self, store: MemoryStore) -> Self {
        self.store = store;
        self
    }

    /// Advance the clock by `duration`, passing each timer to `on_timer` as
    /// it fires. Timers created by the callback fire too when due in time.
    pub fn run_for<F>(&mut self, duration: Duration, mut on_timer: F)
    where
        F: FnMut(&mut Self, TimerHandle),
    {
        let limit = self.scheduler.now() + duration;
        while let Some(handle) = self.scheduler.advance_to_next(limit) {
            on_timer(self, handle);
        }
    }
}

impl Scheduler for RecordingHost {
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        self.scheduler.set_timeout(delay)
    }

    fn set_interval(&mut self, period: Duration) -> TimerHandle {
        self.scheduler.set_interval(period)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.scheduler.cancel(handle);
    }
}

impl KeyValueStore for RecordingHost {
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store.get_value(key)
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store.set_value(key, value)
    }
}

impl DocumentView for RecordingHost {
    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}

impl crate::theme::ThemeView for RecordingHost {
    fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }
}

impl NavigationView for RecordingHost {
    fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    fn set_link_active(&mut self, link: usize, active: bool) {
        self.active_links.insert(link, active);
    }
}

impl GalleryView for RecordingHost {
    fn set_tile_visible(&mut self, tile: usize, visible: bool) {
        self.tile_visible.insert(tile, visible);
    }

    fn set_active_filter(&mut self, filter: &str) {
        self.active_filter = Some(filter.to_string());
    }

    fn set_photo_count(&mut self, label: &str) {
        self.photo_count = Some(label.to_string());
    }

    fn hide_gallery_loading(&mut self) {
        self.gallery_loading_hidden = true;
    }

    fn set_load_more_state(&mut self, label: &str, enabled: bool) {
        self.load_more = Some((label.to_string(), enabled));
    }
}

impl LightboxView for RecordingHost {
    fn show_lightbox_image(&mut self, image: &GalleryImage) {
        self.lightbox_image = Some(image.clone());
    }

    fn set_lightbox_open(&mut self, open: bool) {
        self.lightbox_open = open;
    }
}

impl CarouselView for RecordingHost {
    fn build_carousel(&mut self, photos: &[CarouselPhoto]) {
        self.slides = photos.to_vec();
    }

    fn show_slide(&mut self, index: usize) {
        self.slide = Some(index);
    }

    fn set_progress(&mut self, fraction: f64) {
        self.progress.push(fraction);
    }

    fn set_play_state(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn request_image_size(&mut self, src: &str) {
        self.requested_sizes.push(src.to_string());
    }

    fn carousel_width(&self) -> f64 {
        self.carousel_width
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn set_carousel_height(&mut self, px: f64) {
        self.carousel_height = Some(px);
    }

    fn show_carousel_modal(&mut self, photo: &CarouselPhoto) {
        self.modal = Some(photo.clone());
    }

    fn hide_carousel_modal(&mut self) {
        self.modal = None;
    }
}

impl PublicationView for RecordingHost {
    fn set_entry_visible(&mut self, entry: usize, visible: bool) {
        self.entry_visible.insert(entry, visible);
    }

    fn arrange_section(&mut self, year: i32, entries: &[usize]) {
        self.sections.insert(year, entries.to_vec());
    }

    fn set_results_count(&mut self, label: &str, no_results: bool) {
        self.results = Some((label.to_string(), no_results));
    }

    fn set_publication_stats(&mut self, stats: &PublicationStats) {
        self.stats = Some(stats.clone());
    }

    fn set_filter_controls(&mut self, filters: &FilterState) {
        self.filter_controls = Some(filters.clone());
    }

    fn decorate_entry(&mut self, entry: usize, link: &LinkResolution) {
        self.decorations.insert(entry, link.clone());
    }
}

impl CvView for RecordingHost {
    fn show_cv_fallback(&mut self) {
        self.cv_fallback_shown += 1;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), HostError> {
        if self.reject_fullscreen {
            return Err(HostError::Fullscreen("permission denied".to_string()));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), HostError> {
        self.fullscreen = false;
        Ok(())
    }
}

impl LazyImageView for RecordingHost {
    fn set_image_source(&mut self, image: usize, src: &str) {
        self.image_sources.insert(image, src.to_string());
    }

    fn unobserve_image(&mut self, image: usize) {
        self.unobserved.push(image);
    }
}

impl ScrollView for RecordingHost {
    fn scroll_to_element(&mut self, id: &str) -> bool {
        self.scrolled_to.push(id.to_string());
        true
    }

    fn focus_element(&mut self, id: &str) -> bool {
        self.focused.push(id.to_string());
        true
    }

    fn set_hero_offset(&mut self, px: f64) {
        self.hero_offset = Some(px);
    }

    fn prepare_fade_in(&mut self, target: usize) {
        self.prepared.push(target);
    }

    fn reveal(&mut self, target: usize) {
        self.revealed.push(target);
    }
}

impl AnnouncementView for RecordingHost {
    fn set_live_region_text(&mut self, text: &str) {
        self.live_region = text.to_string();
    }
}

impl OfflineWorker for RecordingHost {
    fn register_offline_worker(&mut self, script_path: &str) -> Result<(), HostError> {
        if self.reject_worker {
            return Err(HostError::WorkerRegistration("script not found".to_string()));
        }
        self.registered_workers.push(script_path.to_string());
        Ok(())
    }
}
