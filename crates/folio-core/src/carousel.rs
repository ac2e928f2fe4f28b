//! Auto-advancing slideshow over a random sample of gallery photos
//!
//! # State machine
//!
//! ```text
//!             start / close modal
//!   Paused ─────────────────────────▶ Playing
//!     ▲                                  │
//!     └──── stop / toggle / open modal ──┘
//!
//!   Idle: no photos; every operation is a no-op
//! ```
//!
//! While playing, two timers run: the advance interval and the progress
//! tick. They are always created and cleared together.

use folio_domain::{CarouselPhoto, GalleryTile};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::CarouselConfig;
use crate::event::Key;
use crate::host::DocumentView;
use crate::page::{ElementId, PageSnapshot};
use crate::scheduler::{Scheduler, TimerHandle};

pub trait CarouselView: DocumentView {
    /// Build one slide and one indicator per photo
    fn build_carousel(&mut self, photos: &[CarouselPhoto]);
    /// Move the track to `index` and mark its indicator active
    fn show_slide(&mut self, index: usize);
    /// Progress bar fill, 0.0 to 1.0
    fn set_progress(&mut self, fraction: f64);
    fn set_play_state(&mut self, playing: bool);
    /// Load the image and report its natural size with `UiEvent::ImageLoaded`,
    /// even when it is already cached
    fn request_image_size(&mut self, src: &str);
    fn carousel_width(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn set_carousel_height(&mut self, px: f64);
    fn show_carousel_modal(&mut self, photo: &CarouselPhoto);
    fn hide_carousel_modal(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselState {
    Idle,
    Playing,
    Paused,
}

/// Uniformly shuffle all tiles and keep at most `max`
pub fn sample_photos<R: Rng + ?Sized>(tiles: &[GalleryTile], max: usize, rng: &mut R) -> Vec<CarouselPhoto> {
    let mut photos: Vec<CarouselPhoto> = tiles.iter().map(GalleryTile::carousel_photo).collect();
    photos.shuffle(rng);
    photos.truncate(max);
    photos
}

/// Display height for an image of the given natural size, clamped to
/// `[min_height, min(viewport * fraction, max_height)]`
pub fn clamp_height(
    natural_width: f64,
    natural_height: f64,
    container_width: f64,
    viewport_height: f64,
    config: &CarouselConfig,
) -> f64 {
    let max = (viewport_height * config.max_viewport_fraction).min(config.max_height_px);
    let ideal = if natural_width > 0.0 {
        container_width * natural_height / natural_width
    } else {
        config.min_height_px
    };
    ideal.min(max).max(config.min_height_px)
}

#[derive(Debug, Clone)]
pub struct Carousel {
    photos: Vec<CarouselPhoto>,
    index: usize,
    playing: bool,
    modal_open: bool,
    has_modal: bool,
    has_progress_bar: bool,
    advance_timer: Option<TimerHandle>,
    progress_timer: Option<TimerHandle>,
    progress_ticks: u64,
    config: CarouselConfig,
}

impl Carousel {
    /// Sample photos from the gallery tiles, build the slides, show the
    /// first one, and start playing. Needs the carousel container; with no
    /// photos the carousel stays idle.
    pub fn attach<H, R>(page: &PageSnapshot, config: &CarouselConfig, rng: &mut R, host: &mut H) -> Option<Self>
    where
        H: CarouselView + Scheduler,
        R: Rng + ?Sized,
    {
        if !page.has_all(&[ElementId::GalleryGrid, ElementId::CarouselContainer]) {
            return None;
        }

        let mut carousel = Self {
            photos: sample_photos(&page.gallery, config.sample_size, rng),
            index: 0,
            playing: false,
            modal_open: false,
            has_modal: page.has(ElementId::CarouselModal),
            has_progress_bar: page.has(ElementId::CarouselProgressBar),
            advance_timer: None,
            progress_timer: None,
            progress_ticks: 0,
            config: config.clone(),
        };

        if carousel.photos.is_empty() {
            tracing::debug!("carousel has no photos");
            return Some(carousel);
        }

        host.build_carousel(&carousel.photos);
        carousel.go_to(0, host);
        carousel.start(host);
        tracing::debug!(photos = carousel.photos.len(), "carousel started");
        Some(carousel)
    }

    pub fn state(&self) -> CarouselState {
        if self.photos.is_empty() {
            CarouselState::Idle
        } else if self.playing {
            CarouselState::Playing
        } else {
            CarouselState::Paused
        }
    }

    pub fn photos(&self) -> &[CarouselPhoto] {
        &self.photos
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&CarouselPhoto> {
        self.photos.get(self.index)
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Progress bar fill since the last reset
    pub fn progress(&self) -> f64 {
        (self.progress_ticks * self.config.progress_tick_ms) as f64 / self.config.advance_interval_ms as f64
    }

    /// Show slide `index`. One step past either end wraps around.
    pub fn go_to<H>(&mut self, index: isize, host: &mut H)
    where
        H: CarouselView + Scheduler,
    {
        let len = self.photos.len();
        if len == 0 {
            return;
        }

        self.index = if index < 0 {
            len - 1
        } else if index as usize >= len {
            0
        } else {
            index as usize
        };

        host.show_slide(self.index);
        self.adjust_height(host);
        self.reset_progress(host);
    }

    pub fn next<H>(&mut self, host: &mut H)
    where
        H: CarouselView + Scheduler,
    {
        self.go_to(self.index as isize + 1, host);
    }

    pub fn previous<H>(&mut self, host: &mut H)
    where
        H: CarouselView + Scheduler,
    {
        self.go_to(self.index as isize - 1, host);
    }

    /// Enter Playing. Does nothing when already playing or idle.
    pub fn start<H>(&mut self, host: &mut H)
    where
        H: CarouselView + Scheduler,
    {
        if self.advance_timer.is_some() || self.photos.is_empty() {
            return;
        }

        self.playing = true;
        host.set_play_state(true);
        self.advance_timer = Some(host.set_interval(self.config.advance_interval()));
        self.start_progress(host);
    }

    /// Enter Paused: clear both timers and zero the progress bar
    pub fn stop<H>(&mut self, host: &mut H)
    where
        H: CarouselView + Scheduler,
    {
        self.clear_timers(host);
        self.playing = false;
        host.set_play_state(false);
        self.reset_progress(host);
    }

    pub fn toggle<H>(&mut self, host: &mut H)
    where
        H: CarouselView + Scheduler,
    {
        if self.playing {
            self.stop(host);
        } else {
            self.start(host);
        }
    }

    /// Returns whether the timer belonged to the carousel
    pub fn on_timer<H>(&mut self, handle: TimerHandle, host: &mut H) -> bool
    where
        H: CarouselView + Scheduler,
    {
        if self.advance_timer == Some(handle) {
            self.next(host);
            true
        } else if self.progress_timer == Some(handle) {
            self.tick_progress(host);
            true
        } else {
            false
        }
    }

    /// Ask the host for the current photo's natural size
    pub fn adjust_height<V: CarouselView>(&self, view: &mut V) {
        if let Some(photo) = self.photos.get(self.index) {
            view.request_image_size(&photo.src);
        }
    }

    /// Size report for a requested image. Reports for photos that are no
    /// longer current are dropped.
    pub fn on_image_loaded<V: CarouselView>(&self, src: &str, natural_width: f64, natural_height: f64, view: &mut V) -> bool {
        match self.photos.get(self.index) {
            Some(photo) if photo.src == src => {
                let height = clamp_height(
                    natural_width,
                    natural_height,
                    view.carousel_width(),
                    view.viewport_height(),
                    &self.config,
                );
                view.set_carousel_height(height);
                true
            }
            _ => false,
        }
    }

    /// Show photo `index` full-size and pause
    pub fn open_modal<H>(&mut self, index: usize, host: &mut H)
    where
        H: CarouselView + Scheduler,
    {
        if !self.has_modal {
            return;
        }
        let Some(photo) = self.photos.get(index) else {
            return;
        };

        host.show_carousel_modal(photo);
        host.set_scroll_locked(true);
        self.modal_open = true;
        if self.playing {
            self.stop(host);
        }
    }

    /// Hide the modal and resume playing
    pub fn close_modal<H>(&mut self, host: &mut H)
    where
        H: CarouselView + Scheduler,
    {
        if !self.has_modal {
            return;
        }
        host.hide_carousel_modal();
        host.set_scroll_locked(false);
        self.modal_open = false;
        self.start(host);
    }

    /// Escape, ArrowLeft and ArrowRight while the modal is open
    pub fn handle_key<H>(&mut self, key: Key, host: &mut H) -> bool
    where
        H: CarouselView + Scheduler,
    {
        if !self.modal_open {
            return false;
        }
        match key {
            Key::Escape => {
                self.close_modal(host);
                return true;
            }
            Key::ArrowLeft => self.previous(host),
            Key::ArrowRight => self.next(host),
            _ => return false,
        }
        if let Some(photo) = self.photos.get(self.index) {
            host.show_carousel_modal(photo);
        }
        true
    }

    /// Clear both timers without touching the view
    pub fn teardown<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.clear_timers(scheduler);
        self.playing = false;
    }

    fn clear_timers<S: Scheduler>(&mut self, scheduler: &mut S) {
        for handle in [self.advance_timer.take(), self.progress_timer.take()].into_iter().flatten() {
            scheduler.cancel(handle);
        }
    }

    fn start_progress<S: Scheduler>(&mut self, scheduler: &mut S) {
        if !self.has_progress_bar {
            return;
        }
        self.progress_ticks = 0;
        self.progress_timer = Some(scheduler.set_interval(self.config.progress_tick()));
    }

    fn reset_progress<H>(&mut self, host: &mut H)
    where
        H: CarouselView + Scheduler,
    {
        if self.has_progress_bar {
            host.set_progress(0.0);
        }
        if let Some(handle) = self.progress_timer.take() {
            host.cancel(handle);
        }
        self.progress_ticks = 0;
        if self.playing {
            self.start_progress(host);
        }
    }

    fn tick_progress<V: CarouselView>(&mut self, view: &mut V) {
        self.progress_ticks += 1;
        let fraction = self.progress();
        view.set_progress(fraction.min(1.0));
        if fraction >= 1.0 {
            self.progress_ticks = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn tiles(n: usize) -> Vec<GalleryTile> {
        (0..n)
            .map(|i| GalleryTile::new(format!("{}.jpg", i), format!("Photo {}", i), "travel"))
            .collect()
    }

    fn page(n: usize) -> PageSnapshot {
        PageSnapshot::new("/gallery.html")
            .with_elements(&[
                ElementId::GalleryGrid,
                ElementId::CarouselContainer,
                ElementId::CarouselProgressBar,
                ElementId::CarouselModal,
            ])
            .with_gallery(tiles(n))
    }

    fn carousel(n: usize, host: &mut RecordingHost) -> Carousel {
        let mut rng = StdRng::seed_from_u64(7);
        Carousel::attach(&page(n), &CarouselConfig::default(), &mut rng, host).unwrap()
    }

    fn run(carousel: &mut Carousel, host: &mut RecordingHost, ms: u64) {
        let limit = host.scheduler.now() + Duration::from_millis(ms);
        while let Some(handle) = host.scheduler.advance_to_next(limit) {
            carousel.on_timer(handle, host);
        }
    }

    #[test]
    fn test_sample_is_bounded_and_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let photos = sample_photos(&tiles(30), 20, &mut rng);
        assert_eq!(photos.len(), 20);

        let mut sources: Vec<_> = photos.iter().map(|p| p.src.clone()).collect();
        sources.sort();
        sources.dedup();
        assert_eq!(sources.len(), 20);

        assert_eq!(sample_photos(&tiles(3), 20, &mut rng).len(), 3);
    }

    #[test]
    fn test_starts_playing_on_first_slide() {
        let mut host = RecordingHost::new();
        let carousel = carousel(5, &mut host);

        assert_eq!(carousel.state(), CarouselState::Playing);
        assert_eq!(carousel.index(), 0);
        assert_eq!(host.slides.len(), 5);
        assert_eq!(host.slide, Some(0));
        assert!(host.playing);
        assert_eq!(host.scheduler.active_count(), 2);
        assert_eq!(host.requested_sizes, vec![carousel.photos()[0].src.clone()]);
    }

    #[test]
    fn test_idle_without_photos() {
        let mut host = RecordingHost::new();
        let mut carousel = carousel(0, &mut host);

        assert_eq!(carousel.state(), CarouselState::Idle);
        carousel.next(&mut host);
        carousel.toggle(&mut host);
        assert_eq!(host.scheduler.active_count(), 0);
        assert!(host.slides.is_empty());
    }

    #[test]
    fn test_auto_advance_every_interval() {
        let mut host = RecordingHost::new();
        let mut carousel = carousel(3, &mut host);

        run(&mut carousel, &mut host, 4999);
        assert_eq!(carousel.index(), 0);
        run(&mut carousel, &mut host, 1);
        assert_eq!(carousel.index(), 1);
        run(&mut carousel, &mut host, 10_000);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_progress_fills_then_resets_on_advance() {
        let mut host = RecordingHost::new();
        let mut carousel = carousel(3, &mut host);

        run(&mut carousel, &mut host, 2500);
        assert!((carousel.progress() - 0.5).abs() < 1e-9);
        assert!((host.progress.last().copied().unwrap() - 0.5).abs() < 1e-9);

        run(&mut carousel, &mut host, 2500);
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.progress(), 0.0);
    }

    #[test]
    fn test_wraparound_both_ends() {
        let mut host = RecordingHost::new();
        let mut carousel = carousel(4, &mut host);

        carousel.previous(&mut host);
        assert_eq!(carousel.index(), 3);
        carousel.next(&mut host);
        assert_eq!(carousel.index(), 0);
        carousel.go_to(2, &mut host);
        assert_eq!(host.slide, Some(2));
    }

    #[test]
    fn test_pause_clears_both_timers() {
        let mut host = RecordingHost::new();
        let mut carousel = carousel(3, &mut host);
        run(&mut carousel, &mut host, 1200);

        carousel.toggle(&mut host);
        assert_eq!(carousel.state(), CarouselState::Paused);
        assert_eq!(host.scheduler.active_count(), 0);
        assert_eq!(host.progress.last(), Some(&0.0));
        assert!(!host.playing);

        let updates = host.progress.len();
        run(&mut carousel, &mut host, 20_000);
        assert_eq!(carousel.index(), 0);
        assert_eq!(host.progress.len(), updates);

        carousel.toggle(&mut host);
        assert_eq!(carousel.state(), CarouselState::Playing);
        assert_eq!(host.scheduler.active_count(), 2);
    }

    #[test]
    fn test_modal_pauses_and_close_resumes() {
        let mut host = RecordingHost::new();
        let mut carousel = carousel(3, &mut host);

        carousel.open_modal(1, &mut host);
        assert!(carousel.is_modal_open());
        assert_eq!(carousel.state(), CarouselState::Paused);
        assert!(host.scroll_locked);
        assert_eq!(host.modal.as_ref().map(|p| p.src.clone()), Some(carousel.photos()[1].src.clone()));
        assert_eq!(host.scheduler.active_count(), 0);

        assert!(carousel.handle_key(Key::Escape, &mut host));
        assert!(!carousel.is_modal_open());
        assert!(!host.scroll_locked);
        assert_eq!(carousel.state(), CarouselState::Playing);
    }

    #[test]
    fn test_close_modal_resumes_even_when_paused_before() {
        let mut host = RecordingHost::new();
        let mut carousel = carousel(3, &mut host);
        carousel.stop(&mut host);

        carousel.open_modal(0, &mut host);
        carousel.close_modal(&mut host);
        assert_eq!(carousel.state(), CarouselState::Playing);
    }

    #[test]
    fn test_modal_arrow_keys_navigate() {
        let mut host = RecordingHost::new();
        let mut carousel = carousel(3, &mut host);
        carousel.open_modal(0, &mut host);

        assert!(carousel.handle_key(Key::ArrowLeft, &mut host));
        assert_eq!(carousel.index(), 2);
        assert_eq!(host.modal.as_ref().map(|p| p.src.clone()), Some(carousel.photos()[2].src.clone()));
        assert!(!carousel.handle_key(Key::Tab, &mut host));
    }

    #[test]
    fn test_height_clamped() {
        let config = CarouselConfig::default();
        // Landscape 1000px wide container: 1000 * 0.5 = 500
        assert_eq!(clamp_height(1600.0, 800.0, 1000.0, 1000.0, &config), 500.0);
        // Too short
        assert_eq!(clamp_height(1600.0, 100.0, 1000.0, 1000.0, &config), 300.0);
        // Tall image bounded by 80% of viewport
        assert_eq!(clamp_height(500.0, 2000.0, 1000.0, 900.0, &config), 720.0);
        // Tall image bounded by max height
        assert_eq!(clamp_height(500.0, 2000.0, 1000.0, 2000.0, &config), 800.0);
        // Zero width image
        assert_eq!(clamp_height(0.0, 100.0, 1000.0, 1000.0, &config), 300.0);
    }

    #[test]
    fn test_stale_image_size_ignored() {
        let mut host = RecordingHost::new();
        host.carousel_width = 1000.0;
        host.viewport_height = 1000.0;
        let mut carousel = carousel(3, &mut host);
        let first = carousel.photos()[0].src.clone();

        carousel.next(&mut host);
        assert!(!carousel.on_image_loaded(&first, 1600.0, 800.0, &mut host));
        assert_eq!(host.carousel_height, None);

        let current = carousel.photos()[1].src.clone();
        assert!(carousel.on_image_loaded(&current, 1600.0, 800.0, &mut host));
        assert_eq!(host.carousel_height, Some(500.0));
    }

    #[test]
    fn test_teardown_clears_timers() {
        let mut host = RecordingHost::new();
        let mut carousel = carousel(3, &mut host);

        carousel.teardown(&mut host.scheduler);
        assert_eq!(host.scheduler.active_count(), 0);
        assert_eq!(carousel.state(), CarouselState::Paused);
    }

    #[test]
    fn test_no_progress_timer_without_bar() {
        let mut host = RecordingHost::new();
        let page = PageSnapshot::new("/gallery.html")
            .with_elements(&[ElementId::GalleryGrid, ElementId::CarouselContainer])
            .with_gallery(tiles(3));
        let mut rng = StdRng::seed_from_u64(3);
        let carousel = Carousel::attach(&page, &CarouselConfig::default(), &mut rng, &mut host).unwrap();

        assert_eq!(carousel.state(), CarouselState::Playing);
        assert_eq!(host.scheduler.active_count(), 1);
    }
}
