//! Gallery category filters, photo count, and loading feedback

use folio_domain::{photo_count_label, CategoryFilter, GalleryImage, GalleryTile};

use crate::config::TimingConfig;
use crate::page::{ElementId, PageSnapshot};
use crate::scheduler::{Scheduler, TimerHandle};

pub const LOAD_MORE_LABEL: &str = "Load More Photos";
pub const LOADING_LABEL: &str = "Loading...";

pub trait GalleryView {
    fn set_tile_visible(&mut self, tile: usize, visible: bool);
    /// Highlight the filter button with this `data-filter` value
    fn set_active_filter(&mut self, filter: &str);
    fn set_photo_count(&mut self, label: &str);
    fn hide_gallery_loading(&mut self);
    fn set_load_more_state(&mut self, label: &str, enabled: bool);
}

/// Photo grid state. Tile visibility is owned here; the view only mirrors it.
#[derive(Debug, Clone)]
pub struct Gallery {
    tiles: Vec<GalleryTile>,
    filter: CategoryFilter,
    has_photo_count: bool,
    spinner_timer: Option<TimerHandle>,
    load_more_timer: Option<TimerHandle>,
    load_more_delay: std::time::Duration,
}

impl Gallery {
    /// Needs the gallery grid. Schedules the loading spinner's removal and
    /// writes the initial photo count.
    pub fn attach<H>(page: &PageSnapshot, timing: &TimingConfig, host: &mut H) -> Option<Self>
    where
        H: GalleryView + Scheduler,
    {
        if !page.has(ElementId::GalleryGrid) {
            return None;
        }

        let spinner_timer = page
            .has(ElementId::GalleryLoading)
            .then(|| host.set_timeout(timing.gallery_spinner()));

        let gallery = Self {
            tiles: page.gallery.clone(),
            filter: CategoryFilter::All,
            has_photo_count: page.has(ElementId::PhotoCount),
            spinner_timer,
            load_more_timer: None,
            load_more_delay: timing.load_more(),
        };
        gallery.refresh_count(host);
        Some(gallery)
    }

    pub fn tiles(&self) -> &[GalleryTile] {
        &self.tiles
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn visible_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.visible).count()
    }

    /// Lightbox images for the visible tiles, in document order
    pub fn visible_images(&self) -> Vec<GalleryImage> {
        self.tiles.iter().filter(|t| t.visible).map(GalleryTile::image).collect()
    }

    /// Position of a tile within [`visible_images`](Self::visible_images)
    pub fn visible_position(&self, tile: usize) -> Option<usize> {
        if !self.tiles.get(tile)?.visible {
            return None;
        }
        Some(self.tiles[..tile].iter().filter(|t| t.visible).count())
    }

    /// Show the tiles in `filter`'s category and hide the rest. Returns the
    /// visible count.
    pub fn apply_filter<V: GalleryView>(&mut self, filter: CategoryFilter, view: &mut V) -> usize {
        view.set_active_filter(filter.as_str());
        for (index, tile) in self.tiles.iter_mut().enumerate() {
            tile.visible = filter.matches(&tile.category);
            view.set_tile_visible(index, tile.visible);
        }
        self.filter = filter;
        self.refresh_count(view);

        let count = self.visible_count();
        tracing::debug!(filter = self.filter.as_str(), count, "gallery filtered");
        count
    }

    pub fn refresh_count<V: GalleryView>(&self, view: &mut V) {
        if self.has_photo_count {
            view.set_photo_count(&photo_count_label(self.visible_count()));
        }
    }

    pub fn is_loading_more(&self) -> bool {
        self.load_more_timer.is_some()
    }

    /// Show loading feedback on the load-more button. Presses while it is
    /// already loading are ignored.
    pub fn begin_load_more<H>(&mut self, host: &mut H) -> bool
    where
        H: GalleryView + Scheduler,
    {
        if self.load_more_timer.is_some() {
            return false;
        }
        host.set_load_more_state(LOADING_LABEL, false);
        self.load_more_timer = Some(host.set_timeout(self.load_more_delay));
        true
    }

    /// Returns whether the timer belonged to the gallery
    pub fn on_timer<V: GalleryView>(&mut self, handle: TimerHandle, view: &mut V) -> bool {
        if self.spinner_timer == Some(handle) {
            self.spinner_timer = None;
            view.hide_gallery_loading();
            true
        } else if self.load_more_timer == Some(handle) {
            self.load_more_timer = None;
            view.set_load_more_state(LOAD_MORE_LABEL, true);
            true
        } else {
            false
        }
    }

    pub fn teardown<S: Scheduler>(&mut self, scheduler: &mut S) {
        for handle in [self.spinner_timer.take(), self.load_more_timer.take()].into_iter().flatten() {
            scheduler.cancel(handle);
        }
    }
}
