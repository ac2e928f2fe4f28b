//! Full-size image viewer over the visible gallery tiles

use folio_domain::GalleryImage;

use crate::event::Key;
use crate::host::DocumentView;
use crate::page::{ElementId, PageSnapshot};

pub trait LightboxView: DocumentView {
    fn show_lightbox_image(&mut self, image: &GalleryImage);
    fn set_lightbox_open(&mut self, open: bool);
}

/// Lightbox cursor. The index is always within the image list, or zero when
/// the list is empty.
#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    images: Vec<GalleryImage>,
    index: usize,
    open: bool,
}

impl Lightbox {
    pub fn attach(page: &PageSnapshot) -> Option<Self> {
        page.has_all(&[ElementId::GalleryGrid, ElementId::Lightbox])
            .then(Self::default)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current(&self) -> Option<&GalleryImage> {
        self.images.get(self.index)
    }

    /// Open on `position` within a freshly derived image list. Positions
    /// outside the list leave the lightbox closed.
    pub fn open<V: LightboxView>(&mut self, images: Vec<GalleryImage>, position: usize, view: &mut V) {
        if position >= images.len() {
            tracing::debug!(position, len = images.len(), "lightbox target not in image list");
            return;
        }
        self.images = images;
        self.index = position;
        self.open = true;
        self.display(view);
        view.set_lightbox_open(true);
        view.set_scroll_locked(true);
    }

    /// Close and restore page scrolling
    pub fn close<V: LightboxView>(&mut self, view: &mut V) {
        self.open = false;
        view.set_lightbox_open(false);
        view.set_scroll_locked(false);
    }

    pub fn next<V: LightboxView>(&mut self, view: &mut V) {
        if self.images.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.images.len();
        self.display(view);
    }

    pub fn previous<V: LightboxView>(&mut self, view: &mut V) {
        if self.images.is_empty() {
            return;
        }
        let len = self.images.len();
        self.index = (self.index + len - 1) % len;
        self.display(view);
    }

    /// Escape, ArrowLeft and ArrowRight while open. Returns whether the key
    /// was consumed.
    pub fn handle_key<V: LightboxView>(&mut self, key: Key, view: &mut V) -> bool {
        if !self.open {
            return false;
        }
        match key {
            Key::Escape => self.close(view),
            Key::ArrowLeft => self.previous(view),
            Key::ArrowRight => self.next(view),
            _ => return false,
        }
        true
    }

    /// Replace the image list after the gallery changed, keeping the cursor
    /// in range
    pub fn refresh(&mut self, images: Vec<GalleryImage>) {
        self.index = if images.is_empty() {
            0
        } else {
            self.index.min(images.len() - 1)
        };
        self.images = images;
    }

    fn display<V: LightboxView>(&self, view: &mut V) {
        if let Some(image) = self.images.get(self.index) {
            view.show_lightbox_image(image);
        }
    }
}
