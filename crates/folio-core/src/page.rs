//! What a page contains
//!
//! A [`PageSnapshot`] is read once when the site initializes. Each controller
//! checks the elements it needs and stays inactive when they are missing.

use std::collections::HashSet;

use folio_domain::{GalleryTile, PublicationEntry};
use serde::{Deserialize, Serialize};

/// Elements controllers attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    NavToggle,
    NavMenu,
    ThemeToggle,
    ThemeIcon,
    GalleryGrid,
    GalleryLoading,
    PhotoCount,
    LoadMoreButton,
    Lightbox,
    CarouselContainer,
    CarouselProgressBar,
    CarouselModal,
    PublicationsList,
    PublicationsContainer,
    PublicationSearch,
    ResultsCount,
    CvViewer,
    CvEmbed,
    CvFallback,
    CvEmbedWrapper,
    Hero,
}

impl ElementId {
    /// CSS selector of the element in the site markup
    pub fn selector(&self) -> &'static str {
        match self {
            ElementId::NavToggle => "#navToggle",
            ElementId::NavMenu => "#navMenu",
            ElementId::ThemeToggle => "#themeToggle",
            ElementId::ThemeIcon => "#themeIcon",
            ElementId::GalleryGrid => ".gallery-grid",
            ElementId::GalleryLoading => "#galleryLoading",
            ElementId::PhotoCount => "#photoCount",
            ElementId::LoadMoreButton => "#loadMoreBtn",
            ElementId::Lightbox => "#lightbox",
            ElementId::CarouselContainer => ".carousel-container",
            ElementId::CarouselProgressBar => "#carouselProgressBar",
            ElementId::CarouselModal => "#carouselModal",
            ElementId::PublicationsList => ".publications-list",
            ElementId::PublicationsContainer => ".publications-container",
            ElementId::PublicationSearch => "#publicationSearch",
            ElementId::ResultsCount => "#resultsCount",
            ElementId::CvViewer => ".cv-viewer",
            ElementId::CvEmbed => "#cvEmbed",
            ElementId::CvFallback => "#cvFallback",
            ElementId::CvEmbedWrapper => "#cvEmbedWrapper",
            ElementId::Hero => ".hero",
        }
    }
}

/// An image marked for deferred loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyImage {
    pub src: String,
    /// Real source, when the markup defers it
    pub data_src: Option<String>,
}

impl LazyImage {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            data_src: None,
        }
    }

    pub fn deferred(src: impl Into<String>, data_src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            data_src: Some(data_src.into()),
        }
    }
}

/// Page contents and platform capabilities at load time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Location path, e.g. `/gallery.html`
    pub path: String,
    pub elements: HashSet<ElementId>,
    /// `href` of each navigation link, in document order
    pub nav_links: Vec<String>,
    pub gallery: Vec<GalleryTile>,
    pub publications: Vec<PublicationEntry>,
    /// Year of each year-grouped publication section, in document order
    pub year_sections: Vec<i32>,
    pub lazy_images: Vec<LazyImage>,
    /// Number of cards that fade in when scrolled into view
    pub fade_in_targets: usize,
    /// `href` of each same-page anchor link
    pub anchor_links: Vec<String>,
    /// `href` of the skip link, if the page has one
    pub skip_link: Option<String>,
    pub supports_intersection_observer: bool,
    pub supports_offline_worker: bool,
}

impl PageSnapshot {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            elements: HashSet::new(),
            nav_links: Vec::new(),
            gallery: Vec::new(),
            publications: Vec::new(),
            year_sections: Vec::new(),
            lazy_images: Vec::new(),
            fade_in_targets: 0,
            anchor_links: Vec::new(),
            skip_link: None,
            supports_intersection_observer: true,
            supports_offline_worker: true,
        }
    }

    pub fn has(&self, id: ElementId) -> bool {
        self.elements.contains(&id)
    }

    pub fn has_all(&self, ids: &[ElementId]) -> bool {
        ids.iter().all(|id| self.has(*id))
    }

    pub fn with_element(mut self, id: ElementId) -> Self {
        self.elements.insert(id);
        self
    }

    pub fn with_elements(mut self, ids: &[ElementId]) -> Self {
        self.elements.extend(ids.iter().copied());
        self
    }

    pub fn with_nav_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nav_links = links.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_gallery(mut self, tiles: Vec<GalleryTile>) -> Self {
        self.gallery = tiles;
        self
    }

    pub fn with_publications(mut self, entries: Vec<PublicationEntry>, year_sections: Vec<i32>) -> Self {
        self.publications = entries;
        self.year_sections = year_sections;
        self
    }

    pub fn with_lazy_images(mut self, images: Vec<LazyImage>) -> Self {
        self.lazy_images = images;
        self
    }

    pub fn with_fade_in_targets(mut self, count: usize) -> Self {
        self.fade_in_targets = count;
        self
    }

    pub fn with_anchor_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.anchor_links = links.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip_link(mut self, href: impl Into<String>) -> Self {
        self.skip_link = Some(href.into());
        self
    }

    pub fn with_intersection_observer(mut self, supported: bool) -> Self {
        self.supports_intersection_observer = supported;
        self
    }

    pub fn with_offline_worker(mut self, supported: bool) -> Self {
        self.supports_offline_worker = supported;
        self
    }
}
