//! Gallery tiles and the images derived from them

use serde::{Deserialize, Serialize};

/// One photo tile of the gallery grid, as read from markup.
///
/// `visible` is tracked explicitly rather than inferred from inline styles,
/// so counts and derived image lists never depend on presentation state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GalleryTile {
    /// The `src` of the tile's thumbnail image
    pub src: String,
    /// `data-full`, the full-resolution source if the tile provides one
    pub full_src: Option<String>,
    pub alt: String,
    /// `data-caption`
    pub caption: Option<String>,
    /// Text of the tile's info heading
    pub title: Option<String>,
    /// `data-category`
    pub category: String,
    pub visible: bool,
}

impl GalleryTile {
    /// Create a visible tile with just a source, alt text and category
    pub fn new(src: impl Into<String>, alt: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            full_src: None,
            alt: alt.into(),
            caption: None,
            title: None,
            category: category.into(),
            visible: true,
        }
    }

    /// Builder method to add a full-resolution source
    pub fn with_full_src(mut self, full_src: impl Into<String>) -> Self {
        self.full_src = Some(full_src.into());
        self
    }

    /// Builder method to add a caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Builder method to add a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The image shown by the lightbox: full source when available, caption
    /// falling back to alt text, title falling back to empty.
    pub fn image(&self) -> GalleryImage {
        GalleryImage {
            src: self.full_src.clone().unwrap_or_else(|| self.src.clone()),
            alt: self.alt.clone(),
            caption: self.caption.clone().unwrap_or_else(|| self.alt.clone()),
            title: self.title.clone().unwrap_or_default(),
            category: self.category.clone(),
        }
    }

    /// The photo shown by the carousel: thumbnail source, with both caption
    /// and title falling back to alt text.
    pub fn carousel_photo(&self) -> CarouselPhoto {
        GalleryImage {
            src: self.src.clone(),
            alt: self.alt.clone(),
            caption: self.caption.clone().unwrap_or_else(|| self.alt.clone()),
            title: self.title.clone().unwrap_or_else(|| self.alt.clone()),
            category: self.category.clone(),
        }
    }
}

/// An image derived on demand from a gallery tile
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    pub caption: String,
    pub title: String,
    pub category: String,
}

/// Carousel photos share the gallery image shape
pub type CarouselPhoto = GalleryImage;

/// Category filter selected by a gallery filter button (`data-filter`)
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a `data-filter` value; `all` selects everything
    pub fn parse(value: &str) -> Self {
        match value {
            "all" | "" => CategoryFilter::All,
            other => CategoryFilter::Category(other.to_string()),
        }
    }

    /// Whether a tile of the given category passes this filter
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(c) => c == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(c) => c,
        }
    }
}

/// Label for the photo count display
pub fn photo_count_label(count: usize) -> String {
    format!("Showing {} photo{}", count, if count == 1 { "" } else { "s" })
}
