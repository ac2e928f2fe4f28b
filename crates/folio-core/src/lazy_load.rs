//! One-shot deferred image loading

use crate::page::{LazyImage, PageSnapshot};

pub trait LazyImageView {
    /// Swap in the real source and drop the `lazy` class
    fn set_image_source(&mut self, image: usize, src: &str);
    fn unobserve_image(&mut self, image: usize);
}

#[derive(Debug, Clone)]
pub struct LazyLoader {
    images: Vec<LazyImage>,
    loaded: Vec<bool>,
}

impl LazyLoader {
    /// Needs intersection observation support
    pub fn attach(page: &PageSnapshot) -> Option<Self> {
        if !page.supports_intersection_observer {
            return None;
        }
        Some(Self {
            loaded: vec![false; page.lazy_images.len()],
            images: page.lazy_images.clone(),
        })
    }

    pub fn pending_count(&self) -> usize {
        self.loaded.iter().filter(|loaded| !**loaded).count()
    }

    pub fn is_loaded(&self, image: usize) -> bool {
        self.loaded.get(image).copied().unwrap_or(false)
    }

    /// Load an image the first time it enters the viewport. Returns whether
    /// it was loaded by this call.
    pub fn on_intersection<V: LazyImageView>(&mut self, image: usize, intersecting: bool, view: &mut V) -> bool {
        if !intersecting {
            return false;
        }
        let (Some(entry), Some(loaded)) = (self.images.get(image), self.loaded.get_mut(image)) else {
            return false;
        };
        if *loaded {
            return false;
        }

        *loaded = true;
        let src = entry.data_src.as_deref().unwrap_or(&entry.src);
        view.set_image_source(image, src);
        view.unobserve_image(image);
        true
    }
}
