//! Embedded CV document with fallback and fullscreen

use crate::error::HostError;
use crate::page::{ElementId, PageSnapshot};

pub trait CvView {
    /// Hide the embed and show the fallback block
    fn show_cv_fallback(&mut self);
    fn is_fullscreen(&self) -> bool;
    /// Request fullscreen on the embed wrapper
    fn request_fullscreen(&mut self) -> Result<(), HostError>;
    fn exit_fullscreen(&mut self) -> Result<(), HostError>;
}

#[derive(Debug, Clone)]
pub struct CvEmbed {
    has_fallback: bool,
    has_wrapper: bool,
    showing_fallback: bool,
}

impl CvEmbed {
    /// Needs the CV viewer and its embed
    pub fn attach(page: &PageSnapshot) -> Option<Self> {
        if !page.has_all(&[ElementId::CvViewer, ElementId::CvEmbed]) {
            return None;
        }
        Some(Self {
            has_fallback: page.has(ElementId::CvFallback),
            has_wrapper: page.has(ElementId::CvEmbedWrapper),
            showing_fallback: false,
        })
    }

    pub fn is_showing_fallback(&self) -> bool {
        self.showing_fallback
    }

    pub fn on_loaded(&self) {
        tracing::info!("CV document loaded");
    }

    /// Swap in the fallback block when the page has one
    pub fn on_failed<V: CvView>(&mut self, view: &mut V) {
        tracing::warn!("CV document failed to load");
        if self.has_fallback && !self.showing_fallback {
            self.showing_fallback = true;
            view.show_cv_fallback();
        }
    }

    /// Enter fullscreen, or leave it when already there. Rejections are
    /// logged.
    pub fn toggle_fullscreen<V: CvView>(&self, view: &mut V) {
        if !self.has_wrapper {
            return;
        }
        let result = if view.is_fullscreen() {
            view.exit_fullscreen()
        } else {
            view.request_fullscreen()
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "fullscreen toggle failed");
        }
    }
}
