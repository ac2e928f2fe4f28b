//! Capabilities the embedding platform provides

use crate::accessibility::AnnouncementView;
use crate::carousel::CarouselView;
use crate::cv::CvView;
use crate::error::HostError;
use crate::gallery::GalleryView;
use crate::lazy_load::LazyImageView;
use crate::lightbox::LightboxView;
use crate::navigation::NavigationView;
use crate::publications::PublicationView;
use crate::scheduler::Scheduler;
use crate::scroll::ScrollView;
use crate::storage::KeyValueStore;
use crate::theme::ThemeView;

/// Page-level state shared by the modal controllers
pub trait DocumentView {
    /// Suppress or restore page scrolling
    fn set_scroll_locked(&mut self, locked: bool);
}

pub trait OfflineWorker {
    /// Start registering the offline worker script. Completion is reported
    /// later through `UiEvent::WorkerRegistered`.
    fn register_offline_worker(&mut self, script_path: &str) -> Result<(), HostError>;
}

/// Everything `Site` needs from its host
pub trait SiteHost:
    Scheduler
    + KeyValueStore
    + DocumentView
    + ThemeView
    + NavigationView
    + GalleryView
    + LightboxView
    + CarouselView
    + PublicationView
    + CvView
    + LazyImageView
    + ScrollView
    + AnnouncementView
    + OfflineWorker
{
}

impl<T> SiteHost for T where
    T: Scheduler
        + KeyValueStore
        + DocumentView
        + ThemeView
        + NavigationView
        + GalleryView
        + LightboxView
        + CarouselView
        + PublicationView
        + CvView
        + LazyImageView
        + ScrollView
        + AnnouncementView
        + OfflineWorker
{
}
