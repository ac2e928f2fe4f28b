//! End-to-end tests driving `Site` through `RecordingHost`

use std::time::Duration;

use folio_core::{
    CarouselState, ClickTarget, ElementId, FilterControl, FolioError, Focus, Key, KeyPress, KeyValueStore, MemoryStore,
    PageSnapshot, RecordingHost, Response, Site, SiteConfig, UiEvent,
};
use folio_domain::{GalleryTile, PublicationEntry, PublicationType, Theme};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn tiles() -> Vec<GalleryTile> {
    (0..6)
        .map(|i| {
            let category = if i % 2 == 0 { "travel" } else { "family" };
            GalleryTile::new(format!("photos/{}.jpg", i), format!("Photo {}", i), category)
        })
        .collect()
}

fn gallery_page() -> PageSnapshot {
    PageSnapshot::new("/gallery.html")
        .with_elements(&[
            ElementId::NavToggle,
            ElementId::NavMenu,
            ElementId::ThemeToggle,
            ElementId::ThemeIcon,
            ElementId::GalleryGrid,
            ElementId::PhotoCount,
            ElementId::Lightbox,
            ElementId::CarouselContainer,
            ElementId::CarouselProgressBar,
            ElementId::CarouselModal,
        ])
        .with_nav_links(["index.html", "gallery.html", "publications.html"])
        .with_gallery(tiles())
}

fn publications_page() -> PageSnapshot {
    let entries = vec![
        PublicationEntry::new(Some(2021), PublicationType::Journal, "Zebra markets")
            .with_citation("\"Zebra markets\", Food Policy, 2021, DOI: 10.1/zebra"),
        PublicationEntry::new(Some(2019), PublicationType::Conference, "Agricultural trade"),
        PublicationEntry::new(Some(2019), PublicationType::Book, "Orchards"),
    ];
    PageSnapshot::new("/publications.html")
        .with_elements(&[
            ElementId::PublicationsList,
            ElementId::PublicationsContainer,
            ElementId::ResultsCount,
        ])
        .with_publications(entries, vec![2021, 2019])
}

fn start(page: &PageSnapshot, host: &mut RecordingHost) -> Site {
    let mut rng = StdRng::seed_from_u64(42);
    Site::initialize(SiteConfig::default(), page, &mut rng, host).unwrap()
}

fn run(site: &mut Site, host: &mut RecordingHost, ms: u64) {
    host.run_for(Duration::from_millis(ms), |host, handle| {
        site.handle(UiEvent::Timer(handle), host);
    });
}

#[test]
fn test_initialize_attaches_present_controllers() {
    let mut host = RecordingHost::new();
    let site = start(&gallery_page(), &mut host);

    assert!(site.theme().is_some());
    assert!(site.navigation().is_some());
    assert!(site.gallery().is_some());
    assert!(site.lightbox().is_some());
    assert!(site.publications().is_none());
    assert!(site.cv().is_none());

    assert_eq!(host.theme, Some(Theme::Dark));
    assert_eq!(host.active_links.get(&1), Some(&true));
    assert_eq!(host.active_links.get(&0), Some(&false));

    let carousel = site.carousel().unwrap();
    assert_eq!(carousel.state(), CarouselState::Playing);
    assert_eq!(host.slides.len(), 6);
    assert_eq!(host.registered_workers, vec!["/sw.js".to_string()]);
}

#[test]
fn test_initialize_rejects_invalid_config() {
    let mut host = RecordingHost::new();
    let mut config = SiteConfig::default();
    config.carousel.sample_size = 0;
    let mut rng = StdRng::seed_from_u64(1);

    let result = Site::initialize(config, &gallery_page(), &mut rng, &mut host);
    assert!(matches!(result, Err(FolioError::Config(_))));
}

#[test]
fn test_worker_failure_is_not_fatal() {
    let mut host = RecordingHost::new();
    host.reject_worker = true;
    let site = start(&gallery_page(), &mut host);
    assert!(site.gallery().is_some());
    assert!(host.registered_workers.is_empty());

    let mut host = RecordingHost::new();
    start(&gallery_page().with_offline_worker(false), &mut host);
    assert!(host.registered_workers.is_empty());
}

#[test]
fn test_theme_toggle_persists() {
    let mut host = RecordingHost::new().with_store(MemoryStore::new().with_entry("theme", "light"));
    let mut site = start(&gallery_page(), &mut host);
    assert_eq!(host.theme, Some(Theme::Light));

    let response = site.handle(UiEvent::Click(ClickTarget::ThemeToggle), &mut host);
    assert_eq!(response, Response::Handled);
    assert_eq!(host.theme, Some(Theme::Dark));
    assert_eq!(host.store.get_value("theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_menu_closes_on_outside_click() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page(), &mut host);

    site.handle(UiEvent::Click(ClickTarget::NavToggle), &mut host);
    assert!(host.menu_open);
    site.handle(UiEvent::Click(ClickTarget::Document { inside_nav: true }), &mut host);
    assert!(host.menu_open);
    site.handle(UiEvent::Click(ClickTarget::Document { inside_nav: false }), &mut host);
    assert!(!host.menu_open);
}

#[test]
fn test_gallery_filter_announces_and_clears() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page(), &mut host);

    let filter = ClickTarget::GalleryFilter {
        filter: "travel".to_string(),
        label: " Travel ".to_string(),
    };
    site.handle(UiEvent::Click(filter), &mut host);

    assert_eq!(site.gallery().unwrap().visible_count(), 3);
    assert_eq!(host.photo_count.as_deref(), Some("Showing 3 photos"));
    assert_eq!(host.live_region, "Filtering by Travel");

    site.handle(UiEvent::Click(ClickTarget::CarouselPlayPause), &mut host);
    run(&mut site, &mut host, 1000);
    assert_eq!(host.live_region, "");
}

#[test]
fn test_tile_click_opens_lightbox_over_visible_photos() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page(), &mut host);
    let filter = ClickTarget::GalleryFilter {
        filter: "family".to_string(),
        label: "Family".to_string(),
    };
    site.handle(UiEvent::Click(filter), &mut host);

    let response = site.handle(UiEvent::Click(ClickTarget::GalleryTile(3)), &mut host);
    assert_eq!(response, Response::Handled);
    let lightbox = site.lightbox().unwrap();
    assert!(lightbox.is_open());
    assert_eq!(lightbox.len(), 3);
    assert_eq!(lightbox.index(), 1);
    assert_eq!(host.lightbox_image.as_ref().unwrap().src, "photos/3.jpg");
    assert!(host.scroll_locked);

    site.handle(UiEvent::Key(KeyPress::new(Key::ArrowRight)), &mut host);
    assert_eq!(host.lightbox_image.as_ref().unwrap().src, "photos/5.jpg");

    site.handle(UiEvent::Key(KeyPress::new(Key::Escape)), &mut host);
    assert!(!site.lightbox().unwrap().is_open());
    assert!(!host.scroll_locked);
}

#[test]
fn test_hidden_tile_click_is_ignored() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page(), &mut host);
    let filter = ClickTarget::GalleryFilter {
        filter: "family".to_string(),
        label: "Family".to_string(),
    };
    site.handle(UiEvent::Click(filter), &mut host);

    let response = site.handle(UiEvent::Click(ClickTarget::GalleryTile(0)), &mut host);
    assert_eq!(response, Response::Ignored);
    assert!(!site.lightbox().unwrap().is_open());
}

#[test]
fn test_tab_is_trapped_only_inside_open_modal() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page(), &mut host);
    let tab = KeyPress::new(Key::Tab).on(Focus::ModalItem { index: 2, count: 3 });

    assert_eq!(site.handle(UiEvent::Key(tab), &mut host), Response::Ignored);

    site.handle(UiEvent::Click(ClickTarget::GalleryTile(0)), &mut host);
    assert_eq!(site.handle(UiEvent::Key(tab), &mut host), Response::FocusModalItem(0));

    let back_tab = KeyPress::new(Key::Tab)
        .with_shift()
        .on(Focus::ModalItem { index: 0, count: 3 });
    assert_eq!(site.handle(UiEvent::Key(back_tab), &mut host), Response::FocusModalItem(2));
}

#[test]
fn test_carousel_advances_and_pauses() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page(), &mut host);

    run(&mut site, &mut host, 5000);
    assert_eq!(site.carousel().unwrap().index(), 1);
    assert_eq!(host.slide, Some(1));

    site.handle(UiEvent::Click(ClickTarget::CarouselPlayPause), &mut host);
    assert_eq!(site.carousel().unwrap().state(), CarouselState::Paused);
    run(&mut site, &mut host, 20_000);
    assert_eq!(site.carousel().unwrap().index(), 1);
}

#[test]
fn test_carousel_modal_pauses_and_resumes() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page(), &mut host);

    site.handle(UiEvent::Click(ClickTarget::CarouselSlide(2)), &mut host);
    let carousel = site.carousel().unwrap();
    assert!(carousel.is_modal_open());
    assert_eq!(carousel.state(), CarouselState::Paused);
    assert!(host.modal.is_some());

    site.handle(UiEvent::Click(ClickTarget::CarouselModalBackdrop), &mut host);
    let carousel = site.carousel().unwrap();
    assert!(!carousel.is_modal_open());
    assert_eq!(carousel.state(), CarouselState::Playing);
    assert!(host.modal.is_none());
}

#[test]
fn test_carousel_height_follows_current_photo() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page(), &mut host);
    let src = site.carousel().unwrap().current().unwrap().src.clone();

    let stale = UiEvent::ImageLoaded {
        src: "elsewhere.jpg".to_string(),
        natural_width: 1000.0,
        natural_height: 500.0,
    };
    assert_eq!(site.handle(stale, &mut host), Response::Ignored);
    assert_eq!(host.carousel_height, None);

    let loaded = UiEvent::ImageLoaded {
        src,
        natural_width: 1000.0,
        natural_height: 500.0,
    };
    assert_eq!(site.handle(loaded, &mut host), Response::Handled);
    assert_eq!(host.carousel_height, Some(500.0));
}

#[test]
fn test_resize_is_debounced() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page(), &mut host);
    site.handle(UiEvent::Click(ClickTarget::CarouselPlayPause), &mut host);
    let requested = host.requested_sizes.len();

    site.handle(UiEvent::Resize, &mut host);
    run(&mut site, &mut host, 100);
    site.handle(UiEvent::Resize, &mut host);
    run(&mut site, &mut host, 200);
    assert_eq!(host.requested_sizes.len(), requested);

    run(&mut site, &mut host, 50);
    assert_eq!(host.requested_sizes.len(), requested + 1);
}

#[test]
fn test_publication_search_is_debounced() {
    let mut host = RecordingHost::new();
    let mut site = start(&publications_page(), &mut host);

    site.handle(UiEvent::SearchInput("zebra".to_string()), &mut host);
    assert_eq!(site.publications().unwrap().visible_count(), 3);

    run(&mut site, &mut host, 300);
    assert_eq!(site.publications().unwrap().visible_count(), 1);
    assert_eq!(host.results, Some(("Showing 1 publication".to_string(), false)));
}

#[test]
fn test_publication_filter_and_clear() {
    let mut host = RecordingHost::new();
    let mut site = start(&publications_page(), &mut host);

    let year = UiEvent::FilterChanged {
        control: FilterControl::Year,
        value: "2019".to_string(),
    };
    site.handle(year, &mut host);
    assert_eq!(site.publications().unwrap().visible_count(), 2);

    site.handle(UiEvent::Click(ClickTarget::ClearFilters), &mut host);
    assert_eq!(site.publications().unwrap().visible_count(), 3);
}

#[test]
fn test_publication_activation_opens_link() {
    let mut host = RecordingHost::new();
    let mut site = start(&publications_page(), &mut host);
    let expected = Response::OpenUrl("https://doi.org/10.1/zebra".to_string());

    let enter = KeyPress::new(Key::Enter).on(Focus::Publication(0));
    assert_eq!(site.handle(UiEvent::Key(enter), &mut host), expected);
    assert_eq!(site.handle(UiEvent::Click(ClickTarget::Publication(0)), &mut host), expected);

    let other_key = KeyPress::new(Key::ArrowLeft).on(Focus::Publication(0));
    assert_eq!(site.handle(UiEvent::Key(other_key), &mut host), Response::Ignored);
}

#[test]
fn test_events_without_controllers_are_ignored() {
    let mut host = RecordingHost::new();
    let mut site = start(&PageSnapshot::new("/index.html"), &mut host);

    assert_eq!(site.handle(UiEvent::Click(ClickTarget::LoadMore), &mut host), Response::Ignored);
    assert_eq!(site.handle(UiEvent::SearchInput("x".to_string()), &mut host), Response::Ignored);
    assert_eq!(site.handle(UiEvent::CvFailed, &mut host), Response::Ignored);
    assert_eq!(
        site.handle(UiEvent::Click(ClickTarget::AnchorLink(0)), &mut host),
        Response::PreventDefault
    );
}

#[test]
fn test_unload_cancels_all_timers() {
    let mut host = RecordingHost::new();
    let mut site = start(&gallery_page().with_element(ElementId::GalleryLoading), &mut host);
    site.handle(UiEvent::Resize, &mut host);
    site.handle(UiEvent::Click(ClickTarget::LoadMore), &mut host);
    assert!(host.scheduler.active_count() > 0);

    site.handle(UiEvent::Unload, &mut host);
    assert_eq!(host.scheduler.active_count(), 0);
}

proptest! {
    #[test]
    fn prop_carousel_next_wraps(clicks in 0usize..40) {
        let mut host = RecordingHost::new();
        let mut site = start(&gallery_page(), &mut host);
        for _ in 0..clicks {
            site.handle(UiEvent::Click(ClickTarget::CarouselNext), &mut host);
        }
        prop_assert_eq!(site.carousel().unwrap().index(), clicks % 6);
    }
}
