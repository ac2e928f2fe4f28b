//! Site entry point
//!
//! [`Site::initialize`] attaches every controller whose elements are on the
//! page, once. Afterwards [`Site::handle`] routes each [`UiEvent`] to the
//! controllers that own it.

use folio_domain::CategoryFilter;
use folio_links::Resolver;
use rand::Rng;

use crate::accessibility::{filter_announcement, trap_focus, Announcer};
use crate::carousel::Carousel;
use crate::config::{OfflineWorkerConfig, SiteConfig};
use crate::cv::CvEmbed;
use crate::error::Result;
use crate::event::{ClickTarget, Focus, Key, KeyPress, Observed, Response, UiEvent};
use crate::gallery::Gallery;
use crate::host::{OfflineWorker, SiteHost};
use crate::lazy_load::LazyLoader;
use crate::lightbox::Lightbox;
use crate::navigation::{highlight_active_links, NavigationController};
use crate::page::PageSnapshot;
use crate::publications::PublicationList;
use crate::scheduler::{Debouncer, TimerHandle};
use crate::scroll::ScrollEffects;
use crate::theme::ThemeController;

#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    theme: Option<ThemeController>,
    navigation: Option<NavigationController>,
    gallery: Option<Gallery>,
    lightbox: Option<Lightbox>,
    carousel: Option<Carousel>,
    publications: Option<PublicationList>,
    cv: Option<CvEmbed>,
    lazy_images: Option<LazyLoader>,
    scroll: ScrollEffects,
    announcer: Announcer,
    resize: Debouncer,
}

impl Site {
    /// Validate the configuration and attach every controller the page
    /// supports. `rng` drives the carousel sample.
    pub fn initialize<H, R>(config: SiteConfig, page: &PageSnapshot, rng: &mut R, host: &mut H) -> Result<Self>
    where
        H: SiteHost,
        R: Rng + ?Sized,
    {
        config.validate()?;

        let theme = ThemeController::attach(page, &config.theme, host);
        let navigation = NavigationController::attach(page);
        highlight_active_links(&page.path, &page.nav_links, host);

        let gallery = Gallery::attach(page, &config.timing, host);
        let lightbox = Lightbox::attach(page);
        let carousel = Carousel::attach(page, &config.carousel, rng, host);

        let resolver = Resolver::new(&config.links);
        let publications =
            PublicationList::attach(page, &config.publications, &config.timing, &resolver, host);

        let cv = CvEmbed::attach(page);
        let lazy_images = LazyLoader::attach(page);
        let scroll = ScrollEffects::attach(page, &config.timing, host);

        register_offline_worker(page, &config.offline_worker, host);

        let site = Self {
            announcer: Announcer::new(config.timing.announcement_clear()),
            resize: Debouncer::new(config.timing.resize_debounce()),
            theme,
            navigation,
            gallery,
            lightbox,
            carousel,
            publications,
            cv,
            lazy_images,
            scroll,
            config,
        };
        tracing::info!(
            path = %page.path,
            gallery = site.gallery.is_some(),
            carousel = site.carousel.is_some(),
            publications = site.publications.is_some(),
            cv = site.cv.is_some(),
            "site initialized"
        );
        Ok(site)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn theme(&self) -> Option<&ThemeController> {
        self.theme.as_ref()
    }

    pub fn navigation(&self) -> Option<&NavigationController> {
        self.navigation.as_ref()
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn publications(&self) -> Option<&PublicationList> {
        self.publications.as_ref()
    }

    pub fn cv(&self) -> Option<&CvEmbed> {
        self.cv.as_ref()
    }

    pub fn lazy_images(&self) -> Option<&LazyLoader> {
        self.lazy_images.as_ref()
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    pub fn handle<H: SiteHost>(&mut self, event: UiEvent, host: &mut H) -> Response {
        match event {
            UiEvent::Click(target) => self.on_click(target, host),
            UiEvent::Key(press) => self.on_key(press, host),
            UiEvent::SearchInput(text) => match self.publications.as_mut() {
                Some(publications) => {
                    publications.on_search_input(&text, host);
                    Response::Handled
                }
                None => Response::Ignored,
            },
            UiEvent::FilterChanged { control, value } => match self.publications.as_mut() {
                Some(publications) => {
                    publications.on_filter_changed(control, &value, host);
                    Response::Handled
                }
                None => Response::Ignored,
            },
            UiEvent::Scroll { offset_y } => Response::handled(self.scroll.on_scroll(offset_y, host)),
            UiEvent::Resize => {
                self.resize.trigger(host);
                Response::Handled
            }
            UiEvent::Timer(handle) => Response::handled(self.on_timer(handle, host)),
            UiEvent::Intersection { target, intersecting } => {
                let handled = match target {
                    Observed::LazyImage(image) => self
                        .lazy_images
                        .as_mut()
                        .is_some_and(|lazy| lazy.on_intersection(image, intersecting, host)),
                    Observed::FadeIn(card) => self.scroll.on_fade_in(card, intersecting, host),
                };
                Response::handled(handled)
            }
            UiEvent::ImageLoaded {
                src,
                natural_width,
                natural_height,
            } => Response::handled(
                self.carousel
                    .as_ref()
                    .is_some_and(|c| c.on_image_loaded(&src, natural_width, natural_height, host)),
            ),
            UiEvent::CvLoaded => match &self.cv {
                Some(cv) => {
                    cv.on_loaded();
                    Response::Handled
                }
                None => Response::Ignored,
            },
            UiEvent::CvFailed => match self.cv.as_mut() {
                Some(cv) => {
                    cv.on_failed(host);
                    Response::Handled
                }
                None => Response::Ignored,
            },
            UiEvent::FullscreenRejected(reason) => {
                tracing::warn!(%reason, "fullscreen request rejected");
                Response::Handled
            }
            UiEvent::WorkerRegistered(outcome) => {
                match outcome {
                    Ok(scope) => tracing::info!(%scope, "offline worker registered"),
                    Err(reason) => tracing::warn!(%reason, "offline worker registration failed"),
                }
                Response::Handled
            }
            UiEvent::UncaughtError(message) => {
                tracing::error!(%message, "uncaught page error");
                Response::Handled
            }
            UiEvent::Unload => {
                self.teardown(host);
                Response::Handled
            }
        }
    }

    /// Cancel every pending timer
    pub fn teardown<H: SiteHost>(&mut self, host: &mut H) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.teardown(host);
        }
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.teardown(host);
        }
        if let Some(publications) = self.publications.as_mut() {
            publications.teardown(host);
        }
        self.scroll.teardown(host);
        self.announcer.teardown(host);
        self.resize.cancel(host);
        tracing::debug!("site torn down");
    }

    fn on_click<H: SiteHost>(&mut self, target: ClickTarget, host: &mut H) -> Response {
        match target {
            ClickTarget::NavToggle => self.with_navigation(host, |nav, host| nav.toggle(host)),
            ClickTarget::NavLink(_) => self.with_navigation(host, |nav, host| nav.close(host)),
            ClickTarget::Document { inside_nav } => {
                self.with_navigation(host, |nav, host| nav.on_document_click(inside_nav, host))
            }
            ClickTarget::ThemeToggle => match self.theme.as_mut() {
                Some(theme) => {
                    theme.toggle(host);
                    Response::Handled
                }
                None => Response::Ignored,
            },
            ClickTarget::GalleryFilter { filter, label } => {
                let Some(gallery) = self.gallery.as_mut() else {
                    return Response::Ignored;
                };
                gallery.apply_filter(CategoryFilter::parse(&filter), host);
                self.announcer.announce(&filter_announcement(&label), host);
                Response::Handled
            }
            ClickTarget::GalleryTile(tile) => {
                let (Some(gallery), Some(lightbox)) = (self.gallery.as_ref(), self.lightbox.as_mut()) else {
                    return Response::Ignored;
                };
                match gallery.visible_position(tile) {
                    Some(position) => {
                        lightbox.open(gallery.visible_images(), position, host);
                        Response::Handled
                    }
                    None => Response::Ignored,
                }
            }
            ClickTarget::LoadMore => match self.gallery.as_mut() {
                Some(gallery) => Response::handled(gallery.begin_load_more(host)),
                None => Response::Ignored,
            },
            ClickTarget::LightboxClose | ClickTarget::LightboxBackdrop => {
                self.with_lightbox(host, |lightbox, host| lightbox.close(host))
            }
            ClickTarget::LightboxPrev => self.with_lightbox(host, |lightbox, host| lightbox.previous(host)),
            ClickTarget::LightboxNext => self.with_lightbox(host, |lightbox, host| lightbox.next(host)),
            ClickTarget::CarouselPrev => self.with_carousel(host, |carousel, host| carousel.previous(host)),
            ClickTarget::CarouselNext => self.with_carousel(host, |carousel, host| carousel.next(host)),
            ClickTarget::CarouselPlayPause => self.with_carousel(host, |carousel, host| carousel.toggle(host)),
            ClickTarget::CarouselIndicator(index) => {
                self.with_carousel(host, |carousel, host| carousel.go_to(index as isize, host))
            }
            ClickTarget::CarouselSlide(index) => {
                self.with_carousel(host, |carousel, host| carousel.open_modal(index, host))
            }
            ClickTarget::CarouselModalClose | ClickTarget::CarouselModalBackdrop => {
                self.with_carousel(host, |carousel, host| carousel.close_modal(host))
            }
            ClickTarget::Publication(entry) => open_url(self.publications.as_ref().and_then(|p| p.activate(entry))),
            ClickTarget::SearchButton => match self.publications.as_mut() {
                Some(publications) => {
                    publications.search_now(host);
                    Response::Handled
                }
                None => Response::Ignored,
            },
            ClickTarget::ClearFilters => match self.publications.as_mut() {
                Some(publications) => {
                    publications.clear(host);
                    Response::Handled
                }
                None => Response::Ignored,
            },
            ClickTarget::CvFullscreen => match &self.cv {
                Some(cv) => {
                    cv.toggle_fullscreen(host);
                    Response::Handled
                }
                None => Response::Ignored,
            },
            ClickTarget::AnchorLink(link) => {
                self.scroll.on_anchor_click(link, host);
                Response::PreventDefault
            }
            ClickTarget::SkipLink => {
                if self.scroll.on_skip_link(host) {
                    Response::PreventDefault
                } else {
                    Response::Ignored
                }
            }
        }
    }

    fn on_key<H: SiteHost>(&mut self, press: KeyPress, host: &mut H) -> Response {
        let lightbox_open = self.lightbox.as_ref().is_some_and(Lightbox::is_open);
        let modal_open = self.carousel.as_ref().is_some_and(Carousel::is_modal_open);

        if press.key == Key::Tab {
            if let Focus::ModalItem { index, count } = press.focus {
                if lightbox_open || modal_open {
                    if let Some(target) = trap_focus(index, count, press.shift) {
                        return Response::FocusModalItem(target);
                    }
                }
            }
            return Response::Ignored;
        }

        if let Focus::Publication(entry) = press.focus {
            let url = self.publications.as_ref().and_then(|p| p.handle_key(entry, press.key));
            if url.is_some() {
                return open_url(url);
            }
        }

        if lightbox_open {
            if let Some(lightbox) = self.lightbox.as_mut() {
                return Response::handled(lightbox.handle_key(press.key, host));
            }
        }
        if modal_open {
            if let Some(carousel) = self.carousel.as_mut() {
                return Response::handled(carousel.handle_key(press.key, host));
            }
        }
        Response::Ignored
    }

    fn on_timer<H: SiteHost>(&mut self, handle: TimerHandle, host: &mut H) -> bool {
        if self.resize.fire(handle) {
            self.on_resize(host);
            return true;
        }

        self.carousel.as_mut().is_some_and(|c| c.on_timer(handle, host))
            || self.gallery.as_mut().is_some_and(|g| g.on_timer(handle, host))
            || self.publications.as_mut().is_some_and(|p| p.on_timer(handle, host))
            || self.scroll.on_timer(handle)
            || self.announcer.on_timer(handle, host)
    }

    fn on_resize<H: SiteHost>(&mut self, host: &mut H) {
        if let Some(gallery) = &self.gallery {
            gallery.refresh_count(host);
            if let Some(lightbox) = self.lightbox.as_mut() {
                lightbox.refresh(gallery.visible_images());
            }
        }
        if let Some(carousel) = &self.carousel {
            carousel.adjust_height(host);
        }
    }

    fn with_navigation<H, F>(&mut self, host: &mut H, f: F) -> Response
    where
        H: SiteHost,
        F: FnOnce(&mut NavigationController, &mut H),
    {
        match self.navigation.as_mut() {
            Some(navigation) => {
                f(navigation, host);
                Response::Handled
            }
            None => Response::Ignored,
        }
    }

    fn with_lightbox<H, F>(&mut self, host: &mut H, f: F) -> Response
    where
        H: SiteHost,
        F: FnOnce(&mut Lightbox, &mut H),
    {
        match self.lightbox.as_mut() {
            Some(lightbox) => {
                f(lightbox, host);
                Response::Handled
            }
            None => Response::Ignored,
        }
    }

    fn with_carousel<H, F>(&mut self, host: &mut H, f: F) -> Response
    where
        H: SiteHost,
        F: FnOnce(&mut Carousel, &mut H),
    {
        match self.carousel.as_mut() {
            Some(carousel) => {
                f(carousel, host);
                Response::Handled
            }
            None => Response::Ignored,
        }
    }
}

fn open_url(url: Option<&str>) -> Response {
    url.map_or(Response::Ignored, |url| Response::OpenUrl(url.to_string()))
}

fn register_offline_worker<H: OfflineWorker>(page: &PageSnapshot, config: &OfflineWorkerConfig, host: &mut H) {
    if !config.enabled || !page.supports_offline_worker {
        return;
    }
    match host.register_offline_worker(&config.script_path) {
        Ok(()) => tracing::debug!(script = %config.script_path, "offline worker registration started"),
        Err(e) => tracing::warn!(error = %e, "offline worker registration failed"),
    }
}
