//! Browser adapters
//!
//! Pieces of a browser host that need `web-sys`: theme persistence in
//! `localStorage`, the `data-theme` attribute and toggle icon, publication
//! entry decoration, offline worker registration, and a seeded RNG for the
//! carousel sample. `initTheme` and `toggleTheme` are exported to JS.

use folio_domain::{tooltip_css_value, LinkResolution, Theme};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlElement, Storage};

use crate::config::ThemeConfig;
use crate::error::{HostError, StorageError};
use crate::page::ElementId;
use crate::storage::KeyValueStore;
use crate::theme::load_theme;

/// `window.localStorage`
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    /// Storage can be disabled or missing; every operation then fails with
    /// `StorageError::Unavailable`.
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStorage {
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}

/// Set or remove `data-theme` on the document element and swap the toggle
/// icon. Light is the unattributed default.
pub fn apply_document_theme(theme: Theme) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if let Some(root) = document.document_element() {
        let result = match theme.document_attribute() {
            Some(value) => root.set_attribute("data-theme", value),
            None => root.remove_attribute("data-theme"),
        };
        if let Err(e) = result {
            tracing::warn!(error = ?e, "could not update data-theme");
        }
    }

    let icon_id = ElementId::ThemeIcon.selector().trim_start_matches('#');
    if let Some(icon) = document.get_element_by_id(icon_id) {
        icon.set_text_content(Some(theme.icon()));
    }
}

/// Apply the stored theme, returning its name
#[wasm_bindgen(js_name = initTheme)]
pub fn init_theme() -> String {
    let config = ThemeConfig::default();
    let theme = load_theme(&LocalStorage::new(), &config.storage_key, config.default_theme);
    apply_document_theme(theme);
    theme.as_str().to_string()
}

/// Flip, persist, and apply the theme, returning the new name
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> String {
    let config = ThemeConfig::default();
    let mut store = LocalStorage::new();
    let theme = load_theme(&store, &config.storage_key, config.default_theme).toggled();
    if let Err(e) = store.set_value(&config.storage_key, theme.as_str()) {
        tracing::warn!(error = %e, "could not persist theme");
    }
    apply_document_theme(theme);
    theme.as_str().to_string()
}

/// Mark a publication entry clickable and attach its tooltip
pub fn decorate_publication(entry: &Element, link: &LinkResolution) {
    let aria_label = link.aria_label();
    for (name, value) in [("tabindex", "0"), ("role", "button"), ("aria-label", aria_label.as_str())] {
        if let Err(e) = entry.set_attribute(name, value) {
            tracing::warn!(attribute = name, error = ?e, "could not decorate publication");
        }
    }

    if let Some(html) = entry.dyn_ref::<HtmlElement>() {
        let tooltip = tooltip_css_value(link.tooltip());
        if let Err(e) = html.style().set_property("--tooltip-text", &tooltip) {
            tracing::warn!(error = ?e, "could not set publication tooltip");
        }
    }
}

/// Register the offline worker script. The promise settles in the
/// background and its outcome is logged.
pub fn register_service_worker(script_path: &str) -> Result<(), HostError> {
    let window = web_sys::window().ok_or_else(|| HostError::Unsupported("no window".to_string()))?;
    let container = window.navigator().service_worker();
    if container.is_undefined() {
        return Err(HostError::Unsupported("service workers".to_string()));
    }

    let promise = container.register(script_path);
    let script = script_path.to_string();
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => tracing::info!(%script, "offline worker registered"),
            Err(e) => tracing::warn!(%script, error = ?e, "offline worker registration failed"),
        }
    });
    Ok(())
}

/// Carousel RNG seeded from `Math.random`
pub fn page_rng() -> SmallRng {
    SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}
