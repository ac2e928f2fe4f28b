//! Light/dark theme with a persisted preference

use folio_domain::Theme;

use crate::config::ThemeConfig;
use crate::page::{ElementId, PageSnapshot};
use crate::storage::KeyValueStore;

/// Applying a theme: set or remove the document attribute and swap the
/// toggle icon (see [`Theme::document_attribute`] and [`Theme::icon`]).
pub trait ThemeView {
    fn apply_theme(&mut self, theme: Theme);
}

#[derive(Debug, Clone)]
pub struct ThemeController {
    storage_key: String,
    current: Theme,
}

impl ThemeController {
    /// Restore and apply the saved theme. Needs the toggle button and icon.
    pub fn attach<H>(page: &PageSnapshot, config: &ThemeConfig, host: &mut H) -> Option<Self>
    where
        H: KeyValueStore + ThemeView,
    {
        if !page.has_all(&[ElementId::ThemeToggle, ElementId::ThemeIcon]) {
            return None;
        }

        let current = load_theme(host, &config.storage_key, config.default_theme);
        host.apply_theme(current);
        Some(Self {
            storage_key: config.storage_key.clone(),
            current,
        })
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip, apply, and persist. A failed write is logged; the new theme
    /// still applies for this page.
    pub fn toggle<H>(&mut self, host: &mut H) -> Theme
    where
        H: KeyValueStore + ThemeView,
    {
        self.current = self.current.toggled();
        host.apply_theme(self.current);
        if let Err(e) = host.set_value(&self.storage_key, self.current.as_str()) {
            tracing::warn!(error = %e, "could not persist theme");
        }
        self.current
    }
}

/// The stored theme, or `default` when nothing valid is stored
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S, key: &str, default: Theme) -> Theme {
    match store.get_value(key) {
        Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring stored theme");
            default
        }),
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(error = %e, "could not read theme preference");
            default
        }
    }
}
