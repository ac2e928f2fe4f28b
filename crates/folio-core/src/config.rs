//! Configuration for folio-core
//!
//! Timing constants, carousel sizing, theme persistence, and link resolution
//! settings. Every group has defaults matching the published site, so a
//! partial JSON or TOML document only needs the values it overrides.

use std::time::Duration;

use folio_domain::Theme;
use folio_links::ResolverConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Site-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Carousel sampling, timing, and sizing
    pub carousel: CarouselConfig,
    /// Debounce, throttle, and feedback delays
    pub timing: TimingConfig,
    /// Theme persistence
    pub theme: ThemeConfig,
    /// Publication filter settings
    pub publications: PublicationsConfig,
    /// Publication link resolution
    pub links: ResolverConfig,
    /// Offline worker registration
    pub offline_worker: OfflineWorkerConfig,
}

/// Carousel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Maximum number of photos sampled from the gallery
    pub sample_size: usize,
    /// Time each slide is shown while playing, in milliseconds
    pub advance_interval_ms: u64,
    /// Progress bar update period, in milliseconds
    pub progress_tick_ms: u64,
    /// Smallest carousel height in pixels
    pub min_height_px: f64,
    /// Largest carousel height in pixels
    pub max_height_px: f64,
    /// Largest share of the viewport height the carousel may take
    pub max_viewport_fraction: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            sample_size: 20,
            advance_interval_ms: 5000,
            progress_tick_ms: 100,
            min_height_px: 300.0,
            max_height_px: 800.0,
            max_viewport_fraction: 0.8,
        }
    }
}

impl CarouselConfig {
    pub fn advance_interval(&self) -> Duration {
        Duration::from_millis(self.advance_interval_ms)
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }
}

/// Delays for debounced, throttled, and transient behavior (milliseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub search_debounce_ms: u64,
    pub resize_debounce_ms: u64,
    pub scroll_throttle_ms: u64,
    /// How long an announcement stays in the live region
    pub announcement_clear_ms: u64,
    /// How long the gallery loading spinner stays up
    pub gallery_spinner_ms: u64,
    /// How long the load-more button reports loading
    pub load_more_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: 300,
            resize_debounce_ms: 250,
            scroll_throttle_ms: 100,
            announcement_clear_ms: 1000,
            gallery_spinner_ms: 1000,
            load_more_ms: 2000,
        }
    }
}

impl TimingConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }

    pub fn announcement_clear(&self) -> Duration {
        Duration::from_millis(self.announcement_clear_ms)
    }

    pub fn gallery_spinner(&self) -> Duration {
        Duration::from_millis(self.gallery_spinner_ms)
    }

    pub fn load_more(&self) -> Duration {
        Duration::from_millis(self.load_more_ms)
    }
}

/// Theme persistence configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Store key holding the saved theme
    pub storage_key: String,
    /// Theme used when nothing valid is stored
    pub default_theme: Theme,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            default_theme: Theme::Dark,
        }
    }
}

/// Publication list configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationsConfig {
    /// The "older" year filter matches years before this one
    pub older_than: i32,
}

impl Default for PublicationsConfig {
    fn default() -> Self {
        Self { older_than: 2020 }
    }
}

/// Offline worker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineWorkerConfig {
    /// Register the worker when the platform supports it
    pub enabled: bool,
    /// Worker script path
    pub script_path: String,
}

impl Default for OfflineWorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            script_path: "/sw.js".to_string(),
        }
    }
}

impl SiteConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let carousel = &self.carousel;

        if carousel.sample_size == 0 {
            return Err(ConfigError::OutOfRange(
                "carousel.sample_size must be positive".to_string(),
            ));
        }

        if carousel.advance_interval_ms == 0 || carousel.progress_tick_ms == 0 {
            return Err(ConfigError::OutOfRange(
                "carousel intervals must be positive".to_string(),
            ));
        }

        if carousel.progress_tick_ms > carousel.advance_interval_ms {
            return Err(ConfigError::InvalidBounds(
                "carousel.progress_tick_ms must not exceed advance_interval_ms".to_string(),
            ));
        }

        if !(carousel.min_height_px > 0.0 && carousel.min_height_px <= carousel.max_height_px) {
            return Err(ConfigError::InvalidBounds(
                "carousel heights must satisfy 0 < min_height_px <= max_height_px".to_string(),
            ));
        }

        if !(carousel.max_viewport_fraction > 0.0 && carousel.max_viewport_fraction <= 1.0) {
            return Err(ConfigError::OutOfRange(
                "carousel.max_viewport_fraction must be in (0, 1]".to_string(),
            ));
        }

        let timing = &self.timing;
        let delays = [
            ("search_debounce_ms", timing.search_debounce_ms),
            ("resize_debounce_ms", timing.resize_debounce_ms),
            ("scroll_throttle_ms", timing.scroll_throttle_ms),
            ("announcement_clear_ms", timing.announcement_clear_ms),
            ("gallery_spinner_ms", timing.gallery_spinner_ms),
            ("load_more_ms", timing.load_more_ms),
        ];
        if let Some((name, _)) = delays.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::OutOfRange(format!("timing.{} must be positive", name)));
        }

        if self.theme.storage_key.is_empty() {
            return Err(ConfigError::OutOfRange(
                "theme.storage_key must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
