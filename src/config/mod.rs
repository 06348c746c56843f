pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Playback progress (in percent of the container) at or above which an
/// entry counts as watched.
pub const DEFAULT_THRESHOLD: u8 = 75;

/// User settings, owned by the host's settings storage and read-only to the
/// pipeline. Every field falls back to its default when absent, and the
/// whole struct falls back to [`Settings::default`] when the store is
/// unavailable or corrupt, so settings can never block initialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Master switch. When off, attaching to a page performs no scan and
    /// installs no observer.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Watched threshold in percent, `0..=100`.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    #[serde(default = "default_true")]
    pub require_confirmation: bool,
    #[serde(default = "default_true")]
    pub enable_toast: bool,
    #[serde(default = "default_true")]
    pub auto_rescan_after_cleaning: bool,
    /// Override for the host's localization collaborator; stored here, read
    /// by the host.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

fn default_language() -> String {
    "en".to_string()
}

impl Settings {
    pub fn load() -> Result<Self> {
        settings::load_settings(None)
    }

    /// Replaces an out-of-range threshold with the default.
    pub fn sanitize(&mut self) {
        if self.threshold > 100 {
            tracing::warn!(
                "Threshold {} out of range, falling back to {}",
                self.threshold,
                DEFAULT_THRESHOLD
            );
            self.threshold = DEFAULT_THRESHOLD;
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_THRESHOLD,
            require_confirmation: true,
            enable_toast: true,
            auto_rescan_after_cleaning: true,
            language: "en".to_string(),
        }
    }
}
