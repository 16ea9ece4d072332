pub mod store;

use std::sync::OnceLock;

use colored::Color;

use store::{KeyValueStore, StoreError};

/// Key the theme preference is stored under.
pub const DARK_MODE_KEY: &str = "dark_mode";

static DISPLAY_CONFIG: OnceLock<DisplayConfig> = OnceLock::new();

/// Process-wide display preferences, read once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayConfig {
    pub dark_mode: bool,
}

/// Colors used by the table renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub heading: Color,
    pub negative: Color,
    pub unavailable: Color,
}

impl DisplayConfig {
    /// Read preferences from `store`. Unrecognised values fall back to light mode.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        let dark_mode = match store.get(DARK_MODE_KEY)? {
            Some(v) => parse_bool(&v).unwrap_or_else(|| {
                tracing::warn!(value = %v, "ignoring unrecognised dark_mode setting");
                false
            }),
            None => false,
        };
        Ok(Self { dark_mode })
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" })
    }

    pub fn theme_name(&self) -> &'static str {
        if self.dark_mode {
            "dark"
        } else {
            "light"
        }
    }

    pub fn palette(&self) -> Palette {
        if self.dark_mode {
            Palette {
                heading: Color::BrightCyan,
                negative: Color::BrightRed,
                unavailable: Color::BrightYellow,
            }
        } else {
            Palette {
                heading: Color::Blue,
                negative: Color::Red,
                unavailable: Color::Magenta,
            }
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Install the process-wide configuration. Only the first call has any effect.
pub fn init(config: DisplayConfig) -> &'static DisplayConfig {
    DISPLAY_CONFIG.get_or_init(|| config)
}

/// Current configuration, or the default when [`init`] has not run.
pub fn get() -> DisplayConfig {
    DISPLAY_CONFIG.get().copied().unwrap_or_default()
}
