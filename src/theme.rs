//! Light/dark theme preference.
//!
//! The selected theme is kept in the [`THEME_SLOT`] as a JSON string,
//! `"light"` or `"dark"`. Anything else found there, or a slot that cannot
//! be read, means light.

use crate::storage::{SlotStore, THEME_SLOT};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses `light` or `dark`, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current theme, persisted on every change.
pub struct ThemeStore<P: SlotStore> {
    port: P,
    current: Theme,
}

impl<P: SlotStore> ThemeStore<P> {
    /// Reads the stored theme, defaulting to light.
    pub fn load(port: P) -> Self {
        let current = match port.load(THEME_SLOT) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|| {
                log::warn!("Unrecognized stored theme {:?}, using light", raw);
                Theme::Light
            }),
            Ok(None) => Theme::Light,
            Err(e) => {
                log::warn!("Theme unavailable, using light: {}", e);
                Theme::Light
            }
        };

        Self { port, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Selects `theme` and persists it.
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;

        let result = serde_json::to_string(&theme)
            .map_err(Into::into)
            .and_then(|json| self.port.save(THEME_SLOT, &json));

        if let Err(e) = result {
            log::warn!("Failed to persist theme: {}", e);
        }
    }

    /// Switches between light and dark and returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.set(next);
        next
    }
}

/// Accepts the JSON form and a bare word.
fn decode(raw: &str) -> Option<Theme> {
    serde_json::from_str::<Theme>(raw)
        .ok()
        .or_else(|| Theme::parse(raw))
}
