//! Light/dark theme state with persistence.

use std::fmt;
use std::str::FromStr;

use super::storage::KeyValueStore;

/// Storage key holding the persisted theme.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

/// Owns the current theme and the store it is persisted to.
pub struct ThemeController<S> {
    mode: ThemeMode,
    store: S,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Read the stored theme.  Absent or unrecognised values mean light.
    pub fn restore(store: S) -> Self {
        let mode = store
            .get(THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        tracing::debug!(%mode, "theme restored");
        Self { mode, store }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Use `mode` for this session without persisting it.
    pub fn set_session_override(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    /// Flip the theme and persist it.  A failed write still flips the
    /// in-memory theme.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.mode.as_str()) {
            tracing::warn!("failed to persist theme: {e}");
        }
        self.mode
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}
