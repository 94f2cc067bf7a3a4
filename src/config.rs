//! User configuration: keybindings, tick rate and relay endpoint.
//!
//! Settings live in `$XDG_CONFIG_HOME/folio/settings.toml`
//! (default `~/.config/folio/settings.toml`).  Every key is optional:
//!
//! ```toml
//! tick_ms = 80
//! relay_endpoint = "https://api.web3forms.com/submit"
//!
//! [bindings]
//! scroll_down = ["Down", "j"]
//! toggle_theme = ["t"]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::relay::DEFAULT_ENDPOINT;

const DEFAULT_TICK_MS: u64 = 80;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    PrevSection,
    NextSection,
    PrevCard,
    NextCard,
    OpenProject,
    ToggleMenu,
    ToggleTheme,
    EditProjectRequest,
    EditContact,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help overlay and the
    /// settings file).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::PrevSection,
        Action::NextSection,
        Action::PrevCard,
        Action::NextCard,
        Action::OpenProject,
        Action::ToggleMenu,
        Action::ToggleTheme,
        Action::EditProjectRequest,
        Action::EditContact,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::Top => "Top of Page",
            Action::Bottom => "Bottom of Page",
            Action::PrevSection => "Previous Section",
            Action::NextSection => "Next Section",
            Action::PrevCard => "Previous Project",
            Action::NextCard => "Next Project",
            Action::OpenProject => "Open Project",
            Action::ToggleMenu => "Toggle Menu",
            Action::ToggleTheme => "Toggle Theme",
            Action::EditProjectRequest => "Fill Project Form",
            Action::EditContact => "Fill Contact Form",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the settings file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::PrevSection => "prev_section",
            Action::NextSection => "next_section",
            Action::PrevCard => "prev_card",
            Action::NextCard => "next_card",
            Action::OpenProject => "open_project",
            Action::ToggleMenu => "toggle_menu",
            Action::ToggleTheme => "toggle_theme",
            Action::EditProjectRequest => "edit_project_request",
            Action::EditContact => "edit_contact",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Named keys: (settings-file name, on-screen glyph, code).
const NAMED_KEYS: &[(&str, &str, KeyCode)] = &[
    ("Up", "↑", KeyCode::Up),
    ("Down", "↓", KeyCode::Down),
    ("Left", "←", KeyCode::Left),
    ("Right", "→", KeyCode::Right),
    ("Enter", "Enter", KeyCode::Enter),
    ("Esc", "Esc", KeyCode::Esc),
    ("Tab", "Tab", KeyCode::Tab),
    ("BackTab", "Shift+Tab", KeyCode::BackTab),
    ("Backspace", "Bksp", KeyCode::Backspace),
    ("Home", "Home", KeyCode::Home),
    ("End", "End", KeyCode::End),
    ("PageUp", "PgUp", KeyCode::PageUp),
    ("PageDown", "PgDn", KeyCode::PageDown),
    ("Space", "Space", KeyCode::Char(' ')),
];

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT are
    /// compared, and SHIFT is ignored for character keys and BackTab since
    /// the key itself already implies it.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = Self::MODIFIER_MASK;
        if matches!(self.code, KeyCode::Char(_) | KeyCode::BackTab) {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        s
    }

    /// User-friendly display string (e.g. `"↓"`, `"Ctrl+c"`, `"t"`).
    pub fn display(&self) -> String {
        let key = match NAMED_KEYS.iter().find(|(_, _, code)| *code == self.code) {
            Some((_, glyph, _)) => glyph.to_string(),
            None => self.code_name(),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Settings-file form (e.g. `"Down"`, `"Ctrl+c"`).
    fn to_config_string(&self) -> String {
        let key = match NAMED_KEYS.iter().find(|(_, _, code)| *code == self.code) {
            Some((name, _, _)) => name.to_string(),
            None => self.code_name(),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    fn code_name(&self) -> String {
        match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').collect();
        // A bare "+" splits into two empty strings.
        if s.ends_with('+') {
            parts.pop();
            parts.pop();
            parts.push("+");
        }
        let key_part = parts.pop()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let lower = key_part.to_lowercase();
        let code = if let Some((_, _, code)) = NAMED_KEYS
            .iter()
            .find(|(name, _, _)| name.to_lowercase() == lower)
        {
            *code
        } else if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            KeyCode::F(n)
        } else {
            let mut chars = key_part.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── settings file ─────

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk shape of `settings.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tick_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relay_endpoint: Option<String>,
    #[serde(default)]
    bindings: BTreeMap<String, Vec<String>>,
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Redraw/animation tick in milliseconds.
    pub tick_ms: u64,
    pub relay_endpoint: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            tick_ms: DEFAULT_TICK_MS,
            relay_endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let k = KeyBind::plain;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![k(Up), k(Char('k'))]);
        m.insert(ScrollDown, vec![k(Down), k(Char('j'))]);
        m.insert(Action::PageUp, vec![k(KeyCode::PageUp), k(Char('u'))]);
        m.insert(Action::PageDown, vec![k(KeyCode::PageDown), k(Char(' '))]);
        m.insert(Top, vec![k(Home), k(Char('g'))]);
        m.insert(Bottom, vec![k(End), k(Char('G'))]);
        m.insert(PrevSection, vec![k(Char('['))]);
        m.insert(NextSection, vec![k(Char(']'))]);
        m.insert(PrevCard, vec![k(BackTab), k(Left)]);
        m.insert(NextCard, vec![k(Tab), k(Right)]);
        m.insert(OpenProject, vec![k(Enter), k(Char('o'))]);
        m.insert(ToggleMenu, vec![k(Char('m'))]);
        m.insert(ToggleTheme, vec![k(Char('t'))]);
        m.insert(EditProjectRequest, vec![k(Char('p'))]);
        m.insert(EditContact, vec![k(Char('c'))]);
        m.insert(Quit, vec![k(Char('q'))]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, count)| mc > count) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// Format the binding list for a given action (e.g. `"↓/j"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(KeyBind::display).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// First binding only, for the status bar.
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load settings from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = settings_path();
        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(ConfigFileError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(e) => {
                tracing::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: SettingsFile = toml::from_str(&contents).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: SettingsFile) -> Self {
        let mut config = Self::default();
        if let Some(ms) = file.tick_ms {
            // Keep animation cadence in a sensible band.
            config.tick_ms = ms.clamp(16, 1000);
        }
        if let Some(endpoint) = file.relay_endpoint {
            config.relay_endpoint = endpoint;
        }
        for (key, values) in file.bindings {
            let Some(action) = Action::from_config_key(&key) else {
                tracing::warn!("unknown action '{key}' in settings");
                continue;
            };
            let parsed: Vec<KeyBind> = values.iter().filter_map(|v| KeyBind::parse(v)).collect();
            if parsed.len() != values.len() {
                tracing::warn!("some keys for '{key}' could not be parsed");
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }
        config
    }

    fn to_file(&self) -> SettingsFile {
        let bindings = Action::ALL
            .iter()
            .filter_map(|&action| {
                let binds = self.bindings.get(&action)?;
                let keys = binds.iter().map(KeyBind::to_config_string).collect();
                Some((action.config_key().to_string(), keys))
            })
            .collect();
        SettingsFile {
            tick_ms: Some(self.tick_ms),
            relay_endpoint: Some(self.relay_endpoint.clone()),
            bindings,
        }
    }

    /// Persist the settings to `path`.
    pub fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = toml::to_string_pretty(&self.to_file())?;
        std::fs::write(path, format!("# folio settings\n\n{body}"))?;
        Ok(())
    }
}

/// Return the folio config directory (`$XDG_CONFIG_HOME/folio`).
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    base.join(env!("CARGO_PKG_NAME"))
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}
