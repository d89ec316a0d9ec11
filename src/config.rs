//! User configuration: timings, layout scale, keybindings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/page-behavior/config.toml` (default
//! `~/.config/page-behavior/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::reveal::DEFAULT_REVEAL_THRESHOLD;
use crate::core::viewport::COMPACT_BREAKPOINT;

// ───────────────────────────────────────── actions ───────────

/// Configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    OpenMenu,
    OpenContact,
    /// Close the popup if it is open, otherwise the drawer.
    Dismiss,
    SwipeLeft,
    SwipeRight,
    PageUp,
    PageDown,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::OpenMenu,
        Action::OpenContact,
        Action::Dismiss,
        Action::SwipeLeft,
        Action::SwipeRight,
        Action::PageUp,
        Action::PageDown,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::OpenMenu => "open_menu",
            Action::OpenContact => "open_contact",
            Action::Dismiss => "dismiss",
            Action::SwipeLeft => "swipe_left",
            Action::SwipeRight => "swipe_right",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared; platform modifiers are ignored.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short label for the status bar (e.g. `"m"`, `"Esc"`, `"←"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            other => key_name(other),
        });
        s
    }

    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Left"`, `"q"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Widest viewport (px) that still counts as compact.
    pub compact_breakpoint: f64,
    /// Quiet period before a carousel scroll settles.
    pub scroll_quiet_ms: u64,
    /// Quiet period before a resize re-initializes the carousel.
    pub resize_quiet_ms: u64,
    /// Visible share that reveals a fade-in section.
    pub reveal_threshold: f64,
    /// Fraction of the remaining distance a smooth scroll covers per frame.
    pub smooth_scroll_speed: f64,
    /// Page pixels per terminal column / row.
    pub px_per_column: f64,
    pub px_per_row: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            compact_breakpoint: COMPACT_BREAKPOINT,
            scroll_quiet_ms: 50,
            resize_quiet_ms: 250,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            smooth_scroll_speed: 0.35,
            px_per_column: 8.0,
            px_per_row: 16.0,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(OpenMenu, vec![KeyBind::new(Char('m'), n)]);
        m.insert(OpenContact, vec![KeyBind::new(Char('c'), n)]);
        m.insert(Dismiss, vec![KeyBind::new(Esc, n)]);
        m.insert(SwipeLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(SwipeRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    pub fn scroll_quiet(&self) -> Duration {
        Duration::from_millis(self.scroll_quiet_ms)
    }

    pub fn resize_quiet(&self) -> Duration {
        Duration::from_millis(self.resize_quiet_ms)
    }

    /// Find the action bound to a key event.  When several match, the
    /// binding with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: menu | {}: contact | {}/{}: swipe | 1-9: dots | {}/{}: scroll | {}: close | {}: quit",
            self.short_binding(Action::OpenMenu),
            self.short_binding(Action::OpenContact),
            self.short_binding(Action::SwipeLeft),
            self.short_binding(Action::SwipeRight),
            self.short_binding(Action::PageUp),
            self.short_binding(Action::PageDown),
            self.short_binding(Action::Dismiss),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk and return where it went.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Values are clamped so a typo cannot freeze or break the page.
            match key {
                "compact_breakpoint" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.compact_breakpoint = v.clamp(320.0, 4096.0);
                    }
                    continue;
                }
                "scroll_quiet_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.scroll_quiet_ms = v.clamp(10, 1000);
                    }
                    continue;
                }
                "resize_quiet_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.resize_quiet_ms = v.clamp(10, 5000);
                    }
                    continue;
                }
                "reveal_threshold" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.reveal_threshold = v.clamp(0.0, 1.0);
                    }
                    continue;
                }
                "smooth_scroll_speed" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.smooth_scroll_speed = v.clamp(0.05, 1.0);
                    }
                    continue;
                }
                "px_per_column" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.px_per_column = v.clamp(1.0, 64.0);
                    }
                    continue;
                }
                "px_per_row" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.px_per_row = v.clamp(1.0, 128.0);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# page-behavior configuration".to_string(),
            String::new(),
            "# Behavior".to_string(),
            format!("compact_breakpoint = {}", self.compact_breakpoint),
            format!("scroll_quiet_ms = {}", self.scroll_quiet_ms),
            format!("resize_quiet_ms = {}", self.resize_quiet_ms),
            format!("reveal_threshold = {}", self.reveal_threshold),
            format!("smooth_scroll_speed = {}", self.smooth_scroll_speed),
            String::new(),
            "# Terminal cell size in page pixels".to_string(),
            format!("px_per_column = {}", self.px_per_column),
            format!("px_per_row = {}", self.px_per_row),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/page-behavior/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("page-behavior").join("config.toml")
}
