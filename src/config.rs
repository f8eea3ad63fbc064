//! User configuration — keybindings, timings and the shell to run.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/termy/config.toml` (default `~/.config/termy/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::shell::ShellConfig;

// ───────────────────────────────────────── actions ───────────

/// Configurable actions.  Tree actions only fire while the file tree has
/// focus; the rest are global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Expand,
    Collapse,
    CdIntoDir,
    ToggleHidden,
    SwitchFocus,
    ClearOutput,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::Expand,
        Action::Collapse,
        Action::CdIntoDir,
        Action::ToggleHidden,
        Action::SwitchFocus,
        Action::ClearOutput,
        Action::Quit,
    ];

    /// Whether the action applies while typing in the command input.
    pub fn is_global(self) -> bool {
        matches!(self, Action::SwitchFocus | Action::ClearOutput | Action::Quit)
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Expand => "expand",
            Action::Collapse => "collapse",
            Action::CdIntoDir => "enter_dir",
            Action::ToggleHidden => "toggle_hidden",
            Action::SwitchFocus => "switch_focus",
            Action::ClearOutput => "clear_output",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MOD_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MOD_MASK) == (event.modifiers & MOD_MASK)
    }

    /// Short form for the status bar (e.g. `"Ctrl+q"`, `"↑"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            _ => key_name(self.code),
        });
        s
    }

    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
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
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ => {
                // Single char; keep the original case.
                let mut chars = key_part.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
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
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

pub const DEFAULT_POLL_MS: u64 = 1000;
pub const DEFAULT_FLASH_MS: u64 = 200;

pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Resource monitor refresh period.
    pub poll_ms: u64,
    /// How long a virtual key stays lit.
    pub flash_ms: u64,
    pub history_limit: usize,
    /// Output log capacity in lines.
    pub scrollback: usize,
    pub shell: ShellConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            poll_ms: DEFAULT_POLL_MS,
            flash_ms: DEFAULT_FLASH_MS,
            history_limit: 500,
            scrollback: 5000,
            shell: ShellConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Expand, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Collapse, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(CdIntoDir, vec![KeyBind::new(Enter, n)]);
        m.insert(ToggleHidden, vec![KeyBind::new(Char('.'), n)]);
        m.insert(SwitchFocus, vec![KeyBind::new(Tab, n)]);
        m.insert(ClearOutput, vec![KeyBind::new(Char('l'), ctrl)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), ctrl)]);

        m
    }

    /// Find the action bound to `event`; the binding with the most
    /// modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, b)| mc > b) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(a, _)| a)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status bar hint for the focused pane.
    pub fn status_bar_hint(&self, tree_focused: bool) -> String {
        if tree_focused {
            format!(
                "{}/{}: move | {}/{}: expand/collapse | {}: cd | {}: hidden | {}: input",
                self.short_binding(Action::MoveUp),
                self.short_binding(Action::MoveDown),
                self.short_binding(Action::Expand),
                self.short_binding(Action::Collapse),
                self.short_binding(Action::CdIntoDir),
                self.short_binding(Action::ToggleHidden),
                self.short_binding(Action::SwitchFocus),
            )
        } else {
            format!(
                "Enter: run | ↑/↓: history | PgUp/PgDn: scroll | {}: clear | {}: files | {}: quit",
                self.short_binding(Action::ClearOutput),
                self.short_binding(Action::SwitchFocus),
                self.short_binding(Action::Quit),
            )
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::parse(&contents)
            }
            Err(err) => {
                if path.exists() {
                    tracing::warn!("cannot read {}: {err}", path.display());
                }
                Self::default()
            }
        }
    }

    /// Write the config to disk and return where it went.
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
            let value = value.trim().trim_matches('"');

            match key {
                "poll_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.poll_ms = v.clamp(250, 10_000);
                    }
                    continue;
                }
                "flash_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.flash_ms = v.clamp(50, 2000);
                    }
                    continue;
                }
                "history_limit" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.history_limit = v.max(1);
                    }
                    continue;
                }
                "scrollback" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.scrollback = v.max(100);
                    }
                    continue;
                }
                "shell" => {
                    if let Some(shell) = ShellConfig::parse(value) {
                        config.shell = shell;
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("unknown config key `{key}`");
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
            "# termy configuration".to_string(),
            String::new(),
            format!("poll_ms = {}", self.poll_ms),
            format!("flash_ms = {}", self.flash_ms),
            format!("history_limit = {}", self.history_limit),
            format!("scrollback = {}", self.scrollback),
            format!("shell = \"{}\"", self.shell.display()),
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

fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("termy").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_bindings_resolve() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.match_key(key(KeyCode::Char('l'), KeyModifiers::NONE)),
            Some(Action::Expand)
        );
        assert_eq!(
            cfg.match_key(key(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            Some(Action::ClearOutput)
        );
        assert_eq!(cfg.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parses_settings_and_bindings() {
        let cfg = AppConfig::parse(
            "# comment\n\
             poll_ms = 50\n\
             flash_ms = 300\n\
             shell = \"bash -c\"\n\
             quit = Ctrl+x, F10\n\
             move_up = Alt+Up\n\
             bogus = q\n",
        );
        assert_eq!(cfg.poll_ms, 250);
        assert_eq!(cfg.flash_ms, 300);
        assert_eq!(cfg.shell.program, "bash");
        assert_eq!(
            cfg.bindings[&Action::Quit],
            vec![
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::F(10), KeyModifiers::NONE),
            ]
        );
        assert_eq!(
            cfg.match_key(key(KeyCode::Up, KeyModifiers::ALT)),
            Some(Action::MoveUp)
        );
        // Untouched actions keep their defaults.
        assert_eq!(cfg.bindings[&Action::CdIntoDir], vec![KeyBind::new(KeyCode::Enter, KeyModifiers::NONE)]);
    }

    #[test]
    fn serialised_config_reads_back() {
        let mut cfg = AppConfig::default();
        cfg.poll_ms = 2000;
        cfg.bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Char(' '), KeyModifiers::ALT)]);
        let back = AppConfig::parse(&cfg.serialise());
        assert_eq!(back.poll_ms, 2000);
        assert_eq!(back.shell, cfg.shell);
        assert_eq!(back.bindings, cfg.bindings);
    }

    #[test]
    fn status_hint_reflects_bindings() {
        let cfg = AppConfig::default();
        assert!(cfg.status_bar_hint(false).contains("Ctrl+q: quit"));
        assert!(cfg.status_bar_hint(true).contains("Enter: cd"));
    }
}
