//! Key bindings for the interactive browser.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use guntar_core::browse::Action;

/// A key with its modifiers. `Shift` is folded into the character for
/// printable keys, so `G` and `Shift+g` are the same binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
        let code = match event.code {
            KeyCode::Char(c) => KeyCode::Char(c),
            other => {
                if event.modifiers.contains(KeyModifiers::SHIFT) {
                    modifiers |= KeyModifiers::SHIFT;
                }
                other
            }
        };
        Self { code, modifiers }
    }

    /// Parses names like `q`, `G`, `Enter`, `PageDown`, `Ctrl+c`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut modifiers = KeyModifiers::NONE;
        let mut key = s;

        while let Some((prefix, rest)) = key.split_once('+') {
            if rest.is_empty() {
                break;
            }
            modifiers |= match prefix.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => bail!("unknown modifier '{other}' in key '{s}'"),
            };
            key = rest;
        }

        let code = match key.to_ascii_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "enter" | "return" => KeyCode::Enter,
            "backspace" => KeyCode::Backspace,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(anyhow!("unknown key '{s}'")),
                }
            }
        };

        if let KeyCode::Char(c) = code
            && modifiers.contains(KeyModifiers::SHIFT)
        {
            modifiers.remove(KeyModifiers::SHIFT);
            return Ok(Self::new(
                KeyCode::Char(c.to_ascii_uppercase()),
                modifiers,
            ));
        }
        Ok(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "Shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::PageUp => write!(f, "PgUp"),
            KeyCode::PageDown => write!(f, "PgDn"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Esc => write!(f, "Esc"),
            KeyCode::Tab => write!(f, "Tab"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Mapping from keys to actions.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use KeyCode::*;

        let table: [(Action, &[KeyBinding]); 11] = [
            (Action::Up, &[KeyBinding::plain(Up), KeyBinding::plain(Char('k'))]),
            (Action::Down, &[KeyBinding::plain(Down), KeyBinding::plain(Char('j'))]),
            (Action::PageUp, &[KeyBinding::plain(PageUp), KeyBinding::plain(Char('b'))]),
            (Action::PageDown, &[KeyBinding::plain(PageDown), KeyBinding::plain(Char('f'))]),
            (Action::First, &[KeyBinding::plain(Home), KeyBinding::plain(Char('g'))]),
            (Action::Last, &[KeyBinding::plain(End), KeyBinding::plain(Char('G'))]),
            (
                Action::Open,
                &[
                    KeyBinding::plain(Enter),
                    KeyBinding::plain(Right),
                    KeyBinding::plain(Char('l')),
                ],
            ),
            (
                Action::Back,
                &[
                    KeyBinding::plain(Backspace),
                    KeyBinding::plain(Left),
                    KeyBinding::plain(Char('h')),
                    KeyBinding::plain(Esc),
                ],
            ),
            (
                Action::ToggleSelect,
                &[KeyBinding::plain(Char(' ')), KeyBinding::plain(Char('s'))],
            ),
            (Action::Extract, &[KeyBinding::plain(Char('x'))]),
            (Action::Quit, &[KeyBinding::plain(Char('q')), KeyBinding::ctrl('c')]),
        ];

        let bindings = table
            .into_iter()
            .flat_map(|(action, keys)| keys.iter().map(move |&k| (k, action)))
            .collect();
        Self { bindings }
    }
}

impl KeyMap {
    /// Applies overrides from the `[keys]` configuration table on top of the
    /// defaults. Each listed action replaces all of its default keys.
    pub fn with_overrides(overrides: &HashMap<String, Vec<String>>) -> Result<Self> {
        let mut map = Self::default();

        for (name, keys) in overrides {
            let action = Action::from_name(name)
                .ok_or_else(|| anyhow!("unknown action '{name}' in [keys]"))?;
            map.bindings.retain(|_, a| *a != action);
            for key in keys {
                let binding = KeyBinding::parse(key)?;
                if let Some(previous) = map.bindings.insert(binding, action) {
                    tracing::warn!(key = %binding, from = previous.name(), to = action.name(), "key rebound");
                }
            }
        }

        Ok(map)
    }

    /// Action bound to a key press.
    pub fn lookup(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    /// Keys bound to `action`, sorted for display.
    pub fn keys_for(&self, action: Action) -> Vec<KeyBinding> {
        let mut keys: Vec<KeyBinding> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_by_key(ToString::to_string);
        keys
    }

    /// First key bound to `action`, for compact help lines.
    pub fn hint(&self, action: Action) -> String {
        self.keys_for(action)
            .first()
            .map_or_else(|| "-".to_string(), ToString::to_string)
    }
}
