//! Key handling for the action menu
//!
//! Every press maps to at most one command; there is no key repeat to track
//! because each action is a discrete turn.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the menu loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run a transfer action
    Act(Action),
    /// Leave the game
    Quit,
    /// A character key with nothing bound to it
    Invalid(char),
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub play: Vec<KeyCode>,
    pub reserve: Vec<KeyCode>,
    pub use_reserved: Vec<KeyCode>,
    pub swap_front: Vec<KeyCode>,
    pub swap_block: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

/// Binding slots in `slot`/`slot_mut` order, as named in `[keys]`
const SLOT_NAMES: [&str; 6] = [
    "play",
    "reserve",
    "use_reserved",
    "swap_front",
    "swap_block",
    "quit",
];

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        tracing::warn!("Unknown key binding {:?}, ignoring", s);
                        return None;
                    }
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    fn parse_settings(settings: &Settings) -> Self {
        Self {
            play: Self::parse_keys(&settings.keys.play),
            reserve: Self::parse_keys(&settings.keys.reserve),
            use_reserved: Self::parse_keys(&settings.keys.use_reserved),
            swap_front: Self::parse_keys(&settings.keys.swap_front),
            swap_block: Self::parse_keys(&settings.keys.swap_block),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// Create keybindings from settings
    ///
    /// A key the user configured for a slot, beyond that slot's defaults,
    /// is taken away from every other slot, so `reserve = "1"` really makes
    /// `1` reserve instead of leaving it on play.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut bindings = Self::parse_settings(settings);
        let defaults = Self::parse_settings(&Settings::default());

        for owner in 0..SLOT_NAMES.len() {
            let claimed: Vec<KeyCode> = bindings
                .slot(owner)
                .iter()
                .filter(|&key| !defaults.slot(owner).contains(key))
                .copied()
                .collect();
            for key in claimed {
                for other in (0..SLOT_NAMES.len()).filter(|&i| i != owner) {
                    let keys = bindings.slot_mut(other);
                    if keys.contains(&key) {
                        keys.retain(|k| *k != key);
                        tracing::info!(
                            "Key {} moved from {} to {}",
                            key_label(key),
                            SLOT_NAMES[other],
                            SLOT_NAMES[owner]
                        );
                    }
                }
            }
        }
        bindings
    }

    fn slot(&self, index: usize) -> &[KeyCode] {
        match index {
            0 => &self.play,
            1 => &self.reserve,
            2 => &self.use_reserved,
            3 => &self.swap_front,
            4 => &self.swap_block,
            _ => &self.quit,
        }
    }

    fn slot_mut(&mut self, index: usize) -> &mut Vec<KeyCode> {
        match index {
            0 => &mut self.play,
            1 => &mut self.reserve,
            2 => &mut self.use_reserved,
            3 => &mut self.swap_front,
            4 => &mut self.swap_block,
            _ => &mut self.quit,
        }
    }

    /// Keys bound to an action
    pub fn keys_for(&self, action: Action) -> &[KeyCode] {
        match action {
            Action::Play => &self.play,
            Action::Reserve => &self.reserve,
            Action::UseReserved => &self.use_reserved,
            Action::SwapFrontTop => &self.swap_front,
            Action::SwapBlock => &self.swap_block,
        }
    }

    /// Map a key press to a command
    pub fn command(&self, key: KeyEvent) -> Option<Command> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = normalize_key(key.code);
        if self.quit.contains(&code) {
            return Some(Command::Quit);
        }
        if let Some(action) = Action::all()
            .iter()
            .copied()
            .find(|&action| self.keys_for(action).contains(&code))
        {
            return Some(Command::Act(action));
        }

        // Digits always reach the numbered menu, unless rebound above
        match code {
            KeyCode::Char('0') => Some(Command::Quit),
            KeyCode::Char(c) => {
                let choice = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                match choice.and_then(Action::from_choice) {
                    Some(action) => Some(Command::Act(action)),
                    None => Some(Command::Invalid(c)),
                }
            }
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Display name for a key, as shown in the menu
pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        _ => "?".to_string(),
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
