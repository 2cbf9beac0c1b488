//! Menu loop state: the game plus everything the screen shows around it

use crate::game::GameState;
use crate::input::{Command, KeyBindings};
use crate::settings::Settings;
use crossterm::event::KeyEvent;
use std::collections::VecDeque;

/// One line in the status history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub success: bool,
}

/// Application state owned by the menu loop
pub struct App {
    pub game: GameState,
    pub bindings: KeyBindings,
    /// Most recent status first
    history: VecDeque<StatusLine>,
    history_len: usize,
    pub show_colors: bool,
    pub quit: bool,
}

impl App {
    /// Deal a new game configured from settings
    pub fn new(settings: &Settings) -> Self {
        let game = match settings.generator.seed {
            Some(seed) => GameState::with_seed(seed),
            None => GameState::new(),
        };
        Self::with_game(game, settings)
    }

    pub fn with_game(game: GameState, settings: &Settings) -> Self {
        let history_len = settings.visual.history_len.max(1);
        Self {
            game,
            bindings: KeyBindings::from_settings(settings),
            history: VecDeque::with_capacity(history_len),
            history_len,
            show_colors: settings.visual.show_colors,
            quit: false,
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(command) = self.bindings.command(key) {
            self.handle_command(command);
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Act(action) => {
                let report = self.game.apply(action);
                self.push_status(report.to_string(), report.is_success());
            }
            Command::Quit => {
                tracing::info!("Quit requested");
                self.quit = true;
            }
            Command::Invalid(c) => {
                tracing::debug!("Invalid option {:?}", c);
                self.push_status(format!("Invalid option '{}'!", c), false);
            }
        }
    }

    fn push_status(&mut self, text: String, success: bool) {
        if self.history.len() == self.history_len {
            self.history.pop_back();
        }
        self.history.push_front(StatusLine { text, success });
    }

    /// The latest status line
    pub fn status(&self) -> Option<&StatusLine> {
        self.history.front()
    }

    /// Status lines, newest first
    pub fn history(&self) -> impl Iterator<Item = &StatusLine> {
        self.history.iter()
    }
}
