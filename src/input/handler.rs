use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press means while the board has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Restart,
    SaveScore,
    ViewScores,
    ClearScores,
    CloseScores,
    Quit,
    /// Consumed without effect (space must never restart the game)
    Swallowed,
    None,
}

/// What a key press means while the name prompt is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
    Ignore,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if is_ctrl_c(&key) {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            KeyCode::Char(' ') => KeyAction::Swallowed,

            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::SaveScore,
            KeyCode::Char('v') | KeyCode::Char('V') => KeyAction::ViewScores,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::ClearScores,
            KeyCode::Char('b') | KeyCode::Char('B') => KeyAction::CloseScores,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    pub fn handle_prompt_key(&self, key: KeyEvent) -> PromptKey {
        if is_ctrl_c(&key) {
            return PromptKey::Cancel;
        }

        match key.code {
            KeyCode::Enter => PromptKey::Submit,
            KeyCode::Esc => PromptKey::Cancel,
            KeyCode::Backspace => PromptKey::Backspace,
            KeyCode::Char(c) if !c.is_control() => PromptKey::Insert(c),
            _ => PromptKey::Ignore,
        }
    }

    /// `Some(true)` confirms, `Some(false)` declines, `None` keeps asking
    pub fn handle_confirm_key(&self, key: KeyEvent) -> Option<bool> {
        if is_ctrl_c(&key) {
            return Some(false);
        }

        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
