//! Key bindings.

use crate::types::{GameAction, Phase};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the runner to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Action(GameAction),
    Quit,
}

/// Letter bindings, matched case-insensitively
const LETTER_BINDINGS: &[(char, GameAction)] = &[
    ('h', GameAction::MoveLeft),
    ('a', GameAction::MoveLeft),
    ('l', GameAction::MoveRight),
    ('d', GameAction::MoveRight),
    ('j', GameAction::SoftDrop),
    ('s', GameAction::SoftDrop),
    ('k', GameAction::RotateCw),
    ('w', GameAction::RotateCw),
    ('z', GameAction::RotateCcw),
    ('y', GameAction::RotateCcw),
    ('c', GameAction::Hold),
    ('p', GameAction::Pause),
    ('r', GameAction::Restart),
];

/// Map a key to a game action, ignoring session phase.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char(ch) => {
            let ch = ch.to_ascii_lowercase();
            LETTER_BINDINGS
                .iter()
                .find(|(bound, _)| *bound == ch)
                .map(|&(_, action)| action)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Translate a terminal key event for a session in `phase`.
///
/// Releases are dropped. After game over, Enter and space start a new game.
pub fn translate(key: KeyEvent, phase: Phase) -> Option<InputCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(InputCommand::Quit);
    }
    if phase == Phase::GameOver && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
        return Some(InputCommand::Action(GameAction::Restart));
    }
    handle_key_event(key).map(InputCommand::Action)
}
