#![warn(clippy::all, clippy::pedantic)]

use crossterm::event::KeyCode;

use crate::memory_card::{CursorMove, MemoryCommand, MemoryPhase};
use crate::playfield::{Command, Phase};

/// Maps an in-game key press to a playfield command. Space starts a game
/// from the ready screen and hard-drops once one is running.
#[must_use]
pub fn command_for_key(code: KeyCode, phase: Phase) -> Option<Command> {
    match phase {
        Phase::Ready => match code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Start),
            _ => None,
        },
        Phase::GameOver => match code {
            KeyCode::Char('r' | 'R') | KeyCode::Enter => Some(Command::Restart),
            _ => None,
        },
        Phase::Running | Phase::Paused => match code {
            KeyCode::Left | KeyCode::Char('a') => Some(Command::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') => Some(Command::MoveRight),
            KeyCode::Up | KeyCode::Char('w') => Some(Command::Rotate),
            KeyCode::Down | KeyCode::Char('s') => Some(Command::SoftDrop),
            KeyCode::Char(' ') => Some(Command::HardDrop),
            KeyCode::Char('p' | 'P') => Some(Command::TogglePause),
            _ => None,
        },
    }
}

/// Memory-card keys. After a win only a new deal is accepted.
#[must_use]
pub fn memory_command_for_key(code: KeyCode, phase: MemoryPhase) -> Option<MemoryCommand> {
    let command = match code {
        KeyCode::Char('r' | 'R') => MemoryCommand::PlayAgain,
        KeyCode::Enter if phase == MemoryPhase::Won => MemoryCommand::PlayAgain,
        _ if phase == MemoryPhase::Won => return None,
        KeyCode::Up | KeyCode::Char('w') => MemoryCommand::Cursor(CursorMove::Up),
        KeyCode::Down | KeyCode::Char('s') => MemoryCommand::Cursor(CursorMove::Down),
        KeyCode::Left | KeyCode::Char('a') => MemoryCommand::Cursor(CursorMove::Left),
        KeyCode::Right | KeyCode::Char('d') => MemoryCommand::Cursor(CursorMove::Right),
        KeyCode::Enter | KeyCode::Char(' ') => MemoryCommand::Flip,
        _ => return None,
    };
    Some(command)
}
