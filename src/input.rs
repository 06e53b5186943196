use std::io;
use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};

use crate::controls::SharedControls;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub(crate) fn to_bits(self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Up,
            1 => Self::Down,
            2 => Self::Left,
            _ => Self::Right,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    TogglePause,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// A blocking source of game inputs.
///
/// `Ok(None)` means the source is exhausted and no further input will
/// arrive.
pub trait InputSource {
    fn next_input(&mut self) -> io::Result<Option<GameInput>>;
}

/// Maps one key press to a game input. Unknown keys map to `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('w' | 'W') | KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Char('s' | 'S') | KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Char('a' | 'A') | KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Char('d' | 'D') | KeyCode::Right => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Char('p' | 'P' | ' ') => Some(GameInput::TogglePause),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// Reads key events from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_input(&mut self) -> io::Result<Option<GameInput>> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    return Ok(Some(input));
                }
                debug!("ignoring key {:?}", key.code);
            }
        }
    }
}

/// Feeds inputs from `source` into `controls` until quit or exhaustion.
///
/// Runs on its own thread; it only ever touches the shared controls.
pub fn listen<S: InputSource>(source: &mut S, controls: &Arc<SharedControls>) -> io::Result<()> {
    while controls.is_live() {
        let Some(input) = source.next_input()? else {
            return Ok(());
        };

        match input {
            GameInput::Direction(direction) => {
                if !controls.request_direction(direction) {
                    debug!("rejected reversal to {direction:?}");
                }
            }
            GameInput::TogglePause => {
                let paused = controls.toggle_pause();
                info!("pause toggled, paused={paused}");
            }
            GameInput::Quit => {
                info!("quit requested");
                controls.shut_down();
                return Ok(());
            }
        }
    }

    Ok(())
}
