use std::io;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Every direction, for iteration.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector in screen space (y grows downward).
    #[must_use]
    pub fn vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

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
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    TogglePause,
    SpeedUp,
    SpeedDown,
    Quit,
}

/// Resolves a heading request against the committed heading.
///
/// A direct reversal is dropped and the current heading is returned instead.
#[must_use]
pub fn arbitrate(current: Direction, requested: Direction) -> Direction {
    if requested == current.opposite() {
        current
    } else {
        requested
    }
}

/// Translates a terminal key event into a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(GameInput::Quit);
    }

    // Shift and caps lock only change the case of letter keys.
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match code {
        KeyCode::Esc | KeyCode::Char('q') => Some(GameInput::Quit),
        KeyCode::Up | KeyCode::Char('w') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char('p') => Some(GameInput::TogglePause),
        KeyCode::Char('+' | '=') => Some(GameInput::SpeedUp),
        KeyCode::Char('-') => Some(GameInput::SpeedDown),
        _ => None,
    }
}

/// Reads terminal events and turns them into game inputs.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a handler reading from the process terminal.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Collects every input that arrives before `deadline`, in arrival order.
    ///
    /// Blocks until the deadline passes or a quit request is seen.
    pub fn collect_until(&mut self, deadline: Instant) -> io::Result<Vec<GameInput>> {
        let mut inputs = Vec::new();

        loop {
            let wait = deadline.saturating_duration_since(Instant::now());
            if wait.is_zero() || !event::poll(wait)? {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    inputs.push(input);
                    if input == GameInput::Quit {
                        break;
                    }
                }
            }
        }

        Ok(inputs)
    }
}
