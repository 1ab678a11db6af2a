use std::time::Duration;

use crate::config::GameConfig;
use crate::input::{Direction, GameInput};

/// Host-owned pacing and lifecycle flags.
///
/// Lives in the outer loop and is passed by reference into each tick; the
/// simulation itself never mutates it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Controls {
    tick_rate: u32,
    min_tick_rate: u32,
    max_tick_rate: u32,
    paused: bool,
    running: bool,
}

impl Controls {
    /// Starts unpaused at the configured rate, forced into the speed bounds.
    ///
    /// Inverted bounds resolve to `max_tick_rate` rather than panicking.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tick_rate: config
                .tick_rate
                .max(config.min_tick_rate)
                .min(config.max_tick_rate),
            min_tick_rate: config.min_tick_rate,
            max_tick_rate: config.max_tick_rate,
            paused: false,
            running: true,
        }
    }

    /// Applies one host input and hands directional requests back to the caller.
    pub fn apply(&mut self, input: GameInput) -> Option<Direction> {
        match input {
            GameInput::Direction(direction) => return Some(direction),
            GameInput::TogglePause => {
                self.paused = !self.paused;
                log::debug!("paused: {}", self.paused);
            }
            GameInput::SpeedUp => {
                self.tick_rate = (self.tick_rate + 1).min(self.max_tick_rate);
                log::debug!("tick rate: {}/s", self.tick_rate);
            }
            GameInput::SpeedDown => {
                self.tick_rate = self.tick_rate.saturating_sub(1).max(self.min_tick_rate);
                log::debug!("tick rate: {}/s", self.tick_rate);
            }
            GameInput::Quit => self.running = false,
        }

        None
    }

    /// Wall-clock duration of one tick at the current rate.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// Current speed in ticks per second.
    #[must_use]
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Returns true while ticks are suspended.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns false once a quit request has been seen.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}
