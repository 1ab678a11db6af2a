use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::Deserialize;
use thiserror::Error;

use crate::grid::GridSpace;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Screen width in pixels of the classic arcade board.
pub const DEFAULT_SCREEN_WIDTH: u16 = 640;

/// Screen height in pixels of the classic arcade board.
pub const DEFAULT_SCREEN_HEIGHT: u16 = 480;

/// Side length of one cell in pixels.
pub const DEFAULT_CELL_SIZE: u16 = 20;

/// Ticks per second at startup.
pub const DEFAULT_TICK_RATE: u32 = 10;

/// Slowest speed the host may select, in ticks per second.
pub const DEFAULT_MIN_TICK_RATE: u32 = 5;

/// Fastest speed the host may select, in ticks per second.
pub const DEFAULT_MAX_TICK_RATE: u32 = 20;

/// Default arcade grid: 32x24 cells of 20 pixels.
pub const DEFAULT_GRID: GridSpace = GridSpace::new(
    DEFAULT_SCREEN_WIDTH / DEFAULT_CELL_SIZE,
    DEFAULT_SCREEN_HEIGHT / DEFAULT_CELL_SIZE,
    DEFAULT_CELL_SIZE,
);

/// Fixed styling applied to every drawn cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    pub apple: Color,
    pub snake: Color,
    pub hud: Color,
}

/// Colors of the classic arcade board.
pub const PALETTE: Palette = Palette {
    background: Color::Rgb(0, 0, 0),
    border: Color::Rgb(93, 216, 228),
    apple: Color::Rgb(255, 0, 0),
    snake: Color::Rgb(0, 255, 0),
    hud: Color::Gray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// One grid cell is drawn two terminal columns wide so it looks square.
pub const GLYPH_CELL: &str = "██";

/// Blank glyph used to erase a vacated cell.
pub const GLYPH_EMPTY: &str = "  ";

/// Failure to load or validate startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Startup configuration, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSpace,
    pub tick_rate: u32,
    pub min_tick_rate: u32,
    pub max_tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID,
            tick_rate: DEFAULT_TICK_RATE,
            min_tick_rate: DEFAULT_MIN_TICK_RATE,
            max_tick_rate: DEFAULT_MAX_TICK_RATE,
        }
    }
}

impl Default for GridSpace {
    fn default() -> Self {
        DEFAULT_GRID
    }
}

impl GameConfig {
    /// Loads configuration from `path`, or from the platform config directory.
    ///
    /// A missing file at the default location yields the defaults; an
    /// explicitly requested file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => match config_path() {
                Some(path) if path.exists() => Self::from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a JSON document; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Checks that the grid is usable and the speed bounds are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid;
        if grid.width_cells == 0 || grid.height_cells == 0 || grid.cell_size == 0 {
            return Err(ConfigError::Invalid(
                "grid width, height and cell size must be non-zero".to_owned(),
            ));
        }
        if grid.total_cells() < 2 {
            return Err(ConfigError::Invalid(
                "grid needs at least two cells to hold the snake and the apple".to_owned(),
            ));
        }
        // Pixel extents plus one step past the edge are computed in i32.
        let fits = |cells: u16| {
            (i32::from(cells) + 1)
                .checked_mul(i32::from(grid.cell_size))
                .is_some()
        };
        if !fits(grid.width_cells) || !fits(grid.height_cells) {
            return Err(ConfigError::Invalid("grid pixel extent overflows".to_owned()));
        }
        if self.min_tick_rate == 0 {
            return Err(ConfigError::Invalid("min_tick_rate must be at least 1".to_owned()));
        }
        if self.min_tick_rate > self.max_tick_rate {
            return Err(ConfigError::Invalid(format!(
                "min_tick_rate {} exceeds max_tick_rate {}",
                self.min_tick_rate, self.max_tick_rate
            )));
        }
        if !(self.min_tick_rate..=self.max_tick_rate).contains(&self.tick_rate) {
            return Err(ConfigError::Invalid(format!(
                "tick_rate {} outside {}..={}",
                self.tick_rate, self.min_tick_rate, self.max_tick_rate
            )));
        }

        Ok(())
    }
}

/// Returns the platform-correct default config file path.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}
