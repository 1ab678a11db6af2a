use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use env_logger::{Env, Target};
use grid_snake::config::{GameConfig, PALETTE};
use grid_snake::controls::Controls;
use grid_snake::error::AppError;
use grid_snake::game::{GameState, TickOutcome};
use grid_snake::input::InputHandler;
use grid_snake::renderer;
use grid_snake::terminal_runtime::{AppTerminal, TerminalSession};
use grid_snake::ui::hud::HudInfo;

/// Snake on a wrap-around grid.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Cell size in pixels.
    #[arg(long = "cell-size")]
    cell_size: Option<u16>,

    /// Starting speed in ticks per second.
    #[arg(long)]
    speed: Option<u32>,

    /// Slowest allowed speed in ticks per second.
    #[arg(long = "min-speed")]
    min_speed: Option<u32>,

    /// Fastest allowed speed in ticks per second.
    #[arg(long = "max-speed")]
    max_speed: Option<u32>,

    /// Seed for reproducible apple placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(width) = self.width {
            config.grid.width_cells = width;
        }
        if let Some(height) = self.height {
            config.grid.height_cells = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.grid.cell_size = cell_size;
        }
        if let Some(speed) = self.speed {
            config.tick_rate = speed;
        }
        if let Some(min_speed) = self.min_speed {
            config.min_tick_rate = min_speed;
        }
        if let Some(max_speed) = self.max_speed {
            config.max_tick_rate = max_speed;
        }
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logger(cli.log_file.as_deref())?;

    let mut config = GameConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    log::info!(
        "starting on a {}x{} grid (cell {}), {} ticks/s in {}..={}",
        config.grid.width_cells,
        config.grid.height_cells,
        config.grid.cell_size,
        config.tick_rate,
        config.min_tick_rate,
        config.max_tick_rate
    );

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config.grid, seed),
        None => GameState::new(config.grid),
    };

    let mut session = TerminalSession::enter()?;
    run(session.terminal_mut(), state, Controls::new(&config))?;
    drop(session);

    log::info!("shut down");
    Ok(())
}

fn run(
    terminal: &mut AppTerminal,
    mut state: GameState,
    mut controls: Controls,
) -> Result<(), AppError> {
    let mut input = InputHandler::new();
    draw(terminal, &state, &controls)?;

    loop {
        let deadline = Instant::now() + controls.tick_interval();
        for game_input in input.collect_until(deadline)? {
            if let Some(direction) = controls.apply(game_input) {
                state.request_direction(direction);
            }
        }

        if !controls.is_running() {
            break;
        }

        if state.tick(&controls) == TickOutcome::Ate {
            log::debug!("apple eaten, target length {}", state.snake.target_length());
        }
        draw(terminal, &state, &controls)?;
    }

    Ok(())
}

fn draw(
    terminal: &mut AppTerminal,
    state: &GameState,
    controls: &Controls,
) -> Result<(), AppError> {
    let hud = HudInfo {
        length: state.snake.len(),
        tick_rate: controls.tick_rate(),
        paused: controls.is_paused(),
        resets: state.resets,
        palette: &PALETTE,
    };

    terminal.draw(|frame| renderer::render(frame, &state.snapshot(), &hud))?;
    Ok(())
}

fn init_logger(log_file: Option<&Path>) -> Result<(), AppError> {
    let default_level = if log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level));

    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|error| AppError::Logger(error.to_string()))
}
