use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{BORDER_HALF_BLOCK, GLYPH_CELL, GLYPH_EMPTY, Palette};
use crate::food::Food;
use crate::game::Snapshot;
use crate::grid::{Cell, GridSpace};
use crate::snake::Snake;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::render_pause_menu;

/// Terminal columns used by one grid cell.
const CELL_COLUMNS: u16 = 2;

/// Anything that occupies grid cells and draws in a single color.
pub trait Drawable {
    /// Occupied cells in drawing order.
    fn cells(&self) -> impl Iterator<Item = Cell> + '_;

    fn color(&self, palette: &Palette) -> Color;
}

impl Drawable for Snake {
    fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments().copied()
    }

    fn color(&self, palette: &Palette) -> Color {
        palette.snake
    }
}

impl Drawable for Food {
    fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.position())
    }

    fn color(&self, palette: &Palette) -> Color {
        palette.apple
    }
}

/// Renders the full frame from a read-only snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>, hud: &HudInfo<'_>) {
    let palette = hud.palette;
    let play_area = render_hud(frame, frame.area(), hud);
    let board = board_area(play_area, snapshot.grid);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(palette.border).bg(palette.background))
        .style(Style::new().bg(palette.background));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    if let Some(trimmed) = snapshot.trimmed() {
        let erase = Style::new().bg(palette.background);
        paint(frame, inner, snapshot.grid, trimmed, GLYPH_EMPTY, erase);
    }

    draw_entity(frame, inner, snapshot.grid, &snapshot.food, palette);
    draw_entity(frame, inner, snapshot.grid, snapshot.snake, palette);

    let head_style = Style::new()
        .fg(palette.snake)
        .bg(palette.border)
        .add_modifier(Modifier::BOLD);
    paint(frame, inner, snapshot.grid, snapshot.head(), GLYPH_CELL, head_style);

    if hud.paused {
        render_pause_menu(frame, board, palette);
    }
}

fn draw_entity<D: Drawable>(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: GridSpace,
    entity: &D,
    palette: &Palette,
) {
    let style = Style::new().fg(entity.color(palette)).bg(palette.background);
    for cell in entity.cells() {
        paint(frame, inner, grid, cell, GLYPH_CELL, style);
    }
}

fn paint(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: GridSpace,
    cell: Cell,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = cell_to_terminal(inner, grid, cell) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
}

/// Centers a bordered board sized to the grid inside `area`.
fn board_area(area: Rect, grid: GridSpace) -> Rect {
    let width = grid.width_cells.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = grid.height_cells.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

/// Maps a grid cell to the top-left terminal column and row it is drawn at.
///
/// Returns `None` when the cell falls outside the visible area.
fn cell_to_terminal(inner: Rect, grid: GridSpace, cell: Cell) -> Option<(u16, u16)> {
    if !grid.contains(cell) {
        return None;
    }

    let (col, row) = grid.index_of(cell);
    let x_offset = u16::try_from(col).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(row).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
