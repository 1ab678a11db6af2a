use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Palette;

/// Draws the pause screen as a centered popup over the board.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let popup = centered_popup(area, 60, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(Style::new().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(palette.border).bg(palette.background))
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
