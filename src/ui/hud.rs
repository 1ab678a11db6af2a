use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Palette;

const KEY_HELP: &str = "Arrows/WASD move  P pause  +/- speed  Esc quit";

/// Values displayed by the status row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub length: usize,
    pub tick_rate: u32,
    pub paused: bool,
    pub resets: u64,
    pub palette: &'a Palette,
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: &HudInfo<'_>) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let status = status_text(info);
    let help_fits =
        status.width() + KEY_HELP.width() + 2 <= usize::from(status_area.width);

    let mut spans = vec![Span::styled(
        status,
        Style::new().fg(info.palette.snake).add_modifier(Modifier::BOLD),
    )];
    if help_fits {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(KEY_HELP, Style::new().fg(info.palette.hud)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        status_area,
    );

    play_area
}

fn status_text(info: &HudInfo<'_>) -> String {
    let mut text = format!("Length {}  Speed {}/s", info.length, info.tick_rate);
    if info.resets > 0 {
        text.push_str(&format!("  Resets {}", info.resets));
    }
    if info.paused {
        text.push_str("  PAUSED");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{HudInfo, status_text};
    use crate::config::PALETTE;

    #[test]
    fn status_text_lists_length_and_speed() {
        let info = HudInfo {
            length: 4,
            tick_rate: 12,
            paused: false,
            resets: 0,
            palette: &PALETTE,
        };
        assert_eq!(status_text(&info), "Length 4  Speed 12/s");
    }

    #[test]
    fn status_text_marks_pause_and_resets() {
        let info = HudInfo {
            length: 1,
            tick_rate: 5,
            paused: true,
            resets: 2,
            palette: &PALETTE,
        };
        assert_eq!(status_text(&info), "Length 1  Speed 5/s  Resets 2  PAUSED");
    }
}
