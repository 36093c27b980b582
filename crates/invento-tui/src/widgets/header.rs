use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::app::App;
use crate::content::{CAROUSEL_HINT, HEADLINE};

pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(area: Rect, buf: &mut Buffer, app: &App) {
        let theme = &app.theme;
        let lines = vec![
            Line::raw(""),
            Line::styled(
                HEADLINE,
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            ),
            Line::styled(CAROUSEL_HINT, Style::default().fg(theme.grey2)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(theme.bg0))
            .render(area, buf);
    }
}
