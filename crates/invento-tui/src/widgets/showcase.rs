use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use invento_core::carousel::Cursor;
use invento_core::ViewportMode;

use crate::app::App;
use crate::content::{card_number, FeatureCard, FEATURES};
use crate::theme::Theme;

/// Feature cards: a translated strip on desktop, a vertical list on mobile
pub struct ShowcaseWidget;

impl ShowcaseWidget {
    pub fn render(area: Rect, buf: &mut Buffer, app: &App) {
        match app.mode() {
            ViewportMode::Desktop => Self::render_strip(area, buf, app),
            ViewportMode::Mobile => Self::render_stack(area, buf, app),
        }
    }

    fn render_strip(area: Rect, buf: &mut Buffer, app: &App) {
        let card_cols = app.card_cols();
        let gap_cols = app.gap_cols();
        let card_rows = app.card_rows();
        let count = FEATURES.len() as u16;
        let pitch = card_cols.saturating_add(gap_cols);

        let strip_width = count.saturating_mul(pitch).saturating_sub(gap_cols);
        let strip_area = Rect::new(0, 0, strip_width, card_rows);
        let mut strip = Buffer::empty(strip_area);
        strip.set_style(strip_area, Style::default().bg(app.theme.bg0));

        let border = match app.carousel().map(|c| c.cursor()) {
            Some(Cursor::Grabbing) => BorderType::Thick,
            _ => BorderType::Rounded,
        };
        for (index, card) in FEATURES.iter().enumerate() {
            let x = (index as u16).saturating_mul(pitch);
            let card_area = Rect::new(x, 0, card_cols, card_rows).intersection(strip_area);
            render_card(card_area, &mut strip, index, card, border, &app.theme);
        }

        let row = Rect::new(area.x, area.y.saturating_add(1), area.width, card_rows).intersection(area);
        super::blit(&strip, -app.offset_cols(), 0, buf, row);

        app.strip().report_card_width(card_cols);
    }

    fn render_stack(area: Rect, buf: &mut Buffer, app: &App) {
        let card_cols = app.card_cols();
        let card_rows = app.card_rows();
        let x = area.x + area.width.saturating_sub(card_cols) / 2;

        for (index, card) in FEATURES.iter().enumerate() {
            let y = (index as u16)
                .saturating_mul(card_rows.saturating_add(1))
                .saturating_add(area.y.saturating_add(1));
            let card_area = Rect::new(x, y, card_cols, card_rows).intersection(area);
            if card_area.is_empty() {
                break;
            }
            render_card(card_area, buf, index, card, BorderType::Rounded, &app.theme);
        }
    }
}

fn render_card(
    area: Rect,
    buf: &mut Buffer,
    index: usize,
    card: &FeatureCard,
    border: BorderType,
    theme: &Theme,
) {
    let block = Block::bordered()
        .border_type(border)
        .border_style(Style::default().fg(card.accent))
        .title(
            Line::styled(
                format!(" {} ", card_number(index)),
                Style::default().fg(card.accent).add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Right),
        )
        .style(Style::default().bg(theme.bg1));

    let lines = vec![
        Line::styled(
            card.title,
            Style::default().fg(card.accent).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(card.description, Style::default().fg(theme.fg0)),
    ];

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
