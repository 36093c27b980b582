use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use invento_core::{CarouselState, ViewportMode};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let (mode_str, mode_color) = match app.carousel_state() {
            Some(state) if state.mode == ViewportMode::Desktop => {
                let label = activity(&state);
                let color = match label {
                    "DRAG" => theme.dragging,
                    "HOVER" => theme.paused,
                    "AUTOPLAY" => theme.active,
                    _ => theme.grey1,
                };
                (format!(" DESKTOP | {} ", label), color)
            }
            _ => (" MOBILE ".to_string(), theme.grey1),
        };

        let detail = match app.carousel_state() {
            Some(state) if state.mode == ViewportMode::Desktop => format!(
                " offset {:.0}px / {:.0}px ",
                state.offset_x, state.min_offset
            ),
            _ => format!(" {} cards stacked ", crate::content::FEATURES.len()),
        };

        let help_hint = " q:quit j/k:scroll ?:help ";
        let used = mode_str.width() + detail.width() + help_hint.width();
        let padding = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                mode_str,
                Style::default()
                    .fg(theme.bg0)
                    .bg(mode_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(detail, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Short label for what currently drives the strip
fn activity(state: &CarouselState) -> &'static str {
    if state.is_dragging {
        "DRAG"
    } else if state.is_hovering {
        "HOVER"
    } else if state.autoplaying {
        "AUTOPLAY"
    } else {
        "IDLE"
    }
}
