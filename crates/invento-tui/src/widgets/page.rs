use ratatui::{buffer::Buffer, layout::Rect, style::Style, Frame};

use crate::app::{App, HEADER_ROWS};

use super::{blit, HeaderWidget, ShowcaseWidget};

/// Scrollable page: header followed by the showcase
///
/// The whole page is drawn off-screen and the visible window is copied into
/// the frame, so sections can be partially scrolled out.
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        let body = app.body_area().intersection(frame.area());
        if body.is_empty() {
            return;
        }

        let page_area = Rect::new(0, 0, body.width, app.page_height());
        let mut page = Buffer::empty(page_area);
        page.set_style(page_area, Style::default().bg(app.theme.bg0));

        HeaderWidget::render(Rect::new(0, 0, body.width, HEADER_ROWS), &mut page, app);
        ShowcaseWidget::render(
            Rect::new(0, HEADER_ROWS, body.width, app.showcase_rows()),
            &mut page,
            app,
        );

        let scroll = app.page_scroll.current_scroll() as i32;
        blit(&page, 0, scroll, frame.buffer_mut(), body);
    }
}
