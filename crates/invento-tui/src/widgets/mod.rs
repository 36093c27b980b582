mod header;
mod help;
mod page;
mod showcase;
mod status_bar;

pub use header::HeaderWidget;
pub use help::HelpPopupWidget;
pub use page::PageWidget;
pub use showcase::ShowcaseWidget;
pub use status_bar::StatusBarWidget;

use ratatui::{buffer::Buffer, layout::Rect};

/// Copy the window of `src` starting at (`src_x`, `src_y`) into `dst_area`
///
/// Source cells outside `src` leave the destination untouched.
pub(crate) fn blit(src: &Buffer, src_x: i32, src_y: i32, dst: &mut Buffer, dst_area: Rect) {
    for row in 0..dst_area.height {
        for col in 0..dst_area.width {
            let (Ok(sx), Ok(sy)) = (
                u16::try_from(src_x + col as i32),
                u16::try_from(src_y + row as i32),
            ) else {
                continue;
            };
            let (Some(cell), Some(target)) = (
                src.cell((sx, sy)),
                dst.cell_mut((dst_area.x + col, dst_area.y + row)),
            ) else {
                continue;
            };
            *target = cell.clone();
        }
    }
}
