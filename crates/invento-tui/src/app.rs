use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

use invento_core::carousel::{EventBus, InputEvent, Propagation};
use invento_core::{
    AnimationScheduler, AppConfig, Carousel, CarouselState, StripLayout, ViewportMode,
};

use crate::content::FEATURES;
use crate::input::Action;
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// Rows above the showcase: spacer, headline, hint, spacer
pub const HEADER_ROWS: u16 = 4;

/// Card strip as laid out in the terminal
///
/// The card width is unknown until the showcase has been drawn once.
#[derive(Debug)]
pub struct TerminalStrip {
    card_count: usize,
    px_per_cell: f64,
    measured_cols: Cell<Option<u16>>,
}

impl TerminalStrip {
    pub fn new(card_count: usize, px_per_cell: f64) -> Self {
        Self {
            card_count,
            px_per_cell,
            measured_cols: Cell::new(None),
        }
    }

    /// Record the drawn card width in columns
    pub fn report_card_width(&self, cols: u16) {
        if self.measured_cols.replace(Some(cols)) != Some(cols) {
            debug!("Card width measured at {} columns", cols);
        }
    }

    pub fn measured_cols(&self) -> Option<u16> {
        self.measured_cols.get()
    }
}

impl StripLayout for TerminalStrip {
    fn card_count(&self) -> usize {
        self.card_count
    }

    fn card_width(&self) -> Option<f64> {
        self.measured_cols
            .get()
            .map(|cols| cols as f64 * self.px_per_cell)
    }
}

/// Showcase page state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub scheduler: AnimationScheduler,
    bus: EventBus,
    carousel: Option<Carousel>,
    strip: Rc<TerminalStrip>,
    pub page_scroll: ScrollAnimator,
    /// Whole terminal
    pub viewport: Rect,
    /// Last pointer position was over the strip
    pointer_inside: bool,
    last_pointer: Option<Position>,
    pub should_quit: bool,
    pub show_help: bool,
    /// First key of a two-key sequence (gg)
    pub pending_key: Option<char>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme, cols: u16, rows: u16) -> Self {
        Self::starting_at(config, theme, cols, rows, Instant::now())
    }

    /// Create the page with its animation clock starting at `now`
    pub fn starting_at(
        config: Arc<AppConfig>,
        theme: Theme,
        cols: u16,
        rows: u16,
        now: Instant,
    ) -> Self {
        let bus = EventBus::new();
        let mut scheduler = AnimationScheduler::starting_at(now);
        let strip = Rc::new(TerminalStrip::new(FEATURES.len(), config.ui.px_per_cell));
        let viewport_px = cols as f64 * config.ui.px_per_cell;

        let carousel = Carousel::mount(
            &bus,
            &mut scheduler,
            strip.clone(),
            config.carousel.clone(),
            viewport_px,
        );
        info!(
            "Showcase mounted at {}x{} cells ({:.0}px, {:?})",
            cols,
            rows,
            viewport_px,
            carousel.mode()
        );

        Self {
            page_scroll: ScrollAnimator::new(config.ui.scroll.clone()),
            config,
            theme,
            scheduler,
            bus,
            carousel: Some(carousel),
            strip,
            viewport: Rect::new(0, 0, cols, rows),
            pointer_inside: false,
            last_pointer: None,
            should_quit: false,
            show_help: false,
            pending_key: None,
        }
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn carousel_state(&self) -> Option<CarouselState> {
        self.carousel.as_ref().map(|c| c.state(&self.scheduler))
    }

    pub fn strip(&self) -> &TerminalStrip {
        &self.strip
    }

    pub fn mode(&self) -> ViewportMode {
        match &self.carousel {
            Some(carousel) => carousel.mode(),
            None => ViewportMode::from_width(
                self.cols_to_px(self.viewport.width),
                self.config.carousel.breakpoint_px,
            ),
        }
    }

    #[inline]
    pub fn cols_to_px(&self, cols: u16) -> f64 {
        cols as f64 * self.config.ui.px_per_cell
    }

    /// Horizontal strip translation in whole columns
    pub fn offset_cols(&self) -> i32 {
        let offset = self
            .carousel
            .as_ref()
            .and_then(|c| c.transform())
            .unwrap_or(0.0);
        (offset / self.config.ui.px_per_cell).round() as i32
    }

    /// Area below the header and above the status bar
    pub fn body_area(&self) -> Rect {
        Rect {
            height: self.viewport.height.saturating_sub(1),
            ..self.viewport
        }
    }

    pub fn status_area(&self) -> Rect {
        let body = self.body_area();
        Rect {
            y: body.bottom(),
            height: self.viewport.height - body.height,
            ..self.viewport
        }
    }

    pub fn card_rows(&self) -> u16 {
        self.config.ui.card_height_rows
    }

    pub fn gap_cols(&self) -> u16 {
        (self.config.carousel.gap_px / self.config.ui.px_per_cell).round() as u16
    }

    pub fn card_cols(&self) -> u16 {
        match self.mode() {
            ViewportMode::Desktop => self.config.ui.card_width_cols.min(self.viewport.width.max(1)),
            ViewportMode::Mobile => self.viewport.width.saturating_sub(4).max(1),
        }
    }

    /// Rows taken by the showcase section in the current mode
    pub fn showcase_rows(&self) -> u16 {
        let card_rows = self.card_rows();
        match self.mode() {
            ViewportMode::Desktop => card_rows.saturating_add(2),
            ViewportMode::Mobile => card_rows
                .saturating_add(1)
                .saturating_mul(FEATURES.len() as u16)
                .saturating_add(1),
        }
    }

    pub fn page_height(&self) -> u16 {
        HEADER_ROWS.saturating_add(self.showcase_rows())
    }

    pub fn max_scroll(&self) -> u16 {
        self.page_height().saturating_sub(self.body_area().height)
    }

    /// Screen area of the card strip, if the carousel is active and visible
    pub fn strip_hit_area(&self) -> Option<Rect> {
        if self.mode() != ViewportMode::Desktop {
            return None;
        }
        let body = self.body_area();
        let top = body.y as i32 + HEADER_ROWS as i32 + 1 - self.page_scroll.current_scroll() as i32;
        let bottom = top + self.card_rows() as i32;
        let top = top.max(body.y as i32);
        let bottom = bottom.min(body.bottom() as i32);
        if bottom <= top {
            return None;
        }
        Some(Rect::new(body.x, top as u16, body.width, (bottom - top) as u16))
    }

    /// Advance every animation to `now`
    pub fn on_frame(&mut self, now: Instant) {
        self.scheduler.step(now);
        let max_scroll = self.max_scroll();
        self.page_scroll.update(now, max_scroll);
    }

    /// Something is moving and the loop should poll at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        !self.scheduler.is_idle() || self.page_scroll.needs_update()
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let before = self.mode();
        self.viewport = Rect::new(0, 0, cols, rows);
        let width = self.cols_to_px(cols);
        self.dispatch(InputEvent::Resize { width });

        if self.mode() != before {
            // The carousel forgets hover on a mode switch; re-enter on the next move
            self.pointer_inside = false;
        } else {
            // The strip may have moved out from under a stationary pointer
            let inside = self.pointer_over_strip(self.last_pointer);
            self.track_pointer(inside);
        }
    }

    fn dispatch(&mut self, event: InputEvent) -> Propagation {
        self.bus.dispatch(&event, &mut self.scheduler)
    }

    fn pointer_over_strip(&self, position: Option<Position>) -> bool {
        match (position, self.strip_hit_area()) {
            (Some(position), Some(area)) => area.contains(position),
            _ => false,
        }
    }

    fn track_pointer(&mut self, inside: bool) {
        if inside != self.pointer_inside {
            self.pointer_inside = inside;
            self.dispatch(if inside {
                InputEvent::PointerEnter
            } else {
                InputEvent::PointerLeave
            });
        }
    }

    fn wheel(&mut self, delta_y: f64) {
        if self.dispatch(InputEvent::Wheel { delta_y }).is_stopped() {
            return;
        }
        if delta_y > 0.0 {
            self.page_scroll.scroll_down();
        } else {
            self.page_scroll.scroll_up();
        }
    }

    /// Translate a terminal mouse event into carousel input
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        self.last_pointer = Some(position);
        let inside = self.pointer_over_strip(self.last_pointer);
        self.track_pointer(inside);

        let x = self.cols_to_px(mouse.column);
        let step = self.config.ui.wheel_step_px;
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                self.dispatch(InputEvent::PointerMove { x });
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.dispatch(InputEvent::PointerDown { x });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dispatch(InputEvent::PointerUp);
            }
            MouseEventKind::ScrollDown => self.wheel(step),
            MouseEventKind::ScrollUp => self.wheel(-step),
            _ => {}
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        let body_height = self.body_area().height;
        let max_scroll = self.max_scroll();
        let now = self.scheduler.now();

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.page_scroll.scroll_down(),
            Action::ScrollUp => self.page_scroll.scroll_up(),
            Action::ScrollHalfPageDown => self.page_scroll.scroll_half_page_down(body_height),
            Action::ScrollHalfPageUp => self.page_scroll.scroll_half_page_up(body_height),
            Action::JumpToTop => self.page_scroll.scroll_to(0, max_scroll, now),
            Action::JumpToBottom => self.page_scroll.scroll_to(max_scroll, max_scroll, now),
            Action::PendingG => self.pending_key = Some('g'),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::ExitMode => self.show_help = false,
            Action::None => {}
        }
    }

    /// Unmount the carousel; afterwards the scheduler holds no carousel work
    pub fn shutdown(&mut self) {
        if let Some(carousel) = self.carousel.take() {
            carousel.unmount(&mut self.scheduler);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
