//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::sync::Arc;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    contact::{ContactDesk, PendingSubmission},
    content::Portfolio,
    form::{FieldError, FormKind},
    nav::{MenuState, Section},
    overlay::ProjectOverlay,
    relay::FormRelay,
    reveal::{Viewport, VisibilityTracker},
    storage::KeyValueStore,
    theme::ThemeController,
};
use crate::ui::{
    layout::AppLayout,
    page::{FadeIn, PageLayout},
    smooth_scroll::SmoothScroll,
    theme::Theme,
};

/// Which input mode is active underneath any overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    /// Keystrokes go into this form.
    Editing(FormKind),
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub portfolio: Portfolio,
    pub config: AppConfig,
    pub theme: ThemeController<Box<dyn KeyValueStore>>,
    pub tracker: VisibilityTracker,
    pub fade: FadeIn,
    pub menu: MenuState,
    pub overlay: ProjectOverlay,
    pub desk: ContactDesk,
    pub active_view: ActiveView,
    /// Problems from the last rejected submit, shown next to the fields.
    pub field_errors: Option<(FormKind, Vec<FieldError>)>,
    /// Card picked with the keyboard.
    pub focused_card: Option<usize>,
    pub scroll: SmoothScroll,
    pub terminal_area: Rect,
    pub page_layout: PageLayout,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Submission waiting to be handed to the relay by the main loop.
    pub outbox: Option<PendingSubmission>,
    pub relay: Option<Arc<dyn FormRelay>>,
    pub tick: u64,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(
        portfolio: Portfolio,
        config: AppConfig,
        theme: ThemeController<Box<dyn KeyValueStore>>,
        relay: Option<Arc<dyn FormRelay>>,
        terminal_area: Rect,
    ) -> Self {
        let desk = ContactDesk::new(relay.is_some());
        let page_width = AppLayout::from_area(terminal_area).page_area.width;
        let page_layout = PageLayout::compute(&portfolio, page_width, relay.is_some());
        let tracker = VisibilityTracker::new(portfolio.projects.len());
        let mut state = Self {
            portfolio,
            config,
            theme,
            tracker,
            fade: FadeIn::default(),
            menu: MenuState::default(),
            overlay: ProjectOverlay::default(),
            desk,
            active_view: ActiveView::default(),
            field_errors: None,
            focused_card: None,
            scroll: SmoothScroll::default(),
            terminal_area,
            page_layout,
            status_message: None,
            outbox: None,
            relay,
            tick: 0,
            should_quit: false,
        };
        state.relayout();
        state
    }

    pub fn theme_palette(&self) -> Theme {
        Theme::new(self.theme.mode())
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    pub fn viewport_height(&self) -> u16 {
        self.layout().page_area.height
    }

    pub fn max_scroll(&self) -> u16 {
        self.page_layout.max_scroll(self.viewport_height())
    }

    /// Recompute the page for the current width, re-register card regions
    /// and re-check visibility.
    pub fn relayout(&mut self) {
        let width = self.layout().page_area.width;
        if width != self.page_layout.width {
            self.page_layout = PageLayout::compute(&self.portfolio, width, self.desk.relay_available());
        }
        if let Err(e) = self.tracker.sync_regions(self.page_layout.reveal_regions()) {
            tracing::warn!("card regions rejected: {e}");
        }
        self.scroll.clamp(self.max_scroll());
        self.observe_viewport();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
        self.relayout();
    }

    /// Feed the visible rows to the tracker and start fades for new reveals.
    pub fn observe_viewport(&mut self) {
        let viewport = Viewport {
            top: self.scroll.offset() as usize,
            height: self.viewport_height() as usize,
        };
        for index in self.tracker.observe(viewport) {
            self.fade.start(index);
        }
    }

    /// Section under the top of the viewport.  At the very bottom of the
    /// page the last section wins, since it may never reach the top.
    pub fn active_section(&self) -> Section {
        let max = self.max_scroll();
        let offset = self.scroll.offset();
        if max > 0 && offset >= max {
            return Section::ALL[Section::ALL.len() - 1];
        }
        self.page_layout.section_at(offset)
    }

    pub fn scroll_to_section(&mut self, section: Section) {
        let target = self.page_layout.section_top(section).min(self.max_scroll());
        self.scroll.scroll_to(target);
    }

    /// Scroll immediately by `delta` rows.
    pub fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll.target()) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll.jump_to(next as u16);
        self.observe_viewport();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.jump_to(0);
        self.observe_viewport();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll.jump_to(self.max_scroll());
        self.observe_viewport();
    }

    /// Bring a card fully into view if it is not already.
    pub fn scroll_card_into_view(&mut self, index: usize) {
        if let Some(rect) = self.page_layout.card_rect(index) {
            self.scroll_rect_into_view(rect);
        }
    }

    /// Bring the focused field (or submit button) of `kind` into view.
    pub fn scroll_field_into_view(&mut self, kind: FormKind) {
        let focus = self.desk.form(kind).focus();
        if let Some(rect) = self.page_layout.field_rect(kind, focus) {
            self.scroll_rect_into_view(rect);
        }
    }

    fn scroll_rect_into_view(&mut self, rect: Rect) {
        let top = self.scroll.target();
        let height = self.viewport_height();
        if rect.y < top || rect.y + rect.height > top + height {
            let target = rect.y.saturating_sub(1).min(self.max_scroll());
            self.scroll.scroll_to(target);
        }
    }

    /// Advance animations by one frame.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.scroll.tick() {
            self.observe_viewport();
        }
        self.fade.tick();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::relay::{FormPayload, RelayError, RelayReply};
    use crate::core::storage::MemoryStore;
    use async_trait::async_trait;

    /// Relay that is never actually called in state tests.
    pub(crate) struct IdleRelay;

    #[async_trait]
    impl FormRelay for IdleRelay {
        async fn send(&self, _payload: &FormPayload) -> Result<RelayReply, RelayError> {
            Err(RelayError::Transport("idle".into()))
        }
    }

    pub(crate) fn state_with(relay: bool, width: u16, height: u16) -> AppState {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::default());
        let relay: Option<Arc<dyn FormRelay>> = if relay { Some(Arc::new(IdleRelay)) } else { None };
        AppState::new(
            Portfolio::builtin().unwrap(),
            AppConfig::default(),
            ThemeController::restore(store),
            relay,
            Rect::new(0, 0, width, height),
        )
    }

    #[test]
    fn cards_reveal_while_scrolling_and_stay_revealed() {
        let mut state = state_with(true, 100, 30);
        while state.scroll.offset() < state.max_scroll() {
            state.scroll_by(5);
        }
        assert_eq!(state.tracker.revealed().len(), state.portfolio.projects.len());

        state.scroll_to_top();
        assert_eq!(state.tracker.revealed().len(), state.portfolio.projects.len());
    }

    #[test]
    fn resize_re_registers_regions() {
        let mut state = state_with(true, 120, 40);
        let wide = state.page_layout.card_rect(3).unwrap();
        state.resize(50, 40);
        let narrow = state.page_layout.card_rect(3).unwrap();
        assert_ne!(wide, narrow);
        for i in 0..state.portfolio.projects.len() {
            assert!(state.tracker.is_registered(crate::core::reveal::RegionKey(i)));
        }
    }

    #[test]
    fn section_scroll_animates_to_target() {
        let mut state = state_with(true, 100, 30);
        state.scroll_to_section(Section::Skills);
        let target = state.scroll.target();
        assert!(target > 0);
        for _ in 0..100 {
            state.on_tick();
        }
        assert_eq!(state.scroll.offset(), target);
        assert_eq!(state.active_section(), Section::Skills);
    }

    #[test]
    fn bottom_of_page_reports_last_section() {
        let mut state = state_with(true, 100, 30);
        state.scroll_to_bottom();
        assert_eq!(state.active_section(), Section::Contact);
    }
}
