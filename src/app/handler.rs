//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::contact::{SubmissionStatus, SubmitError, Ticket};
use crate::core::form::{FieldKind, FormKind};
use crate::core::nav::Section;
use crate::core::relay::{RelayError, RelayReply};
use crate::ui::layout::point_in_rect;
use crate::ui::navbar::{self, NavTarget};
use crate::ui::popup;

use super::state::{ActiveView, AppState};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Process a key event.  Overlays take precedence over the page, in the
/// order they are drawn (topmost first).
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.desk.has_outcome() {
        handle_result_key(state, key);
    } else if state.active_view == ActiveView::Help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            state.active_view = ActiveView::Page;
        }
    } else if state.overlay.is_open() {
        handle_overlay_key(state, key);
    } else if state.menu.is_open() {
        handle_menu_key(state, key);
    } else if let ActiveView::Editing(kind) = state.active_view {
        handle_form_key(state, kind, key);
    } else {
        handle_page_key(state, key);
    }
}

// ── Page (configurable bindings) ────────────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    // Navbar hotkeys: 1..6 jump to the matching link.
    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if let Some(&section) = Section::NAV.get(c as usize - '1' as usize) {
            navigate(state, section);
        }
        return;
    }
    match key.code {
        KeyCode::Char('?') => {
            state.active_view = ActiveView::Help;
            return;
        }
        KeyCode::Esc => {
            state.focused_card = None;
            state.status_message = None;
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;
    let page = i32::from(state.viewport_height().saturating_sub(2).max(1));

    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => state.scroll_by(-1),
        Action::ScrollDown => state.scroll_by(1),
        Action::PageUp => state.scroll_by(-page),
        Action::PageDown => state.scroll_by(page),
        Action::Top => state.scroll_to_top(),
        Action::Bottom => state.scroll_to_bottom(),
        Action::PrevSection | Action::NextSection => {
            let current = state.active_section();
            let pos = Section::ALL.iter().position(|s| *s == current).unwrap_or(0);
            let next = if action == Action::NextSection {
                (pos + 1).min(Section::ALL.len() - 1)
            } else {
                pos.saturating_sub(1)
            };
            navigate(state, Section::ALL[next]);
        }
        Action::PrevCard | Action::NextCard => {
            let count = state.portfolio.projects.len();
            if count == 0 {
                return;
            }
            let next = match (state.focused_card, action == Action::NextCard) {
                (None, true) => 0,
                (None, false) => count - 1,
                (Some(i), true) => (i + 1) % count,
                (Some(i), false) => (i + count - 1) % count,
            };
            state.focused_card = Some(next);
            state.scroll_card_into_view(next);
        }
        Action::OpenProject => match state.focused_card {
            Some(i) => open_focused_card(state, i),
            // The hero's call to action.
            None => {
                if state.active_section() == Section::Hero {
                    navigate(state, Section::Projects);
                }
            }
        },
        Action::ToggleMenu => state.menu.toggle(),
        Action::ToggleTheme => toggle_theme(state),
        Action::EditProjectRequest => start_editing(state, FormKind::ProjectRequest),
        Action::EditContact => start_editing(state, FormKind::Contact),
    }
}

/// Open a focused card.  A scroll still easing toward it is finished first;
/// a card that stays hidden is reported instead of opened.
fn open_focused_card(state: &mut AppState, index: usize) {
    if !state.tracker.is_revealed(index) && state.scroll.is_animating() {
        let target = state.scroll.target();
        state.scroll.jump_to(target);
        state.observe_viewport();
    }
    if state.tracker.is_revealed(index) {
        state.overlay.open(index);
    } else if let Some(project) = state.portfolio.project(index) {
        state.status_message = Some(format!("{} is not in view yet", project.title));
    }
}

/// Follow a navigation link: closes the menu and scrolls to the anchor.
pub fn navigate(state: &mut AppState, section: Section) {
    let section = state.menu.navigate(section);
    tracing::debug!(anchor = section.anchor(), "navigate");
    state.scroll_to_section(section);
}

fn toggle_theme(state: &mut AppState) {
    let mode = state.theme.toggle();
    state.status_message = Some(format!("Theme: {mode}"));
}

fn start_editing(state: &mut AppState, kind: FormKind) {
    let section = match kind {
        FormKind::ProjectRequest => Section::ProjectRequest,
        FormKind::Contact => Section::Contact,
    };
    navigate(state, section);
    state.active_view = ActiveView::Editing(kind);
    state.status_message = Some(format!("Editing {}: Tab moves, Esc leaves", kind.title()));
}

// ── Compact menu ────────────────────────────────────────────────

fn handle_menu_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.menu.highlight_prev(),
        KeyCode::Down | KeyCode::Char('j') => state.menu.highlight_next(),
        KeyCode::Enter => {
            let section = state.menu.activate();
            state.scroll_to_section(section);
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(&section) = Section::NAV.get(c as usize - '1' as usize) {
                navigate(state, section);
            }
        }
        KeyCode::Esc => state.menu.toggle(),
        _ => {
            if state.config.match_key(key) == Some(Action::ToggleMenu) {
                state.menu.toggle();
            } else if state.config.match_key(key) == Some(Action::Quit) {
                state.should_quit = true;
            }
        }
    }
}

// ── Project overlay ─────────────────────────────────────────────

fn handle_overlay_key(state: &mut AppState, key: KeyEvent) {
    let count = state.portfolio.projects.len();
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('x') => {
            state.overlay.close();
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => state.overlay.open_prev(count),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => state.overlay.open_next(count),
        _ => {}
    }
    if let Some(i) = state.overlay.active() {
        state.focused_card = Some(i);
    }
}

// ── Submission result ───────────────────────────────────────────

fn handle_result_key(state: &mut AppState, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        state.desk.dismiss_result();
    }
}

// ── Form editing ────────────────────────────────────────────────

fn handle_form_key(state: &mut AppState, kind: FormKind, key: KeyEvent) {
    let form = state.desk.form_mut(kind);
    let field_kind = form.focused_field().map(|f| f.kind);
    match key.code {
        KeyCode::Esc => {
            state.active_view = ActiveView::Page;
            state.status_message = None;
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            state.scroll_field_into_view(kind);
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            state.scroll_field_into_view(kind);
        }
        KeyCode::Left if matches!(field_kind, Some(FieldKind::Choice(_))) => form.cycle_choice(false),
        KeyCode::Right if matches!(field_kind, Some(FieldKind::Choice(_))) => form.cycle_choice(true),
        KeyCode::Enter if field_kind == Some(FieldKind::Multiline) => form.insert_char('\n'),
        KeyCode::Enter => submit(state, kind),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            form.insert_char(c);
        }
        _ => {}
    }
}

/// Validate `kind` and queue it for the relay.
pub fn submit(state: &mut AppState, kind: FormKind) {
    match state.desk.submit(kind) {
        Ok(pending) => {
            state.field_errors = None;
            state.status_message = None;
            state.outbox = Some(pending);
        }
        Err(SubmitError::Invalid(errors)) => {
            if let Some(first) = errors.first() {
                state.desk.form_mut(kind).focus_field(first.field());
                state.scroll_field_into_view(kind);
            }
            state.status_message = Some(format!(
                "{} field(s) need attention before sending",
                errors.len()
            ));
            state.field_errors = Some((kind, errors));
        }
        Err(e) => {
            tracing::info!(?kind, "submit refused: {e}");
            state.status_message = Some(e.to_string());
        }
    }
}

/// Apply a relay reply delivered by the background task.
pub fn handle_submission(state: &mut AppState, ticket: Ticket, outcome: Result<RelayReply, RelayError>) {
    let kind = state.desk.pending_kind();
    match state.desk.complete(ticket, outcome) {
        Ok(result) => {
            if result.status == SubmissionStatus::Success {
                if let (Some(kind), ActiveView::Editing(editing)) = (kind, state.active_view) {
                    if kind == editing {
                        state.active_view = ActiveView::Page;
                    }
                }
            }
        }
        Err(e) => tracing::debug!("{e}"),
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            if state.desk.has_outcome() || state.overlay.is_open() || state.active_view == ActiveView::Help {
                return;
            }
            let delta = if mouse.kind == MouseEventKind::ScrollUp { -WHEEL_ROWS } else { WHEEL_ROWS };
            state.scroll_by(delta);
        }
        MouseEventKind::Down(MouseButton::Left) => handle_click(state, col, row),
        _ => {}
    }
}

fn handle_click(state: &mut AppState, col: u16, row: u16) {
    let layout = state.layout();

    if state.desk.has_outcome() {
        state.desk.dismiss_result();
        return;
    }
    if state.active_view == ActiveView::Help {
        state.active_view = ActiveView::Page;
        return;
    }
    if let Some(index) = state.overlay.active() {
        let project = &state.portfolio.projects[index];
        if !point_in_rect(popup::project_popup_rect(project, layout.page_area), col, row) {
            state.overlay.close();
        }
        return;
    }
    if state.menu.is_open() {
        if let Some(section) = popup::menu_item_at(layout.page_area, col, row) {
            navigate(state, section);
            return;
        }
    }

    if point_in_rect(layout.navbar_area, col, row) {
        let brand = state.portfolio.profile.name;
        match navbar::target_at(layout.navbar_area, brand, state.theme.mode(), col, row) {
            Some(NavTarget::Link(section)) => navigate(state, section),
            Some(NavTarget::Brand) => navigate(state, Section::Hero),
            Some(NavTarget::Menu) => state.menu.toggle(),
            Some(NavTarget::ThemeSwitch) => toggle_theme(state),
            None => {}
        }
        return;
    }

    if !point_in_rect(layout.page_area, col, row) {
        return;
    }
    let x = col - layout.page_area.x;
    let y = state.scroll.offset() + (row - layout.page_area.y);

    if point_in_rect(state.page_layout.hero_button, x, y) {
        navigate(state, Section::Projects);
    } else if let Some(index) = state.page_layout.card_at(x, y) {
        if state.tracker.is_revealed(index) {
            state.focused_card = Some(index);
            state.overlay.open(index);
        }
    } else if let Some(slot) = state.page_layout.field_at(x, y) {
        state.active_view = ActiveView::Editing(slot.kind);
        match slot.kind.fields().get(slot.field) {
            Some(spec) => state.desk.form_mut(slot.kind).focus_field(spec.name),
            None => submit(state, slot.kind),
        }
    } else if let ActiveView::Editing(_) = state.active_view {
        // Clicking elsewhere on the page leaves the form.
        state.active_view = ActiveView::Page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::state_with;
    use crate::core::storage::KeyValueStore;
    use crossterm::event::KeyEventState;

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(
            state,
            KeyEvent {
                code,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            },
        );
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn click(state: &mut AppState, col: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: col,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn settle(state: &mut AppState) {
        for _ in 0..200 {
            state.on_tick();
        }
    }

    fn fill_contact(state: &mut AppState) {
        press(state, KeyCode::Char('c'));
        type_text(state, "Ada");
        press(state, KeyCode::Tab);
        type_text(state, "ada@example.com");
        press(state, KeyCode::Tab);
        type_text(state, "Hello there");
    }

    #[test]
    fn hotkey_navigation_closes_the_menu() {
        let mut state = state_with(true, 70, 30);
        press(&mut state, KeyCode::Char('m'));
        assert!(state.menu.is_open());
        press(&mut state, KeyCode::Char('3'));
        assert!(!state.menu.is_open());
        let skills = state.page_layout.section_top(Section::Skills).min(state.max_scroll());
        assert_eq!(state.scroll.target(), skills);
    }

    #[test]
    fn menu_enter_navigates_to_highlighted_entry() {
        let mut state = state_with(true, 70, 30);
        press(&mut state, KeyCode::Char('m'));
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        assert!(!state.menu.is_open());
        settle(&mut state);
        assert_eq!(state.active_section(), Section::Projects);
    }

    #[test]
    fn theme_toggle_persists() {
        let mut state = state_with(true, 100, 30);
        press(&mut state, KeyCode::Char('t'));
        assert_eq!(state.theme.store().get("theme").as_deref(), Some("dark"));
        press(&mut state, KeyCode::Char('t'));
        assert_eq!(state.theme.store().get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn hero_call_to_action_goes_to_projects() {
        let mut state = state_with(true, 100, 30);
        press(&mut state, KeyCode::Enter);
        settle(&mut state);
        assert_eq!(state.active_section(), Section::Projects);
    }

    #[test]
    fn card_keys_open_and_page_the_overlay() {
        let mut state = state_with(true, 100, 30);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focused_card, Some(0));
        settle(&mut state);
        assert!(state.tracker.is_revealed(0));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.overlay.active(), Some(0));
        press(&mut state, KeyCode::Left);
        assert_eq!(state.overlay.active(), Some(3));
        press(&mut state, KeyCode::Esc);
        assert!(!state.overlay.is_open());
        assert_eq!(state.focused_card, Some(3));
    }

    #[test]
    fn enter_right_after_tab_opens_the_card() {
        let mut state = state_with(true, 100, 14);
        assert!(!state.tracker.is_revealed(0));
        press(&mut state, KeyCode::Tab);
        assert!(state.scroll.is_animating());
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.overlay.active(), Some(0));
        assert!(!state.scroll.is_animating());
    }

    #[test]
    fn hidden_focused_card_reports_instead_of_opening() {
        let mut state = state_with(true, 100, 30);
        state.focused_card = Some(3);
        press(&mut state, KeyCode::Enter);
        assert!(!state.overlay.is_open());
        let title = state.portfolio.projects[3].title;
        assert_eq!(state.status_message, Some(format!("{title} is not in view yet")));
    }

    #[test]
    fn tabbing_through_a_form_keeps_the_focused_field_in_view() {
        let mut state = state_with(true, 100, 12);
        press(&mut state, KeyCode::Char('p'));
        settle(&mut state);
        let slots = FormKind::ProjectRequest.fields().len();
        for _ in 0..slots {
            press(&mut state, KeyCode::Tab);
        }
        settle(&mut state);
        assert!(state.desk.form(FormKind::ProjectRequest).is_submit_focused());
        let button = state.page_layout.field_rect(FormKind::ProjectRequest, slots).unwrap();
        let top = state.scroll.offset();
        assert!(button.y >= top);
        assert!(button.y + button.height <= top + state.viewport_height());
    }

    #[test]
    fn clicking_a_revealed_card_opens_it() {
        let mut state = state_with(true, 100, 30);
        navigate(&mut state, Section::Projects);
        settle(&mut state);
        let rect = state.page_layout.card_rect(1).unwrap();
        let page = state.layout().page_area;
        let row = page.y + (rect.y - state.scroll.offset()) + 1;
        click(&mut state, page.x + rect.x + 1, row);
        assert_eq!(state.overlay.active(), Some(1));

        // Backdrop click closes.
        click(&mut state, 0, page.y);
        assert!(!state.overlay.is_open());
    }

    #[test]
    fn invalid_form_is_not_sent() {
        let mut state = state_with(true, 100, 30);
        press(&mut state, KeyCode::Char('c'));
        type_text(&mut state, "Ada");
        press(&mut state, KeyCode::Enter);
        assert!(state.outbox.is_none());
        let (kind, errors) = state.field_errors.as_ref().unwrap();
        assert_eq!(*kind, FormKind::Contact);
        assert!(errors.iter().any(|e| e.field() == "email"));
        assert_eq!(state.desk.form(FormKind::Contact).focus(), 1);
    }

    #[test]
    fn offline_submit_reports_unavailable() {
        let mut state = state_with(false, 100, 30);
        fill_contact(&mut state);
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Enter);
        assert!(state.outbox.is_none());
        assert_eq!(
            state.status_message.as_deref(),
            Some(SubmitError::RelayUnavailable.to_string().as_str())
        );
    }

    #[test]
    fn successful_submission_clears_form_and_shows_result_once() {
        let mut state = state_with(true, 100, 30);
        fill_contact(&mut state);
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Enter);
        let pending = state.outbox.take().expect("queued");

        // A second submit while pending is refused.
        state.active_view = ActiveView::Editing(FormKind::Contact);
        submit(&mut state, FormKind::Contact);
        assert!(state.outbox.is_none());

        handle_submission(
            &mut state,
            pending.ticket,
            Ok(RelayReply {
                success: true,
                message: String::new(),
            }),
        );
        assert!(state.desk.has_outcome());
        assert!(state.desk.form(FormKind::Contact).is_pristine());
        assert_eq!(state.active_view, ActiveView::Page);

        // Keys go to the result overlay until it is dismissed.
        press(&mut state, KeyCode::Char('t'));
        assert!(state.desk.has_outcome());
        press(&mut state, KeyCode::Enter);
        assert!(state.desk.result().is_none());

        // A late duplicate reply changes nothing.
        handle_submission(
            &mut state,
            pending.ticket,
            Ok(RelayReply {
                success: false,
                message: "late".into(),
            }),
        );
        assert!(state.desk.result().is_none());
    }

    #[test]
    fn dismissing_the_result_keeps_theme_menu_and_reveals() {
        let mut state = state_with(true, 100, 30);
        press(&mut state, KeyCode::Char('t'));
        while state.scroll.offset() < state.max_scroll() {
            state.scroll_by(5);
        }
        let revealed = state.tracker.revealed().clone();
        assert!(!revealed.is_empty());

        fill_contact(&mut state);
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Enter);
        let pending = state.outbox.take().unwrap();
        state.menu.toggle();

        handle_submission(
            &mut state,
            pending.ticket,
            Ok(RelayReply {
                success: true,
                message: String::new(),
            }),
        );
        press(&mut state, KeyCode::Esc);
        assert!(state.desk.result().is_none());

        assert_eq!(state.theme.mode(), crate::core::theme::ThemeMode::Dark);
        assert_eq!(state.theme.store().get("theme").as_deref(), Some("dark"));
        assert!(state.menu.is_open());
        assert_eq!(state.tracker.revealed(), &revealed);
    }

    #[test]
    fn transport_failure_keeps_the_form() {
        let mut state = state_with(true, 100, 30);
        fill_contact(&mut state);
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Enter);
        let pending = state.outbox.take().unwrap();
        handle_submission(&mut state, pending.ticket, Err(RelayError::Transport("refused".into())));
        let result = state.desk.result().unwrap();
        assert_eq!(result.status, SubmissionStatus::Failure);
        assert!(result.message.starts_with("Network error:"));
        assert_eq!(state.desk.form(FormKind::Contact).value("name"), Some("Ada"));
    }

    #[test]
    fn wheel_scrolls_the_page() {
        let mut state = state_with(true, 100, 30);
        handle_mouse(
            &mut state,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 10,
                row: 10,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(state.scroll.offset(), WHEEL_ROWS as u16);
    }
}
