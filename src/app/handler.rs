//! Input handling: maps key/mouse events to page events.
//!
//! Keys and clicks are turned into clicks on page elements wherever the page
//! has an element for the job, so the terminal drives the same listeners a
//! pointer would.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::debug;

use super::page;
use super::state::PageState;
use crate::config::Action;
use crate::core::{document::ElementId, markers::*, viewport::Viewport};

/// Columns moved by one horizontal wheel notch.
const WHEEL_COLUMNS: f64 = 4.0;
/// Rows moved by one vertical wheel notch.
const WHEEL_ROWS: f64 = 3.0;

/// Process a key event.
pub fn handle_key(state: &mut PageState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    state.status_message = None;

    if let KeyCode::Char(c @ '1'..='9') = key.code {
        let index = c as usize - '1' as usize;
        match state.carousel.dots().get(index).copied() {
            Some(dot) => click(state, dot),
            None => state.status_message = Some(format!("no dot {c}")),
        }
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    debug!(?action, "key action");
    match action {
        Action::OpenMenu => {
            if let Some(burger) = state.doc.query_class(BURGER_CLASS) {
                click(state, burger);
            }
        }
        Action::OpenContact => {
            if let Some(open) = state.doc.get_element_by_id(OPEN_POPUP_ID) {
                click(state, open);
            }
        }
        Action::Dismiss => dismiss(state),
        Action::SwipeLeft => swipe_card(state, -1.0),
        Action::SwipeRight => swipe_card(state, 1.0),
        Action::PageUp => {
            let step = page_step(state);
            scroll_page(state, -step);
        }
        Action::PageDown => {
            let step = page_step(state);
            scroll_page(state, step);
        }
        Action::Quit => state.should_quit = true,
    }
}

/// Close the topmost overlay through its close button.
fn dismiss(state: &mut PageState) {
    let button = if state.popup.is_open() {
        state.doc.get_element_by_id(CLOSE_POPUP_ID)
    } else if state.drawer.is_open() {
        state.doc.query_class(NAV_CLOSE_CLASS)
    } else {
        None
    };
    match button {
        Some(button) => click(state, button),
        // Markup without a close button: close directly.
        None if state.popup.is_open() => state.popup.hide(&mut state.doc),
        None => state.drawer.hide(&mut state.doc),
    }
}

fn swipe_card(state: &mut PageState, direction: f64) {
    let card = state
        .doc
        .query_class(MANAGER_CARD_CLASS)
        .map(|c| state.doc.offset_width(c))
        .filter(|w| *w > 0.0)
        .unwrap_or(state.config.px_per_column * WHEEL_COLUMNS);
    page::swipe_track(state, direction * card);
}

fn page_step(state: &PageState) -> f64 {
    (state.doc.viewport.height / 2.0).max(state.config.px_per_row)
}

fn scroll_page(state: &mut PageState, delta: f64) {
    if !page::scroll_page(state, delta) && state.doc.body_style.is_scroll_locked() {
        state.status_message = Some("page is scroll-locked while an overlay is open".into());
    }
}

/// Click an element and run its default action unless a listener prevented it.
fn click(state: &mut PageState, target: ElementId) {
    let outcome = page::dispatch_click(state, target);
    if !outcome.default_prevented {
        page::follow_link(state, target);
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut PageState, mouse: MouseEvent) {
    let column_step = state.config.px_per_column * WHEEL_COLUMNS;
    let row_step = state.config.px_per_row * WHEEL_ROWS;
    let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.status_message = None;
            if let Some(target) = state.hit_test(mouse.column, mouse.row) {
                click(state, target);
            }
        }
        MouseEventKind::ScrollLeft => page::swipe_track(state, -column_step),
        MouseEventKind::ScrollRight => page::swipe_track(state, column_step),
        // Shift+wheel scrolls sideways, as in browsers.
        MouseEventKind::ScrollUp if shift => page::swipe_track(state, -column_step),
        MouseEventKind::ScrollDown if shift => page::swipe_track(state, column_step),
        MouseEventKind::ScrollUp => scroll_page(state, -row_step),
        MouseEventKind::ScrollDown => scroll_page(state, row_step),
        _ => {}
    }
}

// ── Resize ──────────────────────────────────────────────────────

/// Viewport for a terminal of `columns` × `rows`; the last row is the status bar.
pub fn viewport_for(state: &PageState, columns: u16, rows: u16) -> Viewport {
    Viewport::new(
        f64::from(columns) * state.config.px_per_column,
        f64::from(rows.saturating_sub(1)) * state.config.px_per_row,
    )
}

pub fn handle_terminal_resize(state: &mut PageState, columns: u16, rows: u16) {
    let viewport = viewport_for(state, columns, rows);
    debug!(columns, rows, width = viewport.width, "terminal resized");
    page::handle_resize(state, viewport);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::event::Gate;
    use crate::app::state::HitRegion;
    use crate::config::AppConfig;
    use crate::core::landing::{build, LandingOptions};
    use ratatui::layout::Rect;

    fn phone() -> PageState {
        let doc = build(Viewport::new(400.0, 700.0), &LandingOptions::default());
        let mut state = PageState::new(doc, AppConfig::default());
        page::init_app(&mut state).unwrap();
        state
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        let mut state = phone();
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(state.should_quit);

        let mut state = phone();
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut state = phone();
        let mut key = press(KeyCode::Char('m'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut state, key);
        assert!(!state.drawer.is_open());
    }

    #[test]
    fn escape_closes_popup_before_drawer() {
        let mut state = phone();
        handle_key(&mut state, press(KeyCode::Char('m')));
        handle_key(&mut state, press(KeyCode::Char('c')));
        assert!(state.drawer.is_open() && state.popup.is_open());

        handle_key(&mut state, press(KeyCode::Esc));
        assert!(!state.popup.is_open());
        assert!(state.drawer.is_open());

        handle_key(&mut state, press(KeyCode::Esc));
        assert!(!state.drawer.is_open());
        assert!(!state.doc.body_style.is_scroll_locked());
    }

    #[test]
    fn page_keys_respect_scroll_lock() {
        let mut state = phone();
        handle_key(&mut state, press(KeyCode::Char('j')));
        let y = state.doc.scroll_y;
        assert!(y > 0.0);

        handle_key(&mut state, press(KeyCode::Char('m')));
        handle_key(&mut state, press(KeyCode::Char('j')));
        assert_eq!(state.doc.scroll_y, y);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn digit_clicks_a_dot() {
        let mut state = phone();
        handle_key(&mut state, press(KeyCode::Char('2')));
        assert!(state.animation.is_some());

        handle_key(&mut state, press(KeyCode::Char('9')));
        assert_eq!(state.status_message.as_deref(), Some("no dot 9"));
    }

    #[test]
    fn arrow_swipes_one_card() {
        let mut state = phone();
        handle_key(&mut state, press(KeyCode::Right));
        assert_eq!(state.pending_gates, vec![Gate::Scroll]);
        page::handle_settled(&mut state, Gate::Scroll);
        assert_eq!(state.carousel.active(), Some(1));

        handle_key(&mut state, press(KeyCode::Left));
        page::handle_settled(&mut state, Gate::Scroll);
        assert_eq!(state.carousel.active(), Some(0));
    }

    #[test]
    fn click_goes_to_topmost_region() {
        let mut state = phone();
        let popup = state.doc.get_element_by_id(CONTACT_POPUP_ID).unwrap();
        let content = state.doc.query_class("popup-content").unwrap();
        state.popup.show(&mut state.doc);
        state.hit_regions = vec![
            HitRegion {
                area: Rect::new(0, 0, 50, 20),
                element: popup,
            },
            HitRegion {
                area: Rect::new(10, 5, 30, 10),
                element: content,
            },
        ];

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 20, 8));
        assert!(state.popup.is_open());
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 2, 2));
        assert!(!state.popup.is_open());
    }

    #[test]
    fn wheel_scrolls_page_and_track() {
        let mut state = phone();
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 0, 0));
        assert_eq!(state.doc.scroll_y, 48.0);

        handle_mouse(&mut state, mouse(MouseEventKind::ScrollRight, 0, 0));
        let track = state.carousel.track().unwrap();
        assert_eq!(state.doc.scroll_left(track), 32.0);
    }

    #[test]
    fn terminal_resize_maps_cells_to_pixels() {
        let mut state = phone();
        handle_terminal_resize(&mut state, 200, 51);
        assert_eq!(state.doc.viewport.width, 1600.0);
        assert_eq!(state.doc.viewport.height, 800.0);
        assert_eq!(state.pending_gates.last(), Some(&Gate::Resize));

        page::handle_settled(&mut state, Gate::Resize);
        assert!(!state.carousel.is_bound());
        assert_eq!(state.carousel.listener_count(), 0);
    }
}
