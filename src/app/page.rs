//! Page controller: binds the behaviors to the document on start-up and
//! routes DOM-level events (click, scroll, resize, settle, frame) to them.

use std::fmt::Write as _;

use tracing::{debug, info};

use super::event::Gate;
use super::state::{PageState, TrackAnimation};
use crate::core::{
    carousel::{ScrollBehavior, ScrollCommand},
    document::ElementId,
    error::PageError,
    landing,
    listeners::{Binding, EventKind},
    markers::*,
    overlay::OverlayController,
    reveal::RevealObserver,
    viewport::Viewport,
};
use crate::ui::smooth_scroll::SmoothScroll;

/// What happened while a click bubbled through the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Number of listeners that ran.
    pub handled: usize,
    /// A listener asked to suppress the element's default action.
    pub default_prevented: bool,
}

// ───────────────────────────────────────── start-up ──────────

/// Wire every behavior to the page (document-ready).
///
/// The drawer and the popup are required; without either nothing is bound.
/// Everything else is optional and silently skipped when absent.  Calling this
/// again replaces the previous bindings and closes any overlay they left open.
pub fn init_app(state: &mut PageState) -> Result<(), PageError> {
    let doc = &state.doc;
    let nav = doc
        .get_element_by_id(MOBILE_NAV_ID)
        .ok_or(PageError::MissingRequiredElement(MOBILE_NAV_ID))?;
    let popup = doc
        .get_element_by_id(CONTACT_POPUP_ID)
        .ok_or(PageError::MissingRequiredElement(CONTACT_POPUP_ID))?;

    let mut bindings: Vec<(ElementId, Binding)> = Vec::new();
    if let Some(burger) = doc.query_class(BURGER_CLASS) {
        bindings.push((burger, Binding::ShowNav));
    }
    if let Some(close) = doc.query_class(NAV_CLOSE_CLASS) {
        bindings.push((close, Binding::HideNav));
    }
    for link in doc.query_marker_all(NAV_LINK_MARKER) {
        bindings.push((link, Binding::HideNav));
    }
    if let Some(open) = doc.get_element_by_id(OPEN_POPUP_ID) {
        bindings.push((open, Binding::ShowPopup));
    }
    if let Some(close) = doc.get_element_by_id(CLOSE_POPUP_ID) {
        bindings.push((close, Binding::HidePopup));
    }
    bindings.push((popup, Binding::PopupBackdrop));
    for trigger in doc.query_marker_all(POPUP_TRIGGER_MARKER) {
        bindings.push((trigger, Binding::PopupTrigger));
    }

    state.listeners.release(&mut state.app_listeners);
    for (target, binding) in bindings {
        let id = state.listeners.add(target, EventKind::Click, binding);
        state.app_listeners.push(id);
    }
    for overlay in [&mut state.drawer, &mut state.popup] {
        if overlay.is_open() {
            overlay.hide(&mut state.doc);
        }
    }
    state.drawer = OverlayController::new(Some(nav));
    state.popup = OverlayController::new(Some(popup));

    let carousel = init_carousel(state);
    init_reveal(state);
    info!(
        listeners = state.listeners.len(),
        carousel,
        observed = state.reveal.observed_count(),
        "page initialized"
    );
    Ok(())
}

/// (Re)bind the carousel.  A no-op unless the viewport is compact and the
/// carousel markup is complete.
pub fn init_carousel(state: &mut PageState) -> bool {
    let breakpoint = state.doc.compact_breakpoint;
    state.carousel.init(&mut state.doc, &mut state.listeners, breakpoint)
}

fn init_reveal(state: &mut PageState) {
    let targets = state.doc.query_class_all(FADE_IN_CLASS);
    state.reveal = RevealObserver::new(state.config.reveal_threshold);
    if targets.is_empty() {
        debug!("reveal: nothing to observe");
        return;
    }
    state.reveal.observe(&targets);
    // Observers report elements that start out in view right away.
    check_reveal(state);
}

// ───────────────────────────────────────── events ────────────

/// Dispatch a click on `target`, bubbling up to `<body>`.
pub fn dispatch_click(state: &mut PageState, target: ElementId) -> ClickOutcome {
    let mut outcome = ClickOutcome::default();
    if let Err(err) = state.doc.element(target) {
        debug!(%err, "click ignored");
        return outcome;
    }
    for current in state.doc.bubble_path(target) {
        for binding in state.listeners.bindings_for(current, EventKind::Click) {
            outcome.handled += 1;
            match binding {
                Binding::ShowNav => state.drawer.show(&mut state.doc),
                Binding::HideNav => state.drawer.hide(&mut state.doc),
                Binding::ShowPopup => state.popup.show(&mut state.doc),
                Binding::HidePopup => state.popup.hide(&mut state.doc),
                Binding::PopupBackdrop => {
                    if target == current {
                        state.popup.hide(&mut state.doc);
                    }
                }
                Binding::PopupTrigger => {
                    outcome.default_prevented = true;
                    state.popup.show(&mut state.doc);
                }
                Binding::DotClick(index) => {
                    if let Some(cmd) = state.carousel.scroll_command(&state.doc, index) {
                        apply_scroll_command(state, cmd);
                    }
                }
                Binding::TrackScroll => {}
            }
        }
    }
    debug!(element = target, ?outcome, "click");
    outcome
}

/// Default action of a click that nobody prevented: an in-page link jumps to
/// the section it names.
pub fn follow_link(state: &mut PageState, target: ElementId) -> bool {
    let Some(link) = state.doc.get(target).filter(|e| e.tag == "a") else {
        return false;
    };
    let wanted = link.label.to_lowercase();
    if wanted.is_empty() {
        return false;
    }
    let section = state
        .doc
        .query_class_all(FADE_IN_CLASS)
        .into_iter()
        .filter_map(|s| state.doc.get(s))
        .find(|s| s.label.to_lowercase().contains(&wanted))
        .map(|s| s.geometry.top);
    let Some(top) = section else {
        return false;
    };
    let delta = top - state.doc.scroll_y;
    scroll_page(state, delta)
}

/// Dispatch a scroll event on `target` (scroll events do not bubble).
pub fn dispatch_scroll(state: &mut PageState, target: ElementId) -> bool {
    let mut handled = false;
    for binding in state.listeners.bindings_for(target, EventKind::Scroll) {
        if binding == Binding::TrackScroll {
            state.pending_gates.push(Gate::Scroll);
            handled = true;
        }
    }
    handled
}

/// Scroll a horizontal container, instantly or by starting an animation.
pub fn apply_scroll_command(state: &mut PageState, cmd: ScrollCommand) {
    match cmd.behavior {
        ScrollBehavior::Instant => {
            state.animation = None;
            let before = state.doc.scroll_left(cmd.target);
            let after = state.doc.set_scroll_left(cmd.target, cmd.left);
            if after != before {
                dispatch_scroll(state, cmd.target);
            }
        }
        ScrollBehavior::Smooth => {
            let to = cmd.left.clamp(0.0, state.doc.max_scroll_left(cmd.target));
            match state.animation.as_mut() {
                Some(anim) if anim.target == cmd.target => anim.scroll.retarget(to),
                _ => {
                    let from = state.doc.scroll_left(cmd.target);
                    state.animation = Some(TrackAnimation {
                        target: cmd.target,
                        scroll: SmoothScroll::new(from, to, state.config.smooth_scroll_speed),
                    });
                }
            }
        }
    }
}

/// User swipe on the carousel track by `delta` pixels.
pub fn swipe_track(state: &mut PageState, delta: f64) {
    let Some(track) = state.doc.query_class(MANAGERS_GRID_CLASS) else {
        return;
    };
    let left = state.doc.scroll_left(track) + delta;
    apply_scroll_command(
        state,
        ScrollCommand {
            target: track,
            left,
            behavior: ScrollBehavior::Instant,
        },
    );
}

/// Scroll the page vertically.  Refused while an overlay holds the scroll lock.
pub fn scroll_page(state: &mut PageState, delta: f64) -> bool {
    if state.doc.body_style.is_scroll_locked() {
        debug!("page scroll ignored: body is scroll-locked");
        return false;
    }
    let before = state.doc.scroll_y;
    let after = state.doc.set_scroll_y(before + delta);
    if after != before {
        check_reveal(state);
    }
    after != before
}

/// Window resized: re-measure now, re-initialize the carousel once settled.
pub fn handle_resize(state: &mut PageState, viewport: Viewport) {
    landing::relayout(&mut state.doc, viewport);
    check_reveal(state);
    state.pending_gates.push(Gate::Resize);
}

pub fn handle_settled(state: &mut PageState, gate: Gate) {
    match gate {
        Gate::Scroll => {
            state.carousel.settle(&mut state.doc);
        }
        Gate::Resize => {
            let was_bound = state.carousel.is_bound();
            let bound = init_carousel(state);
            if bound != was_bound {
                info!(bound, width = state.doc.viewport.width, "carousel mode changed");
            }
        }
    }
}

/// Advance the running smooth scroll by one frame.  Every frame is a scroll
/// event, exactly like a browser animating `scrollTo`.
pub fn tick(state: &mut PageState) {
    let Some(anim) = state.animation.as_mut() else {
        return;
    };
    let target = anim.target;
    let offset = anim.scroll.tick();
    let done = !anim.scroll.is_animating();
    let destination = anim.scroll.target();
    state.doc.set_scroll_left(target, offset);
    dispatch_scroll(state, target);
    if done {
        debug!(element = target, left = destination, "smooth scroll finished");
        state.animation = None;
    }
}

/// Deliver intersection entries for the current scroll position.
pub fn check_reveal(state: &mut PageState) -> Vec<ElementId> {
    let entries = state.reveal.entries(&state.doc);
    if entries.is_empty() {
        return Vec::new();
    }
    for entry in &entries {
        debug!(element = entry.target, ratio = entry.ratio, "section in view");
    }
    state.reveal.handle(&mut state.doc, &entries)
}

// ───────────────────────────────────────── summary ───────────

/// Plain-text snapshot of the page's behavioral state.
pub fn describe(state: &PageState) -> String {
    let doc = &state.doc;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "viewport: {}x{} ({})",
        doc.viewport.width,
        doc.viewport.height,
        if doc.is_compact() {
            "compact"
        } else {
            "wide"
        }
    );
    let _ = writeln!(out, "drawer: {}", open_label(state.drawer.is_open()));
    let _ = writeln!(out, "popup: {}", open_label(state.popup.is_open()));
    let _ = writeln!(
        out,
        "body: overflow={:?} padding-right={:?}",
        doc.body_style.overflow, doc.body_style.padding_right
    );
    match state.carousel.track() {
        Some(track) => {
            let dots: String = state
                .carousel
                .indicators()
                .iter()
                .map(|i| if i.active { '●' } else { '○' })
                .collect();
            let _ = writeln!(
                out,
                "carousel: offset={} active={} dots={dots}",
                doc.scroll_left(track),
                state.carousel.active().map_or(0, |i| i + 1)
            );
        }
        None => {
            let _ = writeln!(out, "carousel: inactive");
        }
    }
    let revealed = doc
        .query_class_all(FADE_IN_CLASS)
        .into_iter()
        .filter(|&e| doc.has_state(e, StateMarker::Visible))
        .count();
    let _ = writeln!(
        out,
        "reveal: {revealed} visible, {} observed",
        state.reveal.observed_count()
    );
    let _ = writeln!(out, "listeners: {}", state.listeners.len());
    out
}

fn open_label(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::document::{Document, Element};
    use crate::core::landing::{build, LandingOptions};

    const PHONE: Viewport = Viewport {
        width: 375.0,
        height: 700.0,
        scrollbar_width: 0.0,
    };

    fn landing_state(viewport: Viewport, opts: LandingOptions) -> PageState {
        let mut state = PageState::new(build(viewport, &opts), AppConfig::default());
        init_app(&mut state).unwrap();
        state
    }

    fn phone() -> PageState {
        landing_state(
            PHONE,
            LandingOptions {
                scrollbar_size: 12.0,
                ..LandingOptions::default()
            },
        )
    }

    fn by_id(state: &PageState, id: &str) -> ElementId {
        state.doc.get_element_by_id(id).unwrap()
    }

    fn active_dot(state: &PageState) -> Vec<usize> {
        state
            .carousel
            .dots()
            .iter()
            .enumerate()
            .filter(|&(_, &d)| state.doc.has_state(d, StateMarker::Active))
            .map(|(i, _)| i)
            .collect()
    }

    /// Run animation frames until the smooth scroll lands.
    fn finish_animation(state: &mut PageState) {
        let mut frames = 0;
        while state.animation.is_some() {
            tick(state);
            frames += 1;
            assert!(frames < 200, "animation never settled");
        }
    }

    #[test]
    fn missing_required_element_binds_nothing() {
        let mut doc = Document::new(PHONE);
        doc.append(doc.root, Element::new("nav").with_id(MOBILE_NAV_ID));
        doc.append(doc.root, Element::new("button").with_class(BURGER_CLASS));
        let mut state = PageState::new(doc, AppConfig::default());

        assert_eq!(
            init_app(&mut state),
            Err(PageError::MissingRequiredElement(CONTACT_POPUP_ID))
        );
        assert!(state.listeners.is_empty());
    }

    #[test]
    fn burger_and_nav_link_toggle_the_drawer() {
        let mut state = phone();
        let burger = state.doc.query_class(BURGER_CLASS).unwrap();
        let nav = by_id(&state, MOBILE_NAV_ID);

        dispatch_click(&mut state, burger);
        assert!(state.drawer.is_open());
        assert!(state.doc.has_state(nav, StateMarker::Active));
        assert_eq!(state.doc.body_style.overflow, "hidden");
        assert_eq!(state.doc.body_style.padding_right, "12px");

        let link = state.doc.query_marker_all(NAV_LINK_MARKER)[2];
        dispatch_click(&mut state, link);
        assert!(!state.drawer.is_open());
        assert!(!state.doc.has_state(nav, StateMarker::Active));
        assert_eq!(state.doc.body_style.overflow, "");
        assert_eq!(state.doc.body_style.padding_right, "");
    }

    #[test]
    fn backdrop_closes_only_on_direct_hit() {
        let mut state = phone();
        let popup = by_id(&state, CONTACT_POPUP_ID);
        let open = by_id(&state, OPEN_POPUP_ID);
        let content = state.doc.query_class("popup-content").unwrap();

        dispatch_click(&mut state, open);
        assert!(state.popup.is_open());

        // Bubbles through the popup, but the target is its content.
        let outcome = dispatch_click(&mut state, content);
        assert_eq!(outcome.handled, 1);
        assert!(state.popup.is_open());

        dispatch_click(&mut state, popup);
        assert!(!state.popup.is_open());
    }

    #[test]
    fn close_button_inside_popup_closes_it() {
        let mut state = phone();
        let (open, close) = (by_id(&state, OPEN_POPUP_ID), by_id(&state, CLOSE_POPUP_ID));
        dispatch_click(&mut state, open);
        let outcome = dispatch_click(&mut state, close);
        assert_eq!(outcome.handled, 2); // close button + backdrop check
        assert!(!state.popup.is_open());
    }

    #[test]
    fn popup_trigger_prevents_default() {
        let mut state = phone();
        let trigger = state.doc.query_marker_all(POPUP_TRIGGER_MARKER)[0];
        let outcome = dispatch_click(&mut state, trigger);
        assert!(outcome.default_prevented);
        assert!(state.popup.is_open());
    }

    #[test]
    fn scroll_lock_blocks_page_scroll() {
        let mut state = phone();
        assert!(scroll_page(&mut state, 100.0));
        let open = by_id(&state, OPEN_POPUP_ID);
        dispatch_click(&mut state, open);
        assert!(!scroll_page(&mut state, 100.0));
        assert_eq!(state.doc.scroll_y, 100.0);
    }

    #[test]
    fn carousel_starts_on_first_dot() {
        let state = phone();
        assert!(state.carousel.is_bound());
        assert_eq!(active_dot(&state), vec![0]);
    }

    #[test]
    fn dot_click_settles_after_scrolling() {
        let mut state = phone();
        let dot = state.carousel.dots()[2];
        let card = state.doc.query_class(MANAGER_CARD_CLASS).unwrap();
        let card_width = state.doc.offset_width(card);

        dispatch_click(&mut state, dot);
        assert_eq!(active_dot(&state), vec![0], "dot activates only after settle");
        assert!(state.animation.is_some());

        finish_animation(&mut state);
        let track = state.carousel.track().unwrap();
        assert_eq!(state.doc.scroll_left(track), 2.0 * card_width);
        assert!(state.pending_gates.iter().all(|&g| g == Gate::Scroll));
        assert!(!state.pending_gates.is_empty());

        handle_settled(&mut state, Gate::Scroll);
        assert_eq!(active_dot(&state), vec![2]);
    }

    #[test]
    fn last_dot_clamps_to_track_end() {
        let mut state = phone();
        let last = *state.carousel.dots().last().unwrap();
        dispatch_click(&mut state, last);
        finish_animation(&mut state);
        handle_settled(&mut state, Gate::Scroll);
        assert_eq!(active_dot(&state), vec![3]);
    }

    #[test]
    fn swipe_feeds_the_scroll_gate() {
        let mut state = phone();
        swipe_track(&mut state, 300.0);
        assert_eq!(state.pending_gates, vec![Gate::Scroll]);
        handle_settled(&mut state, Gate::Scroll);
        assert_eq!(active_dot(&state), vec![1]);

        // Swiping against the start edge changes nothing, so no event fires.
        state.pending_gates.clear();
        swipe_track(&mut state, -10_000.0);
        swipe_track(&mut state, -10.0);
        assert_eq!(state.pending_gates, vec![Gate::Scroll]);
    }

    #[test]
    fn resize_rebinds_without_accumulating_listeners() {
        let mut state = phone();
        let baseline = state.listeners.len();

        for width in [360.0, 390.0, 414.0] {
            handle_resize(&mut state, Viewport::new(width, 700.0));
            handle_settled(&mut state, Gate::Resize);
        }
        assert_eq!(state.listeners.len(), baseline);

        handle_resize(&mut state, Viewport::new(1440.0, 900.0));
        handle_settled(&mut state, Gate::Resize);
        assert!(!state.carousel.is_bound());
        assert_eq!(state.listeners.count(EventKind::Scroll), 0);
    }

    #[test]
    fn wide_page_has_no_carousel() {
        let state = landing_state(Viewport::new(1440.0, 900.0), LandingOptions::default());
        assert!(!state.carousel.is_bound());
        assert_eq!(state.listeners.count(EventKind::Scroll), 0);
    }

    #[test]
    fn page_without_pagination_still_initializes() {
        let state = landing_state(
            PHONE,
            LandingOptions {
                with_pagination: false,
                ..LandingOptions::default()
            },
        );
        assert!(!state.carousel.is_bound());
        assert!(state.listeners.count(EventKind::Click) > 0);
    }

    #[test]
    fn sections_reveal_as_the_page_scrolls() {
        let mut state = phone();
        let sections = state.doc.query_class_all(FADE_IN_CLASS);
        // The hero is in view from the start.
        assert!(state.doc.has_state(sections[0], StateMarker::Visible));
        assert!(!state.doc.has_state(*sections.last().unwrap(), StateMarker::Visible));

        while scroll_page(&mut state, 200.0) {}
        for &s in &sections {
            assert!(state.doc.has_state(s, StateMarker::Visible));
        }
        assert_eq!(state.reveal.observed_count(), 0);

        // Scrolling back up never hides anything again.
        scroll_page(&mut state, -10_000.0);
        assert!(state.doc.has_state(*sections.last().unwrap(), StateMarker::Visible));
    }

    #[test]
    fn nav_link_closes_drawer_then_jumps_to_section() {
        let mut state = phone();
        let burger = state.doc.query_class(BURGER_CLASS).unwrap();
        dispatch_click(&mut state, burger);

        let reviews = state
            .doc
            .query_marker_all(NAV_LINK_MARKER)
            .into_iter()
            .find(|&l| state.doc.get(l).unwrap().label == "Reviews")
            .unwrap();
        let outcome = dispatch_click(&mut state, reviews);
        assert!(!outcome.default_prevented);
        assert!(follow_link(&mut state, reviews));
        assert!(state.doc.scroll_y > 0.0);
    }

    #[test]
    fn describe_reports_state() {
        let mut state = phone();
        let open = by_id(&state, OPEN_POPUP_ID);
        dispatch_click(&mut state, open);
        let text = describe(&state);
        assert!(text.contains("compact"));
        assert!(text.contains("popup: open"));
        assert!(text.contains("active=1 dots=●○○○"));
    }

    #[test]
    fn reinit_closes_open_overlays() {
        let mut state = phone();
        let open = by_id(&state, OPEN_POPUP_ID);
        let burger = state.doc.query_class(BURGER_CLASS).unwrap();
        dispatch_click(&mut state, burger);
        dispatch_click(&mut state, open);
        assert!(state.doc.body_style.is_scroll_locked());

        init_app(&mut state).unwrap();
        assert!(!state.popup.is_open() && !state.drawer.is_open());
        assert!(!state.doc.has_state(by_id(&state, CONTACT_POPUP_ID), StateMarker::Active));
        assert!(!state.doc.has_state(by_id(&state, MOBILE_NAV_ID), StateMarker::Active));
        assert!(!state.doc.body_style.is_scroll_locked());

        // The fresh controllers still drive the same elements.
        dispatch_click(&mut state, open);
        assert!(state.popup.is_open());
        assert!(state.doc.has_state(by_id(&state, CONTACT_POPUP_ID), StateMarker::Active));
    }

    fn with_breakpoint(width: f64, breakpoint: f64) -> PageState {
        let config = AppConfig {
            compact_breakpoint: breakpoint,
            ..AppConfig::default()
        };
        let doc = build(Viewport::new(width, 700.0), &LandingOptions::default());
        let mut state = PageState::new(doc, config);
        init_app(&mut state).unwrap();
        state
    }

    #[test]
    fn lower_breakpoint_gives_a_static_grid() {
        let mut state = with_breakpoint(900.0, 767.0);
        let track = state.doc.query_class(MANAGERS_GRID_CLASS).unwrap();
        assert!(!state.carousel.is_bound());
        assert!(state.doc.max_scroll_left(track) < 1e-6);
        assert!(describe(&state).contains("wide"));

        let dot = state.doc.query_class(DOT_CLASS).unwrap();
        assert_eq!(dispatch_click(&mut state, dot).handled, 0);
    }

    #[test]
    fn higher_breakpoint_binds_a_wider_viewport() {
        let mut state = with_breakpoint(1100.0, 1200.0);
        let track = state.doc.query_class(MANAGERS_GRID_CLASS).unwrap();
        assert!(state.carousel.is_bound());
        assert!(state.doc.max_scroll_left(track) > 0.0);

        let last = *state.carousel.dots().last().unwrap();
        dispatch_click(&mut state, last);
        assert!(state.animation.is_some());

        // Growing past the configured width unbinds once the resize settles.
        handle_resize(&mut state, Viewport::new(1300.0, 700.0));
        handle_settled(&mut state, Gate::Resize);
        assert!(!state.carousel.is_bound());
        assert!(state.doc.max_scroll_left(track) < 1e-6);
    }
}
