//! Show/hide for overlay elements (navigation drawer, contact popup) with the
//! page scroll lock that comes with them.

use super::document::{BodyStyle, Document, ElementId};
use super::markers::StateMarker;

/// Show or hide `element`.
///
/// Showing adds `active` and, when `lock_scroll` is set, hides body overflow
/// and pads the body by the current scrollbar width so content does not shift
/// sideways.  Hiding removes `active` and always clears both body properties,
/// whatever `lock_scroll` was used to open it.  An absent element does nothing.
pub fn set_overlay_state(
    doc: &mut Document,
    element: Option<ElementId>,
    visible: bool,
    lock_scroll: bool,
) {
    let Some(element) = element.filter(|&e| doc.get(e).is_some()) else {
        return;
    };

    let scrollbar_width = doc.viewport.width - doc.viewport.client_width();

    if visible {
        doc.set_state(element, StateMarker::Active, true);
        if lock_scroll {
            doc.body_style.overflow = "hidden".to_string();
            doc.body_style.padding_right = format!("{scrollbar_width}px");
        }
    } else {
        doc.set_state(element, StateMarker::Active, false);
        doc.body_style = BodyStyle::default();
    }
    doc.refresh_scrollbar();
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub active: bool,
}

/// Explicit open/closed state for one overlay, rendered through
/// [`set_overlay_state`].
#[derive(Debug, Clone)]
pub struct OverlayController {
    element: Option<ElementId>,
    state: OverlayState,
    lock_scroll: bool,
}

impl OverlayController {
    pub fn new(element: Option<ElementId>) -> Self {
        Self {
            element,
            state: OverlayState::default(),
            lock_scroll: true,
        }
    }

    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    pub fn is_open(&self) -> bool {
        self.state.active
    }

    pub fn show(&mut self, doc: &mut Document) {
        self.state.active = true;
        self.render(doc);
    }

    pub fn hide(&mut self, doc: &mut Document) {
        self.state.active = false;
        self.render(doc);
    }

    fn render(&self, doc: &mut Document) {
        set_overlay_state(doc, self.element, self.state.active, self.lock_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::{Element, Geometry};
    use crate::core::viewport::Viewport;

    /// Tall page (so it scrolls) with a 15px scrollbar and one overlay.
    fn scrolling_page() -> (Document, ElementId) {
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        doc.scrollbar_size = 15.0;
        let mut content = Element::new("main");
        content.geometry = Geometry { top: 0.0, width: 800.0, height: 2400.0 };
        doc.append(doc.root, content);
        let popup = doc.append(doc.root, Element::new("div").with_id("contact-popup"));
        doc.refresh_scrollbar();
        (doc, popup)
    }

    #[test]
    fn show_then_hide_restores_body_style() {
        let (mut doc, popup) = scrolling_page();
        assert_eq!(doc.viewport.scrollbar_width, 15.0);

        set_overlay_state(&mut doc, Some(popup), true, true);
        assert!(doc.has_state(popup, StateMarker::Active));
        assert_eq!(doc.body_style.overflow, "hidden");
        assert_eq!(doc.body_style.padding_right, "15px");
        assert_eq!(doc.viewport.scrollbar_width, 0.0);

        set_overlay_state(&mut doc, Some(popup), false, true);
        assert!(!doc.has_state(popup, StateMarker::Active));
        assert_eq!(doc.body_style.overflow, "");
        assert_eq!(doc.body_style.padding_right, "");
        assert_eq!(doc.viewport.scrollbar_width, 15.0);
    }

    #[test]
    fn hide_clears_lock_regardless_of_flag() {
        let (mut doc, popup) = scrolling_page();
        set_overlay_state(&mut doc, Some(popup), true, true);
        set_overlay_state(&mut doc, Some(popup), false, false);
        assert_eq!(doc.body_style, BodyStyle::default());
    }

    #[test]
    fn show_without_lock_leaves_body_alone() {
        let (mut doc, popup) = scrolling_page();
        set_overlay_state(&mut doc, Some(popup), true, false);
        assert!(doc.has_state(popup, StateMarker::Active));
        assert_eq!(doc.body_style, BodyStyle::default());
    }

    #[test]
    fn absent_element_is_a_noop() {
        let (mut doc, _) = scrolling_page();
        set_overlay_state(&mut doc, None, true, true);
        set_overlay_state(&mut doc, Some(999), true, true);
        assert_eq!(doc.body_style, BodyStyle::default());
    }

    #[test]
    fn second_overlay_measures_the_locked_page() {
        let (mut doc, popup) = scrolling_page();
        let nav = doc.append(doc.root, Element::new("nav").with_id("mobileNav"));
        let mut drawer = OverlayController::new(Some(nav));
        let mut modal = OverlayController::new(Some(popup));

        drawer.show(&mut doc);
        modal.show(&mut doc);
        assert!(drawer.is_open() && modal.is_open());
        // Last writer wins: the scrollbar was already gone.
        assert_eq!(doc.body_style.padding_right, "0px");

        modal.hide(&mut doc);
        assert!(drawer.is_open());
        assert!(!doc.body_style.is_scroll_locked());
    }
}
