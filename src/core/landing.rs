//! The landing page the controller is demonstrated on.
//!
//! [`build`] produces the markup (ids, classes and markers the behaviors look
//! for) and [`relayout`] measures it for a viewport: compact viewports get a
//! swipeable card track, wide ones a grid whose cards all fit.

use super::document::{Document, Element, ElementId, Geometry};
use super::markers::*;
use super::viewport::{Viewport, COMPACT_BREAKPOINT};

const HEADER_HEIGHT: f64 = 64.0;
const HERO_HEIGHT: f64 = 480.0;
const SECTION_HEIGHT: f64 = 360.0;
const CARD_HEIGHT: f64 = 260.0;
const DOTS_HEIGHT: f64 = 32.0;
/// Section heading above the card track.
const TRACK_OFFSET: f64 = 48.0;
const SIDE_PADDING: f64 = 16.0;
/// Share of the track a card takes in compact layout, so the next card peeks in.
const COMPACT_CARD_SHARE: f64 = 0.85;

const MANAGERS: &[&str] = &[
    "Anna Petrova · Fleet",
    "Igor Sokolov · Customs",
    "Maria Ivanova · Warehousing",
    "Pavel Orlov · Key accounts",
    "Elena Smirnova · Rail",
    "Dmitry Kuznetsov · Sea freight",
];

const NAV_LINKS: &[&str] = &["Services", "Managers", "Reviews", "Contacts"];

const SECTIONS: &[&str] = &["Services", "Reviews", "Contacts"];

#[derive(Debug, Clone)]
pub struct LandingOptions {
    /// Manager cards (and pagination dots) in the carousel.
    pub cards: usize,
    /// Leave out `#manager-pagination-dots`, which disables the carousel.
    pub with_pagination: bool,
    /// Thickness of the page scrollbar in pixels.
    pub scrollbar_size: f64,
    /// Widest viewport laid out as a swipeable track.
    pub compact_breakpoint: f64,
}

impl Default for LandingOptions {
    fn default() -> Self {
        Self {
            cards: 4,
            with_pagination: true,
            scrollbar_size: 0.0,
            compact_breakpoint: COMPACT_BREAKPOINT,
        }
    }
}

/// Build the landing page and lay it out for `viewport`.
pub fn build(viewport: Viewport, opts: &LandingOptions) -> Document {
    let mut doc = Document::new(viewport);
    doc.scrollbar_size = opts.scrollbar_size;
    doc.compact_breakpoint = opts.compact_breakpoint;
    let body = doc.root;

    let header = doc.append(body, Element::new("header").with_class("site-header"));
    doc.append(header, Element::new("a").with_class("logo").with_label("Northwind Logistics"));
    doc.append(header, Element::new("button").with_class(BURGER_CLASS).with_label("☰"));
    doc.append(
        header,
        Element::new("button").with_id(OPEN_POPUP_ID).with_label("Contact us"),
    );

    let nav = doc.append(body, Element::new("nav").with_id(MOBILE_NAV_ID));
    doc.append(nav, Element::new("button").with_class(NAV_CLOSE_CLASS).with_label("✕"));
    let list = doc.append(nav, Element::new("ul"));
    for &label in NAV_LINKS {
        doc.append(list, Element::new("a").with_marker(NAV_LINK_MARKER).with_label(label));
    }

    let main = doc.append(body, Element::new("main"));
    let hero = doc.append(
        main,
        Element::new("section")
            .with_class("hero")
            .with_class(FADE_IN_CLASS)
            .with_label("Freight without the guesswork"),
    );
    doc.append(
        hero,
        Element::new("a")
            .with_marker(POPUP_TRIGGER_MARKER)
            .with_label("Request a call"),
    );

    let managers = doc.append(
        main,
        Element::new("section")
            .with_class("managers")
            .with_class(FADE_IN_CLASS)
            .with_label("Your managers"),
    );
    let track = doc.append(managers, Element::new("div").with_class(MANAGERS_GRID_CLASS));
    for i in 0..opts.cards {
        let name = MANAGERS[i % MANAGERS.len()];
        doc.append(
            track,
            Element::new("article").with_class(MANAGER_CARD_CLASS).with_label(name),
        );
    }
    if opts.with_pagination {
        let dots = doc.append(managers, Element::new("div").with_id(PAGINATION_ID));
        for _ in 0..opts.cards {
            doc.append(dots, Element::new("span").with_class(DOT_CLASS));
        }
    }

    for &title in SECTIONS {
        doc.append(
            main,
            Element::new("section").with_class(FADE_IN_CLASS).with_label(title),
        );
    }

    let popup = doc.append(body, Element::new("div").with_id(CONTACT_POPUP_ID));
    let content = doc.append(
        popup,
        Element::new("div").with_class("popup-content").with_label("Get in touch"),
    );
    doc.append(content, Element::new("button").with_id(CLOSE_POPUP_ID).with_label("✕"));
    doc.append(content, Element::new("p").with_label("+1 555 0100 · hello@northwind.example"));
    doc.append(content, Element::new("p").with_label("Mon–Fri 9:00–18:00"));

    relayout(&mut doc, viewport);
    doc
}

/// Re-measure every element for `viewport` and keep scroll offsets in range.
pub fn relayout(doc: &mut Document, viewport: Viewport) {
    doc.viewport.width = viewport.width;
    doc.viewport.height = viewport.height;

    // Heights do not depend on width, so lay out vertically first and let the
    // scrollbar settle before measuring widths.
    let main = doc.query_tag("main");
    let mut top = 0.0;
    if let Some(header) = doc.query_class("site-header") {
        set_box(doc, header, 0.0, HEADER_HEIGHT);
        top = HEADER_HEIGHT;
    }
    let sections: Vec<ElementId> = main
        .and_then(|m| doc.get(m).map(|e| e.children.clone()))
        .unwrap_or_default();
    for &section in &sections {
        let height = section_height(doc, section);
        set_box(doc, section, top, height);
        for child in doc.nodes[section].children.clone() {
            set_box(doc, child, top, 0.0);
        }
        top += height;
    }
    if let Some(track) = doc.query_class(MANAGERS_GRID_CLASS) {
        let track_top = doc.nodes[track].geometry.top + TRACK_OFFSET;
        set_box(doc, track, track_top, CARD_HEIGHT);
        for card in doc.nodes[track].children.clone() {
            set_box(doc, card, track_top, CARD_HEIGHT);
        }
        if let Some(dots) = doc.get_element_by_id(PAGINATION_ID) {
            set_box(doc, dots, track_top + CARD_HEIGHT, DOTS_HEIGHT);
        }
    }
    doc.refresh_scrollbar();

    let client = doc.viewport.client_width();
    let content_width = (client - 2.0 * SIDE_PADDING).max(0.0);
    let compact = doc.is_compact();
    for el in &mut doc.nodes {
        el.geometry.width = content_width;
    }
    if let Some(track) = doc.query_class(MANAGERS_GRID_CLASS) {
        let cards = doc.nodes[track].children.clone();
        let card_width = if compact || cards.is_empty() {
            content_width * COMPACT_CARD_SHARE
        } else {
            content_width / cards.len() as f64
        };
        for card in cards {
            doc.nodes[card].geometry.width = card_width;
        }
        let left = doc.nodes[track].scroll_left;
        doc.set_scroll_left(track, left);
    }
    let y = doc.scroll_y;
    doc.set_scroll_y(y);
}

fn section_height(doc: &Document, section: ElementId) -> f64 {
    let el = &doc.nodes[section];
    if el.has_class("hero") {
        HERO_HEIGHT
    } else if el.has_class("managers") {
        TRACK_OFFSET + CARD_HEIGHT + DOTS_HEIGHT + 40.0
    } else {
        SECTION_HEIGHT
    }
}

fn set_box(doc: &mut Document, id: ElementId, top: f64, height: f64) {
    if let Some(el) = doc.get_mut(id) {
        el.geometry = Geometry {
            top,
            width: el.geometry.width,
            height,
        };
    }
}
