//! In-memory host document that the page behaviors attach to.
//!
//! The [`Document`] mirrors the parts of a browser DOM the controller can
//! observe or mutate: ids, class lists, data markers, measured geometry,
//! horizontal scroll offsets, the page's vertical offset and the body's inline
//! style.  Elements live in an arena and reference each other by index, the
//! same way the page tree is walked for queries and event bubbling.

use std::collections::BTreeSet;

use super::error::PageError;
use super::markers::StateMarker;
use super::viewport::{Viewport, COMPACT_BREAKPOINT};

// ───────────────────────────────────────── element ───────────

/// Index into [`Document::nodes`].
pub type ElementId = usize;

/// Layout box in page pixels.  `top` is measured from the top of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A single node in the arena-allocated document.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    /// Valueless `data-*` attributes, stored with their full name.
    pub markers: BTreeSet<String>,
    /// Text shown by the renderer.
    pub label: String,
    pub geometry: Geometry,
    /// Horizontal scroll offset; only meaningful for scroll containers.
    pub scroll_left: f64,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: BTreeSet::new(),
            markers: BTreeSet::new(),
            label: String::new(),
            geometry: Geometry::default(),
            scroll_left: 0.0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_marker(mut self, marker: &str) -> Self {
        self.markers.insert(marker.to_string());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn has_state(&self, marker: StateMarker) -> bool {
        self.has_class(marker.class_name())
    }
}

// ───────────────────────────────────────── body style ────────

/// Inline style of `<body>` written by the overlay scroll lock.
///
/// Empty strings mean "not set", matching an untouched inline style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyStyle {
    pub overflow: String,
    pub padding_right: String,
}

impl BodyStyle {
    pub fn is_scroll_locked(&self) -> bool {
        self.overflow == "hidden"
    }
}

// ───────────────────────────────────────── document ──────────

/// Arena-backed page document.  `root` is the `<body>` element.
#[derive(Debug, Clone)]
pub struct Document {
    pub nodes: Vec<Element>,
    pub root: ElementId,
    pub body_style: BodyStyle,
    pub viewport: Viewport,
    /// Vertical page offset (`window.scrollY`).
    pub scroll_y: f64,
    /// Thickness of the platform scrollbar when one is shown.
    pub scrollbar_size: f64,
    /// Widest viewport that still gets the compact layout.
    pub compact_breakpoint: f64,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            nodes: vec![Element::new("body")],
            root: 0,
            body_style: BodyStyle::default(),
            viewport,
            scroll_y: 0.0,
            scrollbar_size: 0.0,
            compact_breakpoint: COMPACT_BREAKPOINT,
        }
    }

    /// Whether the current viewport gets the compact layout.
    pub fn is_compact(&self) -> bool {
        self.viewport.is_compact(self.compact_breakpoint)
    }

    /// Append `element` as the last child of `parent` and return its id.
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = self.nodes.len();
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent].children.push(id);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id)
    }

    /// Like [`Document::get`] but reports stale ids as an error.
    pub fn element(&self, id: ElementId) -> Result<&Element, PageError> {
        self.get(id).ok_or(PageError::UnknownElement(id))
    }

    // ── queries ─────────────────────────────────────────────────

    /// Elements under `scope` (exclusive) in document order.
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let Some(start) = self.get(scope) else {
            return out;
        };
        let mut stack: Vec<ElementId> = start.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&e| self.nodes[e].id.as_deref() == Some(id))
    }

    /// First element with the given tag name.
    pub fn query_tag(&self, tag: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&e| self.nodes[e].tag == tag)
    }

    /// First element carrying `class` (`document.querySelector(".class")`).
    pub fn query_class(&self, class: &str) -> Option<ElementId> {
        self.query_class_all(class).into_iter().next()
    }

    pub fn query_class_all(&self, class: &str) -> Vec<ElementId> {
        self.query_class_within(self.root, class)
    }

    pub fn query_class_within(&self, scope: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&e| self.nodes[e].has_class(class))
            .collect()
    }

    pub fn query_marker_all(&self, marker: &str) -> Vec<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&e| self.nodes[e].markers.contains(marker))
            .collect()
    }

    /// Path an event takes when it bubbles: `target` first, `<body>` last.
    pub fn bubble_path(&self, target: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut cursor = self.get(target).map(|_| target);
        while let Some(id) = cursor {
            path.push(id);
            cursor = self.nodes[id].parent;
        }
        path
    }

    // ── class list ──────────────────────────────────────────────

    pub fn has_state(&self, id: ElementId, marker: StateMarker) -> bool {
        self.get(id).is_some_and(|e| e.has_state(marker))
    }

    /// Add or remove a state class.  Returns `true` if the class list changed.
    pub fn set_state(&mut self, id: ElementId, marker: StateMarker, on: bool) -> bool {
        let Some(el) = self.get_mut(id) else {
            return false;
        };
        let class = marker.class_name();
        if on {
            el.classes.insert(class.to_string())
        } else {
            el.classes.remove(class)
        }
    }

    // ── geometry & scrolling ────────────────────────────────────

    /// Measured width (`offsetWidth`); `0` for unknown ids.
    pub fn offset_width(&self, id: ElementId) -> f64 {
        self.get(id).map_or(0.0, |e| e.geometry.width)
    }

    pub fn scroll_left(&self, id: ElementId) -> f64 {
        self.get(id).map_or(0.0, |e| e.scroll_left)
    }

    /// Largest horizontal offset a container can scroll to: content width
    /// (sum of children) minus its own width.
    pub fn max_scroll_left(&self, id: ElementId) -> f64 {
        let Some(el) = self.get(id) else {
            return 0.0;
        };
        let content: f64 = el
            .children
            .iter()
            .map(|&c| self.nodes[c].geometry.width)
            .sum();
        (content - el.geometry.width).max(0.0)
    }

    /// Set a container's horizontal offset, clamped to its scroll range.
    /// Returns the applied offset.
    pub fn set_scroll_left(&mut self, id: ElementId, left: f64) -> f64 {
        let max = self.max_scroll_left(id);
        let clamped = if left.is_finite() { left.clamp(0.0, max) } else { 0.0 };
        if let Some(el) = self.get_mut(id) {
            el.scroll_left = clamped;
        }
        clamped
    }

    /// Total page height: bottom edge of the lowest element.
    pub fn content_height(&self) -> f64 {
        self.nodes
            .iter()
            .map(|e| e.geometry.top + e.geometry.height)
            .fold(0.0, f64::max)
    }

    pub fn max_scroll_y(&self) -> f64 {
        (self.content_height() - self.viewport.height).max(0.0)
    }

    /// Set the vertical page offset, clamped to the page's scroll range.
    pub fn set_scroll_y(&mut self, y: f64) -> f64 {
        let max = self.max_scroll_y();
        self.scroll_y = if y.is_finite() { y.clamp(0.0, max) } else { 0.0 };
        self.scroll_y
    }

    /// Show the page scrollbar only while the page overflows and the body
    /// is not scroll-locked.
    pub fn refresh_scrollbar(&mut self) {
        let shown = !self.body_style.is_scroll_locked() && self.max_scroll_y() > 0.0;
        self.viewport.scrollbar_width = if shown { self.scrollbar_size } else { 0.0 };
    }

    /// Fraction of the element's height currently inside the viewport.
    pub fn intersection_ratio(&self, id: ElementId) -> f64 {
        let Some(el) = self.get(id) else {
            return 0.0;
        };
        let g = el.geometry;
        let view_top = self.scroll_y;
        let view_bottom = self.scroll_y + self.viewport.height;
        if g.height <= 0.0 {
            return if g.top >= view_top && g.top <= view_bottom { 1.0 } else { 0.0 };
        }
        let overlap = (g.top + g.height).min(view_bottom) - g.top.max(view_top);
        (overlap.max(0.0) / g.height).min(1.0)
    }
}
