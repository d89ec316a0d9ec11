//! Managers carousel: keeps pagination dots in sync with the track's scroll
//! offset, and turns dot clicks into scroll commands.
//!
//! Dot state is never updated incrementally.  Every settle re-derives the
//! active index from the live offset and rewrites the whole indicator set, so
//! external tampering with dot classes heals on the next settle.  A dot click
//! does not mark the dot active either: it only scrolls the track, and the
//! scroll events that follow settle into the new index.

use tracing::debug;

use super::document::{Document, ElementId};
use super::listeners::{Binding, EventKind, ListenerId, ListenerRegistry};
use super::markers::{StateMarker, DOT_CLASS, MANAGERS_GRID_CLASS, MANAGER_CARD_CLASS, PAGINATION_ID};

// ───────────────────────────────────────── index math ────────

/// Card index under the track's leading edge: `round(offset / card_width)`,
/// clamped to `[0, count - 1]`.
///
/// `None` when there is nothing to select.  A card width that is not a
/// positive finite number maps to the first card.
pub fn active_index(offset: f64, card_width: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if !(card_width.is_finite() && card_width > 0.0) {
        return Some(0);
    }
    let raw = (offset / card_width).round();
    if !raw.is_finite() || raw <= 0.0 {
        return Some(0);
    }
    Some((raw as usize).min(count - 1))
}

// ───────────────────────────────────────── types ─────────────

/// Explicit per-dot state, rendered to the dot's `active` class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorState {
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Request to scroll a container horizontally.  Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub target: ElementId,
    pub left: f64,
    pub behavior: ScrollBehavior,
}

/// Elements captured by a successful [`CarouselEngine::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    track: ElementId,
    cards: Vec<ElementId>,
    dots: Vec<ElementId>,
}

// ───────────────────────────────────────── engine ────────────

#[derive(Debug, Default)]
pub struct CarouselEngine {
    bound: Option<Bound>,
    indicators: Vec<IndicatorState>,
    /// Registrations owned by the current binding.
    listeners: Vec<ListenerId>,
}

impl CarouselEngine {
    /// Bind to the carousel markup if the page qualifies, then settle once.
    ///
    /// Safe to call any number of times: registrations from a previous call
    /// are released first, and element ids are re-queried from `doc`.
    /// Returns `false` (with nothing registered) when the viewport is wider
    /// than `breakpoint` or any part of the markup is missing.
    pub fn init(
        &mut self,
        doc: &mut Document,
        registry: &mut ListenerRegistry,
        breakpoint: f64,
    ) -> bool {
        registry.release(&mut self.listeners);
        self.bound = None;
        self.indicators.clear();

        let Some(track) = doc.query_class(MANAGERS_GRID_CLASS) else {
            debug!("carousel: no track on page");
            return false;
        };
        let Some(pagination) = doc.get_element_by_id(PAGINATION_ID) else {
            debug!("carousel: no pagination container");
            return false;
        };
        if !doc.viewport.is_compact(breakpoint) {
            debug!(width = doc.viewport.width, "carousel: viewport not compact");
            return false;
        }
        let cards = doc.query_class_within(track, MANAGER_CARD_CLASS);
        let dots = doc.query_class_within(pagination, DOT_CLASS);
        if cards.is_empty() || dots.is_empty() {
            debug!(cards = cards.len(), dots = dots.len(), "carousel: empty markup");
            return false;
        }

        self.listeners
            .push(registry.add(track, EventKind::Scroll, Binding::TrackScroll));
        for (i, &dot) in dots.iter().enumerate() {
            self.listeners
                .push(registry.add(dot, EventKind::Click, Binding::DotClick(i)));
        }
        self.indicators = vec![IndicatorState::default(); dots.len()];
        self.bound = Some(Bound { track, cards, dots });
        debug!(listeners = self.listener_count(), "carousel bound");

        self.settle(doc);
        true
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    pub fn track(&self) -> Option<ElementId> {
        self.bound.as_ref().map(|b| b.track)
    }

    pub fn dots(&self) -> &[ElementId] {
        self.bound
            .as_ref()
            .map(|b| b.dots.as_slice())
            .unwrap_or_default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn indicators(&self) -> &[IndicatorState] {
        &self.indicators
    }

    pub fn active(&self) -> Option<usize> {
        self.indicators.iter().position(|i| i.active)
    }

    /// Re-derive the active dot from the track's current offset and render
    /// the indicator set.  Returns the active index.
    pub fn settle(&mut self, doc: &mut Document) -> Option<usize> {
        let bound = self.bound.as_ref()?;
        let offset = doc.scroll_left(bound.track);
        let card_width = doc.offset_width(bound.cards[0]);
        let index = active_index(offset, card_width, bound.dots.len());

        for (i, indicator) in self.indicators.iter_mut().enumerate() {
            indicator.active = index == Some(i);
        }
        self.render(doc);
        debug!(offset, card_width, ?index, "carousel settled");
        index
    }

    /// Write indicator state to the dots' class lists.
    fn render(&self, doc: &mut Document) {
        let Some(bound) = self.bound.as_ref() else {
            return;
        };
        for (&dot, indicator) in bound.dots.iter().zip(&self.indicators) {
            doc.set_state(dot, StateMarker::Active, indicator.active);
        }
    }

    /// Smooth scroll that brings card `index` to the leading edge.
    pub fn scroll_command(&self, doc: &Document, index: usize) -> Option<ScrollCommand> {
        let bound = self.bound.as_ref()?;
        let card_width = doc.offset_width(bound.cards[0]);
        Some(ScrollCommand {
            target: bound.track,
            left: index as f64 * card_width,
            behavior: ScrollBehavior::Smooth,
        })
    }
}
