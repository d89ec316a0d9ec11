//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&PageState` (rendering) or `&mut PageState` (event
//! handling).

use ratatui::layout::Rect;

use super::event::Gate;
use crate::config::AppConfig;
use crate::core::{
    carousel::CarouselEngine,
    document::{Document, ElementId},
    landing,
    listeners::{ListenerId, ListenerRegistry},
    overlay::OverlayController,
    reveal::RevealObserver,
};
use crate::ui::smooth_scroll::SmoothScroll;

/// Screen area that forwards mouse clicks to a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub element: ElementId,
}

/// Smooth scroll in flight on a horizontal scroll container.
#[derive(Debug, Clone)]
pub struct TrackAnimation {
    pub target: ElementId,
    pub scroll: SmoothScroll,
}

/// Top-level application state.
pub struct PageState {
    /// The page the behaviors operate on.
    pub doc: Document,
    pub config: AppConfig,
    pub listeners: ListenerRegistry,
    /// Listeners bound by page initialization (drawer and popup triggers).
    pub app_listeners: Vec<ListenerId>,
    pub drawer: OverlayController,
    pub popup: OverlayController,
    pub carousel: CarouselEngine,
    pub reveal: RevealObserver,
    /// Running smooth scroll, advanced once per tick.
    pub animation: Option<TrackAnimation>,
    /// Debounce gates to (re)arm; drained by the main loop after each event.
    pub pending_gates: Vec<Gate>,
    /// Clickable regions from the last frame, topmost last.
    pub hit_regions: Vec<HitRegion>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl PageState {
    pub fn new(mut doc: Document, config: AppConfig) -> Self {
        // Layout, pagination and carousel all switch at the configured width.
        if doc.compact_breakpoint != config.compact_breakpoint {
            doc.compact_breakpoint = config.compact_breakpoint;
            let viewport = doc.viewport;
            landing::relayout(&mut doc, viewport);
        }
        let reveal = RevealObserver::new(config.reveal_threshold);
        Self {
            doc,
            config,
            listeners: ListenerRegistry::default(),
            app_listeners: Vec::new(),
            drawer: OverlayController::new(None),
            popup: OverlayController::new(None),
            carousel: CarouselEngine::default(),
            reveal,
            animation: None,
            pending_gates: Vec::new(),
            hit_regions: Vec::new(),
            should_quit: false,
            status_message: None,
        }
    }

    /// Element under a terminal cell, preferring the topmost region.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ElementId> {
        self.hit_regions
            .iter()
            .rev()
            .find(|r| {
                column >= r.area.x
                    && column < r.area.x.saturating_add(r.area.width)
                    && row >= r.area.y
                    && row < r.area.y.saturating_add(r.area.height)
            })
            .map(|r| r.element)
    }
}
