//! Names the controller shares with the page markup and stylesheet.
//!
//! Every id, class and data marker the behaviors look up lives here, together
//! with the typed [`StateMarker`] that replaces bare `"active"` / `"visible"`
//! strings at call sites.

// ───────────────────────────────────────── state markers ─────

/// State classes toggled on elements.  Stylesheets key off these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateMarker {
    /// Open overlay or current pagination dot.
    Active,
    /// Revealed fade-in element.
    Visible,
}

impl StateMarker {
    pub fn class_name(self) -> &'static str {
        match self {
            StateMarker::Active => "active",
            StateMarker::Visible => "visible",
        }
    }
}

// ───────────────────────────────────────── hooks ─────────────

/// Navigation drawer container.
pub const MOBILE_NAV_ID: &str = "mobileNav";
/// Opens the drawer.
pub const BURGER_CLASS: &str = "burger-menu";
/// Closes the drawer.
pub const NAV_CLOSE_CLASS: &str = "mobile-nav-close-btn";
/// Any element carrying this marker closes the drawer on click.
pub const NAV_LINK_MARKER: &str = "data-mobile-nav-link";

/// Contact modal container; clicks on the container itself are backdrop clicks.
pub const CONTACT_POPUP_ID: &str = "contact-popup";
pub const OPEN_POPUP_ID: &str = "open-popup-btn";
pub const CLOSE_POPUP_ID: &str = "close-popup-btn";
/// Any element carrying this marker opens the popup (default action prevented).
pub const POPUP_TRIGGER_MARKER: &str = "data-mobile-popup-trigger";

/// Horizontally scrollable carousel track.
pub const MANAGERS_GRID_CLASS: &str = "managers-grid";
pub const MANAGER_CARD_CLASS: &str = "manager-card";
/// Pagination dot container.
pub const PAGINATION_ID: &str = "manager-pagination-dots";
pub const DOT_CLASS: &str = "dot";

/// Elements that fade in the first time they scroll into view.
pub const FADE_IN_CLASS: &str = "scroll-fade-in";
