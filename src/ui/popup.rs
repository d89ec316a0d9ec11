//! Overlay widgets for the navigation drawer and the contact popup.
//!
//! Both are drawn on top of the page only while their element is active and
//! report their clickable parts as [`HitRegion`]s, after the page's own, so
//! they win the hit test.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::app::state::HitRegion;
use crate::core::{
    document::{Document, ElementId},
    markers::*,
};

use super::theme::Theme;

const DRAWER_WIDTH: u16 = 28;
const POPUP_WIDTH: u16 = 44;

// ───────────────────────────────────────── nav drawer ────────

/// Slide-in navigation panel pinned to the right edge.
pub struct NavDrawer<'a> {
    pub doc: &'a Document,
    pub nav: ElementId,
}

impl StatefulWidget for NavDrawer<'_> {
    type State = Vec<HitRegion>;

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut Self::State) {
        let width = DRAWER_WIDTH.min(area.width);
        let panel = Rect::new(area.right() - width, area.y, width, area.height);
        Clear.render(panel, buf);

        let block = Block::default()
            .title(" Menu ")
            .title_style(Theme::title_style())
            .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(panel);
        block.render(panel, buf);
        hits.push(HitRegion {
            area: panel,
            element: self.nav,
        });

        let mut row = inner.y;
        for id in self.doc.descendants(self.nav) {
            let Some(el) = self.doc.get(id) else {
                continue;
            };
            if row >= inner.bottom() {
                break;
            }
            if el.has_class(NAV_CLOSE_CLASS) {
                // Close button sits in the top-right corner of the panel.
                let x = inner.right().saturating_sub(3).max(inner.x);
                buf.set_string(x, row, format!(" {} ", el.label), Theme::button_style());
                hits.push(HitRegion {
                    area: Rect::new(x, row, 3.min(inner.width), 1),
                    element: id,
                });
                row += 2;
            } else if el.markers.contains(NAV_LINK_MARKER) {
                let text = format!("  {}", el.label);
                buf.set_stringn(
                    inner.x,
                    row,
                    &text,
                    usize::from(inner.width),
                    Theme::link_style(),
                );
                hits.push(HitRegion {
                    area: Rect::new(inner.x, row, inner.width, 1),
                    element: id,
                });
                row += 2;
            }
        }
    }
}

// ───────────────────────────────────────── contact popup ─────

/// Modal contact card over a dimmed backdrop.
///
/// The backdrop is the popup element itself; the card is its content child.
pub struct ContactPopup<'a> {
    pub doc: &'a Document,
    pub popup: ElementId,
}

impl StatefulWidget for ContactPopup<'_> {
    type State = Vec<HitRegion>;

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut Self::State) {
        buf.set_style(area, Theme::backdrop_style());
        hits.push(HitRegion {
            area,
            element: self.popup,
        });

        let content = self
            .doc
            .descendants(self.popup)
            .into_iter()
            .find(|&id| self.doc.get(id).is_some_and(|e| e.has_class("popup-content")));
        let Some(content) = content.and_then(|id| self.doc.get(id).map(|e| (id, e))) else {
            return;
        };
        let (content_id, content_el) = content;

        let paragraphs: Vec<&str> = content_el
            .children
            .iter()
            .filter_map(|&c| self.doc.get(c))
            .filter(|c| c.tag == "p")
            .map(|c| c.label.as_str())
            .collect();
        let height = paragraphs.len() as u16 * 2 + 3;
        let card = centered_fixed(POPUP_WIDTH, height, area);
        Clear.render(card, buf);

        let block = Block::default()
            .title(format!(" {} ", content_el.label))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(card);
        block.render(card, buf);
        hits.push(HitRegion {
            area: card,
            element: content_id,
        });

        let mut lines = vec![Line::raw("")];
        for text in paragraphs {
            lines.push(Line::from(Span::raw(format!(" {text}"))));
            lines.push(Line::raw(""));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);

        if let Some(close) = self.doc.get_element_by_id(CLOSE_POPUP_ID) {
            let label = self.doc.get(close).map_or("✕", |e| e.label.as_str());
            let x = card.right().saturating_sub(5).max(card.x);
            buf.set_string(x, card.y, format!(" {label} "), Theme::button_style());
            hits.push(HitRegion {
                area: Rect::new(x, card.y, 3.min(card.width), 1),
                element: close,
            });
        }
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
