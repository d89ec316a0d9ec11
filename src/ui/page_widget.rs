//! Custom Ratatui widget that renders the landing page, one terminal cell per
//! `px_per_column` × `px_per_row` page pixels.
//!
//! The widget reads element state from the [`Document`] and never mutates it;
//! clickable elements are reported back as [`HitRegion`]s so mouse input can
//! be dispatched to the element under the pointer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget,
    },
};

use crate::app::state::HitRegion;
use crate::core::{
    document::{Document, ElementId},
    markers::*,
};

use super::theme::Theme;

/// Page pixels → screen rows for the current vertical scroll.
#[derive(Debug, Clone, Copy)]
struct Canvas {
    area: Rect,
    scroll_y: f64,
    px_per_column: f64,
    px_per_row: f64,
}

impl Canvas {
    fn columns(&self, px: f64) -> u16 {
        (px / self.px_per_column).round().clamp(0.0, f64::from(u16::MAX)) as u16
    }

    /// Full-width band of rows covered by a page box, clipped to the canvas.
    fn rows(&self, top: f64, height: f64) -> Option<Rect> {
        let start = ((top - self.scroll_y) / self.px_per_row).round() as i64;
        let end = start + (height / self.px_per_row).round() as i64;
        let lo = start.max(0);
        let hi = end.min(i64::from(self.area.height));
        if hi <= lo {
            return None;
        }
        Some(Rect::new(
            self.area.x,
            self.area.y + lo as u16,
            self.area.width,
            (hi - lo) as u16,
        ))
    }

    /// [`rows`](Self::rows) narrowed to `clip`.
    fn rows_within(&self, top: f64, height: f64, clip: Rect) -> Option<Rect> {
        let r = self.rows(top, height)?.intersection(clip);
        (!r.is_empty()).then_some(r)
    }
}

/// `"15px"` → `15.0`; anything else is `0`.
fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .strip_suffix("px")
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

// ───────────────────────────────────────── widget ────────────

/// The page widget itself, created fresh each frame.
pub struct PageWidget<'a> {
    doc: &'a Document,
    px_per_column: f64,
    px_per_row: f64,
}

impl<'a> PageWidget<'a> {
    pub fn new(doc: &'a Document, px_per_column: f64, px_per_row: f64) -> Self {
        Self {
            doc,
            px_per_column: px_per_column.max(1.0),
            px_per_row: px_per_row.max(1.0),
        }
    }

    fn render_header(
        &self,
        canvas: &Canvas,
        header: ElementId,
        buf: &mut Buffer,
        hits: &mut Vec<HitRegion>,
    ) {
        let Some(el) = self.doc.get(header) else {
            return;
        };
        let Some(rect) = canvas.rows(el.geometry.top, el.geometry.height) else {
            return;
        };
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border_style())
            .render(rect, buf);

        let row = rect.y + rect.height.saturating_sub(1) / 2;
        let mut right = rect.right();
        for &child in &el.children {
            let Some(c) = self.doc.get(child) else {
                continue;
            };
            if c.has_class("logo") {
                buf.set_stringn(
                    rect.x + 1,
                    row,
                    &c.label,
                    usize::from(rect.width.saturating_sub(1)),
                    Theme::header_style(),
                );
                continue;
            }
            // Everything else is a button, packed against the right edge.
            let text = format!(" {} ", c.label);
            let width = Span::raw(text.as_str()).width() as u16;
            if right < rect.x + width + 1 {
                continue;
            }
            right -= width + 1;
            buf.set_string(right, row, &text, Theme::button_style());
            hits.push(HitRegion {
                area: Rect::new(right, row, width, 1),
                element: child,
            });
        }
    }

    fn render_section(
        &self,
        canvas: &Canvas,
        section: ElementId,
        buf: &mut Buffer,
        hits: &mut Vec<HitRegion>,
    ) {
        let Some(el) = self.doc.get(section) else {
            return;
        };
        let g = el.geometry;
        let Some(rect) = canvas.rows(g.top, g.height) else {
            return;
        };
        let visible = !el.has_class(FADE_IN_CLASS) || el.has_state(StateMarker::Visible);
        let style = Theme::section_style(visible);
        let title_style = if visible { Theme::title_style() } else { style };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(Span::styled(format!(" {} ", el.label), title_style));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let mut inline = 0;
        for &child in &el.children {
            let Some(c) = self.doc.get(child) else {
                continue;
            };
            if c.has_class(MANAGERS_GRID_CLASS) {
                self.render_track(canvas, child, inner, buf);
            } else if c.id.as_deref() == Some(PAGINATION_ID) {
                self.render_dots(canvas, child, inner, buf, hits);
            } else if !c.label.is_empty() {
                // Inline content flows from the second row of the section.
                inline += 1;
                let top = g.top + (inline + 1) as f64 * self.px_per_row;
                let Some(line) = canvas.rows_within(top, self.px_per_row, inner) else {
                    continue;
                };
                let text = format!(" {} ", c.label);
                let width = (Span::raw(text.as_str()).width() as u16).min(line.width);
                let x = line.x + line.width.saturating_sub(width).min(1);
                let style = if visible {
                    Theme::button_style()
                } else {
                    style
                };
                buf.set_stringn(x, line.y, &text, usize::from(width), style);
                hits.push(HitRegion {
                    area: Rect::new(x, line.y, width, 1),
                    element: child,
                });
            }
        }
    }

    /// Cards laid side by side, shifted left by the track's scroll offset and
    /// clipped to the section.
    fn render_track(&self, canvas: &Canvas, track: ElementId, clip: Rect, buf: &mut Buffer) {
        let Some(el) = self.doc.get(track) else {
            return;
        };
        let Some(rect) = canvas.rows_within(el.geometry.top, el.geometry.height, clip) else {
            return;
        };
        let left_edge = f64::from(clip.x);
        let right_edge = f64::from(clip.right());

        let mut x_px = -el.scroll_left;
        for &card in &el.children {
            let Some(c) = self.doc.get(card) else {
                continue;
            };
            let start = (left_edge + x_px / self.px_per_column).round();
            let end = (left_edge + (x_px + c.geometry.width) / self.px_per_column).round();
            x_px += c.geometry.width;

            let lo = start.max(left_edge);
            let hi = end.min(right_edge);
            if hi - lo < 1.0 {
                continue;
            }
            let mut borders = Borders::ALL;
            if start < left_edge {
                borders.remove(Borders::LEFT);
            }
            if end > right_edge {
                borders.remove(Borders::RIGHT);
            }
            let card_rect = Rect::new(lo as u16, rect.y, (hi - lo) as u16, rect.height);
            let block = Block::default()
                .borders(borders)
                .border_style(Theme::card_style());
            let inner = block.inner(card_rect);
            block.render(card_rect, buf);

            let lines: Vec<Line> = c
                .label
                .split(" · ")
                .map(|part| Line::from(Span::styled(part.to_string(), Theme::card_style())))
                .collect();
            Paragraph::new(lines).render(inner, buf);
        }
    }

    fn render_dots(
        &self,
        canvas: &Canvas,
        pagination: ElementId,
        clip: Rect,
        buf: &mut Buffer,
        hits: &mut Vec<HitRegion>,
    ) {
        // Pagination is a compact-layout control.
        if !self.doc.is_compact() {
            return;
        }
        let Some(el) = self.doc.get(pagination) else {
            return;
        };
        let Some(rect) = canvas.rows_within(el.geometry.top, el.geometry.height, clip) else {
            return;
        };
        let count = u16::try_from(el.children.len()).unwrap_or(u16::MAX);
        let width = count.saturating_mul(2).saturating_sub(1);
        let mut x = rect.x + rect.width.saturating_sub(width) / 2;
        for &dot in &el.children {
            if x >= rect.right() {
                break;
            }
            let active = self.doc.has_state(dot, StateMarker::Active);
            let symbol = if active { "●" } else { "○" };
            buf.set_string(x, rect.y, symbol, Theme::dot_style(active));
            hits.push(HitRegion {
                area: Rect::new(x, rect.y, 1, 1),
                element: dot,
            });
            x = x.saturating_add(2);
        }
    }
}

impl StatefulWidget for PageWidget<'_> {
    type State = Vec<HitRegion>;

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut Self::State) {
        let mut canvas = Canvas {
            area,
            scroll_y: self.doc.scroll_y,
            px_per_column: self.px_per_column,
            px_per_row: self.px_per_row,
        };
        // Right side: scrollbar while the page scrolls, body padding while it
        // is locked.  Either way the content keeps its width.
        let bar = canvas.columns(self.doc.viewport.scrollbar_width).min(area.width);
        let gutter = canvas
            .columns(parse_px(&self.doc.body_style.padding_right))
            .min(area.width - bar);
        canvas.area.width = area.width - bar - gutter;

        if let Some(header) = self.doc.query_class("site-header") {
            self.render_header(&canvas, header, buf, hits);
        }
        if let Some(main) = self.doc.query_tag("main").and_then(|m| self.doc.get(m)) {
            for &section in &main.children {
                self.render_section(&canvas, section, buf, hits);
            }
        }

        if bar > 0 {
            let bar_area = Rect::new(area.right() - bar, area.y, bar, area.height);
            let rows = |px: f64| (px / self.px_per_row).round() as usize;
            let mut scrollbar = ScrollbarState::new(rows(self.doc.max_scroll_y()))
                .position(rows(self.doc.scroll_y))
                .viewport_content_length(usize::from(area.height));
            Scrollbar::new(ScrollbarOrientation::VerticalRight).render(
                bar_area,
                buf,
                &mut scrollbar,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::landing::{build, LandingOptions};
    use crate::core::overlay::OverlayController;
    use crate::core::viewport::Viewport;

    const COLS: u16 = 50;
    const ROWS: u16 = 43;

    fn phone() -> Document {
        build(
            Viewport::new(f64::from(COLS) * 8.0, f64::from(ROWS) * 16.0),
            &LandingOptions {
                scrollbar_size: 8.0,
                ..LandingOptions::default()
            },
        )
    }

    fn draw(doc: &Document) -> (Buffer, Vec<HitRegion>) {
        let area = Rect::new(0, 0, COLS, ROWS);
        let mut buf = Buffer::empty(area);
        let mut hits = Vec::new();
        PageWidget::new(doc, 8.0, 16.0).render(area, &mut buf, &mut hits);
        (buf, hits)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn region_of(hits: &[HitRegion], element: ElementId) -> Option<Rect> {
        hits.iter().find(|h| h.element == element).map(|h| h.area)
    }

    #[test]
    fn px_values_parse() {
        assert_eq!(parse_px("15px"), 15.0);
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("auto"), 0.0);
    }

    #[test]
    fn buttons_and_dots_are_clickable() {
        let doc = phone();
        let (_, hits) = draw(&doc);

        let burger = doc.query_class(BURGER_CLASS).unwrap();
        let open = doc.get_element_by_id(OPEN_POPUP_ID).unwrap();
        assert!(region_of(&hits, burger).is_some());
        assert!(region_of(&hits, open).is_some());
        assert!(region_of(&hits, doc.query_marker_all(POPUP_TRIGGER_MARKER)[0]).is_some());

        let mut doc = doc;
        doc.set_scroll_y(400.0);
        let (buf, hits) = draw(&doc);
        let pagination = doc.get_element_by_id(PAGINATION_ID).unwrap();
        let dots = doc.query_class_within(pagination, DOT_CLASS);
        let first = region_of(&hits, dots[0]).unwrap();
        assert!(row_text(&buf, first.y).contains("○ ○ ○ ○"));
    }

    #[test]
    fn oversized_pagination_draws_only_the_dots_that_fit() {
        let mut doc = build(
            Viewport::new(f64::from(COLS) * 8.0, f64::from(ROWS) * 16.0),
            &LandingOptions {
                cards: 40_000,
                scrollbar_size: 8.0,
                ..LandingOptions::default()
            },
        );
        doc.set_scroll_y(400.0);
        let (_, hits) = draw(&doc);

        let pagination = doc.get_element_by_id(PAGINATION_ID).unwrap();
        let drawn: Vec<Rect> = doc
            .query_class_within(pagination, DOT_CLASS)
            .into_iter()
            .filter_map(|dot| region_of(&hits, dot))
            .collect();
        assert!(!drawn.is_empty());
        assert!(drawn.len() < usize::from(COLS));
        assert!(drawn.iter().all(|r| r.right() <= COLS));
    }

    #[test]
    fn wide_layout_at_a_lower_breakpoint_has_no_dots() {
        let mut doc = build(
            Viewport::new(f64::from(COLS) * 8.0, f64::from(ROWS) * 16.0),
            &LandingOptions {
                compact_breakpoint: 300.0,
                ..LandingOptions::default()
            },
        );
        doc.set_scroll_y(400.0);
        let (_, hits) = draw(&doc);
        let pagination = doc.get_element_by_id(PAGINATION_ID).unwrap();
        for dot in doc.query_class_within(pagination, DOT_CLASS) {
            assert!(region_of(&hits, dot).is_none());
        }
    }

    #[test]
    fn locking_the_body_does_not_shift_content() {
        let mut doc = phone();
        assert!(doc.viewport.scrollbar_width > 0.0);
        let burger = doc.query_class(BURGER_CLASS).unwrap();
        let (_, before) = draw(&doc);

        let popup = doc.get_element_by_id(CONTACT_POPUP_ID);
        OverlayController::new(popup).show(&mut doc);
        assert_eq!(doc.viewport.scrollbar_width, 0.0);
        let (_, after) = draw(&doc);

        assert_eq!(region_of(&before, burger), region_of(&after, burger));
    }

    #[test]
    fn scrolled_out_sections_are_not_drawn() {
        let mut doc = phone();
        let burger = doc.query_class(BURGER_CLASS).unwrap();
        doc.set_scroll_y(doc.max_scroll_y());
        let (_, hits) = draw(&doc);
        assert!(region_of(&hits, burger).is_none());
    }

    #[test]
    fn track_offset_moves_cards() {
        let mut doc = phone();
        let track = doc.query_class(MANAGERS_GRID_CLASS).unwrap();
        let (before, _) = draw(&doc);
        let y = (0..ROWS)
            .find(|&y| row_text(&before, y).contains("Anna Petrova"))
            .unwrap();

        let card = doc.offset_width(doc.query_class(MANAGER_CARD_CLASS).unwrap());
        doc.set_scroll_left(track, card);
        let (after, _) = draw(&doc);
        assert!(!row_text(&after, y).contains("Anna Petrova"));
        assert!(row_text(&after, y).contains("Igor Sokolov"));
    }
}
