//! One-shot fade-in reveal driven by viewport intersection.

use std::collections::BTreeSet;

use super::document::{Document, ElementId};
use super::markers::StateMarker;

/// Share of an element that must be on screen before it is revealed.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Watches elements until they first intersect the viewport, marks them
/// `visible`, and then forgets them.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    observed: BTreeSet<ElementId>,
}

impl RevealObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            observed: BTreeSet::new(),
        }
    }

    pub fn observe(&mut self, elements: &[ElementId]) {
        self.observed.extend(elements.iter().copied());
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.observed.contains(&element)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Entries for observed elements that currently meet the threshold.
    pub fn entries(&self, doc: &Document) -> Vec<IntersectionEntry> {
        self.observed
            .iter()
            .filter_map(|&target| {
                let ratio = doc.intersection_ratio(target);
                (ratio > 0.0 && ratio >= self.threshold).then_some(IntersectionEntry {
                    target,
                    ratio,
                    is_intersecting: true,
                })
            })
            .collect()
    }

    /// Reveal every intersecting target that is still observed and stop
    /// observing it.  Returns the elements revealed by this call.
    pub fn handle(&mut self, doc: &mut Document, entries: &[IntersectionEntry]) -> Vec<ElementId> {
        let mut revealed = Vec::new();
        for entry in entries {
            if entry.is_intersecting && self.is_observing(entry.target) {
                self.observed.remove(&entry.target);
                doc.set_state(entry.target, StateMarker::Visible, true);
                revealed.push(entry.target);
            }
        }
        revealed
    }
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::{Element, Geometry};
    use crate::core::viewport::Viewport;

    fn page_with_sections(tops: &[f64]) -> (Document, Vec<ElementId>) {
        let mut doc = Document::new(Viewport::new(400.0, 600.0));
        let ids = tops
            .iter()
            .map(|&top| {
                let mut el = Element::new("section").with_class("scroll-fade-in");
                el.geometry = Geometry { top, width: 400.0, height: 300.0 };
                doc.append(doc.root, el)
            })
            .collect();
        (doc, ids)
    }

    #[test]
    fn reveals_once_and_unobserves() {
        let (mut doc, ids) = page_with_sections(&[100.0]);
        let mut observer = RevealObserver::default();
        observer.observe(&ids);

        let entries = observer.entries(&doc);
        assert_eq!(entries.len(), 1);
        let doubled = [entries[0], entries[0]];
        assert_eq!(observer.handle(&mut doc, &doubled), vec![ids[0]]);
        assert!(doc.has_state(ids[0], StateMarker::Visible));
        assert!(!observer.is_observing(ids[0]));

        // A later intersection does nothing, and leaving the viewport never
        // hides it again.
        assert!(observer.handle(&mut doc, &doubled).is_empty());
        doc.set_scroll_y(10_000.0);
        assert!(doc.has_state(ids[0], StateMarker::Visible));
    }

    #[test]
    fn threshold_gates_entries() {
        let (mut doc, ids) = page_with_sections(&[0.0, 580.0, 2000.0]);
        let mut observer = RevealObserver::default();
        observer.observe(&ids);

        // 20px of the second section is 6.6% visible: below the threshold.
        let entries = observer.entries(&doc);
        assert_eq!(entries.iter().map(|e| e.target).collect::<Vec<_>>(), vec![ids[0]]);
        observer.handle(&mut doc, &entries);

        doc.set_scroll_y(100.0);
        let entries = observer.entries(&doc);
        assert_eq!(entries.iter().map(|e| e.target).collect::<Vec<_>>(), vec![ids[1]]);
        observer.handle(&mut doc, &entries);

        assert_eq!(observer.observed_count(), 1);
        assert!(!doc.has_state(ids[2], StateMarker::Visible));
    }

    #[test]
    fn empty_input_observes_nothing() {
        let (doc, _) = page_with_sections(&[0.0]);
        let mut observer = RevealObserver::default();
        observer.observe(&[]);
        assert_eq!(observer.observed_count(), 0);
        assert!(observer.entries(&doc).is_empty());
    }

    #[test]
    fn non_intersecting_entries_are_ignored() {
        let (mut doc, ids) = page_with_sections(&[0.0]);
        let mut observer = RevealObserver::default();
        observer.observe(&ids);
        let entry = IntersectionEntry {
            target: ids[0],
            ratio: 0.0,
            is_intersecting: false,
        };
        assert!(observer.handle(&mut doc, &[entry]).is_empty());
        assert!(observer.is_observing(ids[0]));
    }
}
