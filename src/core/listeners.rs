//! Event listener registrations.
//!
//! Listeners are plain data (target element, event kind, behavior) so the
//! page controller can dispatch them and release them.  Whoever registers a
//! group of listeners keeps their ids and hands them back via
//! [`ListenerRegistry::release`] before registering again.

use super::document::ElementId;

/// DOM events the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
}

/// Behavior attached to a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    ShowNav,
    HideNav,
    ShowPopup,
    HidePopup,
    /// Closes the popup only when the click landed on the container itself.
    PopupBackdrop,
    /// Opens the popup and prevents the element's default action.
    PopupTrigger,
    /// Carousel track scrolled; feeds the scroll-settle gate.
    TrackScroll,
    /// Pagination dot at this index was clicked.
    DotClick(usize),
}

pub type ListenerId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub id: ListenerId,
    pub target: ElementId,
    pub kind: EventKind,
    pub binding: Binding,
}

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: ListenerId,
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn add(&mut self, target: ElementId, kind: EventKind, binding: Binding) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            target,
            kind,
            binding,
        });
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Remove every listener in `group`, leaving the group empty.
    pub fn release(&mut self, group: &mut Vec<ListenerId>) {
        if group.is_empty() {
            return;
        }
        for id in group.drain(..) {
            self.remove(id);
        }
    }

    /// Bindings registered on `target` for `kind`, in registration order.
    pub fn bindings_for(&self, target: ElementId, kind: EventKind) -> Vec<Binding> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| l.binding)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }
}
