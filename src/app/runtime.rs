//! Debounce gates for the event loop.
//!
//! Scroll and resize bursts are collapsed here; once a stream goes quiet the
//! gate posts [`AppEvent::Settled`] back into the loop's channel.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

use super::debounce::{debounce, Debounced};
use super::event::{AppEvent, Gate};
use crate::config::AppConfig;

#[derive(Debug)]
pub struct Gates {
    scroll: Debounced<()>,
    resize: Debounced<()>,
}

impl Gates {
    pub fn new(tx: UnboundedSender<AppEvent>, config: &AppConfig) -> Self {
        let gates = Self {
            scroll: settle_gate(tx.clone(), Gate::Scroll, config.scroll_quiet()),
            resize: settle_gate(tx, Gate::Resize, config.resize_quiet()),
        };
        debug!(
            scroll = ?gates.scroll.quiet(),
            resize = ?gates.resize.quiet(),
            "debounce gates ready"
        );
        gates
    }

    /// Re-arm `gate`, superseding its pending settle.
    pub fn schedule(&mut self, gate: Gate) {
        let debounced = match gate {
            Gate::Scroll => &mut self.scroll,
            Gate::Resize => &mut self.resize,
        };
        trace!(?gate, superseded = debounced.is_pending(), "gate re-armed");
        debounced.call(());
    }

    /// Re-arm every gate in `gates`, in order.
    pub fn schedule_all(&mut self, gates: impl IntoIterator<Item = Gate>) {
        for gate in gates {
            self.schedule(gate);
        }
    }
}

fn settle_gate(
    tx: UnboundedSender<AppEvent>,
    gate: Gate,
    quiet: std::time::Duration,
) -> Debounced<()> {
    debounce(
        move |()| {
            // The loop may already be gone on shutdown.
            let _ = tx.send(AppEvent::Settled(gate));
        },
        quiet,
    )
}
