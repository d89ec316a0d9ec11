//! Terminal and timer events feeding the main loop.
//!
//! Terminal input is read on a blocking task and forwarded over a channel so
//! the main loop stays non-blocking.  Debounce timers post into the same
//! channel, which keeps every state mutation on the loop.  Animation frames
//! come from their own clock so a stream of input cannot hold them back.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};

/// Which debounced event stream settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Carousel track stopped scrolling.
    Scroll,
    /// Window stopped resizing.
    Resize,
}

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Animation frame from the frame clock.
    Tick,
    Settled(Gate),
}

/// Poll the terminal on a blocking task and forward its events to `tx`.
///
/// `poll_timeout` bounds how long the reader waits before checking whether
/// the loop is still listening.
pub fn spawn_event_reader(poll_timeout: Duration, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::task::spawn_blocking(move || loop {
        if !event::poll(poll_timeout).unwrap_or(false) {
            if tx.is_closed() {
                break;
            }
            continue;
        }
        let app_event = match event::read() {
            Ok(CtEvent::Key(k)) => AppEvent::Key(k),
            Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
            Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
            _ => continue,
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });
}

/// Frame clock for [`next_event`].  Frames missed while the loop was busy
/// are dropped rather than replayed.
pub fn frame_clock(rate: Duration) -> Interval {
    let mut frames = time::interval(rate);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    frames
}

/// Wait for the loop's next event.  A due frame is delivered before queued
/// input.  `None` once every sender is gone.
pub async fn next_event(
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
    frames: &mut Interval,
) -> Option<AppEvent> {
    tokio::select! {
        biased;
        _ = frames.tick() => Some(AppEvent::Tick),
        event = events.recv() => event,
    }
}
