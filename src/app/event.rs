//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Relay
//! replies come back over the same channel.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use crate::core::contact::Ticket;
use crate::core::relay::{RelayError, RelayReply};

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    /// A form submission finished (or failed to reach the relay).
    Submission {
        ticket: Ticket,
        outcome: Result<RelayReply, RelayError>,
    },
}

/// Create the application channel.
pub fn channel() -> (mpsc::UnboundedSender<AppEvent>, mpsc::UnboundedReceiver<AppEvent>) {
    mpsc::unbounded_channel()
}

/// Spawns a blocking task that polls the terminal for events and sends them
/// through `tx`.  Stops once the receiver is dropped.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<AppEvent>, tick_rate: Duration) {
    tokio::task::spawn_blocking(move || loop {
        // Poll with the tick rate so Tick events still flow while idle.
        let has_event = event::poll(tick_rate).unwrap_or(false);
        let app_event = if has_event {
            match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("terminal read failed: {e}");
                    continue;
                }
            }
        } else {
            AppEvent::Tick
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });
}
