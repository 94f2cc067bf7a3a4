//! Background relay jobs so the UI loop never waits on the network.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::contact::PendingSubmission;
use crate::core::relay::FormRelay;

use super::event::AppEvent;

/// Send `pending` through `relay` on a spawned task and report the outcome
/// as [`AppEvent::Submission`].
pub fn spawn_submission(
    tx: mpsc::UnboundedSender<AppEvent>,
    relay: Arc<dyn FormRelay>,
    pending: PendingSubmission,
) {
    tokio::spawn(async move {
        let outcome = relay.send(&pending.payload).await;
        if let Err(e) = &outcome {
            tracing::warn!(kind = ?pending.kind, "relay request failed: {e}");
        }
        let _ = tx.send(AppEvent::Submission {
            ticket: pending.ticket,
            outcome,
        });
    });
}
