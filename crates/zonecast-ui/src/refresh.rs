//! Periodic forecast refresh, scoped to one zone selection.
//!
//! A `RefreshTimer` ticks for exactly one selection generation. Dropping it
//! cancels the background task, so replacing or clearing the controller's
//! timer is all it takes to stop refreshing.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Sent each time the refresh interval elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTick {
    pub generation: u64,
}

#[derive(Debug)]
pub struct RefreshTimer {
    generation: u64,
    cancel: CancellationToken,
}

impl RefreshTimer {
    /// Start ticking every `period`. The first tick fires one full period
    /// from now, since the caller fetches immediately on selection.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(generation: u64, period: Duration, tx: UnboundedSender<RefreshTick>) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(RefreshTick { generation }).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("Refresh timer for generation {} stopped", generation);
        });

        tracing::debug!(
            "Refresh timer for generation {} started ({}s)",
            generation,
            period.as_secs()
        );
        Self { generation, cancel }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
