//! Auto-refresh timer.
//!
//! A `RefreshTimer` is the polling loop: while it exists, a `RefreshTick`
//! is sent every `period`. Dropping it aborts the task, so no tick can be
//! produced afterwards.

use std::time::Duration;

use log::{debug, info};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::core::action::Action;

pub struct RefreshTimer {
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    /// Starts ticking one full `period` from now (the caller reloads immediately itself).
    pub fn start(period: Duration, tx: UnboundedSender<Action>) -> Self {
        info!("Auto refresh started (every {:?})", period);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("Auto refresh tick");
                if tx.send(Action::RefreshTick).is_err() {
                    debug!("Refresh receiver dropped, stopping timer");
                    return;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
        info!("Auto refresh stopped");
    }
}
